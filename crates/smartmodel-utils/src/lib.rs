//! Small, dependency-light helpers shared by the SmartModel crates.

pub mod case;

pub use case::pascal_case;
