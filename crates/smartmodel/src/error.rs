use smartmodel_core::{error::ModelError, settings::ConfigError};
use thiserror::Error as ThisError;

///
/// Error
/// Everything a SmartModel call can fail with.
///

#[derive(Debug, ThisError)]
pub enum Error {
    #[error(transparent)]
    Model(#[from] ModelError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl Error {
    /// The validation error, if this is one.
    #[must_use]
    pub const fn as_model(&self) -> Option<&ModelError> {
        match self {
            Self::Model(err) => Some(err),
            Self::Config(_) => None,
        }
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use smartmodel_core::{error::ErrorCode, settings::SettingsOverride};

    #[test]
    fn wraps_both_error_families() {
        let config: Error = SettingsOverride::from_toml_str("strict = 3")
            .expect_err("not a bool")
            .into();
        assert!(config.as_model().is_none());
        assert!(config.to_string().starts_with("invalid settings"));

        let model: Error = ModelError::new(ErrorCode::Type, "M", "p", "bad").into();
        assert_eq!(model.to_string(), "bad");
        assert_eq!(model.as_model().map(|e| &e.code), Some(&ErrorCode::Type));
    }
}
