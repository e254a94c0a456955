mod compare;
mod json;
mod tag;


use crate::model::Model;
use time::OffsetDateTime;

// re-exports
pub use compare::{deep_eq, option_eq};
pub use tag::ValueKind;

///
/// Value
/// Dynamic property value held by a model instance.
///
/// Absence is never a `Value`: an unset slot is `None` at every API
/// boundary, while `Null` is a present-but-null value.
///
/// Map        → plain object; entry order follows insertion.
/// Model      → live nested model handle; clones share the instance.
///

#[derive(Clone, Debug)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    Date(OffsetDateTime),
    List(Vec<Self>),
    Map(Vec<(String, Self)>),
    Model(Model),
}

impl Value {
    ///
    /// CONSTRUCTION
    ///

    /// Build an empty plain object.
    #[must_use]
    pub const fn empty_map() -> Self {
        Self::Map(Vec::new())
    }

    /// Build a `Value::List` from owned items.
    pub fn from_list<T>(items: Vec<T>) -> Self
    where
        T: Into<Self>,
    {
        Self::List(items.into_iter().map(Into::into).collect())
    }

    /// Build a plain object from key/value pairs.
    ///
    /// Later duplicates replace earlier ones in place, so the first
    /// occurrence fixes the key's position.
    pub fn from_entries<K, V, I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Self>,
    {
        let mut map: Vec<(String, Self)> = Vec::new();
        for (key, value) in entries {
            let key = key.into();
            let value = value.into();
            match map.iter_mut().find(|(k, _)| *k == key) {
                Some(slot) => slot.1 = value,
                None => map.push((key, value)),
            }
        }

        Self::Map(map)
    }

    ///
    /// TYPES
    ///

    /// Run-time kind of this value.
    #[must_use]
    pub const fn kind(&self) -> ValueKind {
        tag::kind_of(self)
    }

    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    #[must_use]
    pub const fn is_number(&self) -> bool {
        matches!(self, Self::Int(_) | Self::Float(_))
    }

    #[must_use]
    pub const fn is_list(&self) -> bool {
        matches!(self, Self::List(_))
    }

    /// Returns true for plain objects only; model instances are excluded.
    #[must_use]
    pub const fn is_map(&self) -> bool {
        matches!(self, Self::Map(_))
    }

    #[must_use]
    pub const fn is_model(&self) -> bool {
        matches!(self, Self::Model(_))
    }

    ///
    /// ACCESSORS
    ///

    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Numeric view of `Int` and `Float` values.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub const fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Int(i) => Some(*i as f64),
            Self::Float(f) => Some(*f),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s.as_str()),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_list(&self) -> Option<&[Self]> {
        match self {
            Self::List(items) => Some(items.as_slice()),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_map(&self) -> Option<&[(String, Self)]> {
        match self {
            Self::Map(entries) => Some(entries.as_slice()),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_model(&self) -> Option<&Model> {
        match self {
            Self::Model(model) => Some(model),
            _ => None,
        }
    }

    /// Look up a key on a plain object.
    #[must_use]
    pub fn field(&self, key: &str) -> Option<&Self> {
        self.as_map()
            .and_then(|entries| entries.iter().find(|(k, _)| k == key))
            .map(|(_, v)| v)
    }

    ///
    /// SNAPSHOT
    ///

    /// Plain-data copy of this value with every nested model instance
    /// replaced by its own snapshot.
    ///
    /// Already-plain values come back deep-equal to themselves.
    #[must_use]
    pub fn to_plain(&self) -> Self {
        match self {
            Self::List(items) => Self::List(items.iter().map(Self::to_plain).collect()),
            Self::Map(entries) => Self::Map(
                entries
                    .iter()
                    .map(|(k, v)| (k.clone(), v.to_plain()))
                    .collect(),
            ),
            Self::Model(model) => model.eject(),
            other => other.clone(),
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        deep_eq(self, other)
    }
}

///
/// CONVERSIONS
///

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Self::Int(i64::from(i))
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Self::Int(i)
    }
}

impl From<u32> for Value {
    fn from(u: u32) -> Self {
        Self::Int(i64::from(u))
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Self::Float(f)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<Vec<Self>> for Value {
    fn from(items: Vec<Self>) -> Self {
        Self::List(items)
    }
}

impl From<OffsetDateTime> for Value {
    fn from(date: OffsetDateTime) -> Self {
        Self::Date(date)
    }
}

impl From<Model> for Value {
    fn from(model: Model) -> Self {
        Self::Model(model)
    }
}
