use crate::value::Value;

///
/// Store
///
/// Backing slots of one model instance, in key insertion order.
/// A slot may exist with no value: the key is visible but absent.
///

#[derive(Debug, Default)]
pub(crate) struct Store {
    slots: Vec<(String, Option<Value>)>,
}

impl Store {
    /// Pre-seed visible keys with absent values.
    pub(crate) fn with_keys<'a>(keys: impl IntoIterator<Item = &'a str>) -> Self {
        Self {
            slots: keys.into_iter().map(|key| (key.to_string(), None)).collect(),
        }
    }

    pub(crate) fn get(&self, key: &str) -> Option<&Value> {
        self.slot(key).and_then(Option::as_ref)
    }

    pub(crate) fn contains(&self, key: &str) -> bool {
        self.slot(key).is_some()
    }

    pub(crate) fn insert(&mut self, key: &str, value: Option<Value>) {
        match self.slots.iter_mut().find(|(k, _)| k == key) {
            Some((_, slot)) => *slot = value,
            None => self.slots.push((key.to_string(), value)),
        }
    }

    /// Remove the key entirely, returning what it held.
    pub(crate) fn remove(&mut self, key: &str) -> Option<Value> {
        let index = self.slots.iter().position(|(k, _)| k == key)?;

        self.slots.remove(index).1
    }

    pub(crate) fn keys(&self) -> Vec<String> {
        self.slots.iter().map(|(key, _)| key.clone()).collect()
    }

    /// Present values only, in key order.
    pub(crate) fn entries(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.slots
            .iter()
            .filter_map(|(key, value)| value.as_ref().map(|v| (key.as_str(), v)))
    }

    fn slot(&self, key: &str) -> Option<&Option<Value>> {
        self.slots.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_keys_are_visible_but_absent() {
        let store = Store::with_keys(["a", "b"]);

        assert!(store.contains("a"));
        assert!(store.get("a").is_none());
        assert_eq!(store.entries().count(), 0);
        assert_eq!(store.keys(), vec!["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn insert_keeps_position_and_remove_drops_key() {
        let mut store = Store::with_keys(["a", "b"]);
        store.insert("c", Some(Value::from(3)));
        store.insert("a", Some(Value::from(1)));

        assert_eq!(store.keys(), vec!["a", "b", "c"]);
        assert_eq!(store.remove("a"), Some(Value::from(1)));
        assert!(!store.contains("a"));
        assert_eq!(store.remove("missing"), None);
    }
}
