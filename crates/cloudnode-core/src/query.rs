//! Ordered request parameters.
//!
//! Drivers assemble request parameters with [`QueryParams`]; connections add their
//! credentials to the same list before the request is dispatched.

use std::fmt::Display;

/// Builder for assembling request parameter pairs.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(&'static str, String)>,
}

impl QueryParams {
    /// Create a new, empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self { pairs: Vec::new() }
    }

    /// Append a key/value pair when the value is present.
    pub fn push_opt<T>(&mut self, key: &'static str, value: Option<T>)
    where
        T: ToString,
    {
        if let Some(value) = value {
            self.pairs.push((key, value.to_string()));
        }
    }

    /// Append a required key/value pair.
    pub fn push<T>(&mut self, key: &'static str, value: T)
    where
        T: Display,
    {
        self.pairs.push((key, value.to_string()));
    }

    /// Append a comma-joined list, skipping the key entirely when the list is empty.
    pub fn push_joined<T>(&mut self, key: &'static str, values: &[T])
    where
        T: Display,
    {
        if values.is_empty() {
            return;
        }
        let joined = values
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(",");
        self.pairs.push((key, joined));
    }

    /// Append the pair only when no value for `key` exists yet.
    ///
    /// Returns `true` if the pair was added.
    pub fn set_if_absent<T>(&mut self, key: &'static str, value: T) -> bool
    where
        T: Display,
    {
        if self.contains(key) {
            return false;
        }
        self.pairs.push((key, value.to_string()));
        true
    }

    /// Returns true if a value for `key` is present.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.pairs.iter().any(|(k, _)| *k == key)
    }

    /// Returns the first value recorded for `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Iterate over the parameter names in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.pairs.iter().map(|(k, _)| *k)
    }

    /// Borrow the collected key/value pairs.
    #[must_use]
    pub fn as_pairs(&self) -> &[(&'static str, String)] {
        &self.pairs
    }

    /// Return the collected key/value pairs.
    #[must_use]
    pub fn into_pairs(self) -> Vec<(&'static str, String)> {
        self.pairs
    }

    /// Returns true if no parameters have been added.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::QueryParams;

    #[test]
    fn push_opt_skips_none() {
        let mut params = QueryParams::new();
        params.push_opt("name", Option::<String>::None);
        assert!(params.is_empty());
    }

    #[test]
    fn push_joined_uses_commas() {
        let mut params = QueryParams::new();
        params.push_joined("ssh_key_ids", &[1u64, 2, 3]);
        assert_eq!(params.get("ssh_key_ids"), Some("1,2,3"));
    }

    #[test]
    fn push_joined_skips_empty_list() {
        let mut params = QueryParams::new();
        params.push_joined::<u64>("ssh_key_ids", &[]);
        assert!(!params.contains("ssh_key_ids"));
    }

    #[test]
    fn set_if_absent_keeps_existing_value() {
        let mut params = QueryParams::new();
        params.push("client_id", "caller");
        assert!(!params.set_if_absent("client_id", "default"));
        assert!(params.set_if_absent("api_key", "key"));
        assert_eq!(
            params.into_pairs(),
            vec![
                ("client_id", "caller".to_string()),
                ("api_key", "key".to_string())
            ]
        );
    }

    #[test]
    fn keys_preserve_insertion_order() {
        let mut params = QueryParams::new();
        params.push("name", "web");
        params.push("size_id", 66);
        assert_eq!(params.keys().collect::<Vec<_>>(), vec!["name", "size_id"]);
    }
}
