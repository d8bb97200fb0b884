//! Query parameter handling for sort links.
//!
//! [`QueryParams`] is an ordered key/value collection mirroring the incoming
//! request query string. Sortable header cells re-issue the current
//! parameters with the order parameter replaced and the pagination parameter
//! removed, so the collection supports cheap copy-with-override operations.

/// Name of the query parameter carrying the sort request.
pub const ORDER_PARAM: &str = "order";

/// Name of the pagination parameter stripped from sort links.
pub const PAGE_PARAM: &str = "page";

/// Ordered query string parameters.
///
/// Insertion order is preserved so generated links stay stable across
/// renders. Duplicate keys are not merged; `get` returns the first match.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    /// Create an empty parameter set.
    pub fn new() -> Self {
        QueryParams::default()
    }

    /// Build a parameter set from key/value pairs.
    ///
    /// # Example
    ///
    /// ```rust
    /// use tabulon::QueryParams;
    ///
    /// let params = QueryParams::from_pairs([("order", "age_desc"), ("page", "3")]);
    /// assert_eq!(params.get("order"), Some("age_desc"));
    /// ```
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        QueryParams {
            pairs: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Look up the first value for a key.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Replace the first value for a key, or append the pair if absent.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.pairs.iter_mut().find(|(k, _)| *k == key) {
            Some(pair) => pair.1 = value,
            None => self.pairs.push((key, value)),
        }
    }

    /// Remove every pair with the given key.
    pub fn remove(&mut self, key: &str) {
        self.pairs.retain(|(k, _)| k != key);
    }

    /// Copy with one parameter replaced or appended.
    pub fn with(&self, key: impl Into<String>, value: impl Into<String>) -> Self {
        let mut copy = self.clone();
        copy.set(key, value);
        copy
    }

    /// Copy with one parameter removed.
    pub fn without(&self, key: &str) -> Self {
        let mut copy = self.clone();
        copy.remove(key);
        copy
    }

    /// True when no parameters are present.
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Number of parameter pairs.
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Iterate over the pairs in order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Render as a percent-encoded query string, without a leading `?`.
    pub fn to_query_string(&self) -> String {
        self.pairs
            .iter()
            .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&")
    }
}
