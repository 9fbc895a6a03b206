//! Query-string construction for list endpoints

use url::form_urlencoded;

/// Ordered set of query parameters; absent values are skipped
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryString {
    pairs: Vec<(&'static str, String)>,
}

impl QueryString {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `key=value` when `value` is present
    pub fn push<V: ToString>(&mut self, key: &'static str, value: Option<V>) -> &mut Self {
        if let Some(value) = value {
            self.pairs.push((key, value.to_string()));
        }
        self
    }

    /// Add `key=value` when `value` is present and not blank
    pub fn push_text(&mut self, key: &'static str, value: Option<&str>) -> &mut Self {
        self.push(key, value.map(str::trim).filter(|v| !v.is_empty()))
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Form-encoded `a=1&b=2`, empty when there are no pairs
    pub fn encode(&self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        for (key, value) in &self.pairs {
            serializer.append_pair(key, value);
        }
        serializer.finish()
    }

    /// `path?query`, or `path` untouched when there is nothing to append
    pub fn append_to(&self, path: &str) -> String {
        if self.is_empty() {
            path.to_string()
        } else {
            format!("{}?{}", path, self.encode())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_query_leaves_path_alone() {
        assert_eq!(QueryString::new().append_to("/campaigns"), "/campaigns");
    }

    #[test]
    fn test_absent_and_blank_values_are_skipped() {
        let mut query = QueryString::new();
        query
            .push("page", Some(1))
            .push::<u32>("limit", None)
            .push_text("search", Some("   "));
        assert_eq!(query.append_to("/customers"), "/customers?page=1");
    }

    #[test]
    fn test_values_are_form_encoded() {
        let mut query = QueryString::new();
        query.push_text("search", Some("spring sale & more"));
        assert_eq!(query.encode(), "search=spring+sale+%26+more");
    }
}
