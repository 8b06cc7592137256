//! Server records and target matching

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// One deployment target from the config file.
///
/// `name` identifies the server, `aliases` lists alternative names. Every
/// other field is deployment data kept verbatim in `fields`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerRecord {
    pub name: String,

    #[serde(
        default,
        deserialize_with = "lenient_aliases",
        skip_serializing_if = "Option::is_none"
    )]
    pub aliases: Option<Vec<String>>,

    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

/// Accept `aliases` only when it is a list; anything else means no aliases.
fn lenient_aliases<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Array(items)) => Some(
            items
                .into_iter()
                .filter_map(|item| match item {
                    Value::String(s) => Some(s),
                    _ => None,
                })
                .collect(),
        ),
        _ => None,
    })
}

impl ServerRecord {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            aliases: None,
            fields: Map::new(),
        }
    }

    pub fn with_aliases<I, S>(mut self, aliases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.aliases = Some(aliases.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    /// True if `target` is this server's name or one of its aliases.
    pub fn is_right_server(&self, target: &str) -> bool {
        if self.name == target {
            return true;
        }

        match &self.aliases {
            Some(aliases) => aliases.iter().any(|alias| alias == target),
            None => false,
        }
    }
}

/// Free-function form of [`ServerRecord::is_right_server`].
pub fn is_right_server(server: &ServerRecord, target: &str) -> bool {
    server.is_right_server(target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(value: Value) -> ServerRecord {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn matches_by_name() {
        let server = ServerRecord::new("production");
        assert!(server.is_right_server("production"));
    }

    #[test]
    fn name_match_ignores_aliases() {
        let server = ServerRecord::new("production").with_aliases(["prod", "live"]);
        assert!(server.is_right_server("production"));
    }

    #[test]
    fn matches_by_alias() {
        let server = ServerRecord::new("production").with_aliases(["prod", "live"]);
        assert!(server.is_right_server("live"));
    }

    #[test]
    fn no_match_without_aliases() {
        let server = ServerRecord::new("production");
        assert!(!server.is_right_server("prod"));
    }

    #[test]
    fn alias_match_is_exact() {
        let server = ServerRecord::new("production").with_aliases(["prod"]);
        assert!(!server.is_right_server("Prod"));
        assert!(!server.is_right_server("pro"));
    }

    #[test]
    fn malformed_aliases_mean_no_aliases() {
        let server = parse(json!({ "name": "web", "aliases": "www" }));
        assert_eq!(server.aliases, None);
        assert!(!server.is_right_server("www"));

        let server = parse(json!({ "name": "web", "aliases": { "www": true } }));
        assert_eq!(server.aliases, None);

        let server = parse(json!({ "name": "web", "aliases": null }));
        assert_eq!(server.aliases, None);
    }

    #[test]
    fn non_string_alias_items_are_dropped() {
        let server = parse(json!({ "name": "web", "aliases": ["www", 7, null, "w"] }));
        assert_eq!(server.aliases, Some(vec!["www".to_string(), "w".to_string()]));
        assert!(server.is_right_server("w"));
        assert!(!server.is_right_server("7"));
    }

    #[test]
    fn deployment_fields_are_preserved() {
        let server = parse(json!({
            "name": "web",
            "host": "example.org",
            "port": 2222,
        }));
        assert_eq!(server.fields.get("host"), Some(&json!("example.org")));
        assert_eq!(server.fields.get("port"), Some(&json!(2222)));
        assert!(!server.fields.contains_key("name"));
    }

    #[test]
    fn free_function_matches_method() {
        let server = ServerRecord::new("a").with_aliases(["b"]);
        assert!(is_right_server(&server, "b"));
        assert!(!is_right_server(&server, "c"));
    }
}
