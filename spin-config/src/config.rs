//! The persisted config document.
//!
//! `Config` models `~/.spin/config`: a YAML mapping of named sections. Only
//! `auth` is typed; all other top-level sections are preserved verbatim.
//!
//! The text is parsed into a `serde_yaml_ng::Value` first and the typed parts
//! are pulled out by hand, so unknown keys keep their YAML type (`1: x` stays
//! an integer key) and tagged values such as `!custom 1` survive.

use crate::auth::{AuthConfig, kind};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_yaml_ng::{Mapping, Value};

const AUTH_KEY: &str = "auth";

/// Full client configuration document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Config {
    /// Authentication settings, if any have been configured.
    pub auth: Option<AuthConfig>,

    /// Top-level sections this crate does not interpret.
    pub extra: Mapping,
}

impl Config {
    /// Parse a config document from (already expanded) YAML text.
    ///
    /// Parsing is strict: the top level must be a mapping, `auth` must be a
    /// mapping, `auth.cookie` must be a string, and duplicate keys are
    /// rejected. Unknown keys are kept rather than rejected. A document with
    /// no content (empty, comments only, or an explicit null) yields an empty
    /// config.
    pub fn from_yaml(text: &str) -> Result<Self, serde_yaml_ng::Error> {
        if !has_content(text) {
            return Ok(Self::default());
        }
        let value: Value = serde_yaml_ng::from_str(text)?;
        Self::from_value(value).map_err(serde_yaml_ng::Error::custom)
    }

    /// Encode the whole document as YAML.
    pub fn to_yaml(&self) -> Result<String, serde_yaml_ng::Error> {
        serde_yaml_ng::to_string(&self.to_value())
    }

    /// Build from a parsed YAML value, checking the shape of `auth`.
    pub fn from_value(value: Value) -> Result<Self, String> {
        let mapping = match value {
            Value::Null => return Ok(Self::default()),
            Value::Mapping(mapping) => mapping,
            other => {
                return Err(format!(
                    "invalid config document: expected a mapping, found {}",
                    kind(&other)
                ));
            }
        };

        let mut config = Config::default();
        for (key, value) in mapping {
            if key.as_str() != Some(AUTH_KEY) {
                config.extra.insert(key, value);
                continue;
            }
            config.auth = match value {
                Value::Null => None,
                Value::Mapping(auth) => Some(AuthConfig::from_mapping(auth)?),
                other => {
                    return Err(format!(
                        "invalid type for `auth`: expected a mapping, found {}",
                        kind(&other)
                    ));
                }
            };
        }
        Ok(config)
    }

    /// The document as a YAML value, `auth` first.
    pub fn to_value(&self) -> Value {
        let mut mapping = Mapping::new();
        if let Some(auth) = &self.auth {
            mapping.insert(AUTH_KEY.into(), Value::Mapping(auth.to_mapping()));
        }
        for (key, value) in &self.extra {
            mapping.insert(key.clone(), value.clone());
        }
        Value::Mapping(mapping)
    }

    /// Set `auth.cookie`, creating the `auth` section when it is missing.
    ///
    /// No other field is touched.
    pub fn set_cookie(&mut self, cookie: &str) {
        self.auth.get_or_insert_with(AuthConfig::default).cookie = Some(cookie.to_string());
    }

    /// The configured session cookie, if any.
    pub fn cookie(&self) -> Option<&str> {
        self.auth.as_ref().and_then(|auth| auth.cookie.as_deref())
    }
}

impl Serialize for Config {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_value().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Config {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Config::from_value(value).map_err(D::Error::custom)
    }
}

/// Whether `text` holds anything besides whitespace, comments and document
/// markers.
fn has_content(text: &str) -> bool {
    text.lines().any(|line| {
        let line = line.trim();
        !(line.is_empty() || line.starts_with('#') || line == "---" || line == "...")
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_yaml_ng::Value;

    #[test]
    fn test_empty_documents_parse_as_default() {
        for text in ["", "   \n\n", "# just a comment\n", "---\n", "~\n", "null"] {
            let config = Config::from_yaml(text).expect("empty document should parse");
            assert_eq!(config, Config::default(), "input: {text:?}");
        }
    }

    #[test]
    fn test_unknown_sections_round_trip() {
        let yaml = r#"
gate:
  endpoint: https://gate.example.com:8084
  retryTimeout: 200
foo:
  bar: 1
  list: [a, b]
"#;
        let config = Config::from_yaml(yaml).unwrap();
        assert!(config.auth.is_none());

        let reparsed = Config::from_yaml(&config.to_yaml().unwrap()).unwrap();
        assert_eq!(reparsed, config);
        let foo = reparsed.extra.get("foo").expect("foo section");
        assert_eq!(foo["bar"], Value::Number(1.into()), "numbers must keep their type");
        let gate = reparsed.extra.get("gate").expect("gate section");
        assert_eq!(gate["endpoint"].as_str(), Some("https://gate.example.com:8084"));
    }

    #[test]
    fn test_set_cookie_creates_auth_section() {
        let mut config = Config::default();
        config.set_cookie("SESSION=abc");
        assert_eq!(config.cookie(), Some("SESSION=abc"));
        assert_eq!(config.to_yaml().unwrap(), "auth:\n  cookie: SESSION=abc\n");
    }

    #[test]
    fn test_set_cookie_keeps_other_auth_fields() {
        let yaml = r#"
auth:
  enabled: true
  cookie: OLD
  basic:
    username: user
    password: pass
"#;
        let mut config = Config::from_yaml(yaml).unwrap();
        config.set_cookie("NEW");

        let auth = config.auth.as_ref().unwrap();
        assert_eq!(auth.cookie.as_deref(), Some("NEW"));
        assert_eq!(auth.extra.get("enabled"), Some(&Value::Bool(true)));
        assert_eq!(auth.extra.get("basic").unwrap()["username"].as_str(), Some("user"));
    }

    #[test]
    fn test_null_auth_section_is_treated_as_missing() {
        let mut config = Config::from_yaml("auth:\nfoo: 1\n").unwrap();
        assert!(config.auth.is_none());
        config.set_cookie("C");
        assert_eq!(config.cookie(), Some("C"));
        assert_eq!(config.extra.get("foo"), Some(&Value::Number(1.into())));
    }

    #[test]
    fn test_cookie_with_dollar_is_stored_literally() {
        let mut config = Config::default();
        config.set_cookie("SESSION=$NOT_A_VAR");
        let reparsed = Config::from_yaml(&config.to_yaml().unwrap()).unwrap();
        assert_eq!(reparsed.cookie(), Some("SESSION=$NOT_A_VAR"));
    }

    #[test]
    fn test_numeric_looking_cookie_survives_round_trip() {
        let mut config = Config::default();
        config.set_cookie("12345");
        let reparsed = Config::from_yaml(&config.to_yaml().unwrap()).unwrap();
        assert_eq!(reparsed.cookie(), Some("12345"));
    }

    #[test]
    fn test_non_string_keys_keep_their_type() {
        for text in ["1: x\n", "true: x\n", "auth:\n  cookie: c\n  2: y\n"] {
            let config = Config::from_yaml(text).unwrap();
            assert_eq!(config.to_yaml().unwrap(), text, "input: {text:?}");
        }

        let config = Config::from_yaml("auth:\n  cookie: c\n  2: y\n").unwrap();
        let auth = config.auth.unwrap();
        assert_eq!(auth.extra.get(Value::Number(2.into())), Some(&Value::String("y".into())));
    }

    #[test]
    fn test_tagged_values_round_trip() {
        let text = "foo: !custom 1\n";
        let mut config = Config::from_yaml(text).unwrap();
        assert_eq!(config.to_yaml().unwrap(), text);

        config.set_cookie("SESSION=abc");
        let reparsed = Config::from_yaml(&config.to_yaml().unwrap()).unwrap();
        assert_eq!(reparsed.extra, config.extra);
        assert!(matches!(reparsed.extra.get("foo"), Some(Value::Tagged(_))));
    }

    #[test]
    fn test_serde_impls_match_yaml_helpers() {
        let text = "auth:\n  cookie: c\n  other: X\nfoo:\n  bar: 1\n";
        let config: Config = serde_yaml_ng::from_str(text).unwrap();
        assert_eq!(config, Config::from_yaml(text).unwrap());
        assert_eq!(serde_yaml_ng::to_string(&config).unwrap(), text);
    }

    #[test]
    fn test_strict_parsing_rejects_malformed_documents() {
        let bad = [
            "auth: [unclosed",
            "just a scalar",
            "- a\n- b\n",
            "auth: 5\n",
            "auth:\n  cookie: [1, 2]\n",
            "auth:\n  cookie: 123\n",
            "auth:\n  cookie: c\n  cookie: d\n",
            "foo: 1\nfoo: 2\n",
        ];
        for text in bad {
            assert!(
                Config::from_yaml(text).is_err(),
                "expected parse failure for {text:?}"
            );
        }
    }
}
