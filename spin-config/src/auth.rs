//! The `auth` section of the config document.

use serde_yaml_ng::{Mapping, Value};

const COOKIE_KEY: &str = "cookie";

/// Authentication settings.
///
/// Only `cookie` is owned by this crate. Every other key (basic auth, OAuth2,
/// x509, ...) is carried through `extra` untouched, keys and tags included,
/// so a load/save cycle never alters settings written by other tools.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AuthConfig {
    /// Raw `Cookie` header value attached to outgoing requests.
    pub cookie: Option<String>,

    /// Auth fields this crate does not interpret.
    pub extra: Mapping,
}

impl AuthConfig {
    /// Build from the `auth` mapping. `cookie` must be a string or null.
    pub(crate) fn from_mapping(mapping: Mapping) -> Result<Self, String> {
        let mut auth = AuthConfig::default();
        for (key, value) in mapping {
            if key.as_str() != Some(COOKIE_KEY) {
                auth.extra.insert(key, value);
                continue;
            }
            auth.cookie = match value {
                Value::Null => None,
                Value::String(cookie) => Some(cookie),
                other => {
                    return Err(format!(
                        "invalid type for `auth.cookie`: expected a string, found {}",
                        kind(&other)
                    ));
                }
            };
        }
        Ok(auth)
    }

    /// The `auth` mapping, with `cookie` first when set.
    pub(crate) fn to_mapping(&self) -> Mapping {
        let mut mapping = Mapping::new();
        if let Some(cookie) = &self.cookie {
            mapping.insert(COOKIE_KEY.into(), Value::String(cookie.clone()));
        }
        for (key, value) in &self.extra {
            mapping.insert(key.clone(), value.clone());
        }
        mapping
    }

    /// Look up an auth field this crate does not own, as a string.
    pub fn extra_str(&self, key: &str) -> Option<&str> {
        self.extra.get(key).and_then(|v| v.as_str())
    }
}

/// Short name of a YAML value's type for error messages.
pub(crate) fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a sequence",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}
