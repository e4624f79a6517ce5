//! Environment variable expansion for config file processing.
//!
//! Expansion is applied to the raw YAML text of an existing config file
//! before it is parsed, so every string value in the document can reference
//! the environment. Values written by this crate are never expanded.

use regex::{Captures, Regex};
use std::collections::HashMap;
use std::hash::BuildHasher;
use std::sync::LazyLock;

/// Shell-style reference pattern.
///
/// Alternatives, in match priority order:
/// 1. `${NAME}` where NAME is anything up to the closing brace
/// 2. a lone `${` with no closing brace (invalid, dropped)
/// 3. `$NAME` with NAME = `[A-Za-z_][A-Za-z0-9_]*`
/// 4. `$` followed by a single special character or digit
static ENV_REF_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$(?:\{([^}]*)\}|(\{)|([A-Za-z_][A-Za-z0-9_]*)|([*#$@!?0-9-]))")
        .expect("env-var expansion regex is a compile-time constant and must be valid")
});

/// Source of variable values used during expansion.
pub trait Environment {
    /// Look up a variable, returning `None` when it is not defined.
    fn var(&self, name: &str) -> Option<String>;
}

/// Reads variables from the current process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl Environment for ProcessEnv {
    fn var(&self, name: &str) -> Option<String> {
        if name.is_empty() || name.contains(['=', '\0']) {
            return None;
        }
        std::env::var(name).ok()
    }
}

impl<S: BuildHasher> Environment for HashMap<String, String, S> {
    fn var(&self, name: &str) -> Option<String> {
        self.get(name).cloned()
    }
}

impl<E: Environment + ?Sized> Environment for &E {
    fn var(&self, name: &str) -> Option<String> {
        (**self).var(name)
    }
}

/// Expand `$VAR` and `${VAR}` references using `env`.
///
/// - `${NAME}` and `$NAME` are replaced by the variable's value.
/// - Undefined variables expand to the empty string.
/// - `$` followed by one of `*#$@!?-` or a digit names a one-character
///   variable (usually undefined, so it expands to nothing).
/// - `${}` and an unterminated `${` are invalid and are removed.
/// - Any other `$` (end of input, `$ `, `$%`, ...) is kept as-is.
pub fn expand_env_with<E: Environment + ?Sized>(input: &str, env: &E) -> String {
    ENV_REF_PATTERN
        .replace_all(input, |caps: &Captures| {
            let name = caps
                .get(1)
                .or_else(|| caps.get(3))
                .or_else(|| caps.get(4))
                .map(|m| m.as_str());

            match name {
                Some("") | None => String::new(),
                Some(name) => match env.var(name) {
                    Some(value) => value,
                    None => {
                        log::debug!("Config references undefined variable ${name}, expanding to empty");
                        String::new()
                    }
                },
            }
        })
        .into_owned()
}
