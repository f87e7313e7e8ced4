use tracing::trace;

use crate::config::raw::RawSettings;
use crate::error::{Error, Result};

pub const DEFAULT_ENV_PREFIX: &str = "BOILERPLATE_";

/// Builds raw settings from every variable whose name starts with `prefix`.
///
/// `BOILERPLATE_FOO_BAR` becomes `foo.bar`: the prefix is stripped, the rest
/// lowercased, and every underscore turned into a path separator. Variables
/// without the prefix are dropped.
pub fn scan<I>(vars: I, prefix: &str) -> RawSettings
where
    I: IntoIterator<Item = (String, String)>,
{
    let mut raw = RawSettings::new();
    for (name, value) in vars {
        let Some(key) = normalize_key(&name, prefix) else {
            continue;
        };
        trace!(variable = %name, key = %key, "scanned environment variable");
        raw.insert(key, value);
    }
    raw
}

pub fn normalize_key(name: &str, prefix: &str) -> Option<String> {
    let rest = name.strip_prefix(prefix)?;
    if rest.is_empty() {
        return None;
    }
    Some(rest.to_lowercase().replace('_', "."))
}

/// Snapshots the prefixed part of the process environment.
///
/// A prefixed variable whose name or value is not valid unicode fails the
/// load. Other variables are never inspected beyond their name.
pub fn process_env(prefix: &str) -> Result<Vec<(String, String)>> {
    let mut vars = Vec::new();
    for (name, value) in std::env::vars_os() {
        let lossy = name.to_string_lossy();
        if !lossy.starts_with(prefix) {
            continue;
        }
        let Some(utf8_name) = name.to_str() else {
            return Err(Error::EnvLoad(format!(
                "environment variable name '{lossy}' is not valid unicode"
            )));
        };
        let value = value.into_string().map_err(|_| {
            Error::EnvLoad(format!("environment variable '{utf8_name}' is not valid unicode"))
        })?;
        vars.push((utf8_name.to_owned(), value));
    }
    Ok(vars)
}

#[cfg(test)]
mod tests {
    use super::{normalize_key, scan, DEFAULT_ENV_PREFIX};

    fn vars(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(name, value)| ((*name).to_owned(), (*value).to_owned()))
            .collect()
    }

    #[test]
    fn strips_prefix_and_nests_on_underscores() {
        assert_eq!(
            normalize_key("BOILERPLATE_FOO_BAR", DEFAULT_ENV_PREFIX).as_deref(),
            Some("foo.bar")
        );
        assert_eq!(
            normalize_key("BOILERPLATE_DATABASE_MAX_OPEN_CONNS", DEFAULT_ENV_PREFIX).as_deref(),
            Some("database.max.open.conns")
        );
    }

    #[test]
    fn ignores_variables_without_prefix() {
        let raw = scan(
            vars(&[
                ("BOILERPLATE_SERVER_PORT", "8080"),
                ("SERVER_PORT", "9999"),
                ("boilerplate_server_host", "lowercase prefix"),
                ("BOILERPLATE_", "bare prefix"),
                ("PATH", "/usr/bin"),
            ]),
            DEFAULT_ENV_PREFIX,
        );
        assert_eq!(raw.len(), 1);
        assert_eq!(raw.get("server.port"), Some("8080"));
    }

    #[test]
    fn keeps_values_verbatim() {
        let raw = scan(
            vars(&[("BOILERPLATE_AUTH_SECRET_KEY", "  MiXeD_Case  ")]),
            DEFAULT_ENV_PREFIX,
        );
        assert_eq!(raw.get("auth.secret.key"), Some("  MiXeD_Case  "));
    }

    #[test]
    fn honours_custom_prefix() {
        let raw = scan(
            vars(&[("APP_PRIMARY_ENV", "staging"), ("BOILERPLATE_PRIMARY_ENV", "x")]),
            "APP_",
        );
        assert_eq!(raw.get("primary.env"), Some("staging"));
        assert_eq!(raw.len(), 1);
    }
}
