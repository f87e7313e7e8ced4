use std::collections::HashSet;

use serde_json::{Map, Value};
use tracing::debug;

use crate::config::path::{ConfigPath, FieldKind};
use crate::config::raw::RawSettings;
use crate::config::schema::{DecodedConfig, REDACTED};
use crate::config::tree::set_path_value_in_object;
use crate::error::{Error, Result};

/// Maps raw settings onto the declared schema.
///
/// Only declared paths are read; anything else in `raw` is ignored. Declared
/// paths missing from `raw` keep their zero value. The first value that cannot
/// be coerced to its declared kind aborts decoding.
///
/// Derived paths are always overwritten after decoding, so a value supplied
/// for one is dropped here and never brings the observability section into
/// existence on its own.
pub fn decode(raw: &RawSettings) -> Result<DecodedConfig> {
    let mut tree = Map::new();
    let mut consumed = HashSet::new();

    for path in ConfigPath::ALL {
        let key = path.env_key();
        let Some(raw_value) = raw.get(&key) else {
            continue;
        };
        if path.is_derived() {
            debug!(path = %path, "discarding value supplied for derived field");
            consumed.insert(key);
            continue;
        }
        let value = coerce(path, raw_value)?;
        set_path_value_in_object(&mut tree, &path.segments(), value);
        consumed.insert(key);
    }

    for key in raw.keys().filter(|key| !consumed.contains(*key)) {
        debug!(key, "ignoring unrecognized configuration key");
    }

    serde_json::from_value(Value::Object(tree)).map_err(|err| Error::Shape(err.to_string()))
}

pub fn coerce(path: ConfigPath, raw_value: &str) -> Result<Value> {
    match path.kind() {
        FieldKind::String => Ok(Value::String(raw_value.to_owned())),
        FieldKind::Integer { max } => {
            let parsed = raw_value
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|value| *value <= max)
                .ok_or_else(|| decode_error(path, raw_value))?;
            Ok(Value::from(parsed))
        }
        FieldKind::Bool => parse_bool(raw_value)
            .map(Value::Bool)
            .ok_or_else(|| decode_error(path, raw_value)),
        FieldKind::StringList => Ok(Value::Array(
            split_list(raw_value).into_iter().map(Value::String).collect(),
        )),
    }
}

/// Comma-delimited tokens, trimmed, with empty tokens dropped.
pub fn split_list(raw_value: &str) -> Vec<String> {
    raw_value
        .split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_owned)
        .collect()
}

fn parse_bool(raw_value: &str) -> Option<bool> {
    match raw_value.trim().to_ascii_lowercase().as_str() {
        "1" | "t" | "true" => Some(true),
        "0" | "f" | "false" => Some(false),
        _ => None,
    }
}

fn decode_error(path: ConfigPath, raw_value: &str) -> Error {
    let value = if path.is_secret() {
        REDACTED.to_owned()
    } else {
        raw_value.to_owned()
    };
    Error::Decode {
        path,
        value,
        expected: path.kind().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::{coerce, decode, split_list};
    use crate::config::path::ConfigPath;
    use crate::config::raw::RawSettings;
    use crate::error::Error;

    fn raw(pairs: &[(&str, &str)]) -> RawSettings {
        pairs
            .iter()
            .map(|(key, value)| ((*key).to_owned(), (*value).to_owned()))
            .collect()
    }

    #[test]
    fn coerces_declared_kinds() {
        let decoded = decode(&raw(&[
            ("server.port", "8080"),
            ("server.read.timeout", " 15 "),
            ("server.cors.allowed.origins", "https://a,https://b"),
            ("database.port", "5432"),
            ("database.max.open.conns", "25"),
            ("observability.health.checks.enabled", "FALSE"),
        ]))
        .expect("decode should succeed");

        assert_eq!(decoded.server.port, "8080");
        assert_eq!(decoded.server.read_timeout_secs, 15);
        assert_eq!(
            decoded.server.cors_allowed_origins,
            vec!["https://a".to_owned(), "https://b".to_owned()]
        );
        assert_eq!(decoded.database.port, 5432);
        assert_eq!(decoded.database.max_open_conns, 25);
        let observability = decoded.observability.expect("observability should be present");
        assert!(!observability.health_checks.enabled);
    }

    #[test]
    fn missing_fields_stay_zero_and_unknown_keys_are_ignored() {
        let decoded = decode(&raw(&[("primary.env", "local"), ("server.shoe.size", "44")]))
            .expect("decode should succeed");

        assert_eq!(decoded.primary.env, "local");
        assert_eq!(decoded.server.read_timeout_secs, 0);
        assert!(decoded.server.cors_allowed_origins.is_empty());
        assert!(decoded.observability.is_none());
    }

    #[test]
    fn partial_observability_section_starts_from_zero_values() {
        let decoded = decode(&raw(&[("observability.logging.level", "debug")]))
            .expect("decode should succeed");

        let observability = decoded.observability.expect("observability should be present");
        assert_eq!(observability.logging.level, "debug");
        assert_eq!(observability.logging.format, "");
        assert_eq!(observability.health_checks.interval_secs, 0);
    }

    #[test]
    fn rejects_non_numeric_integer() {
        let error = decode(&raw(&[("server.read.timeout", "abc")]))
            .expect_err("decode should fail");
        assert!(matches!(
            error,
            Error::Decode {
                path: ConfigPath::ServerReadTimeout,
                ref value,
                ..
            } if value == "abc"
        ));
    }

    #[test]
    fn rejects_out_of_range_and_negative_integers() {
        let error = decode(&raw(&[("database.port", "70000")])).expect_err("port too large");
        assert!(error.to_string().contains("database.port"));

        let error = decode(&raw(&[("database.max.idle.conns", "-1")])).expect_err("negative");
        assert!(matches!(
            error,
            Error::Decode {
                path: ConfigPath::DatabaseMaxIdleConns,
                ..
            }
        ));
    }

    #[test]
    fn rejects_unparseable_bool() {
        let error = decode(&raw(&[("observability.new.relic.debug.logging", "maybe")]))
            .expect_err("decode should fail");
        assert!(error.to_string().contains("expected bool"));
    }

    #[test]
    fn bool_accepts_each_documented_spelling() {
        let path = ConfigPath::ObservabilityNewRelicDebugLogging;
        for spelling in ["1", "t", "T", "true", "TRUE", "True", " true "] {
            let value = coerce(path, spelling).expect("truthy spelling should parse");
            assert_eq!(value, serde_json::Value::Bool(true), "spelling {spelling:?}");
        }
        for spelling in ["0", "f", "F", "false", "FALSE", "False"] {
            let value = coerce(path, spelling).expect("falsy spelling should parse");
            assert_eq!(value, serde_json::Value::Bool(false), "spelling {spelling:?}");
        }
        for spelling in ["yes", "no", "on", "off", ""] {
            let error = coerce(path, spelling).expect_err("spelling should be rejected");
            assert!(matches!(error, Error::Decode { .. }), "spelling {spelling:?}");
        }
    }

    #[test]
    fn integer_ranges_follow_field_width() {
        assert_eq!(
            coerce(ConfigPath::DatabasePort, "65535").expect("max port"),
            serde_json::Value::from(65_535_u64)
        );
        assert!(coerce(ConfigPath::DatabasePort, "65536").is_err());
        assert_eq!(
            coerce(ConfigPath::DatabaseMaxOpenConns, "4294967295").expect("max u32"),
            serde_json::Value::from(4_294_967_295_u64)
        );
        assert!(coerce(ConfigPath::DatabaseMaxOpenConns, "4294967296").is_err());
        assert_eq!(
            coerce(ConfigPath::ServerIdleTimeout, "18446744073709551615").expect("max u64"),
            serde_json::Value::from(u64::MAX)
        );
        assert!(coerce(ConfigPath::ServerIdleTimeout, "+5").is_ok());
        assert!(coerce(ConfigPath::ServerIdleTimeout, "1_000").is_err());
    }

    #[test]
    fn derived_keys_alone_leave_observability_absent() {
        let decoded = decode(&raw(&[
            ("observability.service.name", "operator"),
            ("observability.environment", "operator-env"),
        ]))
        .expect("decode should succeed");
        assert!(decoded.observability.is_none());

        let decoded = decode(&raw(&[
            ("observability.service.name", "operator"),
            ("observability.logging.format", "json"),
        ]))
        .expect("decode should succeed");
        let observability = decoded.observability.expect("observability should be present");
        assert_eq!(observability.service_name, "");
        assert_eq!(observability.logging.format, "json");
    }

    #[test]
    fn list_splitting_trims_and_drops_empty_tokens() {
        assert_eq!(split_list("https://a"), vec!["https://a".to_owned()]);
        assert_eq!(
            split_list(" https://a , https://b ,"),
            vec!["https://a".to_owned(), "https://b".to_owned()]
        );
        assert!(split_list("").is_empty());
    }
}
