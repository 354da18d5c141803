//! Minimal evaluation of metadata condition strings.
//!
//! Two predicates cover the overwhelming majority of conditions in real
//! lists: `file("Name.esp")` (the file exists under the game's data
//! directory) and `active("Name.esp")` (the plugin is in the loaded load
//! order). Either may be negated with a leading `not `.

use std::path::Path;

use crate::error::{Error, Result};

/// State a condition is evaluated against.
pub(crate) struct ConditionContext<'a> {
    pub data_path: &'a Path,
    pub active_plugins: &'a [String],
}

/// Evaluate a condition string. Empty conditions are vacuously true.
pub(crate) fn evaluate_condition(condition: &str, ctx: &ConditionContext<'_>) -> Result<bool> {
    let trimmed = condition.trim();
    if trimmed.is_empty() {
        return Ok(true);
    }

    let (negated, body) = match trimmed.strip_prefix("not ") {
        Some(rest) => (true, rest.trim()),
        None => (false, trimmed),
    };

    let value = if let Some(name) = function_arg(body, "file") {
        ctx.data_path.join(name).exists()
    } else if let Some(name) = function_arg(body, "active") {
        ctx.active_plugins.iter().any(|p| p.eq_ignore_ascii_case(name))
    } else {
        return Err(Error::Parse(format!("unsupported condition `{trimmed}`")));
    };

    Ok(value != negated)
}

/// Extract the quoted argument of `name("...")`, if `body` has that shape.
fn function_arg<'a>(body: &'a str, name: &str) -> Option<&'a str> {
    body.strip_prefix(name)?
        .strip_prefix("(\"")?
        .strip_suffix("\")")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn active() -> Vec<String> {
        vec!["Skyrim.esm".to_string(), "Update.esm".to_string()]
    }

    #[test]
    fn empty_condition_is_true() {
        let dir = tempdir().unwrap();
        let active = active();
        let ctx = ConditionContext {
            data_path: dir.path(),
            active_plugins: &active,
        };
        assert!(evaluate_condition("", &ctx).unwrap());
        assert!(evaluate_condition("   ", &ctx).unwrap());
    }

    #[test]
    fn file_predicate_checks_data_directory() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("Present.esp"), b"").unwrap();
        let active = active();
        let ctx = ConditionContext {
            data_path: dir.path(),
            active_plugins: &active,
        };

        assert!(evaluate_condition(r#"file("Present.esp")"#, &ctx).unwrap());
        assert!(!evaluate_condition(r#"file("Absent.esp")"#, &ctx).unwrap());
        assert!(evaluate_condition(r#"not file("Absent.esp")"#, &ctx).unwrap());
    }

    #[test]
    fn active_predicate_is_case_insensitive() {
        let dir = tempdir().unwrap();
        let active = active();
        let ctx = ConditionContext {
            data_path: dir.path(),
            active_plugins: &active,
        };

        assert!(evaluate_condition(r#"active("skyrim.esm")"#, &ctx).unwrap());
        assert!(!evaluate_condition(r#"active("Dawnguard.esm")"#, &ctx).unwrap());
    }

    #[test]
    fn unsupported_condition_is_a_parse_error() {
        let dir = tempdir().unwrap();
        let active = active();
        let ctx = ConditionContext {
            data_path: dir.path(),
            active_plugins: &active,
        };

        let err = evaluate_condition(r#"checksum("Foo.esp", DEADBEEF)"#, &ctx).unwrap_err();
        assert!(matches!(err, Error::Parse(_)));
    }
}
