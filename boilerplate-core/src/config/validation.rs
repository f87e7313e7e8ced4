use crate::config::path::ConfigPath;
use crate::config::schema::DecodedConfig;
use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    Required,
}

impl std::fmt::Display for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Required => write!(f, "required"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldViolation {
    pub path: ConfigPath,
    pub rule: Rule,
}

/// Every rule violation found in one pass, in schema order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    violations: Vec<FieldViolation>,
}

impl ValidationErrors {
    pub fn violations(&self) -> &[FieldViolation] {
        &self.violations
    }

    pub fn paths(&self) -> Vec<ConfigPath> {
        self.violations.iter().map(|violation| violation.path).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    pub fn len(&self) -> usize {
        self.violations.len()
    }

    fn push(&mut self, path: ConfigPath, rule: Rule) {
        self.violations.push(FieldViolation { path, rule });
    }
}

impl std::fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (index, violation) in self.violations.iter().enumerate() {
            if index > 0 {
                writeln!(f)?;
            }
            write!(
                f,
                "  - '{}' failed the '{}' rule",
                violation.path, violation.rule
            )?;
        }
        Ok(())
    }
}

/// Checks every required field and reports all missing ones together.
pub fn validate_config(config: &DecodedConfig) -> Result<()> {
    let errors = collect_violations(config);
    if errors.is_empty() {
        Ok(())
    } else {
        Err(Error::Validation(errors))
    }
}

pub fn collect_violations(config: &DecodedConfig) -> ValidationErrors {
    let mut errors = ValidationErrors::default();
    for path in ConfigPath::ALL.into_iter().filter(ConfigPath::is_required) {
        let missing = config.field(path).map_or(true, |value| value.is_zero());
        if missing {
            errors.push(path, Rule::Required);
        }
    }
    errors
}
