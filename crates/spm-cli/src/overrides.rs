//! `HEADER=FIELD` overrides given on the command line.

use std::fmt;
use std::str::FromStr;

use spm_map::MappingStep;
use spm_model::Result;
use tracing::info;

/// One `--set HEADER=FIELD` argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    pub header: String,
    pub field: String,
}

impl FromStr for Assignment {
    type Err = String;

    /// Splits on the last `=`, so headers may themselves contain `=`.
    /// An empty field clears the mapping.
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let (header, field) = s
            .rsplit_once('=')
            .ok_or_else(|| format!("expected HEADER=FIELD, got '{s}'"))?;
        if header.is_empty() {
            return Err(format!("missing header name in '{s}'"));
        }
        Ok(Self {
            header: header.to_string(),
            field: field.trim().to_string(),
        })
    }
}

impl fmt::Display for Assignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.header, self.field)
    }
}

/// Applies every `set`, then every `reset`, in order.
pub fn apply(step: &mut MappingStep, set: &[Assignment], reset: &[String]) -> Result<()> {
    for assignment in set {
        step.set_value(&assignment.header, assignment.field.as_str())?;
        info!(header = %assignment.header, field = %assignment.field, "override applied");
    }
    for header in reset {
        step.reset(header)?;
        info!(%header, "override reset");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_assignment() {
        let parsed: Assignment = "Pay=base_salary".parse().unwrap();
        assert_eq!(parsed.header, "Pay");
        assert_eq!(parsed.field, "base_salary");
    }

    #[test]
    fn header_may_contain_equals() {
        let parsed: Assignment = "a=b=full_name".parse().unwrap();
        assert_eq!(parsed.header, "a=b");
        assert_eq!(parsed.field, "full_name");
    }

    #[test]
    fn empty_field_clears() {
        let parsed: Assignment = "Pay=".parse().unwrap();
        assert_eq!(parsed.field, "");
    }

    #[test]
    fn rejects_malformed() {
        assert!("Pay".parse::<Assignment>().is_err());
        assert!("=full_name".parse::<Assignment>().is_err());
    }
}
