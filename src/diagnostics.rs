//! Findings produced by the dependency validator

use std::fmt;

use serde::Serialize;

/// How serious a finding is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Incomplete declaration that could not be checked
    Warning,
    /// Declared version differs from the latest known version
    Violation,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Warning => "warning",
            Severity::Violation => "violation",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A finding at a specific source line
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub severity: Severity,
    /// Line of the declaration node (1-indexed)
    pub line: u32,
    pub message: String,
    /// Short rendering of the offending declaration
    pub code_fragment: String,
    pub explanation: String,
}

impl Diagnostic {
    pub fn is_violation(&self) -> bool {
        self.severity == Severity::Violation
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_serializes_lowercase() {
        let diag = Diagnostic {
            severity: Severity::Violation,
            line: 12,
            message: "m".to_string(),
            code_fragment: "dependency::g::a::1.0".to_string(),
            explanation: "last version is: 2.0".to_string(),
        };
        let json = serde_json::to_value(&diag).unwrap();
        assert_eq!(json["severity"], "violation");
        assert_eq!(json["line"], 12);
        assert_eq!(json["code_fragment"], "dependency::g::a::1.0");
        assert!(diag.is_violation());
    }

    #[test]
    fn test_severity_display() {
        assert_eq!(Severity::Warning.to_string(), "warning");
        assert_eq!(Severity::Violation.to_string(), "violation");
    }
}
