//! Acceptance policy for report definitions
//!
//! Whether a parameter mismatch rejects a report is decided here, not by the
//! parameter engine. Structural problems are always errors.

use std::collections::HashSet;
use std::fmt;

use super::columns::{suggest_columns, SqlDialect};
use super::definition::ReportDefinition;
use crate::params::validate_params;

/// How parameter mismatches are reported
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParamPolicy {
    /// Missing or extra parameters are errors
    #[default]
    Strict,
    /// Missing or extra parameters are warnings
    Warn,
}

impl std::str::FromStr for ParamPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "strict" | "error" => Ok(ParamPolicy::Strict),
            "warn" | "warning" => Ok(ParamPolicy::Warn),
            _ => Err(format!("Unknown parameter policy: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Warning => f.write_str("warning"),
            Severity::Error => f.write_str("error"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IssueKind {
    EmptyName,
    EmptySql,
    /// Referenced by the SQL, not declared
    MissingParam(String),
    /// Declared, not referenced by the SQL
    ExtraParam(String),
    DuplicateParam(String),
    DuplicateColumn(String),
    /// Another report in the same project already uses this name
    DuplicateReportName(String),
    /// Declared column the query's projection does not produce
    UnknownColumn(String),
}

impl fmt::Display for IssueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IssueKind::EmptyName => write!(f, "report name is empty"),
            IssueKind::EmptySql => write!(f, "report SQL is empty"),
            IssueKind::MissingParam(name) => {
                write!(f, "parameter :{} is used in SQL but not declared", name)
            }
            IssueKind::ExtraParam(name) => {
                write!(f, "parameter {} is declared but not used in SQL", name)
            }
            IssueKind::DuplicateParam(name) => write!(f, "parameter {} is declared twice", name),
            IssueKind::DuplicateColumn(name) => write!(f, "column {} is declared twice", name),
            IssueKind::DuplicateReportName(name) => {
                write!(f, "report name '{}' is already used", name)
            }
            IssueKind::UnknownColumn(name) => {
                write!(f, "column {} is not produced by the query", name)
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportIssue {
    pub severity: Severity,
    pub kind: IssueKind,
}

impl ReportIssue {
    pub fn error(kind: IssueKind) -> Self {
        Self {
            severity: Severity::Error,
            kind,
        }
    }

    pub fn warning(kind: IssueKind) -> Self {
        Self {
            severity: Severity::Warning,
            kind,
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl fmt::Display for ReportIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.severity, self.kind)
    }
}

/// Check a definition and list everything wrong with it
pub fn validate_definition(report: &ReportDefinition, policy: ParamPolicy) -> Vec<ReportIssue> {
    let mut issues = Vec::new();

    if report.name.trim().is_empty() {
        issues.push(ReportIssue::error(IssueKind::EmptyName));
    }
    if report.sql.trim().is_empty() {
        issues.push(ReportIssue::error(IssueKind::EmptySql));
    }

    let mut seen = HashSet::new();
    for param in &report.params {
        if !seen.insert(param.name.as_str()) {
            issues.push(ReportIssue::error(IssueKind::DuplicateParam(
                param.name.clone(),
            )));
        }
    }

    let mut seen = HashSet::new();
    for column in &report.columns {
        if !seen.insert(column.field_name.as_str()) {
            issues.push(ReportIssue::error(IssueKind::DuplicateColumn(
                column.field_name.clone(),
            )));
        }
    }

    let mismatch_severity = match policy {
        ParamPolicy::Strict => Severity::Error,
        ParamPolicy::Warn => Severity::Warning,
    };

    let validation = validate_params(&report.sql, &report.declared_param_names());
    for name in validation.missing {
        issues.push(ReportIssue {
            severity: mismatch_severity,
            kind: IssueKind::MissingParam(name),
        });
    }
    for name in validation.extra {
        issues.push(ReportIssue {
            severity: mismatch_severity,
            kind: IssueKind::ExtraParam(name),
        });
    }

    issues
}

/// Warn about declared columns the SQL projection does not produce.
///
/// Nothing is reported when the report declares no columns, the projection
/// has wildcards, or the SQL does not parse in `dialect`.
pub fn validate_columns(report: &ReportDefinition, dialect: SqlDialect) -> Vec<ReportIssue> {
    if report.columns.is_empty() {
        return Vec::new();
    }

    let suggestion = match suggest_columns(&report.sql, dialect) {
        Ok(suggestion) => suggestion,
        Err(err) => {
            tracing::debug!(report = %report.name, ?dialect, error = %err, "skipping column check");
            return Vec::new();
        }
    };
    if suggestion.wildcards > 0 {
        return Vec::new();
    }

    let produced: HashSet<String> = suggestion
        .columns
        .iter()
        .map(|c| c.field_name.to_lowercase())
        .collect();

    report
        .columns
        .iter()
        .filter(|c| !produced.contains(&c.field_name.to_lowercase()))
        .map(|c| ReportIssue::warning(IssueKind::UnknownColumn(c.field_name.clone())))
        .collect()
}
