//! Check every report definition in a project
//!
//! Each report is loaded and validated independently; a file that fails to
//! load is recorded as an outcome instead of aborting the whole check.
//! Project-wide rules (unique report names) run after all files are in.

pub mod report;

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use anyhow::Result;
use rayon::prelude::*;

use crate::project::{parse_rptproj, ReportProject};
use crate::report::{
    parse_report_file, validate_columns, validate_definition, IssueKind, ParamPolicy,
    ReportDefinition, ReportIssue, SqlDialect,
};

/// Minimum number of files to benefit from parallel processing.
/// Below this threshold, sequential processing is faster due to rayon overhead.
const PARALLEL_THRESHOLD: usize = 8;

/// Result of checking one report file
#[derive(Debug, Clone)]
pub struct ReportOutcome {
    pub path: PathBuf,
    /// The parsed definition, if the file could be loaded
    pub report: Option<ReportDefinition>,
    /// Why the file could not be loaded
    pub load_error: Option<String>,
    pub issues: Vec<ReportIssue>,
}

impl ReportOutcome {
    pub fn is_ok(&self) -> bool {
        self.load_error.is_none() && !self.issues.iter().any(ReportIssue::is_error)
    }

    pub fn error_count(&self) -> usize {
        usize::from(self.load_error.is_some())
            + self.issues.iter().filter(|i| i.is_error()).count()
    }

    pub fn warning_count(&self) -> usize {
        self.issues.iter().filter(|i| !i.is_error()).count()
    }
}

/// Result of checking a whole project
#[derive(Debug, Clone)]
pub struct CheckResult {
    pub project_name: String,
    pub policy: ParamPolicy,
    pub outcomes: Vec<ReportOutcome>,
}

impl CheckResult {
    pub fn error_count(&self) -> usize {
        self.outcomes.iter().map(ReportOutcome::error_count).sum()
    }

    pub fn warning_count(&self) -> usize {
        self.outcomes.iter().map(ReportOutcome::warning_count).sum()
    }

    pub fn is_ok(&self) -> bool {
        self.error_count() == 0
    }
}

/// Check every report in the project at `project_path`.
///
/// `policy` overrides the manifest's `ParamPolicy` when given.
pub fn check_project(project_path: &Path, policy: Option<ParamPolicy>) -> Result<CheckResult> {
    let project = parse_rptproj(project_path)?;
    let policy = policy.unwrap_or(project.param_policy);

    tracing::info!(
        project = %project.name,
        reports = project.report_files.len(),
        ?policy,
        dialect = ?project.dialect,
        "checking report project"
    );

    Ok(check_loaded_project(&project, policy))
}

/// Check an already parsed project
pub fn check_loaded_project(project: &ReportProject, policy: ParamPolicy) -> CheckResult {
    let files = &project.report_files;
    let dialect = project.dialect;

    let mut outcomes: Vec<ReportOutcome> = if files.len() >= PARALLEL_THRESHOLD {
        files
            .par_iter()
            .map(|f| check_report_file(f, policy, dialect))
            .collect()
    } else {
        files
            .iter()
            .map(|f| check_report_file(f, policy, dialect))
            .collect()
    };

    flag_duplicate_names(&mut outcomes);

    CheckResult {
        project_name: project.name.clone(),
        policy,
        outcomes,
    }
}

/// Load and validate a single report file. `dialect` is used to compare
/// declared columns with the query's projection.
pub fn check_report_file(path: &Path, policy: ParamPolicy, dialect: SqlDialect) -> ReportOutcome {
    match parse_report_file(path) {
        Ok(report) => {
            let mut issues = validate_definition(&report, policy);
            issues.extend(validate_columns(&report, dialect));
            if !issues.is_empty() {
                tracing::debug!(report = %report.name, issues = issues.len(), "report has issues");
            }
            ReportOutcome {
                path: path.to_path_buf(),
                report: Some(report),
                load_error: None,
                issues,
            }
        }
        Err(err) => {
            tracing::warn!(path = %path.display(), error = %err, "failed to load report");
            ReportOutcome {
                path: path.to_path_buf(),
                report: None,
                load_error: Some(format!("{:#}", err)),
                issues: Vec::new(),
            }
        }
    }
}

/// Report names must be unique (case-insensitive); every later use is an error
fn flag_duplicate_names(outcomes: &mut [ReportOutcome]) {
    let mut seen = HashSet::new();
    for outcome in outcomes.iter_mut() {
        let Some(report) = &outcome.report else {
            continue;
        };
        let key = report.name.trim().to_lowercase();
        if !key.is_empty() && !seen.insert(key) {
            let name = report.name.clone();
            outcome
                .issues
                .push(ReportIssue::error(IssueKind::DuplicateReportName(name)));
        }
    }
}
