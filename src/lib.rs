//! sqlreport: parameterized SQL report definitions
//!
//! This library finds the `:name` placeholders a report's SQL refers to,
//! checks them against the report's declared parameters, and applies the
//! same checks across whole report projects.

pub mod check;
pub mod error;
pub mod logging;
pub mod params;
pub mod project;
pub mod report;
pub mod util;

use std::path::PathBuf;

use anyhow::Result;

pub use check::CheckResult;
pub use error::SqlReportError;
pub use params::{extract_params, is_params_match, validate_params, ParamValidation};
pub use report::ParamPolicy;

/// Options for checking a report project
#[derive(Debug, Clone)]
pub struct CheckOptions {
    /// Path to the .rptproj file
    pub project_path: PathBuf,
    /// Overrides the project's parameter policy
    pub policy: Option<ParamPolicy>,
    /// Enable verbose output
    pub verbose: bool,
}

/// Check every report in a project
pub fn check_reports(options: CheckOptions) -> Result<CheckResult> {
    let result = check::check_project(&options.project_path, options.policy)?;

    if options.verbose {
        for outcome in &result.outcomes {
            tracing::info!(
                path = %outcome.path.display(),
                errors = outcome.error_count(),
                warnings = outcome.warning_count(),
                "checked report"
            );
        }
    }

    tracing::info!(
        reports = result.outcomes.len(),
        errors = result.error_count(),
        warnings = result.warning_count(),
        "check finished"
    );

    Ok(result)
}
