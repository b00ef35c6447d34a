//! Parser for .rptproj files

use std::path::{Path, PathBuf};

use anyhow::Result;
use roxmltree::Document;

use crate::error::SqlReportError;
use crate::report::{ParamPolicy, SqlDialect};

/// Suffix of report definition files picked up by default
pub const REPORT_FILE_SUFFIX: &str = ".report.xml";

/// Parsed report project
#[derive(Debug, Clone)]
pub struct ReportProject {
    /// Project name (manifest file stem)
    pub name: String,
    /// Project directory
    pub project_dir: PathBuf,
    /// Report definition files, sorted
    pub report_files: Vec<PathBuf>,
    /// How parameter mismatches are treated
    pub param_policy: ParamPolicy,
    /// Dialect used for column suggestions
    pub dialect: SqlDialect,
}

/// Parse a .rptproj file
pub fn parse_rptproj(path: &Path) -> Result<ReportProject> {
    let content = std::fs::read_to_string(path).map_err(|e| SqlReportError::ProjectReadError {
        path: path.to_path_buf(),
        source: e,
    })?;

    let doc = Document::parse(&content).map_err(|e| SqlReportError::ProjectParseError {
        path: path.to_path_buf(),
        source: e,
    })?;

    let root = doc.root_element();
    if root.tag_name().name() != "ReportProject" {
        return Err(SqlReportError::InvalidProjectFormat {
            message: format!(
                "expected <ReportProject> root element, found <{}>",
                root.tag_name().name()
            ),
        }
        .into());
    }

    let project_dir = project_dir_of(path);

    let project_name = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("Reports")
        .to_string();

    let param_policy = match find_property_value(&root, "ParamPolicy") {
        Some(value) => value
            .trim()
            .parse::<ParamPolicy>()
            .map_err(|message| SqlReportError::InvalidProjectFormat { message })?,
        None => ParamPolicy::default(),
    };

    let dialect = match find_property_value(&root, "Dialect") {
        Some(value) => value
            .trim()
            .parse::<SqlDialect>()
            .map_err(|message| SqlReportError::InvalidProjectFormat { message })?,
        None => SqlDialect::default(),
    };

    let report_files = find_report_files(&root, &project_dir)?;

    Ok(ReportProject {
        name: project_name,
        project_dir,
        report_files,
        param_policy,
        dialect,
    })
}

/// Directory holding the manifest; `.` for a bare file name
fn project_dir_of(path: &Path) -> PathBuf {
    match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

fn find_property_value(root: &roxmltree::Node, property_name: &str) -> Option<String> {
    for node in root.descendants() {
        if node.tag_name().name() == property_name {
            return node.text().map(|s| s.to_string());
        }
    }
    None
}

fn is_report_file(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .map_or(false, |n| n.to_lowercase().ends_with(REPORT_FILE_SUFFIX))
}

fn find_report_files(root: &roxmltree::Node, project_dir: &Path) -> Result<Vec<PathBuf>> {
    let mut report_files = Vec::new();
    let mut include_patterns: Vec<String> = Vec::new();
    let mut exclude_patterns: Vec<String> = Vec::new();

    // Collect Report Include and Remove patterns
    for node in root.descendants() {
        if node.tag_name().name() == "Report" {
            if let Some(include) = node.attribute("Include") {
                include_patterns.push(include.replace('\\', "/"));
            }
            if let Some(remove) = node.attribute("Remove") {
                exclude_patterns.push(remove.replace('\\', "/"));
            }
        }
    }

    for pattern in &include_patterns {
        if pattern.contains('*') {
            let glob_pattern = project_dir.join(pattern);
            let glob_str = glob_pattern.to_string_lossy();
            let paths = glob::glob(&glob_str).map_err(|e| SqlReportError::InvalidProjectFormat {
                message: format!("invalid Include pattern '{}': {}", pattern, e),
            })?;
            for entry in paths.filter_map(|p| p.ok()) {
                if entry.is_file() {
                    report_files.push(entry);
                }
            }
        } else {
            let report_path = project_dir.join(pattern);
            if report_path.is_file() {
                report_files.push(report_path);
            }
        }
    }

    // No explicit items: every report file under the project directory
    if include_patterns.is_empty() {
        for entry in walkdir::WalkDir::new(project_dir)
            .into_iter()
            .filter_map(|e| match e {
                Ok(entry) => Some(entry),
                Err(err) => {
                    tracing::warn!(error = %err, "skipping unreadable path during report discovery");
                    None
                }
            })
        {
            let path = entry.path();
            if entry.file_type().is_file() && is_report_file(path) {
                let relative = path.strip_prefix(project_dir).unwrap_or(path);
                let skipped = relative
                    .components()
                    .any(|c| matches!(c.as_os_str().to_str(), Some("bin") | Some("obj")));
                if !skipped {
                    report_files.push(path.to_path_buf());
                }
            }
        }
    }

    if !exclude_patterns.is_empty() {
        report_files.retain(|file| {
            for pattern in &exclude_patterns {
                if pattern.contains('*') {
                    let glob_pattern = project_dir.join(pattern);
                    let glob_str = glob_pattern.to_string_lossy();
                    if let Ok(matcher) = glob::Pattern::new(&glob_str) {
                        if matcher.matches_path(file) {
                            return false;
                        }
                    }
                } else if file == &project_dir.join(pattern) {
                    return false;
                }
            }
            true
        });
    }

    report_files.sort();
    report_files.dedup();
    Ok(report_files)
}
