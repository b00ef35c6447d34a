//! Error types for sqlreport

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading, checking or writing report definitions
#[derive(Error, Debug)]
pub enum SqlReportError {
    #[error("Failed to read report file: {path}")]
    ReportReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse report file: {path}")]
    ReportParseError {
        path: PathBuf,
        #[source]
        source: roxmltree::Error,
    },

    #[error("Invalid report definition{}: {message}", display_path(.path))]
    InvalidReportFormat {
        path: Option<PathBuf>,
        message: String,
    },

    #[error("Failed to read project file: {path}")]
    ProjectReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse project file: {path}")]
    ProjectParseError {
        path: PathBuf,
        #[source]
        source: roxmltree::Error,
    },

    #[error("Invalid project file format: {message}")]
    InvalidProjectFormat { message: String },

    #[error("Failed to read SQL file: {path}")]
    SqlFileReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Cannot extract columns from SQL: {message}")]
    ColumnExtraction { message: String },

    #[error("Failed to write report definition to {path}")]
    ReportWriteError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

fn display_path(path: &Option<PathBuf>) -> String {
    match path {
        Some(p) => format!(" in {}", p.display()),
        None => String::new(),
    }
}

impl From<sqlparser::parser::ParserError> for SqlReportError {
    fn from(err: sqlparser::parser::ParserError) -> Self {
        SqlReportError::ColumnExtraction {
            message: err.to_string(),
        }
    }
}
