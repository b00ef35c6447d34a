//! Report definitions: model, file format, suggestions and acceptance policy

mod columns;
mod definition;
mod reader;
mod validate;
mod writer;

pub use columns::{scaffold_definition, suggest_columns, suggest_params, ColumnSuggestion, SqlDialect};
pub use definition::{FormatType, ParamType, ReportColumn, ReportDefinition, ReportParam};
pub use reader::{parse_report_file, parse_report_str};
pub use validate::{
    validate_columns, validate_definition, IssueKind, ParamPolicy, ReportIssue, Severity,
};
pub use writer::{write_report_file, write_report_xml};
