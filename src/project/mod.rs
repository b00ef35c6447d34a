//! Report project file parsing

mod rptproj_parser;

pub use rptproj_parser::{parse_rptproj, ReportProject, REPORT_FILE_SUFFIX};
