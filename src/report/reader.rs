//! Parser for `*.report.xml` definition files

use std::path::Path;

use anyhow::Result;
use roxmltree::{Document, Node};

use super::definition::{FormatType, ParamType, ReportColumn, ReportDefinition, ReportParam};
use crate::error::SqlReportError;
use crate::util::{parse_bool, read_file_with_encoding_fallback};

/// Parse a report definition file
pub fn parse_report_file(path: &Path) -> Result<ReportDefinition> {
    let content =
        read_file_with_encoding_fallback(path).map_err(|e| SqlReportError::ReportReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

    Ok(parse_report_str(&content, Some(path))?)
}

/// Parse report definition XML. `source` is recorded on the definition and
/// used in error messages.
pub fn parse_report_str(
    content: &str,
    source: Option<&Path>,
) -> Result<ReportDefinition, SqlReportError> {
    let doc = Document::parse(content).map_err(|e| SqlReportError::ReportParseError {
        path: source.map(Path::to_path_buf).unwrap_or_default(),
        source: e,
    })?;

    let invalid = |message: String| SqlReportError::InvalidReportFormat {
        path: source.map(Path::to_path_buf),
        message,
    };

    let root = doc.root_element();
    if root.tag_name().name() != "Report" {
        return Err(invalid(format!(
            "expected <Report> root element, found <{}>",
            root.tag_name().name()
        )));
    }

    let name = root
        .attribute("Name")
        .ok_or_else(|| invalid("<Report> is missing the Name attribute".to_string()))?
        .to_string();

    let description = child(&root, "Description")
        .map(|n| element_text(&n).trim().to_string())
        .filter(|d| !d.is_empty());

    let sql = child(&root, "Sql")
        .map(|n| element_text(&n).trim().to_string())
        .unwrap_or_default();

    let mut params = Vec::new();
    if let Some(group) = child(&root, "Params") {
        for node in children(&group, "Param") {
            params.push(parse_param(&node).map_err(&invalid)?);
        }
    }

    let mut columns = Vec::new();
    if let Some(group) = child(&root, "Columns") {
        for node in children(&group, "Column") {
            columns.push(parse_column(&node).map_err(&invalid)?);
        }
    }

    Ok(ReportDefinition {
        name,
        description,
        sql,
        params,
        columns,
        source_file: source.map(Path::to_path_buf),
    })
}

fn parse_param(node: &Node) -> Result<ReportParam, String> {
    let name = node
        .attribute("Name")
        .ok_or_else(|| "<Param> is missing the Name attribute".to_string())?;

    let param_type = match node.attribute("Type") {
        Some(t) => t.parse::<ParamType>()?,
        None => ParamType::default(),
    };

    let required = match node.attribute("Required") {
        Some(v) => parse_bool(v)
            .ok_or_else(|| format!("invalid Required value '{}' on parameter {}", v, name))?,
        None => false,
    };

    Ok(ReportParam {
        name: name.to_string(),
        param_type,
        required,
    })
}

fn parse_column(node: &Node) -> Result<ReportColumn, String> {
    let field_name = node
        .attribute("Field")
        .ok_or_else(|| "<Column> is missing the Field attribute".to_string())?;

    let format_type = match node.attribute("Format") {
        Some(f) => f.parse::<FormatType>()?,
        None => FormatType::default(),
    };

    Ok(ReportColumn {
        field_name: field_name.to_string(),
        display_name: node.attribute("DisplayName").unwrap_or(field_name).to_string(),
        format_type,
    })
}

fn child<'a, 'input>(parent: &Node<'a, 'input>, name: &str) -> Option<Node<'a, 'input>> {
    parent
        .children()
        .find(|n| n.is_element() && n.tag_name().name() == name)
}

fn children<'a, 'input: 'a>(
    parent: &Node<'a, 'input>,
    name: &'a str,
) -> impl Iterator<Item = Node<'a, 'input>> + 'a {
    parent
        .children()
        .filter(move |n| n.is_element() && n.tag_name().name() == name)
}

/// Concatenated text and CDATA content of an element
fn element_text(node: &Node) -> String {
    node.descendants()
        .filter(|n| n.is_text())
        .filter_map(|n| n.text())
        .collect()
}
