//! Generate `*.report.xml` definition files

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use quick_xml::events::{BytesCData, BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use super::definition::ReportDefinition;
use crate::error::SqlReportError;

/// Write `report` as definition XML
pub fn write_report_xml<W: Write>(writer: W, report: &ReportDefinition) -> anyhow::Result<()> {
    let mut xml_writer = Writer::new_with_indent(writer, b' ', 2);

    xml_writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))?;

    let mut root = BytesStart::new("Report");
    root.push_attribute(("Name", report.name.as_str()));
    xml_writer.write_event(Event::Start(root))?;

    if let Some(ref description) = report.description {
        xml_writer.write_event(Event::Start(BytesStart::new("Description")))?;
        xml_writer.write_event(Event::Text(BytesText::new(description)))?;
        xml_writer.write_event(Event::End(BytesEnd::new("Description")))?;
    }

    xml_writer.write_event(Event::Start(BytesStart::new("Sql")))?;
    if report.sql.contains("]]>") {
        // Cannot be represented inside CDATA
        xml_writer.write_event(Event::Text(BytesText::new(&report.sql)))?;
    } else {
        xml_writer.write_event(Event::CData(BytesCData::new(report.sql.as_str())))?;
    }
    xml_writer.write_event(Event::End(BytesEnd::new("Sql")))?;

    if !report.params.is_empty() {
        xml_writer.write_event(Event::Start(BytesStart::new("Params")))?;
        for param in &report.params {
            let required = if param.required { "true" } else { "false" };
            let elem = BytesStart::new("Param").with_attributes([
                ("Name", param.name.as_str()),
                ("Type", param.param_type.as_str()),
                ("Required", required),
            ]);
            xml_writer.write_event(Event::Empty(elem))?;
        }
        xml_writer.write_event(Event::End(BytesEnd::new("Params")))?;
    }

    if !report.columns.is_empty() {
        xml_writer.write_event(Event::Start(BytesStart::new("Columns")))?;
        for column in &report.columns {
            let elem = BytesStart::new("Column").with_attributes([
                ("Field", column.field_name.as_str()),
                ("DisplayName", column.display_name.as_str()),
                ("Format", column.format_type.as_str()),
            ]);
            xml_writer.write_event(Event::Empty(elem))?;
        }
        xml_writer.write_event(Event::End(BytesEnd::new("Columns")))?;
    }

    xml_writer.write_event(Event::End(BytesEnd::new("Report")))?;

    let mut inner = xml_writer.into_inner();
    inner.write_all(b"\n")?;
    inner.flush()?;
    Ok(())
}

/// Write `report` to a definition file at `path`, creating or truncating it
pub fn write_report_file(path: &Path, report: &ReportDefinition) -> anyhow::Result<()> {
    let file = File::create(path).map_err(|e| SqlReportError::ReportWriteError {
        path: path.to_path_buf(),
        source: e,
    })?;
    write_report_xml(BufWriter::new(file), report)
}
