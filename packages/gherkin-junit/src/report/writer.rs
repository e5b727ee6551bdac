//! JUnit XML writer for report trees.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use quick_xml::events::{BytesCData, BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use super::{ReportCase, ReportSuite};
use crate::error::{ConverterError, Result};

/// Indentation width of the generated XML.
const INDENT_SIZE: usize = 4;

/// Split text into CDATA payloads that never contain `]]>`.
///
/// Each occurrence is broken between `]]` and `>`, so the concatenated
/// payloads reproduce `text` exactly.
fn cdata_sections(text: &str) -> Vec<&str> {
    let mut sections = Vec::new();
    let mut rest = text;
    while let Some(pos) = rest.find("]]>") {
        sections.push(&rest[..pos + 2]);
        rest = &rest[pos + 2..];
    }
    sections.push(rest);
    sections
}

/// Write `<tag>` with a literal-text payload.
fn write_cdata_element<W: Write>(
    writer: &mut Writer<W>,
    start: BytesStart<'_>,
    text: &str,
) -> Result<()> {
    let end = start.to_end().into_owned();
    writer.write_event(Event::Start(start))?;
    for section in cdata_sections(text) {
        writer.write_event(Event::CData(BytesCData::new(section)))?;
    }
    writer.write_event(Event::End(end))?;
    Ok(())
}

fn write_case<W: Write>(writer: &mut Writer<W>, case: &ReportCase) -> Result<()> {
    let mut start = BytesStart::new("testcase");
    start.push_attribute(("classname", case.classname.as_str()));
    start.push_attribute(("name", case.name.as_str()));
    if let Some(timestamp) = &case.timestamp {
        start.push_attribute(("timestamp", timestamp.as_str()));
    }
    writer.write_event(Event::Start(start))?;

    if !case.tags.is_empty() {
        writer.write_event(Event::Start(BytesStart::new("tags")))?;
        for tag in case.tags.iter() {
            writer.write_event(Event::Start(BytesStart::new("tag")))?;
            writer.write_event(Event::Text(BytesText::new(tag)))?;
            writer.write_event(Event::End(BytesEnd::new("tag")))?;
        }
        writer.write_event(Event::End(BytesEnd::new("tags")))?;
    }

    write_cdata_element(writer, BytesStart::new("system-out"), &case.output)?;

    if let Some(failure) = &case.failure {
        let mut start = BytesStart::new("failure");
        start.push_attribute(("message", failure.message.as_str()));
        write_cdata_element(writer, start, &failure.detail)?;
    }

    writer.write_event(Event::End(BytesEnd::new("testcase")))?;
    Ok(())
}

/// Serialize a report tree to JUnit XML.
///
/// Narration is written as CDATA so it survives byte-for-byte, newlines
/// included.
pub fn generate_xml(suite: &ReportSuite) -> Result<String> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', INDENT_SIZE);
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

    let mut root = BytesStart::new("testsuite");
    root.push_attribute(("name", suite.name.as_str()));
    writer.write_event(Event::Start(root))?;

    if let Some(description) = &suite.description {
        write_cdata_element(&mut writer, BytesStart::new("system-out"), description)?;
    }

    for case in &suite.cases {
        write_case(&mut writer, case)?;
    }

    writer.write_event(Event::End(BytesEnd::new("testsuite")))?;

    let mut bytes = writer.into_inner();
    bytes.push(b'\n');
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Save a report tree as a JUnit XML file.
///
/// Uses atomic write pattern: writes to temp file, syncs to disk, then renames.
/// Missing parent directories are created.
///
/// # Returns
/// Path to the saved file
pub fn save_report(suite: &ReportSuite, output: &Path) -> Result<PathBuf> {
    let content = generate_xml(suite)?;
    let write_error = |source: std::io::Error| ConverterError::ReportWrite {
        path: output.to_path_buf(),
        source,
    };

    let dir = match output.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    fs::create_dir_all(&dir).map_err(write_error)?;

    let file_name = output
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .ok_or_else(|| {
            write_error(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "output path has no file name",
            ))
        })?;
    let temp_file = dir.join(format!(".{file_name}.tmp"));

    {
        let mut file = File::create(&temp_file).map_err(write_error)?;
        file.write_all(content.as_bytes()).map_err(write_error)?;
        file.sync_all().map_err(write_error)?;
    }

    // On Windows, rename fails if the destination already exists
    #[cfg(target_os = "windows")]
    if output.exists() {
        fs::remove_file(output).map_err(write_error)?;
    }

    fs::rename(&temp_file, output).map_err(write_error)?;

    tracing::debug!(path = %output.display(), bytes = content.len(), "Report written");
    Ok(output.to_path_buf())
}
