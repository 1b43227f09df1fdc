//! Workbook ingestor.
//!
//! Decodes XLSX bytes into the [`Workbook`] model: opens the ZIP container,
//! reads the sheet list, shared strings, and stylesheet, then parses each
//! worksheet into dense rows plus merge metadata.

pub(crate) mod styles;
mod worksheet;

use quick_xml::events::Event;
use quick_xml::Reader;
use std::collections::HashMap;
use std::io::{BufReader, Cursor, Read, Seek};
use zip::ZipArchive;

use crate::error::{Result, XltabError};
use crate::types::Workbook;

use styles::parse_stylesheet;
use worksheet::{parse_sheet, SheetInfo};

/// Decode an XLSX file into a workbook.
///
/// # Errors
/// Returns [`XltabError::Decode`] when the bytes are not a recognizable
/// spreadsheet; no partial workbook is ever produced.
pub fn decode(data: &[u8]) -> Result<Workbook> {
    let cursor = Cursor::new(data);
    let mut archive = ZipArchive::new(cursor)
        .map_err(|e| XltabError::Decode(format!("not a spreadsheet archive: {e}")))?;

    let sheet_infos = parse_workbook_info(&mut archive)?;
    if sheet_infos.is_empty() {
        return Err(XltabError::Decode("workbook has no sheets".to_string()));
    }

    let shared_strings = parse_shared_strings(&mut archive)?;
    let stylesheet = parse_stylesheet(&mut archive)?;

    let mut sheets = Vec::with_capacity(sheet_infos.len());
    for info in &sheet_infos {
        sheets.push(parse_sheet(
            &mut archive,
            info,
            &shared_strings,
            &stylesheet,
        )?);
    }

    log::debug!(
        "decoded workbook: {} sheet(s), {} shared string(s)",
        sheets.len(),
        shared_strings.len()
    );

    Ok(Workbook { sheets })
}

/// Parse xl/workbook.xml (sheet names, in tab order) and resolve each
/// sheet's part path through xl/_rels/workbook.xml.rels.
fn parse_workbook_info<R: Read + Seek>(archive: &mut ZipArchive<R>) -> Result<Vec<SheetInfo>> {
    let rels = parse_workbook_relationships(archive);

    let file = archive
        .by_name("xl/workbook.xml")
        .map_err(|_| XltabError::Decode("missing xl/workbook.xml".to_string()))?;

    let reader = BufReader::new(file);
    let mut xml = Reader::from_reader(reader);
    xml.trim_text(true);

    let mut infos = Vec::new();
    let mut buf = Vec::new();

    loop {
        match xml.read_event_into(&mut buf) {
            Ok(Event::Start(ref e) | Event::Empty(ref e)) => {
                if e.local_name().as_ref() == b"sheet" {
                    let mut name = String::new();
                    let mut rel_id = String::new();

                    for attr in e.attributes().flatten() {
                        // r:id carries a namespace prefix; match on the local name.
                        match attr.key.local_name().as_ref() {
                            b"name" => {
                                name = std::str::from_utf8(&attr.value)
                                    .unwrap_or_default()
                                    .to_string();
                            }
                            b"id" => {
                                rel_id = std::str::from_utf8(&attr.value)
                                    .unwrap_or_default()
                                    .to_string();
                            }
                            _ => {}
                        }
                    }

                    let path = rels.get(&rel_id).cloned().unwrap_or_else(|| {
                        // No relationship part: fall back to conventional naming.
                        format!("xl/worksheets/sheet{}.xml", infos.len() + 1)
                    });
                    infos.push(SheetInfo { name, path });
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(e.into()),
            _ => {}
        }
        buf.clear();
    }

    Ok(infos)
}

/// Parse xl/_rels/workbook.xml.rels into a relationship-id -> part-path map.
fn parse_workbook_relationships<R: Read + Seek>(
    archive: &mut ZipArchive<R>,
) -> HashMap<String, String> {
    let mut rels = HashMap::new();

    let Ok(file) = archive.by_name("xl/_rels/workbook.xml.rels") else {
        return rels;
    };

    let reader = BufReader::new(file);
    let mut xml = Reader::from_reader(reader);
    xml.trim_text(true);

    let mut buf = Vec::new();
    loop {
        match xml.read_event_into(&mut buf) {
            Ok(Event::Start(ref e) | Event::Empty(ref e)) => {
                if e.local_name().as_ref() == b"Relationship" {
                    let mut id = String::new();
                    let mut target = String::new();

                    for attr in e.attributes().flatten() {
                        match attr.key.as_ref() {
                            b"Id" => {
                                id = std::str::from_utf8(&attr.value)
                                    .unwrap_or_default()
                                    .to_string();
                            }
                            b"Target" => {
                                target = std::str::from_utf8(&attr.value)
                                    .unwrap_or_default()
                                    .to_string();
                            }
                            _ => {}
                        }
                    }

                    if !id.is_empty() && !target.is_empty() {
                        // Targets are relative to xl/ unless already absolute.
                        let path = if let Some(stripped) = target.strip_prefix('/') {
                            stripped.to_string()
                        } else {
                            format!("xl/{target}")
                        };
                        rels.insert(id, path);
                    }
                }
            }
            Ok(Event::Eof) | Err(_) => break,
            _ => {}
        }
        buf.clear();
    }

    rels
}

/// Parse xl/sharedStrings.xml into the shared string table.
///
/// Rich-text runs (`<si><r><t>..`) are concatenated to their plain text.
fn parse_shared_strings<R: Read + Seek>(archive: &mut ZipArchive<R>) -> Result<Vec<String>> {
    let Ok(file) = archive.by_name("xl/sharedStrings.xml") else {
        return Ok(Vec::new());
    };

    let reader = BufReader::new(file);
    let mut xml = Reader::from_reader(reader);
    xml.trim_text(false);

    let mut strings = Vec::new();
    let mut buf = Vec::new();

    let mut current: Option<String> = None;
    let mut in_text = false;

    loop {
        match xml.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => match e.local_name().as_ref() {
                b"si" => current = Some(String::new()),
                b"t" if current.is_some() => in_text = true,
                _ => {}
            },
            Ok(Event::Text(ref text)) if in_text => {
                if let (Some(ref mut s), Ok(unescaped)) = (current.as_mut(), text.unescape()) {
                    s.push_str(&unescaped);
                }
            }
            Ok(Event::End(ref e)) => match e.local_name().as_ref() {
                b"t" => in_text = false,
                b"si" => {
                    if let Some(s) = current.take() {
                        strings.push(s);
                    }
                }
                _ => {}
            },
            Ok(Event::Eof) => break,
            Err(e) => return Err(e.into()),
            _ => {}
        }
        buf.clear();
    }

    Ok(strings)
}
