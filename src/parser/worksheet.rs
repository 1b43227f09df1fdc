//! Worksheet parsing - parses individual sheet XML into dense rows.

use quick_xml::events::Event;
use quick_xml::Reader;
use std::io::{BufReader, Read, Seek};
use zip::ZipArchive;

use crate::cell_ref::{parse_cell_range, parse_cell_ref_bytes_or_default};
use crate::error::Result;
use crate::types::{CellValue, MergeRegion, RawCell, Sheet};

use super::styles::StyleSheet;

/// Sheet metadata from workbook.xml.
pub(super) struct SheetInfo {
    pub name: String,
    pub path: String,
}

/// Cell type tag from the `t` attribute of a `<c>` element.
#[derive(Copy, Clone)]
enum CellTypeTag {
    Shared,
    Inline,
    Str,
    Bool,
    Error,
    Default,
}

fn parse_cell_type_tag(value: &[u8]) -> CellTypeTag {
    match value {
        b"s" => CellTypeTag::Shared,
        b"b" => CellTypeTag::Bool,
        b"e" => CellTypeTag::Error,
        b"str" => CellTypeTag::Str,
        b"inlineStr" => CellTypeTag::Inline,
        _ => CellTypeTag::Default,
    }
}

fn parse_u32_bytes(value: &[u8]) -> Option<u32> {
    let mut num: u32 = 0;
    let mut seen = false;
    for &b in value {
        if !b.is_ascii_digit() {
            return None;
        }
        seen = true;
        num = num.saturating_mul(10).saturating_add(u32::from(b - b'0'));
    }
    seen.then_some(num)
}

/// Parse a merge range like "A1:B2" into a region.
///
/// A bare single ref ("B2") is the degenerate single-cell region.
fn parse_merge_ref(ref_str: &str) -> Option<MergeRegion> {
    let (start_row, start_col, end_row, end_col) = parse_cell_range(ref_str)?;
    Some(MergeRegion {
        start_row,
        start_col,
        end_row,
        end_col,
    })
}

/// A parsed cell waiting for dense placement.
struct PendingCell {
    row: u32,
    col: u32,
    cell: RawCell,
}

/// Parse a single worksheet into dense, padded rows.
#[allow(clippy::too_many_lines)]
pub(super) fn parse_sheet<R: Read + Seek>(
    archive: &mut ZipArchive<R>,
    info: &SheetInfo,
    shared_strings: &[String],
    stylesheet: &StyleSheet,
) -> Result<Sheet> {
    let file = archive.by_name(&info.path)?;

    let reader = BufReader::new(file);
    let mut xml = Reader::from_reader(reader);
    xml.trim_text(false);

    let mut cells: Vec<PendingCell> = Vec::new();
    let mut merges: Vec<MergeRegion> = Vec::new();
    let mut max_row: u32 = 0;
    let mut max_col: u32 = 0;

    let mut buf = Vec::new();
    let mut cell_buf = Vec::new();
    let mut text_buf = Vec::new();

    loop {
        match xml.read_event_into(&mut buf) {
            Ok(ref event @ (Event::Start(_) | Event::Empty(_))) => {
                let (Event::Start(ref e) | Event::Empty(ref e)) = event else {
                    continue;
                };
                let is_start_event = matches!(event, Event::Start(_));

                match e.local_name().as_ref() {
                    b"dimension" => {
                        for attr in e.attributes().flatten() {
                            if attr.key.as_ref() == b"ref" {
                                if let Some((_, _, end_row, end_col)) = std::str::from_utf8(
                                    &attr.value,
                                )
                                .ok()
                                .and_then(parse_cell_range)
                                {
                                    max_row = max_row.max(end_row.saturating_add(1));
                                    max_col = max_col.max(end_col.saturating_add(1));
                                }
                            }
                        }
                    }

                    b"c" => {
                        let mut col: u32 = 0;
                        let mut row: u32 = 0;
                        let mut cell_type = CellTypeTag::Default;
                        let mut style_idx: Option<u32> = None;

                        for attr in e.attributes().flatten() {
                            match attr.key.as_ref() {
                                b"r" => {
                                    let (c, r) = parse_cell_ref_bytes_or_default(&attr.value);
                                    col = c;
                                    row = r;
                                }
                                b"t" => {
                                    cell_type = parse_cell_type_tag(&attr.value);
                                }
                                b"s" => {
                                    style_idx = parse_u32_bytes(&attr.value);
                                }
                                _ => {}
                            }
                        }

                        // Read the value from child elements. Self-closing
                        // cells like <c r="A1" s="2"/> have none.
                        let mut value: Option<String> = None;
                        if is_start_event {
                            value = read_cell_text(&mut xml, &mut cell_buf, &mut text_buf);
                        }

                        let look = stylesheet.look(style_idx);
                        let cell = RawCell {
                            value: resolve_value(value.as_deref(), cell_type, shared_strings),
                            fill: look.fill,
                            font_size: look.font_size,
                            bold: look.bold,
                        };

                        max_row = max_row.max(row.saturating_add(1));
                        max_col = max_col.max(col.saturating_add(1));
                        cells.push(PendingCell { row, col, cell });
                    }

                    b"mergeCell" => {
                        for attr in e.attributes().flatten() {
                            if attr.key.as_ref() == b"ref" {
                                if let Some(merge) = std::str::from_utf8(&attr.value)
                                    .ok()
                                    .and_then(parse_merge_ref)
                                {
                                    merges.push(merge);
                                }
                            }
                        }
                    }

                    _ => {}
                }
            }

            Ok(Event::Eof) => break,
            Err(e) => return Err(e.into()),
            _ => {}
        }
        buf.clear();
    }

    Ok(assemble(info.name.clone(), cells, merges, max_row, max_col))
}

/// Read the textual payload of a `<c>` element: a `<v>` value, a `<t>`
/// direct child, or an `<is><t>` inline string.
fn read_cell_text<R: std::io::BufRead>(
    xml: &mut Reader<R>,
    cell_buf: &mut Vec<u8>,
    text_buf: &mut Vec<u8>,
) -> Option<String> {
    let mut value: Option<String> = None;
    loop {
        cell_buf.clear();
        match xml.read_event_into(cell_buf) {
            Ok(Event::Start(ref inner)) => {
                let inner_name = inner.local_name();
                let inner_name = inner_name.as_ref();
                if inner_name == b"v" || inner_name == b"t" {
                    text_buf.clear();
                    if let Ok(Event::Text(text)) = xml.read_event_into(text_buf) {
                        value = text.unescape().ok().map(|s| s.to_string());
                    }
                }
                // <is> is just a container; its <t> child lands in the
                // branch above on a later iteration.
            }
            Ok(Event::End(ref inner)) => {
                if inner.local_name().as_ref() == b"c" {
                    break;
                }
            }
            Ok(Event::Eof) | Err(_) => break,
            _ => {}
        }
    }
    value
}

/// Resolve the raw text and type tag into a cell value.
fn resolve_value(
    raw_value: Option<&str>,
    cell_type: CellTypeTag,
    shared_strings: &[String],
) -> CellValue {
    match cell_type {
        CellTypeTag::Shared => {
            let idx: usize = raw_value.and_then(|v| v.parse().ok()).unwrap_or(0);
            shared_strings
                .get(idx)
                .map(|s| CellValue::Text(s.clone()))
                .unwrap_or_default()
        }
        CellTypeTag::Str | CellTypeTag::Inline | CellTypeTag::Error => raw_value
            .map(|v| CellValue::Text(v.to_string()))
            .unwrap_or_default(),
        CellTypeTag::Bool => match raw_value {
            Some("1" | "true") => CellValue::Bool(true),
            Some("0" | "false") => CellValue::Bool(false),
            Some(other) => CellValue::Text(other.to_string()),
            None => CellValue::Empty,
        },
        CellTypeTag::Default => {
            let Some(v) = raw_value else {
                return CellValue::Empty;
            };
            match v.parse::<f64>() {
                Ok(num) => CellValue::Number(num),
                Err(_) => CellValue::Text(v.to_string()),
            }
        }
    }
}

/// Place sparse cells into a dense, rectangular row matrix.
///
/// Every row is padded to the sheet's full width so the normalizer can
/// treat rows as index-aligned.
fn assemble(
    name: String,
    cells: Vec<PendingCell>,
    merges: Vec<MergeRegion>,
    max_row: u32,
    max_col: u32,
) -> Sheet {
    let mut rows: Vec<Vec<RawCell>> =
        vec![vec![RawCell::default(); max_col as usize]; max_row as usize];

    for pending in cells {
        if let Some(slot) = rows
            .get_mut(pending.row as usize)
            .and_then(|row| row.get_mut(pending.col as usize))
        {
            *slot = pending.cell;
        }
    }

    Sheet { name, rows, merges }
}
