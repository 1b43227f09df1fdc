//! Parsing of xl/styles.xml.
//!
//! Only the attributes the table view renders are kept: font size, bold,
//! and solid fill color. Everything else in the stylesheet is skipped.

use quick_xml::events::Event;
use quick_xml::Reader;
use std::io::{BufReader, Read, Seek};
use zip::ZipArchive;

use crate::color::{indexed_to_css, rgb_to_css};
use crate::error::Result;

/// A font record reduced to what the view renders.
#[derive(Debug, Default, Clone)]
pub(crate) struct FontDef {
    pub size: Option<f64>,
    pub bold: bool,
}

/// A cell format: indices into the font and fill tables.
#[derive(Debug, Default, Clone, Copy)]
pub(crate) struct CellXf {
    pub font_id: Option<u32>,
    pub fill_id: Option<u32>,
}

/// The resolved style attributes for one cell, ready to hang off a raw cell.
#[derive(Debug, Default, Clone, PartialEq)]
pub(crate) struct CellLook {
    pub fill: Option<String>,
    pub font_size: Option<f64>,
    pub bold: Option<bool>,
}

/// Minimal stylesheet: fonts, solid-fill colors, and cell formats.
#[derive(Debug, Default)]
pub(crate) struct StyleSheet {
    fonts: Vec<FontDef>,
    /// `Some(css_color)` for solid fills, `None` for none/pattern fills.
    fills: Vec<Option<String>>,
    cell_xfs: Vec<CellXf>,
}

impl StyleSheet {
    /// Resolve a cell's `s` attribute to its displayable attributes.
    ///
    /// Total: unknown or absent indices resolve to an empty look.
    pub(crate) fn look(&self, style_idx: Option<u32>) -> CellLook {
        let Some(xf) = style_idx.and_then(|idx| self.cell_xfs.get(idx as usize)) else {
            return CellLook::default();
        };

        let font = xf
            .font_id
            .and_then(|id| self.fonts.get(id as usize))
            .cloned()
            .unwrap_or_default();

        CellLook {
            fill: xf
                .fill_id
                .and_then(|id| self.fills.get(id as usize))
                .cloned()
                .flatten(),
            font_size: font.size,
            bold: font.bold.then_some(true),
        }
    }
}

#[derive(Debug, Default)]
struct FillState {
    solid: bool,
    color: Option<String>,
}

/// Parse xl/styles.xml from the archive.
///
/// A workbook without a stylesheet part is valid; it yields an empty
/// stylesheet and every cell gets the default look.
pub(crate) fn parse_stylesheet<R: Read + Seek>(archive: &mut ZipArchive<R>) -> Result<StyleSheet> {
    let Ok(file) = archive.by_name("xl/styles.xml") else {
        return Ok(StyleSheet::default());
    };

    let reader = BufReader::new(file);
    let mut xml = Reader::from_reader(reader);
    xml.trim_text(true);

    let mut stylesheet = StyleSheet::default();
    let mut buf = Vec::new();

    let mut in_fonts = false;
    let mut in_fills = false;
    let mut in_cell_xfs = false;

    let mut current_font: Option<FontDef> = None;
    let mut current_fill: Option<FillState> = None;

    loop {
        match xml.read_event_into(&mut buf) {
            Ok(ref event @ (Event::Start(ref e) | Event::Empty(ref e))) => {
                let is_empty = matches!(event, Event::Empty(_));
                match e.local_name().as_ref() {
                    b"fonts" => in_fonts = true,
                    b"fills" => in_fills = true,
                    b"cellXfs" => in_cell_xfs = true,

                    // A self-closing <font/> or <fill/> still occupies a
                    // slot in its table; push the default record directly.
                    b"font" if in_fonts => {
                        if is_empty {
                            stylesheet.fonts.push(FontDef::default());
                        } else {
                            current_font = Some(FontDef::default());
                        }
                    }

                    b"sz" if current_font.is_some() => {
                        if let Some(ref mut font) = current_font {
                            for attr in e.attributes().flatten() {
                                if attr.key.as_ref() == b"val" {
                                    font.size = std::str::from_utf8(&attr.value)
                                        .ok()
                                        .and_then(|s| s.parse().ok());
                                }
                            }
                        }
                    }

                    b"b" if current_font.is_some() => {
                        if let Some(ref mut font) = current_font {
                            font.bold = true;
                        }
                    }

                    b"fill" if in_fills => {
                        if is_empty {
                            stylesheet.fills.push(None);
                        } else {
                            current_fill = Some(FillState::default());
                        }
                    }

                    b"patternFill" if current_fill.is_some() => {
                        if let Some(ref mut fill) = current_fill {
                            for attr in e.attributes().flatten() {
                                if attr.key.as_ref() == b"patternType" {
                                    fill.solid = attr.value.as_ref() == b"solid";
                                }
                            }
                        }
                    }

                    b"fgColor" if current_fill.is_some() => {
                        if let Some(ref mut fill) = current_fill {
                            fill.color = parse_fill_color(e);
                        }
                    }

                    b"xf" if in_cell_xfs => {
                        let mut xf = CellXf::default();
                        for attr in e.attributes().flatten() {
                            match attr.key.as_ref() {
                                b"fontId" => {
                                    xf.font_id = std::str::from_utf8(&attr.value)
                                        .ok()
                                        .and_then(|s| s.parse().ok());
                                }
                                b"fillId" => {
                                    xf.fill_id = std::str::from_utf8(&attr.value)
                                        .ok()
                                        .and_then(|s| s.parse().ok());
                                }
                                _ => {}
                            }
                        }
                        stylesheet.cell_xfs.push(xf);
                    }

                    _ => {}
                }
            }

            Ok(Event::End(ref e)) => match e.local_name().as_ref() {
                b"fonts" => in_fonts = false,
                b"fills" => in_fills = false,
                b"cellXfs" => in_cell_xfs = false,
                b"font" if in_fonts => {
                    if let Some(font) = current_font.take() {
                        stylesheet.fonts.push(font);
                    }
                }
                b"fill" if in_fills => {
                    if let Some(fill) = current_fill.take() {
                        stylesheet
                            .fills
                            .push(fill.solid.then_some(fill.color).flatten());
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

    Ok(stylesheet)
}

/// Read a color from an `<fgColor>` element's rgb/indexed attributes.
fn parse_fill_color(e: &quick_xml::events::BytesStart<'_>) -> Option<String> {
    let mut color = None;
    for attr in e.attributes().flatten() {
        match attr.key.as_ref() {
            b"rgb" => {
                color = std::str::from_utf8(&attr.value).ok().and_then(rgb_to_css);
            }
            b"indexed" => {
                if color.is_none() {
                    color = std::str::from_utf8(&attr.value)
                        .ok()
                        .and_then(|s| s.parse().ok())
                        .and_then(indexed_to_css);
                }
            }
            _ => {}
        }
    }
    color
}
