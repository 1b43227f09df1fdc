//! Test fixtures for generating valid XLSX files in memory.
//!
//! Provides builders for creating XLSX files programmatically, useful for
//! exercising the decoder and normalizer with known inputs.
//!
//! # Example
//!
//! ```rust
//! use fixtures::{SheetBuilder, StyleBuilder, XlsxBuilder};
//!
//! let xlsx = XlsxBuilder::new()
//!     .sheet(
//!         SheetBuilder::new("Sheet1")
//!             .cell("A1", "Hello", Some(StyleBuilder::new().bold()))
//!             .merge("A1:B2"),
//!     )
//!     .build();
//!
//! let workbook = xltab::parser::decode(&xlsx).unwrap();
//! ```
#![allow(
    dead_code,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic,
    clippy::cast_possible_truncation
)]

use std::io::{Cursor, Write};
use zip::write::FileOptions;
use zip::ZipWriter;

// ============================================================================
// Style Builder
// ============================================================================

/// Builder for creating cell styles (the subset the viewer renders).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StyleBuilder {
    pub font_size: Option<f64>,
    pub bold: bool,
    pub bg_color: Option<String>,
}

impl StyleBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the font size in points.
    #[must_use]
    pub fn font_size(mut self, size: f64) -> Self {
        self.font_size = Some(size);
        self
    }

    /// Make the font bold.
    #[must_use]
    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    /// Set the background fill color (solid fill) as #RRGGBB.
    #[must_use]
    pub fn bg_color(mut self, color: &str) -> Self {
        self.bg_color = Some(color.trim_start_matches('#').to_uppercase());
        self
    }

    fn has_font(&self) -> bool {
        self.font_size.is_some() || self.bold
    }
}

// ============================================================================
// Sheet Builder
// ============================================================================

/// A cell value for fixtures.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Empty,
    String(String),
    Number(f64),
    Boolean(bool),
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::String(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::String(s)
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        CellValue::Number(n)
    }
}

impl From<i32> for CellValue {
    fn from(n: i32) -> Self {
        CellValue::Number(f64::from(n))
    }
}

impl From<bool> for CellValue {
    fn from(b: bool) -> Self {
        CellValue::Boolean(b)
    }
}

/// A cell in the sheet.
#[derive(Debug, Clone)]
pub struct CellEntry {
    pub cell_ref: String,
    pub value: CellValue,
    pub style: Option<StyleBuilder>,
}

/// Builder for a single worksheet.
#[derive(Debug, Clone, Default)]
pub struct SheetBuilder {
    pub name: String,
    pub cells: Vec<CellEntry>,
    pub merges: Vec<String>,
}

impl SheetBuilder {
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            cells: Vec::new(),
            merges: Vec::new(),
        }
    }

    /// Add a cell with a value and optional style.
    #[must_use]
    pub fn cell<V: Into<CellValue>>(
        mut self,
        cell_ref: &str,
        value: V,
        style: Option<StyleBuilder>,
    ) -> Self {
        self.cells.push(CellEntry {
            cell_ref: cell_ref.to_string(),
            value: value.into(),
            style,
        });
        self
    }

    /// Add an empty cell with only a style.
    #[must_use]
    pub fn styled_cell(mut self, cell_ref: &str, style: StyleBuilder) -> Self {
        self.cells.push(CellEntry {
            cell_ref: cell_ref.to_string(),
            value: CellValue::Empty,
            style: Some(style),
        });
        self
    }

    /// Add a merge range (e.g., "A1:B2").
    #[must_use]
    pub fn merge(mut self, range: &str) -> Self {
        self.merges.push(range.to_string());
        self
    }
}

// ============================================================================
// XLSX Builder
// ============================================================================

/// Builder for creating complete XLSX files.
#[derive(Debug, Default)]
pub struct XlsxBuilder {
    sheets: Vec<SheetBuilder>,
}

impl XlsxBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a sheet.
    #[must_use]
    pub fn sheet(mut self, sheet: SheetBuilder) -> Self {
        self.sheets.push(sheet);
        self
    }

    /// Build the XLSX file as bytes.
    #[must_use]
    pub fn build(self) -> Vec<u8> {
        let cursor = Cursor::new(Vec::new());
        let mut zip = ZipWriter::new(cursor);
        let options = FileOptions::default().compression_method(zip::CompressionMethod::Deflated);

        // Collect unique styles and shared strings
        let mut styles = StylesCollector::new();
        let mut shared_strings: Vec<String> = Vec::new();

        for sheet in &self.sheets {
            for cell in &sheet.cells {
                if let Some(ref style) = cell.style {
                    styles.add_style(style);
                }
                if let CellValue::String(ref s) = cell.value {
                    if !shared_strings.contains(s) {
                        shared_strings.push(s.clone());
                    }
                }
            }
        }

        let _ = zip.start_file("[Content_Types].xml", options);
        let _ = zip.write_all(generate_content_types(self.sheets.len()).as_bytes());

        let _ = zip.start_file("_rels/.rels", options);
        let _ = zip.write_all(generate_rels().as_bytes());

        let _ = zip.start_file("xl/_rels/workbook.xml.rels", options);
        let _ = zip.write_all(generate_workbook_rels(self.sheets.len()).as_bytes());

        let _ = zip.start_file("xl/workbook.xml", options);
        let _ = zip.write_all(generate_workbook(&self.sheets).as_bytes());

        let _ = zip.start_file("xl/styles.xml", options);
        let _ = zip.write_all(styles.generate_styles_xml().as_bytes());

        if !shared_strings.is_empty() {
            let _ = zip.start_file("xl/sharedStrings.xml", options);
            let _ = zip.write_all(generate_shared_strings(&shared_strings).as_bytes());
        }

        for (i, sheet) in self.sheets.iter().enumerate() {
            let path = format!("xl/worksheets/sheet{}.xml", i + 1);
            let _ = zip.start_file(&path, options);
            let _ = zip.write_all(generate_sheet_xml(sheet, &shared_strings, &styles).as_bytes());
        }

        let cursor = zip.finish().expect("Failed to finish ZIP");
        cursor.into_inner()
    }
}

// ============================================================================
// Styles Collector
// ============================================================================

/// Collects and deduplicates styles for the XLSX file.
#[derive(Debug, Default)]
struct StylesCollector {
    fonts: Vec<(Option<f64>, bool)>,
    fills: Vec<Option<String>>,
    cell_xfs: Vec<(u32, u32)>, // (font_id, fill_id)
    style_map: Vec<(StyleBuilder, u32)>,
}

impl StylesCollector {
    fn new() -> Self {
        let mut collector = Self::default();

        // Default font (required, xf 0 points at it)
        collector.fonts.push((Some(11.0), false));

        // Required fills: none and gray125
        collector.fills.push(None);
        collector.fills.push(None);

        // Default cell format
        collector.cell_xfs.push((0, 0));

        collector
    }

    fn add_style(&mut self, style: &StyleBuilder) {
        if self.style_map.iter().any(|(s, _)| s == style) {
            return;
        }

        let font_id = if style.has_font() {
            let def = (style.font_size, style.bold);
            match self.fonts.iter().position(|f| *f == def) {
                Some(i) => i as u32,
                None => {
                    self.fonts.push(def);
                    (self.fonts.len() - 1) as u32
                }
            }
        } else {
            0
        };

        let fill_id = match style.bg_color {
            Some(ref color) => {
                let def = Some(color.clone());
                match self.fills.iter().position(|f| *f == def) {
                    Some(i) => i as u32,
                    None => {
                        self.fills.push(def);
                        (self.fills.len() - 1) as u32
                    }
                }
            }
            None => 0,
        };

        self.cell_xfs.push((font_id, fill_id));
        let xf_id = (self.cell_xfs.len() - 1) as u32;
        self.style_map.push((style.clone(), xf_id));
    }

    fn xf_index(&self, style: &StyleBuilder) -> Option<u32> {
        self.style_map
            .iter()
            .find(|(s, _)| s == style)
            .map(|(_, i)| *i)
    }

    fn generate_styles_xml(&self) -> String {
        let mut xml = String::from(
            "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\
             <styleSheet xmlns=\"http://schemas.openxmlformats.org/spreadsheetml/2006/main\">",
        );

        xml.push_str(&format!("<fonts count=\"{}\">", self.fonts.len()));
        for (size, bold) in &self.fonts {
            xml.push_str("<font>");
            if *bold {
                xml.push_str("<b/>");
            }
            if let Some(size) = size {
                xml.push_str(&format!("<sz val=\"{size}\"/>"));
            }
            xml.push_str("<name val=\"Calibri\"/></font>");
        }
        xml.push_str("</fonts>");

        xml.push_str(&format!("<fills count=\"{}\">", self.fills.len()));
        for (i, fill) in self.fills.iter().enumerate() {
            match fill {
                Some(color) => xml.push_str(&format!(
                    "<fill><patternFill patternType=\"solid\">\
                     <fgColor rgb=\"FF{color}\"/><bgColor indexed=\"64\"/>\
                     </patternFill></fill>"
                )),
                None if i == 1 => {
                    xml.push_str("<fill><patternFill patternType=\"gray125\"/></fill>");
                }
                None => xml.push_str("<fill><patternFill patternType=\"none\"/></fill>"),
            }
        }
        xml.push_str("</fills>");

        xml.push_str("<borders count=\"1\"><border/></borders>");
        xml.push_str(
            "<cellStyleXfs count=\"1\"><xf numFmtId=\"0\" fontId=\"0\" fillId=\"0\" borderId=\"0\"/></cellStyleXfs>",
        );

        xml.push_str(&format!("<cellXfs count=\"{}\">", self.cell_xfs.len()));
        for (font_id, fill_id) in &self.cell_xfs {
            xml.push_str(&format!(
                "<xf numFmtId=\"0\" fontId=\"{font_id}\" fillId=\"{fill_id}\" borderId=\"0\" \
                 applyFont=\"1\" applyFill=\"1\"/>"
            ));
        }
        xml.push_str("</cellXfs>");

        xml.push_str("</styleSheet>");
        xml
    }
}

// ============================================================================
// Part generation
// ============================================================================

fn xml_escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

fn generate_content_types(sheet_count: usize) -> String {
    let mut xml = String::from(
        "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\
         <Types xmlns=\"http://schemas.openxmlformats.org/package/2006/content-types\">\
         <Default Extension=\"rels\" ContentType=\"application/vnd.openxmlformats-package.relationships+xml\"/>\
         <Default Extension=\"xml\" ContentType=\"application/xml\"/>\
         <Override PartName=\"/xl/workbook.xml\" ContentType=\"application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml\"/>\
         <Override PartName=\"/xl/styles.xml\" ContentType=\"application/vnd.openxmlformats-officedocument.spreadsheetml.styles+xml\"/>\
         <Override PartName=\"/xl/sharedStrings.xml\" ContentType=\"application/vnd.openxmlformats-officedocument.spreadsheetml.sharedStrings+xml\"/>",
    );
    for i in 1..=sheet_count {
        xml.push_str(&format!(
            "<Override PartName=\"/xl/worksheets/sheet{i}.xml\" \
             ContentType=\"application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml\"/>"
        ));
    }
    xml.push_str("</Types>");
    xml
}

fn generate_rels() -> String {
    "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\
     <Relationships xmlns=\"http://schemas.openxmlformats.org/package/2006/relationships\">\
     <Relationship Id=\"rId1\" \
     Type=\"http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument\" \
     Target=\"xl/workbook.xml\"/>\
     </Relationships>"
        .to_string()
}

fn generate_workbook_rels(sheet_count: usize) -> String {
    let mut xml = String::from(
        "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\
         <Relationships xmlns=\"http://schemas.openxmlformats.org/package/2006/relationships\">",
    );
    for i in 1..=sheet_count {
        xml.push_str(&format!(
            "<Relationship Id=\"rId{i}\" \
             Type=\"http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet\" \
             Target=\"worksheets/sheet{i}.xml\"/>"
        ));
    }
    xml.push_str(&format!(
        "<Relationship Id=\"rId{}\" \
         Type=\"http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles\" \
         Target=\"styles.xml\"/>",
        sheet_count + 1
    ));
    xml.push_str(&format!(
        "<Relationship Id=\"rId{}\" \
         Type=\"http://schemas.openxmlformats.org/officeDocument/2006/relationships/sharedStrings\" \
         Target=\"sharedStrings.xml\"/>",
        sheet_count + 2
    ));
    xml.push_str("</Relationships>");
    xml
}

fn generate_workbook(sheets: &[SheetBuilder]) -> String {
    let mut xml = String::from(
        "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\
         <workbook xmlns=\"http://schemas.openxmlformats.org/spreadsheetml/2006/main\" \
         xmlns:r=\"http://schemas.openxmlformats.org/officeDocument/2006/relationships\">\
         <sheets>",
    );
    for (i, sheet) in sheets.iter().enumerate() {
        xml.push_str(&format!(
            "<sheet name=\"{}\" sheetId=\"{}\" r:id=\"rId{}\"/>",
            xml_escape(&sheet.name),
            i + 1,
            i + 1
        ));
    }
    xml.push_str("</sheets></workbook>");
    xml
}

fn generate_shared_strings(strings: &[String]) -> String {
    let mut xml = format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\
         <sst xmlns=\"http://schemas.openxmlformats.org/spreadsheetml/2006/main\" \
         count=\"{}\" uniqueCount=\"{}\">",
        strings.len(),
        strings.len()
    );
    for s in strings {
        xml.push_str(&format!("<si><t>{}</t></si>", xml_escape(s)));
    }
    xml.push_str("</sst>");
    xml
}

fn generate_sheet_xml(
    sheet: &SheetBuilder,
    shared_strings: &[String],
    styles: &StylesCollector,
) -> String {
    let mut xml = String::from(
        "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\
         <worksheet xmlns=\"http://schemas.openxmlformats.org/spreadsheetml/2006/main\">\
         <sheetData>",
    );

    // Group cells by row (1-indexed row number from the ref)
    let mut by_row: Vec<(u32, Vec<&CellEntry>)> = Vec::new();
    for cell in &sheet.cells {
        let row_num: u32 = cell
            .cell_ref
            .chars()
            .skip_while(|c| c.is_ascii_alphabetic())
            .collect::<String>()
            .parse()
            .expect("bad cell ref in fixture");
        match by_row.iter_mut().find(|(r, _)| *r == row_num) {
            Some((_, cells)) => cells.push(cell),
            None => by_row.push((row_num, vec![cell])),
        }
    }
    by_row.sort_by_key(|(r, _)| *r);

    for (row_num, cells) in &by_row {
        xml.push_str(&format!("<row r=\"{row_num}\">"));
        for cell in cells {
            let style_attr = cell
                .style
                .as_ref()
                .and_then(|s| styles.xf_index(s))
                .map(|i| format!(" s=\"{i}\""))
                .unwrap_or_default();

            match &cell.value {
                CellValue::Empty => {
                    xml.push_str(&format!("<c r=\"{}\"{}/>", cell.cell_ref, style_attr));
                }
                CellValue::String(s) => {
                    let idx = shared_strings
                        .iter()
                        .position(|ss| ss == s)
                        .expect("string not collected");
                    xml.push_str(&format!(
                        "<c r=\"{}\"{} t=\"s\"><v>{idx}</v></c>",
                        cell.cell_ref, style_attr
                    ));
                }
                CellValue::Number(n) => {
                    xml.push_str(&format!(
                        "<c r=\"{}\"{}><v>{n}</v></c>",
                        cell.cell_ref, style_attr
                    ));
                }
                CellValue::Boolean(b) => {
                    xml.push_str(&format!(
                        "<c r=\"{}\"{} t=\"b\"><v>{}</v></c>",
                        cell.cell_ref,
                        style_attr,
                        if *b { 1 } else { 0 }
                    ));
                }
            }
        }
        xml.push_str("</row>");
    }

    xml.push_str("</sheetData>");

    if !sheet.merges.is_empty() {
        xml.push_str(&format!("<mergeCells count=\"{}\">", sheet.merges.len()));
        for merge in &sheet.merges {
            xml.push_str(&format!("<mergeCell ref=\"{merge}\"/>"));
        }
        xml.push_str("</mergeCells>");
    }

    xml.push_str("</worksheet>");
    xml
}
