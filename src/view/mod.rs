//! View adapter: render grids to HTML table markup.
//!
//! One `<tr>` per display row; Suppressed positions are skipped entirely;
//! rendering them, even empty, would duplicate the merged block. Spans are
//! emitted only when greater than 1. The three style fields are always
//! present on a visible cell, so the style attribute is built without null
//! checks.

use crate::types::{CellStyle, DisplayCell, RenderGrid};

/// Escape text for HTML element and attribute content.
pub fn html_escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Inline style attribute value for a normalized cell style.
fn style_attr(style: &CellStyle) -> String {
    format!(
        "background-color:{};font-size:{};font-weight:{}",
        style.background, style.font_size, style.font_weight
    )
}

/// Render one grid as an HTML table.
pub fn grid_to_html(grid: &RenderGrid) -> String {
    let mut out = String::new();
    out.push_str("<table class=\"xltab-sheet\"><tbody>");

    for row in &grid.rows {
        out.push_str("<tr>");
        for cell in row {
            let DisplayCell::Visible(cell) = cell else {
                continue;
            };
            out.push_str("<td");
            if cell.row_span > 1 {
                out.push_str(&format!(" rowspan=\"{}\"", cell.row_span));
            }
            if cell.col_span > 1 {
                out.push_str(&format!(" colspan=\"{}\"", cell.col_span));
            }
            out.push_str(&format!(" style=\"{}\">", style_attr(&cell.style)));
            out.push_str(&html_escape(&cell.value.display()));
            out.push_str("</td>");
        }
        out.push_str("</tr>");
    }

    out.push_str("</tbody></table>");
    out
}

/// Render the tab bar for a list of sheet names.
pub fn tab_bar_html(names: &[&str], active: usize) -> String {
    let mut out = String::new();
    out.push_str("<nav class=\"xltab-tabs\">");
    for (i, name) in names.iter().enumerate() {
        let class = if i == active {
            "xltab-tab active"
        } else {
            "xltab-tab"
        };
        out.push_str(&format!(
            "<button class=\"{class}\" data-sheet=\"{i}\">{}</button>",
            html_escape(name)
        ));
    }
    out.push_str("</nav>");
    out
}

/// Render the full viewer body: tab bar plus one table per sheet, with
/// only the active sheet shown.
pub fn viewer_html(grids: &[RenderGrid], active: usize) -> String {
    let names: Vec<&str> = grids.iter().map(|grid| grid.name.as_str()).collect();
    let mut out = String::new();
    out.push_str(&tab_bar_html(&names, active));
    for (i, grid) in grids.iter().enumerate() {
        let display = if i == active {
            ""
        } else {
            " style=\"display:none\""
        };
        out.push_str(&format!("<section class=\"xltab-panel\"{display}>"));
        out.push_str(&grid_to_html(grid));
        out.push_str("</section>");
    }
    out
}

/// Render a standalone HTML document, used by the CLI.
pub fn document_html(grids: &[RenderGrid], active: usize) -> String {
    let mut out = String::new();
    out.push_str(
        "<!DOCTYPE html><html><head><meta charset=\"utf-8\"><title>xltab</title><style>\
         .xltab-sheet{border-collapse:collapse}\
         .xltab-sheet td{border:1px solid #d0d0d0;padding:2px 8px}\
         .xltab-tabs{margin-bottom:8px}\
         .xltab-tab.active{font-weight:bold}\
         </style></head><body>",
    );
    out.push_str(&viewer_html(grids, active));
    out.push_str("</body></html>");
    out
}
