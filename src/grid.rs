//! Grid normalization: the transformation from a parsed sheet into a
//! render-ready grid.
//!
//! Combines the sheet's merge-region list with per-cell style attributes to
//! produce a rectangular matrix of display cells annotated with spans,
//! visibility, and normalized style. The view layer renders the result
//! without re-deriving any spreadsheet semantics.
//!
//! Merge geometry comes exclusively from the sheet's region list. Inferring
//! merges from adjacent-cell heuristics cannot express vertical merges and
//! is not done here.

use crate::types::{
    CellStyle, CellValue, DisplayCell, MergeRegion, RawCell, RenderGrid, Sheet, VisibleCell,
};

/// Normalize one sheet into a render grid.
///
/// Pure: same sheet in, same grid out. The grid has exactly the sheet's
/// row/column extents. Every position starts Visible with 1x1 spans; each
/// merge region then promotes its top-left position to the full span and
/// suppresses the rest of its coverage.
pub fn normalize(sheet: &Sheet) -> RenderGrid {
    let width = sheet.col_count();

    let mut rows: Vec<Vec<DisplayCell>> = sheet
        .rows
        .iter()
        .map(|row| {
            (0..width)
                .map(|col| DisplayCell::Visible(visible_from(row.get(col))))
                .collect()
        })
        .collect();

    for region in &sheet.merges {
        let Some(clipped) = clip_region(region, sheet.row_count(), width) else {
            log::warn!(
                "dropping malformed merge region ({},{})..({},{}) on sheet {:?}",
                region.start_row,
                region.start_col,
                region.end_row,
                region.end_col,
                sheet.name
            );
            continue;
        };
        resolve_region(&mut rows, &clipped);
    }

    RenderGrid {
        name: sheet.name.clone(),
        rows,
    }
}

/// Build the initial display cell for a grid position.
///
/// A missing cell (short source row) is synthesized as an empty cell with
/// default style.
fn visible_from(cell: Option<&RawCell>) -> VisibleCell {
    match cell {
        Some(cell) => VisibleCell {
            value: cell.value.clone(),
            style: normalize_style(cell),
            row_span: 1,
            col_span: 1,
        },
        None => VisibleCell {
            value: CellValue::Empty,
            style: CellStyle::default(),
            row_span: 1,
            col_span: 1,
        },
    }
}

/// Map a raw cell's optional attributes to a fully-populated style.
///
/// Total: absent attributes always produce the documented defaults.
pub fn normalize_style(cell: &RawCell) -> CellStyle {
    CellStyle {
        background: cell
            .fill
            .clone()
            .unwrap_or_else(|| "transparent".to_string()),
        font_size: cell
            .font_size
            .map_or_else(|| "inherit".to_string(), format_font_size),
        font_weight: if cell.bold.unwrap_or(false) {
            "bold".to_string()
        } else {
            "normal".to_string()
        },
    }
}

/// CSS length for a font size in points, without a trailing ".0" for
/// integral sizes.
fn format_font_size(size: f64) -> String {
    if size.fract().abs() < f64::EPSILON {
        format!("{size:.0}pt")
    } else {
        format!("{size}pt")
    }
}

/// Clip a merge region to the sheet extents.
///
/// Returns `None` when the region cannot be made valid: inverted bounds
/// (start > end on either axis) or a top-left anchor outside the sheet.
fn clip_region(region: &MergeRegion, row_count: usize, col_count: usize) -> Option<MergeRegion> {
    if region.start_row > region.end_row || region.start_col > region.end_col {
        return None;
    }
    let max_row = u32::try_from(row_count).ok()?.checked_sub(1)?;
    let max_col = u32::try_from(col_count).ok()?.checked_sub(1)?;
    if region.start_row > max_row || region.start_col > max_col {
        return None;
    }
    Some(MergeRegion {
        start_row: region.start_row,
        start_col: region.start_col,
        end_row: region.end_row.min(max_row),
        end_col: region.end_col.min(max_col),
    })
}

/// Apply one clipped region: full spans at the anchor, Suppressed elsewhere.
///
/// A degenerate region (start == end) leaves its anchor a 1x1 Visible cell.
fn resolve_region(rows: &mut [Vec<DisplayCell>], region: &MergeRegion) {
    for r in region.start_row..=region.end_row {
        for c in region.start_col..=region.end_col {
            let Some(slot) = rows
                .get_mut(r as usize)
                .and_then(|row| row.get_mut(c as usize))
            else {
                continue;
            };
            if r == region.start_row && c == region.start_col {
                if let DisplayCell::Visible(cell) = slot {
                    cell.row_span = region.height();
                    cell.col_span = region.width();
                }
            } else {
                *slot = DisplayCell::Suppressed;
            }
        }
    }
}
