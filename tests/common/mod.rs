//! Common test utilities and assertion helpers.
#![allow(
    dead_code,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]

use xltab::grid::normalize;
use xltab::parser::decode;
use xltab::{RenderGrid, Sheet, VisibleCell, Workbook};

/// Decode XLSX bytes, panicking on failure.
#[must_use]
pub fn decode_xlsx(data: &[u8]) -> Workbook {
    decode(data).expect("failed to decode fixture xlsx")
}

/// Decode XLSX bytes and normalize the sheet at `index`.
#[must_use]
pub fn decode_and_normalize(data: &[u8], index: usize) -> RenderGrid {
    let workbook = decode_xlsx(data);
    normalize(
        workbook
            .sheets
            .get(index)
            .expect("sheet index out of range"),
    )
}

/// The sheet at `index`, panicking when absent.
#[must_use]
pub fn sheet_at(workbook: &Workbook, index: usize) -> &Sheet {
    workbook
        .sheets
        .get(index)
        .expect("sheet index out of range")
}

/// The visible cell at (row, col), panicking when out of bounds or suppressed.
#[must_use]
pub fn visible_at(grid: &RenderGrid, row: usize, col: usize) -> &VisibleCell {
    grid.cell(row, col)
        .unwrap_or_else(|| panic!("no cell at ({row},{col})"))
        .as_visible()
        .unwrap_or_else(|| panic!("cell at ({row},{col}) is suppressed"))
}

/// Assert the cell at (row, col) is suppressed.
pub fn assert_suppressed(grid: &RenderGrid, row: usize, col: usize) {
    assert!(
        grid.cell(row, col)
            .unwrap_or_else(|| panic!("no cell at ({row},{col})"))
            .is_suppressed(),
        "cell at ({row},{col}) should be suppressed"
    );
}

/// Assert the cell at (row, col) is visible with the given spans.
pub fn assert_spans(grid: &RenderGrid, row: usize, col: usize, row_span: u32, col_span: u32) {
    let cell = visible_at(grid, row, col);
    assert_eq!(
        cell.row_span, row_span,
        "row span mismatch at ({row},{col})"
    );
    assert_eq!(
        cell.col_span, col_span,
        "col span mismatch at ({row},{col})"
    );
}

/// Assert the visible cell at (row, col) displays the given text.
pub fn assert_display(grid: &RenderGrid, row: usize, col: usize, expected: &str) {
    let cell = visible_at(grid, row, col);
    assert_eq!(
        cell.value.display(),
        expected,
        "display mismatch at ({row},{col})"
    );
}
