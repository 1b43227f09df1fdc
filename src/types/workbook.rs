use serde::{Deserialize, Serialize};

use super::RawCell;

/// A complete parsed workbook.
///
/// Immutable once produced; replaced wholesale when a new file is loaded.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Workbook {
    pub sheets: Vec<Sheet>,
}

/// A single worksheet: dense rows plus merge metadata.
///
/// Rows are rectangular: the parser pads every row to the sheet's widest
/// row with empty cells. The name is used as the tab label.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sheet {
    pub name: String,
    pub rows: Vec<Vec<RawCell>>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub merges: Vec<MergeRegion>,
}

impl Sheet {
    /// Number of rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Width of the widest row.
    ///
    /// Parser output is rectangular, so this is every row's width; the
    /// normalizer still derives it defensively from the maximum.
    pub fn col_count(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }
}

/// A rectangular block of cells that renders as one visual cell.
///
/// Bounds are inclusive and 0-indexed; `start <= end` on both axes for a
/// well-formed region. Regions within a sheet are disjoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MergeRegion {
    pub start_row: u32,
    pub start_col: u32,
    pub end_row: u32,
    pub end_col: u32,
}

impl MergeRegion {
    /// Number of rows covered.
    pub fn height(&self) -> u32 {
        self.end_row.saturating_sub(self.start_row) + 1
    }

    /// Number of columns covered.
    pub fn width(&self) -> u32 {
        self.end_col.saturating_sub(self.start_col) + 1
    }
}
