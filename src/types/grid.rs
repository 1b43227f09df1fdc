use serde::{Deserialize, Serialize};

use super::CellValue;

/// The normalizer's output for one sheet: a rectangular matrix of display
/// cells with the same row/column extents as the source sheet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderGrid {
    pub name: String,
    pub rows: Vec<Vec<DisplayCell>>,
}

impl RenderGrid {
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// The display cell at (row, col), if in bounds.
    pub fn cell(&self, row: usize, col: usize) -> Option<&DisplayCell> {
        self.rows.get(row)?.get(col)
    }
}

/// One grid position: either renders content or is covered by another
/// cell's span and must be skipped by the view layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "kind")]
pub enum DisplayCell {
    Visible(VisibleCell),
    Suppressed,
}

impl DisplayCell {
    pub fn is_suppressed(&self) -> bool {
        matches!(self, Self::Suppressed)
    }

    pub fn as_visible(&self) -> Option<&VisibleCell> {
        match self {
            Self::Visible(cell) => Some(cell),
            Self::Suppressed => None,
        }
    }
}

/// A renderable cell: value, normalized style, and spans (>= 1).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisibleCell {
    pub value: CellValue,
    pub style: CellStyle,
    pub row_span: u32,
    pub col_span: u32,
}

/// Normalized cell style. All three fields are always populated, so the
/// view layer applies them without null checks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CellStyle {
    /// `#RRGGBB` or `"transparent"`
    pub background: String,
    /// `"<n>pt"` or `"inherit"`
    pub font_size: String,
    /// `"bold"` or `"normal"`
    pub font_weight: String,
}

impl Default for CellStyle {
    fn default() -> Self {
        Self {
            background: "transparent".to_string(),
            font_size: "inherit".to_string(),
            font_weight: "normal".to_string(),
        }
    }
}
