//! Data types for the XLSX tab viewer.

mod cell;
mod grid;
mod workbook;

pub use cell::*;
pub use grid::*;
pub use workbook::*;
