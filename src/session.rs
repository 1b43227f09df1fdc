//! Single-slot view session.
//!
//! Owns at most one workbook and its derived render grids at a time. A new
//! load replaces the slot wholesale; there is no incremental update. When
//! decoding is asynchronous, completions are guarded by a generation
//! ticket so that a load finishing out of order cannot clobber a newer
//! one (last-file-wins).

use crate::error::Result;
use crate::grid::normalize;
use crate::parser::decode;
use crate::types::{RenderGrid, Workbook};

/// A workbook together with the grids derived from it.
#[derive(Debug)]
pub struct LoadedFile {
    pub workbook: Workbook,
    pub grids: Vec<RenderGrid>,
}

/// Ticket identifying one load attempt. Only the most recently issued
/// ticket can install a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket(u64);

/// What happened to a finished load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The workbook was normalized and installed.
    Installed,
    /// A newer load began meanwhile; this result was discarded.
    Stale,
    /// Decoding failed; the previous slot contents were kept.
    Failed,
}

/// The view layer's session state.
#[derive(Debug, Default)]
pub struct ViewSession {
    slot: Option<LoadedFile>,
    generation: u64,
}

impl ViewSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin a load attempt, invalidating any load still in flight.
    pub fn begin_load(&mut self) -> LoadTicket {
        self.generation += 1;
        LoadTicket(self.generation)
    }

    /// Complete a load attempt.
    ///
    /// A stale ticket leaves the session untouched. A decode failure also
    /// leaves the session untouched: prior grids remain displayed until a
    /// successful reload. On success the slot is replaced wholesale with
    /// the workbook and its normalized grids.
    pub fn finish_load(&mut self, ticket: LoadTicket, result: Result<Workbook>) -> LoadOutcome {
        if ticket.0 != self.generation {
            log::debug!("discarding stale load (ticket {} < {})", ticket.0, self.generation);
            return LoadOutcome::Stale;
        }

        match result {
            Ok(workbook) => {
                let grids = workbook.sheets.iter().map(normalize).collect();
                self.slot = Some(LoadedFile { workbook, grids });
                LoadOutcome::Installed
            }
            Err(e) => {
                log::warn!("load failed, keeping previous workbook: {e}");
                LoadOutcome::Failed
            }
        }
    }

    /// Decode and install in one synchronous step.
    pub fn load(&mut self, data: &[u8]) -> LoadOutcome {
        let ticket = self.begin_load();
        self.finish_load(ticket, decode(data))
    }

    /// The current workbook and grids, if a file is loaded.
    pub fn current(&self) -> Option<&LoadedFile> {
        self.slot.as_ref()
    }

    /// The render grids of the current file, one per sheet.
    pub fn grids(&self) -> &[RenderGrid] {
        match &self.slot {
            Some(file) => &file.grids,
            None => &[],
        }
    }

    /// Tab labels, in sheet order.
    pub fn sheet_names(&self) -> Vec<&str> {
        self.grids().iter().map(|grid| grid.name.as_str()).collect()
    }

    /// Drop the current file, if any.
    pub fn clear(&mut self) {
        self.slot = None;
        self.generation += 1;
    }
}
