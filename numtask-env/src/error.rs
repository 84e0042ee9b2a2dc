//! Errors in number-task environments.
use thiserror::Error;

/// Errors in number-task environments.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum NumTaskError {
    /// The task name is not one of `color`, `magnitude`, `parity`.
    #[error("Invalid task: {0}")]
    InvalidTask(String),

    /// Placement tried to put a second object into an occupied cell.
    #[error("Slot ({x}, {y}) is already occupied")]
    SlotCollision {
        /// Column of the cell.
        x: usize,
        /// Row of the cell.
        y: usize,
    },

    /// The palette index does not name an arena color.
    #[error("Invalid color index: {0}")]
    InvalidColorIndex(usize),

    /// The configuration cannot produce a valid layout.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// No preset with the given name.
    #[error("Unknown preset: {0}")]
    UnknownPreset(String),
}
