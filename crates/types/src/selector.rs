//! Vocabulary shared by the time selector core and its collaborators.

use crate::time::{ClockTime, HOURS_PER_DAY, MINUTES_PER_HOUR};

/// One of the two independently scrollable lists.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Column {
    #[default]
    Hours,
    Minutes,
}

impl Column {
    /// Number of cells in the column.
    pub const fn cell_count(self) -> u8 {
        match self {
            Column::Hours => HOURS_PER_DAY,
            Column::Minutes => MINUTES_PER_HOUR,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Column::Hours => "Hours",
            Column::Minutes => "Minutes",
        }
    }
}

/// The closed set of keys the selector core reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavKey {
    Up,
    Down,
    Left,
    Right,
    Enter,
}

/// Where a revealed cell should land inside its viewport.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ScrollAlignment {
    /// Scroll the least amount that makes the cell visible.
    #[default]
    Nearest,
    /// Place the cell in the middle of the viewport.
    Center,
}

/// A request to bring one cell of a column into view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisibilityRequest {
    pub column: Column,
    pub index: u8,
    pub alignment: ScrollAlignment,
}

impl VisibilityRequest {
    pub const fn nearest(column: Column, index: u8) -> Self {
        Self {
            column,
            index,
            alignment: ScrollAlignment::Nearest,
        }
    }

    pub const fn center(column: Column, index: u8) -> Self {
        Self {
            column,
            index,
            alignment: ScrollAlignment::Center,
        }
    }
}

/// Side effects produced by a selector transition.
///
/// The core never performs these itself; the owning component routes them to
/// the caller (value changes) or to the list renderer (reveals).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectorEffect {
    /// A new committed value for the caller.
    ValueChanged(Option<ClockTime>),
    /// Reveal a cell now, e.g. after a navigation step.
    Reveal(VisibilityRequest),
    /// Reveal cells once the freshly opened panel has been laid out.
    ///
    /// Only honoured while `generation` still identifies the current open.
    DeferReveal {
        generation: u64,
        requests: Vec<VisibilityRequest>,
    },
    PanelOpened,
    PanelClosed,
}
