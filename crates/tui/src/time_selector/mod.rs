//! Dual-column time selector core.
//!
//! [`TimeSelectorState`] is the state machine; [`EnsureVisible`] and
//! [`PendingReveal`] describe how it asks a renderer to scroll cells into view.

mod state;
mod visibility;

pub use state::{CellView, NavigationState, SelectorConfig, TimeSelectorState, ValueMode};
pub use visibility::{EnsureVisible, PendingReveal};
