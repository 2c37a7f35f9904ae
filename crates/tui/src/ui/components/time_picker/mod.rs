//! Time picker trigger, panel and column viewports.

mod time_picker_component;
mod viewport;

pub use time_picker_component::{TimePickerComponent, TimePickerLayout};
pub use viewport::{ColumnViewport, ColumnViewports};
