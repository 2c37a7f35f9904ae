//! UI components: the time picker and the shared component trait.

pub mod component;
pub mod time_picker;

pub use component::*;
pub use time_picker::TimePickerComponent;
