//! Shared types for the clockpick workspace.
//!
//! - [`ClockTime`]: a validated 24-hour hour/minute pair with `HH:MM` formatting.
//! - [`MinimumTime`]: the trusted lower bound and its disabling predicates.
//! - Selector vocabulary ([`Column`], [`NavKey`], [`SelectorEffect`]) and the
//!   application-level [`Msg`]/[`Effect`] pair routed by the terminal runtime.

mod minimum;
mod selector;
mod time;

pub use minimum::MinimumTime;
pub use selector::{Column, NavKey, ScrollAlignment, SelectorEffect, VisibilityRequest};
pub use time::{ClockTime, HOURS_PER_DAY, MINUTES_PER_HOUR, ParseTimeError};

/// Messages delivered to components by the runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// Terminal size changed.
    Resize(u16, u16),
    /// A deferred reveal scheduled by the open with this generation is due.
    RevealDue(u64),
}

/// Effects returned by components for the runtime to execute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Deliver `Msg::RevealDue(generation)` on the next loop turn.
    ScheduleReveal(u64),
    /// The selection was committed; the caller decides what to do with it.
    ValueCommitted(Option<ClockTime>),
    /// Leave the event loop.
    Quit,
}
