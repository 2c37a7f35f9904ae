//! Selection and navigation state machine for the dual-column time selector.
//!
//! The state owns the committed value (in uncontrolled mode) and the transient
//! cursor that exists only while the panel is open. Every transition returns
//! the [`SelectorEffect`]s it produced; nothing here touches a terminal.

use clockpick_types::{ClockTime, Column, MINUTES_PER_HOUR, MinimumTime, NavKey, SelectorEffect, VisibilityRequest};
use tracing::{debug, warn};

/// Who owns the committed value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ValueMode {
    /// The caller owns the value and feeds it back through
    /// [`TimeSelectorState::set_value`] after each change notification.
    #[default]
    Controlled,
    /// The selector stores committed values itself.
    Uncontrolled,
}

/// Static configuration of a selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectorConfig {
    pub minimum: MinimumTime,
    pub close_on_commit: bool,
    pub mode: ValueMode,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            minimum: MinimumTime::default(),
            close_on_commit: true,
            mode: ValueMode::default(),
        }
    }
}

/// Cursor position while the panel is open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavigationState {
    focused_hour: u8,
    focused_minute: u8,
    active_column: Column,
}

impl NavigationState {
    pub const fn focused_hour(&self) -> u8 {
        self.focused_hour
    }

    pub const fn focused_minute(&self) -> u8 {
        self.focused_minute
    }

    pub const fn active_column(&self) -> Column {
        self.active_column
    }

    /// Focused index inside `column`.
    pub const fn focused_index(&self, column: Column) -> u8 {
        match column {
            Column::Hours => self.focused_hour,
            Column::Minutes => self.focused_minute,
        }
    }
}

/// Render-ready description of one cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellView {
    pub value: u8,
    pub disabled: bool,
    pub focused: bool,
    pub selected: bool,
}

impl CellView {
    /// Two-digit label shown in the list.
    pub fn label(&self) -> String {
        format!("{:02}", self.value)
    }
}

/// The time selector core.
#[derive(Debug, Clone, Default)]
pub struct TimeSelectorState {
    config: SelectorConfig,
    value: Option<ClockTime>,
    /// `Some` exactly while the panel is open.
    navigation: Option<NavigationState>,
    generation: u64,
}

impl TimeSelectorState {
    pub fn new(config: SelectorConfig, value: Option<ClockTime>) -> Self {
        Self {
            config,
            value,
            navigation: None,
            generation: 0,
        }
    }

    pub fn config(&self) -> &SelectorConfig {
        &self.config
    }

    pub fn minimum(&self) -> MinimumTime {
        self.config.minimum
    }

    /// Currently committed value.
    pub fn value(&self) -> Option<ClockTime> {
        self.value
    }

    /// Synchronises the value owned by the caller.
    pub fn set_value(&mut self, value: Option<ClockTime>) {
        self.value = value;
    }

    /// Value formatted as `HH:MM`, `None` when unset.
    pub fn formatted_value(&self) -> Option<String> {
        self.value.map(|value| value.to_string())
    }

    pub fn is_open(&self) -> bool {
        self.navigation.is_some()
    }

    pub fn navigation(&self) -> Option<&NavigationState> {
        self.navigation.as_ref()
    }

    /// Counter bumped by every open; tags deferred reveals.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_hour_disabled(&self, hour: u8) -> bool {
        self.config.minimum.is_hour_disabled(hour)
    }

    pub fn is_minute_disabled(&self, hour: u8, minute: u8) -> bool {
        self.config.minimum.is_minute_disabled(hour, minute)
    }

    /// Opens the panel and seeds a fresh cursor from the committed value.
    pub fn open(&mut self) -> Vec<SelectorEffect> {
        if self.is_open() {
            return Vec::new();
        }
        let seed = self.value.unwrap_or(ClockTime::MIDNIGHT);
        let minimum = self.config.minimum;

        let focused_hour = if minimum.is_hour_disabled(seed.hour()) {
            self.first_hour_or_fallback()
        } else {
            seed.hour()
        };
        let seeded_minute = if focused_hour == seed.hour() { seed.minute() } else { 0 };
        let focused_minute = if minimum.is_minute_disabled(focused_hour, seeded_minute) {
            self.first_minute_or_fallback(focused_hour)
        } else {
            seeded_minute
        };

        self.generation = self.generation.wrapping_add(1);
        self.navigation = Some(NavigationState {
            focused_hour,
            focused_minute,
            active_column: Column::Hours,
        });
        debug!(
            generation = self.generation,
            focused_hour, focused_minute, "time selector opened"
        );

        vec![
            SelectorEffect::PanelOpened,
            SelectorEffect::DeferReveal {
                generation: self.generation,
                requests: vec![
                    VisibilityRequest::center(Column::Hours, focused_hour),
                    VisibilityRequest::center(Column::Minutes, focused_minute),
                ],
            },
        ]
    }

    /// Closes the panel and discards the cursor.
    pub fn close(&mut self) -> Vec<SelectorEffect> {
        if self.navigation.take().is_none() {
            return Vec::new();
        }
        debug!(generation = self.generation, "time selector closed");
        vec![SelectorEffect::PanelClosed]
    }

    /// Applies one key of the navigation alphabet. Ignored while closed.
    pub fn handle_key(&mut self, key: NavKey) -> Vec<SelectorEffect> {
        let Some(mut navigation) = self.navigation else {
            return Vec::new();
        };

        match key {
            NavKey::Up | NavKey::Down => {
                let forward = key == NavKey::Down;
                match navigation.active_column {
                    Column::Hours => {
                        navigation.focused_hour = self.step_hour(navigation.focused_hour, forward);
                    }
                    Column::Minutes => {
                        navigation.focused_minute =
                            self.step_minute(navigation.focused_hour, navigation.focused_minute, forward);
                    }
                }
            }
            NavKey::Left => navigation.active_column = Column::Hours,
            NavKey::Right => {
                navigation.active_column = Column::Minutes;
                if self.is_minute_disabled(navigation.focused_hour, navigation.focused_minute) {
                    navigation.focused_minute = self.first_minute_or_fallback(navigation.focused_hour);
                }
            }
            NavKey::Enter => {
                let candidate = ClockTime::new(navigation.focused_hour, navigation.focused_minute);
                return candidate.map(|candidate| self.commit(candidate)).unwrap_or_default();
            }
        }

        self.navigation = Some(navigation);
        let column = navigation.active_column;
        vec![SelectorEffect::Reveal(VisibilityRequest::nearest(
            column,
            navigation.focused_index(column),
        ))]
    }

    /// Pointer selection of an hour cell, keeping the committed minute.
    ///
    /// A minute the new hour disables is raised to the first allowed one by
    /// [`commit`](Self::commit).
    pub fn click_hour(&mut self, hour: u8) -> Vec<SelectorEffect> {
        if !self.is_open() {
            return Vec::new();
        }
        let selected = self.selection_or_midnight();
        if self.is_hour_disabled(hour) || self.value.is_some_and(|value| value.hour() == hour) {
            return Vec::new();
        }
        match ClockTime::new(hour, selected.minute()) {
            Some(candidate) => self.commit(candidate),
            None => Vec::new(),
        }
    }

    /// Pointer selection of a minute cell, keeping the committed hour.
    pub fn click_minute(&mut self, minute: u8) -> Vec<SelectorEffect> {
        if !self.is_open() {
            return Vec::new();
        }
        let hour = self.selection_or_midnight().hour();
        if self.is_minute_disabled(hour, minute) || self.value.is_some_and(|value| value.minute() == minute) {
            return Vec::new();
        }
        match ClockTime::new(hour, minute) {
            Some(candidate) => self.commit(candidate),
            None => Vec::new(),
        }
    }

    /// Finalises `candidate` as the new selection.
    ///
    /// A candidate below the bound on the boundary hour is raised to the
    /// minimum minute first. Candidates the bound cannot rescue are dropped.
    pub fn commit(&mut self, candidate: ClockTime) -> Vec<SelectorEffect> {
        let Some(committed) = self.config.minimum.clamp(candidate) else {
            warn!(%candidate, minimum = %self.config.minimum, "rejected commit below the minimum time");
            return Vec::new();
        };

        let mut effects = Vec::with_capacity(3);
        if committed != candidate {
            effects.push(SelectorEffect::Reveal(VisibilityRequest::center(
                Column::Minutes,
                committed.minute(),
            )));
        }
        if self.config.mode == ValueMode::Uncontrolled {
            self.value = Some(committed);
        }
        debug!(%committed, "time selector committed");
        effects.push(SelectorEffect::ValueChanged(Some(committed)));

        if self.config.close_on_commit {
            effects.extend(self.close());
        } else if let Some(navigation) = self.navigation.as_mut() {
            navigation.focused_hour = committed.hour();
            navigation.focused_minute = committed.minute();
        }
        effects
    }

    /// Clears the selection and notifies the caller.
    pub fn clear(&mut self) -> Vec<SelectorEffect> {
        if self.value.is_none() {
            return Vec::new();
        }
        if self.config.mode == ValueMode::Uncontrolled {
            self.value = None;
        }
        vec![SelectorEffect::ValueChanged(None)]
    }

    /// Cells for one column in display order.
    pub fn cells(&self, column: Column) -> Vec<CellView> {
        let active_focus = self
            .navigation
            .filter(|navigation| navigation.active_column == column)
            .map(|navigation| navigation.focused_index(column));
        let context_hour = self.selection_or_midnight().hour();

        (0..column.cell_count())
            .map(|value| {
                let (disabled, selected) = match column {
                    Column::Hours => (
                        self.is_hour_disabled(value),
                        self.value.is_some_and(|time| time.hour() == value),
                    ),
                    Column::Minutes => (
                        self.is_minute_disabled(context_hour, value),
                        self.value.is_some_and(|time| time.minute() == value),
                    ),
                };
                CellView {
                    value,
                    disabled,
                    focused: active_focus == Some(value),
                    selected,
                }
            })
            .collect()
    }

    /// Committed value pointer selection builds on; midnight while unset.
    fn selection_or_midnight(&self) -> ClockTime {
        self.value.unwrap_or(ClockTime::MIDNIGHT)
    }

    fn step_hour(&self, from: u8, forward: bool) -> u8 {
        let fallback = self.first_hour_or_fallback();
        step_wrapping(from, Column::Hours.cell_count(), forward, fallback, |hour| {
            self.is_hour_disabled(hour)
        })
    }

    fn step_minute(&self, hour: u8, from: u8, forward: bool) -> u8 {
        let fallback = self.first_minute_or_fallback(hour);
        step_wrapping(from, Column::Minutes.cell_count(), forward, fallback, |minute| {
            self.is_minute_disabled(hour, minute)
        })
    }

    /// First selectable hour, or the bound itself pinned onto the clock.
    fn first_hour_or_fallback(&self) -> u8 {
        let minimum = self.config.minimum;
        minimum
            .first_allowed_hour()
            .unwrap_or_else(|| minimum.hour().min(Column::Hours.cell_count() - 1))
    }

    fn first_minute_or_fallback(&self, hour: u8) -> u8 {
        let minimum = self.config.minimum;
        minimum.first_allowed_minute(hour).unwrap_or_else(|| {
            if hour == minimum.hour() {
                minimum.minute().min(MINUTES_PER_HOUR - 1)
            } else {
                0
            }
        })
    }
}

/// Moves one step from `from` in a ring of `count` cells, continuing in the
/// same direction past disabled cells. Returns `fallback` when every cell is
/// disabled.
fn step_wrapping(from: u8, count: u8, forward: bool, fallback: u8, is_disabled: impl Fn(u8) -> bool) -> u8 {
    let mut candidate = from % count;
    for _ in 0..count {
        candidate = if forward {
            (candidate + 1) % count
        } else {
            (candidate + count - 1) % count
        };
        if !is_disabled(candidate) {
            return candidate;
        }
    }
    fallback
}
