//! Scroll-into-view capability and the deferred reveal slot used on open.

use clockpick_types::{Column, ScrollAlignment, VisibilityRequest};

/// Capability offered by whatever renders the two columns.
pub trait EnsureVisible {
    fn ensure_visible(&mut self, column: Column, index: u8, alignment: ScrollAlignment);

    fn apply(&mut self, request: VisibilityRequest) {
        self.ensure_visible(request.column, request.index, request.alignment);
    }
}

/// Holds at most one batch of reveals waiting for the panel to be laid out.
///
/// Scheduling replaces whatever was pending, so a rapid close/reopen can never
/// replay the reveal of an earlier open.
#[derive(Debug, Clone, Default)]
pub struct PendingReveal {
    slot: Option<(u64, Vec<VisibilityRequest>)>,
}

impl PendingReveal {
    pub fn schedule(&mut self, generation: u64, requests: Vec<VisibilityRequest>) {
        self.slot = Some((generation, requests));
    }

    pub fn cancel(&mut self) {
        self.slot = None;
    }

    /// Takes the batch if it belongs to `generation`.
    ///
    /// A batch from another generation is stale and dropped.
    pub fn take_due(&mut self, generation: u64) -> Option<Vec<VisibilityRequest>> {
        match self.slot.take() {
            Some((scheduled, requests)) if scheduled == generation => Some(requests),
            Some((scheduled, _)) => {
                tracing::debug!(scheduled, generation, "dropping stale reveal");
                None
            }
            None => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder(Vec<(Column, u8, ScrollAlignment)>);

    impl EnsureVisible for Recorder {
        fn ensure_visible(&mut self, column: Column, index: u8, alignment: ScrollAlignment) {
            self.0.push((column, index, alignment));
        }
    }

    #[test]
    fn apply_forwards_request_fields() {
        let mut recorder = Recorder::default();
        recorder.apply(VisibilityRequest::center(Column::Minutes, 42));
        assert_eq!(recorder.0, vec![(Column::Minutes, 42, ScrollAlignment::Center)]);
    }

    #[test]
    fn newer_schedule_supersedes_older_one() {
        let mut pending = PendingReveal::default();
        pending.schedule(1, vec![VisibilityRequest::center(Column::Hours, 3)]);
        pending.schedule(2, vec![VisibilityRequest::center(Column::Hours, 9)]);
        assert_eq!(pending.take_due(1), None);
        assert_eq!(pending.take_due(2), None);
    }

    #[test]
    fn due_batch_is_taken_once() {
        let mut pending = PendingReveal::default();
        pending.schedule(4, vec![VisibilityRequest::nearest(Column::Minutes, 7)]);
        assert_eq!(pending.take_due(4), Some(vec![VisibilityRequest::nearest(Column::Minutes, 7)]));
        assert_eq!(pending.take_due(4), None);
    }

    #[test]
    fn cancel_drops_pending_batch() {
        let mut pending = PendingReveal::default();
        pending.schedule(1, vec![VisibilityRequest::center(Column::Hours, 0)]);
        pending.cancel();
        assert_eq!(pending.take_due(1), None);
    }
}
