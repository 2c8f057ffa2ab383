use std::collections::BTreeSet;

use common::model::progress::{effective_progress, StageProgress, StageStatus};
use gloo_timers::callback::Interval;
use yew::prelude::*;

pub struct GemBidStagesComponent {
    /// Recorded progress as last fetched. Stages without an entry are shown
    /// through [`effective_progress`].
    pub progress: Vec<StageProgress>,
    pub loaded: bool,
    /// Stages expanded in the list view.
    pub expanded: BTreeSet<u8>,
    /// Stage being edited in the update dialog.
    pub selected_stage: Option<u8>,
    pub dialog_status: StageStatus,
    pub notes: String,
    pub dialog_ref: NodeRef,
    /// Refetches progress every few seconds; dropped with the component.
    pub poller: Option<Interval>,
}

impl GemBidStagesComponent {
    pub fn new() -> Self {
        Self {
            progress: Vec::new(),
            loaded: false,
            expanded: BTreeSet::new(),
            selected_stage: None,
            dialog_status: StageStatus::Pending,
            notes: String::new(),
            dialog_ref: NodeRef::default(),
            poller: None,
        }
    }

    pub fn progress_of(&self, stage_number: u8, current_stage: u8) -> StageProgress {
        effective_progress(stage_number, &self.progress, current_stage)
    }

    /// Takes progress fetched for `origin` when that is still the `current`
    /// bid. Returns whether anything changed.
    pub fn accept_progress(&mut self, current: i64, origin: i64, progress: Vec<StageProgress>) -> bool {
        if origin != current || self.progress == progress {
            return false;
        }
        self.progress = progress;
        true
    }

    /// Replaces the recorded entry for the stage, or adds it.
    pub fn record(&mut self, progress: StageProgress) {
        match self
            .progress
            .iter_mut()
            .find(|p| p.stage_number == progress.stage_number)
        {
            Some(existing) => *existing = progress,
            None => {
                self.progress.push(progress);
                self.progress.sort_by_key(|p| p.stage_number);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(stage_number: u8, status: StageStatus) -> StageProgress {
        StageProgress {
            stage_number,
            status,
            started_at: None,
            completed_at: None,
            notes: None,
            assigned_to: None,
            checklist: Default::default(),
        }
    }

    #[test]
    fn progress_for_a_previous_bid_is_dropped() {
        let mut component = GemBidStagesComponent::new();
        assert!(component.accept_progress(2, 2, vec![entry(1, StageStatus::Completed)]));

        // A poll sent before switching to bid 2 answers late.
        let stale = vec![entry(1, StageStatus::Pending), entry(2, StageStatus::InProgress)];
        assert!(!component.accept_progress(2, 1, stale));
        assert_eq!(component.progress, vec![entry(1, StageStatus::Completed)]);
    }

    #[test]
    fn unchanged_progress_skips_the_rerender() {
        let mut component = GemBidStagesComponent::new();
        let progress = vec![entry(3, StageStatus::InProgress)];
        assert!(component.accept_progress(7, 7, progress.clone()));
        assert!(!component.accept_progress(7, 7, progress));
    }

    #[test]
    fn recording_keeps_entries_ordered() {
        let mut component = GemBidStagesComponent::new();
        component.record(entry(4, StageStatus::InProgress));
        component.record(entry(2, StageStatus::Completed));
        component.record(entry(4, StageStatus::Completed));
        let stages: Vec<_> = component.progress.iter().map(|p| (p.stage_number, p.status)).collect();
        assert_eq!(stages, vec![(2, StageStatus::Completed), (4, StageStatus::Completed)]);
    }
}
