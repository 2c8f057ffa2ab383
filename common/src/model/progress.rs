use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::model::stage::{STAGE_COUNT, Stage};

/// Lifecycle state of one stage of one bid.
///
/// `Pending -> InProgress -> Completed`, with `Skipped` reachable from any
/// state that is not `Completed`. Completion is additionally guarded by the
/// stage form reaching 100%; nothing else is enforced, so a completed stage
/// may be reopened by starting it again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StageStatus {
    #[default]
    Pending,
    InProgress,
    Completed,
    Skipped,
}

impl StageStatus {
    /// Kanban column order.
    pub const ALL: [StageStatus; 4] = [
        StageStatus::Pending,
        StageStatus::InProgress,
        StageStatus::Completed,
        StageStatus::Skipped,
    ];

    pub fn label(self) -> &'static str {
        match self {
            StageStatus::Pending => "Pending",
            StageStatus::InProgress => "In Progress",
            StageStatus::Completed => "Completed",
            StageStatus::Skipped => "Skipped",
        }
    }

    /// Wire name, also used as a CSS modifier.
    pub fn as_str(self) -> &'static str {
        match self {
            StageStatus::Pending => "pending",
            StageStatus::InProgress => "in_progress",
            StageStatus::Completed => "completed",
            StageStatus::Skipped => "skipped",
        }
    }

    pub fn is_terminal(self) -> bool {
        self == StageStatus::Completed
    }
}

/// The three status buttons offered on a stage form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusAction {
    Start,
    Complete,
    Skip,
}

impl StatusAction {
    pub const ALL: [StatusAction; 3] = [StatusAction::Start, StatusAction::Complete, StatusAction::Skip];

    pub fn target(self) -> StageStatus {
        match self {
            StatusAction::Start => StageStatus::InProgress,
            StatusAction::Complete => StageStatus::Completed,
            StatusAction::Skip => StageStatus::Skipped,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            StatusAction::Start => "Start",
            StatusAction::Complete => "Complete",
            StatusAction::Skip => "Skip",
        }
    }

    /// Whether the action may be taken from `current` with the stage form at
    /// `completion` percent.
    pub fn is_enabled(self, current: StageStatus, completion: f64) -> bool {
        match self {
            StatusAction::Start => true,
            StatusAction::Complete => completion >= 100.0,
            StatusAction::Skip => !current.is_terminal(),
        }
    }
}

/// Recorded progress of one stage of one bid.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StageProgress {
    pub stage_number: u8,
    pub status: StageStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub started_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_to: Option<i64>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub checklist: BTreeMap<String, bool>,
}

impl StageProgress {
    pub fn new(stage_number: u8, status: StageStatus) -> Self {
        Self {
            stage_number,
            status,
            ..Default::default()
        }
    }

    /// Applies a status change, stamping `started_at` when work begins and
    /// `completed_at` when the stage enters `Completed`. Re-applying the
    /// current status keeps the existing stamps.
    pub fn apply_status(&mut self, status: StageStatus, now: DateTime<Utc>) {
        match status {
            StageStatus::InProgress if self.started_at.is_none() => self.started_at = Some(now),
            StageStatus::Completed
                if self.status != StageStatus::Completed || self.completed_at.is_none() =>
            {
                self.started_at.get_or_insert(now);
                self.completed_at = Some(now);
            }
            _ => {}
        }
        if status != StageStatus::Completed {
            self.completed_at = None;
        }
        self.status = status;
    }
}

/// Progress shown for `stage`: the recorded entry if there is one, otherwise
/// `Completed` for stages up to the bid's current stage and `Pending` after it.
pub fn effective_progress(
    stage_number: u8,
    recorded: &[StageProgress],
    current_stage: u8,
) -> StageProgress {
    recorded
        .iter()
        .find(|p| p.stage_number == stage_number)
        .cloned()
        .unwrap_or_else(|| {
            let status = if stage_number <= current_stage {
                StageStatus::Completed
            } else {
                StageStatus::Pending
            };
            StageProgress::new(stage_number, status)
        })
}

/// Groups `stages` into kanban columns, in [`StageStatus::ALL`] order.
pub fn stages_by_status<'a>(
    stages: &'a [Stage],
    recorded: &[StageProgress],
    current_stage: u8,
) -> Vec<(StageStatus, Vec<&'a Stage>)> {
    StageStatus::ALL
        .iter()
        .map(|&status| {
            let column = stages
                .iter()
                .filter(|stage| {
                    effective_progress(stage.stage_number, recorded, current_stage).status == status
                })
                .collect();
            (status, column)
        })
        .collect()
}

/// Share of the lifecycle whose recorded status is `Completed`.
pub fn overall_percent(recorded: &[StageProgress]) -> f64 {
    let completed = recorded
        .iter()
        .filter(|p| p.status == StageStatus::Completed)
        .count();
    completed as f64 / f64::from(STAGE_COUNT) * 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::stages::all_stages;
    use chrono::TimeZone;

    fn at(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, hour, 0, 0).unwrap()
    }

    #[test]
    fn status_serializes_snake_case() {
        assert_eq!(
            serde_json::to_string(&StageStatus::InProgress).unwrap(),
            "\"in_progress\""
        );
    }

    #[test]
    fn complete_is_disabled_below_full_completion() {
        for status in StageStatus::ALL {
            assert!(!StatusAction::Complete.is_enabled(status, 99.9));
            assert!(!StatusAction::Complete.is_enabled(status, 0.0));
            assert!(StatusAction::Complete.is_enabled(status, 100.0));
        }
    }

    #[test]
    fn skip_is_unavailable_once_completed() {
        assert!(StatusAction::Skip.is_enabled(StageStatus::Pending, 0.0));
        assert!(StatusAction::Skip.is_enabled(StageStatus::InProgress, 50.0));
        assert!(!StatusAction::Skip.is_enabled(StageStatus::Completed, 100.0));
        assert!(StatusAction::Start.is_enabled(StageStatus::Completed, 100.0));
    }

    #[test]
    fn applying_status_stamps_timestamps() {
        let mut progress = StageProgress::new(3, StageStatus::Pending);
        progress.apply_status(StageStatus::InProgress, at(9));
        assert_eq!(progress.started_at, Some(at(9)));
        assert_eq!(progress.completed_at, None);

        progress.apply_status(StageStatus::Completed, at(11));
        assert_eq!(progress.started_at, Some(at(9)));
        assert_eq!(progress.completed_at, Some(at(11)));

        progress.apply_status(StageStatus::InProgress, at(12));
        assert_eq!(progress.started_at, Some(at(9)));
        assert_eq!(progress.completed_at, None);
    }

    #[test]
    fn resending_completed_keeps_the_completion_time() {
        let mut progress = StageProgress::new(4, StageStatus::InProgress);
        progress.apply_status(StageStatus::Completed, at(10));
        progress.apply_status(StageStatus::Completed, at(15));
        assert_eq!(progress.completed_at, Some(at(10)));
        assert_eq!(progress.started_at, Some(at(10)));
        assert_eq!(progress.status, StageStatus::Completed);
    }

    #[test]
    fn missing_progress_defaults_from_current_stage() {
        let recorded = vec![StageProgress::new(2, StageStatus::Skipped)];
        assert_eq!(effective_progress(1, &recorded, 3).status, StageStatus::Completed);
        assert_eq!(effective_progress(2, &recorded, 3).status, StageStatus::Skipped);
        assert_eq!(effective_progress(4, &recorded, 3).status, StageStatus::Pending);
    }

    #[test]
    fn kanban_columns_partition_all_stages() {
        let stages = all_stages();
        let recorded = vec![StageProgress::new(5, StageStatus::InProgress)];
        let columns = stages_by_status(stages, &recorded, 4);
        let sizes: Vec<usize> = columns.iter().map(|(_, c)| c.len()).collect();
        assert_eq!(sizes, vec![9, 1, 4, 0]);
    }

    #[test]
    fn overall_percent_counts_completed_only() {
        let recorded = vec![
            StageProgress::new(1, StageStatus::Completed),
            StageProgress::new(2, StageStatus::Completed),
            StageProgress::new(3, StageStatus::Skipped),
        ];
        let expected = 2.0 / 14.0 * 100.0;
        assert!((overall_percent(&recorded) - expected).abs() < 1e-9);
        assert_eq!(overall_percent(&[]), 0.0);
    }
}
