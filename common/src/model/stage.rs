use serde::{Deserialize, Serialize};

/// Number of stages in the GeM bid lifecycle.
pub const STAGE_COUNT: u8 = 14;

/// One step of the bid lifecycle, as published by the stage registry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stage {
    pub stage_number: u8,
    pub stage_name: String,
    pub description: String,
    /// Keys into the field configuration registry, in display order.
    pub field_keys: Vec<String>,
    pub checklist: Vec<String>,
    /// Where the stage lives on the GeM portal, e.g. `Bid > Q&A Tab`.
    pub portal_section: String,
}

/// How the lifecycle list is laid out in the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    #[default]
    Kanban,
    List,
    Timeline,
}

impl ViewMode {
    pub const ALL: [ViewMode; 3] = [ViewMode::Kanban, ViewMode::List, ViewMode::Timeline];

    pub fn label(self) -> &'static str {
        match self {
            ViewMode::Kanban => "Kanban",
            ViewMode::List => "List",
            ViewMode::Timeline => "Timeline",
        }
    }
}
