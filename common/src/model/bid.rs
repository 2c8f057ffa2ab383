use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BidStatus {
    Active,
    #[default]
    Draft,
    Submitted,
    Closed,
    Awarded,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    fn rank(self) -> u8 {
        match self {
            Priority::Low => 1,
            Priority::Medium => 2,
            Priority::High => 3,
        }
    }
}

/// A tracked GeM bid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GemBid {
    pub id: i64,
    /// Autonumber assigned on creation, e.g. `GEM/2025/B/000042`.
    pub bid_no: String,
    pub title: String,
    pub description: String,
    pub organization: String,
    pub category: String,
    pub estimated_value: f64,
    pub deadline: DateTime<Utc>,
    pub status: BidStatus,
    pub location: String,
    pub requirements: Vec<String>,
    pub documents: Vec<String>,
    pub priority: Priority,
    pub tags: Vec<String>,
    pub current_stage: u8,
    pub created_at: DateTime<Utc>,
}

/// Payload for creating or replacing a bid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewGemBid {
    pub title: String,
    pub description: String,
    pub organization: String,
    pub category: String,
    pub estimated_value: f64,
    pub deadline: DateTime<Utc>,
    #[serde(default)]
    pub status: BidStatus,
    pub location: String,
    #[serde(default)]
    pub requirements: Vec<String>,
    #[serde(default)]
    pub documents: Vec<String>,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl NewGemBid {
    /// Checks the fields the bid form marks as required. Returns the problems
    /// found, keyed by field name.
    pub fn problems(&self) -> Vec<(&'static str, &'static str)> {
        let mut problems = Vec::new();
        let required = [
            ("title", &self.title, "Title is required"),
            ("description", &self.description, "Description is required"),
            ("organization", &self.organization, "Organization is required"),
            ("category", &self.category, "Category is required"),
            ("location", &self.location, "Location is required"),
        ];
        for (field, value, message) in required {
            if value.trim().is_empty() {
                problems.push((field, message));
            }
        }
        if self.estimated_value < 0.0 || self.estimated_value.is_nan() {
            problems.push(("estimatedValue", "Value must be positive"));
        }
        problems
    }

    /// Drops blank requirement and tag lines, as the creation form does.
    pub fn trimmed(mut self) -> Self {
        self.requirements.retain(|r| !r.trim().is_empty());
        self.tags.retain(|t| !t.trim().is_empty());
        self
    }
}

/// Autonumber for a newly created bid.
pub fn bid_number(year: i32, id: i64) -> String {
    format!("GEM/{}/B/{:06}", year, id)
}

impl GemBid {
    /// Value of the autonumber field `key` for this bid, or `None` for keys
    /// that are not numbered from the bid.
    pub fn autonumber(&self, key: &str) -> Option<String> {
        match key {
            "bidNo" => Some(self.bid_no.clone()),
            "poNo" => Some(format!("PO/{}/{:06}", self.created_at.year(), self.id)),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    #[default]
    Deadline,
    Title,
    Value,
    Priority,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

/// Filter and sort parameters of the bid listing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BidQuery {
    #[serde(default)]
    pub search: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub status: Option<BidStatus>,
    #[serde(default)]
    pub priority: Option<Priority>,
    #[serde(default)]
    pub sort_by: SortKey,
    #[serde(default)]
    pub sort_order: SortOrder,
}

impl BidQuery {
    pub fn matches(&self, bid: &GemBid) -> bool {
        let matches_search = self.search.as_deref().is_none_or(|term| {
            let term = term.to_lowercase();
            [&bid.title, &bid.organization, &bid.description]
                .iter()
                .any(|text| text.to_lowercase().contains(&term))
        });
        let matches_category = self.category.as_deref().is_none_or(|c| c == "all" || bid.category == c);
        let matches_status = self.status.is_none_or(|s| bid.status == s);
        let matches_priority = self.priority.is_none_or(|p| bid.priority == p);

        matches_search && matches_category && matches_status && matches_priority
    }

    fn compare(&self, a: &GemBid, b: &GemBid) -> Ordering {
        let ordering = match self.sort_by {
            SortKey::Title => a.title.cmp(&b.title),
            SortKey::Deadline => a.deadline.cmp(&b.deadline),
            SortKey::Value => a.estimated_value.total_cmp(&b.estimated_value),
            SortKey::Priority => a.priority.rank().cmp(&b.priority.rank()),
        };
        match self.sort_order {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    }

    /// Filters `bids` and sorts the survivors. The sort is stable.
    pub fn apply(&self, bids: Vec<GemBid>) -> Vec<GemBid> {
        let mut filtered: Vec<GemBid> = bids.into_iter().filter(|bid| self.matches(bid)).collect();
        filtered.sort_by(|a, b| self.compare(a, b));
        filtered
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn bid(id: i64, title: &str, value: f64, priority: Priority, day: u32) -> GemBid {
        GemBid {
            id,
            bid_no: bid_number(2025, id),
            title: title.to_string(),
            description: format!("{} supply", title),
            organization: "Indian Railways".to_string(),
            category: "Supplies".to_string(),
            estimated_value: value,
            deadline: Utc.with_ymd_and_hms(2025, 7, day, 12, 0, 0).unwrap(),
            status: BidStatus::Active,
            location: "Delhi".to_string(),
            requirements: vec![],
            documents: vec![],
            priority,
            tags: vec![],
            current_stage: 1,
            created_at: Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap(),
        }
    }

    #[test]
    fn bid_numbers_are_zero_padded() {
        assert_eq!(bid_number(2025, 42), "GEM/2025/B/000042");
    }

    #[test]
    fn autonumbers_derive_from_the_bid() {
        let bid = bid(42, "Laptops", 10.0, Priority::Low, 3);
        assert_eq!(bid.autonumber("bidNo").as_deref(), Some("GEM/2025/B/000042"));
        assert_eq!(bid.autonumber("poNo").as_deref(), Some("PO/2025/000042"));
        assert_eq!(bid.autonumber("unitRate"), None);
    }

    #[test]
    fn search_is_case_insensitive_across_text_fields() {
        let bids = vec![
            bid(1, "Laptops", 10.0, Priority::Low, 3),
            bid(2, "Cement", 20.0, Priority::High, 2),
        ];
        let query = BidQuery {
            search: Some("CEMENT".into()),
            ..Default::default()
        };
        let found = query.apply(bids);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, 2);
    }

    #[test]
    fn priority_sort_ranks_high_first_when_descending() {
        let bids = vec![
            bid(1, "A", 10.0, Priority::Low, 3),
            bid(2, "B", 20.0, Priority::High, 2),
            bid(3, "C", 30.0, Priority::Medium, 1),
        ];
        let query = BidQuery {
            sort_by: SortKey::Priority,
            sort_order: SortOrder::Desc,
            ..Default::default()
        };
        let ids: Vec<i64> = query.apply(bids).iter().map(|b| b.id).collect();
        assert_eq!(ids, vec![2, 3, 1]);
    }

    #[test]
    fn default_sort_is_by_deadline() {
        let bids = vec![
            bid(1, "A", 10.0, Priority::Low, 3),
            bid(2, "B", 20.0, Priority::High, 2),
            bid(3, "C", 30.0, Priority::Medium, 1),
        ];
        let ids: Vec<i64> = BidQuery::default().apply(bids).iter().map(|b| b.id).collect();
        assert_eq!(ids, vec![3, 2, 1]);
    }

    #[test]
    fn blank_required_fields_are_reported() {
        let new_bid = NewGemBid {
            title: " ".into(),
            description: "d".into(),
            organization: "o".into(),
            category: "c".into(),
            estimated_value: -1.0,
            deadline: Utc.with_ymd_and_hms(2025, 7, 1, 0, 0, 0).unwrap(),
            status: BidStatus::Draft,
            location: "l".into(),
            requirements: vec!["".into(), "ISO 9001".into()],
            documents: vec![],
            priority: Priority::Medium,
            tags: vec![" ".into()],
        };
        let fields: Vec<&str> = new_bid.problems().iter().map(|(f, _)| *f).collect();
        assert_eq!(fields, vec!["title", "estimatedValue"]);

        let trimmed = new_bid.trimmed();
        assert_eq!(trimmed.requirements, vec!["ISO 9001".to_string()]);
        assert!(trimmed.tags.is_empty());
    }
}
