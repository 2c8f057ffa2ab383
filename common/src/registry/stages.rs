use std::sync::LazyLock;

use crate::model::field::FieldConfiguration;
use crate::model::stage::{STAGE_COUNT, Stage};
use crate::registry::RegistryError;
use crate::registry::fields;

static GEM_BID_STAGES: LazyLock<Vec<Stage>> = LazyLock::new(build_stages);

fn stage(
    stage_number: u8,
    stage_name: &str,
    description: &str,
    field_keys: &[&str],
    checklist: &[&str],
    portal_section: &str,
) -> Stage {
    Stage {
        stage_number,
        stage_name: stage_name.to_string(),
        description: description.to_string(),
        field_keys: field_keys.iter().map(|k| k.to_string()).collect(),
        checklist: checklist.iter().map(|c| c.to_string()).collect(),
        portal_section: portal_section.to_string(),
    }
}

fn build_stages() -> Vec<Stage> {
    vec![
        stage(
            1,
            "Bid Search",
            "Search and identify relevant bids",
            &["keyword", "category", "buyerName", "location", "bidType", "bidStatus", "bidNo"],
            &["Filters saved?", "Relevant category selected?", "Active bids only?"],
            "GeM > Bids > Search",
        ),
        stage(
            2,
            "Bid Analysis",
            "Analyze bid requirements and criteria",
            &["boqFile", "eligibilityCriteria", "emd", "deliveryTerms", "consigneeDetails"],
            &[
                "Custom/BoQ format verified?",
                "Technical criteria matched?",
                "MSME exemption applicable?",
            ],
            "Bid Details Page",
        ),
        stage(
            3,
            "Pre-Bid Query (Optional)",
            "Submit queries and clarifications",
            &["queryText", "attachment", "submissionTime"],
            &["Q&A window open?", "Question clear and relevant?", "Supporting doc attached?"],
            "Bid > Q&A Tab",
        ),
        stage(
            4,
            "Document Preparation",
            "Prepare all required documents",
            &["techSpecs", "authorizationLetter", "pan", "gst", "experienceProof", "iso", "brochures"],
            &["All docs in PDF?", "Authorization updated?", "File size as per limit?"],
            "Offline",
        ),
        stage(
            5,
            "Technical Bid Submission",
            "Submit technical bid with specifications",
            &["boqCompliance", "specificationMatch", "uploads", "termsAcceptance", "dsc"],
            &["All fields filled?", "Terms accepted?", "DSC working?"],
            "Bid > Participate > Technical",
        ),
        stage(
            6,
            "Financial Bid Submission",
            "Submit financial bid with pricing",
            &["unitRate", "gstRate", "boqFormatUpload", "priceBreakup"],
            &["GST shown separately?", "Correct BoQ used?", "All columns filled?"],
            "Bid > Participate > Financial",
        ),
        stage(
            7,
            "Technical Evaluation (by Buyer)",
            "Await technical evaluation results",
            &["evaluationStatus", "clarificationRequest", "responseTime"],
            &["Clarifications answered?", "Auto alerts monitored?"],
            "Evaluation Tab",
        ),
        stage(
            8,
            "Reverse Auction",
            "Participate in reverse auction",
            &["raWindowTime", "startingPrice", "decrementRange"],
            &["System time correct?", "Token active?", "Internet stable?"],
            "RA Tab",
        ),
        stage(
            9,
            "PO Acceptance",
            "Accept purchase order",
            &["poNo", "acceptanceClick", "commitmentDate", "acknowledgmentUpload"],
            &["Accepted within 10 days?", "Terms agreed?"],
            "PO Tab > Accept",
        ),
        stage(
            10,
            "Dispatch & Delivery",
            "Dispatch and deliver goods/services",
            &["deliveryChallan", "grn", "transportDetails", "photoUpload"],
            &["All items as per specs?", "Delivered on time?"],
            "Offline + GeM PO Tab",
        ),
        stage(
            11,
            "Inspection by Consignee",
            "Await consignee inspection",
            &["inspectionStatus", "inspectionComments"],
            &["Partial/Full rejection managed?", "Response submitted?"],
            "PO Status",
        ),
        stage(
            12,
            "Invoice Upload",
            "Upload invoice for payment",
            &["invoiceNo", "taxBreakup", "poReference", "invoiceUpload"],
            &["GSTIN match?", "PO No. correct?", "Invoice readable?"],
            "Invoice Tab",
        ),
        stage(
            13,
            "Payment Tracking",
            "Track payment status",
            &["paymentStatus", "utrNo", "paymentDate"],
            &["Delay >30 days?", "PFMS error tracked?"],
            "Payment Tab",
        ),
        stage(
            14,
            "Feedback & Performance",
            "Provide and receive feedback",
            &["rating", "feedbackComments", "reviewFiling"],
            &["Rating ≥3 stars?", "Feedback fair?"],
            "Feedback Tab",
        ),
    ]
}

/// The 14 lifecycle stages, ordered by stage number.
pub fn all_stages() -> &'static [Stage] {
    &GEM_BID_STAGES
}

pub fn get_stage(stage_number: u8) -> Result<&'static Stage, RegistryError> {
    if stage_number == 0 || stage_number > STAGE_COUNT {
        return Err(RegistryError::UnknownStage(stage_number));
    }
    GEM_BID_STAGES
        .iter()
        .find(|s| s.stage_number == stage_number)
        .ok_or(RegistryError::UnknownStage(stage_number))
}

/// Field configurations of `stage` in display order. Keys missing from the
/// field registry are skipped.
pub fn resolve_fields(stage: &Stage) -> Vec<&'static FieldConfiguration> {
    stage
        .field_keys
        .iter()
        .filter_map(|key| fields::lookup(key))
        .collect()
}

/// `(stage number, key)` pairs whose key is not in the field registry.
pub fn unresolved_field_keys() -> Vec<(u8, &'static str)> {
    GEM_BID_STAGES
        .iter()
        .flat_map(|stage| {
            stage
                .field_keys
                .iter()
                .filter(|key| fields::lookup(key).is_none())
                .map(move |key| (stage.stage_number, key.as_str()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stages_are_numbered_in_order() {
        let numbers: Vec<u8> = all_stages().iter().map(|s| s.stage_number).collect();
        assert_eq!(numbers, (1..=STAGE_COUNT).collect::<Vec<_>>());
    }

    #[test]
    fn every_stage_field_key_resolves() {
        assert_eq!(unresolved_field_keys(), Vec::<(u8, &str)>::new());
    }

    #[test]
    fn financial_stage_resolves_its_four_fields() {
        let stage = get_stage(6).unwrap();
        assert_eq!(stage.stage_name, "Financial Bid Submission");
        let keys: Vec<&str> = resolve_fields(stage).iter().map(|c| c.key.as_str()).collect();
        assert_eq!(keys, vec!["unitRate", "gstRate", "boqFormatUpload", "priceBreakup"]);
    }

    #[test]
    fn out_of_range_stages_are_rejected() {
        assert_eq!(get_stage(0), Err(RegistryError::UnknownStage(0)));
        assert_eq!(get_stage(15), Err(RegistryError::UnknownStage(15)));
    }

    #[test]
    fn unknown_keys_are_dropped_on_resolve() {
        let mut stage = get_stage(11).unwrap().clone();
        stage.field_keys.push("doesNotExist".to_string());
        assert_eq!(resolve_fields(&stage).len(), 2);
    }
}
