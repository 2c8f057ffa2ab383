use std::sync::LazyLock;

use crate::model::field::{FieldConfiguration, FieldType, ValidationRule};

const PAN_PATTERN: &str = "^[A-Z]{5}[0-9]{4}[A-Z]{1}$";
const GST_PATTERN: &str = "^[0-9]{2}[A-Z]{5}[0-9]{4}[A-Z]{1}[1-9A-Z]{1}Z[0-9A-Z]{1}$";

/// Human labels of field categories, in library order.
pub const FIELD_CATEGORIES: &[(&str, &str)] = &[
    ("basic", "Basic Information"),
    ("documents", "Documents"),
    ("requirements", "Requirements"),
    ("financial", "Financial"),
    ("terms", "Terms & Conditions"),
    ("delivery", "Delivery"),
    ("communication", "Communication"),
    ("timeline", "Timeline"),
    ("technical", "Technical"),
    ("compliance", "Compliance"),
    ("qualification", "Qualification"),
    ("certification", "Certification"),
    ("marketing", "Marketing"),
    ("pricing", "Pricing"),
    ("evaluation", "Evaluation"),
    ("auction", "Auction"),
    ("order", "Purchase Order"),
    ("inspection", "Inspection"),
    ("invoice", "Invoice"),
    ("payment", "Payment"),
    ("feedback", "Feedback"),
    ("security", "Security"),
];

static FIELD_CONFIGS: LazyLock<Vec<FieldConfiguration>> = LazyLock::new(build_field_configs);

fn build_field_configs() -> Vec<FieldConfiguration> {
    use FieldType::*;

    let f = FieldConfiguration::new;
    vec![
        // Bid search
        f("keyword", "Keyword", Text, "basic").placeholder("Enter search keywords"),
        f("category", "Category", Dropdown, "basic").options(&[
            "Infrastructure",
            "Technology",
            "Construction",
            "Consulting",
            "Supplies",
        ]),
        f("buyerName", "Buyer Name", Text, "basic").placeholder("Enter buyer organization name"),
        f("location", "Location", Dropdown, "basic").options(&[
            "Delhi",
            "Mumbai",
            "Bangalore",
            "Chennai",
            "Kolkata",
            "Hyderabad",
            "Pune",
            "Ahmedabad",
        ]),
        f("bidType", "Bid Type", Dropdown, "basic").options(&[
            "Open Tender",
            "Limited Tender",
            "Single Source",
            "Rate Contract",
            "Reverse Auction",
        ]),
        f("bidStatus", "Bid Status", Dropdown, "basic").options(&[
            "Published",
            "Closed",
            "Cancelled",
            "Under Evaluation",
            "Awarded",
        ]),
        f("bidNo", "Bid No.", Autonumber, "basic").description("Auto-generated bid number"),
        // Bid analysis
        f("boqFile", "BoQ File", File, "documents").description("Upload Excel or PDF file"),
        f("eligibilityCriteria", "Eligibility Criteria", Textarea, "requirements")
            .placeholder("Enter detailed eligibility requirements"),
        f("emd", "EMD", Currency, "financial").description("Earnest Money Deposit amount"),
        f("deliveryTerms", "Delivery Terms", Dropdown, "terms")
            .options(&["FOB", "CIF", "DAP", "DDP", "Ex-Works"]),
        f("consigneeDetails", "Consignee Details", Structured, "delivery")
            .description("Delivery address and contact information"),
        // Queries
        f("queryText", "Query Text", Textarea, "communication")
            .placeholder("Enter your query or clarification request"),
        f("attachment", "Attachment", File, "documents").description("Upload supporting documents"),
        f("submissionTime", "Submission Time", Datetime, "timeline")
            .description("Bid submission deadline"),
        // Document preparation
        f("techSpecs", "Tech Specs", File, "technical")
            .description("Upload technical specifications document"),
        f("authorizationLetter", "Authorization Letter", File, "documents")
            .description("Upload signed authorization letter"),
        f("pan", "PAN", Text, "compliance").rule(ValidationRule::pattern(PAN_PATTERN, "Invalid PAN format")),
        f("gst", "GST", Text, "compliance").rule(ValidationRule::pattern(GST_PATTERN, "Invalid GST format")),
        f("experienceProof", "Experience Proof", File, "qualification")
            .description("Upload certificates and project references"),
        f("iso", "ISO", Dropdown, "certification").options(&[
            "ISO 9001",
            "ISO 14001",
            "ISO 45001",
            "ISO 27001",
            "Not Applicable",
        ]),
        f("brochures", "Brochures", Multifile, "marketing")
            .description("Upload product/service brochures"),
        // Technical bid
        f("boqCompliance", "BoQ Compliance", Checkbox, "compliance").description("Confirm BoQ compliance"),
        f("specificationMatch", "Specification Match", Checkbox, "compliance")
            .description("Confirm specification compliance"),
        f("uploads", "Uploads", Multifile, "documents").description("Upload all required documents"),
        f("termsAcceptance", "Terms Acceptance", Checkbox, "compliance")
            .required()
            .description("Accept all terms and conditions"),
        f("dsc", "DSC", Verification, "security").description("Digital Signature Certificate verification"),
        // Financial bid
        f("unitRate", "Unit Rate", Numeric, "pricing").description("Rate per unit"),
        f("gstRate", "GST Rate", Dropdown, "pricing").options(&["0%", "5%", "12%", "18%", "28%"]),
        f("boqFormatUpload", "BoQ Format Upload", File, "pricing")
            .description("Upload completed BoQ in prescribed format"),
        f("priceBreakup", "Price Breakup", Table, "pricing").description("Detailed price breakdown"),
        // Evaluation
        f("evaluationStatus", "Evaluation Status", Dropdown, "evaluation").options(&[
            "Qualified",
            "Rejected",
            "Under Review",
            "Pending Documents",
        ]),
        f("clarificationRequest", "Clarification Request", Textarea, "communication")
            .placeholder("Enter clarification details"),
        f("responseTime", "Response Time", Datetime, "timeline").description("Deadline for response"),
        // Reverse auction
        f("raWindowTime", "RA Window Time", Daterange, "auction").description("Reverse auction time window"),
        f("startingPrice", "Starting Price", Numeric, "auction").description("Initial auction price"),
        f("decrementRange", "Decrement Range", Numeric, "auction").description("Minimum price decrement"),
        // Purchase order
        f("poNo", "PO No.", Autonumber, "order").description("Purchase order number"),
        f("acceptanceClick", "Acceptance Click", Checkbox, "order")
            .description("Click to accept purchase order"),
        f("commitmentDate", "Commitment Date", Date, "order").description("Delivery commitment date"),
        f("acknowledgmentUpload", "Acknowledgment Upload", File, "order")
            .description("Upload signed acknowledgment"),
        // Delivery
        f("deliveryChallan", "Delivery Challan", File, "delivery").description("Upload delivery challan"),
        f("grn", "GRN", Text, "delivery").description("Goods Receipt Note number"),
        f("transportDetails", "Transport Details", Textarea, "delivery")
            .placeholder("Enter transport and logistics details"),
        f("photoUpload", "Photo Upload", Image, "delivery").description("Upload delivery photos"),
        // Inspection
        f("inspectionStatus", "Status", Dropdown, "inspection").options(&[
            "Accepted",
            "Rejected",
            "Partial",
            "Under Inspection",
        ]),
        f("inspectionComments", "Comments", Textarea, "inspection").placeholder("Enter inspection comments"),
        // Invoice
        f("invoiceNo", "Invoice No.", Text, "invoice").description("Invoice number"),
        f("taxBreakup", "Tax Breakup", Table, "invoice").description("Detailed tax calculation"),
        f("poReference", "PO Reference", Lookup, "invoice").description("Reference to purchase order"),
        f("invoiceUpload", "Upload PDF", File, "invoice").description("Upload invoice PDF"),
        // Payment
        f("paymentStatus", "Payment Status", Dropdown, "payment").options(&[
            "Paid",
            "Pending",
            "Rejected",
            "In Process",
        ]),
        f("utrNo", "UTR No.", Text, "payment").description("Unique Transaction Reference"),
        f("paymentDate", "Payment Date", Date, "payment").description("Date of payment"),
        // Feedback
        f("rating", "Rating", Rating, "feedback").description("Rate from 1 to 5 stars"),
        f("feedbackComments", "Comments", Textarea, "feedback").placeholder("Enter feedback comments"),
        f("reviewFiling", "Review Filing", Checkbox, "feedback").description("File review if needed"),
    ]
}

/// Every field configuration, in declaration order.
pub fn all() -> &'static [FieldConfiguration] {
    &FIELD_CONFIGS
}

/// Looks a field up by its registry key.
pub fn lookup(key: &str) -> Option<&'static FieldConfiguration> {
    FIELD_CONFIGS.iter().find(|config| config.key == key)
}

/// Label of a category key. Unknown categories are shown as-is.
pub fn category_label(category: &str) -> &str {
    FIELD_CATEGORIES
        .iter()
        .find(|(key, _)| *key == category)
        .map(|(_, label)| *label)
        .unwrap_or(category)
}

/// Field library search: case-insensitive match of `term` against name or
/// description, restricted to `category` unless it is `None` or `"all"`.
pub fn search(term: &str, category: Option<&str>) -> Vec<&'static FieldConfiguration> {
    let term = term.to_lowercase();
    FIELD_CONFIGS
        .iter()
        .filter(|config| category.is_none_or(|c| c == "all" || config.category == c))
        .filter(|config| {
            config.name.to_lowercase().contains(&term)
                || config
                    .description
                    .as_deref()
                    .is_some_and(|d| d.to_lowercase().contains(&term))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn keys_are_unique() {
        let keys: HashSet<&str> = all().iter().map(|c| c.key.as_str()).collect();
        assert_eq!(keys.len(), all().len());
    }

    #[test]
    fn every_category_has_a_label() {
        for config in all() {
            assert_ne!(
                category_label(&config.category),
                config.category,
                "no label for {}",
                config.category
            );
        }
        assert_eq!(category_label("misc"), "misc");
    }

    #[test]
    fn lookup_finds_known_and_misses_unknown() {
        let pan = lookup("pan").unwrap();
        assert_eq!(pan.name, "PAN");
        assert_eq!(pan.validation.len(), 1);
        assert!(lookup("nonexistent").is_none());
    }

    #[test]
    fn only_terms_acceptance_is_required() {
        let required: Vec<&str> = all()
            .iter()
            .filter(|c| c.is_required())
            .map(|c| c.key.as_str())
            .collect();
        assert_eq!(required, vec!["termsAcceptance"]);
    }

    #[test]
    fn search_matches_names_and_descriptions() {
        let hits: Vec<&str> = search("purchase order", None)
            .iter()
            .map(|c| c.key.as_str())
            .collect();
        assert_eq!(hits, vec!["poNo", "acceptanceClick", "poReference"]);

        let pricing: Vec<&str> = search("", Some("pricing"))
            .iter()
            .map(|c| c.key.as_str())
            .collect();
        assert_eq!(pricing, vec!["unitRate", "gstRate", "boqFormatUpload", "priceBreakup"]);
    }
}
