//! Built-in seed data for the stores and record tables.

use chrono::NaiveDate;

use crm_model::{
    ActivityType, Contact, ContactRole, CustomField, CustomFieldType, DefinitionId, Lead,
    LeadSource, LeadStage, Opportunity, OpportunityStage, QuotationTemplate,
};

fn id(value: &'static str) -> DefinitionId {
    DefinitionId::from_static(value)
}

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or(NaiveDate::MIN)
}

// =============================================================================
// DEFINITIONS
// =============================================================================

pub fn activity_types() -> Vec<ActivityType> {
    [
        ("call", "Call", "#3b82f6", "phone", "Outbound or inbound phone call"),
        ("email", "Email", "#8b5cf6", "mail", "Email sent to or received from a contact"),
        ("meeting", "Meeting", "#10b981", "calendar", "Scheduled meeting or demo"),
        ("task", "Task", "#f59e0b", "check-square", "Follow-up work item"),
        ("note", "Note", "#64748b", "file-text", "Free-form note"),
    ]
    .into_iter()
    .map(|(key, label, color, icon, description)| ActivityType {
        id: id(key),
        label: label.to_string(),
        color: color.to_string(),
        icon: icon.to_string(),
        description: description.to_string(),
    })
    .collect()
}

pub fn lead_stages() -> Vec<LeadStage> {
    [
        ("new", "New", "#3b82f6", "Not yet contacted"),
        ("contacted", "Contacted", "#f59e0b", "First touch made"),
        ("qualified", "Qualified", "#10b981", "Budget and need confirmed"),
        ("converted", "Converted", "#8b5cf6", "Turned into an opportunity"),
    ]
    .into_iter()
    .map(|(key, label, color, description)| LeadStage {
        id: id(key),
        label: label.to_string(),
        color: color.to_string(),
        description: description.to_string(),
    })
    .collect()
}

pub fn opportunity_stages() -> Vec<OpportunityStage> {
    [
        ("prospecting", "Prospecting", "#94a3b8", 10),
        ("qualification", "Qualification", "#3b82f6", 25),
        ("proposal", "Proposal", "#f59e0b", 50),
        ("negotiation", "Negotiation", "#f97316", 75),
        ("closed-won", "Closed Won", "#10b981", 100),
        ("closed-lost", "Closed Lost", "#ef4444", 0),
    ]
    .into_iter()
    .map(|(key, label, color, probability)| OpportunityStage {
        id: id(key),
        label: label.to_string(),
        color: color.to_string(),
        probability,
        description: String::new(),
    })
    .collect()
}

pub fn lead_sources() -> Vec<LeadSource> {
    [
        ("website", "Website", "Inbound form on the marketing site"),
        ("referral", "Referral", "Introduced by a customer or partner"),
        ("social-media", "Social Media", "LinkedIn, X and similar channels"),
        ("email-campaign", "Email Campaign", "Outbound nurture sequences"),
        ("trade-show", "Trade Show", "Met at an event booth"),
        ("cold-call", "Cold Call", "Outbound prospecting call"),
    ]
    .into_iter()
    .map(|(key, name, description)| LeadSource {
        id: id(key),
        name: name.to_string(),
        description: description.to_string(),
        active: true,
    })
    .collect()
}

pub fn contact_roles() -> Vec<ContactRole> {
    [
        ("decision-maker", "Decision Maker", "Signs off on the purchase"),
        ("influencer", "Influencer", "Shapes the decision"),
        ("champion", "Champion", "Advocates internally"),
        ("technical-buyer", "Technical Buyer", "Evaluates fit and integration"),
        ("end-user", "End User", "Uses the product day to day"),
    ]
    .into_iter()
    .map(|(key, label, description)| ContactRole {
        id: id(key),
        label: label.to_string(),
        description: description.to_string(),
    })
    .collect()
}

pub fn custom_fields() -> Vec<CustomField> {
    vec![
        CustomField {
            id: id("budget"),
            label: "Budget".to_string(),
            field_type: CustomFieldType::Number,
            required: false,
            options: Vec::new(),
        },
        CustomField {
            id: id("decision-date"),
            label: "Decision Date".to_string(),
            field_type: CustomFieldType::Date,
            required: false,
            options: Vec::new(),
        },
        CustomField {
            id: id("deal-type"),
            label: "Deal Type".to_string(),
            field_type: CustomFieldType::Select,
            required: true,
            options: vec![
                "New Business".to_string(),
                "Upsell".to_string(),
                "Renewal".to_string(),
            ],
        },
        CustomField {
            id: id("competitor"),
            label: "Main Competitor".to_string(),
            field_type: CustomFieldType::Text,
            required: false,
            options: Vec::new(),
        },
        CustomField {
            id: id("nda-signed"),
            label: "NDA Signed".to_string(),
            field_type: CustomFieldType::Checkbox,
            required: false,
            options: Vec::new(),
        },
    ]
}

pub fn quotation_templates() -> Vec<QuotationTemplate> {
    vec![
        QuotationTemplate {
            id: id("standard"),
            name: "Standard Quote".to_string(),
            description: "Default layout for most deals".to_string(),
            body: "Dear {{contact}},\n\nPlease find our quotation for {{opportunity}}.".to_string(),
            is_default: true,
        },
        QuotationTemplate {
            id: id("enterprise"),
            name: "Enterprise Agreement".to_string(),
            description: "Multi-year pricing with SLA annex".to_string(),
            body: "{{account}} enterprise agreement, term {{term}} months.".to_string(),
            is_default: false,
        },
        QuotationTemplate {
            id: id("renewal"),
            name: "Renewal".to_string(),
            description: "Renewal of an existing subscription".to_string(),
            body: "Renewal quotation for {{account}}.".to_string(),
            is_default: false,
        },
    ]
}

// =============================================================================
// RECORDS
// =============================================================================

pub fn leads() -> Vec<Lead> {
    [
        ("L-001", "Sarah Johnson", "TechCorp", "new", "website", 72, 15_000.0, "Alex", date(2024, 1, 15)),
        ("L-002", "Michael Chen", "DataSystems", "contacted", "referral", 45, 8_500.0, "Jamie", date(2024, 1, 18)),
        ("L-003", "Emily Davis", "CloudNine", "qualified", "trade-show", 90, 42_000.0, "Alex", date(2024, 2, 2)),
        ("L-004", "Robert Wilson", "Innovate Ltd", "new", "social-media", 68, 12_000.0, "Morgan", date(2024, 2, 9)),
        ("L-005", "Lisa Anderson", "GlobalTech", "qualified", "email-campaign", 85, 27_500.0, "Jamie", date(2024, 2, 21)),
        ("L-006", "David Martinez", "StartupHub", "contacted", "cold-call", 40, 5_000.0, "Morgan", date(2024, 3, 4)),
    ]
    .into_iter()
    .map(
        |(key, name, company, status, source, score, value, owner, created)| Lead {
            id: key.to_string(),
            name: name.to_string(),
            company: company.to_string(),
            email: format!(
                "{}@{}.com",
                name.split_whitespace().next().unwrap_or(name).to_lowercase(),
                company.replace(' ', "").to_lowercase()
            ),
            status: id(status),
            source: id(source),
            score,
            value,
            owner: owner.to_string(),
            created,
        },
    )
    .collect()
}

pub fn opportunities() -> Vec<Opportunity> {
    [
        ("O-001", "TechCorp platform rollout", "TechCorp", "proposal", 48_000.0, 50, Some(date(2024, 4, 30)), "Alex"),
        ("O-002", "DataSystems analytics", "DataSystems", "qualification", 22_000.0, 25, Some(date(2024, 5, 15)), "Jamie"),
        ("O-003", "CloudNine migration", "CloudNine", "negotiation", 95_000.0, 75, Some(date(2024, 4, 12)), "Alex"),
        ("O-004", "GlobalTech renewal", "GlobalTech", "closed-won", 31_000.0, 100, Some(date(2024, 3, 1)), "Morgan"),
        ("O-005", "StartupHub pilot", "StartupHub", "prospecting", 6_500.0, 10, None, "Morgan"),
        ("O-006", "Innovate expansion", "Innovate Ltd", "proposal", 18_750.0, 50, Some(date(2024, 6, 1)), "Jamie"),
    ]
    .into_iter()
    .map(
        |(key, name, account, stage, amount, probability, close_date, owner)| Opportunity {
            id: key.to_string(),
            name: name.to_string(),
            account: account.to_string(),
            stage: id(stage),
            amount,
            probability,
            close_date,
            owner: owner.to_string(),
        },
    )
    .collect()
}

pub fn contacts() -> Vec<Contact> {
    [
        ("C-001", "Sarah", "Johnson", "TechCorp", "decision-maker", Some("+1 555 0101"), Some(date(2024, 3, 2))),
        ("C-002", "Tom", "Becker", "TechCorp", "technical-buyer", None, Some(date(2024, 2, 27))),
        ("C-003", "Priya", "Natarajan", "CloudNine", "champion", Some("+1 555 0133"), Some(date(2024, 3, 10))),
        ("C-004", "Lisa", "Anderson", "GlobalTech", "decision-maker", Some("+1 555 0144"), None),
        ("C-005", "Omar", "Haddad", "DataSystems", "influencer", None, Some(date(2024, 1, 30))),
    ]
    .into_iter()
    .map(
        |(key, first, last, company, role, phone, last_contacted)| Contact {
            id: key.to_string(),
            first_name: first.to_string(),
            last_name: last.to_string(),
            email: format!(
                "{}.{}@{}.com",
                first.to_lowercase(),
                last.to_lowercase(),
                company.replace(' ', "").to_lowercase()
            ),
            phone: phone.map(str::to_string),
            company: company.to_string(),
            role: id(role),
            last_contacted,
        },
    )
    .collect()
}
