//! Table records.
//!
//! Every record type exposes its sortable columns through [`Record`], so the
//! table machinery never needs to know the concrete type it is ordering.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{DefinitionId, FieldValue, ModelError};

/// A row of a sortable table.
pub trait Record {
    /// Identity of the record, unique within its collection.
    fn record_id(&self) -> &str;

    /// Value of the named field. Unknown names yield [`FieldValue::Missing`].
    fn field(&self, name: &str) -> FieldValue;

    /// Names of the fields this record exposes, in display order.
    fn field_names(&self) -> Vec<&str>;

    /// Case-insensitive substring match against every field.
    ///
    /// `needle` must already be lowercase. An empty needle matches everything.
    fn matches_search(&self, needle: &str) -> bool {
        if needle.is_empty() {
            return true;
        }
        self.field_names()
            .into_iter()
            .any(|name| self.field(name).as_text().to_lowercase().contains(needle))
    }
}

/// The record tables a dashboard page can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordKind {
    Leads,
    Opportunities,
    Contacts,
}

impl RecordKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordKind::Leads => "leads",
            RecordKind::Opportunities => "opportunities",
            RecordKind::Contacts => "contacts",
        }
    }

    /// Field names shown as columns for this table.
    pub fn columns(&self) -> &'static [&'static str] {
        match self {
            RecordKind::Leads => Lead::FIELDS,
            RecordKind::Opportunities => Opportunity::FIELDS,
            RecordKind::Contacts => Contact::FIELDS,
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RecordKind {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "leads" | "lead" => Ok(RecordKind::Leads),
            "opportunities" | "opportunity" | "deals" => Ok(RecordKind::Opportunities),
            "contacts" | "contact" => Ok(RecordKind::Contacts),
            _ => Err(ModelError::UnknownRecordKind(s.to_string())),
        }
    }
}

fn date_value(date: Option<NaiveDate>) -> FieldValue {
    date.map_or(FieldValue::Missing, |date| {
        FieldValue::Text(date.format("%Y-%m-%d").to_string())
    })
}

// =============================================================================
// LEAD
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lead {
    pub id: String,
    pub name: String,
    pub company: String,
    pub email: String,
    /// Lead stage id.
    pub status: DefinitionId,
    /// Lead source id.
    pub source: DefinitionId,
    pub score: u32,
    pub value: f64,
    pub owner: String,
    pub created: NaiveDate,
}

impl Lead {
    pub const FIELDS: &'static [&'static str] = &[
        "id", "name", "company", "email", "status", "source", "score", "value", "owner",
        "created",
    ];
}

impl Record for Lead {
    fn record_id(&self) -> &str {
        &self.id
    }

    fn field(&self, name: &str) -> FieldValue {
        match name {
            "id" => FieldValue::from(&self.id),
            "name" => FieldValue::from(&self.name),
            "company" => FieldValue::from(&self.company),
            "email" => FieldValue::from(&self.email),
            "status" => FieldValue::from(self.status.as_str()),
            "source" => FieldValue::from(self.source.as_str()),
            "score" => FieldValue::from(self.score),
            "value" => FieldValue::from(self.value),
            "owner" => FieldValue::from(&self.owner),
            "created" => date_value(Some(self.created)),
            _ => FieldValue::Missing,
        }
    }

    fn field_names(&self) -> Vec<&str> {
        Self::FIELDS.to_vec()
    }
}

// =============================================================================
// OPPORTUNITY
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Opportunity {
    pub id: String,
    pub name: String,
    pub account: String,
    /// Opportunity stage id.
    pub stage: DefinitionId,
    pub amount: f64,
    /// Win probability in percent.
    pub probability: u8,
    pub close_date: Option<NaiveDate>,
    pub owner: String,
}

impl Opportunity {
    pub const FIELDS: &'static [&'static str] = &[
        "id",
        "name",
        "account",
        "stage",
        "amount",
        "probability",
        "close_date",
        "owner",
    ];

    /// Amount weighted by win probability.
    pub fn weighted_amount(&self) -> f64 {
        self.amount * f64::from(self.probability) / 100.0
    }
}

impl Record for Opportunity {
    fn record_id(&self) -> &str {
        &self.id
    }

    fn field(&self, name: &str) -> FieldValue {
        match name {
            "id" => FieldValue::from(&self.id),
            "name" => FieldValue::from(&self.name),
            "account" => FieldValue::from(&self.account),
            "stage" => FieldValue::from(self.stage.as_str()),
            "amount" => FieldValue::from(self.amount),
            "probability" => FieldValue::from(self.probability),
            "close_date" => date_value(self.close_date),
            "owner" => FieldValue::from(&self.owner),
            _ => FieldValue::Missing,
        }
    }

    fn field_names(&self) -> Vec<&str> {
        Self::FIELDS.to_vec()
    }
}

// =============================================================================
// CONTACT
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub company: String,
    /// Contact role id.
    pub role: DefinitionId,
    pub last_contacted: Option<NaiveDate>,
}

impl Contact {
    pub const FIELDS: &'static [&'static str] = &[
        "id",
        "first_name",
        "last_name",
        "email",
        "phone",
        "company",
        "role",
        "last_contacted",
    ];

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

impl Record for Contact {
    fn record_id(&self) -> &str {
        &self.id
    }

    fn field(&self, name: &str) -> FieldValue {
        match name {
            "id" => FieldValue::from(&self.id),
            "first_name" => FieldValue::from(&self.first_name),
            "last_name" => FieldValue::from(&self.last_name),
            "name" => FieldValue::from(self.full_name()),
            "email" => FieldValue::from(&self.email),
            "phone" => FieldValue::from(self.phone.as_deref()),
            "company" => FieldValue::from(&self.company),
            "role" => FieldValue::from(self.role.as_str()),
            "last_contacted" => date_value(self.last_contacted),
            _ => FieldValue::Missing,
        }
    }

    fn field_names(&self) -> Vec<&str> {
        Self::FIELDS.to_vec()
    }
}

// =============================================================================
// DYNAMIC RECORD
// =============================================================================

/// A string-keyed record whose shape is only known at runtime (e.g. CSV input).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DynamicRecord {
    pub id: String,
    /// Column order as supplied by the source.
    pub columns: Vec<String>,
    pub cells: BTreeMap<String, FieldValue>,
}

impl DynamicRecord {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    /// Set a cell, appending the column on first use.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<FieldValue>) {
        let name = name.into();
        if !self.cells.contains_key(&name) {
            self.columns.push(name.clone());
        }
        self.cells.insert(name, value.into());
    }

    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.set(name, value);
        self
    }
}

impl Record for DynamicRecord {
    fn record_id(&self) -> &str {
        &self.id
    }

    fn field(&self, name: &str) -> FieldValue {
        if name == "id" && !self.cells.contains_key("id") {
            return FieldValue::from(&self.id);
        }
        self.cells.get(name).cloned().unwrap_or(FieldValue::Missing)
    }

    fn field_names(&self) -> Vec<&str> {
        self.columns.iter().map(String::as_str).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lead() -> Lead {
        Lead {
            id: "L-1".to_string(),
            name: "Ada Byron".to_string(),
            company: "Analytical Engines".to_string(),
            email: "ada@engines.io".to_string(),
            status: DefinitionId::from_static("new"),
            source: DefinitionId::from_static("website"),
            score: 72,
            value: 12_000.0,
            owner: "Sam".to_string(),
            created: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
        }
    }

    #[test]
    fn lead_fields_are_typed() {
        let lead = lead();
        assert_eq!(lead.field("score"), FieldValue::Number(72.0));
        assert_eq!(lead.field("created").to_string(), "2024-03-01");
        assert_eq!(lead.field("nope"), FieldValue::Missing);
    }

    #[test]
    fn search_is_case_insensitive() {
        let lead = lead();
        assert!(lead.matches_search("engines"));
        assert!(lead.matches_search("72"));
        assert!(!lead.matches_search("zeta"));
        assert!(lead.matches_search(""));
    }

    #[test]
    fn dynamic_record_keeps_column_order() {
        let record = DynamicRecord::new("r1")
            .with("zeta", "z")
            .with("alpha", 1.0)
            .with("zeta", "again");
        assert_eq!(record.field_names(), vec!["zeta", "alpha"]);
        assert_eq!(record.field("zeta").to_string(), "again");
        assert_eq!(record.field("id").to_string(), "r1");
    }

    #[test]
    fn record_kind_parses_aliases() {
        assert_eq!("Deals".parse::<RecordKind>(), Ok(RecordKind::Opportunities));
        assert!("invoices".parse::<RecordKind>().is_err());
    }
}
