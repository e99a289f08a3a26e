//! Orderable definitions - the user-configurable taxonomies of the CRM.
//!
//! Each definition type has a companion patch struct of optional fields.
//! Applying a patch changes exactly the fields that are `Some`, which is how
//! settings screens edit a single attribute without touching the rest.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{DefinitionId, ModelError};

/// An entry of a reorderable configuration list.
pub trait Definition: Clone + fmt::Debug {
    /// Partial update applied by [`Definition::apply`].
    type Patch: Default + Clone + fmt::Debug;

    /// Collection this definition type belongs to.
    const KIND: CollectionKind;

    fn id(&self) -> &DefinitionId;

    /// Human-readable name shown in lists.
    fn label(&self) -> &str;

    /// Merge `patch` into `self`, field by field.
    fn apply(&mut self, patch: Self::Patch);
}

// =============================================================================
// COLLECTION KIND
// =============================================================================

/// The configuration domains that each own one reorderable list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CollectionKind {
    ActivityTypes,
    LeadStages,
    OpportunityStages,
    LeadSources,
    ContactRoles,
    CustomFields,
    QuotationTemplates,
}

impl CollectionKind {
    pub fn all() -> &'static [CollectionKind] {
        &[
            CollectionKind::ActivityTypes,
            CollectionKind::LeadStages,
            CollectionKind::OpportunityStages,
            CollectionKind::LeadSources,
            CollectionKind::ContactRoles,
            CollectionKind::CustomFields,
            CollectionKind::QuotationTemplates,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CollectionKind::ActivityTypes => "activity-types",
            CollectionKind::LeadStages => "lead-stages",
            CollectionKind::OpportunityStages => "opportunity-stages",
            CollectionKind::LeadSources => "lead-sources",
            CollectionKind::ContactRoles => "contact-roles",
            CollectionKind::CustomFields => "custom-fields",
            CollectionKind::QuotationTemplates => "quotation-templates",
        }
    }

    /// Title used for headings.
    pub fn title(&self) -> &'static str {
        match self {
            CollectionKind::ActivityTypes => "Activity Types",
            CollectionKind::LeadStages => "Lead Stages",
            CollectionKind::OpportunityStages => "Opportunity Stages",
            CollectionKind::LeadSources => "Lead Sources",
            CollectionKind::ContactRoles => "Contact Roles",
            CollectionKind::CustomFields => "Opportunity Custom Fields",
            CollectionKind::QuotationTemplates => "Quotation Templates",
        }
    }
}

impl fmt::Display for CollectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CollectionKind {
    type Err = ModelError;

    /// Accepts kebab, snake or space separated names, case-insensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace(['_', ' '], "-");
        CollectionKind::all()
            .iter()
            .copied()
            .find(|kind| kind.as_str() == normalized)
            .ok_or_else(|| ModelError::UnknownCollection(s.to_string()))
    }
}

macro_rules! merge {
    ($target:expr, $value:expr) => {
        if let Some(value) = $value {
            $target = value;
        }
    };
}

// =============================================================================
// ACTIVITY TYPE
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityType {
    pub id: DefinitionId,
    pub label: String,
    pub color: String,
    pub icon: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ActivityTypePatch {
    pub label: Option<String>,
    pub color: Option<String>,
    pub icon: Option<String>,
    pub description: Option<String>,
}

impl Definition for ActivityType {
    type Patch = ActivityTypePatch;
    const KIND: CollectionKind = CollectionKind::ActivityTypes;

    fn id(&self) -> &DefinitionId {
        &self.id
    }

    fn label(&self) -> &str {
        &self.label
    }

    fn apply(&mut self, patch: ActivityTypePatch) {
        merge!(self.label, patch.label);
        merge!(self.color, patch.color);
        merge!(self.icon, patch.icon);
        merge!(self.description, patch.description);
    }
}

// =============================================================================
// PIPELINE STAGES
// =============================================================================

/// A step of the lead funnel (New, Contacted, Qualified, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeadStage {
    pub id: DefinitionId,
    pub label: String,
    pub color: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LeadStagePatch {
    pub label: Option<String>,
    pub color: Option<String>,
    pub description: Option<String>,
}

impl Definition for LeadStage {
    type Patch = LeadStagePatch;
    const KIND: CollectionKind = CollectionKind::LeadStages;

    fn id(&self) -> &DefinitionId {
        &self.id
    }

    fn label(&self) -> &str {
        &self.label
    }

    fn apply(&mut self, patch: LeadStagePatch) {
        merge!(self.label, patch.label);
        merge!(self.color, patch.color);
        merge!(self.description, patch.description);
    }
}

/// A column of the opportunity pipeline board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpportunityStage {
    pub id: DefinitionId,
    pub label: String,
    pub color: String,
    /// Default win probability in percent for deals entering this stage.
    pub probability: u8,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OpportunityStagePatch {
    pub label: Option<String>,
    pub color: Option<String>,
    pub probability: Option<u8>,
    pub description: Option<String>,
}

impl Definition for OpportunityStage {
    type Patch = OpportunityStagePatch;
    const KIND: CollectionKind = CollectionKind::OpportunityStages;

    fn id(&self) -> &DefinitionId {
        &self.id
    }

    fn label(&self) -> &str {
        &self.label
    }

    fn apply(&mut self, patch: OpportunityStagePatch) {
        merge!(self.label, patch.label);
        merge!(self.color, patch.color);
        merge!(self.probability, patch.probability.map(|p| p.min(100)));
        merge!(self.description, patch.description);
    }
}

// =============================================================================
// LEAD SOURCE
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeadSource {
    pub id: DefinitionId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default = "default_true")]
    pub active: bool,
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LeadSourcePatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub active: Option<bool>,
}

impl Definition for LeadSource {
    type Patch = LeadSourcePatch;
    const KIND: CollectionKind = CollectionKind::LeadSources;

    fn id(&self) -> &DefinitionId {
        &self.id
    }

    fn label(&self) -> &str {
        &self.name
    }

    fn apply(&mut self, patch: LeadSourcePatch) {
        merge!(self.name, patch.name);
        merge!(self.description, patch.description);
        merge!(self.active, patch.active);
    }
}

// =============================================================================
// CONTACT ROLE
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactRole {
    pub id: DefinitionId,
    pub label: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactRolePatch {
    pub label: Option<String>,
    pub description: Option<String>,
}

impl Definition for ContactRole {
    type Patch = ContactRolePatch;
    const KIND: CollectionKind = CollectionKind::ContactRoles;

    fn id(&self) -> &DefinitionId {
        &self.id
    }

    fn label(&self) -> &str {
        &self.label
    }

    fn apply(&mut self, patch: ContactRolePatch) {
        merge!(self.label, patch.label);
        merge!(self.description, patch.description);
    }
}

// =============================================================================
// CUSTOM FIELD
// =============================================================================

/// Input type of an opportunity custom field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CustomFieldType {
    #[default]
    Text,
    Number,
    Date,
    Select,
    Checkbox,
}

impl CustomFieldType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Number => "number",
            Self::Date => "date",
            Self::Select => "select",
            Self::Checkbox => "checkbox",
        }
    }
}

impl fmt::Display for CustomFieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomField {
    pub id: DefinitionId,
    pub label: String,
    pub field_type: CustomFieldType,
    #[serde(default)]
    pub required: bool,
    /// Choices for [`CustomFieldType::Select`]; empty otherwise.
    #[serde(default)]
    pub options: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CustomFieldPatch {
    pub label: Option<String>,
    pub field_type: Option<CustomFieldType>,
    pub required: Option<bool>,
    pub options: Option<Vec<String>>,
}

impl Definition for CustomField {
    type Patch = CustomFieldPatch;
    const KIND: CollectionKind = CollectionKind::CustomFields;

    fn id(&self) -> &DefinitionId {
        &self.id
    }

    fn label(&self) -> &str {
        &self.label
    }

    fn apply(&mut self, patch: CustomFieldPatch) {
        merge!(self.label, patch.label);
        merge!(self.field_type, patch.field_type);
        merge!(self.required, patch.required);
        merge!(self.options, patch.options);
    }
}

// =============================================================================
// QUOTATION TEMPLATE
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuotationTemplate {
    pub id: DefinitionId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Template body with `{{placeholder}}` markers.
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub is_default: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuotationTemplatePatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub body: Option<String>,
    pub is_default: Option<bool>,
}

impl Definition for QuotationTemplate {
    type Patch = QuotationTemplatePatch;
    const KIND: CollectionKind = CollectionKind::QuotationTemplates;

    fn id(&self) -> &DefinitionId {
        &self.id
    }

    fn label(&self) -> &str {
        &self.name
    }

    fn apply(&mut self, patch: QuotationTemplatePatch) {
        merge!(self.name, patch.name);
        merge!(self.description, patch.description);
        merge!(self.body, patch.body);
        merge!(self.is_default, patch.is_default);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collection_kind_parses_loose_names() {
        assert_eq!(
            "Lead Stages".parse::<CollectionKind>(),
            Ok(CollectionKind::LeadStages)
        );
        assert_eq!(
            "quotation_templates".parse::<CollectionKind>(),
            Ok(CollectionKind::QuotationTemplates)
        );
        assert!("stages".parse::<CollectionKind>().is_err());
    }

    #[test]
    fn patch_touches_only_given_fields() {
        let mut stage = OpportunityStage {
            id: DefinitionId::from_static("proposal"),
            label: "Proposal".to_string(),
            color: "#f59e0b".to_string(),
            probability: 50,
            description: "Quote sent".to_string(),
        };
        stage.apply(OpportunityStagePatch {
            probability: Some(140),
            ..Default::default()
        });
        assert_eq!(stage.probability, 100);
        assert_eq!(stage.label, "Proposal");
        assert_eq!(stage.description, "Quote sent");
    }
}
