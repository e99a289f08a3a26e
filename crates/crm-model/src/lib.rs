//! Data model for the Pipeline Desk CRM.
//!
//! Records (leads, opportunities, contacts) expose named fields as
//! [`FieldValue`]s so tables can sort and filter them generically.
//! Orderable definitions (stages, sources, templates, ...) carry a stable
//! [`DefinitionId`] and a typed patch struct for partial updates.

pub mod definition;
pub mod error;
pub mod ids;
pub mod record;
pub mod value;

pub use definition::{
    ActivityType, ActivityTypePatch, CollectionKind, ContactRole, ContactRolePatch, CustomField,
    CustomFieldPatch, CustomFieldType, Definition, LeadSource, LeadSourcePatch, LeadStage,
    LeadStagePatch, OpportunityStage, OpportunityStagePatch, QuotationTemplate,
    QuotationTemplatePatch,
};
pub use error::{ModelError, Result};
pub use ids::DefinitionId;
pub use record::{Contact, DynamicRecord, Lead, Opportunity, Record, RecordKind};
pub use value::FieldValue;
