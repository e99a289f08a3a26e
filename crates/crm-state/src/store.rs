//! Named collection stores - one reorderable list per configuration domain.
//!
//! Every store is independent: removing a stage here never touches records
//! that reference it. The pipeline board reports such dangling references.

use tracing::debug;

use crm_model::{
    ActivityType, CollectionKind, ContactRole, CustomField, Definition, DefinitionId, LeadSource,
    LeadStage, OpportunityStage, QuotationTemplate,
};

use crate::drag::{DropOutcome, apply_drop};
use crate::reorder::OrderedList;
use crate::seed;

/// Display row of any store, independent of the definition type.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct DefinitionRow {
    pub position: usize,
    pub id: DefinitionId,
    pub label: String,
}

/// All configuration stores of a session.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CollectionStores {
    pub activity_types: OrderedList<ActivityType>,
    pub lead_stages: OrderedList<LeadStage>,
    pub opportunity_stages: OrderedList<OpportunityStage>,
    pub lead_sources: OrderedList<LeadSource>,
    pub contact_roles: OrderedList<ContactRole>,
    pub custom_fields: OrderedList<CustomField>,
    pub quotation_templates: OrderedList<QuotationTemplate>,
}

/// Run `$body` with `$list` bound to the store selected by `$kind`.
macro_rules! with_store {
    ($stores:expr, $kind:expr, |$list:ident| $body:expr) => {
        match $kind {
            CollectionKind::ActivityTypes => {
                let $list = &$stores.activity_types;
                $body
            }
            CollectionKind::LeadStages => {
                let $list = &$stores.lead_stages;
                $body
            }
            CollectionKind::OpportunityStages => {
                let $list = &$stores.opportunity_stages;
                $body
            }
            CollectionKind::LeadSources => {
                let $list = &$stores.lead_sources;
                $body
            }
            CollectionKind::ContactRoles => {
                let $list = &$stores.contact_roles;
                $body
            }
            CollectionKind::CustomFields => {
                let $list = &$stores.custom_fields;
                $body
            }
            CollectionKind::QuotationTemplates => {
                let $list = &$stores.quotation_templates;
                $body
            }
        }
    };
}

macro_rules! with_store_mut {
    ($stores:expr, $kind:expr, |$list:ident| $body:expr) => {
        match $kind {
            CollectionKind::ActivityTypes => {
                let $list = &mut $stores.activity_types;
                $body
            }
            CollectionKind::LeadStages => {
                let $list = &mut $stores.lead_stages;
                $body
            }
            CollectionKind::OpportunityStages => {
                let $list = &mut $stores.opportunity_stages;
                $body
            }
            CollectionKind::LeadSources => {
                let $list = &mut $stores.lead_sources;
                $body
            }
            CollectionKind::ContactRoles => {
                let $list = &mut $stores.contact_roles;
                $body
            }
            CollectionKind::CustomFields => {
                let $list = &mut $stores.custom_fields;
                $body
            }
            CollectionKind::QuotationTemplates => {
                let $list = &mut $stores.quotation_templates;
                $body
            }
        }
    };
}

impl CollectionStores {
    /// Stores filled with the built-in seed lists.
    pub fn seeded() -> Self {
        let stores = Self {
            activity_types: OrderedList::from_items(seed::activity_types()),
            lead_stages: OrderedList::from_items(seed::lead_stages()),
            opportunity_stages: OrderedList::from_items(seed::opportunity_stages()),
            lead_sources: OrderedList::from_items(seed::lead_sources()),
            contact_roles: OrderedList::from_items(seed::contact_roles()),
            custom_fields: OrderedList::from_items(seed::custom_fields()),
            quotation_templates: OrderedList::from_items(seed::quotation_templates()),
        };
        debug!(summary = ?stores.summary(), "stores seeded");
        stores
    }

    /// Entry count per store, in [`CollectionKind::all`] order.
    pub fn summary(&self) -> Vec<(CollectionKind, usize)> {
        CollectionKind::all()
            .iter()
            .map(|&kind| (kind, self.len_of(kind)))
            .collect()
    }

    pub fn len_of(&self, kind: CollectionKind) -> usize {
        with_store!(self, kind, |list| list.len())
    }

    /// Position, id and label of every entry of `kind`.
    pub fn rows(&self, kind: CollectionKind) -> Vec<DefinitionRow> {
        with_store!(self, kind, |list| rows_of(list))
    }

    /// Position of `id` within the store of `kind`.
    pub fn position_in(&self, kind: CollectionKind, id: &str) -> Option<usize> {
        with_store!(self, kind, |list| list.position(id))
    }

    /// Move within the store of `kind`. See [`OrderedList::move_to`].
    pub fn move_in(&mut self, kind: CollectionKind, from: usize, to: usize) -> bool {
        with_store_mut!(self, kind, |list| list.move_to(from, to))
    }

    pub fn move_up_in(&mut self, kind: CollectionKind, index: usize) -> bool {
        with_store_mut!(self, kind, |list| list.move_up(index))
    }

    pub fn move_down_in(&mut self, kind: CollectionKind, index: usize) -> bool {
        with_store_mut!(self, kind, |list| list.move_down(index))
    }

    /// Remove `id` from the store of `kind`. Returns true if it was present.
    pub fn remove_in(&mut self, kind: CollectionKind, id: &str) -> bool {
        with_store_mut!(self, kind, |list| list.remove(id).is_some())
    }

    /// Apply a finished drag gesture to the store of `kind`.
    pub fn drop_in(&mut self, kind: CollectionKind, outcome: DropOutcome) -> bool {
        with_store_mut!(self, kind, |list| apply_drop(list, outcome))
    }

    /// Change the display name of `id` in the store of `kind`.
    pub fn rename_in(&mut self, kind: CollectionKind, id: &str, label: &str) -> bool {
        let label = Some(label.to_string());
        match kind {
            CollectionKind::ActivityTypes => self.activity_types.update(
                id,
                crm_model::ActivityTypePatch {
                    label,
                    ..Default::default()
                },
            ),
            CollectionKind::LeadStages => self.lead_stages.update(
                id,
                crm_model::LeadStagePatch {
                    label,
                    ..Default::default()
                },
            ),
            CollectionKind::OpportunityStages => self.opportunity_stages.update(
                id,
                crm_model::OpportunityStagePatch {
                    label,
                    ..Default::default()
                },
            ),
            CollectionKind::LeadSources => self.lead_sources.update(
                id,
                crm_model::LeadSourcePatch {
                    name: label,
                    ..Default::default()
                },
            ),
            CollectionKind::ContactRoles => self.contact_roles.update(
                id,
                crm_model::ContactRolePatch {
                    label,
                    ..Default::default()
                },
            ),
            CollectionKind::CustomFields => self.custom_fields.update(
                id,
                crm_model::CustomFieldPatch {
                    label,
                    ..Default::default()
                },
            ),
            CollectionKind::QuotationTemplates => self.quotation_templates.update(
                id,
                crm_model::QuotationTemplatePatch {
                    name: label,
                    ..Default::default()
                },
            ),
        }
    }
}

fn rows_of<D: Definition>(list: &OrderedList<D>) -> Vec<DefinitionRow> {
    list.iter()
        .enumerate()
        .map(|(position, item)| DefinitionRow {
            position,
            id: item.id().clone(),
            label: item.label().to_string(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_stores_are_populated() {
        let stores = CollectionStores::seeded();
        assert_eq!(stores.len_of(CollectionKind::LeadSources), 6);
        assert_eq!(stores.len_of(CollectionKind::LeadStages), 4);
        assert!(stores.summary().iter().all(|(_, len)| *len > 0));
    }

    #[test]
    fn stores_are_independent() {
        let mut stores = CollectionStores::seeded();
        let before = stores.clone();
        assert!(stores.move_in(CollectionKind::LeadStages, 3, 1));
        assert_eq!(stores.opportunity_stages, before.opportunity_stages);
        assert_eq!(stores.lead_sources, before.lead_sources);
        assert_ne!(stores.lead_stages, before.lead_stages);
    }

    #[test]
    fn rename_uses_the_display_field() {
        let mut stores = CollectionStores::seeded();
        assert!(stores.rename_in(CollectionKind::LeadSources, "referral", "Partner Referral"));
        let rows = stores.rows(CollectionKind::LeadSources);
        assert_eq!(rows[1].label, "Partner Referral");
        assert!(!stores.rename_in(CollectionKind::LeadSources, "nope", "x"));
    }

    #[test]
    fn remove_in_reports_presence() {
        let mut stores = CollectionStores::seeded();
        assert!(stores.remove_in(CollectionKind::ContactRoles, "champion"));
        assert!(!stores.remove_in(CollectionKind::ContactRoles, "champion"));
        assert_eq!(stores.position_in(CollectionKind::ContactRoles, "champion"), None);
    }
}
