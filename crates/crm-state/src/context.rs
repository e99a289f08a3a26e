//! Application context - the root of all session state.
//!
//! Built once at startup and handed to consumers by reference. There is no
//! global store; whoever needs to read or mutate a collection borrows the
//! context.

use tracing::info;

use crm_model::{Contact, Lead, Opportunity, RecordKind};

use crate::board::PipelineBoard;
use crate::config::CrmConfig;
use crate::drag::DragController;
use crate::seed;
use crate::store::CollectionStores;
use crate::table::TableView;

#[derive(Debug, Clone)]
pub struct AppContext {
    pub config: CrmConfig,
    pub stores: CollectionStores,
    pub leads: Vec<Lead>,
    pub opportunities: Vec<Opportunity>,
    pub contacts: Vec<Contact>,
}

impl AppContext {
    /// Context with built-in seed stores and mock records.
    pub fn seeded(config: CrmConfig) -> Self {
        let context = Self {
            config,
            stores: CollectionStores::seeded(),
            leads: seed::leads(),
            opportunities: seed::opportunities(),
            contacts: seed::contacts(),
        };
        info!(
            leads = context.leads.len(),
            opportunities = context.opportunities.len(),
            contacts = context.contacts.len(),
            "session initialized"
        );
        context
    }

    /// Context with empty stores and tables.
    pub fn empty(config: CrmConfig) -> Self {
        Self {
            config,
            stores: CollectionStores::default(),
            leads: Vec::new(),
            opportunities: Vec::new(),
            contacts: Vec::new(),
        }
    }

    /// Fresh table view for `kind` using the configured defaults.
    pub fn table_view(&self, kind: RecordKind) -> TableView {
        self.config.table_view(kind)
    }

    /// Drag controller using the configured activation distance.
    pub fn drag_controller(&self) -> DragController {
        DragController::new(self.config.drag.activation_distance)
    }

    pub fn pipeline_board(&self) -> PipelineBoard<'_> {
        PipelineBoard::build(&self.stores.opportunity_stages, &self.opportunities)
    }

    pub fn record_count(&self, kind: RecordKind) -> usize {
        match kind {
            RecordKind::Leads => self.leads.len(),
            RecordKind::Opportunities => self.opportunities.len(),
            RecordKind::Contacts => self.contacts.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_context_is_consistent() {
        let context = AppContext::seeded(CrmConfig::default());
        assert_eq!(context.record_count(RecordKind::Leads), 6);
        assert!(context.pipeline_board().unassigned.is_empty());
        for lead in &context.leads {
            assert!(context.stores.lead_stages.contains(lead.status.as_str()));
            assert!(context.stores.lead_sources.contains(lead.source.as_str()));
        }
        for contact in &context.contacts {
            assert!(context.stores.contact_roles.contains(contact.role.as_str()));
        }
    }

    #[test]
    fn empty_context_has_nothing() {
        let context = AppContext::empty(CrmConfig::default());
        assert!(context.stores.lead_sources.is_empty());
        assert_eq!(context.record_count(RecordKind::Contacts), 0);
    }
}
