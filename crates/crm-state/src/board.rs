//! Opportunity pipeline board - one column per stage, in store order.

use tracing::warn;

use crm_model::{Definition, DefinitionId, Opportunity, OpportunityStage};

use crate::reorder::OrderedList;

#[derive(Debug, Clone)]
pub struct BoardColumn<'a> {
    pub stage: &'a OpportunityStage,
    pub cards: Vec<&'a Opportunity>,
}

impl BoardColumn<'_> {
    pub fn total_amount(&self) -> f64 {
        self.cards.iter().map(|card| card.amount).sum()
    }

    pub fn weighted_amount(&self) -> f64 {
        self.cards.iter().map(|card| card.weighted_amount()).sum()
    }
}

#[derive(Debug, Clone)]
pub struct PipelineBoard<'a> {
    pub columns: Vec<BoardColumn<'a>>,
    /// Opportunities whose stage id is not in the store.
    pub unassigned: Vec<&'a Opportunity>,
}

impl<'a> PipelineBoard<'a> {
    /// Group `opportunities` by stage. Cards keep their input order.
    pub fn build(
        stages: &'a OrderedList<OpportunityStage>,
        opportunities: &'a [Opportunity],
    ) -> Self {
        let mut columns: Vec<BoardColumn<'a>> = stages
            .iter()
            .map(|stage| BoardColumn {
                stage,
                cards: Vec::new(),
            })
            .collect();
        let mut unassigned = Vec::new();
        for opportunity in opportunities {
            match stages.position(opportunity.stage.as_str()) {
                Some(index) => columns[index].cards.push(opportunity),
                None => {
                    warn!(
                        opportunity = %opportunity.id,
                        stage = %opportunity.stage,
                        "opportunity references an unknown stage"
                    );
                    unassigned.push(opportunity);
                }
            }
        }
        Self {
            columns,
            unassigned,
        }
    }

    /// Stage ids referenced by opportunities but missing from the store.
    pub fn dangling_stages(&self) -> Vec<&'a DefinitionId> {
        let mut ids: Vec<&DefinitionId> = self.unassigned.iter().map(|&o| &o.stage).collect();
        ids.sort();
        ids.dedup();
        ids
    }

    pub fn column(&self, stage_id: &str) -> Option<&BoardColumn<'a>> {
        self.columns
            .iter()
            .find(|column| column.stage.id() == stage_id)
    }

    pub fn total_amount(&self) -> f64 {
        self.columns.iter().map(BoardColumn::total_amount).sum()
    }
}
