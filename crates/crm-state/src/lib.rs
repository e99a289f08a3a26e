//! Client-side list ordering state for the Pipeline Desk CRM.
//!
//! - [`SortState`] - three-state column sort and sorted projections
//! - [`OrderedList`] - positional reorder state for definitions
//! - [`DragController`] - pointer/keyboard drag state machine
//! - [`CollectionStores`] - one reorderable list per configuration domain
//! - [`TableView`] / [`PipelineBoard`] - the page-level projections
//! - [`AppContext`] - the root object that owns all of the above

pub mod board;
pub mod config;
pub mod context;
pub mod drag;
pub mod error;
pub mod ingest;
pub mod reorder;
pub mod seed;
pub mod sort;
pub mod store;
pub mod table;

pub use board::{BoardColumn, PipelineBoard};
pub use config::{CrmConfig, DisplayConfig, DragConfig, TableDefaults};
pub use context::AppContext;
pub use drag::{
    DragController, DragEvent, DragInput, DragState, DropOutcome, KeyDirection, Point, apply_drop,
};
pub use error::{Result, StateError};
pub use ingest::{load_csv, read_csv};
pub use reorder::OrderedList;
pub use sort::{SortDirection, SortState, compare_fields};
pub use store::{CollectionStores, DefinitionRow};
pub use table::{TablePage, TableView};
