//! Replay scripts against a seeded session.

use crm_cli::replay::{ReplayCommand, ReplaySession};
use crm_model::{CollectionKind, RecordKind};
use crm_state::{AppContext, CrmConfig, SortDirection};

fn session() -> ReplaySession {
    ReplaySession::new(AppContext::seeded(CrmConfig::default()))
}

fn labels(session: &ReplaySession, kind: CollectionKind) -> Vec<String> {
    session
        .context
        .stores
        .rows(kind)
        .into_iter()
        .map(|row| row.label)
        .collect()
}

#[test]
fn drag_script_moves_converted_up() {
    let mut session = session();
    let reports = session
        .run_script("# reorder lead stages\n\ndrag lead-stages 3 1\n")
        .unwrap();
    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0].line, 3);
    assert!(reports[0].changed);
    insta::assert_debug_snapshot!(labels(&session, CollectionKind::LeadStages), @r###"
    [
        "New",
        "Converted",
        "Contacted",
        "Qualified",
    ]
    "###);
}

#[test]
fn drag_and_move_agree() {
    let mut dragged = session();
    dragged.run_script("drag opportunity-stages 0 4").unwrap();
    let mut moved = session();
    moved.run_script("move opportunity-stages 0 4").unwrap();
    assert_eq!(dragged.context.stores, moved.context.stores);
}

#[test]
fn drag_in_place_changes_nothing() {
    let mut session = session();
    let before = session.context.stores.clone();
    let reports = session.run_script("drag lead-stages 2 2").unwrap();
    assert!(!reports[0].changed);
    assert_eq!(session.context.stores, before);
}

#[test]
fn add_then_remove_webinar_restores_sources() {
    let mut session = session();
    let before = session.context.stores.lead_sources.clone();
    let reports = session
        .run_script("add-source webinar Webinar\nremove lead-sources webinar\n")
        .unwrap();
    assert!(reports.iter().all(|report| report.changed));
    assert_eq!(session.context.stores.lead_sources, before);
}

#[test]
fn duplicate_source_aborts_with_line_number() {
    let mut session = session();
    let err = session
        .run_script("up lead-sources 1\nadd-source website Website\n")
        .unwrap_err();
    let message = format!("{err:#}");
    assert!(message.starts_with("line 2: add-source website Website"));
    assert!(message.contains("already contains an entry with id 'website'"));
}

#[test]
fn out_of_range_and_unknown_ids_are_reported_not_fatal() {
    let mut session = session();
    let before = session.context.stores.clone();
    let reports = session
        .run_script("move lead-stages 0 40\nremove contact-roles nobody\nup lead-stages 0\n")
        .unwrap();
    assert_eq!(reports.len(), 3);
    assert!(reports.iter().all(|report| !report.changed));
    assert_eq!(session.context.stores, before);
}

#[test]
fn malformed_line_is_an_error() {
    let mut session = session();
    let err = session.run_script("move lead-stages one two").unwrap_err();
    assert!(format!("{err:#}").starts_with("line 1:"));
}

#[test]
fn sort_clicks_cycle_the_table_view() {
    let mut session = session();
    session.run_script("sort leads score\nsort leads score").unwrap();
    let view = session.view(RecordKind::Leads);
    assert_eq!(view.sort().sort_key(), Some("score"));
    assert_eq!(view.sort().direction(), SortDirection::Descending);

    session.run_script("sort leads score").unwrap();
    assert!(!session.view(RecordKind::Leads).sort().is_active());
}

#[test]
fn search_filters_the_table_view() {
    let mut session = session();
    session.run_script("search leads alex").unwrap();
    let view = session.view(RecordKind::Leads);
    let page = view.project(&session.context.leads);
    assert_eq!(page.total_rows, 2);
}

#[test]
fn rename_changes_display_label_only() {
    let mut session = session();
    let command: ReplayCommand = "rename lead-stages qualified Sales Ready".parse().unwrap();
    assert!(session.apply(&command).unwrap());
    let rows = session.context.stores.rows(CollectionKind::LeadStages);
    assert_eq!(rows[2].id, "qualified");
    assert_eq!(rows[2].label, "Sales Ready");
}

#[test]
fn drag_to_adjacent_row_honours_a_large_activation_distance() {
    let mut config = CrmConfig::default();
    config.drag.activation_distance = 120.0;
    let mut dragged = ReplaySession::new(AppContext::seeded(config));
    let reports = dragged.run_script("drag lead-stages 0 1").unwrap();
    assert!(reports[0].changed);

    let mut moved = session();
    moved.run_script("move lead-stages 0 1").unwrap();
    assert_eq!(dragged.context.stores, moved.context.stores);
}
