use std::collections::BTreeSet;
use std::io::Read;

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::{info, warn};

use crm_cli::render::{
    board_table, collection_table, collections_table, page_footer, record_table,
};
use crm_cli::replay::{Affected, ReplaySession};
use crm_model::{CollectionKind, Record, RecordKind};
use crm_state::{AppContext, TableView, load_csv};

use crate::cli::{ListArgs, OutputFormatArg, ReplayArgs, TableArgs};

#[derive(Serialize)]
struct PageJson<'a, R> {
    table: &'a str,
    page: usize,
    page_count: usize,
    total_rows: usize,
    sort_key: Option<&'a str>,
    direction: String,
    rows: Vec<&'a R>,
}

pub fn run_table(context: &AppContext, args: &TableArgs) -> Result<()> {
    let mut view = context.table_view(args.table);
    if let Some(rows) = args.rows {
        view = TableView::with_rows_per_page(rows).with_sort(view.sort().clone());
    }
    for column in &args.sort {
        view.click_header(column);
    }
    if let Some(query) = &args.search {
        view.set_search(query);
    }
    view.set_page(args.page.saturating_sub(1));

    if let Some(path) = &args.from {
        let records = load_csv(path).with_context(|| format!("load {}", path.display()))?;
        info!(path = %path.display(), rows = records.len(), "loaded csv table");
        let mut columns: Vec<&str> = Vec::new();
        let mut seen = BTreeSet::new();
        for record in &records {
            for name in record.field_names() {
                if seen.insert(name) {
                    columns.push(name);
                }
            }
        }
        return show_records(args.table.as_str(), &records, &columns, &view, args.format);
    }
    let columns = args.table.columns();
    match args.table {
        RecordKind::Leads => show_records("leads", &context.leads, columns, &view, args.format),
        RecordKind::Opportunities => show_records(
            "opportunities",
            &context.opportunities,
            columns,
            &view,
            args.format,
        ),
        RecordKind::Contacts => {
            show_records("contacts", &context.contacts, columns, &view, args.format)
        }
    }
}

fn show_records<R: Record + Serialize>(
    name: &str,
    records: &[R],
    columns: &[&str],
    view: &TableView,
    format: OutputFormatArg,
) -> Result<()> {
    let page = view.project(records);
    match format {
        OutputFormatArg::Json => {
            let json = PageJson {
                table: name,
                page: page.page + 1,
                page_count: page.page_count,
                total_rows: page.total_rows,
                sort_key: view.sort().sort_key(),
                direction: view.sort().direction().to_string(),
                rows: page.rows.clone(),
            };
            println!(
                "{}",
                serde_json::to_string_pretty(&json).context("serialize table page")?
            );
        }
        OutputFormatArg::Table => {
            println!("{}", record_table(columns, view, &page));
            println!("{}", page_footer(&page, view));
        }
    }
    Ok(())
}

pub fn run_list(context: &AppContext, args: &ListArgs) -> Result<()> {
    print_collection(context, args.collection, args.format)
}

fn print_collection(
    context: &AppContext,
    kind: CollectionKind,
    format: OutputFormatArg,
) -> Result<()> {
    let rows = context.stores.rows(kind);
    match format {
        OutputFormatArg::Json => println!(
            "{}",
            serde_json::to_string_pretty(&rows).context("serialize collection")?
        ),
        OutputFormatArg::Table => {
            println!("{}", kind.title());
            println!("{}", collection_table(&rows));
        }
    }
    Ok(())
}

pub fn run_collections(context: &AppContext) -> Result<()> {
    println!("{}", collections_table(&context.stores.summary()));
    Ok(())
}

pub fn run_board(context: &AppContext) -> Result<()> {
    let board = context.pipeline_board();
    println!("{}", board_table(&board));
    let dangling = board.dangling_stages();
    if !dangling.is_empty() {
        let ids: Vec<&str> = dangling.iter().map(|id| id.as_str()).collect();
        eprintln!("warning: unknown opportunity stages: {}", ids.join(", "));
    }
    Ok(())
}

pub fn run_replay(context: AppContext, args: &ReplayArgs) -> Result<()> {
    let script = if args.script.as_os_str() == "-" {
        let mut buffer = String::new();
        std::io::stdin()
            .read_to_string(&mut buffer)
            .context("read script from stdin")?;
        buffer
    } else {
        std::fs::read_to_string(&args.script)
            .with_context(|| format!("read {}", args.script.display()))?
    };

    let mut session = ReplaySession::new(context);
    let mut touched: Vec<Affected> = Vec::new();
    for (number, text) in script.lines().enumerate() {
        let Some(report) = session.apply_line(number + 1, text)? else {
            continue;
        };
        let affected = report.command.affected();
        if !touched.contains(&affected) {
            touched.push(affected);
        }
        if args.quiet_steps {
            continue;
        }
        let status = if report.changed { "changed" } else { "no change" };
        println!("[{}] {} ({status})", report.line, report.command);
        print_affected(&session, affected)?;
    }
    if args.quiet_steps {
        for affected in touched {
            print_affected(&session, affected)?;
        }
    }
    let dangling = session.context.pipeline_board().dangling_stages().len();
    if dangling > 0 {
        warn!(dangling, "replay left opportunities without a stage");
    }
    Ok(())
}

fn print_affected(session: &ReplaySession, affected: Affected) -> Result<()> {
    match affected {
        Affected::Collection(kind) => {
            print_collection(&session.context, kind, OutputFormatArg::Table)
        }
        Affected::Table(kind) => {
            let view = session.view(kind);
            let context = &session.context;
            let columns = kind.columns();
            let format = OutputFormatArg::Table;
            match kind {
                RecordKind::Leads => show_records("leads", &context.leads, columns, &view, format),
                RecordKind::Opportunities => show_records(
                    "opportunities",
                    &context.opportunities,
                    columns,
                    &view,
                    format,
                ),
                RecordKind::Contacts => {
                    show_records("contacts", &context.contacts, columns, &view, format)
                }
            }
        }
    }
}
