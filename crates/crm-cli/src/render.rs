//! Terminal tables for records, collections and the pipeline board.

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use crm_model::{CollectionKind, FieldValue, Record};
use crm_state::{DefinitionRow, PipelineBoard, TablePage, TableView};

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

/// One page of a record table. Sorted columns carry a direction arrow.
pub fn record_table<R: Record>(
    columns: &[&str],
    view: &TableView,
    page: &TablePage<'_, R>,
) -> Table {
    let mut table = Table::new();
    table.set_header(
        columns
            .iter()
            .map(|&column| match view.sort().indicator_for(column) {
                Some(arrow) => header_cell(&format!("{column} {arrow}")),
                None => header_cell(column),
            })
            .collect::<Vec<_>>(),
    );
    apply_table_style(&mut table);
    for row in &page.rows {
        table.add_row(
            columns
                .iter()
                .map(|&column| value_cell(&row.field(column)))
                .collect::<Vec<_>>(),
        );
    }
    if let Some(first) = page.rows.first() {
        for (index, &column) in columns.iter().enumerate() {
            if first.field(column).as_number().is_some() {
                align_column(&mut table, index, CellAlignment::Right);
            }
        }
    }
    table
}

/// Footer line under a record table.
pub fn page_footer<R>(page: &TablePage<'_, R>, view: &TableView) -> String {
    let mut footer = format!(
        "Page {} of {} ({} rows)",
        page.page + 1,
        page.page_count,
        page.total_rows
    );
    if !view.search().is_empty() {
        footer.push_str(&format!(", search \"{}\"", view.search()));
    }
    if let Some(key) = view.sort().sort_key() {
        footer.push_str(&format!(", sorted by {key} {}", view.sort().direction()));
    }
    footer
}

/// Entries of one configuration list, in their stored order.
pub fn collection_table(rows: &[DefinitionRow]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![header_cell("#"), header_cell("Id"), header_cell("Label")]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    for row in rows {
        table.add_row(vec![
            dim_cell(row.position + 1),
            Cell::new(row.id.as_str()),
            Cell::new(&row.label),
        ]);
    }
    table
}

pub fn collections_table(summary: &[(CollectionKind, usize)]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Collection"),
        header_cell("Name"),
        header_cell("Entries"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);
    for (kind, len) in summary {
        let count = if *len == 0 {
            dim_cell(len)
        } else {
            Cell::new(len)
        };
        table.add_row(vec![
            Cell::new(kind.as_str())
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
            Cell::new(kind.title()),
            count,
        ]);
    }
    table
}

/// Stage columns as rows, followed by a TOTAL row and any unassigned cards.
pub fn board_table(board: &PipelineBoard<'_>) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Stage"),
        header_cell("Prob."),
        header_cell("Deals"),
        header_cell("Amount"),
        header_cell("Weighted"),
        header_cell("Opportunities"),
    ]);
    apply_table_style(&mut table);
    for index in 1..=4 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    for column in &board.columns {
        let names: Vec<&str> = column.cards.iter().map(|card| card.name.as_str()).collect();
        table.add_row(vec![
            Cell::new(&column.stage.label)
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
            Cell::new(format!("{}%", column.stage.probability)),
            count_cell(column.cards.len()),
            money_cell(column.total_amount()),
            money_cell(column.weighted_amount()),
            if names.is_empty() {
                dim_cell("-")
            } else {
                Cell::new(names.join(", "))
            },
        ]);
    }
    if !board.unassigned.is_empty() {
        let names: Vec<String> = board
            .unassigned
            .iter()
            .map(|card| format!("{} ({})", card.name, card.stage))
            .collect();
        let amount: f64 = board.unassigned.iter().map(|card| card.amount).sum();
        table.add_row(vec![
            Cell::new("Unassigned").fg(Color::Yellow),
            dim_cell("-"),
            Cell::new(board.unassigned.len()).fg(Color::Yellow),
            money_cell(amount),
            dim_cell("-"),
            Cell::new(names.join(", ")).fg(Color::Yellow),
        ]);
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        dim_cell("-"),
        Cell::new(board.columns.iter().map(|c| c.cards.len()).sum::<usize>())
            .add_attribute(Attribute::Bold),
        money_cell(board.total_amount()).add_attribute(Attribute::Bold),
        money_cell(board.columns.iter().map(|c| c.weighted_amount()).sum())
            .add_attribute(Attribute::Bold),
        dim_cell("-"),
    ]);
    table
}

fn value_cell(value: &FieldValue) -> Cell {
    match value {
        FieldValue::Missing => dim_cell("-"),
        FieldValue::Number(number) if number.fract() == 0.0 => Cell::new(format!("{number:.0}")),
        FieldValue::Number(number) => Cell::new(format!("{number:.2}")),
        FieldValue::Text(text) => Cell::new(text),
    }
}

fn money_cell(amount: f64) -> Cell {
    Cell::new(format!("{amount:.2}"))
}

fn count_cell(count: usize) -> Cell {
    if count > 0 {
        Cell::new(count).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

pub fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crm_model::{DynamicRecord, RecordKind};
    use crm_state::{AppContext, CrmConfig};

    #[test]
    fn sorted_header_shows_arrow() {
        let context = AppContext::seeded(CrmConfig::default());
        let mut view = context.table_view(RecordKind::Leads);
        view.click_header("score");
        let page = view.project(&context.leads);
        let mut table = record_table(RecordKind::Leads.columns(), &view, &page);
        table.set_content_arrangement(ContentArrangement::Disabled);
        let rendered = table.to_string();
        assert!(rendered.contains("score ▲"));
        assert!(!rendered.contains("value ▲"));
    }

    #[test]
    fn missing_cells_render_as_dash() {
        let records = vec![DynamicRecord::new("a").with("x", FieldValue::Missing)];
        let view = TableView::default();
        let page = view.project(&records);
        let rendered = record_table(&["x"], &view, &page).to_string();
        assert!(rendered.contains('-'));
    }

    #[test]
    fn board_lists_unassigned_cards() {
        let mut context = AppContext::seeded(CrmConfig::default());
        context
            .stores
            .remove_in(CollectionKind::OpportunityStages, "negotiation");
        let mut table = board_table(&context.pipeline_board());
        table.set_content_arrangement(ContentArrangement::Disabled);
        let rendered = table.to_string();
        assert!(rendered.contains("Unassigned"));
        assert!(rendered.contains("(negotiation)"));
    }
}
