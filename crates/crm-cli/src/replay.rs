//! Interaction scripts replayed against an in-memory session.
//!
//! One command per line. Positions are 0-based. Blank lines and lines
//! starting with `#` are skipped.
//!
//! ```text
//! # put "Converted" right after "New"
//! drag lead-stages 3 1
//! add-source webinar Webinar
//! sort leads score
//! ```

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use anyhow::{Context, Result, anyhow, bail};
use tracing::{debug, info};

use crm_model::{CollectionKind, DefinitionId, LeadSource, RecordKind};
use crm_state::{AppContext, DragEvent, DropOutcome, Point, TableView};

/// Height of one list row in the simulated pointer gesture.
const ROW_HEIGHT: f32 = 40.0;

#[derive(Debug, Clone, PartialEq)]
pub enum ReplayCommand {
    Move {
        collection: CollectionKind,
        from: usize,
        to: usize,
    },
    Up {
        collection: CollectionKind,
        index: usize,
    },
    Down {
        collection: CollectionKind,
        index: usize,
    },
    Remove {
        collection: CollectionKind,
        id: String,
    },
    AddSource {
        id: DefinitionId,
        name: String,
    },
    Rename {
        collection: CollectionKind,
        id: String,
        label: String,
    },
    /// Pointer gesture from one row to another through the drag controller.
    Drag {
        collection: CollectionKind,
        from: usize,
        to: usize,
    },
    /// One click on a column header.
    Sort { table: RecordKind, column: String },
    Search { table: RecordKind, query: String },
}

/// What a command touched, so the caller knows what to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Affected {
    Collection(CollectionKind),
    Table(RecordKind),
}

impl ReplayCommand {
    pub fn affected(&self) -> Affected {
        match self {
            Self::Move { collection, .. }
            | Self::Up { collection, .. }
            | Self::Down { collection, .. }
            | Self::Remove { collection, .. }
            | Self::Rename { collection, .. }
            | Self::Drag { collection, .. } => Affected::Collection(*collection),
            Self::AddSource { .. } => Affected::Collection(CollectionKind::LeadSources),
            Self::Sort { table, .. } | Self::Search { table, .. } => Affected::Table(*table),
        }
    }
}

impl FromStr for ReplayCommand {
    type Err = anyhow::Error;

    fn from_str(line: &str) -> Result<Self> {
        let mut words = line.split_whitespace();
        let verb = words.next().ok_or_else(|| anyhow!("empty command"))?;
        let rest: Vec<&str> = words.collect();
        let command = match verb {
            "move" => {
                let [collection, from, to] = exact::<3>(verb, &rest)?;
                Self::Move {
                    collection: collection.parse()?,
                    from: index(from)?,
                    to: index(to)?,
                }
            }
            "drag" => {
                let [collection, from, to] = exact::<3>(verb, &rest)?;
                Self::Drag {
                    collection: collection.parse()?,
                    from: index(from)?,
                    to: index(to)?,
                }
            }
            "up" => {
                let [collection, position] = exact::<2>(verb, &rest)?;
                Self::Up {
                    collection: collection.parse()?,
                    index: index(position)?,
                }
            }
            "down" => {
                let [collection, position] = exact::<2>(verb, &rest)?;
                Self::Down {
                    collection: collection.parse()?,
                    index: index(position)?,
                }
            }
            "remove" => {
                let [collection, id] = exact::<2>(verb, &rest)?;
                Self::Remove {
                    collection: collection.parse()?,
                    id: id.to_string(),
                }
            }
            "add-source" => match rest.as_slice() {
                [id, name @ ..] if !name.is_empty() => Self::AddSource {
                    id: DefinitionId::new(*id)?,
                    name: name.join(" "),
                },
                _ => bail!("usage: add-source <id> <name>"),
            },
            "rename" => match rest.as_slice() {
                [collection, id, label @ ..] if !label.is_empty() => Self::Rename {
                    collection: collection.parse()?,
                    id: (*id).to_string(),
                    label: label.join(" "),
                },
                _ => bail!("usage: rename <collection> <id> <label>"),
            },
            "sort" => {
                let [table, column] = exact::<2>(verb, &rest)?;
                Self::Sort {
                    table: table.parse()?,
                    column: column.to_string(),
                }
            }
            "search" => match rest.as_slice() {
                [table, query @ ..] => Self::Search {
                    table: table.parse()?,
                    query: query.join(" "),
                },
                [] => bail!("usage: search <table> [query]"),
            },
            other => bail!("unknown command '{other}'"),
        };
        Ok(command)
    }
}

impl fmt::Display for ReplayCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Move {
                collection,
                from,
                to,
            } => write!(f, "move {collection} {from} {to}"),
            Self::Drag {
                collection,
                from,
                to,
            } => write!(f, "drag {collection} {from} {to}"),
            Self::Up { collection, index } => write!(f, "up {collection} {index}"),
            Self::Down { collection, index } => write!(f, "down {collection} {index}"),
            Self::Remove { collection, id } => write!(f, "remove {collection} {id}"),
            Self::AddSource { id, name } => write!(f, "add-source {id} {name}"),
            Self::Rename {
                collection,
                id,
                label,
            } => write!(f, "rename {collection} {id} {label}"),
            Self::Sort { table, column } => write!(f, "sort {table} {column}"),
            Self::Search { table, query } => write!(f, "search {table} {query}"),
        }
    }
}

fn exact<'a, const N: usize>(verb: &str, args: &[&'a str]) -> Result<[&'a str; N]> {
    <[&str; N]>::try_from(args)
        .map_err(|_| anyhow!("'{verb}' takes {N} arguments, got {}", args.len()))
}

fn index(raw: &str) -> Result<usize> {
    raw.parse::<usize>()
        .with_context(|| format!("'{raw}' is not a position"))
}

/// Outcome of one applied command.
#[derive(Debug, Clone, PartialEq)]
pub struct StepReport {
    /// 1-based script line.
    pub line: usize,
    pub command: ReplayCommand,
    /// Whether the command changed any state.
    pub changed: bool,
}

/// A seeded context plus one table view per record table.
pub struct ReplaySession {
    pub context: AppContext,
    views: HashMap<RecordKind, TableView>,
}

impl ReplaySession {
    pub fn new(context: AppContext) -> Self {
        Self {
            context,
            views: HashMap::new(),
        }
    }

    /// Current view of `table`, or the configured default if untouched.
    pub fn view(&self, table: RecordKind) -> TableView {
        self.views
            .get(&table)
            .cloned()
            .unwrap_or_else(|| self.context.table_view(table))
    }

    fn view_mut(&mut self, table: RecordKind) -> &mut TableView {
        let context = &self.context;
        self.views
            .entry(table)
            .or_insert_with(|| context.table_view(table))
    }

    /// Parse and apply one script line. Returns `None` for blank and comment lines.
    pub fn apply_line(&mut self, line: usize, text: &str) -> Result<Option<StepReport>> {
        let text = text.trim();
        if text.is_empty() || text.starts_with('#') {
            return Ok(None);
        }
        let command: ReplayCommand = text
            .parse()
            .with_context(|| format!("line {line}: {text}"))?;
        let changed = self
            .apply(&command)
            .with_context(|| format!("line {line}: {text}"))?;
        if !changed {
            debug!(line, %command, "command changed nothing");
        }
        Ok(Some(StepReport {
            line,
            command,
            changed,
        }))
    }

    /// Apply every line of `script` in order, stopping at the first error.
    pub fn run_script(&mut self, script: &str) -> Result<Vec<StepReport>> {
        let mut reports = Vec::new();
        for (number, text) in script.lines().enumerate() {
            if let Some(report) = self.apply_line(number + 1, text)? {
                reports.push(report);
            }
        }
        info!(steps = reports.len(), "replay finished");
        Ok(reports)
    }

    /// Returns whether anything changed.
    pub fn apply(&mut self, command: &ReplayCommand) -> Result<bool> {
        let stores = &mut self.context.stores;
        let changed = match command {
            ReplayCommand::Move {
                collection,
                from,
                to,
            } => stores.move_in(*collection, *from, *to),
            ReplayCommand::Up { collection, index } => stores.move_up_in(*collection, *index),
            ReplayCommand::Down { collection, index } => stores.move_down_in(*collection, *index),
            ReplayCommand::Remove { collection, id } => stores.remove_in(*collection, id),
            ReplayCommand::AddSource { id, name } => {
                stores.lead_sources.add(LeadSource {
                    id: id.clone(),
                    name: name.clone(),
                    description: String::new(),
                    active: true,
                })?;
                true
            }
            ReplayCommand::Rename {
                collection,
                id,
                label,
            } => stores.rename_in(*collection, id, label),
            ReplayCommand::Drag {
                collection,
                from,
                to,
            } => {
                let outcome = self.simulate_drag(*collection, *from, *to);
                self.context.stores.drop_in(*collection, outcome)
            }
            ReplayCommand::Sort { table, column } => {
                self.view_mut(*table).click_header(column);
                true
            }
            ReplayCommand::Search { table, query } => {
                let view = self.view_mut(*table);
                let before = view.search().to_string();
                view.set_search(query);
                view.search() != before
            }
        };
        Ok(changed)
    }

    /// Press on row `from`, move to row `to`, release.
    ///
    /// The pointer also travels sideways by the activation distance, so the
    /// gesture always becomes a drag however the threshold is configured.
    fn simulate_drag(&self, collection: CollectionKind, from: usize, to: usize) -> DropOutcome {
        let len = self.context.stores.len_of(collection);
        let mut controller = self.context.drag_controller();
        let sideways = self.context.config.drag.activation_distance.max(0.0);
        let row_center = |row: usize| Point::new(10.0, row as f32 * ROW_HEIGHT + ROW_HEIGHT / 2.0);
        let target = row_center(to);
        controller.handle(
            DragEvent::PointerDown {
                index: from,
                position: row_center(from),
            },
            len,
        );
        controller.handle(
            DragEvent::PointerMove {
                position: Point::new(target.x + sideways, target.y),
                over: (to < len).then_some(to),
            },
            len,
        );
        controller
            .handle(DragEvent::PointerUp, len)
            .unwrap_or(DropOutcome::Unchanged)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_verb() {
        let cases = [
            "move lead-stages 3 1",
            "drag lead-stages 0 2",
            "up contact-roles 2",
            "down contact-roles 0",
            "remove lead-sources website",
            "add-source webinar Webinar Events",
            "rename lead-stages new Fresh Lead",
            "sort leads score",
            "search contacts acme corp",
        ];
        for case in cases {
            let command: ReplayCommand = case.parse().unwrap();
            assert_eq!(command.to_string(), case);
        }
    }

    #[test]
    fn rejects_malformed_lines() {
        assert!("move lead-stages 3".parse::<ReplayCommand>().is_err());
        assert!("move lead-stages x 1".parse::<ReplayCommand>().is_err());
        assert!("move nowhere 0 1".parse::<ReplayCommand>().is_err());
        assert!("teleport leads".parse::<ReplayCommand>().is_err());
        assert!("add-source webinar".parse::<ReplayCommand>().is_err());
    }

    #[test]
    fn affected_targets() {
        let add: ReplayCommand = "add-source webinar Webinar".parse().unwrap();
        assert_eq!(
            add.affected(),
            Affected::Collection(CollectionKind::LeadSources)
        );
        let sort: ReplayCommand = "sort deals amount".parse().unwrap();
        assert_eq!(sort.affected(), Affected::Table(RecordKind::Opportunities));
    }
}
