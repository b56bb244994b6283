//! Text renderings of catalog entries and search results.

use crate::core::catalog::{CatalogStore, CatalogWarning};
use crate::core::display::DisplayOptions;
use crate::domain::model::{Card, Cylinder, SearchMatch};
use crate::utils::error::{CatalogError, Result};
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Csv,
    Tsv,
}

#[derive(Debug, Serialize)]
struct CardView<'a> {
    no: &'a str,
    name: &'a str,
    rarity: u32,
    stars: String,
    image_url: String,
}

impl<'a> CardView<'a> {
    fn new(card: &'a Card, display: &DisplayOptions) -> Self {
        Self {
            no: &card.no,
            name: &card.name,
            rarity: card.rarity,
            stars: display.stars(card.rarity),
            image_url: display.image_url(card),
        }
    }
}

#[derive(Debug, Serialize)]
struct MatchView<'a> {
    #[serde(flatten)]
    search_match: &'a SearchMatch,
    remaining: Vec<CardView<'a>>,
}

/// Flat record for CSV/TSV; sequences are joined with spaces.
#[derive(Debug, Serialize)]
struct MatchRecord<'a> {
    cylinder_id: &'a str,
    cylinder_name: &'a str,
    row_position: u32,
    card_index: usize,
    crossed_row: bool,
    remaining_cards: String,
    remaining_names: String,
}

#[derive(Debug, Serialize)]
struct RowRecord<'a> {
    cylinder_id: &'a str,
    position: u32,
    cards: String,
}

#[derive(Debug, Serialize)]
struct CylinderSummary<'a> {
    id: &'a str,
    name: &'a str,
    rows: usize,
    cards: usize,
}

#[derive(Debug, Serialize)]
struct WarningRecord {
    kind: &'static str,
    message: String,
}

#[derive(Debug, Serialize)]
struct ValidationReport {
    cards: usize,
    cylinders: usize,
    warnings: Vec<WarningRecord>,
}

pub fn render_matches(
    format: OutputFormat,
    catalog: &CatalogStore,
    matches: &[SearchMatch],
    display: &DisplayOptions,
) -> Result<String> {
    match format {
        OutputFormat::Json => {
            let views: Vec<MatchView<'_>> = matches
                .iter()
                .map(|m| MatchView {
                    search_match: m,
                    remaining: catalog
                        .resolve(&m.remaining_cards)
                        .into_iter()
                        .map(|c| CardView::new(c, display))
                        .collect(),
                })
                .collect();
            Ok(serde_json::to_string_pretty(&views)?)
        }
        OutputFormat::Csv | OutputFormat::Tsv => {
            let records: Vec<MatchRecord<'_>> = matches
                .iter()
                .map(|m| MatchRecord {
                    cylinder_id: &m.cylinder_id,
                    cylinder_name: &m.cylinder_name,
                    row_position: m.row_position,
                    card_index: m.card_index,
                    crossed_row: m.crossed_row,
                    remaining_cards: m.remaining_cards.join(" "),
                    remaining_names: catalog
                        .resolve(&m.remaining_cards)
                        .iter()
                        .map(|c| c.name.as_str())
                        .collect::<Vec<_>>()
                        .join(" / "),
                })
                .collect();
            to_delimited(&records, delimiter(format))
        }
        OutputFormat::Table => {
            if matches.is_empty() {
                return Ok("No matches found\n".to_string());
            }
            let mut out = String::new();
            for m in matches {
                let _ = writeln!(
                    out,
                    "[{}] {}  row {}, card {}{}",
                    m.cylinder_id,
                    m.cylinder_name,
                    m.row_position,
                    m.card_index + 1,
                    if m.crossed_row { " (next row)" } else { "" }
                );
                let remaining = catalog.resolve(&m.remaining_cards);
                if remaining.is_empty() {
                    let _ = writeln!(out, "  (end of cylinder)");
                }
                for card in remaining {
                    let _ = writeln!(
                        out,
                        "  {:>4}  {}  {}",
                        card.no,
                        card.name,
                        display.stars(card.rarity)
                    );
                }
            }
            Ok(out)
        }
    }
}

pub fn render_cards(format: OutputFormat, cards: &[&Card], display: &DisplayOptions) -> Result<String> {
    let views: Vec<CardView<'_>> = cards.iter().map(|c| CardView::new(c, display)).collect();
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&views)?),
        OutputFormat::Csv | OutputFormat::Tsv => to_delimited(&views, delimiter(format)),
        OutputFormat::Table => {
            let mut out = String::new();
            for view in &views {
                let _ = writeln!(out, "{:>4}  {}  {}", view.no, view.name, view.stars);
            }
            Ok(out)
        }
    }
}

pub fn render_cylinder(format: OutputFormat, cylinder: &Cylinder) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(cylinder)?),
        OutputFormat::Csv | OutputFormat::Tsv => {
            let records: Vec<RowRecord<'_>> = cylinder
                .rows
                .iter()
                .map(|row| RowRecord {
                    cylinder_id: &cylinder.id,
                    position: row.position,
                    cards: row.cards.join(" "),
                })
                .collect();
            to_delimited(&records, delimiter(format))
        }
        OutputFormat::Table => {
            let mut out = format!("[{}] {}\n", cylinder.id, cylinder.name);
            for row in &cylinder.rows {
                let _ = writeln!(out, "  {:>2}: {}", row.position, row.cards.join(" "));
            }
            Ok(out)
        }
    }
}

pub fn render_cylinders(format: OutputFormat, cylinders: &[Cylinder]) -> Result<String> {
    let summaries: Vec<CylinderSummary<'_>> = cylinders
        .iter()
        .map(|c| CylinderSummary {
            id: &c.id,
            name: &c.name,
            rows: c.rows.len(),
            cards: c.card_count(),
        })
        .collect();
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&summaries)?),
        OutputFormat::Csv | OutputFormat::Tsv => to_delimited(&summaries, delimiter(format)),
        OutputFormat::Table => {
            let mut out = String::new();
            for s in &summaries {
                let _ = writeln!(out, "[{}] {}  ({} rows, {} cards)", s.id, s.name, s.rows, s.cards);
            }
            Ok(out)
        }
    }
}

/// Summary of a loaded catalog plus its lint warnings.
pub fn render_validation(
    format: OutputFormat,
    catalog: &CatalogStore,
    warnings: &[CatalogWarning],
) -> Result<String> {
    let report = ValidationReport {
        cards: catalog.all_cards().len(),
        cylinders: catalog.all_cylinders().len(),
        warnings: warnings
            .iter()
            .map(|w| WarningRecord {
                kind: w.kind(),
                message: w.to_string(),
            })
            .collect(),
    };

    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&report)?),
        OutputFormat::Csv | OutputFormat::Tsv => to_delimited(&report.warnings, delimiter(format)),
        OutputFormat::Table => {
            let mut out = String::new();
            for w in &report.warnings {
                let _ = writeln!(out, "⚠️ {}", w.message);
            }
            let _ = writeln!(
                out,
                "✅ {} cards, {} cylinders, {} warning(s)",
                report.cards,
                report.cylinders,
                report.warnings.len()
            );
            Ok(out)
        }
    }
}

fn delimiter(format: OutputFormat) -> u8 {
    match format {
        OutputFormat::Tsv => b'\t',
        _ => b',',
    }
}

fn to_delimited<T: Serialize>(records: &[T], delimiter: u8) -> Result<String> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_writer(Vec::new());
    for record in records {
        writer.serialize(record)?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| CatalogError::IoError(e.into_error()))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
