//! Read-only catalog of cards and cylinders.
//!
//! A `CatalogStore` is built once from the two JSON documents produced by the
//! extraction script and never mutated afterwards. Structural problems (duplicate
//! keys, unordered rows) are rejected at construction time so the query engine
//! can rely on them; softer problems are reported by [`CatalogStore::lint`].

use crate::domain::identifier::{card_number, is_canonical};
use crate::domain::model::{Card, CardsData, Cylinder, CylindersData};
use crate::domain::ports::DataSource;
use crate::utils::error::{CatalogError, Result};
use crate::utils::validation::Validate;
use serde::de::DeserializeOwned;
use std::collections::{HashMap, HashSet};
use std::fmt;

/// Card numbers the extraction script accepts.
pub const CARD_NUMBER_MIN: u32 = 1;
pub const CARD_NUMBER_MAX: u32 = 61;

#[derive(Debug, Clone, Default)]
pub struct CatalogStore {
    cards: Vec<Card>,
    cylinders: Vec<Cylinder>,
    card_index: HashMap<String, usize>,
}

/// Non-fatal findings about loaded catalog data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogWarning {
    UnknownCard {
        cylinder_id: String,
        row_position: u32,
        card_no: String,
    },
    NonCanonicalId {
        location: String,
        card_no: String,
    },
    OutOfRange {
        location: String,
        card_no: String,
    },
    EmptyRow {
        cylinder_id: String,
        row_position: u32,
    },
}

impl CatalogWarning {
    pub fn kind(&self) -> &'static str {
        match self {
            CatalogWarning::UnknownCard { .. } => "unknown_card",
            CatalogWarning::NonCanonicalId { .. } => "non_canonical_id",
            CatalogWarning::OutOfRange { .. } => "out_of_range",
            CatalogWarning::EmptyRow { .. } => "empty_row",
        }
    }
}

impl fmt::Display for CatalogWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogWarning::UnknownCard {
                cylinder_id,
                row_position,
                card_no,
            } => write!(
                f,
                "cylinder {} row {} references unknown card {}",
                cylinder_id, row_position, card_no
            ),
            CatalogWarning::NonCanonicalId { location, card_no } => {
                write!(f, "{}: identifier {:?} is not in canonical form", location, card_no)
            }
            CatalogWarning::OutOfRange { location, card_no } => write!(
                f,
                "{}: card {} is outside {}..={}",
                location, card_no, CARD_NUMBER_MIN, CARD_NUMBER_MAX
            ),
            CatalogWarning::EmptyRow {
                cylinder_id,
                row_position,
            } => write!(f, "cylinder {} row {} has no cards", cylinder_id, row_position),
        }
    }
}

impl CatalogStore {
    /// Builds and validates a store from already-parsed data.
    pub fn new(cards: Vec<Card>, cylinders: Vec<Cylinder>) -> Result<Self> {
        let mut card_index = HashMap::with_capacity(cards.len());
        for (i, card) in cards.iter().enumerate() {
            if card_index.insert(card.no.clone(), i).is_some() {
                return Err(CatalogError::DataValidationError {
                    source_name: "cards".to_string(),
                    message: format!("duplicate card no {}", card.no),
                });
            }
        }

        let store = Self {
            cards,
            cylinders,
            card_index,
        };
        store.validate()?;

        tracing::debug!(
            "Catalog ready: {} cards, {} cylinders",
            store.cards.len(),
            store.cylinders.len()
        );
        Ok(store)
    }

    /// 從兩份 JSON 字串建立目錄
    pub fn from_json_str(cards_json: &str, cylinders_json: &str) -> Result<Self> {
        let cards: CardsData = parse_document("cards", cards_json.as_bytes())?;
        let cylinders: CylindersData = parse_document("cylinders", cylinders_json.as_bytes())?;
        Self::new(cards.cards, cylinders.cylinders)
    }

    /// 透過資料來源讀取 cards.json 與 cylinders.json
    pub fn load<D: DataSource + ?Sized>(
        source: &D,
        cards_path: &str,
        cylinders_path: &str,
    ) -> Result<Self> {
        tracing::info!("📁 Loading cards from: {}", source.describe(cards_path));
        let cards: CardsData =
            parse_document(&source.describe(cards_path), &source.read_file(cards_path)?)?;

        tracing::info!("📁 Loading cylinders from: {}", source.describe(cylinders_path));
        let cylinders: CylindersData = parse_document(
            &source.describe(cylinders_path),
            &source.read_file(cylinders_path)?,
        )?;

        let store = Self::new(cards.cards, cylinders.cylinders)?;
        let warnings = store.lint();
        if !warnings.is_empty() {
            tracing::warn!("⚠️ {} data warning(s); run `validate` for details", warnings.len());
            for warning in &warnings {
                tracing::debug!("{}", warning);
            }
        }
        tracing::info!(
            "✅ Loaded {} cards and {} cylinders",
            store.cards.len(),
            store.cylinders.len()
        );
        Ok(store)
    }

    pub fn get_card(&self, no: &str) -> Option<&Card> {
        self.card_index.get(no).map(|&i| &self.cards[i])
    }

    pub fn all_cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn get_cylinder(&self, id: &str) -> Option<&Cylinder> {
        self.cylinders.iter().find(|c| c.id == id)
    }

    pub fn all_cylinders(&self) -> &[Cylinder] {
        &self.cylinders
    }

    /// Resolves identifiers to cards, dropping any the catalog doesn't know.
    pub fn resolve<'a, I, S>(&'a self, card_nos: I) -> Vec<&'a Card>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        card_nos
            .into_iter()
            .filter_map(|no| self.get_card(no.as_ref()))
            .collect()
    }

    /// Reports stale references, non-canonical ids, out-of-range numbers and empty rows.
    pub fn lint(&self) -> Vec<CatalogWarning> {
        let mut warnings = Vec::new();

        for card in &self.cards {
            check_identifier(&format!("card {}", card.no), &card.no, &mut warnings);
        }

        for cylinder in &self.cylinders {
            for row in &cylinder.rows {
                if row.cards.is_empty() {
                    warnings.push(CatalogWarning::EmptyRow {
                        cylinder_id: cylinder.id.clone(),
                        row_position: row.position,
                    });
                }
                for card_no in &row.cards {
                    let location = format!("cylinder {} row {}", cylinder.id, row.position);
                    check_identifier(&location, card_no, &mut warnings);
                    if self.get_card(card_no).is_none() {
                        warnings.push(CatalogWarning::UnknownCard {
                            cylinder_id: cylinder.id.clone(),
                            row_position: row.position,
                            card_no: card_no.clone(),
                        });
                    }
                }
            }
        }

        warnings
    }
}

impl Validate for CatalogStore {
    fn validate(&self) -> Result<()> {
        let mut seen_ids = HashSet::new();

        for cylinder in &self.cylinders {
            if !seen_ids.insert(cylinder.id.as_str()) {
                return Err(CatalogError::DataValidationError {
                    source_name: "cylinders".to_string(),
                    message: format!("duplicate cylinder id {}", cylinder.id),
                });
            }

            let mut previous = 0;
            for row in &cylinder.rows {
                if row.position == 0 {
                    return Err(CatalogError::DataValidationError {
                        source_name: "cylinders".to_string(),
                        message: format!("cylinder {} has a row at position 0", cylinder.id),
                    });
                }
                if row.position <= previous {
                    return Err(CatalogError::DataValidationError {
                        source_name: "cylinders".to_string(),
                        message: format!(
                            "cylinder {} row positions must increase ({} after {})",
                            cylinder.id, row.position, previous
                        ),
                    });
                }
                previous = row.position;
            }
        }

        Ok(())
    }
}

fn parse_document<T: DeserializeOwned>(name: &str, bytes: &[u8]) -> Result<T> {
    serde_json::from_slice(bytes).map_err(|e| {
        tracing::error!("❌ Failed to parse {}: {}", name, e);
        CatalogError::from(e)
    })
}

fn check_identifier(location: &str, card_no: &str, warnings: &mut Vec<CatalogWarning>) {
    if !is_canonical(card_no) {
        warnings.push(CatalogWarning::NonCanonicalId {
            location: location.to_string(),
            card_no: card_no.to_string(),
        });
        return;
    }

    let in_range = card_number(card_no)
        .is_some_and(|n| (CARD_NUMBER_MIN..=CARD_NUMBER_MAX).contains(&n));
    if !in_range {
        warnings.push(CatalogWarning::OutOfRange {
            location: location.to_string(),
            card_no: card_no.to_string(),
        });
    }
}
