use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub no: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub rarity: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CylinderRow {
    pub position: u32,
    #[serde(default)]
    pub cards: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cylinder {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub rows: Vec<CylinderRow>,
}

/// One card slot of a cylinder, addressed by row position and index within the row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slot<'a> {
    pub row_position: u32,
    pub card_index: usize,
    pub card_no: &'a str,
}

impl Cylinder {
    /// Flattens the rows into reading order: rows top to bottom, cards left to right.
    /// Empty rows yield nothing.
    pub fn reading_order(&self) -> impl Iterator<Item = Slot<'_>> + '_ {
        self.rows.iter().flat_map(|row| {
            row.cards
                .iter()
                .enumerate()
                .map(move |(card_index, card_no)| Slot {
                    row_position: row.position,
                    card_index,
                    card_no: card_no.as_str(),
                })
        })
    }

    pub fn card_count(&self) -> usize {
        self.rows.iter().map(|row| row.cards.len()).sum()
    }
}

/// 搜尋結果：命中位置與其後依閱讀順序剩餘的卡片
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchMatch {
    pub cylinder_id: String,
    pub cylinder_name: String,
    pub row_position: u32,
    pub card_index: usize,
    pub remaining_cards: Vec<String>,
    /// Set when a two-card match continued onto a later row than the first card.
    #[serde(default)]
    pub crossed_row: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CardsData {
    #[serde(default)]
    pub cards: Vec<Card>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CylindersData {
    #[serde(default)]
    pub cylinders: Vec<Cylinder>,
}
