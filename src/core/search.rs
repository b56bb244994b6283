use crate::core::catalog::CatalogStore;
use crate::domain::identifier::normalize_card_no;
use crate::domain::model::{Card, Cylinder, SearchMatch, Slot};

/// Searches cylinders in reading order (finish the row, then continue with
/// every following row).
#[derive(Debug, Clone, Copy)]
pub struct QueryEngine<'a> {
    catalog: &'a CatalogStore,
}

/// A card occurrence inside one cylinder's flattened sequence.
struct Hit<'a> {
    cylinder: &'a Cylinder,
    slots: &'a [Slot<'a>],
    offset: usize,
}

impl<'a> Hit<'a> {
    fn to_match(&self, crossed_row: bool) -> SearchMatch {
        let slot = self.slots[self.offset];
        SearchMatch {
            cylinder_id: self.cylinder.id.clone(),
            cylinder_name: self.cylinder.name.clone(),
            row_position: slot.row_position,
            card_index: slot.card_index,
            remaining_cards: self.slots[self.offset + 1..]
                .iter()
                .map(|s| s.card_no.to_string())
                .collect(),
            crossed_row,
        }
    }
}

impl<'a> QueryEngine<'a> {
    pub fn new(catalog: &'a CatalogStore) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &'a CatalogStore {
        self.catalog
    }

    /// 找出卡片在所有 cylinder 中出現的每個位置
    pub fn search_by_first_card(&self, raw_card_no: &str) -> Vec<SearchMatch> {
        let card_no = normalize_card_no(raw_card_no);
        let mut matches = Vec::new();

        for cylinder in self.catalog.all_cylinders() {
            let slots: Vec<Slot<'_>> = cylinder.reading_order().collect();
            for hit in hits(cylinder, &slots, &card_no) {
                matches.push(hit.to_match(false));
            }
        }

        tracing::debug!("Card {} found at {} positions", card_no, matches.len());
        matches
    }

    /// Finds places where `raw_second` immediately follows `raw_first`.
    ///
    /// The returned position is that of the second card. When it opens the
    /// next row, `crossed_row` is set and `card_index` is its index in that row.
    pub fn search_by_two_cards(&self, raw_first: &str, raw_second: &str) -> Vec<SearchMatch> {
        let first = normalize_card_no(raw_first);
        let second = normalize_card_no(raw_second);
        let mut matches = Vec::new();

        for cylinder in self.catalog.all_cylinders() {
            let slots: Vec<Slot<'_>> = cylinder.reading_order().collect();
            for hit in hits(cylinder, &slots, &first) {
                let Some(next) = slots.get(hit.offset + 1) else {
                    continue;
                };
                if next.card_no != second {
                    continue;
                }
                let crossed_row = next.row_position != slots[hit.offset].row_position;
                let advanced = Hit {
                    offset: hit.offset + 1,
                    ..hit
                };
                matches.push(advanced.to_match(crossed_row));
            }
        }

        tracing::debug!(
            "Sequence {} -> {} found at {} positions",
            first,
            second,
            matches.len()
        );
        matches
    }

    /// Runs a single- or two-card search depending on whether `second` is given.
    pub fn search(&self, first: &str, second: Option<&str>) -> Vec<SearchMatch> {
        match second {
            Some(second) => self.search_by_two_cards(first, second),
            None => self.search_by_first_card(first),
        }
    }

    /// Cards still to come after a match, skipping identifiers missing from the catalog.
    pub fn remaining_sequence(&self, search_match: &SearchMatch) -> Vec<&'a Card> {
        self.catalog.resolve(&search_match.remaining_cards)
    }
}

fn hits<'a>(
    cylinder: &'a Cylinder,
    slots: &'a [Slot<'a>],
    card_no: &'a str,
) -> impl Iterator<Item = Hit<'a>> + 'a {
    slots
        .iter()
        .enumerate()
        .filter(move |(_, slot)| slot.card_no == card_no)
        .map(move |(offset, _)| Hit {
            cylinder,
            slots,
            offset,
        })
}
