use anyhow::Result;
use cylinder_search::core::ConfigProvider;
use cylinder_search::{
    normalize_card_no, CatalogConfig, CatalogStore, LocalStorage, QueryEngine, SearchMatch,
};
use std::fs;
use tempfile::TempDir;

const CARDS: &str = r#"{
  "cards": [
    { "no": "01", "name": "Sakura", "rarity": 1 },
    { "no": "02", "name": "Tamaki", "rarity": 2 },
    { "no": "03", "name": "Rinrin", "rarity": 2 },
    { "no": "04", "name": "Mitsuki", "rarity": 3 },
    { "no": "05", "name": "Airi", "rarity": 4 },
    { "no": "06", "name": "Himari", "rarity": 1 },
    { "no": "05P", "name": "Airi Sparkle", "rarity": 5 }
  ]
}"#;

const CYLINDERS: &str = r#"{
  "cylinders": [
    {
      "id": "A",
      "name": "Random A",
      "rows": [
        { "position": 1, "cards": ["01", "02"] },
        { "position": 2, "cards": ["03", "04"] }
      ]
    },
    {
      "id": "B",
      "name": "Ring B",
      "rows": [
        { "position": 1, "cards": ["06", "05"] },
        { "position": 2, "cards": [] },
        { "position": 3, "cards": ["05P", "44", "01"] }
      ]
    },
    {
      "id": "C",
      "name": "Shipment C",
      "rows": [
        { "position": 1, "cards": [] },
        { "position": 2, "cards": ["05", "06", "02"] }
      ]
    }
  ]
}"#;

fn write_fixture(dir: &TempDir) -> Result<()> {
    fs::write(dir.path().join("cards.json"), CARDS)?;
    fs::write(dir.path().join("cylinders.json"), CYLINDERS)?;
    Ok(())
}

fn load() -> Result<(TempDir, CatalogStore)> {
    let dir = TempDir::new()?;
    write_fixture(&dir)?;
    let storage = LocalStorage::new(dir.path());
    let catalog = CatalogStore::load(&storage, "cards.json", "cylinders.json")?;
    Ok((dir, catalog))
}

fn remaining(m: &SearchMatch) -> Vec<&str> {
    m.remaining_cards.iter().map(String::as_str).collect()
}

#[test]
fn test_suffix_follows_reading_order() -> Result<()> {
    let (_dir, catalog) = load()?;
    let engine = QueryEngine::new(&catalog);

    let a = engine.search_by_first_card("1");
    let in_a: Vec<&SearchMatch> = a.iter().filter(|m| m.cylinder_id == "A").collect();
    assert_eq!(in_a.len(), 1);
    assert_eq!(remaining(in_a[0]), vec!["02", "03", "04"]);

    let b = engine.search_by_first_card("2");
    assert_eq!(remaining(&b[0]), vec!["03", "04"]);

    let d = engine.search_by_first_card("04");
    assert_eq!(d.len(), 1);
    assert!(d[0].remaining_cards.is_empty());
    Ok(())
}

#[test]
fn test_flattening_invariant() -> Result<()> {
    let (_dir, catalog) = load()?;
    let engine = QueryEngine::new(&catalog);

    for cylinder in catalog.all_cylinders() {
        let flattened: Vec<&str> = cylinder.reading_order().map(|s| s.card_no).collect();
        let Some(head_slot) = cylinder.reading_order().next() else {
            continue;
        };

        let head = engine
            .search_by_first_card(head_slot.card_no)
            .into_iter()
            .find(|m| {
                m.cylinder_id == cylinder.id
                    && m.row_position == head_slot.row_position
                    && m.card_index == head_slot.card_index
            })
            .expect("first card of the cylinder is found");

        let mut rebuilt = vec![head_slot.card_no.to_string()];
        rebuilt.extend(head.remaining_cards);
        assert_eq!(rebuilt, flattened, "cylinder {}", cylinder.id);
    }
    Ok(())
}

#[test]
fn test_multiple_cylinders_report_each_occurrence() -> Result<()> {
    let (_dir, catalog) = load()?;
    let engine = QueryEngine::new(&catalog);

    let matches = engine.search_by_first_card("5");
    let where_found: Vec<(&str, u32, usize)> = matches
        .iter()
        .map(|m| (m.cylinder_id.as_str(), m.row_position, m.card_index))
        .collect();
    assert_eq!(where_found, vec![("B", 1, 1), ("C", 2, 0)]);

    assert_eq!(remaining(&matches[0]), vec!["05P", "44", "01"]);
    assert_eq!(remaining(&matches[1]), vec!["06", "02"]);
    assert_eq!(matches[0].cylinder_name, "Ring B");
    Ok(())
}

#[test]
fn test_two_card_search() -> Result<()> {
    let (_dir, catalog) = load()?;
    let engine = QueryEngine::new(&catalog);

    let matches = engine.search_by_two_cards("1", "2");
    assert_eq!(matches.len(), 1);
    assert_eq!(remaining(&matches[0]), vec!["03", "04"]);
    assert_eq!(matches[0].card_index, 1);

    assert!(engine.search_by_two_cards("1", "3").is_empty());

    // 05 ends row 1 of B; the empty row 2 is skipped and 05P opens row 3
    let crossing = engine.search_by_two_cards("5", "5P");
    assert_eq!(crossing.len(), 1);
    assert_eq!(crossing[0].cylinder_id, "B");
    assert_eq!((crossing[0].row_position, crossing[0].card_index), (3, 0));
    assert!(crossing[0].crossed_row);
    assert_eq!(remaining(&crossing[0]), vec!["44", "01"]);

    let in_c = engine.search_by_two_cards("05", "06");
    assert_eq!(in_c.len(), 1);
    assert_eq!(in_c[0].cylinder_id, "C");
    assert!(!in_c[0].crossed_row);
    Ok(())
}

#[test]
fn test_not_found_and_stale_references() -> Result<()> {
    let (_dir, catalog) = load()?;
    let engine = QueryEngine::new(&catalog);

    assert!(engine.search_by_first_card("99").is_empty());
    assert!(catalog.get_card("99").is_none());
    assert!(catalog.get_card(&normalize_card_no("5p")).is_some());

    let matches = engine.search_by_first_card("5P");
    let resolved: Vec<&str> = engine
        .remaining_sequence(&matches[0])
        .iter()
        .map(|c| c.name.as_str())
        .collect();
    assert_eq!(resolved, vec!["Sakura"]);
    Ok(())
}

#[test]
fn test_load_through_config_file() -> Result<()> {
    let root = TempDir::new()?;
    let data_dir = TempDir::new_in(root.path())?;
    write_fixture(&data_dir)?;

    let data_dir_name = data_dir
        .path()
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap()
        .to_string();
    let config_path = root.path().join("catalog.toml");
    fs::write(
        &config_path,
        format!("[data]\nbase_dir = \"{}\"\n\n[display]\nformat = \"tsv\"\n", data_dir_name),
    )?;

    let config = CatalogConfig::from_file(&config_path)?;
    let storage = LocalStorage::new(config.base_dir());
    let catalog = CatalogStore::load(&storage, config.cards_path(), config.cylinders_path())?;

    assert_eq!(catalog.all_cards().len(), 7);
    assert_eq!(catalog.all_cylinders().len(), 3);
    Ok(())
}

#[test]
fn test_missing_data_file_is_io_error() -> Result<()> {
    let dir = TempDir::new()?;
    let storage = LocalStorage::new(dir.path());
    let err = CatalogStore::load(&storage, "cards.json", "cylinders.json").unwrap_err();
    assert!(matches!(err, cylinder_search::CatalogError::IoError(_)));
    Ok(())
}
