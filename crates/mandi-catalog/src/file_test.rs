use std::path::Path;

use super::*;

fn parse(yaml: &str) -> CatalogFile {
    serde_yaml::from_str(yaml).expect("fixture yaml should parse")
}

#[test]
fn validate_accepts_well_formed_catalog() {
    let file = parse(
        r"
shops:
  - id: s1
    name: Sharma Kirana
    products:
      - id: p1
        name: Fresh Onions
        price: 32
products:
  - id: g1
    name: Basmati Rice 1kg
    price: '110'
",
    );
    assert!(validate_catalog(&file).is_ok());
}

#[test]
fn validate_rejects_duplicate_shop_ids() {
    let file = parse(
        r"
shops:
  - id: s1
    name: Sharma Kirana
  - id: s1
    name: Gupta General
",
    );
    let err = validate_catalog(&file).unwrap_err();
    assert!(err.to_string().contains("duplicate shop id"));
}

#[test]
fn validate_rejects_empty_product_name() {
    let file = parse(
        r"
shops:
  - id: s1
    name: Sharma Kirana
    products:
      - id: p1
        name: '  '
",
    );
    let err = validate_catalog(&file).unwrap_err();
    assert!(err.to_string().contains("empty name"));
}

#[test]
fn validate_rejects_duplicate_product_ids_within_shop() {
    let file = parse(
        r"
shops:
  - id: s1
    name: Sharma Kirana
    products:
      - id: p1
        name: Onions
      - id: p1
        name: Tomatoes
",
    );
    let err = validate_catalog(&file).unwrap_err();
    assert!(err.to_string().contains("duplicate product id"));
}

#[test]
fn load_missing_file_is_io_error() {
    let result = FileCatalog::load(Path::new("/definitely/not/here.yaml"));
    assert!(matches!(result, Err(CatalogError::FileIo { .. })));
}

#[test]
fn load_real_fixture_flattens_shop_entries() {
    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..")
        .join("config")
        .join("shops.yaml");
    assert!(
        path.exists(),
        "shops.yaml missing at {path:?} — required for this test"
    );
    let catalog = FileCatalog::load(&path).expect("failed to load shops.yaml");

    assert!(!catalog.shop_catalogs().is_empty());
    // Flat view contains at least every shop entry, each with provenance.
    let shop_entry_count: usize = catalog
        .shop_catalogs()
        .iter()
        .map(mandi_core::ShopCatalog::entry_count)
        .sum();
    assert!(catalog.flat().len() >= shop_entry_count);
    let with_provenance = catalog.flat().iter().filter(|e| e.shop_id.is_some()).count();
    assert_eq!(with_provenance, shop_entry_count);
}
