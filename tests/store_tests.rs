use dropdown_migrate::{
    dropdown::{aggregator::aggregate, dropdown_model::DropdownConfig},
    store::{
        http::HttpStore,
        json_file::JsonFileStore,
        memory::MemoryStore,
        store_model::{DropdownStore, StoreError, StoreTarget, UpsertOutcome},
    },
};
use httpmock::prelude::*;

use crate::common::utils::{consolidated, fixed_options, property_ownership_rows, temp_path};

mod common;

fn property_dropdown() -> DropdownConfig {
    aggregate(&property_ownership_rows(), &consolidated(), &fixed_options())
        .dropdowns
        .remove(0)
}

// =========================================================================
// MemoryStore
// =========================================================================

#[test]
fn memory_store_inserts_then_updates() {
    let mut store = MemoryStore::new();
    let mut config = property_dropdown();

    assert_eq!(store.upsert(&config).unwrap(), UpsertOutcome::Inserted);
    let created = store.get(&config.dropdown_key).unwrap().created_at;

    config.label.insert("en".into(), "Ownership".into());
    assert_eq!(store.upsert(&config).unwrap(), UpsertOutcome::Updated);

    assert_eq!(store.len(), 1);
    let stored = store.get(&config.dropdown_key).unwrap();
    assert_eq!(stored.created_at, created, "created_at survives an update");
    assert!(stored.updated_at >= created);
    assert_eq!(stored.dropdown_data.label["en"], "Ownership");
    assert!(stored.is_active);
}

#[test]
fn stored_record_mirrors_the_config() {
    let mut store = MemoryStore::new();
    let config = property_dropdown();
    store.upsert(&config).unwrap();

    let stored = store.get("mortgage_step1_property_ownership").unwrap();
    assert_eq!(stored.screen_location, "mortgage_step1");
    assert_eq!(stored.field_name, "property_ownership");
    assert_eq!(stored.category, "dropdown");
    assert_eq!(stored.dropdown_data, config.document());
}

// =========================================================================
// JsonFileStore
// =========================================================================

#[test]
fn json_file_store_persists_on_finish() {
    let path = temp_path("store_roundtrip.json");
    let config = property_dropdown();

    let mut store = JsonFileStore::open(&path).unwrap();
    assert!(store.records().is_empty(), "missing file opens empty");
    assert_eq!(store.upsert(&config).unwrap(), UpsertOutcome::Inserted);
    assert!(!path.exists(), "nothing written before finish");
    store.finish().unwrap();
    assert!(path.exists());

    let mut reopened = JsonFileStore::open(&path).unwrap();
    assert_eq!(reopened.records().len(), 1);
    let first_created = reopened.records()[&config.dropdown_key].created_at;
    assert_eq!(reopened.upsert(&config).unwrap(), UpsertOutcome::Updated);
    reopened.finish().unwrap();

    let again = JsonFileStore::open(&path).unwrap();
    let record = &again.records()[&config.dropdown_key];
    assert_eq!(record.created_at, first_created);
    assert_eq!(record.dropdown_data, config.document());
    assert!(!path.with_extension("json.tmp").exists());

    let _ = std::fs::remove_file(&path);
}

#[test]
fn json_file_store_treats_empty_file_as_empty_table() {
    let path = temp_path("store_empty.json");
    std::fs::write(&path, "  \n").unwrap();

    let store = JsonFileStore::open(&path).unwrap();
    assert!(store.records().is_empty());

    let _ = std::fs::remove_file(&path);
}

#[test]
fn json_file_store_rejects_corrupt_file() {
    let path = temp_path("store_corrupt.json");
    std::fs::write(&path, "[1, 2, 3]").unwrap();

    let err = JsonFileStore::open(&path).err().unwrap();
    assert!(matches!(err, StoreError::Corrupt { .. }), "got {:?}", err);

    let _ = std::fs::remove_file(&path);
}

#[test]
fn json_file_store_describes_its_path() {
    let path = temp_path("store_describe.json");
    let store = JsonFileStore::open(&path).unwrap();
    assert!(store.describe().starts_with("file:"));
    assert!(store.describe().ends_with("store_describe.json"));
}

// =========================================================================
// StoreTarget
// =========================================================================

#[test]
fn store_target_parses_known_forms() {
    assert_eq!(StoreTarget::parse("memory").unwrap(), StoreTarget::Memory);
    assert_eq!(StoreTarget::parse(" MEMORY ").unwrap(), StoreTarget::Memory);
    assert_eq!(
        StoreTarget::parse("file:out/dropdowns.json").unwrap(),
        StoreTarget::File("out/dropdowns.json".into())
    );
    assert_eq!(
        StoreTarget::parse("https://content.example.com/api/").unwrap(),
        StoreTarget::Http("https://content.example.com/api".into())
    );
}

#[test]
fn store_target_rejects_unknown_forms() {
    for raw in ["", "file:", "postgres://localhost/db", "dropdowns.json"] {
        let err = StoreTarget::parse(raw).err().unwrap();
        assert!(matches!(err, StoreError::InvalidTarget(_)), "{:?} -> {:?}", raw, err);
    }
}

#[test]
fn memory_target_opens_a_memory_store() {
    let store = StoreTarget::Memory.open().unwrap();
    assert_eq!(store.describe(), "memory");
}

// =========================================================================
// HttpStore
// =========================================================================

#[test]
fn http_store_maps_created_to_inserted() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(PUT)
            .path("/dropdowns/mortgage_step1_property_ownership")
            .header("content-type", "application/json")
            .body_contains("\"dropdown_key\":\"mortgage_step1_property_ownership\"");
        then.status(201);
    });

    let mut store = HttpStore::new(&server.base_url());
    let outcome = store.upsert(&property_dropdown()).unwrap();

    mock.assert();
    assert_eq!(outcome, UpsertOutcome::Inserted);
}

#[test]
fn http_store_maps_ok_to_updated() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(PUT).path("/dropdowns/mortgage_step1_property_ownership");
        then.status(200).body("{}");
    });

    let mut store = HttpStore::new(&format!("{}/", server.base_url()));
    let outcome = store.upsert(&property_dropdown()).unwrap();

    mock.assert();
    assert_eq!(outcome, UpsertOutcome::Updated);
}

#[test]
fn http_store_surfaces_rejections() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(PUT).path("/dropdowns/mortgage_step1_property_ownership");
        then.status(500).body("database unavailable");
    });

    let mut store = HttpStore::new(&server.base_url());
    match store.upsert(&property_dropdown()) {
        Err(StoreError::Rejected { key, status, body }) => {
            assert_eq!(key, "mortgage_step1_property_ownership");
            assert_eq!(status, 500);
            assert_eq!(body, "database unavailable");
        }
        other => panic!("expected rejection, got {:?}", other),
    }
}

#[test]
fn http_store_builds_endpoints() {
    let store = HttpStore::new("http://localhost:8080/api/");
    assert_eq!(store.endpoint("a_b"), "http://localhost:8080/api/dropdowns/a_b");
    assert_eq!(store.describe(), "http://localhost:8080/api");
}
