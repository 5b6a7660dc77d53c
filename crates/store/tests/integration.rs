use activos_import::{run_import, AssetStore, Cell, ImportOptions};
use activos_store::{AssetFilter, SqliteStore};

fn sheet(rows: &[&[&str]]) -> Vec<Vec<Cell>> {
    rows.iter()
        .map(|r| r.iter().map(|c| Cell::from(*c)).collect())
        .collect()
}

#[test]
fn import_scenario_against_sqlite() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = SqliteStore::open(&dir.path().join("data/activos.db")).unwrap();

    let rows = sheet(&[
        &["codigo", "nombre", "edificio"],
        &["A-1", "Chair", "B1"],
        &["A-1", "Chair v2", "B2"],
        &["", "NoCode", "B3"],
    ]);
    let summary = run_import(&rows, &mut store, &ImportOptions::default()).unwrap();

    assert_eq!((summary.created, summary.updated, summary.errors), (1, 1, 0));
    let a = store.find_by_code("A-1").unwrap().unwrap();
    assert_eq!(a.name, "Chair v2");
    assert_eq!(a.building.as_deref(), Some("B2"));
    assert_eq!(store.count().unwrap(), 1);
}

#[test]
fn reimport_after_reopen_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("activos.db");
    let rows = sheet(&[
        &["codigo", "nombre"],
        &["A-1", "Chair"],
        &["A-2", "Desk"],
    ]);

    {
        let mut store = SqliteStore::open(&path).unwrap();
        let first = run_import(&rows, &mut store, &ImportOptions::default()).unwrap();
        assert_eq!(first.created, 2);
    }

    let mut store = SqliteStore::open(&path).unwrap();
    let second = run_import(&rows, &mut store, &ImportOptions::default()).unwrap();
    assert_eq!((second.created, second.updated), (0, 2));
    assert_eq!(store.count().unwrap(), 2);
}

#[test]
fn list_applies_search_and_filters() {
    let mut store = SqliteStore::open_in_memory().unwrap();
    let rows = sheet(&[
        &["codigo", "nombre", "edificio", "nivel", "categoria", "serie"],
        &["ACT-001", "Laptop Dell", "Edificio A", "Piso 1", "Computo", "SN123"],
        &["ACT-002", "Laptop HP", "Edificio B", "Piso 1", "Computo", "SN456"],
        &["ACT-003", "Silla", "Edificio A", "Piso 2", "Mobiliario", ""],
    ]);
    run_import(&rows, &mut store, &ImportOptions::default()).unwrap();

    let laptops = store
        .list(&AssetFilter { search: Some("laptop".into()), ..Default::default() })
        .unwrap();
    assert_eq!(laptops.len(), 2);

    let by_serial = store
        .list(&AssetFilter { search: Some("456".into()), ..Default::default() })
        .unwrap();
    assert_eq!(by_serial[0].code, "ACT-002");

    let building_a = store
        .list(&AssetFilter { building: Some("Edificio A".into()), ..Default::default() })
        .unwrap();
    let codes: Vec<&str> = building_a.iter().map(|a| a.code.as_str()).collect();
    assert_eq!(codes, vec!["ACT-001", "ACT-003"]);

    let mut gone = store.find_by_code("ACT-003").unwrap().unwrap();
    gone.deleted = Some(1);
    store.update(&gone).unwrap();

    assert_eq!(store.list(&AssetFilter::default()).unwrap().len(), 2);
    let all = AssetFilter { include_deleted: true, ..Default::default() };
    assert_eq!(store.list(&all).unwrap().len(), 3);
}
