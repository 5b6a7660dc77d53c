use chrono::NaiveDateTime;
use uuid::Uuid;

use crate::error::StoreError;
use crate::model::{Asset, Field, NormalizedRow, RowOutcome, ACTIVE};
use crate::store::AssetStore;

/// Create-or-update one normalized row, keyed by `code`.
///
/// An existing record keeps its `sync_id` and surrogate id; every optional
/// attribute is overwritten (absent clears it) and the record is reactivated.
/// A new record gets a fresh v4 `sync_id`. Callers must skip blank-filler rows
/// first; a row without code or name is reported as a constraint failure.
pub fn reconcile_row<S: AssetStore + ?Sized>(
    store: &mut S,
    row: &NormalizedRow,
    now: NaiveDateTime,
) -> Result<RowOutcome, StoreError> {
    let (Some(code), Some(name)) = (row.get(Field::Code), row.get(Field::Name)) else {
        return Err(StoreError::Constraint("codigo and nombre are required".into()));
    };

    match store.find_by_code(code)? {
        Some(mut existing) => {
            apply_fields(&mut existing, name, row, now);
            store.update(&existing)?;
            Ok(RowOutcome::Updated)
        }
        None => {
            let mut asset = Asset {
                id: None,
                sync_id: Uuid::new_v4().to_string(),
                code: code.to_string(),
                name: String::new(),
                building: None,
                floor: None,
                category: None,
                space: None,
                serial: None,
                updated_at: None,
                deleted: None,
            };
            apply_fields(&mut asset, name, row, now);
            store.create(&asset)?;
            Ok(RowOutcome::Created)
        }
    }
}

fn apply_fields(asset: &mut Asset, name: &str, row: &NormalizedRow, now: NaiveDateTime) {
    asset.name = name.to_string();
    asset.building = row.owned(Field::Building);
    asset.floor = row.owned(Field::Floor);
    asset.category = row.owned(Field::Category);
    asset.space = row.owned(Field::Space);
    asset.serial = row.owned(Field::Serial);
    asset.updated_at = Some(now);
    asset.deleted = Some(ACTIVE);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use chrono::NaiveDate;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 10, 1).unwrap().and_hms_opt(9, 30, 0).unwrap()
    }

    fn row(pairs: &[(Field, &str)]) -> NormalizedRow {
        let mut r = NormalizedRow::default();
        for (f, v) in pairs {
            r.set(*f, Some(v.to_string()));
        }
        r
    }

    #[test]
    fn creates_unknown_code() {
        let mut store = MemoryStore::new();
        let outcome = reconcile_row(
            &mut store,
            &row(&[(Field::Code, "A-1"), (Field::Name, "Chair"), (Field::Space, "Lab")]),
            now(),
        )
        .unwrap();

        assert_eq!(outcome, RowOutcome::Created);
        let a = store.get("A-1").unwrap();
        assert_eq!(a.space.as_deref(), Some("Lab"));
        assert_eq!(a.deleted, Some(0));
        assert_eq!(a.updated_at, Some(now()));
        assert!(Uuid::parse_str(&a.sync_id).is_ok());
    }

    #[test]
    fn update_reactivates_and_clears_absent_fields() {
        let mut store = MemoryStore::new();
        reconcile_row(
            &mut store,
            &row(&[(Field::Code, "A-1"), (Field::Name, "Chair"), (Field::Serial, "SN1")]),
            now(),
        )
        .unwrap();
        let sync_id = store.get("A-1").unwrap().sync_id.clone();

        let mut deleted = store.get("A-1").unwrap().clone();
        deleted.deleted = Some(1);
        store.update(&deleted).unwrap();

        let outcome = reconcile_row(
            &mut store,
            &row(&[(Field::Code, "A-1"), (Field::Name, "Chair v2")]),
            now(),
        )
        .unwrap();

        assert_eq!(outcome, RowOutcome::Updated);
        let a = store.get("A-1").unwrap();
        assert_eq!(a.name, "Chair v2");
        assert_eq!(a.serial, None);
        assert_eq!(a.deleted, Some(0));
        assert_eq!(a.sync_id, sync_id);
    }

    #[test]
    fn missing_name_is_a_constraint_error() {
        let mut store = MemoryStore::new();
        let err = reconcile_row(&mut store, &row(&[(Field::Code, "A-1")]), now()).unwrap_err();
        assert!(matches!(err, StoreError::Constraint(_)));
        assert!(store.is_empty());
    }
}
