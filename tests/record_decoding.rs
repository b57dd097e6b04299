use chrono::NaiveDate;
use gold_loader::db::RepositoryError;
use gold_loader::enums::detail::{DetailKind, DetailRecord};
use gold_loader::models::bronze::{DetailLineRecord, GuestCheckEnvelope, OrderRecord};
use gold_loader::test_utils::{menu_item_line, sample_guest_check, tender_line, unknown_line};
use serde_json::json;

#[test]
fn sample_check_decodes() {
    let record = OrderRecord::new(sample_guest_check());
    assert_eq!(record.guest_check_id(), Some(500));
    assert_eq!(record.loc_ref(), Some("99 CB CB"));
    assert_eq!(record.employee_number(), Some(42));

    let check = record.decode().expect("decode sample");
    assert_eq!(check.guest_check_id, 500);
    assert_eq!(check.opn_bus_dt, NaiveDate::from_ymd_opt(2024, 1, 1));
    assert!(check.clsd_flag);
    assert_eq!(check.taxes.len(), 1);
    assert_eq!(check.taxes[0].tax_type, Some(3));

    let item = check.detail_lines[0]
        .menu_item
        .as_ref()
        .expect("menu item sub-record");
    assert_eq!(item.mi_num, 77);
    assert_eq!(item.incl_tax, Some(true));
    assert_eq!(item.active_taxes.as_deref(), Some("1"));
}

#[test]
fn missing_required_field_is_an_invalid_record() {
    let record = OrderRecord::new(json!({ "guestCheckId": 1, "locRef": "99 CB CB" }));

    match record.decode() {
        Err(RepositoryError::InvalidRecord(e)) => {
            assert!(e.to_string().contains("empNum"), "error: {e}")
        }
        other => panic!("expected an invalid record, got {other:?}"),
    }
    assert_eq!(record.employee_number(), None);
}

#[test]
fn optional_fields_default() {
    let check = OrderRecord::new(json!({ "guestCheckId": 1, "locRef": "x", "empNum": 2 }))
        .decode()
        .expect("decode minimal");

    assert!(!check.clsd_flag);
    assert!(check.taxes.is_empty());
    assert!(check.detail_lines.is_empty());
    assert_eq!(check.opn_utc, None);
}

#[test]
fn lenient_scalars_are_accepted() {
    let check = OrderRecord::new(json!({
        "guestCheckId": 1,
        "locRef": "x",
        "empNum": 2,
        "clsdFlag": 1,
        "detailLines": [
            { "menuItem": { "miNum": 3, "inclTax": 0, "activeTaxes": 28 } },
            { "menuItem": { "miNum": 4, "inclTax": "true", "activeTaxes": null } }
        ]
    }))
    .decode()
    .expect("decode lenient");

    assert!(check.clsd_flag);
    let first = check.detail_lines[0].menu_item.as_ref().expect("first item");
    assert_eq!(first.incl_tax, Some(false));
    assert_eq!(first.active_taxes.as_deref(), Some("28"));
    let second = check.detail_lines[1].menu_item.as_ref().expect("second item");
    assert_eq!(second.incl_tax, Some(true));
    assert_eq!(second.active_taxes, None);
}

#[test]
fn unreadable_flag_is_rejected() {
    let result = OrderRecord::new(json!({
        "guestCheckId": 1,
        "locRef": "x",
        "empNum": 2,
        "clsdFlag": "maybe"
    }))
    .decode();

    assert!(matches!(result, Err(RepositoryError::InvalidRecord(_))));
}

#[test]
fn detail_line_classification() {
    let item: DetailLineRecord = serde_json::from_value(menu_item_line(1, 77)).expect("item");
    let tender: DetailLineRecord = serde_json::from_value(tender_line(2, 3)).expect("tender");
    let unknown: DetailLineRecord = serde_json::from_value(unknown_line(3)).expect("unknown");

    assert_eq!(item.detail().map(|d| d.kind()), Some(DetailKind::MenuItem));
    assert_eq!(tender.detail().map(|d| d.kind()), Some(DetailKind::Payment));
    assert_eq!(unknown.detail(), None);

    let both: DetailLineRecord = serde_json::from_value(json!({
        "tenderMedia": { "tmedNum": 1 },
        "errorCode": { "errNum": 2 }
    }))
    .expect("both");
    assert!(matches!(both.detail(), Some(DetailRecord::Payment(_))));
    assert!(matches!(
        both.detail_of(DetailKind::Error),
        Some(DetailRecord::Error(_))
    ));
    assert_eq!(both.detail_of(DetailKind::MenuItem), None);
}

#[test]
fn envelope_injects_its_loc_ref() {
    let envelope: GuestCheckEnvelope = serde_json::from_value(json!({
        "curUTC": "2024-01-01T12:00:00",
        "locRef": "99 CB CB",
        "guestChecks": [
            { "guestCheckId": 1, "empNum": 2 },
            { "guestCheckId": 2, "empNum": 2, "locRef": "12 AB AB" }
        ]
    }))
    .expect("envelope");
    assert!(envelope.has_guest_checks());

    let records = envelope.into_records();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].loc_ref(), Some("99 CB CB"));
    assert_eq!(records[1].loc_ref(), Some("12 AB AB"));
    assert_eq!(
        records[0].decode().expect("decode injected").loc_ref,
        "99 CB CB"
    );
}

#[test]
fn envelope_without_checks() {
    let missing: GuestCheckEnvelope =
        serde_json::from_value(json!({ "locRef": "99 CB CB" })).expect("missing");
    let empty: GuestCheckEnvelope =
        serde_json::from_value(json!({ "guestChecks": [] })).expect("empty");

    assert!(!missing.has_guest_checks());
    assert!(!empty.has_guest_checks());
    assert!(missing.into_records().is_empty());
}
