use diesel::PgConnection;
use serde_json::{json, Value};

use crate::db::maintenance::{reset_gold_tables, table_counts};
use crate::db::{establish_connection_pool, run_db_migrations, DbConnection, DbPool, RepositoryError};
use crate::enums::tables::GoldTable;
use crate::models::bronze::OrderRecord;

// Fixture strategy:
// - Build guest checks as raw Bronze JSON so decoding runs exactly as in a real load.
// - Every line helper produces one recognized sub-record unless named otherwise.
pub const SAMPLE_LOC_REF: &str = "99 CB CB";
pub const SAMPLE_EMPLOYEE: i32 = 42;
pub const SAMPLE_GUEST_CHECK_ID: i64 = 500;
pub const SAMPLE_MENU_ITEM: i32 = 77;

pub fn build_test_pool(database_url: &str) -> DbPool {
    let pool = establish_connection_pool(database_url, 4).expect("Unable to build pool");
    run_db_migrations(pool.clone()).expect("Unable to run migrations");
    pool
}

pub fn reset_db(pool: &DbPool) -> Result<(), RepositoryError> {
    let mut conn = DbConnection::new(pool)?;
    reset_gold_tables(conn.connection())
}

pub fn row_count(conn: &mut PgConnection, table: GoldTable) -> Result<i64, RepositoryError> {
    Ok(table_counts(conn)?
        .into_iter()
        .find(|count| count.table == table)
        .map(|count| count.rows)
        .unwrap_or_default())
}

pub fn guest_check_payload(
    guest_check_id: i64,
    loc_ref: &str,
    emp_num: i32,
    detail_lines: Vec<Value>,
) -> Value {
    json!({
        "guestCheckId": guest_check_id,
        "locRef": loc_ref,
        "empNum": emp_num,
        "chkNum": 1234,
        "opnBusDt": "2024-01-01",
        "opnUTC": "2024-01-01T09:09:09",
        "clsdUTC": "2024-01-01T12:12:12",
        "clsdFlag": true,
        "gstCnt": 1,
        "subTtl": 100.0,
        "chkTtl": 108.0,
        "dscTtl": 0.0,
        "payTtl": 108.0,
        "tblName": "90",
        "taxes": [
            { "taxNum": 1, "txblSlsTtl": 100.0, "taxCollTtl": 8.0, "taxRate": 0.08, "type": 3 }
        ],
        "detailLines": detail_lines,
    })
}

/// The canonical single-item check: id 500 at "99 CB CB", employee 42, item 77.
pub fn sample_guest_check() -> Value {
    guest_check_payload(
        SAMPLE_GUEST_CHECK_ID,
        SAMPLE_LOC_REF,
        SAMPLE_EMPLOYEE,
        vec![menu_item_line(1, SAMPLE_MENU_ITEM)],
    )
}

pub fn sample_record() -> OrderRecord {
    OrderRecord::new(sample_guest_check())
}

fn line(line_num: i32, key: &str, detail: Value) -> Value {
    json!({
        "guestCheckLineItemId": 9_000_000 + i64::from(line_num),
        "lineNum": line_num,
        "detailUTC": "2024-01-01T09:10:00",
        "dspTtl": 25.0,
        "dspQty": 1,
        key: detail,
    })
}

pub fn menu_item_line(line_num: i32, mi_num: i32) -> Value {
    line(
        line_num,
        "menuItem",
        json!({ "miNum": mi_num, "modFlag": false, "inclTax": true, "activeTaxes": 1, "prcLvl": 1 }),
    )
}

pub fn discount_line(line_num: i32, dsc_num: i32) -> Value {
    line(
        line_num,
        "discount",
        json!({ "dscNum": dsc_num, "activeTaxes": "28" }),
    )
}

pub fn service_charge_line(line_num: i32, svc_chg_num: i32) -> Value {
    line(
        line_num,
        "serviceCharge",
        json!({ "svcChgNum": svc_chg_num, "activeTaxes": "28" }),
    )
}

pub fn tender_line(line_num: i32, tmed_num: i32) -> Value {
    line(line_num, "tenderMedia", json!({ "tmedNum": tmed_num }))
}

pub fn error_code_line(line_num: i32, err_num: i32) -> Value {
    line(
        line_num,
        "errorCode",
        json!({ "errNum": err_num, "errText": "void after close" }),
    )
}

/// A line whose only sub-record is one the loader does not know.
pub fn unknown_line(line_num: i32) -> Value {
    line(line_num, "loyaltyPoints", json!({ "points": 10 }))
}
