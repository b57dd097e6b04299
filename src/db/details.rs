use diesel::dsl::not;
use diesel::prelude::*;
use diesel::result::Error;
use diesel::PgConnection;
use log::{debug, error};

use crate::db::schema::{
    detail_lines, discount_details, error_details, menu_item_details, payment_details,
    service_charge_details,
};
use crate::db::RepositoryError;
use crate::enums::detail::{DetailKind, DetailRecord, DispatchedDetail};
use crate::models::bronze::DetailLineRecord;
use crate::models::gold::{
    NewDiscountDetail, NewErrorDetail, NewMenuItemDetail, NewPaymentDetail,
    NewServiceChargeDetail,
};

// Ids of `$kind` variant rows referenced by any line detail.
macro_rules! referenced_ids {
    ($kind:expr) => {
        detail_lines::table
            .filter(detail_lines::detail_kind.eq($kind.tag()))
            .select(detail_lines::detail_id)
    };
}

// Ids of `$kind` variant rows referenced by one guest check's line details.
macro_rules! owned_ids {
    ($guest_check_id:expr, $kind:expr) => {
        referenced_ids!($kind).filter(detail_lines::guest_check_id.eq($guest_check_id))
    };
}

// Expands `$body` once per variant table, with `$table` and `$id` bound to
// the table module and its primary key column.
macro_rules! for_variant_table {
    ($kind:expr, |$table:ident, $id:ident| $body:expr) => {
        match $kind {
            DetailKind::MenuItem => {
                use menu_item_details as $table;
                use menu_item_details::menu_item_detail_id as $id;
                $body
            }
            DetailKind::Discount => {
                use discount_details as $table;
                use discount_details::discount_detail_id as $id;
                $body
            }
            DetailKind::ServiceCharge => {
                use service_charge_details as $table;
                use service_charge_details::service_charge_detail_id as $id;
                $body
            }
            DetailKind::Payment => {
                use payment_details as $table;
                use payment_details::payment_detail_id as $id;
                $body
            }
            DetailKind::Error => {
                use error_details as $table;
                use error_details::error_detail_id as $id;
                $body
            }
        }
    };
}

/// Writes the variant row a detail line carries and returns its kind and
/// generated id. Lines without a recognized sub-record yield `None`; that is
/// a skip, not a failure.
pub fn dispatch(
    conn: &mut PgConnection,
    line: &DetailLineRecord,
) -> Result<Option<DispatchedDetail>, RepositoryError> {
    let Some(detail) = line.detail() else {
        debug!(
            "dispatch: line {:?} carries no recognized detail, skipping",
            line.line_num
        );
        return Ok(None);
    };
    let kind = detail.kind();

    let inserted = match detail {
        DetailRecord::MenuItem(item) => diesel::insert_into(menu_item_details::table)
            .values(&NewMenuItemDetail::from(item))
            .returning(menu_item_details::menu_item_detail_id)
            .get_result::<i32>(conn),
        DetailRecord::Discount(discount) => diesel::insert_into(discount_details::table)
            .values(&NewDiscountDetail::from(discount))
            .returning(discount_details::discount_detail_id)
            .get_result::<i32>(conn),
        DetailRecord::ServiceCharge(charge) => diesel::insert_into(service_charge_details::table)
            .values(&NewServiceChargeDetail::from(charge))
            .returning(service_charge_details::service_charge_detail_id)
            .get_result::<i32>(conn),
        DetailRecord::Payment(tender) => diesel::insert_into(payment_details::table)
            .values(&NewPaymentDetail::from(tender))
            .returning(payment_details::payment_detail_id)
            .get_result::<i32>(conn),
        DetailRecord::Error(error_code) => diesel::insert_into(error_details::table)
            .values(&NewErrorDetail::from(error_code))
            .returning(error_details::error_detail_id)
            .get_result::<i32>(conn),
    };

    let detail_id = inserted
        .optional()
        .map_err(|e| {
            error!(
                "dispatch: error inserting {} detail for line {:?}: {}",
                kind, line.line_num, e
            );
            RepositoryError::DatabaseError(e)
        })?
        .ok_or(RepositoryError::MissingGeneratedId(kind.table().name()))?;

    Ok(Some(DispatchedDetail { kind, detail_id }))
}

/// Deletes the `kind` variant rows owned by one guest check. Must run before
/// the check's line details are deleted, since those hold the only link.
pub fn delete_variant_rows(
    conn: &mut PgConnection,
    guest_check_id_val: i64,
    kind: DetailKind,
) -> Result<usize, RepositoryError> {
    for_variant_table!(kind, |variant, variant_id| {
        diesel::delete(
            variant::table.filter(variant_id.eq_any(owned_ids!(guest_check_id_val, kind))),
        )
        .execute(conn)
    })
    .map_err(|e| delete_error("delete_variant_rows", kind, e))
}

/// Step (a) of superseding a guest check: every variant table, in turn.
pub fn delete_owned_details(
    conn: &mut PgConnection,
    guest_check_id_val: i64,
) -> Result<usize, RepositoryError> {
    let mut removed = 0;
    for kind in DetailKind::ALL {
        removed += delete_variant_rows(conn, guest_check_id_val, kind)?;
    }
    Ok(removed)
}

/// Deletes `kind` variant rows no line detail points at.
pub fn purge_unreferenced(
    conn: &mut PgConnection,
    kind: DetailKind,
) -> Result<usize, RepositoryError> {
    for_variant_table!(kind, |variant, variant_id| {
        diesel::delete(variant::table.filter(not(variant_id.eq_any(referenced_ids!(kind)))))
            .execute(conn)
    })
    .map_err(|e| delete_error("purge_unreferenced", kind, e))
}

/// Counts `kind` line details whose variant row does not exist.
pub fn count_dangling_lines(
    conn: &mut PgConnection,
    kind: DetailKind,
) -> Result<i64, RepositoryError> {
    for_variant_table!(kind, |variant, variant_id| {
        detail_lines::table
            .filter(detail_lines::detail_kind.eq(kind.tag()))
            .filter(not(detail_lines::detail_id.eq_any(variant::table.select(variant_id))))
            .count()
            .get_result::<i64>(conn)
    })
    .map_err(|e| {
        error!("count_dangling_lines: error checking {} lines: {}", kind, e);
        RepositoryError::DatabaseError(e)
    })
}

fn delete_error(operation: &str, kind: DetailKind, e: Error) -> RepositoryError {
    error!(
        "{}: error deleting {} rows from {}: {}",
        operation,
        kind,
        kind.table(),
        e
    );
    RepositoryError::DatabaseError(e)
}
