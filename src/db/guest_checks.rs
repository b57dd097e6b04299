use diesel::dsl::exists;
use diesel::prelude::*;
use diesel::PgConnection;
use log::{error, info};

use crate::db::schema::{check_taxes, detail_lines, guest_checks};
use crate::db::{details, CatalogResolver, DbConnection, DbPool, RepositoryError, TransactionScope};
use crate::enums::load::{BatchReport, DeletedSubtree, LoadedCheck, OrderOutcome};
use crate::models::bronze::OrderRecord;
use crate::models::gold::{NewCheckTax, NewDetailLine, NewGuestCheck};

/// Pool-backed entry point: holds one pooled connection for the duration of
/// a batch run.
#[derive(Clone)]
pub struct GuestCheckOperations {
    pool: DbPool,
    catalog: CatalogResolver,
}

impl GuestCheckOperations {
    pub fn new(pool: DbPool, catalog: CatalogResolver) -> Self {
        Self { pool, catalog }
    }

    pub fn load_batch(&self, records: &[OrderRecord]) -> Result<BatchReport, RepositoryError> {
        let mut conn = DbConnection::new(&self.pool)
            .map_err(|e| {
                error!("load_batch: failed to acquire DB connection: {}", e);
                e
            })
            .ok();

        load_guest_checks(
            conn.as_mut().map(|c| c.connection()),
            records,
            &self.catalog,
        )
    }
}

/// Loads a batch of guest checks, each one in its own transaction.
///
/// Without a connection nothing happens and an empty report is returned.
/// A failure of the catalog bootstrap aborts the run; a failure of a single
/// guest check is rolled back, reported in its outcome, and the run goes on.
pub fn load_guest_checks(
    conn: Option<&mut PgConnection>,
    records: &[OrderRecord],
    catalog: &CatalogResolver,
) -> Result<BatchReport, RepositoryError> {
    let Some(conn) = conn else {
        error!("load_guest_checks: no database connection, nothing was loaded");
        return Ok(BatchReport::not_run());
    };

    let mut scope = TransactionScope::begin(conn);
    let summary = catalog.bootstrap(&mut scope, records).map_err(|e| {
        error!("load_guest_checks: catalog bootstrap failed, aborting run: {}", e);
        e
    })?;

    let mut report = BatchReport::started(summary);
    for record in records {
        report.record(upsert_order(&mut scope, catalog, record));
    }

    info!(
        "load_guest_checks: {} loaded ({} replaced), {} failed, {} detail lines skipped",
        report.loaded(),
        report.replaced(),
        report.failed(),
        report.skipped_lines()
    );
    Ok(report)
}

/// Upserts one guest check as an independent unit of work.
pub fn upsert_order(
    scope: &mut TransactionScope<'_>,
    catalog: &CatalogResolver,
    record: &OrderRecord,
) -> OrderOutcome {
    let label = match record.guest_check_id() {
        Some(id) => format!("guest check {}", id),
        None => "guest check <unidentified>".to_string(),
    };

    match scope.unit_of_work(&label, |conn| write_guest_check(conn, catalog, record)) {
        Ok(loaded) => {
            info!(
                "upsert_order: {} {} ({} taxes, {} detail lines, {} skipped)",
                label,
                if loaded.replaced.is_some() {
                    "replaced"
                } else {
                    "loaded"
                },
                loaded.tax_lines,
                loaded.detail_lines,
                loaded.skipped_lines
            );
            OrderOutcome::Loaded(loaded)
        }
        Err(e) => {
            error!("upsert_order: {} failed: {}", label, e);
            OrderOutcome::Failed {
                guest_check_id: record.guest_check_id(),
                reason: e.to_string(),
            }
        }
    }
}

fn write_guest_check(
    conn: &mut PgConnection,
    catalog: &CatalogResolver,
    record: &OrderRecord,
) -> Result<LoadedCheck, RepositoryError> {
    let check = record.decode()?;
    let check_id = check.guest_check_id;

    let replaced = if guest_check_exists(conn, check_id)? {
        info!("write_guest_check: superseding guest check {}", check_id);
        Some(delete_existing_guest_check(conn, check_id)?)
    } else {
        None
    };

    let restaurant_id = catalog.resolve_restaurant(conn, &check.loc_ref)?;
    let employee_id = catalog.resolve_employee(conn, check.emp_num)?;

    diesel::insert_into(guest_checks::table)
        .values(&NewGuestCheck::from_record(&check, restaurant_id, employee_id))
        .execute(conn)
        .map_err(|e| {
            error!(
                "write_guest_check: error inserting guest check {}: {}",
                check_id, e
            );
            RepositoryError::DatabaseError(e)
        })?;

    let new_taxes: Vec<NewCheckTax> = check
        .taxes
        .iter()
        .map(|tax| NewCheckTax::from_record(check_id, tax))
        .collect();
    let tax_lines = if new_taxes.is_empty() {
        0
    } else {
        diesel::insert_into(check_taxes::table)
            .values(&new_taxes)
            .execute(conn)
            .map_err(|e| {
                error!(
                    "write_guest_check: error inserting taxes for guest check {}: {}",
                    check_id, e
                );
                RepositoryError::DatabaseError(e)
            })?
    };

    let mut written_lines = 0;
    let mut skipped_lines = 0;
    for line in &check.detail_lines {
        let Some(dispatched) = details::dispatch(conn, line)? else {
            skipped_lines += 1;
            continue;
        };

        diesel::insert_into(detail_lines::table)
            .values(&NewDetailLine::from_record(
                check_id,
                line,
                dispatched.kind.tag(),
                dispatched.detail_id,
            ))
            .execute(conn)
            .map_err(|e| {
                error!(
                    "write_guest_check: error inserting detail line {:?} for guest check {}: {}",
                    line.line_num, check_id, e
                );
                RepositoryError::DatabaseError(e)
            })?;
        written_lines += 1;
    }

    Ok(LoadedCheck {
        guest_check_id: check_id,
        replaced,
        tax_lines,
        detail_lines: written_lines,
        skipped_lines,
    })
}

pub fn guest_check_exists(
    conn: &mut PgConnection,
    guest_check_id_val: i64,
) -> Result<bool, RepositoryError> {
    diesel::select(exists(
        guest_checks::table.filter(guest_checks::guest_check_id.eq(guest_check_id_val)),
    ))
    .get_result::<bool>(conn)
    .map_err(|e| {
        error!(
            "guest_check_exists: error checking guest check {}: {}",
            guest_check_id_val, e
        );
        RepositoryError::DatabaseError(e)
    })
}

/// Removes a loaded guest check and everything below it, children first:
/// variant rows, line details, tax lines, then the check itself.
pub fn delete_existing_guest_check(
    conn: &mut PgConnection,
    guest_check_id_val: i64,
) -> Result<DeletedSubtree, RepositoryError> {
    let variant_rows = details::delete_owned_details(conn, guest_check_id_val)?;

    let detail_lines_removed = diesel::delete(
        detail_lines::table.filter(detail_lines::guest_check_id.eq(guest_check_id_val)),
    )
    .execute(conn)
    .map_err(|e| subtree_error("detail_lines", guest_check_id_val, e))?;

    let tax_lines = diesel::delete(
        check_taxes::table.filter(check_taxes::guest_check_id.eq(guest_check_id_val)),
    )
    .execute(conn)
    .map_err(|e| subtree_error("check_taxes", guest_check_id_val, e))?;

    let guest_checks_removed = diesel::delete(
        guest_checks::table.filter(guest_checks::guest_check_id.eq(guest_check_id_val)),
    )
    .execute(conn)
    .map_err(|e| subtree_error("guest_checks", guest_check_id_val, e))?;

    Ok(DeletedSubtree {
        variant_rows,
        detail_lines: detail_lines_removed,
        tax_lines,
        guest_checks: guest_checks_removed,
    })
}

fn subtree_error(
    table: &str,
    guest_check_id_val: i64,
    e: diesel::result::Error,
) -> RepositoryError {
    error!(
        "delete_existing_guest_check: error deleting {} rows of guest check {}: {}",
        table, guest_check_id_val, e
    );
    RepositoryError::DatabaseError(e)
}
