use diesel::prelude::*;
use diesel::PgConnection;
use log::{error, info, warn};

use crate::db::details;
use crate::db::schema::{
    check_taxes, detail_lines, discount_details, employees, error_details, guest_checks,
    menu_item_details, payment_details, restaurants, service_charge_details,
};
use crate::db::RepositoryError;
use crate::enums::detail::DetailKind;
use crate::enums::load::TableCount;
use crate::enums::tables::GoldTable;

/// Empties every Gold table and restarts their identity sequences.
pub fn reset_gold_tables(conn: &mut PgConnection) -> Result<(), RepositoryError> {
    let tables = GoldTable::ALL
        .iter()
        .map(GoldTable::name)
        .collect::<Vec<_>>()
        .join(", ");

    conn.transaction(|conn| {
        diesel::sql_query(format!("TRUNCATE TABLE {tables} RESTART IDENTITY CASCADE"))
            .execute(conn)
            .map_err(|e| {
                error!("reset_gold_tables: error truncating Gold tables: {}", e);
                RepositoryError::DatabaseError(e)
            })?;
        info!("reset_gold_tables: emptied {}", tables);
        Ok(())
    })
}

/// Row count of every Gold table, in `GoldTable::ALL` order.
pub fn table_counts(conn: &mut PgConnection) -> Result<Vec<TableCount>, RepositoryError> {
    let mut counts = Vec::with_capacity(GoldTable::ALL.len());
    for table in GoldTable::ALL {
        let rows = match table {
            GoldTable::Restaurants => restaurants::table.count().get_result::<i64>(conn),
            GoldTable::Employees => employees::table.count().get_result::<i64>(conn),
            GoldTable::GuestChecks => guest_checks::table.count().get_result::<i64>(conn),
            GoldTable::CheckTaxes => check_taxes::table.count().get_result::<i64>(conn),
            GoldTable::DetailLines => detail_lines::table.count().get_result::<i64>(conn),
            GoldTable::MenuItemDetails => menu_item_details::table.count().get_result::<i64>(conn),
            GoldTable::DiscountDetails => discount_details::table.count().get_result::<i64>(conn),
            GoldTable::ServiceChargeDetails => {
                service_charge_details::table.count().get_result::<i64>(conn)
            }
            GoldTable::PaymentDetails => payment_details::table.count().get_result::<i64>(conn),
            GoldTable::ErrorDetails => error_details::table.count().get_result::<i64>(conn),
        }
        .map_err(|e| {
            error!("table_counts: error counting {}: {}", table, e);
            RepositoryError::DatabaseError(e)
        })?;

        info!("table_counts: {}: {} rows", table, rows);
        counts.push(TableCount { table, rows });
    }
    Ok(counts)
}

/// Deletes variant rows that no line detail references. Runs as one
/// transaction across all variant tables.
pub fn purge_orphaned_details(conn: &mut PgConnection) -> Result<usize, RepositoryError> {
    conn.transaction(|conn| {
        let mut removed = 0;
        for kind in DetailKind::ALL {
            let purged = details::purge_unreferenced(conn, kind)?;
            if purged > 0 {
                info!(
                    "purge_orphaned_details: removed {} orphaned rows from {}",
                    purged,
                    kind.table()
                );
            }
            removed += purged;
        }
        Ok(removed)
    })
}

/// Line details whose variant row is missing, summed over every kind.
pub fn count_dangling_detail_lines(conn: &mut PgConnection) -> Result<i64, RepositoryError> {
    let mut dangling = 0;
    for kind in DetailKind::ALL {
        let lines = details::count_dangling_lines(conn, kind)?;
        if lines > 0 {
            warn!(
                "count_dangling_detail_lines: {} {} lines reference a missing {} row",
                lines,
                kind,
                kind.table()
            );
        }
        dangling += lines;
    }
    Ok(dangling)
}
