use std::collections::BTreeSet;

use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error};
use diesel::PgConnection;
use log::{error, info, warn};

use crate::db::schema::{employees, restaurants};
use crate::db::{RepositoryError, TransactionScope};
use crate::enums::load::CatalogSummary;
use crate::models::bronze::OrderRecord;
use crate::models::gold::{NewEmployee, NewRestaurant};

/// Maps restaurant and employee natural keys to surrogate ids, registering
/// unknown keys on first sight. Existing rows are never refreshed.
#[derive(Debug, Clone)]
pub struct CatalogResolver {
    employee_role: String,
}

impl Default for CatalogResolver {
    fn default() -> Self {
        Self::new(Self::DEFAULT_EMPLOYEE_ROLE)
    }
}

impl CatalogResolver {
    pub const DEFAULT_EMPLOYEE_ROLE: &'static str = "Waiter";

    pub fn new(employee_role: impl Into<String>) -> Self {
        Self {
            employee_role: employee_role.into(),
        }
    }

    pub fn employee_role(&self) -> &str {
        &self.employee_role
    }

    pub fn default_employee_name(employee_number: i32) -> String {
        format!("Employee {}", employee_number)
    }

    pub fn resolve_restaurant(
        &self,
        conn: &mut PgConnection,
        loc_ref_val: &str,
    ) -> Result<i32, RepositoryError> {
        if let Some(id) = find_restaurant(conn, loc_ref_val)? {
            return Ok(id);
        }

        let inserted = diesel::insert_into(restaurants::table)
            .values(&NewRestaurant {
                loc_ref: loc_ref_val,
            })
            .on_conflict(restaurants::loc_ref)
            .do_nothing()
            .execute(conn)
            .map_err(|e| {
                error!(
                    "resolve_restaurant: error registering restaurant '{}': {}",
                    loc_ref_val, e
                );
                RepositoryError::DatabaseError(e)
            })?;
        if inserted > 0 {
            info!("resolve_restaurant: registered restaurant '{}'", loc_ref_val);
        }

        find_restaurant(conn, loc_ref_val)?
            .ok_or_else(|| RepositoryError::NotFound(format!("restaurants: {loc_ref_val}")))
    }

    pub fn resolve_employee(
        &self,
        conn: &mut PgConnection,
        employee_number_val: i32,
    ) -> Result<i32, RepositoryError> {
        if let Some(id) = find_employee(conn, employee_number_val)? {
            return Ok(id);
        }

        let inserted = diesel::insert_into(employees::table)
            .values(&NewEmployee {
                employee_number: employee_number_val,
                full_name: Self::default_employee_name(employee_number_val),
                role: &self.employee_role,
            })
            .on_conflict(employees::employee_number)
            .do_nothing()
            .execute(conn)
            .map_err(|e| {
                error!(
                    "resolve_employee: error registering employee {}: {}",
                    employee_number_val, e
                );
                RepositoryError::DatabaseError(e)
            })?;
        if inserted > 0 {
            info!("resolve_employee: registered employee {}", employee_number_val);
        }

        find_employee(conn, employee_number_val)?
            .ok_or_else(|| RepositoryError::NotFound(format!("employees: {employee_number_val}")))
    }

    /// Registers every restaurant and employee a batch refers to, in one
    /// transaction committed ahead of the guest checks. Each key is resolved
    /// under its own savepoint: a key the database rejects is logged and left
    /// for its record's unit of work to fail. Only a broken connection aborts
    /// the bootstrap. Records whose keys cannot be read are skipped here.
    pub fn bootstrap(
        &self,
        scope: &mut TransactionScope<'_>,
        records: &[OrderRecord],
    ) -> Result<CatalogSummary, RepositoryError> {
        let loc_refs: BTreeSet<&str> = records.iter().filter_map(OrderRecord::loc_ref).collect();
        let employee_numbers: BTreeSet<i32> = records
            .iter()
            .filter_map(OrderRecord::employee_number)
            .collect();

        scope.unit_of_work("catalog bootstrap", |conn| {
            let mut summary = CatalogSummary::default();
            for loc_ref_val in &loc_refs {
                let resolved = conn.transaction(|conn| self.resolve_restaurant(conn, loc_ref_val));
                if registered(resolved, || format!("restaurant '{}'", loc_ref_val))? {
                    summary.restaurants += 1;
                }
            }
            for employee_number_val in &employee_numbers {
                let resolved =
                    conn.transaction(|conn| self.resolve_employee(conn, *employee_number_val));
                if registered(resolved, || format!("employee {}", employee_number_val))? {
                    summary.employees += 1;
                }
            }
            Ok(summary)
        })
    }
}

// Ok(false) for a key the database rejected, Err only when the connection
// itself is gone.
fn registered(
    resolved: Result<i32, RepositoryError>,
    key: impl FnOnce() -> String,
) -> Result<bool, RepositoryError> {
    match resolved {
        Ok(_) => Ok(true),
        Err(e) if is_connection_failure(&e) => Err(e),
        Err(e) => {
            warn!(
                "bootstrap: unable to register {}, its guest checks will fail: {}",
                key(),
                e
            );
            Ok(false)
        }
    }
}

fn is_connection_failure(e: &RepositoryError) -> bool {
    matches!(
        e,
        RepositoryError::ConnectionPoolError(_)
            | RepositoryError::DatabaseError(
                Error::DatabaseError(DatabaseErrorKind::ClosedConnection, _)
                    | Error::BrokenTransactionManager
                    | Error::AlreadyInTransaction
            )
    )
}

fn find_restaurant(
    conn: &mut PgConnection,
    loc_ref_val: &str,
) -> Result<Option<i32>, RepositoryError> {
    restaurants::table
        .filter(restaurants::loc_ref.eq(loc_ref_val))
        .select(restaurants::restaurant_id)
        .first::<i32>(conn)
        .optional()
        .map_err(|e| {
            error!(
                "find_restaurant: error looking up restaurant '{}': {}",
                loc_ref_val, e
            );
            RepositoryError::DatabaseError(e)
        })
}

fn find_employee(
    conn: &mut PgConnection,
    employee_number_val: i32,
) -> Result<Option<i32>, RepositoryError> {
    employees::table
        .filter(employees::employee_number.eq(employee_number_val))
        .select(employees::employee_id)
        .first::<i32>(conn)
        .optional()
        .map_err(|e| {
            error!(
                "find_employee: error looking up employee {}: {}",
                employee_number_val, e
            );
            RepositoryError::DatabaseError(e)
        })
}
