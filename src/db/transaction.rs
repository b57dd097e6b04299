//! Per-record transaction discipline for a batch run.
//!
//! A [`TransactionScope`] borrows the run's connection for the whole batch.
//! Every unit of work (the catalog bootstrap, then each guest check) runs in
//! its own transaction: committed when the closure returns `Ok`, rolled back
//! when it returns `Err`. Outside a unit of work the connection is in
//! auto-commit mode, and dropping the scope guarantees it is left that way.

use diesel::connection::{AnsiTransactionManager, TransactionManager};
use diesel::prelude::*;
use diesel::PgConnection;
use log::{debug, error, info, warn};

use crate::db::RepositoryError;

pub struct TransactionScope<'c> {
    conn: &'c mut PgConnection,
    committed: usize,
    rolled_back: usize,
}

impl<'c> TransactionScope<'c> {
    pub fn begin(conn: &'c mut PgConnection) -> Self {
        debug!("TransactionScope: per-record transactions enabled");
        Self {
            conn,
            committed: 0,
            rolled_back: 0,
        }
    }

    /// Runs `work` as one atomic unit. Errors are returned after the
    /// rollback, never swallowed.
    pub fn unit_of_work<T, F>(&mut self, label: &str, work: F) -> Result<T, RepositoryError>
    where
        F: FnOnce(&mut PgConnection) -> Result<T, RepositoryError>,
    {
        match self.conn.transaction(work) {
            Ok(value) => {
                self.committed += 1;
                debug!("unit_of_work: {} committed", label);
                Ok(value)
            }
            Err(e) => {
                self.rolled_back += 1;
                warn!("unit_of_work: {} rolled back: {}", label, e);
                Err(e)
            }
        }
    }

    pub fn connection(&mut self) -> &mut PgConnection {
        self.conn
    }

    pub fn committed(&self) -> usize {
        self.committed
    }

    pub fn rolled_back(&self) -> usize {
        self.rolled_back
    }

    fn open_depth(&mut self) -> Option<u32> {
        let status =
            <AnsiTransactionManager as TransactionManager<PgConnection>>::transaction_manager_status_mut(
                self.conn,
            );
        match status.transaction_depth() {
            Ok(depth) => depth.map(|d| d.get()),
            Err(e) => {
                error!("TransactionScope: transaction manager is broken: {}", e);
                None
            }
        }
    }
}

impl Drop for TransactionScope<'_> {
    fn drop(&mut self) {
        while let Some(depth) = self.open_depth() {
            warn!(
                "TransactionScope: rolling back transaction left open at depth {}",
                depth
            );
            if let Err(e) =
                <AnsiTransactionManager as TransactionManager<PgConnection>>::rollback_transaction(
                    self.conn,
                )
            {
                error!("TransactionScope: rollback on release failed: {}", e);
                break;
            }
        }
        info!(
            "TransactionScope: released ({} committed, {} rolled back), auto-commit restored",
            self.committed, self.rolled_back
        );
    }
}
