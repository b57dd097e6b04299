use diesel::r2d2::{ConnectionManager, Pool};
use diesel::{r2d2, PgConnection};
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use log::{error, info};

pub mod catalog;
pub mod details;
mod errors;
pub mod guest_checks;
pub mod maintenance;
pub mod schema;
pub mod transaction;

pub use catalog::CatalogResolver;
pub use errors::RepositoryError;
pub use guest_checks::GuestCheckOperations;
pub use transaction::TransactionScope;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

pub type DbPool = Pool<ConnectionManager<PgConnection>>;

pub fn establish_connection_pool(
    database_url: &str,
    max_size: u32,
) -> Result<DbPool, RepositoryError> {
    let manager = ConnectionManager::<PgConnection>::new(database_url);

    Pool::builder()
        .max_size(max_size)
        .build(manager)
        .map_err(|e| {
            error!("establish_connection_pool: unable to build pool: {}", e);
            RepositoryError::ConnectionPoolError(e)
        })
}

pub fn run_db_migrations(pool: DbPool) -> Result<(), RepositoryError> {
    let mut conn = DbConnection::new(&pool)?;
    let applied = conn
        .connection()
        .run_pending_migrations(MIGRATIONS)
        .map_err(|e| RepositoryError::MigrationError(e.to_string()))?;
    for version in applied {
        info!("run_db_migrations: applied {}", version);
    }
    Ok(())
}

// Connection Guard - Manages pool
pub struct DbConnection<'a> {
    conn: r2d2::PooledConnection<ConnectionManager<PgConnection>>,
    _lifetime: std::marker::PhantomData<&'a ()>,
}

impl DbConnection<'_> {
    pub fn new(pool: &DbPool) -> Result<Self, RepositoryError> {
        Ok(Self {
            conn: pool.get().map_err(RepositoryError::ConnectionPoolError)?,
            _lifetime: std::marker::PhantomData,
        })
    }

    pub fn connection(&mut self) -> &mut PgConnection {
        &mut self.conn
    }
}
