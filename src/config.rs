use std::path::PathBuf;

use dotenvy::var;
use thiserror::Error;

use crate::db::CatalogResolver;

pub const DEFAULT_POOL_SIZE: u32 = 2;
pub const DEFAULT_BRONZE_INPUT_PATH: &str = "data-lake/bronze/res/getGuestChecks";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("{key} has an invalid value '{value}'")]
    Invalid { key: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct LoaderConfig {
    pub database_url: String,
    pub pool_size: u32,
    pub input_path: PathBuf,
    pub employee_role: String,
    pub reset_before_load: bool,
    pub purge_orphaned_details: bool,
}

impl LoaderConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let database_url = var("DATABASE_URL").map_err(|_| ConfigError::Missing("DATABASE_URL"))?;
        let pool_size = match var("DB_POOL_SIZE") {
            Ok(v) => v
                .parse::<u32>()
                .ok()
                .filter(|size| *size > 0)
                .ok_or(ConfigError::Invalid {
                    key: "DB_POOL_SIZE",
                    value: v,
                })?,
            Err(_) => DEFAULT_POOL_SIZE,
        };
        let input_path = var("BRONZE_INPUT_PATH")
            .unwrap_or_else(|_| DEFAULT_BRONZE_INPUT_PATH.to_string())
            .into();
        let employee_role = var("DEFAULT_EMPLOYEE_ROLE")
            .unwrap_or_else(|_| CatalogResolver::DEFAULT_EMPLOYEE_ROLE.to_string());
        let reset_before_load = flag("RESET_GOLD_BEFORE_LOAD");
        let purge_orphaned_details = flag("PURGE_ORPHANED_DETAILS");

        Ok(Self {
            database_url,
            pool_size,
            input_path,
            employee_role,
            reset_before_load,
            purge_orphaned_details,
        })
    }

    pub fn catalog(&self) -> CatalogResolver {
        CatalogResolver::new(self.employee_role.clone())
    }
}

fn flag(key: &str) -> bool {
    var(key)
        .ok()
        .map(|v| v == "1" || v.to_lowercase() == "true")
        .unwrap_or(false)
}
