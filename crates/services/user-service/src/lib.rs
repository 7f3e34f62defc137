//! User Service Library
//!
//! This crate provides the user lifecycle rules and the record stores they
//! run against. The HTTP surface lives in the gateway crate.

pub mod config;
pub mod infra;
pub mod repository;
pub mod service;

use std::sync::Arc;

use common::StoreBackend;
use sea_orm::DbErr;
use tracing::info;

use crate::config::UserServiceConfig;
use crate::infra::Database;
use crate::repository::{MemoryStore, UserRepository, UserStore};

/// Open the configured record store.
///
/// PostgreSQL connections apply pending migrations before returning.
pub async fn connect_store(config: &UserServiceConfig) -> Result<Arc<dyn UserRepository>, DbErr> {
    match config.database.backend {
        StoreBackend::Postgres => {
            let db = Database::connect(&config.database.url).await?;
            Ok(Arc::new(UserStore::new(db.get_connection())))
        }
        StoreBackend::Memory => {
            info!("Using in-memory user store, records will not survive a restart");
            Ok(Arc::new(MemoryStore::new()))
        }
    }
}

/// Run migrations (for CLI commands).
pub async fn run_migrations(action: MigrateAction) -> Result<(), Box<dyn std::error::Error>> {
    let config = UserServiceConfig::from_env();
    if config.database.backend == StoreBackend::Memory {
        info!("In-memory store selected, nothing to migrate");
        return Ok(());
    }

    let db = Database::connect_without_migrations(&config.database.url).await?;

    match action {
        MigrateAction::Up => {
            db.run_migrations().await?;
            info!("Migrations applied successfully");
        }
        MigrateAction::Down => {
            db.rollback_migration().await?;
            info!("Rolled back last migration");
        }
        MigrateAction::Status => {
            let status = db.migration_status().await?;
            for (name, applied) in status {
                let marker = if applied { "[x]" } else { "[ ]" };
                println!("{} {}", marker, name);
            }
        }
        MigrateAction::Fresh => {
            db.fresh_migrations().await?;
            info!("Database reset and migrations applied");
        }
    }

    Ok(())
}

/// Migration action type.
#[derive(Debug, Clone, Copy)]
pub enum MigrateAction {
    Up,
    Down,
    Status,
    Fresh,
}
