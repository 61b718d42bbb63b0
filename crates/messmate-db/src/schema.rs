//! Schema definitions and migration runner for SurrealDB.
//!
//! All tables are SCHEMAFULL. UUIDs and calendar dates are stored as
//! strings; dates use the ISO `YYYY-MM-DD` form so they sort correctly.

use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use tracing::info;

use crate::error::DbError;

// -----------------------------------------------------------------------
// Migration tracking
// -----------------------------------------------------------------------

const MIGRATION_TABLE_DDL: &str = "\
DEFINE TABLE IF NOT EXISTS _migration SCHEMAFULL;
DEFINE FIELD IF NOT EXISTS version ON TABLE _migration TYPE int;
DEFINE FIELD IF NOT EXISTS name ON TABLE _migration TYPE string;
DEFINE FIELD IF NOT EXISTS applied_at ON TABLE _migration TYPE datetime \
    DEFAULT time::now();
DEFINE INDEX IF NOT EXISTS idx_migration_version ON TABLE _migration \
    COLUMNS version UNIQUE;
";

#[derive(Debug, SurrealValue)]
struct MigrationRecord {
    version: u32,
}

struct Migration {
    version: u32,
    name: &'static str,
    sql: &'static str,
}

static MIGRATIONS: &[Migration] = &[Migration {
    version: 1,
    name: "initial_schema",
    sql: SCHEMA_V1,
}];

// -----------------------------------------------------------------------
// Schema v1
// -----------------------------------------------------------------------

const SCHEMA_V1: &str = "\
-- =======================================================================
-- Groups and memberships (global scope)
-- =======================================================================
DEFINE TABLE group SCHEMAFULL;
DEFINE FIELD name ON TABLE group TYPE string ASSERT $value != '';
DEFINE FIELD created_at ON TABLE group TYPE datetime DEFAULT time::now();

DEFINE TABLE membership SCHEMAFULL;
DEFINE FIELD actor_id ON TABLE membership TYPE string;
DEFINE FIELD tenant_id ON TABLE membership TYPE string;
DEFINE FIELD created_at ON TABLE membership TYPE datetime \
    DEFAULT time::now();
DEFINE INDEX idx_membership_actor ON TABLE membership \
    COLUMNS actor_id UNIQUE;

-- =======================================================================
-- Residents (tenant scope)
-- =======================================================================
DEFINE TABLE residents SCHEMAFULL;
DEFINE FIELD tenant_id ON TABLE residents TYPE string;
DEFINE FIELD name ON TABLE residents TYPE string ASSERT $value != '';
DEFINE FIELD join_date ON TABLE residents TYPE string;
DEFINE FIELD created_at ON TABLE residents TYPE datetime \
    DEFAULT time::now();
DEFINE FIELD updated_at ON TABLE residents TYPE datetime \
    DEFAULT time::now();
DEFINE INDEX idx_residents_tenant ON TABLE residents COLUMNS tenant_id;

-- =======================================================================
-- Meals (tenant scope, one cell per resident and day)
-- =======================================================================
DEFINE TABLE meals SCHEMAFULL;
DEFINE FIELD tenant_id ON TABLE meals TYPE string;
DEFINE FIELD resident_id ON TABLE meals TYPE string;
DEFINE FIELD date ON TABLE meals TYPE string;
DEFINE FIELD meal_count ON TABLE meals TYPE int ASSERT $value > 0;
DEFINE FIELD created_at ON TABLE meals TYPE datetime DEFAULT time::now();
DEFINE FIELD updated_at ON TABLE meals TYPE datetime DEFAULT time::now();
DEFINE INDEX idx_meals_cell ON TABLE meals \
    COLUMNS tenant_id, resident_id, date UNIQUE;

-- =======================================================================
-- Market purchases (tenant scope)
-- =======================================================================
DEFINE TABLE market SCHEMAFULL;
DEFINE FIELD tenant_id ON TABLE market TYPE string;
DEFINE FIELD resident_id ON TABLE market TYPE string;
DEFINE FIELD date ON TABLE market TYPE string;
DEFINE FIELD amount ON TABLE market TYPE float ASSERT $value > 0;
DEFINE FIELD description ON TABLE market TYPE string ASSERT $value != '';
DEFINE FIELD created_at ON TABLE market TYPE datetime DEFAULT time::now();
DEFINE FIELD updated_at ON TABLE market TYPE datetime DEFAULT time::now();
DEFINE INDEX idx_market_tenant ON TABLE market COLUMNS tenant_id;

-- =======================================================================
-- Shared bills (tenant scope)
-- =======================================================================
DEFINE TABLE bills SCHEMAFULL;
DEFINE FIELD tenant_id ON TABLE bills TYPE string;
DEFINE FIELD name ON TABLE bills TYPE string ASSERT $value != '';
DEFINE FIELD amount ON TABLE bills TYPE float ASSERT $value > 0;
DEFINE FIELD date ON TABLE bills TYPE string;
DEFINE FIELD created_at ON TABLE bills TYPE datetime DEFAULT time::now();
DEFINE FIELD updated_at ON TABLE bills TYPE datetime DEFAULT time::now();
DEFINE INDEX idx_bills_tenant ON TABLE bills COLUMNS tenant_id;
";

/// Apply any migrations newer than the recorded schema version.
///
/// Creates the `_migration` tracking table on first run. Re-running is
/// safe.
pub async fn run_migrations<C: Connection>(db: &Surreal<C>) -> Result<(), DbError> {
    db.query(MIGRATION_TABLE_DDL)
        .await?
        .check()
        .map_err(|e| DbError::Migration(e.to_string()))?;

    let mut result = db
        .query("SELECT version FROM _migration ORDER BY version DESC LIMIT 1")
        .await?;
    let records: Vec<MigrationRecord> = result.take(0)?;
    let current_version = records.first().map(|m| m.version).unwrap_or(0);

    for migration in MIGRATIONS {
        if migration.version > current_version {
            info!(
                version = migration.version,
                name = migration.name,
                "Applying migration"
            );
            db.query(migration.sql).await?.check().map_err(|e| {
                DbError::Migration(format!(
                    "Migration v{} '{}' failed: {}",
                    migration.version, migration.name, e,
                ))
            })?;

            db.query("CREATE _migration SET version = $version, name = $name")
                .bind(("version", migration.version))
                .bind(("name", migration.name))
                .await?
                .check()
                .map_err(|e| {
                    DbError::Migration(format!(
                        "Failed to record migration v{}: {}",
                        migration.version, e,
                    ))
                })?;

            info!(version = migration.version, "Migration applied");
        }
    }

    Ok(())
}

/// Raw schema DDL for version 1.
pub fn schema_v1() -> &'static str {
    SCHEMA_V1
}
