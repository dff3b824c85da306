//! Utility to inspect the certificate database and print both relations' columns.

use epc_lookup_api::config::Config;
use epc_lookup_api::db::Database;
use sqlx::Row;

const RELATIONS: [&str; 2] = [
    "certificates_deduped",
    "certificates_deduped_recommendations",
];

/// Main entry point for the schema inspection utility.
///
/// Opens the configured database read-only and lists the columns of each
/// relation the API queries, so an ETL export can be checked before deploy.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;
    let db = Database::connect(&config.database_path, 1).await?;

    println!("Database: {}", config.database_path);
    for relation in RELATIONS {
        let columns = sqlx::query(&format!("PRAGMA table_info({})", relation))
            .fetch_all(&db.pool)
            .await?;

        if columns.is_empty() {
            println!("- {} (missing)", relation);
            continue;
        }

        let count = sqlx::query_scalar::<_, i64>(&format!("SELECT COUNT(*) FROM {}", relation))
            .fetch_one(&db.pool)
            .await?;
        println!("- {} ({} rows)", relation, count);

        for column in columns {
            let name: String = column.try_get("name")?;
            let type_: String = column.try_get("type")?;
            println!("  - {}: {}", name, type_);
        }
        println!();
    }

    Ok(())
}
