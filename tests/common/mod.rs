//! Shared fixtures: a temporary certificate database opened read-only.

use epc_lookup_api::db::Database;
use sqlx::sqlite::SqliteConnectOptions;
use sqlx::SqlitePool;
use tempfile::TempDir;

const SEED_SQL: &str = r#"
CREATE TABLE certificates_deduped (
    POSTCODE TEXT NOT NULL,
    ADDRESS TEXT NOT NULL,
    CURRENT_ENERGY_RATING TEXT,
    POTENTIAL_ENERGY_RATING TEXT,
    CURRENT_ENERGY_EFFICIENCY INTEGER,
    POTENTIAL_ENERGY_EFFICIENCY INTEGER,
    LODGEMENT_DATE TEXT
);

CREATE TABLE certificates_deduped_recommendations (
    POSTCODE TEXT NOT NULL,
    ADDRESS TEXT NOT NULL,
    IMPROVEMENT_DESCR_TEXT TEXT,
    INDICATIVE_COST
);

INSERT INTO certificates_deduped VALUES
    ('AB12CD', '2 Oak Rd', 'E', 'C', 48, 72, '2019-02-01'),
    ('AB12CD', '10 Oak Rd', 'D', 'B', 60, 85, '2020-03-02'),
    ('AB12CD', 'Flat A', 'C', 'C', 70, 74, '2018-11-30'),
    ('AB12CD', '1 Oak Rd', 'F', 'C', 30, 70, '2022-07-19'),
    ('DN122DJ', '1, Windmill Avenue', 'D', 'B', 61, 84, '2021-06-14'),
    ('DN122DJ', '3, Windmill Avenue', NULL, NULL, NULL, NULL, NULL);

INSERT INTO certificates_deduped_recommendations VALUES
    ('DN122DJ', '1, Windmill Avenue', 'Solar water heating', 4000),
    ('DN122DJ', '1, Windmill Avenue', 'Loft insulation', NULL),
    ('DN122DJ', '1, Windmill Avenue', NULL, 100),
    ('DN122DJ', '1, Windmill Avenue', 'Low energy lighting', 0),
    ('DN122DJ', '1, Windmill Avenue', 'Cavity wall insulation', 500.5),
    ('DN122DJ', '1, Windmill Avenue', 'Draught proofing', '£80 - £120'),
    ('DN122DJ', '3, Windmill Avenue', 'Air source heat pump', 9000),
    ('DN122DJ', '3, Windmill Avenue', 'Room thermostat', '  ');
"#;

/// Certificates without the recommendations relation.
pub const CERTIFICATES_ONLY_SEED_SQL: &str = r#"
CREATE TABLE certificates_deduped (
    POSTCODE TEXT NOT NULL,
    ADDRESS TEXT NOT NULL,
    CURRENT_ENERGY_RATING TEXT,
    POTENTIAL_ENERGY_RATING TEXT,
    CURRENT_ENERGY_EFFICIENCY INTEGER,
    POTENTIAL_ENERGY_EFFICIENCY INTEGER,
    LODGEMENT_DATE TEXT
);

INSERT INTO certificates_deduped VALUES
    ('DN122DJ', '1, Windmill Avenue', 'D', 'B', 61, 84, '2021-06-14');
"#;

/// Keeps the temporary directory alive for as long as the database is used.
pub struct Fixture {
    _dir: TempDir,
    #[allow(dead_code)]
    pub path: String,
    pub db: Database,
}

/// The standard fixture: both relations with typical rows.
pub async fn seeded_database() -> anyhow::Result<Fixture> {
    seeded_database_with(SEED_SQL).await
}

/// Writes `seed_sql` with a writable pool, then reopens the file the way
/// the server does.
pub async fn seeded_database_with(seed_sql: &str) -> anyhow::Result<Fixture> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("epc.sqlite");
    let path_str = path
        .to_str()
        .ok_or_else(|| anyhow::anyhow!("temporary path is not UTF-8"))?
        .to_string();

    let writer = SqlitePool::connect_with(
        SqliteConnectOptions::new()
            .filename(&path)
            .create_if_missing(true),
    )
    .await?;
    sqlx::raw_sql(seed_sql).execute(&writer).await?;
    writer.close().await;

    let db = Database::connect(&path_str, 2).await?;

    Ok(Fixture {
        _dir: dir,
        path: path_str,
        db,
    })
}
