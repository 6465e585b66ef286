use std::sync::atomic::{AtomicI64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use banner_api::config::AppConfig;
use banner_api::database::{BannerRepository, DatabaseManager};
use tokio::sync::OnceCell;

static SCHEMA: OnceCell<()> = OnceCell::const_new();

/// Tag id whose association rows the database refuses, so tests can make a
/// write fail halfway through its transaction.
pub const FAILING_TAG: i64 = -1;

const REJECT_TAG_FUNCTION: &str = "CREATE OR REPLACE FUNCTION reject_failing_tag() RETURNS trigger AS $$
    BEGIN
        IF NEW.tag_id = -1 THEN
            RAISE EXCEPTION 'association rejected for tag %', NEW.tag_id;
        END IF;
        RETURN NEW;
    END
    $$ LANGUAGE plpgsql";

const REJECT_TAG_TRIGGER: &str = "DO $$
    BEGIN
        IF NOT EXISTS (SELECT 1 FROM pg_trigger WHERE tgname = 'reject_failing_tag') THEN
            CREATE TRIGGER reject_failing_tag BEFORE INSERT ON banner_tag_feature
                FOR EACH ROW EXECUTE FUNCTION reject_failing_tag();
        END IF;
    END
    $$";
static NEXT_ID: AtomicI64 = AtomicI64::new(0);

/// Repository against the database named by DATABASE_URL, or `None` when the
/// variable is unset so the suite can run without PostgreSQL.
pub async fn repository() -> Result<Option<BannerRepository>> {
    let _ = dotenvy::dotenv();
    if std::env::var("DATABASE_URL").is_err() {
        eprintln!("DATABASE_URL not set, skipping database test");
        return Ok(None);
    }

    let mut config = AppConfig::from_env().database;
    config.max_connections = 2;
    let pool = DatabaseManager::connect(&config)
        .await
        .context("failed to connect to test database")?;

    SCHEMA
        .get_or_try_init(|| async {
            DatabaseManager::ensure_schema(&pool).await?;
            sqlx::query(REJECT_TAG_FUNCTION).execute(&pool).await?;
            sqlx::query(REJECT_TAG_TRIGGER).execute(&pool).await?;
            Ok::<_, anyhow::Error>(())
        })
        .await
        .context("failed to prepare schema")?;

    Ok(Some(BannerRepository::with_config(pool, &config)))
}

/// Tag/feature id no other test (or earlier run) has used, so tests can share
/// one database while running in parallel.
pub fn unique_id() -> i64 {
    let seed = NEXT_ID.load(Ordering::SeqCst);
    if seed == 0 {
        let micros = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_micros() as i64)
            .unwrap_or(1);
        let _ = NEXT_ID.compare_exchange(0, micros, Ordering::SeqCst, Ordering::SeqCst);
    }
    NEXT_ID.fetch_add(1, Ordering::SeqCst)
}
