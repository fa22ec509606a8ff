use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use sqlx::{postgres::{PgPoolOptions, PgConnectOptions}, sqlite::{SqlitePoolOptions, SqliteJournalMode, SqliteConnectOptions}};
use sqlx::{PgPool, SqlitePool, ConnectOptions};
use tracing::info;
use tracing::log::LevelFilter;

use crate::config::Config;
use crate::state::AppState;
use crate::domain::services::auth_service::AuthService;
use crate::infra::repositories::{
    postgres_user_repo::PostgresUserRepo, postgres_auth_repo::PostgresAuthRepo,
    postgres_event_repo::PostgresEventRepo, postgres_period_repo::PostgresPeriodRepo,
    postgres_category_repo::PostgresCategoryRepo, postgres_follow_repo::PostgresFollowRepo,
    postgres_share_repo::PostgresShareRepo,
    sqlite_user_repo::SqliteUserRepo, sqlite_auth_repo::SqliteAuthRepo,
    sqlite_event_repo::SqliteEventRepo, sqlite_period_repo::SqlitePeriodRepo,
    sqlite_category_repo::SqliteCategoryRepo, sqlite_follow_repo::SqliteFollowRepo,
    sqlite_share_repo::SqliteShareRepo,
};

pub async fn bootstrap_state(config: &Config) -> AppState {
    let database_url = &config.database_url;

    if database_url.starts_with("postgres://") || database_url.starts_with("postgresql://") {
        info!("Initializing PostgreSQL connection...");

        let mut opts: PgConnectOptions = database_url.parse().expect("Invalid Postgres URL");
        opts = opts.log_statements(LevelFilter::Debug)
            .log_slow_statements(LevelFilter::Warn, Duration::from_millis(500));

        let pool = PgPoolOptions::new()
            .max_connections(10)
            .connect_with(opts)
            .await
            .expect("Failed to connect to Postgres");

        run_postgres_migrations(&pool).await;

        let auth_repo = Arc::new(PostgresAuthRepo::new(pool.clone()));
        let auth_service = Arc::new(AuthService::new(auth_repo.clone(), config.clone()));

        AppState {
            config: config.clone(),
            user_repo: Arc::new(PostgresUserRepo::new(pool.clone())),
            auth_repo,
            event_repo: Arc::new(PostgresEventRepo::new(pool.clone())),
            period_repo: Arc::new(PostgresPeriodRepo::new(pool.clone())),
            category_repo: Arc::new(PostgresCategoryRepo::new(pool.clone())),
            follow_repo: Arc::new(PostgresFollowRepo::new(pool.clone())),
            share_repo: Arc::new(PostgresShareRepo::new(pool.clone())),
            auth_service,
        }
    } else {
        info!("Initializing SQLite connection with WAL Mode...");

        let opts = SqliteConnectOptions::from_str(database_url)
            .expect("Invalid SQLite connection string")
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(Duration::from_secs(5))
            .log_statements(LevelFilter::Debug)
            .log_slow_statements(LevelFilter::Warn, Duration::from_millis(500));

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(opts)
            .await
            .expect("Failed to connect to SQLite");

        run_sqlite_migrations(&pool).await;

        let auth_repo = Arc::new(SqliteAuthRepo::new(pool.clone()));
        let auth_service = Arc::new(AuthService::new(auth_repo.clone(), config.clone()));

        AppState {
            config: config.clone(),
            user_repo: Arc::new(SqliteUserRepo::new(pool.clone())),
            auth_repo,
            event_repo: Arc::new(SqliteEventRepo::new(pool.clone())),
            period_repo: Arc::new(SqlitePeriodRepo::new(pool.clone())),
            category_repo: Arc::new(SqliteCategoryRepo::new(pool.clone())),
            follow_repo: Arc::new(SqliteFollowRepo::new(pool.clone())),
            share_repo: Arc::new(SqliteShareRepo::new(pool.clone())),
            auth_service,
        }
    }
}

async fn run_postgres_migrations(pool: &PgPool) {
    sqlx::migrate!("./migrations/postgres")
        .run(pool)
        .await
        .expect("Failed to run Postgres migrations");
}

async fn run_sqlite_migrations(pool: &SqlitePool) {
    sqlx::migrate!("./migrations/sqlite")
        .run(pool)
        .await
        .expect("Failed to run SQLite migrations");
}
