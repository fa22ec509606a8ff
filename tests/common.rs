use calshare_backend::{
    api::router::create_router,
    state::AppState,
    config::Config,
    infra::repositories::{
        sqlite_user_repo::SqliteUserRepo,
        sqlite_auth_repo::SqliteAuthRepo,
        sqlite_event_repo::SqliteEventRepo,
        sqlite_period_repo::SqlitePeriodRepo,
        sqlite_category_repo::SqliteCategoryRepo,
        sqlite_follow_repo::SqliteFollowRepo,
        sqlite_share_repo::SqliteShareRepo,
    },
    domain::services::auth_service::AuthService,
    background::start_background_worker,
};
use sqlx::{sqlite::{SqliteConnectOptions, SqlitePoolOptions}, Pool, Sqlite};
use std::sync::Arc;
use uuid::Uuid;
use axum::{
    body::Body,
    http::{Request, header},
    Router,
};
use std::str::FromStr;
use tower::ServiceExt;
use serde_json::Value;

pub struct AuthHeaders {
    pub access_token: String,
    pub csrf_token: String,
}

#[allow(dead_code)]
pub struct TestApp {
    pub router: Router,
    pub pool: Pool<Sqlite>,
    pub db_filename: String,
    pub state: Arc<AppState>,
}

impl TestApp {
    pub async fn new() -> Self {
        let db_filename = format!("test_{}.db", Uuid::new_v4());
        let db_url = format!("sqlite://{}?mode=rwc", db_filename);

        let connection_options = SqliteConnectOptions::from_str(&db_url)
            .unwrap()
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .connect_with(connection_options)
            .await
            .expect("Failed to connect to test db");

        sqlx::migrate!("./migrations/sqlite")
            .run(&pool)
            .await
            .expect("Failed to migrate test db");

        let priv_key_pem = include_str!("../tests/keys/test_private.pem");
        let pub_key_pem = include_str!("../tests/keys/test_public.pem");

        let config = Config {
            database_url: db_url.clone(),
            port: 0,
            jwt_secret_key: priv_key_pem.to_string(),
            jwt_public_key: pub_key_pem.to_string(),
            auth_issuer: "test-issuer".to_string(),
        };

        let auth_repo = Arc::new(SqliteAuthRepo::new(pool.clone()));
        let auth_service = Arc::new(AuthService::new(auth_repo.clone(), config.clone()));

        let state = Arc::new(AppState {
            config: config.clone(),
            user_repo: Arc::new(SqliteUserRepo::new(pool.clone())),
            auth_repo,
            event_repo: Arc::new(SqliteEventRepo::new(pool.clone())),
            period_repo: Arc::new(SqlitePeriodRepo::new(pool.clone())),
            category_repo: Arc::new(SqliteCategoryRepo::new(pool.clone())),
            follow_repo: Arc::new(SqliteFollowRepo::new(pool.clone())),
            share_repo: Arc::new(SqliteShareRepo::new(pool.clone())),
            auth_service,
        });

        // Start Background Worker
        let worker_state = state.clone();
        tokio::spawn(async move {
            start_background_worker(worker_state).await;
        });

        let router = create_router(state.clone());

        Self {
            router,
            pool,
            db_filename,
            state,
        }
    }

    pub async fn signup(&self, username: &str, password: &str, timezone: Option<&str>) {
        let mut payload = serde_json::json!({
            "username": username,
            "password": password
        });
        if let Some(tz) = timezone {
            payload["timezone"] = serde_json::json!(tz);
        }

        let response = self.router.clone().oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/auth/signup")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(payload.to_string()))
                .unwrap()
        ).await.unwrap();

        if !response.status().is_success() {
            panic!("Signup failed in test helper: status {}", response.status());
        }
    }

    pub async fn login(&self, username: &str, password: &str) -> AuthHeaders {
        let payload = serde_json::json!({
            "username": username,
            "password": password
        });

        let response = self.router.clone().oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/auth/login")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(payload.to_string()))
                .unwrap()
        ).await.unwrap();

        if !response.status().is_success() {
            panic!("Login failed in test helper: status {}", response.status());
        }

        let cookies: Vec<String> = response.headers()
            .get_all(header::SET_COOKIE)
            .iter()
            .map(|h| h.to_str().unwrap().to_string())
            .collect();

        let access_token_cookie = cookies.iter()
            .find(|c| c.contains("access_token="))
            .expect("No access_token cookie returned");

        let start = access_token_cookie.find("access_token=").unwrap() + 13;
        let end = access_token_cookie[start..].find(';').unwrap_or(access_token_cookie.len() - start);
        let access_token = access_token_cookie[start..start+end].to_string();

        let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body_json: Value = serde_json::from_slice(&body_bytes).unwrap();
        let csrf_token = body_json["csrf_token"].as_str().expect("No csrf_token in body").to_string();

        AuthHeaders {
            access_token,
            csrf_token
        }
    }

    /// Signup followed by login, the usual opening move of a test.
    pub async fn signup_and_login(&self, username: &str) -> AuthHeaders {
        self.signup(username, "correct horse battery", None).await;
        self.login(username, "correct horse battery").await
    }

    #[allow(dead_code)]
    pub async fn signup_and_login_tz(&self, username: &str, timezone: &str) -> AuthHeaders {
        self.signup(username, "correct horse battery", Some(timezone)).await;
        self.login(username, "correct horse battery").await
    }
}

impl Drop for TestApp {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.db_filename);
    }
}
