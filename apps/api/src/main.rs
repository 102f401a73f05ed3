//! Collegia API composition root.

#![forbid(unsafe_code)]

mod api_config;
mod auth;
mod dto;
mod error;
mod handlers;
mod middleware;
mod state;

use std::sync::Arc;

use axum::Router;
use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderValue, Method};
use axum::middleware::{from_fn, from_fn_with_state};
use axum::routing::{delete, get, post, put};
use collegia_application::{AuthService, StudentService, SubjectService};
use collegia_core::AppError;
use collegia_infrastructure::{
    Argon2PasswordHasher, PostgresCredentialRepository, PostgresDepartmentDirectory,
    PostgresStudentRepository, PostgresSubjectRepository,
};
use sqlx::postgres::PgPoolOptions;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tower_sessions::cookie::SameSite;
use tower_sessions::cookie::time::Duration;
use tower_sessions::{Expiry, SessionManagerLayer};
use tower_sessions_sqlx_store::PostgresStore;
use tracing::info;

use crate::api_config::{ApiConfig, init_tracing};
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = ApiConfig::load()?;

    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(&config.database_url)
        .await
        .map_err(|error| AppError::Internal(format!("failed to connect to database: {error}")))?;

    sqlx::migrate!("../../crates/infrastructure/migrations")
        .run(&pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to run migrations: {error}")))?;

    if config.migrate_only {
        info!("database migrations applied successfully");
        return Ok(());
    }

    let session_store = PostgresStore::new(pool.clone())
        .with_table_name("tower_sessions")
        .map_err(|error| {
            AppError::Validation(format!("invalid session table name configuration: {error}"))
        })?;
    session_store.migrate().await.map_err(|error| {
        AppError::Internal(format!("failed to initialize session store: {error}"))
    })?;

    let session_layer = SessionManagerLayer::new(session_store)
        .with_secure(config.cookie_secure)
        .with_same_site(SameSite::Lax)
        .with_http_only(true)
        .with_expiry(Expiry::OnInactivity(Duration::minutes(30)));

    let directory = Arc::new(PostgresDepartmentDirectory::new(pool.clone()));
    let subject_repository = Arc::new(PostgresSubjectRepository::new(pool.clone()));
    let student_repository = Arc::new(PostgresStudentRepository::new(pool.clone()));
    let credential_repository = Arc::new(PostgresCredentialRepository::new(pool.clone()));
    let password_hasher = Arc::new(Argon2PasswordHasher::new());

    let app_state = AppState {
        auth_service: AuthService::new(credential_repository, password_hasher.clone()),
        subject_service: SubjectService::new(
            subject_repository,
            directory.clone(),
            config.default_course.clone(),
        ),
        student_service: StudentService::new(
            student_repository,
            directory,
            password_hasher,
            config.default_course.clone(),
        ),
        frontend_url: config.frontend_url.clone(),
    };

    let protected_routes = Router::new()
        .route("/auth/me", get(auth::me_handler))
        .route("/hod-details", get(handlers::hod::hod_profile_handler))
        .route("/subjects", get(handlers::hod::list_subjects_handler))
        .route("/add-subject", post(handlers::hod::add_subject_handler))
        .route("/update-subject", put(handlers::hod::update_subject_handler))
        .route("/delete-subject", delete(handlers::hod::delete_subject_handler))
        .route("/faculty", get(handlers::hod::list_faculty_handler))
        .route(
            "/faculty-assignments",
            get(handlers::hod::list_faculty_assignments_handler),
        )
        .route("/hod-students", get(handlers::hod::list_students_handler))
        .route("/add-student", post(handlers::hod::add_student_handler))
        .route("/update-student", put(handlers::hod::update_student_handler))
        .route("/delete-student", delete(handlers::hod::delete_student_handler))
        .route("/hod-marks", get(handlers::hod::marks_report_handler))
        .route(
            "/student-details",
            get(handlers::student::student_profile_handler),
        )
        .route(
            "/student-marks",
            get(handlers::student::student_marks_handler),
        )
        .route_layer(from_fn(middleware::require_auth));

    let cors_layer = CorsLayer::new()
        .allow_origin(
            HeaderValue::from_str(&config.frontend_url)
                .map_err(|error| AppError::Internal(format!("invalid FRONTEND_URL: {error}")))?,
        )
        .allow_credentials(true)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([CONTENT_TYPE]);

    let app = Router::new()
        .route("/health", get(handlers::health::health_handler))
        .route("/auth/login", post(auth::login_handler))
        .route("/auth/register-admin", post(auth::register_admin_handler))
        .route("/auth/logout", post(auth::logout_handler))
        .merge(protected_routes)
        .route_layer(from_fn_with_state(
            app_state.clone(),
            middleware::require_same_origin_for_mutations,
        ))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer)
        .layer(session_layer)
        .with_state(app_state);

    let address = config.socket_address()?;

    let listener = tokio::net::TcpListener::bind(address)
        .await
        .map_err(|error| AppError::Internal(format!("failed to bind listener: {error}")))?;

    info!(%address, "collegia-api listening");

    axum::serve(listener, app)
        .await
        .map_err(|error| AppError::Internal(format!("api server error: {error}")))
}
