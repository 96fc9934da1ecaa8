//! services/api/src/bin/api.rs

use api_lib::{
    adapters::{db::DbAdapter, generation_llm::OpenAiTextAdapter},
    config::Config,
    error::ApiError,
    web::{
        chat_handler, explain_handler, flashcards_handler, latest_quiz_handler,
        list_flashcards_handler, middleware::require_user, quiz_handler, rest::ApiDoc,
        set_favorite_handler, state::AppState, summary_handler,
    },
};
use axum::{
    http::{
        header::{ACCEPT, CONTENT_TYPE},
        HeaderName, HeaderValue, Method,
    },
    middleware as axum_middleware,
    routing::{get, patch, post},
    Router,
};
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use study_assistant_core::GenerationService;
use tower_http::cors::CorsLayer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[tokio::main]
async fn main() -> Result<(), ApiError> {
    // --- 1. Load Configuration & Set Up Logging ---
    let config = Arc::new(Config::from_env()?);
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(config.log_level.to_string()))
        .with(tracing_subscriber::fmt::layer())
        .init();
    info!("Configuration loaded. Starting server...");

    // --- 2. Connect to Database & Run Migrations ---
    info!("Connecting to database...");
    let db_pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&config.database_url)
        .await?;
    let db_adapter = Arc::new(DbAdapter::new(db_pool));
    info!("Running database migrations...");
    db_adapter
        .run_migrations()
        .await
        .map_err(|e| ApiError::Internal(e.to_string()))?;
    info!("Database migrations complete.");

    // --- 3. Initialize the Model Adapter ---
    // The API key stays optional here: the adapter reports a missing key at
    // the first generation call, so the read endpoints work without one.
    let llm_adapter = Arc::new(OpenAiTextAdapter::new(
        config.openai_api_key.clone(),
        config.generation_model.clone(),
    ));

    // --- 4. Build the Generation Service & Shared AppState ---
    let generation = GenerationService::new(
        db_adapter.clone(),
        db_adapter.clone(),
        db_adapter.clone(),
        llm_adapter,
    );

    let app_state = Arc::new(AppState {
        config: config.clone(),
        generation,
        flashcards: db_adapter.clone(),
        quizzes: db_adapter,
    });

    let cors = CorsLayer::new()
        .allow_origin("http://localhost:5173".parse::<HeaderValue>().unwrap())
        .allow_methods([Method::GET, Method::POST, Method::PATCH, Method::OPTIONS])
        .allow_headers([
            CONTENT_TYPE,
            ACCEPT,
            HeaderName::from_static("x-user-id"),
        ]);

    // --- 5. Create the Web Router ---
    // Every route requires a caller identity.
    let api_router = Router::new()
        .route("/ai/chat", post(chat_handler))
        .route("/ai/summary", post(summary_handler))
        .route("/ai/explain", post(explain_handler))
        .route("/ai/flashcards", post(flashcards_handler))
        .route("/ai/quiz", post(quiz_handler))
        .route("/flashcards/{document_id}", get(list_flashcards_handler))
        .route("/flashcards/{id}/favorite", patch(set_favorite_handler))
        .route("/quizzes/latest/{document_id}", get(latest_quiz_handler))
        .layer(axum_middleware::from_fn(require_user))
        .layer(cors)
        .with_state(app_state);

    // Merge the API router with the Swagger UI router for a complete application.
    let app = Router::new()
        .merge(api_router)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()));

    // --- 6. Start the Server ---
    info!("Starting server on {}", config.bind_address);
    info!(
        "Swagger UI available at http://{}/swagger-ui",
        config.bind_address
    );
    let listener = tokio::net::TcpListener::bind(&config.bind_address).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
