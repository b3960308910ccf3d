use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json as JsonResponse, Response},
    routing::{get, post},
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{error, info, level_filters::LevelFilter, warn};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use application::{ApplicationError, DocumentStore, SearchRequest, StatsService};
use domain::Document;
use infrastructure::{InMemoryDocumentRepository, UuidGenerator};

mod config;

use config::ServerConfig;

#[derive(Clone)]
struct AppState {
    store: DocumentStore,
    stats_service: Arc<StatsService>,
}

impl AppState {
    /// Wires a fresh in-memory store.
    fn in_memory() -> Self {
        let repository = Arc::new(InMemoryDocumentRepository::new());
        let store = DocumentStore::new(repository, Arc::new(UuidGenerator));
        let stats_service = Arc::new(StatsService::new(store.clone()));
        Self {
            store,
            stats_service,
        }
    }
}

// Application entry point
#[tokio::main]
async fn main() {
    // --- Logger Initialization ---
    let filter: EnvFilter = EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy();
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();
    info!("Logger initialized successfully.");

    let config = ServerConfig::from_env();

    let app = router(AppState::in_memory());
    info!("API routes configured.");

    // --- Server Startup ---
    let addr = config.socket_addr();
    info!("Server starting on {}", addr);
    let listener = match TcpListener::bind(addr).await {
        Ok(listener) => {
            info!("Server listening on {}", addr);
            listener
        }
        Err(e) => {
            error!("Failed to bind to address {}: {}", addr, e);
            std::process::exit(1);
        }
    };
    if let Err(e) = axum::serve(listener, app.into_make_service()).await {
        error!("Server error: {}", e);
        std::process::exit(1);
    }
}

fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/stats", get(get_stats_handler))
        .route("/documents", post(save_document_handler))
        .route("/documents/batch", post(save_batch_handler))
        .route("/documents/search", post(search_documents_handler))
        .route("/documents/:doc_id", get(get_document_handler))
        .with_state(state)
}

// --- API Handlers ---

async fn health_check() -> impl IntoResponse {
    info!("Health check endpoint called");
    (StatusCode::OK, "OK")
}

/// Handler for saving a document (POST /documents).
async fn save_document_handler(
    State(state): State<AppState>,
    Json(payload): Json<Document>,
) -> Response {
    info!(doc_id = ?payload.id, "Received request to save document");
    let saved = state.store.save(&payload);
    (StatusCode::OK, JsonResponse(saved)).into_response()
}

/// Handler for saving several documents at once (POST /documents/batch).
async fn save_batch_handler(
    State(state): State<AppState>,
    Json(batch_payload): Json<Vec<Document>>,
) -> Response {
    let batch_size = batch_payload.len();
    info!(batch_size, "Received request to save batch documents");
    if batch_size == 0 {
        warn!("Received empty batch request array.");
    }
    let saved = state.store.save_batch(&batch_payload);
    (StatusCode::OK, JsonResponse(saved)).into_response()
}

/// Handler for fetching a document (GET /documents/:doc_id).
async fn get_document_handler(
    State(state): State<AppState>,
    Path(doc_id): Path<String>,
) -> Response {
    info!(doc_id = %doc_id, "Received request to get document");
    match state.store.get(&doc_id) {
        Ok(document) => (StatusCode::OK, JsonResponse(document)).into_response(),
        Err(e) => map_application_error_to_response(e),
    }
}

/// Handler for searching documents (POST /documents/search).
async fn search_documents_handler(
    State(state): State<AppState>,
    Json(request): Json<SearchRequest>,
) -> Response {
    info!(?request, "Received search request");
    let hits = state.store.search(&request);
    info!("Search completed via handler, {} hits", hits.len());
    (StatusCode::OK, JsonResponse(hits)).into_response()
}

async fn get_stats_handler(State(state): State<AppState>) -> Response {
    info!("Received request to get statistics");
    match state.stats_service.get_stats().await {
        Ok(stats_response) => (StatusCode::OK, JsonResponse(stats_response)).into_response(),
        Err(e) => {
            error!("Failed to get statistics via handler: {}", e);
            map_application_error_to_response(e)
        }
    }
}

/// Maps ApplicationError to HTTP status codes and response body.
fn map_application_error_to_response(err: ApplicationError) -> Response {
    let (status, body) = match err {
        ApplicationError::NotFound(id) => (
            StatusCode::NOT_FOUND,
            format!("Document '{}' not found", id),
        ),
        ApplicationError::InfrastructureError(msg) => {
            error!("Underlying infrastructure error: {}", msg);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "An internal server error occurred".to_string(),
            )
        }
    };
    (status, body).into_response()
}
