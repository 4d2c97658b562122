use axum::{
    Router,
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::get,
};
use serde::Serialize;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::{OpenApi, ToSchema};
use utoipa_swagger_ui::SwaggerUi;

use careflow_core::config::fixtures_dir_from_env_value;
use careflow_core::constants::{DEFAULT_REST_ADDR, FIXTURES_DIR_ENV, REST_ADDR_ENV};
use careflow_core::outline::{
    EncounterState, ExtractionState, build_encounter_outline, build_extraction_outline,
    initially_collapsed_ids,
};
use careflow_core::{
    CommunicationKind, CoreConfig, CoreError, FixtureStore, OutlineItem,
};

/// Application state shared across REST API handlers
///
/// Holds the fixture store loaded at startup. It is read-only afterwards.
#[derive(Clone)]
struct AppState {
    store: Arc<FixtureStore>,
}

#[derive(Serialize, ToSchema)]
struct HealthRes {
    ok: bool,
    message: String,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
struct CommunicationSummary {
    kind: String,
    id: String,
    patient: Option<String>,
    headline: String,
}

#[derive(Serialize, ToSchema)]
struct ListCommunicationsRes {
    communications: Vec<CommunicationSummary>,
}

/// An outline tree plus the sections a client should start collapsed.
#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
struct OutlineRes {
    #[schema(value_type = Object)]
    outline: serde_json::Value,
    initially_collapsed: Vec<String>,
}

type ApiError = (StatusCode, String);

#[derive(OpenApi)]
#[openapi(
    paths(
        health,
        list_communications,
        communication_outline,
        encounter_outline,
        extraction_outline
    ),
    components(schemas(HealthRes, CommunicationSummary, ListCommunicationsRes, OutlineRes))
)]
struct ApiDoc;

/// Main entry point for the Careflow preview service
///
/// Serves outline trees for the mock communications over REST.
///
/// # Environment Variables
/// - `CAREFLOW_REST_ADDR`: REST server address (default: "0.0.0.0:3000")
/// - `CAREFLOW_FIXTURES_DIR`: Directory of fixture JSON files (default: embedded fixtures)
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("careflow=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let rest_addr = std::env::var(REST_ADDR_ENV).unwrap_or_else(|_| DEFAULT_REST_ADDR.into());
    let fixtures_dir = fixtures_dir_from_env_value(std::env::var(FIXTURES_DIR_ENV).ok());

    let cfg = CoreConfig::new(fixtures_dir)?;
    let store = FixtureStore::from_config(&cfg)?;

    tracing::info!("++ Starting Careflow REST on {}", rest_addr);

    let app = Router::new()
        .route("/health", get(health))
        .route("/communications/:kind", get(list_communications))
        .route("/outline/:kind/:id", get(communication_outline))
        .route("/encounter/:state", get(encounter_outline))
        .route("/extraction/:state/:kind/:id", get(extraction_outline))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(CorsLayer::permissive())
        .with_state(AppState {
            store: Arc::new(store),
        });

    let listener = tokio::net::TcpListener::bind(&rest_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn error_response(err: CoreError) -> ApiError {
    match err {
        CoreError::NotFound { .. } => (StatusCode::NOT_FOUND, err.to_string()),
        CoreError::UnknownKind(_)
        | CoreError::UnknownEncounterState(_)
        | CoreError::InvalidInput(_) => (StatusCode::BAD_REQUEST, err.to_string()),
        other => {
            tracing::error!("Request failed: {:?}", other);
            (StatusCode::INTERNAL_SERVER_ERROR, "Internal error".into())
        }
    }
}

fn outline_response(outline: Vec<OutlineItem>) -> Result<Json<OutlineRes>, ApiError> {
    let initially_collapsed = initially_collapsed_ids(&outline).into_iter().collect();
    let outline = serde_json::to_value(&outline).map_err(|e| {
        tracing::error!("Outline serialization error: {:?}", e);
        (StatusCode::INTERNAL_SERVER_ERROR, "Internal error".to_string())
    })?;
    Ok(Json(OutlineRes {
        outline,
        initially_collapsed,
    }))
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Health check response", body = HealthRes)
    )
)]
/// Health check endpoint for the REST API
async fn health() -> Json<HealthRes> {
    Json(HealthRes {
        ok: true,
        message: "Careflow is alive".into(),
    })
}

#[utoipa::path(
    get,
    path = "/communications/{kind}",
    params(("kind" = String, Path, description = "email, fax, sms or call")),
    responses(
        (status = 200, description = "Communications of one kind", body = ListCommunicationsRes),
        (status = 400, description = "Unknown communication kind")
    )
)]
/// List the fixture communications of one kind
async fn list_communications(
    State(state): State<AppState>,
    Path(kind): Path<String>,
) -> Result<Json<ListCommunicationsRes>, ApiError> {
    let kind: CommunicationKind = kind.parse().map_err(error_response)?;
    let communications = state
        .store
        .list(kind)
        .iter()
        .map(|record| CommunicationSummary {
            kind: record.kind().to_string(),
            id: record.id().to_string(),
            patient: record.patient().map(|p| p.name.clone()),
            headline: record.headline(),
        })
        .collect();
    Ok(Json(ListCommunicationsRes { communications }))
}

#[utoipa::path(
    get,
    path = "/outline/{kind}/{id}",
    params(
        ("kind" = String, Path, description = "email, fax, sms or call"),
        ("id" = String, Path, description = "Communication id")
    ),
    responses(
        (status = 200, description = "Outline of the communication", body = OutlineRes),
        (status = 400, description = "Unknown communication kind"),
        (status = 404, description = "Communication not found")
    )
)]
/// Build the outline of one communication
async fn communication_outline(
    State(state): State<AppState>,
    Path((kind, id)): Path<(String, String)>,
) -> Result<Json<OutlineRes>, ApiError> {
    let kind: CommunicationKind = kind.parse().map_err(error_response)?;
    let record = state.store.get(kind, &id).map_err(error_response)?;
    outline_response(record.build_outline())
}

#[utoipa::path(
    get,
    path = "/encounter/{state}",
    params(
        ("state" = String, Path, description = "pre-recording, active-recording or post-recording")
    ),
    responses(
        (status = 200, description = "Encounter outline", body = OutlineRes),
        (status = 400, description = "Unknown encounter state")
    )
)]
/// Build the ambient-scribe encounter outline for a recording state
async fn encounter_outline(
    State(state): State<AppState>,
    Path(encounter_state): Path<String>,
) -> Result<Json<OutlineRes>, ApiError> {
    let encounter_state: EncounterState = encounter_state.parse().map_err(error_response)?;
    outline_response(build_encounter_outline(
        encounter_state,
        state.store.encounter(),
    ))
}

#[utoipa::path(
    get,
    path = "/extraction/{state}/{kind}/{id}",
    params(
        ("state" = String, Path, description = "no-documents, uploading, processing or viewing"),
        ("kind" = String, Path, description = "Communication supplying the documents"),
        ("id" = String, Path, description = "Communication id")
    ),
    responses(
        (status = 200, description = "Document-extraction outline", body = OutlineRes),
        (status = 400, description = "Unknown state or kind"),
        (status = 404, description = "Communication not found")
    )
)]
/// Build the document-extraction outline over a communication's attachments
async fn extraction_outline(
    State(state): State<AppState>,
    Path((extraction_state, kind, id)): Path<(String, String, String)>,
) -> Result<Json<OutlineRes>, ApiError> {
    let extraction_state: ExtractionState = extraction_state.parse().map_err(error_response)?;
    let kind: CommunicationKind = kind.parse().map_err(error_response)?;
    let record = state.store.get(kind, &id).map_err(error_response)?;
    let documents: Vec<_> = if extraction_state == ExtractionState::NoDocuments {
        Vec::new()
    } else {
        record.documents().into_iter().cloned().collect()
    };
    outline_response(build_extraction_outline(extraction_state, &documents))
}
