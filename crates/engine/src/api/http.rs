//! HTTP routes.

use std::collections::BTreeMap;
use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post, put},
    Json, Router,
};
use charforge_domain::{
    Ability, AbilityCommand, AbilityScreenView, CharacterId, CharacterRecord, Species,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;

use crate::app::App;
use crate::infrastructure::ports::{ReferenceKind, ReferenceRepo, RepoError};
use crate::use_cases::{AbilitiesError, ImportError, NewCharacter};

/// Create all HTTP routes.
pub fn routes() -> Router<Arc<App>> {
    Router::new()
        .route("/", get(health))
        .route("/api/health", get(health))
        .route(
            "/api/characters",
            get(list_characters).post(create_character),
        )
        .route(
            "/api/characters/{id}",
            get(get_character).delete(delete_character),
        )
        .route(
            "/api/characters/{id}/abilities",
            get(get_abilities).post(apply_ability_command),
        )
        .route("/api/characters/{id}/species", put(change_species))
        .route("/api/characters/{id}/improvements", post(improve_abilities))
        .route("/api/reference/import", post(import_reference))
        .route("/api/reference/{kind}", get(reference_count))
}

async fn health() -> &'static str {
    "OK"
}

// =============================================================================
// Characters
// =============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateCharacterRequest {
    name: String,
    #[serde(default)]
    species: Option<Species>,
    #[serde(default)]
    class_name: Option<String>,
}

async fn create_character(
    State(app): State<Arc<App>>,
    Json(body): Json<CreateCharacterRequest>,
) -> Result<(StatusCode, Json<CharacterRecord>), ApiError> {
    let record = app
        .use_cases
        .abilities
        .create_character(NewCharacter {
            name: body.name,
            species: body.species,
            class_name: body.class_name,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(record)))
}

async fn list_characters(
    State(app): State<Arc<App>>,
) -> Result<Json<Vec<CharacterRecord>>, ApiError> {
    Ok(Json(app.use_cases.abilities.list_characters().await?))
}

async fn get_character(
    State(app): State<Arc<App>>,
    Path(id): Path<Uuid>,
) -> Result<Json<CharacterRecord>, ApiError> {
    let record = app
        .use_cases
        .abilities
        .get_character(CharacterId::from_uuid(id))
        .await?;
    Ok(Json(record))
}

async fn delete_character(
    State(app): State<Arc<App>>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    app.use_cases
        .abilities
        .delete_character(CharacterId::from_uuid(id))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

// =============================================================================
// Ability Screen
// =============================================================================

async fn get_abilities(
    State(app): State<Arc<App>>,
    Path(id): Path<Uuid>,
) -> Result<Json<AbilityScreenView>, ApiError> {
    let view = app
        .use_cases
        .abilities
        .open_screen(CharacterId::from_uuid(id))
        .await?;
    Ok(Json(view))
}

async fn apply_ability_command(
    State(app): State<Arc<App>>,
    Path(id): Path<Uuid>,
    Json(command): Json<AbilityCommand>,
) -> Result<Json<AbilityScreenView>, ApiError> {
    let view = app
        .use_cases
        .abilities
        .apply_command(CharacterId::from_uuid(id), command)
        .await?;
    Ok(Json(view))
}

#[derive(Debug, Deserialize)]
struct ChangeSpeciesRequest {
    #[serde(default)]
    species: Option<Species>,
}

async fn change_species(
    State(app): State<Arc<App>>,
    Path(id): Path<Uuid>,
    Json(body): Json<ChangeSpeciesRequest>,
) -> Result<Json<AbilityScreenView>, ApiError> {
    let view = app
        .use_cases
        .abilities
        .change_species(CharacterId::from_uuid(id), body.species)
        .await?;
    Ok(Json(view))
}

#[derive(Debug, Deserialize)]
struct ImproveAbilitiesRequest {
    improvements: BTreeMap<Ability, u8>,
}

async fn improve_abilities(
    State(app): State<Arc<App>>,
    Path(id): Path<Uuid>,
    Json(body): Json<ImproveAbilitiesRequest>,
) -> Result<Json<CharacterRecord>, ApiError> {
    let record = app
        .use_cases
        .abilities
        .improve_abilities(CharacterId::from_uuid(id), &body.improvements)
        .await?;
    Ok(Json(record))
}

// =============================================================================
// Reference Data
// =============================================================================

#[derive(Debug, Deserialize)]
struct ImportRequest {
    #[serde(default, rename = "type")]
    kind: Option<String>,
}

#[derive(Debug, Serialize)]
struct ImportResponse {
    success: bool,
    message: String,
}

async fn import_reference(
    State(app): State<Arc<App>>,
    Json(body): Json<ImportRequest>,
) -> Result<Json<ImportResponse>, ApiError> {
    let kind = parse_kind(body.kind.as_deref().unwrap_or_default())?;
    let summary = app.use_cases.reference_import.execute(kind).await?;
    Ok(Json(ImportResponse {
        success: true,
        message: summary.message(),
    }))
}

async fn reference_count(
    State(app): State<Arc<App>>,
    Path(kind): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let kind = parse_kind(&kind)?;
    let count = app.repositories.reference.count(kind).await?;
    Ok(Json(json!({ "type": kind, "count": count })))
}

fn parse_kind(value: &str) -> Result<ReferenceKind, ApiError> {
    value
        .parse::<ReferenceKind>()
        .map_err(|e| ApiError::BadRequest(e.to_string()))
}

// =============================================================================
// Errors
// =============================================================================

#[derive(Debug)]
pub enum ApiError {
    NotFound(String),
    BadRequest(String),
    /// The request was understood but a rule rejected it.
    Unprocessable(String),
    Internal(String),
}

impl axum::response::IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Unprocessable(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg),
            ApiError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };
        (status, Json(json!({ "error": message }))).into_response()
    }
}

impl From<RepoError> for ApiError {
    fn from(e: RepoError) -> Self {
        if e.is_not_found() {
            return ApiError::NotFound(e.to_string());
        }
        tracing::error!(error = %e, "Repository failure");
        ApiError::Internal("Internal error".to_string())
    }
}

impl From<AbilitiesError> for ApiError {
    fn from(e: AbilitiesError) -> Self {
        match e {
            AbilitiesError::CharacterNotFound(_) => ApiError::NotFound(e.to_string()),
            AbilitiesError::Domain(domain) => ApiError::Unprocessable(domain.to_string()),
            AbilitiesError::Repo(repo) => repo.into(),
        }
    }
}

impl From<ImportError> for ApiError {
    fn from(e: ImportError) -> Self {
        tracing::error!(error = %e, "Reference import failed");
        ApiError::Internal(e.to_string())
    }
}
