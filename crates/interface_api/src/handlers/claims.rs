//! Claims handlers

use axum::{extract::{Path, State}, Json};

use crate::{AppState, error::ApiError};
use crate::dto::claims::*;

/// Lists every claim in the table
pub async fn list_claims(
    State(state): State<AppState>,
) -> Result<Json<Vec<ClaimResponse>>, ApiError> {
    let claims = state.claims.list().await?;
    Ok(Json(claims))
}

/// Creates a claim from the supplied fields
pub async fn create_claim(
    State(state): State<AppState>,
    Json(request): Json<CreateClaimRequest>,
) -> Result<Json<ClaimResponse>, ApiError> {
    let created = state.claims.create(&request).await?;
    Ok(Json(created))
}

/// Deletes a claim by claim number
pub async fn delete_claim(
    State(state): State<AppState>,
    Path(claim_number): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    state.claims.delete(&claim_number).await?;
    Ok(Json(MessageResponse::claim_deleted(&claim_number)))
}
