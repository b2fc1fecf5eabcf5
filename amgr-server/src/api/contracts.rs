//! Contract endpoints

use amgr_common::db::{contracts, Contract, ContractForm};
use axum::{extract::State, http::StatusCode, routing::{get, put}, Json, Router};
use serde::Serialize;
use tracing::info;

use super::{EntityId, JsonForm, MessageResponse};
use crate::error::{ApiResult, OrFailure};
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct ContractCreated {
    pub message: String,
    pub contract_id: i64,
}

/// GET /api/contracts
pub async fn list_contracts(State(state): State<AppState>) -> ApiResult<Json<Vec<Contract>>> {
    let contracts = contracts::list_contracts(&state.db)
        .await
        .or_failure("Failed to fetch contracts")?;
    Ok(Json(contracts))
}

/// POST /api/contracts
///
/// **Errors:** 400 when `contract_type` or `artist_id` is missing, the fee is
/// negative, or `end_date` precedes `start_date`.
pub async fn create_contract(
    State(state): State<AppState>,
    JsonForm(form): JsonForm<ContractForm>,
) -> ApiResult<(StatusCode, Json<ContractCreated>)> {
    let (contract_id, contract) = contracts::create_contract(&state.db, &form)
        .await
        .or_failure("Failed to add contract")?;

    info!(
        "Contract added: {} for artist {}",
        contract.contract_type, contract.artist_id
    );
    Ok((
        StatusCode::CREATED,
        Json(ContractCreated {
            message: "Contract added successfully".to_string(),
            contract_id,
        }),
    ))
}

/// PUT /api/contracts/:id
pub async fn update_contract(
    State(state): State<AppState>,
    EntityId(contract_id): EntityId,
    JsonForm(form): JsonForm<ContractForm>,
) -> ApiResult<Json<MessageResponse>> {
    contracts::update_contract(&state.db, contract_id, &form)
        .await
        .or_failure("Failed to update contract")?;

    info!("Contract updated: ID {}", contract_id);
    Ok(MessageResponse::new("Contract updated successfully"))
}

/// DELETE /api/contracts/:id
pub async fn delete_contract(
    State(state): State<AppState>,
    EntityId(contract_id): EntityId,
) -> ApiResult<Json<MessageResponse>> {
    contracts::delete_contract(&state.db, contract_id)
        .await
        .or_failure("Failed to delete contract")?;

    info!("Contract deleted: ID {}", contract_id);
    Ok(MessageResponse::new("Contract deleted successfully"))
}

pub fn contract_routes() -> Router<AppState> {
    Router::new()
        .route("/api/contracts", get(list_contracts).post(create_contract))
        .route("/api/contracts/:id", put(update_contract).delete(delete_contract))
}
