//! # API Endpoint Handlers
//!
//! This module implements the actual HTTP endpoint handlers.
//!
//! Error mapping is uniform across endpoints: authorization failures are
//! 403, missing tokens are 404, state-machine rejections (already staked,
//! not staked, too early, max level, locked) are 409, and malformed
//! inputs are 400.

use super::{
    AppState,
    types::{
        ActionResponse, BaseUriRequest, ExportResponse, HealthResponse, MintRequest, MintResponse,
        StatusResponse, TokenActionRequest, TokenResponse, TransferRequest,
    },
};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use relic_core::{
    AccountId, RegistryError, TokenId,
    formats::{registry_to_bytes, snapshot_checksum},
};

/// Map a registry error to an HTTP status code.
fn error_status(error: &RegistryError) -> StatusCode {
    match error {
        RegistryError::Unauthorized => StatusCode::FORBIDDEN,
        RegistryError::TokenNotFound(_) => StatusCode::NOT_FOUND,
        RegistryError::AlreadyStaked(_)
        | RegistryError::NotStaked(_)
        | RegistryError::TooEarly { .. }
        | RegistryError::AlreadyMaxLevel(_)
        | RegistryError::TokenLocked(_) => StatusCode::CONFLICT,
        RegistryError::InvalidInput(_) => StatusCode::BAD_REQUEST,
        RegistryError::SerializationError(_) | RegistryError::IoError(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

// =============================================================================
// HEALTH HANDLER
// =============================================================================

/// Health check endpoint.
pub async fn health_handler() -> impl IntoResponse {
    Json(HealthResponse::default())
}

// =============================================================================
// STATUS HANDLER
// =============================================================================

/// Get registry status.
pub async fn status_handler(State(state): State<AppState>) -> impl IntoResponse {
    let registry = state.registry.read().await;
    let staked_count = registry
        .store()
        .iter()
        .filter(|(_, token)| token.staked)
        .count() as u64;

    let response = StatusResponse {
        total_supply: registry.total_supply(),
        staked_count,
        admin: registry.admin().0,
        base_uri: registry.base_uri().to_string(),
    };

    (StatusCode::OK, Json(response))
}

// =============================================================================
// TOKEN HANDLER
// =============================================================================

/// Get the full state of one token.
pub async fn token_handler(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> impl IntoResponse {
    let registry = state.registry.read().await;
    let token = TokenId(id);

    match registry.token_state(token) {
        Ok(_) => (
            StatusCode::OK,
            Json(TokenResponse::from_registry(&registry, token)),
        ),
        Err(e) => (error_status(&e), Json(TokenResponse::error(e.to_string()))),
    }
}

// =============================================================================
// MINT HANDLER
// =============================================================================

/// Mint tokens to an account (admin only).
pub async fn mint_handler(
    State(state): State<AppState>,
    Json(request): Json<MintRequest>,
) -> impl IntoResponse {
    let mut registry = state.registry.write().await;

    match registry.mint(
        AccountId(request.caller),
        AccountId(request.to),
        request.quantity,
    ) {
        Ok(ids) => (StatusCode::OK, Json(MintResponse::success(ids))),
        Err(e) => (error_status(&e), Json(MintResponse::error(e.to_string()))),
    }
}

// =============================================================================
// STAKING HANDLERS
// =============================================================================

/// Stake a token (owner only).
pub async fn stake_handler(
    State(state): State<AppState>,
    Json(request): Json<TokenActionRequest>,
) -> impl IntoResponse {
    let mut registry = state.registry.write().await;

    match registry.stake(request.caller(), request.token()) {
        Ok(()) => (
            StatusCode::OK,
            Json(ActionResponse::success(&registry, request.token())),
        ),
        Err(e) => (error_status(&e), Json(ActionResponse::error(e.to_string()))),
    }
}

/// Unstake a token (owner only).
pub async fn unstake_handler(
    State(state): State<AppState>,
    Json(request): Json<TokenActionRequest>,
) -> impl IntoResponse {
    let mut registry = state.registry.write().await;

    match registry.unstake(request.caller(), request.token()) {
        Ok(()) => (
            StatusCode::OK,
            Json(ActionResponse::success(&registry, request.token())),
        ),
        Err(e) => (error_status(&e), Json(ActionResponse::error(e.to_string()))),
    }
}

/// Level up a staked token (owner only).
pub async fn level_up_handler(
    State(state): State<AppState>,
    Json(request): Json<TokenActionRequest>,
) -> impl IntoResponse {
    let mut registry = state.registry.write().await;

    match registry.level_up(request.caller(), request.token()) {
        Ok(()) => (
            StatusCode::OK,
            Json(ActionResponse::success(&registry, request.token())),
        ),
        Err(e) => (error_status(&e), Json(ActionResponse::error(e.to_string()))),
    }
}

// =============================================================================
// TRANSFER HANDLER
// =============================================================================

/// Transfer an unstaked token between accounts.
pub async fn transfer_handler(
    State(state): State<AppState>,
    Json(request): Json<TransferRequest>,
) -> impl IntoResponse {
    let mut registry = state.registry.write().await;
    let token = TokenId(request.token_id);

    match registry.transfer(
        AccountId(request.caller),
        AccountId(request.from),
        AccountId(request.to),
        token,
    ) {
        Ok(()) => (
            StatusCode::OK,
            Json(ActionResponse::success(&registry, token)),
        ),
        Err(e) => (error_status(&e), Json(ActionResponse::error(e.to_string()))),
    }
}

// =============================================================================
// BASE URI HANDLER
// =============================================================================

/// Change the metadata base URI (admin only).
pub async fn base_uri_handler(
    State(state): State<AppState>,
    Json(request): Json<BaseUriRequest>,
) -> impl IntoResponse {
    let mut registry = state.registry.write().await;

    match registry.set_base_uri(AccountId(request.caller), &request.base_uri) {
        Ok(()) => {
            let response = StatusResponse {
                total_supply: registry.total_supply(),
                staked_count: registry
                    .store()
                    .iter()
                    .filter(|(_, token)| token.staked)
                    .count() as u64,
                admin: registry.admin().0,
                base_uri: registry.base_uri().to_string(),
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => (
            error_status(&e),
            Json(ActionResponse::error(e.to_string())),
        )
            .into_response(),
    }
}

// =============================================================================
// EXPORT HANDLER
// =============================================================================

/// Export the registry as a snapshot, base64-encoded with its checksum.
pub async fn export_handler(State(state): State<AppState>) -> impl IntoResponse {
    let registry = state.registry.read().await;

    match registry_to_bytes(&registry) {
        Ok(data) => {
            let checksum = snapshot_checksum(&data);
            (
                StatusCode::OK,
                Json(ExportResponse::success(data, checksum)),
            )
        }
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ExportResponse::error(format!("Export failed: {}", e))),
        ),
    }
}
