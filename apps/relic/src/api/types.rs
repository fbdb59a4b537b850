//! # API Request/Response Types
//!
//! This module defines the JSON structures for the HTTP API.
//!
//! Every mutating request carries an explicit `caller` account. The API
//! never infers identity from the connection; authorization is decided
//! inside the registry.

use relic_core::{AccountId, EvolutionStage, Registry, TokenId, power_boost};
use serde::{Deserialize, Serialize};

// =============================================================================
// HEALTH RESPONSE
// =============================================================================

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

impl Default for HealthResponse {
    fn default() -> Self {
        Self {
            status: "ok".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

// =============================================================================
// STATUS RESPONSE
// =============================================================================

/// Registry status response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub total_supply: u64,
    pub staked_count: u64,
    pub admin: u64,
    pub base_uri: String,
}

// =============================================================================
// TOKEN RESPONSE
// =============================================================================

/// Full state of a single token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    pub success: bool,
    pub token_id: Option<u64>,
    pub owner: Option<u64>,
    pub level: Option<u8>,
    pub stage: Option<String>,
    pub power_boost: Option<u32>,
    pub staked: Option<bool>,
    pub seconds_until_level_up: Option<u64>,
    pub uri: Option<String>,
    pub error: Option<String>,
}

impl TokenResponse {
    /// Build a successful response by querying every facet of one token.
    ///
    /// Callers must have already verified the token exists; any query
    /// failure here is surfaced as an error response.
    pub fn from_registry(registry: &Registry, id: TokenId) -> Self {
        let queries = || -> Result<Self, relic_core::RegistryError> {
            let level = registry.get_level(id)?;
            Ok(Self {
                success: true,
                token_id: Some(id.0),
                owner: Some(registry.owner_of(id)?.0),
                level: Some(level),
                stage: Some(EvolutionStage::from_level(level).name().to_string()),
                power_boost: Some(power_boost(level)),
                staked: Some(registry.is_staked(id)?),
                seconds_until_level_up: Some(registry.time_until_next_level_up(id)?),
                uri: Some(registry.token_uri(id)?),
                error: None,
            })
        };
        queries().unwrap_or_else(|e| Self::error(e.to_string()))
    }

    pub fn error(msg: impl Into<String>) -> Self {
        Self {
            success: false,
            token_id: None,
            owner: None,
            level: None,
            stage: None,
            power_boost: None,
            staked: None,
            seconds_until_level_up: None,
            uri: None,
            error: Some(msg.into()),
        }
    }
}

// =============================================================================
// MINT REQUEST/RESPONSE
// =============================================================================

/// Mint request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MintRequest {
    pub caller: u64,
    pub to: u64,
    #[serde(default = "default_quantity")]
    pub quantity: u64,
}

fn default_quantity() -> u64 {
    1
}

/// Mint response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MintResponse {
    pub success: bool,
    pub token_ids: Vec<u64>,
    pub error: Option<String>,
}

impl MintResponse {
    pub fn success(ids: Vec<TokenId>) -> Self {
        Self {
            success: true,
            token_ids: ids.iter().map(|id| id.0).collect(),
            error: None,
        }
    }

    pub fn error(msg: impl Into<String>) -> Self {
        Self {
            success: false,
            token_ids: vec![],
            error: Some(msg.into()),
        }
    }
}

// =============================================================================
// TOKEN ACTION REQUEST/RESPONSE
// =============================================================================

/// Request for stake, unstake, and level-up operations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenActionRequest {
    pub caller: u64,
    pub token_id: u64,
}

impl TokenActionRequest {
    pub fn caller(&self) -> AccountId {
        AccountId(self.caller)
    }

    pub fn token(&self) -> TokenId {
        TokenId(self.token_id)
    }
}

/// Response for mutations that act on a single token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionResponse {
    pub success: bool,
    pub token_id: Option<u64>,
    pub level: Option<u8>,
    pub staked: Option<bool>,
    pub error: Option<String>,
}

impl ActionResponse {
    /// Build a successful response reflecting the token's current state.
    pub fn success(registry: &Registry, id: TokenId) -> Self {
        Self {
            success: true,
            token_id: Some(id.0),
            level: registry.get_level(id).ok(),
            staked: registry.is_staked(id).ok(),
            error: None,
        }
    }

    pub fn error(msg: impl Into<String>) -> Self {
        Self {
            success: false,
            token_id: None,
            level: None,
            staked: None,
            error: Some(msg.into()),
        }
    }
}

// =============================================================================
// TRANSFER REQUEST
// =============================================================================

/// Transfer request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransferRequest {
    pub caller: u64,
    pub from: u64,
    pub to: u64,
    pub token_id: u64,
}

// =============================================================================
// BASE URI REQUEST
// =============================================================================

/// Base URI change request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BaseUriRequest {
    pub caller: u64,
    pub base_uri: String,
}

// =============================================================================
// EXPORT RESPONSE
// =============================================================================

/// Export response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportResponse {
    pub success: bool,
    pub data: Option<String>, // Base64 encoded
    pub checksum: Option<u64>,
    pub error: Option<String>,
}

impl ExportResponse {
    pub fn success(data: Vec<u8>, checksum: u64) -> Self {
        Self {
            success: true,
            data: Some(base64::Engine::encode(
                &base64::engine::general_purpose::STANDARD,
                &data,
            )),
            checksum: Some(checksum),
            error: None,
        }
    }

    pub fn error(msg: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            checksum: None,
            error: Some(msg.into()),
        }
    }
}
