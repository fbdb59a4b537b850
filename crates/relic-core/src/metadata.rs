//! # Metadata Locator & Documents
//!
//! The locator resolver is a pure function over `(base URI, token id, level)`.
//! No network or storage access happens here: an offline generator
//! pre-publishes one JSON document per `(id, level)` pair at exactly the
//! locator this module derives, and readers resolve the string themselves.
//!
//! This module also defines the document shape that generator must produce,
//! so the CLI can emit the full `{id}_{level}.json` grid.

use crate::primitives::{MAX_LEVEL, MIN_LEVEL};
use crate::TokenId;
use serde::{Deserialize, Serialize};

// =============================================================================
// LOCATOR RESOLVER
// =============================================================================

/// Derive the metadata locator for a token at a given level.
///
/// Deterministic: `base + id + "_" + level + ".json"`. The same triple always
/// produces the same string, which is the contract the offline generator
/// relies on.
#[must_use]
pub fn token_uri(base: &str, id: TokenId, level: u8) -> String {
    format!("{}{}_{}.json", base, id.0, level)
}

// =============================================================================
// EVOLUTION STAGE
// =============================================================================

/// Tiered bucket a level falls into, used as a metadata attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum EvolutionStage {
    /// Levels 1-3.
    Novice,
    /// Levels 4-6.
    Adept,
    /// Levels 7-9.
    Master,
    /// Level 10 and up.
    Legend,
}

impl EvolutionStage {
    /// Bucket a level into its stage.
    #[must_use]
    pub const fn from_level(level: u8) -> Self {
        match level {
            0..=3 => Self::Novice,
            4..=6 => Self::Adept,
            7..=9 => Self::Master,
            _ => Self::Legend,
        }
    }

    /// Display name of the stage.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Novice => "Novice",
            Self::Adept => "Adept",
            Self::Master => "Master",
            Self::Legend => "Legend",
        }
    }
}

impl std::fmt::Display for EvolutionStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Power boost percentage derived from a level: 10% per level.
#[must_use]
pub const fn power_boost(level: u8) -> u32 {
    (level as u32) * 10
}

// =============================================================================
// METADATA DOCUMENT
// =============================================================================

/// One attribute entry in a metadata document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataAttribute {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_type: Option<String>,
    pub trait_type: String,
    pub value: serde_attr::AttrValue,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_value: Option<u8>,
}

/// Small helper so attribute values can be either numbers or strings without
/// pulling a full dynamic-JSON dependency into the core.
pub mod serde_attr {
    use serde::{Deserialize, Serialize};

    /// A metadata attribute value: integer or string.
    #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(untagged)]
    pub enum AttrValue {
        Number(u32),
        Text(String),
    }
}

use serde_attr::AttrValue;

/// The JSON document the offline generator publishes for every
/// `(token, level)` pair the collection can ever reach.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataDocument {
    pub name: String,
    pub description: String,
    pub image: String,
    pub attributes: Vec<MetadataAttribute>,
}

impl MetadataDocument {
    /// Build the canonical document for a token at a level.
    ///
    /// `image_base` plays the same role for images as the base URI does for
    /// documents: `image_base + id + "_" + level + ".png"`.
    #[must_use]
    pub fn build(id: TokenId, level: u8, image_base: &str) -> Self {
        let stage = EvolutionStage::from_level(level);
        Self {
            name: format!("Relic #{}", id.0),
            description: format!(
                "Level {} Relic - a unique token that evolves through staking",
                level
            ),
            image: format!("{}{}_{}.png", image_base, id.0, level),
            attributes: vec![
                MetadataAttribute {
                    display_type: None,
                    trait_type: "Level".to_string(),
                    value: AttrValue::Number(level as u32),
                    max_value: Some(MAX_LEVEL),
                },
                MetadataAttribute {
                    display_type: None,
                    trait_type: "Evolution Stage".to_string(),
                    value: AttrValue::Text(stage.name().to_string()),
                    max_value: None,
                },
                MetadataAttribute {
                    display_type: Some("boost_percentage".to_string()),
                    trait_type: "Power Boost".to_string(),
                    value: AttrValue::Number(power_boost(level)),
                    max_value: None,
                },
            ],
        }
    }

    /// All `(level, document)` pairs for one token, `MIN_LEVEL..=MAX_LEVEL`.
    #[must_use]
    pub fn all_levels(id: TokenId, image_base: &str) -> Vec<(u8, Self)> {
        (MIN_LEVEL..=MAX_LEVEL)
            .map(|level| (level, Self::build(id, level, image_base)))
            .collect()
    }
}

// =============================================================================
// TESTS
// =============================================================================
