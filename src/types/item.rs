//! Batch item types.

use alloy::primitives::{I256, U256};
use serde::{Deserialize, Serialize};

/// One unit of work of a batch.
///
/// Items are identified by their position in the list handed to the composer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchItem {
    /// Quantity to write, e.g. the supply to mint.
    ///
    /// Signed so unvalidated input can be carried until encoding, which rejects values the
    /// target function cannot represent.
    #[serde(with = "crate::serde::quantity")]
    pub quantity: I256,
    /// Explicit token id.
    ///
    /// When missing, encoders emit [`NEW_TOKEN_ID`](crate::constants::NEW_TOKEN_ID).
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "crate::serde::token_id"
    )]
    pub token_id: Option<U256>,
    /// Where the item's metadata lives, or the metadata itself.
    pub metadata: MetadataRef,
}

impl BatchItem {
    /// Creates a new item minting `supply` of a new token.
    pub fn new(supply: u64, metadata: impl Into<MetadataRef>) -> Self {
        Self {
            quantity: I256::from_raw(U256::from(supply)),
            token_id: None,
            metadata: metadata.into(),
        }
    }

    /// Creates an item minting additional supply of an existing token.
    ///
    /// The receiving contract ignores the uri for existing tokens, so the locator is empty.
    pub fn additional_supply(token_id: U256, supply: u64) -> Self {
        Self::new(supply, String::new()).with_token_id(token_id)
    }

    /// Sets an explicit token id.
    pub fn with_token_id(mut self, token_id: U256) -> Self {
        self.token_id = Some(token_id);
        self
    }

    /// Sets the quantity.
    pub fn with_quantity(mut self, quantity: I256) -> Self {
        self.quantity = quantity;
        self
    }
}

/// Reference to an item's metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetadataRef {
    /// An already resolved locator, e.g. `ipfs://<cid>/0`.
    Locator(String),
    /// Raw metadata that has to be uploaded to obtain a locator.
    Raw(NftMetadata),
}

impl MetadataRef {
    /// Returns the locator if the reference is already resolved.
    pub fn as_locator(&self) -> Option<&str> {
        match self {
            Self::Locator(locator) => Some(locator),
            Self::Raw(_) => None,
        }
    }

    /// Whether resolving this reference requires an upload.
    pub fn needs_upload(&self) -> bool {
        matches!(self, Self::Raw(_))
    }
}

impl From<String> for MetadataRef {
    fn from(locator: String) -> Self {
        Self::Locator(locator)
    }
}

impl From<&str> for MetadataRef {
    fn from(locator: &str) -> Self {
        Self::Locator(locator.to_string())
    }
}

impl From<NftMetadata> for MetadataRef {
    fn from(metadata: NftMetadata) -> Self {
        Self::Raw(metadata)
    }
}

/// NFT metadata document, following the common ERC-721/ERC-1155 metadata JSON schema.
///
/// Unknown fields are preserved and uploaded as-is.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NftMetadata {
    /// Token name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Token description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Image locator or URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// External URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_url: Option<String>,
    /// Animation locator or URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub animation_url: Option<String>,
    /// Background color, six-character hex without a leading `#`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    /// Token attributes.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attributes: Vec<serde_json::Value>,
    /// Any other fields.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl NftMetadata {
    /// Creates metadata with only a name.
    pub fn named(name: impl Into<String>) -> Self {
        Self { name: Some(name.into()), ..Default::default() }
    }

    /// Sets the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the image.
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }
}

/// A [`BatchItem`] whose metadata has been resolved to a locator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedItem {
    /// Position of the originating item.
    pub index: usize,
    /// Quantity of the originating item.
    pub quantity: I256,
    /// Token id of the originating item.
    pub token_id: Option<U256>,
    /// Concrete metadata locator.
    pub locator: String,
}

impl ResolvedItem {
    /// Binds a resolved `locator` to the item at `index`.
    pub fn new(index: usize, item: &BatchItem, locator: String) -> Self {
        Self { index, quantity: item.quantity, token_id: item.token_id, locator }
    }
}
