//! Batch mint constants.

use alloy::primitives::U256;
use std::time::Duration;

/// Token id telling the receiving ERC-1155 contract to allocate a new token instead of minting
/// additional supply of an existing one.
///
/// This is part of the contract's wire interface and must be emitted verbatim.
pub const NEW_TOKEN_ID: U256 = U256::MAX;

/// Default endpoint metadata documents are uploaded to.
pub const DEFAULT_UPLOAD_URL: &str = "https://storage.thirdweb.com/ipfs/upload";

/// Default public gateway used to turn `ipfs://` locators into fetchable URLs.
pub const DEFAULT_IPFS_GATEWAY: &str = "https://ipfs.io/ipfs/";

/// Default timeout for a single metadata upload.
pub const DEFAULT_UPLOAD_TIMEOUT: Duration = Duration::from_secs(60);

/// The scheme prefix of IPFS locators.
pub const IPFS_SCHEME: &str = "ipfs://";
