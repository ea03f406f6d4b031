use std::fmt;

use assetlink_shared::AssetId;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PendingState {
    /// Waiting for the compile queue to create or locate the compile group
    AwaitingCompileGroup,
    /// Waiting for the catalog to say whether the asset exists
    AwaitingExistenceCheck,
}

/// An asset status request that has not been answered yet
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PendingAssetRequest {
    pub platform: String,
    pub search_term: String,
    pub asset_id: AssetId,
    pub is_status_request: bool,
    pub state: PendingState,
}

impl PendingAssetRequest {
    pub fn new(
        platform: String,
        search_term: String,
        asset_id: AssetId,
        is_status_request: bool,
    ) -> Self {
        Self {
            platform,
            search_term,
            asset_id,
            is_status_request,
            state: PendingState::AwaitingCompileGroup,
        }
    }
}

// Prefers the asset id, falls back to the search term
impl fmt::Display for PendingAssetRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.asset_id.is_valid() {
            write!(f, "{}", self.asset_id)
        } else {
            write!(f, "{}", self.search_term)
        }
    }
}
