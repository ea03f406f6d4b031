mod pending_asset_request;
mod status_correlator;

pub use pending_asset_request::{PendingAssetRequest, PendingState};
pub use status_correlator::AssetStatusCorrelator;
