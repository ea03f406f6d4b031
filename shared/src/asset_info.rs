use assetlink_serde::Serde;

use crate::{AssetId, AssetType};

/// What the catalog knows about one asset
#[derive(PartialEq, Eq, Clone, Debug, Default, Serde)]
pub struct AssetInfo {
    pub asset_id: AssetId,
    pub asset_type: AssetType,
    pub relative_path: String,
    pub size_bytes: u64,
}
