use assetlink_shared::{AssetId, AssetInfo, AssetType, Uuid};

/// An asset found in the catalog together with the scan folder it lives in
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct LocatedAsset {
    pub asset_info: AssetInfo,
    pub root_folder: String,
}

/// The catalog and tooling collaborator that built-in lookups are answered
/// against. Implementations are owned by the server and only ever called from
/// its event loop.
pub trait AssetSystem {
    /// Full path of the source file that produced `relative_product_path`
    fn full_source_path_from_relative_product(&self, relative_product_path: &str)
        -> Option<String>;

    /// Relative product path for a full source or product path
    fn relative_product_path_from_full_source_or_product(
        &self,
        source_or_product_path: &str,
    ) -> Option<String>;

    fn source_info_by_uuid(&self, source_uuid: &Uuid) -> Option<LocatedAsset>;

    fn source_info_by_path(&self, source_path: &str) -> Option<LocatedAsset>;

    /// Every product built from the source with the given uuid
    fn products_by_source_uuid(&self, source_uuid: &Uuid) -> Option<Vec<AssetInfo>>;

    /// `None` when the folder list could not be read
    fn scan_folders(&self) -> Option<Vec<String>>;

    /// `None` when the folder list could not be read
    fn asset_safe_folders(&self) -> Option<Vec<String>>;

    fn asset_info_by_id(&self, asset_id: &AssetId, asset_type: &AssetType)
        -> Option<LocatedAsset>;

    /// Catalog id for a product path, invalid when the path is not known
    fn asset_id_by_path(&self, asset_path: &str) -> AssetId;

    fn register_source_asset_type(&mut self, asset_type: AssetType, asset_file_filter: &str);

    fn unregister_source_asset_type(&mut self, asset_type: AssetType);
}
