use log::{debug, info, warn};

use assetlink_shared::{
    AssetInfoRequest, AssetInfoResponse, AssetStatus, GetAssetSafeFoldersResponse,
    GetFullSourcePathRequest, GetFullSourcePathResponse, GetRelativeProductPathRequest,
    GetRelativeProductPathResponse, GetScanFoldersResponse, Request, RequestEscalateAsset,
    Response, SourceAssetInfoRequest, SourceAssetInfoResponse, SourceAssetProductsInfoRequest,
    SourceAssetProductsInfoResponse,
};

use crate::{AssetSystem, EscalateAsset, Events, LocatedAsset};

// Lookups answered directly against the asset system. Each produces exactly
// one response.

pub(crate) fn full_source_path(
    asset_system: &dyn AssetSystem,
    request: &GetFullSourcePathRequest,
) -> Response {
    let full_source_path =
        asset_system.full_source_path_from_relative_product(&request.relative_product_path);
    if full_source_path.is_none() {
        info!(
            "could not find the full source path for product {}",
            request.relative_product_path
        );
    }
    Response::FullSourcePath(GetFullSourcePathResponse {
        resolved: full_source_path.is_some(),
        full_source_path: full_source_path.unwrap_or_default(),
    })
}

pub(crate) fn relative_product_path(
    asset_system: &dyn AssetSystem,
    request: &GetRelativeProductPathRequest,
) -> Response {
    let relative_product_path = asset_system
        .relative_product_path_from_full_source_or_product(&request.source_or_product_path);
    if relative_product_path.is_none() {
        info!(
            "could not find the relative product path for {}",
            request.source_or_product_path
        );
    }
    Response::RelativeProductPath(GetRelativeProductPathResponse {
        resolved: relative_product_path.is_some(),
        relative_product_path: relative_product_path.unwrap_or_default(),
    })
}

pub(crate) fn source_asset_info(
    asset_system: &dyn AssetSystem,
    request: &SourceAssetInfoRequest,
) -> Response {
    let mut response = SourceAssetInfoResponse::default();

    if request.asset_id.is_valid() {
        match asset_system.source_info_by_uuid(&request.asset_id.guid) {
            Some(LocatedAsset {
                asset_info,
                root_folder,
            }) => {
                response.found = true;
                response.asset_info = asset_info;
                // the catalog knows the source, the caller knows which product
                response.asset_info.asset_id.sub_id = request.asset_id.sub_id;
                response.asset_info.asset_type = request.asset_type;
                response.root_folder = root_folder;
            }
            None => response.asset_info.asset_id.set_invalid(),
        }
    } else if !request.asset_path.is_empty() {
        if let Some(located) = asset_system.source_info_by_path(&request.asset_path) {
            response.found = true;
            response.asset_info = located.asset_info;
            response.root_folder = located.root_folder;
        }
    } else {
        debug!("source asset info request names neither an id nor a path");
    }

    Response::SourceAssetInfo(response)
}

pub(crate) fn source_asset_products_info(
    asset_system: &dyn AssetSystem,
    request: &SourceAssetProductsInfoRequest,
) -> Response {
    let mut response = SourceAssetProductsInfoResponse::default();
    if request.asset_id.is_valid() {
        if let Some(products) = asset_system.products_by_source_uuid(&request.asset_id.guid) {
            response.found = true;
            response.products_asset_info = products;
        }
    }
    Response::SourceAssetProductsInfo(response)
}

pub(crate) fn scan_folders(asset_system: &dyn AssetSystem) -> Response {
    let scan_folders = asset_system.scan_folders().unwrap_or_else(|| {
        warn!("could not read the list of scan folders");
        Vec::new()
    });
    Response::ScanFolders(GetScanFoldersResponse { scan_folders })
}

pub(crate) fn asset_safe_folders(asset_system: &dyn AssetSystem) -> Response {
    let asset_safe_folders = asset_system.asset_safe_folders().unwrap_or_else(|| {
        warn!("could not read the list of asset safe folders");
        Vec::new()
    });
    Response::AssetSafeFolders(GetAssetSafeFoldersResponse { asset_safe_folders })
}

pub(crate) fn asset_info(asset_system: &dyn AssetSystem, request: &AssetInfoRequest) -> Response {
    let mut response = AssetInfoResponse::default();

    if request.asset_id.is_valid() {
        if let Some(located) = asset_system.asset_info_by_id(&request.asset_id, &request.asset_type)
        {
            response.found = true;
            response.asset_info = located.asset_info;
            response.root_folder = located.root_folder;
        }
    } else if !request.asset_path.is_empty() {
        response.asset_info.asset_id = asset_system.asset_id_by_path(&request.asset_path);
        response.found = response.asset_info.asset_id.is_valid();
    }

    Response::AssetInfo(response)
}

/// The uuid wins over the search term
pub(crate) fn escalate(platform: &str, request: RequestEscalateAsset, events: &mut Events) {
    if !request.asset_uuid.is_nil() {
        events.push_escalation(EscalateAsset::ByUuid {
            platform: platform.to_string(),
            asset_uuid: request.asset_uuid,
        });
    } else if !request.search_term.is_empty() {
        events.push_escalation(EscalateAsset::BySearchTerm {
            platform: platform.to_string(),
            search_term: request.search_term,
        });
    } else {
        warn!("escalation request names neither an asset uuid nor a search term");
    }
}

/// The answer a request gets when it is rejected instead of dispatched.
/// `None` for requests that are never answered.
pub(crate) fn failure_response(request: &Request) -> Option<Response> {
    let response = match request {
        Request::AssetStatus(_) => Response::asset_status(AssetStatus::Failed),
        Request::FullSourcePath(_) => Response::FullSourcePath(Default::default()),
        Request::RelativeProductPath(_) => Response::RelativeProductPath(Default::default()),
        Request::SourceAssetInfo(_) => Response::SourceAssetInfo(Default::default()),
        Request::SourceAssetProductsInfo(_) => {
            Response::SourceAssetProductsInfo(Default::default())
        }
        Request::ScanFolders(_) => Response::ScanFolders(Default::default()),
        Request::AssetSafeFolders(_) => Response::AssetSafeFolders(Default::default()),
        Request::AssetInfo(_) => Response::AssetInfo(Default::default()),
        Request::RegisterSourceAsset(_)
        | Request::UnregisterSourceAsset(_)
        | Request::EscalateAsset(_)
        | Request::Custom(_) => return None,
    };
    Some(response)
}
