//! Built-in lookups answered by the server against the asset system, and
//! payloads the server refuses to decode.

use assetlink_server::{
    AssetServerError, ErrorEvent, EscalateAsset, EscalateEvent, LocatedAsset, ServerConfig,
};
use assetlink_shared::{
    AssetId, AssetInfo, AssetInfoRequest, AssetInfoResponse, AssetType, DecodeError,
    GetAssetSafeFoldersRequest, GetAssetSafeFoldersResponse, GetRelativeProductPathRequest,
    GetRelativeProductPathResponse, GetScanFoldersRequest, GetScanFoldersResponse, MessageType,
    RegisterSourceAssetRequest, Request, RequestEscalateAsset, RequestKey, Response,
    SourceAssetInfoRequest, SourceAssetInfoResponse, SourceAssetProductsInfoRequest,
    SourceAssetProductsInfoResponse, UnregisterSourceAssetRequest, Uuid,
};
use assetlink_test::{TestAssetSystem, TestServer, PLATFORM};

const SOURCE_UUID: Uuid = Uuid::from_u128(0x0A55_E700_0000_0000_0000_0000_0000_00AA);
const TEXTURE_TYPE: AssetType = AssetType(Uuid::from_u128(0x7E47));

fn brick_source() -> LocatedAsset {
    LocatedAsset {
        asset_info: AssetInfo {
            asset_id: AssetId::new(SOURCE_UUID, 0),
            asset_type: AssetType::default(),
            relative_path: String::from("textures/brick.tif"),
            size_bytes: 1024,
        },
        root_folder: String::from("/project"),
    }
}

fn brick_product(sub_id: u32) -> AssetInfo {
    AssetInfo {
        asset_id: AssetId::new(SOURCE_UUID, sub_id),
        asset_type: TEXTURE_TYPE,
        relative_path: format!("textures/brick_{}.dds", sub_id),
        size_bytes: 512,
    }
}

fn catalog() -> TestAssetSystem {
    let mut asset_system = TestAssetSystem::new();
    asset_system
        .sources_by_uuid
        .insert(SOURCE_UUID, brick_source());
    asset_system
        .sources_by_path
        .insert(String::from("textures/brick.tif"), brick_source());
    asset_system
        .products
        .insert(SOURCE_UUID, vec![brick_product(1), brick_product(2)]);
    asset_system.relative_product_paths.insert(
        String::from("/project/textures/brick.tif"),
        String::from("textures/brick.dds"),
    );
    asset_system.assets_by_id.insert(
        AssetId::new(SOURCE_UUID, 1),
        LocatedAsset {
            asset_info: brick_product(1),
            root_folder: String::from("/cache/pc"),
        },
    );
    asset_system.asset_ids_by_path.insert(
        String::from("textures/brick_2.dds"),
        AssetId::new(SOURCE_UUID, 2),
    );
    asset_system.scan_folders = Some(vec![String::from("/project"), String::from("/gems")]);
    asset_system.asset_safe_folders = None;
    asset_system
}

/// Sends a fenced request, releases the fence, and returns the single answer
fn lookup(test: &mut TestServer, serial: u32, request: Request) -> Response {
    let key = RequestKey::new(1, serial);
    test.request(key.connection_id, key.serial, &request);
    if request.require_fencing() {
        test.detect_last_fence();
    }
    let mut responses = test.sent.for_key(&key);
    assert_eq!(responses.len(), 1, "exactly one answer for {:?}", request);
    responses.remove(0)
}

#[test]
fn source_info_by_id_reports_the_requested_product() {
    let mut test = TestServer::with(ServerConfig::default(), catalog());

    let response = lookup(
        &mut test,
        1,
        Request::SourceAssetInfo(SourceAssetInfoRequest {
            asset_id: AssetId::new(SOURCE_UUID, 7),
            asset_type: TEXTURE_TYPE,
            asset_path: String::new(),
        }),
    );

    let Response::SourceAssetInfo(SourceAssetInfoResponse {
        found,
        asset_info,
        root_folder,
    }) = response
    else {
        panic!("wrong response type");
    };
    assert!(found);
    assert_eq!(asset_info.asset_id, AssetId::new(SOURCE_UUID, 7));
    assert_eq!(asset_info.asset_type, TEXTURE_TYPE);
    assert_eq!(root_folder, "/project");
}

#[test]
fn source_info_lookups_that_miss() {
    let mut test = TestServer::with(ServerConfig::default(), catalog());

    let by_unknown_id = lookup(
        &mut test,
        1,
        Request::SourceAssetInfo(SourceAssetInfoRequest {
            asset_id: AssetId::new(Uuid::from_u128(1), 3),
            ..Default::default()
        }),
    );
    let Response::SourceAssetInfo(response) = by_unknown_id else {
        panic!("wrong response type");
    };
    assert!(!response.found);
    assert!(!response.asset_info.asset_id.is_valid());

    let empty = lookup(
        &mut test,
        2,
        Request::SourceAssetInfo(SourceAssetInfoRequest::default()),
    );
    assert_eq!(
        empty,
        Response::SourceAssetInfo(SourceAssetInfoResponse::default())
    );
}

#[test]
fn source_info_by_path_reports_the_root_folder() {
    let mut test = TestServer::with(ServerConfig::default(), catalog());

    let response = lookup(
        &mut test,
        1,
        Request::SourceAssetInfo(SourceAssetInfoRequest {
            asset_path: String::from("textures/brick.tif"),
            ..Default::default()
        }),
    );

    assert_eq!(
        response,
        Response::SourceAssetInfo(SourceAssetInfoResponse {
            found: true,
            asset_info: brick_source().asset_info,
            root_folder: String::from("/project"),
        })
    );
}

#[test]
fn products_of_a_source_are_listed_once() {
    let mut test = TestServer::with(ServerConfig::default(), catalog());

    let response = lookup(
        &mut test,
        1,
        Request::SourceAssetProductsInfo(SourceAssetProductsInfoRequest {
            asset_id: AssetId::new(SOURCE_UUID, 0),
        }),
    );
    assert_eq!(
        response,
        Response::SourceAssetProductsInfo(SourceAssetProductsInfoResponse {
            found: true,
            products_asset_info: vec![brick_product(1), brick_product(2)],
        })
    );

    let invalid = lookup(
        &mut test,
        2,
        Request::SourceAssetProductsInfo(SourceAssetProductsInfoRequest::default()),
    );
    assert_eq!(
        invalid,
        Response::SourceAssetProductsInfo(SourceAssetProductsInfoResponse::default())
    );
}

#[test]
fn relative_product_path_resolves() {
    let mut test = TestServer::with(ServerConfig::default(), catalog());

    let found = lookup(
        &mut test,
        1,
        Request::RelativeProductPath(GetRelativeProductPathRequest {
            source_or_product_path: String::from("/project/textures/brick.tif"),
        }),
    );
    assert_eq!(
        found,
        Response::RelativeProductPath(GetRelativeProductPathResponse {
            resolved: true,
            relative_product_path: String::from("textures/brick.dds"),
        })
    );

    let missing = lookup(
        &mut test,
        2,
        Request::RelativeProductPath(GetRelativeProductPathRequest {
            source_or_product_path: String::from("/elsewhere/a.tif"),
        }),
    );
    assert_eq!(
        missing,
        Response::RelativeProductPath(GetRelativeProductPathResponse::default())
    );
}

#[test]
fn asset_info_by_id_and_by_path() {
    let mut test = TestServer::with(ServerConfig::default(), catalog());

    let by_id = lookup(
        &mut test,
        1,
        Request::AssetInfo(AssetInfoRequest {
            asset_id: AssetId::new(SOURCE_UUID, 1),
            asset_type: TEXTURE_TYPE,
            asset_path: String::new(),
        }),
    );
    assert_eq!(
        by_id,
        Response::AssetInfo(AssetInfoResponse {
            found: true,
            asset_info: brick_product(1),
            root_folder: String::from("/cache/pc"),
        })
    );

    let by_path = lookup(
        &mut test,
        2,
        Request::AssetInfo(AssetInfoRequest {
            asset_path: String::from("textures/brick_2.dds"),
            ..Default::default()
        }),
    );
    let Response::AssetInfo(by_path) = by_path else {
        panic!("wrong response type");
    };
    assert!(by_path.found);
    assert_eq!(by_path.asset_info.asset_id, AssetId::new(SOURCE_UUID, 2));

    let unknown_path = lookup(
        &mut test,
        3,
        Request::AssetInfo(AssetInfoRequest {
            asset_path: String::from("nowhere.dds"),
            ..Default::default()
        }),
    );
    let Response::AssetInfo(unknown_path) = unknown_path else {
        panic!("wrong response type");
    };
    assert!(!unknown_path.found);
}

#[test]
fn folder_lists_are_answered_even_when_unreadable() {
    let mut test = TestServer::with(ServerConfig::default(), catalog());

    let scan = lookup(&mut test, 1, Request::ScanFolders(GetScanFoldersRequest));
    assert_eq!(
        scan,
        Response::ScanFolders(GetScanFoldersResponse {
            scan_folders: vec![String::from("/project"), String::from("/gems")],
        })
    );

    let safe = lookup(
        &mut test,
        2,
        Request::AssetSafeFolders(GetAssetSafeFoldersRequest),
    );
    assert_eq!(
        safe,
        Response::AssetSafeFolders(GetAssetSafeFoldersResponse::default())
    );
}

#[test]
fn registration_requests_are_forwarded_without_answer() {
    let mut test = TestServer::new();

    test.request(
        1,
        1,
        &Request::RegisterSourceAsset(RegisterSourceAssetRequest {
            asset_type: TEXTURE_TYPE,
            asset_file_filter: String::from("*.tif"),
        }),
    );
    test.request(
        1,
        2,
        &Request::UnregisterSourceAsset(UnregisterSourceAssetRequest {
            asset_type: TEXTURE_TYPE,
        }),
    );

    assert_eq!(test.sent.count(), 0);
    assert_eq!(
        test.asset_calls.all(),
        vec![
            format!("register {} *.tif", TEXTURE_TYPE.0),
            format!("unregister {}", TEXTURE_TYPE.0),
        ]
    );
}

#[test]
fn escalation_prefers_the_uuid() {
    let mut test = TestServer::new();

    test.request(
        1,
        1,
        &Request::EscalateAsset(RequestEscalateAsset {
            asset_uuid: SOURCE_UUID,
            search_term: String::from("brick"),
        }),
    );
    test.request(
        1,
        2,
        &Request::EscalateAsset(RequestEscalateAsset {
            asset_uuid: Uuid::nil(),
            search_term: String::from("brick"),
        }),
    );
    test.request(1, 3, &Request::EscalateAsset(RequestEscalateAsset::default()));

    assert_eq!(test.sent.count(), 0, "escalations are never answered");
    let escalations: Vec<_> = test.receive().read::<EscalateEvent>().collect();
    assert_eq!(
        escalations,
        vec![
            EscalateAsset::ByUuid {
                platform: PLATFORM.to_string(),
                asset_uuid: SOURCE_UUID,
            },
            EscalateAsset::BySearchTerm {
                platform: PLATFORM.to_string(),
                search_term: String::from("brick"),
            },
        ]
    );
}

#[test]
fn undecodable_payloads_are_dropped() {
    let mut test = TestServer::new();

    test.server.on_incoming_request(4, 1, &[0x01], PLATFORM);
    let undeclared = Request::Custom(assetlink_shared::CustomMessage::new(
        MessageType::new(0x999),
        Vec::new(),
    ));
    test.request(4, 2, &undeclared);

    assert_eq!(test.sent.count(), 0);
    let errors: Vec<_> = test.receive().read::<ErrorEvent>().collect();
    assert_eq!(
        errors,
        vec![
            AssetServerError::Decode {
                connection_id: 4,
                serial: 1,
                source: DecodeError::MissingMessageType { length: 1 },
            },
            AssetServerError::Decode {
                connection_id: 4,
                serial: 2,
                source: DecodeError::UnknownMessageType {
                    message_type: MessageType::new(0x999)
                },
            },
        ]
    );
}
