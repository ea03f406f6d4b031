//! # Assetlink Shared
//! Wire types shared between asset clients and the asset request server:
//! request keys, asset identifiers, and the request/response messages
//! together with the `Protocol` that decodes them.

#![deny(trivial_numeric_casts, unstable_features, unused_import_braces)]

pub use assetlink_serde::{
    BitReader, BitWrite, BitWriter, ConstBitLength, Serde, SerdeErr, UnsignedVariableInteger,
};
pub use uuid::Uuid;

mod asset_id;
mod asset_info;
mod asset_status;
mod messages;
mod protocol;
mod request_key;

pub use asset_id::{AssetId, AssetType};
pub use asset_info::AssetInfo;
pub use asset_status::AssetStatus;
pub use messages::{
    custom_message::CustomMessage,
    error::DecodeError,
    message_type::MessageType,
    request::{
        AssetInfoRequest, GetAssetSafeFoldersRequest, GetFullSourcePathRequest,
        GetRelativeProductPathRequest, GetScanFoldersRequest, RegisterSourceAssetRequest, Request,
        RequestAssetStatus, RequestEscalateAsset, SourceAssetInfoRequest,
        SourceAssetProductsInfoRequest, UnregisterSourceAssetRequest,
    },
    response::{
        AssetInfoResponse, GetAssetSafeFoldersResponse, GetFullSourcePathResponse,
        GetRelativeProductPathResponse, GetScanFoldersResponse, Response, ResponseAssetStatus,
        SourceAssetInfoResponse, SourceAssetProductsInfoResponse,
    },
};
pub use protocol::{Protocol, ProtocolError};
pub use request_key::{ConnectionId, RequestKey, SerialNumber};
