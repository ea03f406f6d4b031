use assetlink_serde::{BitReader, BitWrite, BitWriter, Serde, SerdeErr};
use uuid::Uuid;

use crate::{AssetId, AssetType, CustomMessage, MessageType};

/// Asks whether an asset is compiled. A status request wants a snapshot
/// answer; otherwise the server waits until the asset has finished compiling.
/// A client that just wrote the source file sets `require_fencing` so the
/// request is not looked at before the watcher has seen that write.
#[derive(PartialEq, Eq, Clone, Debug, Default, Serde)]
pub struct RequestAssetStatus {
    pub search_term: String,
    pub asset_id: AssetId,
    pub is_status_request: bool,
    pub require_fencing: bool,
}

/// Resolves a relative product path to the full path of its source file
#[derive(PartialEq, Eq, Clone, Debug, Default, Serde)]
pub struct GetFullSourcePathRequest {
    pub relative_product_path: String,
}

/// Resolves a full source or product path to a relative product path
#[derive(PartialEq, Eq, Clone, Debug, Default, Serde)]
pub struct GetRelativeProductPathRequest {
    pub source_or_product_path: String,
}

/// Looks up a source asset by id, or by path when the id is invalid
#[derive(PartialEq, Eq, Clone, Debug, Default, Serde)]
pub struct SourceAssetInfoRequest {
    pub asset_id: AssetId,
    pub asset_type: AssetType,
    pub asset_path: String,
}

/// Lists the products built from a source asset
#[derive(PartialEq, Eq, Clone, Debug, Default, Serde)]
pub struct SourceAssetProductsInfoRequest {
    pub asset_id: AssetId,
}

#[derive(PartialEq, Eq, Clone, Debug, Default, Serde)]
pub struct GetScanFoldersRequest;

#[derive(PartialEq, Eq, Clone, Debug, Default, Serde)]
pub struct GetAssetSafeFoldersRequest;

/// Registers a source asset type with the files matching `asset_file_filter`
#[derive(PartialEq, Eq, Clone, Debug, Default, Serde)]
pub struct RegisterSourceAssetRequest {
    pub asset_type: AssetType,
    pub asset_file_filter: String,
}

#[derive(PartialEq, Eq, Clone, Debug, Default, Serde)]
pub struct UnregisterSourceAssetRequest {
    pub asset_type: AssetType,
}

/// Bumps the priority of the compile job for an asset. The uuid is preferred,
/// the search term is the fallback.
#[derive(PartialEq, Eq, Clone, Debug, Default, Serde)]
pub struct RequestEscalateAsset {
    pub asset_uuid: Uuid,
    pub search_term: String,
}

/// Looks up a product by id, or by path when the id is invalid
#[derive(PartialEq, Eq, Clone, Debug, Default, Serde)]
pub struct AssetInfoRequest {
    pub asset_id: AssetId,
    pub asset_type: AssetType,
    pub asset_path: String,
}

/// Every request a client can send
#[derive(PartialEq, Eq, Clone, Debug)]
pub enum Request {
    AssetStatus(RequestAssetStatus),
    FullSourcePath(GetFullSourcePathRequest),
    RelativeProductPath(GetRelativeProductPathRequest),
    SourceAssetInfo(SourceAssetInfoRequest),
    SourceAssetProductsInfo(SourceAssetProductsInfoRequest),
    ScanFolders(GetScanFoldersRequest),
    AssetSafeFolders(GetAssetSafeFoldersRequest),
    RegisterSourceAsset(RegisterSourceAssetRequest),
    UnregisterSourceAsset(UnregisterSourceAssetRequest),
    EscalateAsset(RequestEscalateAsset),
    AssetInfo(AssetInfoRequest),
    Custom(CustomMessage),
}

impl Request {
    pub fn message_type(&self) -> MessageType {
        match self {
            Request::AssetStatus(_) => MessageType::ASSET_STATUS,
            Request::FullSourcePath(_) => MessageType::FULL_SOURCE_PATH,
            Request::RelativeProductPath(_) => MessageType::RELATIVE_PRODUCT_PATH,
            Request::SourceAssetInfo(_) => MessageType::SOURCE_ASSET_INFO,
            Request::SourceAssetProductsInfo(_) => MessageType::SOURCE_ASSET_PRODUCTS_INFO,
            Request::ScanFolders(_) => MessageType::SCAN_FOLDERS,
            Request::AssetSafeFolders(_) => MessageType::ASSET_SAFE_FOLDERS,
            Request::RegisterSourceAsset(_) => MessageType::REGISTER_SOURCE_ASSET,
            Request::UnregisterSourceAsset(_) => MessageType::UNREGISTER_SOURCE_ASSET,
            Request::EscalateAsset(_) => MessageType::ESCALATE_ASSET,
            Request::AssetInfo(_) => MessageType::ASSET_INFO,
            Request::Custom(message) => message.message_type(),
        }
    }

    /// Whether the request must be sequenced behind pending file-system
    /// events before it is answered. Lookups read catalog state, which has
    /// to include every file already written by the client.
    pub fn require_fencing(&self) -> bool {
        match self {
            Request::FullSourcePath(_)
            | Request::RelativeProductPath(_)
            | Request::SourceAssetInfo(_)
            | Request::SourceAssetProductsInfo(_)
            | Request::AssetInfo(_) => true,
            Request::AssetStatus(request) => request.require_fencing,
            Request::ScanFolders(_)
            | Request::AssetSafeFolders(_)
            | Request::RegisterSourceAsset(_)
            | Request::UnregisterSourceAsset(_)
            | Request::EscalateAsset(_) => false,
            Request::Custom(message) => message.require_fencing(),
        }
    }

    /// Serializes the message type followed by the body
    pub fn encode(&self) -> Box<[u8]> {
        let bit_length = self
            .message_type()
            .bit_length()
            .saturating_add(self.body_bit_length());
        let mut writer = BitWriter::with_capacity(bit_length.div_ceil(8) as usize);
        self.message_type().ser(&mut writer);
        self.ser_body(&mut writer);
        writer.to_bytes()
    }

    fn body_bit_length(&self) -> u32 {
        match self {
            Request::AssetStatus(request) => request.bit_length(),
            Request::FullSourcePath(request) => request.bit_length(),
            Request::RelativeProductPath(request) => request.bit_length(),
            Request::SourceAssetInfo(request) => request.bit_length(),
            Request::SourceAssetProductsInfo(request) => request.bit_length(),
            Request::ScanFolders(request) => request.bit_length(),
            Request::AssetSafeFolders(request) => request.bit_length(),
            Request::RegisterSourceAsset(request) => request.bit_length(),
            Request::UnregisterSourceAsset(request) => request.bit_length(),
            Request::EscalateAsset(request) => request.bit_length(),
            Request::AssetInfo(request) => request.bit_length(),
            Request::Custom(message) => message.body_bit_length(),
        }
    }

    fn ser_body(&self, writer: &mut dyn BitWrite) {
        match self {
            Request::AssetStatus(request) => request.ser(writer),
            Request::FullSourcePath(request) => request.ser(writer),
            Request::RelativeProductPath(request) => request.ser(writer),
            Request::SourceAssetInfo(request) => request.ser(writer),
            Request::SourceAssetProductsInfo(request) => request.ser(writer),
            Request::ScanFolders(request) => request.ser(writer),
            Request::AssetSafeFolders(request) => request.ser(writer),
            Request::RegisterSourceAsset(request) => request.ser(writer),
            Request::UnregisterSourceAsset(request) => request.ser(writer),
            Request::EscalateAsset(request) => request.ser(writer),
            Request::AssetInfo(request) => request.ser(writer),
            Request::Custom(message) => message.ser_body(writer),
        }
    }

    /// Reads the body of a built-in request. Returns `None` when
    /// `message_type` is not a built-in request type.
    pub(crate) fn de_built_in(
        message_type: MessageType,
        reader: &mut BitReader,
    ) -> Option<Result<Self, SerdeErr>> {
        let request = match message_type {
            MessageType::ASSET_STATUS => Serde::de(reader).map(Request::AssetStatus),
            MessageType::FULL_SOURCE_PATH => Serde::de(reader).map(Request::FullSourcePath),
            MessageType::RELATIVE_PRODUCT_PATH => {
                Serde::de(reader).map(Request::RelativeProductPath)
            }
            MessageType::SOURCE_ASSET_INFO => Serde::de(reader).map(Request::SourceAssetInfo),
            MessageType::SOURCE_ASSET_PRODUCTS_INFO => {
                Serde::de(reader).map(Request::SourceAssetProductsInfo)
            }
            MessageType::SCAN_FOLDERS => Serde::de(reader).map(Request::ScanFolders),
            MessageType::ASSET_SAFE_FOLDERS => Serde::de(reader).map(Request::AssetSafeFolders),
            MessageType::REGISTER_SOURCE_ASSET => {
                Serde::de(reader).map(Request::RegisterSourceAsset)
            }
            MessageType::UNREGISTER_SOURCE_ASSET => {
                Serde::de(reader).map(Request::UnregisterSourceAsset)
            }
            MessageType::ESCALATE_ASSET => Serde::de(reader).map(Request::EscalateAsset),
            MessageType::ASSET_INFO => Serde::de(reader).map(Request::AssetInfo),
            _ => return None,
        };
        Some(request)
    }
}
