use assetlink_serde::{BitReader, BitWrite, BitWriter, Serde};

use crate::{AssetInfo, AssetStatus, CustomMessage, DecodeError, MessageType};

#[derive(PartialEq, Eq, Clone, Debug, Default, Serde)]
pub struct ResponseAssetStatus {
    pub asset_status: AssetStatus,
}

#[derive(PartialEq, Eq, Clone, Debug, Default, Serde)]
pub struct GetFullSourcePathResponse {
    pub resolved: bool,
    pub full_source_path: String,
}

#[derive(PartialEq, Eq, Clone, Debug, Default, Serde)]
pub struct GetRelativeProductPathResponse {
    pub resolved: bool,
    pub relative_product_path: String,
}

#[derive(PartialEq, Eq, Clone, Debug, Default, Serde)]
pub struct SourceAssetInfoResponse {
    pub found: bool,
    pub asset_info: AssetInfo,
    pub root_folder: String,
}

#[derive(PartialEq, Eq, Clone, Debug, Default, Serde)]
pub struct SourceAssetProductsInfoResponse {
    pub found: bool,
    pub products_asset_info: Vec<AssetInfo>,
}

#[derive(PartialEq, Eq, Clone, Debug, Default, Serde)]
pub struct GetScanFoldersResponse {
    pub scan_folders: Vec<String>,
}

#[derive(PartialEq, Eq, Clone, Debug, Default, Serde)]
pub struct GetAssetSafeFoldersResponse {
    pub asset_safe_folders: Vec<String>,
}

#[derive(PartialEq, Eq, Clone, Debug, Default, Serde)]
pub struct AssetInfoResponse {
    pub found: bool,
    pub asset_info: AssetInfo,
    pub root_folder: String,
}

/// Every response the server can send back. A response carries the message
/// type of the request it answers.
#[derive(PartialEq, Eq, Clone, Debug)]
pub enum Response {
    AssetStatus(ResponseAssetStatus),
    FullSourcePath(GetFullSourcePathResponse),
    RelativeProductPath(GetRelativeProductPathResponse),
    SourceAssetInfo(SourceAssetInfoResponse),
    SourceAssetProductsInfo(SourceAssetProductsInfoResponse),
    ScanFolders(GetScanFoldersResponse),
    AssetSafeFolders(GetAssetSafeFoldersResponse),
    AssetInfo(AssetInfoResponse),
    Custom(CustomMessage),
}

impl Response {
    pub fn asset_status(asset_status: AssetStatus) -> Self {
        Response::AssetStatus(ResponseAssetStatus { asset_status })
    }

    pub fn message_type(&self) -> MessageType {
        match self {
            Response::AssetStatus(_) => MessageType::ASSET_STATUS,
            Response::FullSourcePath(_) => MessageType::FULL_SOURCE_PATH,
            Response::RelativeProductPath(_) => MessageType::RELATIVE_PRODUCT_PATH,
            Response::SourceAssetInfo(_) => MessageType::SOURCE_ASSET_INFO,
            Response::SourceAssetProductsInfo(_) => MessageType::SOURCE_ASSET_PRODUCTS_INFO,
            Response::ScanFolders(_) => MessageType::SCAN_FOLDERS,
            Response::AssetSafeFolders(_) => MessageType::ASSET_SAFE_FOLDERS,
            Response::AssetInfo(_) => MessageType::ASSET_INFO,
            Response::Custom(message) => message.message_type(),
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

    /// Client-side decoding of a response payload. Message types outside the
    /// reserved range decode as `Response::Custom`.
    pub fn decode(payload: &[u8]) -> Result<Self, DecodeError> {
        let mut reader = BitReader::new(payload);
        let message_type = MessageType::de(&mut reader).map_err(|_| {
            DecodeError::MissingMessageType {
                length: payload.len(),
            }
        })?;

        let response = match message_type {
            MessageType::ASSET_STATUS => Serde::de(&mut reader).map(Response::AssetStatus),
            MessageType::FULL_SOURCE_PATH => Serde::de(&mut reader).map(Response::FullSourcePath),
            MessageType::RELATIVE_PRODUCT_PATH => {
                Serde::de(&mut reader).map(Response::RelativeProductPath)
            }
            MessageType::SOURCE_ASSET_INFO => {
                Serde::de(&mut reader).map(Response::SourceAssetInfo)
            }
            MessageType::SOURCE_ASSET_PRODUCTS_INFO => {
                Serde::de(&mut reader).map(Response::SourceAssetProductsInfo)
            }
            MessageType::SCAN_FOLDERS => Serde::de(&mut reader).map(Response::ScanFolders),
            MessageType::ASSET_SAFE_FOLDERS => {
                Serde::de(&mut reader).map(Response::AssetSafeFolders)
            }
            MessageType::ASSET_INFO => Serde::de(&mut reader).map(Response::AssetInfo),
            _ if message_type.is_reserved() => {
                return Err(DecodeError::UnknownMessageType { message_type });
            }
            _ => CustomMessage::de_body(message_type, &mut reader).map(Response::Custom),
        };

        let response = response.map_err(|_| DecodeError::MalformedBody { message_type })?;
        if reader.bits_remaining() >= 8 {
            return Err(DecodeError::TrailingBytes {
                message_type,
                trailing_bits: reader.bits_remaining(),
            });
        }
        Ok(response)
    }

    fn body_bit_length(&self) -> u32 {
        match self {
            Response::AssetStatus(response) => response.bit_length(),
            Response::FullSourcePath(response) => response.bit_length(),
            Response::RelativeProductPath(response) => response.bit_length(),
            Response::SourceAssetInfo(response) => response.bit_length(),
            Response::SourceAssetProductsInfo(response) => response.bit_length(),
            Response::ScanFolders(response) => response.bit_length(),
            Response::AssetSafeFolders(response) => response.bit_length(),
            Response::AssetInfo(response) => response.bit_length(),
            Response::Custom(message) => message.body_bit_length(),
        }
    }

    fn ser_body(&self, writer: &mut dyn BitWrite) {
        match self {
            Response::AssetStatus(response) => response.ser(writer),
            Response::FullSourcePath(response) => response.ser(writer),
            Response::RelativeProductPath(response) => response.ser(writer),
            Response::SourceAssetInfo(response) => response.ser(writer),
            Response::SourceAssetProductsInfo(response) => response.ser(writer),
            Response::ScanFolders(response) => response.ser(writer),
            Response::AssetSafeFolders(response) => response.ser(writer),
            Response::AssetInfo(response) => response.ser(writer),
            Response::Custom(message) => message.ser_body(writer),
        }
    }
}
