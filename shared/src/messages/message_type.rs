use std::fmt;

use assetlink_serde::{BitReader, BitWrite, ConstBitLength, Serde, SerdeErr};

/// Numeric identifier carried at the front of every request and response.
///
/// Identifiers below `MessageType::FIRST_CUSTOM` are reserved for the
/// built-in messages the server answers itself. Anything above must be
/// declared on the `Protocol` and is delivered to a registered handler.
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy, Debug)]
pub struct MessageType(u32);

impl MessageType {
    pub const ASSET_STATUS: MessageType = MessageType(0x01);
    pub const FULL_SOURCE_PATH: MessageType = MessageType(0x02);
    pub const RELATIVE_PRODUCT_PATH: MessageType = MessageType(0x03);
    pub const SOURCE_ASSET_INFO: MessageType = MessageType(0x04);
    pub const SOURCE_ASSET_PRODUCTS_INFO: MessageType = MessageType(0x05);
    pub const SCAN_FOLDERS: MessageType = MessageType(0x06);
    pub const ASSET_SAFE_FOLDERS: MessageType = MessageType(0x07);
    pub const REGISTER_SOURCE_ASSET: MessageType = MessageType(0x08);
    pub const UNREGISTER_SOURCE_ASSET: MessageType = MessageType(0x09);
    pub const ESCALATE_ASSET: MessageType = MessageType(0x0A);
    pub const ASSET_INFO: MessageType = MessageType(0x0B);

    /// The lowest identifier available to custom messages
    pub const FIRST_CUSTOM: MessageType = MessageType(0x100);

    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    pub fn id(&self) -> u32 {
        self.0
    }

    /// Whether the identifier falls in the range reserved for built-ins
    pub fn is_reserved(&self) -> bool {
        *self < Self::FIRST_CUSTOM
    }

    /// Name of the built-in message, if this is one
    pub fn built_in_name(&self) -> Option<&'static str> {
        let name = match *self {
            Self::ASSET_STATUS => "RequestAssetStatus",
            Self::FULL_SOURCE_PATH => "GetFullSourcePath",
            Self::RELATIVE_PRODUCT_PATH => "GetRelativeProductPath",
            Self::SOURCE_ASSET_INFO => "SourceAssetInfo",
            Self::SOURCE_ASSET_PRODUCTS_INFO => "SourceAssetProductsInfo",
            Self::SCAN_FOLDERS => "GetScanFolders",
            Self::ASSET_SAFE_FOLDERS => "GetAssetSafeFolders",
            Self::REGISTER_SOURCE_ASSET => "RegisterSourceAsset",
            Self::UNREGISTER_SOURCE_ASSET => "UnregisterSourceAsset",
            Self::ESCALATE_ASSET => "RequestEscalateAsset",
            Self::ASSET_INFO => "AssetInfo",
            _ => return None,
        };
        Some(name)
    }
}

impl fmt::Display for MessageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.built_in_name() {
            Some(name) => write!(f, "{}({:#x})", name, self.0),
            None => write!(f, "{:#x}", self.0),
        }
    }
}

impl Serde for MessageType {
    fn ser(&self, writer: &mut dyn BitWrite) {
        self.0.ser(writer);
    }

    fn de(reader: &mut BitReader) -> Result<Self, SerdeErr> {
        Ok(Self(u32::de(reader)?))
    }

    fn bit_length(&self) -> u32 {
        <Self as ConstBitLength>::const_bit_length()
    }
}

impl ConstBitLength for MessageType {
    fn const_bit_length() -> u32 {
        <u32 as ConstBitLength>::const_bit_length()
    }
}
