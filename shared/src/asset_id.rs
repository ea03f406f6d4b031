use std::fmt;

use assetlink_serde::{ConstBitLength, Serde};
use uuid::Uuid;

/// Identifies one product of a source asset: the source's guid plus the
/// sub id the builder assigned to the product.
/// An id with a nil guid is invalid and stands for "no asset".
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug, Default, Serde)]
pub struct AssetId {
    pub guid: Uuid,
    pub sub_id: u32,
}

impl AssetId {
    pub fn new(guid: Uuid, sub_id: u32) -> Self {
        Self { guid, sub_id }
    }

    pub fn invalid() -> Self {
        Self::default()
    }

    pub fn is_valid(&self) -> bool {
        !self.guid.is_nil()
    }

    pub fn set_invalid(&mut self) {
        *self = Self::invalid();
    }
}

impl fmt::Display for AssetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{{:X}}}:{:x}", self.guid.hyphenated(), self.sub_id)
    }
}

impl ConstBitLength for AssetId {
    fn const_bit_length() -> u32 {
        <Uuid as ConstBitLength>::const_bit_length() + <u32 as ConstBitLength>::const_bit_length()
    }
}

/// The type of an asset, as registered by the builder that produces it
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug, Default, Serde)]
pub struct AssetType(pub Uuid);

impl AssetType {
    pub fn is_null(&self) -> bool {
        self.0.is_nil()
    }
}
