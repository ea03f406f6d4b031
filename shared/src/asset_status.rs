use assetlink_serde::{BitReader, BitWrite, ConstBitLength, Serde, SerdeErr};

/// Compilation status of an asset as reported back to clients
#[derive(Copy, Debug, Clone, Eq, PartialEq, Hash, Default)]
pub enum AssetStatus {
    // The asset is not known to the compile queue
    #[default]
    Unknown,
    // The asset does not exist, and will not be built
    Missing,
    // The asset is waiting in the compile queue
    Queued,
    // The asset is being compiled right now
    Compiling,
    // The asset is compiled and its products are on disk
    Compiled,
    // The asset was processed but the build failed
    Failed,
}

impl AssetStatus {
    /// Every status but `Unknown` is a definitive answer from the compile queue
    pub fn is_definitive(&self) -> bool {
        *self != AssetStatus::Unknown
    }

    fn to_index(self) -> u8 {
        match self {
            AssetStatus::Unknown => 0,
            AssetStatus::Missing => 1,
            AssetStatus::Queued => 2,
            AssetStatus::Compiling => 3,
            AssetStatus::Compiled => 4,
            AssetStatus::Failed => 5,
        }
    }
}

impl Serde for AssetStatus {
    fn ser(&self, writer: &mut dyn BitWrite) {
        self.to_index().ser(writer);
    }

    fn de(reader: &mut BitReader) -> Result<Self, SerdeErr> {
        match u8::de(reader)? {
            0 => Ok(AssetStatus::Unknown),
            1 => Ok(AssetStatus::Missing),
            2 => Ok(AssetStatus::Queued),
            3 => Ok(AssetStatus::Compiling),
            4 => Ok(AssetStatus::Compiled),
            5 => Ok(AssetStatus::Failed),
            _ => Err(SerdeErr),
        }
    }

    fn bit_length(&self) -> u32 {
        <u8 as ConstBitLength>::const_bit_length()
    }
}
