use uuid::Uuid;

use crate::{
    bit_reader::BitReader,
    bit_writer::BitWrite,
    error::SerdeErr,
    integer::UnsignedVariableInteger,
    serde::{ConstBitLength, Serde},
};

// Lengths of strings and lists
type Length = UnsignedVariableInteger<7>;

// bool

impl Serde for bool {
    fn ser(&self, writer: &mut dyn BitWrite) {
        writer.write_bit(*self);
    }

    fn de(reader: &mut BitReader) -> Result<Self, SerdeErr> {
        reader.read_bit()
    }

    fn bit_length(&self) -> u32 {
        <Self as ConstBitLength>::const_bit_length()
    }
}

impl ConstBitLength for bool {
    fn const_bit_length() -> u32 {
        1
    }
}

// Fixed-width unsigned integers, little endian

macro_rules! impl_serde_for_uint {
    ($type:ty) => {
        impl Serde for $type {
            fn ser(&self, writer: &mut dyn BitWrite) {
                for byte in self.to_le_bytes() {
                    writer.write_byte(byte);
                }
            }

            fn de(reader: &mut BitReader) -> Result<Self, SerdeErr> {
                let mut bytes = [0_u8; std::mem::size_of::<$type>()];
                for byte in bytes.iter_mut() {
                    *byte = reader.read_byte()?;
                }
                Ok(<$type>::from_le_bytes(bytes))
            }

            fn bit_length(&self) -> u32 {
                <Self as ConstBitLength>::const_bit_length()
            }
        }

        impl ConstBitLength for $type {
            fn const_bit_length() -> u32 {
                <$type>::BITS
            }
        }
    };
}

impl_serde_for_uint!(u8);
impl_serde_for_uint!(u16);
impl_serde_for_uint!(u32);
impl_serde_for_uint!(u64);

// String

impl Serde for String {
    fn ser(&self, writer: &mut dyn BitWrite) {
        Length::new(self.len() as u64).ser(writer);
        for byte in self.as_bytes() {
            writer.write_byte(*byte);
        }
    }

    fn de(reader: &mut BitReader) -> Result<Self, SerdeErr> {
        let length = Length::de(reader)?.get();
        let length = usize::try_from(length).map_err(|_| SerdeErr)?;
        // a length longer than what is left can only be a corrupt payload
        if length.saturating_mul(8) > reader.bits_remaining() {
            return Err(SerdeErr);
        }
        let mut bytes = Vec::with_capacity(length);
        for _ in 0..length {
            bytes.push(reader.read_byte()?);
        }
        String::from_utf8(bytes).map_err(|_| SerdeErr)
    }

    fn bit_length(&self) -> u32 {
        let byte_bits = u32::try_from(self.len())
            .unwrap_or(u32::MAX)
            .saturating_mul(8);
        Length::new(self.len() as u64)
            .bit_length()
            .saturating_add(byte_bits)
    }
}

// Vec

impl<T: Serde> Serde for Vec<T> {
    fn ser(&self, writer: &mut dyn BitWrite) {
        Length::new(self.len() as u64).ser(writer);
        for item in self {
            item.ser(writer);
        }
    }

    fn de(reader: &mut BitReader) -> Result<Self, SerdeErr> {
        let length = Length::de(reader)?.get();
        // every item takes at least one bit
        if length > reader.bits_remaining() as u64 {
            return Err(SerdeErr);
        }
        let mut output = Vec::new();
        for _ in 0..length {
            output.push(T::de(reader)?);
        }
        Ok(output)
    }

    fn bit_length(&self) -> u32 {
        self.iter().fold(
            Length::new(self.len() as u64).bit_length(),
            |output, item| output.saturating_add(item.bit_length()),
        )
    }
}

// Uuid, as two little endian u64 halves, low half first

impl Serde for Uuid {
    fn ser(&self, writer: &mut dyn BitWrite) {
        let (high, low) = self.as_u64_pair();
        low.ser(writer);
        high.ser(writer);
    }

    fn de(reader: &mut BitReader) -> Result<Self, SerdeErr> {
        let low = u64::de(reader)?;
        let high = u64::de(reader)?;
        Ok(Uuid::from_u64_pair(high, low))
    }

    fn bit_length(&self) -> u32 {
        <Self as ConstBitLength>::const_bit_length()
    }
}

impl ConstBitLength for Uuid {
    fn const_bit_length() -> u32 {
        2 * <u64 as ConstBitLength>::const_bit_length()
    }
}

// Option

impl<T: Serde> Serde for Option<T> {
    fn ser(&self, writer: &mut dyn BitWrite) {
        match self {
            Some(value) => {
                true.ser(writer);
                value.ser(writer);
            }
            None => {
                false.ser(writer);
            }
        }
    }

    fn de(reader: &mut BitReader) -> Result<Self, SerdeErr> {
        if bool::de(reader)? {
            Ok(Some(T::de(reader)?))
        } else {
            Ok(None)
        }
    }

    fn bit_length(&self) -> u32 {
        match self {
            Some(value) => value.bit_length().saturating_add(1),
            None => 1,
        }
    }
}
