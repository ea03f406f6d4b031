use crate::{bit_reader::BitReader, bit_writer::BitWrite, error::SerdeErr, serde::Serde};

/// An unsigned integer written in chunks of `BITS` bits, each chunk preceded
/// by a continuation bit. Small values (lengths, counts) stay small on the
/// wire while large ones remain representable.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub struct UnsignedVariableInteger<const BITS: u8> {
    value: u64,
}

impl<const BITS: u8> UnsignedVariableInteger<BITS> {
    pub fn new<T: Into<u64>>(value: T) -> Self {
        debug_assert!(BITS > 0 && BITS < 64, "chunk size must be within 1..64 bits");
        Self {
            value: value.into(),
        }
    }

    pub fn get(&self) -> u64 {
        self.value
    }

    fn chunk_limit() -> u64 {
        1_u64 << BITS
    }
}

impl<const BITS: u8> Serde for UnsignedVariableInteger<BITS> {
    fn ser(&self, writer: &mut dyn BitWrite) {
        let mut value = self.value;
        loop {
            let proceed = value >= Self::chunk_limit();
            writer.write_bit(proceed);
            for _ in 0..BITS {
                writer.write_bit(value & 1 != 0);
                value >>= 1;
            }
            if !proceed {
                return;
            }
        }
    }

    fn de(reader: &mut BitReader) -> Result<Self, SerdeErr> {
        let mut output: u64 = 0;
        let mut shift: u32 = 0;

        loop {
            let proceed = reader.read_bit()?;
            for _ in 0..BITS {
                let bit = reader.read_bit()?;
                if bit {
                    // a set bit beyond 64 can only come from a corrupt payload
                    if shift >= u64::BITS {
                        return Err(SerdeErr);
                    }
                    output |= 1 << shift;
                }
                shift += 1;
            }
            if !proceed {
                return Ok(Self { value: output });
            }
            if shift >= u64::BITS {
                return Err(SerdeErr);
            }
        }
    }

    fn bit_length(&self) -> u32 {
        let mut output = 0;
        let mut value = self.value;
        loop {
            let proceed = value >= Self::chunk_limit();
            output += 1 + BITS as u32;
            value >>= BITS;
            if !proceed {
                return output;
            }
        }
    }
}

impl<const BITS: u8> From<u64> for UnsignedVariableInteger<BITS> {
    fn from(value: u64) -> Self {
        Self::new(value)
    }
}
