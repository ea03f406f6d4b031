use assetlink_serde::{BitReader, BitWrite, BitWriter, Serde, SerdeErr};

use crate::MessageType;

/// A message whose type is declared by a collaborator rather than built into
/// the server. The body stays opaque until the registered handler reads it.
#[derive(PartialEq, Eq, Clone, Debug)]
pub struct CustomMessage {
    message_type: MessageType,
    require_fencing: bool,
    body: Vec<u8>,
}

impl CustomMessage {
    pub fn new(message_type: MessageType, body: Vec<u8>) -> Self {
        Self {
            message_type,
            require_fencing: false,
            body,
        }
    }

    /// Builds a message whose body is the serialized `value`
    pub fn from_value<T: Serde>(message_type: MessageType, value: &T) -> Self {
        let mut writer = BitWriter::with_capacity(value.bit_length().div_ceil(8) as usize);
        value.ser(&mut writer);
        Self::new(message_type, writer.to_bytes().into_vec())
    }

    pub fn message_type(&self) -> MessageType {
        self.message_type
    }

    /// Whether this message must pass through a fence before dispatch, as
    /// declared for its type on the Protocol
    pub fn require_fencing(&self) -> bool {
        self.require_fencing
    }

    pub(crate) fn set_require_fencing(&mut self, require_fencing: bool) {
        self.require_fencing = require_fencing;
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }

    pub fn into_body(self) -> Vec<u8> {
        self.body
    }

    /// Reads the body back as a `T`
    pub fn read_body<T: Serde>(&self) -> Result<T, SerdeErr> {
        let mut reader = BitReader::new(&self.body);
        T::de(&mut reader)
    }

    pub(crate) fn body_bit_length(&self) -> u32 {
        self.body.bit_length()
    }

    pub(crate) fn ser_body(&self, writer: &mut dyn BitWrite) {
        self.body.ser(writer);
    }

    pub(crate) fn de_body(
        message_type: MessageType,
        reader: &mut BitReader,
    ) -> Result<Self, SerdeErr> {
        let body = Vec::<u8>::de(reader)?;
        Ok(Self::new(message_type, body))
    }
}
