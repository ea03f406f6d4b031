use std::collections::BTreeMap;

use log::debug;

use crate::{BitReader, CustomMessage, DecodeError, MessageType, Request, Serde};

pub mod error;
pub use error::ProtocolError;

/// The set of messages a server understands.
///
/// Built-in requests are always known. Custom message types are declared with
/// `add_message()` together with whether they must be fenced, after which the
/// Protocol is locked and handed to the server.
#[derive(Clone, Debug, Default)]
pub struct Protocol {
    // custom message type -> require_fencing
    custom_messages: BTreeMap<MessageType, bool>,
    locked: bool,
}

impl Protocol {
    pub fn builder() -> Self {
        Self::default()
    }

    /// Declares a custom message type
    pub fn add_message(
        &mut self,
        message_type: MessageType,
        require_fencing: bool,
    ) -> Result<&mut Self, ProtocolError> {
        self.check_lock()?;
        if message_type.is_reserved() {
            return Err(ProtocolError::ReservedMessageType { message_type });
        }
        if self.custom_messages.contains_key(&message_type) {
            return Err(ProtocolError::DuplicateMessageType { message_type });
        }
        self.custom_messages.insert(message_type, require_fencing);
        Ok(self)
    }

    pub fn lock(&mut self) -> Result<(), ProtocolError> {
        self.check_lock()?;
        self.locked = true;
        Ok(())
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    /// Returns Err if the protocol is locked
    pub fn check_lock(&self) -> Result<(), ProtocolError> {
        if self.locked {
            Err(ProtocolError::AlreadyLocked)
        } else {
            Ok(())
        }
    }

    pub fn build(&mut self) -> Self {
        std::mem::take(self)
    }

    /// Whether `message_type` is a built-in request or a declared custom message
    pub fn is_known(&self, message_type: MessageType) -> bool {
        message_type.built_in_name().is_some() || self.custom_messages.contains_key(&message_type)
    }

    /// Whether messages of this type must be fenced. Unknown types never are.
    pub fn requires_fencing(&self, message_type: MessageType) -> bool {
        self.custom_messages
            .get(&message_type)
            .copied()
            .unwrap_or(false)
    }

    pub fn custom_message_types(&self) -> impl Iterator<Item = MessageType> + '_ {
        self.custom_messages.keys().copied()
    }

    /// Decodes one request payload: the message type followed by the body.
    ///
    /// Custom messages come back with their fencing requirement taken from
    /// the declaration on this Protocol.
    pub fn decode_request(&self, payload: &[u8]) -> Result<Request, DecodeError> {
        let mut reader = BitReader::new(payload);
        let message_type =
            MessageType::de(&mut reader).map_err(|_| DecodeError::MissingMessageType {
                length: payload.len(),
            })?;

        let request = match Request::de_built_in(message_type, &mut reader) {
            Some(request) => request,
            None => match self.custom_messages.get(&message_type) {
                Some(require_fencing) => {
                    CustomMessage::de_body(message_type, &mut reader).map(|mut message| {
                        message.set_require_fencing(*require_fencing);
                        Request::Custom(message)
                    })
                }
                None => {
                    debug!("rejecting undeclared message type {}", message_type);
                    return Err(DecodeError::UnknownMessageType { message_type });
                }
            },
        };

        let request = request.map_err(|_| DecodeError::MalformedBody { message_type })?;

        // the writer pads the last byte, anything longer is garbage
        let trailing_bits = reader.bits_remaining();
        if trailing_bits >= 8 {
            return Err(DecodeError::TrailingBytes {
                message_type,
                trailing_bits,
            });
        }
        Ok(request)
    }
}
