use thiserror::Error;

use crate::MessageType;

/// Errors that can occur while decoding an incoming payload
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// Payload too short to hold a message type
    #[error("Payload of {length} bytes is too short to hold a message type")]
    MissingMessageType { length: usize },

    /// Message type was never declared with the Protocol
    #[error("Message type {message_type} is not known. Custom messages must be declared with Protocol::add_message()")]
    UnknownMessageType { message_type: MessageType },

    /// Body does not match the layout of its message type
    #[error("Body of message {message_type} is malformed")]
    MalformedBody { message_type: MessageType },

    /// Body decoded but bytes were left over
    #[error("Message {message_type} has {trailing_bits} unread bits after its body")]
    TrailingBytes {
        message_type: MessageType,
        trailing_bits: usize,
    },
}
