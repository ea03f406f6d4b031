use thiserror::Error;

use crate::MessageType;

/// Errors that can occur while declaring messages on the Protocol
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProtocolError {
    /// Protocol is locked and cannot be modified
    #[error("Protocol is already locked and cannot be modified. Protocol.lock() has been called and no further changes are allowed")]
    AlreadyLocked,

    /// Identifier falls in the range reserved for built-in messages
    #[error("Message type {message_type} is reserved for built-in messages. Custom message types must be at least {first_custom}", first_custom = MessageType::FIRST_CUSTOM)]
    ReservedMessageType { message_type: MessageType },

    /// Identifier was already declared
    #[error("Message type {message_type} has already been added to the Protocol")]
    DuplicateMessageType { message_type: MessageType },
}
