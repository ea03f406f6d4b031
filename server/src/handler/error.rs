use thiserror::Error;

use assetlink_shared::MessageType;

/// Errors that can occur while registering a request handler
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// Built-in messages are always answered by the server itself
    #[error("Message type {message_type} is built in and is always handled by the server. Handlers can only be registered for custom message types")]
    BuiltInMessageType { message_type: MessageType },
}
