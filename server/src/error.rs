use thiserror::Error;

use assetlink_shared::{ConnectionId, DecodeError, MessageType, RequestKey, SerialNumber};

/// Problems surfaced to the owning event loop through `ErrorEvent`. None of
/// these interrupt the server; the affected request has already been dropped
/// or degraded by the time the event is read.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AssetServerError {
    /// Incoming payload could not be decoded, so no response can be sent
    #[error("Request {serial} from connection {connection_id} was dropped: {source}")]
    Decode {
        connection_id: ConnectionId,
        serial: SerialNumber,
        source: DecodeError,
    },

    /// Fence could not be created or deleted within the configured attempts
    #[error("Fencing failed for {message_type} request {key}. The request was not ordered behind pending file events")]
    FencingFailed {
        key: RequestKey,
        message_type: MessageType,
    },

    /// Custom message arrived but no handler is registered for its type
    #[error("No handler is registered for message type {message_type}, request {key} was dropped")]
    NoHandler {
        key: RequestKey,
        message_type: MessageType,
    },
}
