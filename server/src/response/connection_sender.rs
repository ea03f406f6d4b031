use thiserror::Error;

use assetlink_shared::{ConnectionId, SerialNumber};

/// Errors a connection multiplexer may report when sending a response
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SendError {
    /// Connection is gone, most likely because the client disconnected
    #[error("Connection {connection_id} is not open")]
    ConnectionClosed { connection_id: ConnectionId },

    /// Connection exists but the payload could not be written
    #[error("Failed to write a response to connection {connection_id}: {reason}")]
    WriteFailed {
        connection_id: ConnectionId,
        reason: String,
    },
}

/// The connection multiplexer that owns the client sockets
pub trait ConnectionSender {
    /// Sends a response payload tagged with the serial of the request it
    /// answers
    fn send(
        &mut self,
        connection_id: ConnectionId,
        serial: SerialNumber,
        payload: &[u8],
    ) -> Result<(), SendError>;
}
