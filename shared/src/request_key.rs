use std::fmt;

pub type ConnectionId = u32;
pub type SerialNumber = u32;

/// Identifies one in-flight client request: the connection it arrived on and
/// the serial number the client attached to it. Responses are routed back by
/// this pair so the client can correlate them.
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug)]
pub struct RequestKey {
    pub connection_id: ConnectionId,
    pub serial: SerialNumber,
}

impl RequestKey {
    pub fn new(connection_id: ConnectionId, serial: SerialNumber) -> Self {
        Self {
            connection_id,
            serial,
        }
    }
}

impl fmt::Display for RequestKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.connection_id, self.serial)
    }
}
