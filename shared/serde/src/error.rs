use thiserror::Error;

/// Returned when a buffer can not be read back into the requested type,
/// either because it ended early or because it held an invalid value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("payload could not be deserialized")]
pub struct SerdeErr;
