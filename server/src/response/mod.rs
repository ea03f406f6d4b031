mod connection_sender;
mod response_emitter;

pub use connection_sender::{ConnectionSender, SendError};
pub use response_emitter::ResponseEmitter;
