use log::debug;

use assetlink_shared::{CustomMessage, RequestKey, Response};

use crate::ConnectionSender;

/// Addresses responses to the connection and serial of the request they
/// answer. A connection that went away in the meantime swallows the
/// response.
pub struct ResponseEmitter {
    sender: Box<dyn ConnectionSender>,
}

impl ResponseEmitter {
    pub fn new(sender: Box<dyn ConnectionSender>) -> Self {
        Self { sender }
    }

    pub fn send_response(&mut self, key: &RequestKey, response: &Response) {
        let payload = response.encode();
        if let Err(error) = self.sender.send(key.connection_id, key.serial, &payload) {
            debug!(
                "dropping {} response for request {}: {}",
                response.message_type(),
                key,
                error
            );
        }
    }

    /// Answers a custom request. Used by registered handlers.
    pub fn send_custom_response(&mut self, key: &RequestKey, message: CustomMessage) {
        self.send_response(key, &Response::Custom(message));
    }
}
