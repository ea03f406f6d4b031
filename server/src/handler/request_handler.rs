use assetlink_shared::{CustomMessage, RequestKey};

use crate::ResponseEmitter;

/// A collaborator that answers one or more custom message types.
///
/// Handlers are never called from inside `on_incoming_request()` or
/// `on_fence_file_detected()`. Deliveries are queued and made from
/// `AssetRequestServer::update()`.
pub trait RequestHandler {
    /// Takes ownership of `message`. `fencing_failed` is set when the message
    /// asked for fencing but the fence could not be established, in which
    /// case file events written before the request may not have been seen
    /// yet.
    fn request_ready(
        &mut self,
        key: RequestKey,
        message: CustomMessage,
        platform: &str,
        fencing_failed: bool,
        responder: &mut ResponseEmitter,
    );
}
