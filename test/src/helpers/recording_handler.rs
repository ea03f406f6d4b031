use std::{cell::RefCell, rc::Rc};

use assetlink_server::{RequestHandler, ResponseEmitter};
use assetlink_shared::{CustomMessage, RequestKey};

/// One call to `RequestHandler::request_ready()`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Delivery {
    pub handler: &'static str,
    pub key: RequestKey,
    pub message: CustomMessage,
    pub platform: String,
    pub fencing_failed: bool,
}

/// Records every delivery and, when `echo` is set, answers with the body it
/// received
pub struct RecordingHandler {
    name: &'static str,
    echo: bool,
    deliveries: Rc<RefCell<Vec<Delivery>>>,
}

impl RecordingHandler {
    pub fn new(name: &'static str, deliveries: &Rc<RefCell<Vec<Delivery>>>) -> Self {
        Self {
            name,
            echo: false,
            deliveries: deliveries.clone(),
        }
    }

    pub fn echoing(name: &'static str, deliveries: &Rc<RefCell<Vec<Delivery>>>) -> Self {
        Self {
            echo: true,
            ..Self::new(name, deliveries)
        }
    }
}

impl RequestHandler for RecordingHandler {
    fn request_ready(
        &mut self,
        key: RequestKey,
        message: CustomMessage,
        platform: &str,
        fencing_failed: bool,
        responder: &mut ResponseEmitter,
    ) {
        if self.echo {
            let reply = CustomMessage::new(message.message_type(), message.body().to_vec());
            responder.send_custom_response(&key, reply);
        }
        self.deliveries.borrow_mut().push(Delivery {
            handler: self.name,
            key,
            message,
            platform: platform.to_string(),
            fencing_failed,
        });
    }
}
