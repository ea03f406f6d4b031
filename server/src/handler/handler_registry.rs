use std::collections::HashMap;

use log::{debug, info};

use assetlink_shared::MessageType;

use crate::{RegistryError, RequestHandler};

/// Maps custom message types to the handler that answers them
#[derive(Default)]
pub struct HandlerRegistry {
    handlers: HashMap<MessageType, Box<dyn RequestHandler>>,
}

impl HandlerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `handler` for `message_type`, replacing and returning any
    /// handler registered before
    pub fn register(
        &mut self,
        message_type: MessageType,
        handler: Box<dyn RequestHandler>,
    ) -> Result<Option<Box<dyn RequestHandler>>, RegistryError> {
        if message_type.is_reserved() {
            return Err(RegistryError::BuiltInMessageType { message_type });
        }
        let replaced = self.handlers.insert(message_type, handler);
        if replaced.is_some() {
            info!("replaced the handler for message type {}", message_type);
        }
        Ok(replaced)
    }

    pub fn deregister(&mut self, message_type: MessageType) -> Option<Box<dyn RequestHandler>> {
        let removed = self.handlers.remove(&message_type);
        if removed.is_none() {
            debug!(
                "no handler registered for message type {}, ignoring",
                message_type
            );
        }
        removed
    }

    pub fn contains(&self, message_type: MessageType) -> bool {
        self.handlers.contains_key(&message_type)
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    pub(crate) fn get_mut(
        &mut self,
        message_type: MessageType,
    ) -> Option<&mut Box<dyn RequestHandler>> {
        self.handlers.get_mut(&message_type)
    }
}
