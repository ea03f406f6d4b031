pub mod custom_message;
pub mod error;
pub mod message_type;
pub mod request;
pub mod response;
