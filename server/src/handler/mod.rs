mod error;
mod handler_registry;
mod request_handler;

pub use error::RegistryError;
pub use handler_registry::HandlerRegistry;
pub use request_handler::RequestHandler;
