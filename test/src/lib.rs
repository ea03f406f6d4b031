pub mod helpers;

pub use helpers::*;
pub use test_protocol::{protocol, BUNDLE_INFO, PING};
