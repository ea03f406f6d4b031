use std::default::Default;

use crate::FenceConfig;

/// What to do with a request whose fence could not be established
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum FencingFailurePolicy {
    /// Dispatch anyway with `fencing_failed` set. The request is answered but
    /// may not see file events that were still in flight.
    #[default]
    Degrade,
    /// Do not dispatch. Built-in requests get their failure answer, custom
    /// messages are dropped.
    Reject,
}

/// Contains Config properties which will be used by the Server
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServerConfig {
    /// Used to configure fence file creation and deletion
    pub fence: FenceConfig,
    /// Determines how requests are treated when fencing fails
    pub fencing_failure: FencingFailurePolicy,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            fence: FenceConfig::default(),
            fencing_failure: FencingFailurePolicy::default(),
        }
    }
}
