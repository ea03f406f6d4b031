//! # Assetlink Server
//! The request side of an asset processor: decodes client requests, answers
//! catalog lookups, correlates compile status requests with asynchronous
//! compile-queue callbacks, and sequences lookups behind filesystem fences so
//! they observe every file the client wrote before asking.

#![deny(
    trivial_casts,
    trivial_numeric_casts,
    unstable_features,
    unused_import_braces
)]

pub mod shared {
    pub use assetlink_shared::{
        AssetId, AssetInfo, AssetStatus, AssetType, ConnectionId, CustomMessage, DecodeError,
        MessageType, Protocol, ProtocolError, Request, RequestKey, Response, SerialNumber, Uuid,
    };
}

mod asset_system;
mod error;
mod events;
mod fence;
mod handler;
mod response;
mod server;
mod status;

pub use asset_system::{AssetSystem, LocatedAsset};
pub use error::AssetServerError;
pub use events::{
    AssetExistsEvent, CompileGroupEvent, ErrorEvent, EscalateAsset, EscalateEvent, Event, Events,
    RequestAssetExists, RequestCompileGroup,
};
pub use fence::{
    fence_file_name, parse_fence_file_name, FenceConfig, FenceDirectory, FenceEntry, FenceError,
    FenceId, FenceManager, FenceOutcome, FileFenceDirectory, FENCE_FILE_EXTENSION,
};
pub use handler::{HandlerRegistry, RegistryError, RequestHandler};
pub use response::{ConnectionSender, ResponseEmitter, SendError};
pub use server::{AssetRequestServer, FencingFailurePolicy, ServerConfig};
pub use status::{AssetStatusCorrelator, PendingAssetRequest, PendingState};
