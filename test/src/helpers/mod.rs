pub mod fake_fence_directory;
pub mod recording_handler;
pub mod test_server;

pub use fake_fence_directory::{FakeFenceDirectory, FenceScript};
pub use recording_handler::{Delivery, RecordingHandler};
pub use recording_sender::{RecordingSender, SentResponses};
pub use test_asset_system::{AssetSystemCalls, TestAssetSystem};
pub use test_server::{TestServer, PLATFORM};
