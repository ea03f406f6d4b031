use std::{
    cell::RefCell,
    rc::Rc,
    time::{Duration, Instant},
};

use assetlink_server::{AssetRequestServer, Events, ServerConfig};
use assetlink_shared::{
    AssetId, ConnectionId, CustomMessage, MessageType, Request, RequestAssetStatus, RequestKey,
    SerialNumber,
};

use crate::{
    protocol, AssetSystemCalls, Delivery, FakeFenceDirectory, FenceScript, RecordingHandler,
    RecordingSender, SentResponses, TestAssetSystem,
};

pub const PLATFORM: &str = "pc";

/// An AssetRequestServer wired to in-memory collaborators, with a clock the
/// test moves by hand
pub struct TestServer {
    pub server: AssetRequestServer,
    pub sent: SentResponses,
    pub fences: FenceScript,
    pub asset_calls: AssetSystemCalls,
    deliveries: Rc<RefCell<Vec<Delivery>>>,
    now: Instant,
}

impl TestServer {
    pub fn new() -> Self {
        Self::with(ServerConfig::default(), TestAssetSystem::new())
    }

    pub fn with_config(config: ServerConfig) -> Self {
        Self::with(config, TestAssetSystem::new())
    }

    pub fn with(config: ServerConfig, asset_system: TestAssetSystem) -> Self {
        let (sender, sent) = RecordingSender::new();
        let (directory, fences) = FakeFenceDirectory::new();
        let asset_calls = asset_system.calls.clone();
        let server = AssetRequestServer::new(
            config,
            protocol(),
            Box::new(directory),
            Box::new(asset_system),
            Box::new(sender),
        );
        Self {
            server,
            sent,
            fences,
            asset_calls,
            deliveries: Rc::new(RefCell::new(Vec::new())),
            now: Instant::now(),
        }
    }

    /// Encodes `request` and feeds it to the server as the client would
    pub fn request(&mut self, connection_id: ConnectionId, serial: SerialNumber, request: &Request) {
        let payload = request.encode();
        self.server
            .on_incoming_request_at(connection_id, serial, &payload, PLATFORM, self.now);
    }

    pub fn status_request(
        &mut self,
        key: RequestKey,
        search_term: &str,
        asset_id: AssetId,
        is_status_request: bool,
    ) {
        let request = Request::AssetStatus(RequestAssetStatus {
            search_term: search_term.to_string(),
            asset_id,
            is_status_request,
            require_fencing: false,
        });
        self.request(key.connection_id, key.serial, &request);
    }

    /// A compile-and-wait request for a file the client has just written
    pub fn fenced_status_request(&mut self, key: RequestKey, search_term: &str) {
        let request = Request::AssetStatus(RequestAssetStatus {
            search_term: search_term.to_string(),
            asset_id: AssetId::invalid(),
            is_status_request: false,
            require_fencing: true,
        });
        self.request(key.connection_id, key.serial, &request);
    }

    pub fn custom_request(&mut self, key: RequestKey, message_type: MessageType, body: &[u8]) {
        let request = Request::Custom(CustomMessage::new(message_type, body.to_vec()));
        self.request(key.connection_id, key.serial, &request);
    }

    /// Registers a `RecordingHandler` named `name` for `message_type`
    pub fn register_recorder(&mut self, message_type: MessageType, name: &'static str) {
        let handler = RecordingHandler::new(name, &self.deliveries);
        self.server
            .register_handler(message_type, Box::new(handler))
            .expect("custom message types can be registered");
    }

    pub fn register_echo(&mut self, message_type: MessageType, name: &'static str) {
        let handler = RecordingHandler::echoing(name, &self.deliveries);
        self.server
            .register_handler(message_type, Box::new(handler))
            .expect("custom message types can be registered");
    }

    /// Runs one update at the current time
    pub fn update(&mut self) {
        self.server.update(self.now);
    }

    /// Moves the clock forward and runs one update
    pub fn advance(&mut self, duration: Duration) {
        self.now += duration;
        self.server.update(self.now);
    }

    /// Reports the most recently created fence file as observed
    pub fn detect_last_fence(&mut self) {
        let fence_id = self
            .fences
            .last_created()
            .expect("a fence file was created");
        self.server.on_fence_file_detected(fence_id);
    }

    pub fn receive(&mut self) -> Events {
        self.server.receive()
    }

    pub fn deliveries(&self) -> Vec<Delivery> {
        self.deliveries.borrow().clone()
    }
}

impl Default for TestServer {
    fn default() -> Self {
        Self::new()
    }
}
