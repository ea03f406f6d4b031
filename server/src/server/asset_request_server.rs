use std::{
    collections::VecDeque,
    mem,
    time::{Duration, Instant},
};

use log::{debug, warn};

use assetlink_shared::{
    AssetStatus, ConnectionId, CustomMessage, MessageType, Protocol, Request, RequestKey,
    SerialNumber,
};

use crate::{
    fence::{FenceEntry, FenceId, FenceManager, FenceOutcome},
    server::inline_requests,
    AssetServerError, AssetStatusCorrelator, AssetSystem, ConnectionSender, Events,
    FenceDirectory, FencingFailurePolicy, HandlerRegistry, PendingAssetRequest, RegistryError,
    RequestHandler, ResponseEmitter, ServerConfig,
};

struct QueuedRequest {
    key: RequestKey,
    message: CustomMessage,
    platform: String,
    fencing_failed: bool,
}

/// Receives requests from asset clients and sees each one answered by exactly
/// one consumer: the server itself for built-in lookups, the status
/// correlator for asset status requests, or the handler registered for a
/// custom message type.
///
/// Everything runs on the caller's event loop. The owning loop feeds in
/// network requests, fence notifications and compile-queue callbacks, calls
/// `update()` regularly, and drains produced events with `receive()`.
pub struct AssetRequestServer {
    config: ServerConfig,
    protocol: Protocol,
    asset_system: Box<dyn AssetSystem>,
    emitter: ResponseEmitter,
    fences: FenceManager,
    correlator: AssetStatusCorrelator,
    handlers: HandlerRegistry,
    queued_requests: VecDeque<QueuedRequest>,
    incoming_events: Events,
}

impl AssetRequestServer {
    /// Create a new AssetRequestServer
    pub fn new<P: Into<Protocol>>(
        server_config: ServerConfig,
        protocol: P,
        fence_directory: Box<dyn FenceDirectory>,
        asset_system: Box<dyn AssetSystem>,
        sender: Box<dyn ConnectionSender>,
    ) -> Self {
        let fences = FenceManager::new(fence_directory, server_config.fence.clone());

        Self {
            config: server_config,
            protocol: protocol.into(),
            asset_system,
            emitter: ResponseEmitter::new(sender),
            fences,
            correlator: AssetStatusCorrelator::new(),
            handlers: HandlerRegistry::new(),
            queued_requests: VecDeque::new(),
            incoming_events: Events::new(),
        }
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    pub fn protocol(&self) -> &Protocol {
        &self.protocol
    }

    // Requests

    /// Entry point for the connection multiplexer
    pub fn on_incoming_request(
        &mut self,
        connection_id: ConnectionId,
        serial: SerialNumber,
        payload: &[u8],
        platform: &str,
    ) {
        self.on_incoming_request_at(connection_id, serial, payload, platform, Instant::now());
    }

    /// Same as `on_incoming_request()`, with deletion retries scheduled
    /// relative to `now`
    pub fn on_incoming_request_at(
        &mut self,
        connection_id: ConnectionId,
        serial: SerialNumber,
        payload: &[u8],
        platform: &str,
        now: Instant,
    ) {
        let request = match self.protocol.decode_request(payload) {
            Ok(request) => request,
            Err(source) => {
                warn!(
                    "invalid request {} from connection {}: {}",
                    serial, connection_id, source
                );
                self.incoming_events.push_error(AssetServerError::Decode {
                    connection_id,
                    serial,
                    source,
                });
                return;
            }
        };

        let key = RequestKey::new(connection_id, serial);

        if !request.require_fencing() {
            self.dispatch(key, request, platform.to_string(), false);
            return;
        }

        let entry = FenceEntry {
            key,
            request,
            platform: platform.to_string(),
        };
        match self.fences.begin(entry, now) {
            FenceOutcome::Parked(_) | FenceOutcome::Deleting(_) => {}
            FenceOutcome::Failed(entry) => self.on_fencing_failed(entry),
        }
    }

    /// Entry point for the filesystem watcher, once it observed the fence
    /// file with `fence_id`
    pub fn on_fence_file_detected(&mut self, fence_id: FenceId) {
        let Some(entry) = self.fences.take_detected(fence_id) else {
            debug!("no request is waiting on fence {}, ignoring", fence_id);
            return;
        };
        let FenceEntry {
            key,
            request,
            platform,
        } = entry;
        self.dispatch(key, request, platform, false);
    }

    // Compile queue and catalog callbacks

    pub fn on_compile_group_created(&mut self, key: &RequestKey, status: AssetStatus) {
        self.correlator.on_compile_group_created(
            key,
            status,
            &mut self.emitter,
            &mut self.incoming_events,
        );
    }

    pub fn on_compile_group_finished(&mut self, key: &RequestKey, status: AssetStatus) {
        self.correlator.on_compile_group_finished(
            key,
            status,
            &mut self.emitter,
            &mut self.incoming_events,
        );
    }

    pub fn on_asset_exists_response(&mut self, key: &RequestKey, exists: bool) {
        self.correlator
            .on_asset_exists_response(key, exists, &mut self.emitter);
    }

    // Handlers

    /// Registers `handler` for a custom message type, returning the handler
    /// it replaces
    pub fn register_handler(
        &mut self,
        message_type: MessageType,
        handler: Box<dyn RequestHandler>,
    ) -> Result<Option<Box<dyn RequestHandler>>, RegistryError> {
        self.handlers.register(message_type, handler)
    }

    pub fn deregister_handler(
        &mut self,
        message_type: MessageType,
    ) -> Option<Box<dyn RequestHandler>> {
        self.handlers.deregister(message_type)
    }

    pub fn handlers(&self) -> &HandlerRegistry {
        &self.handlers
    }

    // Loop

    /// Must be called regularly. Retries fence deletions that are due and
    /// delivers queued custom messages to their handlers.
    pub fn update(&mut self, now: Instant) {
        for entry in self.fences.retry_deletions(now) {
            self.on_fencing_failed(entry);
        }

        // handlers may not enqueue into the batch being delivered
        let queued = mem::take(&mut self.queued_requests);
        for queued_request in queued {
            self.deliver(queued_request);
        }
    }

    /// Returns every event produced since the last call and resets the buffer
    pub fn receive(&mut self) -> Events {
        mem::replace(&mut self.incoming_events, Events::new())
    }

    /// When `update()` next has a fence deletion to retry
    pub fn next_retry_at(&self) -> Option<Instant> {
        self.fences.next_retry_at()
    }

    pub fn retry_interval(&self) -> Duration {
        self.fences.retry_interval()
    }

    // Introspection

    /// Requests waiting on a fence
    pub fn pending_fence_count(&self) -> usize {
        self.fences.pending_count()
    }

    /// Custom messages waiting for the next `update()`
    pub fn queued_request_count(&self) -> usize {
        self.queued_requests.len()
    }

    /// Asset status requests waiting for compile-queue or catalog callbacks
    pub fn outstanding_requests(&self) -> usize {
        self.correlator.outstanding_requests()
    }

    pub fn pending_request(&self, key: &RequestKey) -> Option<&PendingAssetRequest> {
        self.correlator.pending_request(key)
    }

    /// Forgets every in-flight request without answering it. Registered
    /// handlers and the fence id counter are kept.
    pub fn reset(&mut self) {
        self.fences.clear();
        self.correlator.clear();
        self.queued_requests.clear();
        self.incoming_events = Events::new();
    }

    // Private

    fn dispatch(&mut self, key: RequestKey, request: Request, platform: String, fencing_failed: bool) {
        let asset_system = self.asset_system.as_ref();
        let response = match request {
            Request::AssetStatus(request) => {
                self.correlator.handle_status_request(
                    key,
                    platform,
                    request,
                    &mut self.emitter,
                    &mut self.incoming_events,
                );
                return;
            }
            Request::Custom(message) => {
                self.queue_for_handler(key, message, platform, fencing_failed);
                return;
            }
            Request::FullSourcePath(request) => {
                inline_requests::full_source_path(asset_system, &request)
            }
            Request::RelativeProductPath(request) => {
                inline_requests::relative_product_path(asset_system, &request)
            }
            Request::SourceAssetInfo(request) => {
                inline_requests::source_asset_info(asset_system, &request)
            }
            Request::SourceAssetProductsInfo(request) => {
                inline_requests::source_asset_products_info(asset_system, &request)
            }
            Request::ScanFolders(_) => inline_requests::scan_folders(asset_system),
            Request::AssetSafeFolders(_) => inline_requests::asset_safe_folders(asset_system),
            Request::AssetInfo(request) => inline_requests::asset_info(asset_system, &request),
            Request::RegisterSourceAsset(request) => {
                self.asset_system
                    .register_source_asset_type(request.asset_type, &request.asset_file_filter);
                return;
            }
            Request::UnregisterSourceAsset(request) => {
                self.asset_system
                    .unregister_source_asset_type(request.asset_type);
                return;
            }
            Request::EscalateAsset(request) => {
                inline_requests::escalate(&platform, request, &mut self.incoming_events);
                return;
            }
        };
        self.emitter.send_response(&key, &response);
    }

    fn queue_for_handler(
        &mut self,
        key: RequestKey,
        message: CustomMessage,
        platform: String,
        fencing_failed: bool,
    ) {
        let message_type = message.message_type();
        if !self.handlers.contains(message_type) {
            debug!(
                "no handler for message type {}, dropping request {}",
                message_type, key
            );
            self.incoming_events
                .push_error(AssetServerError::NoHandler { key, message_type });
            return;
        }
        self.queued_requests.push_back(QueuedRequest {
            key,
            message,
            platform,
            fencing_failed,
        });
    }

    fn deliver(&mut self, queued_request: QueuedRequest) {
        let QueuedRequest {
            key,
            message,
            platform,
            fencing_failed,
        } = queued_request;
        let message_type = message.message_type();

        // the handler may have been deregistered since the request was queued
        let Some(handler) = self.handlers.get_mut(message_type) else {
            debug!(
                "handler for message type {} went away, dropping request {}",
                message_type, key
            );
            self.incoming_events
                .push_error(AssetServerError::NoHandler { key, message_type });
            return;
        };
        handler.request_ready(key, message, &platform, fencing_failed, &mut self.emitter);
    }

    fn on_fencing_failed(&mut self, entry: FenceEntry) {
        let FenceEntry {
            key,
            request,
            platform,
        } = entry;
        let message_type = request.message_type();
        self.incoming_events
            .push_error(AssetServerError::FencingFailed { key, message_type });

        match self.config.fencing_failure {
            FencingFailurePolicy::Degrade => {
                warn!(
                    "dispatching {} request {} without fencing",
                    message_type, key
                );
                self.dispatch(key, request, platform, true);
            }
            FencingFailurePolicy::Reject => {
                warn!("rejecting {} request {}, fencing failed", message_type, key);
                if let Some(response) = inline_requests::failure_response(&request) {
                    self.emitter.send_response(&key, &response);
                }
            }
        }
    }
}
