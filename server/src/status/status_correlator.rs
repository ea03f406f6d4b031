use std::collections::HashMap;

use log::{debug, info, warn};

use assetlink_shared::{AssetStatus, RequestAssetStatus, RequestKey, Response};

use crate::{
    Events, PendingAssetRequest, PendingState, RequestAssetExists, RequestCompileGroup,
    ResponseEmitter,
};

/// Turns asset status requests into compile-queue and catalog queries and
/// answers each request exactly once.
///
/// A request waits in the pending table from the moment its compile group is
/// requested until a callback produces its answer. Whichever callback
/// answers also removes the entry, so late or repeated callbacks find nothing
/// and are ignored.
#[derive(Default)]
pub struct AssetStatusCorrelator {
    pending_requests: HashMap<RequestKey, PendingAssetRequest>,
}

impl AssetStatusCorrelator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn handle_status_request(
        &mut self,
        key: RequestKey,
        platform: String,
        request: RequestAssetStatus,
        emitter: &mut ResponseEmitter,
        events: &mut Events,
    ) {
        let RequestAssetStatus {
            search_term,
            asset_id,
            is_status_request,
            ..
        } = request;

        if search_term.is_empty() && !asset_id.is_valid() {
            debug!(
                "status request {} names neither a path nor an asset id",
                key
            );
            emitter.send_response(&key, &Response::asset_status(AssetStatus::Unknown));
            return;
        }

        let pending = PendingAssetRequest::new(
            platform.clone(),
            search_term.clone(),
            asset_id,
            is_status_request,
        );
        info!(
            "{} {}",
            if is_status_request {
                "GetAssetStatus:"
            } else {
                "CompileAssetSync:"
            },
            pending
        );
        if self.pending_requests.insert(key, pending).is_some() {
            warn!("status request {} replaces a request with the same key", key);
        }

        events.push_compile_group(RequestCompileGroup {
            key,
            platform,
            search_term,
            asset_id,
            is_status_request,
        });
    }

    pub fn on_compile_group_created(
        &mut self,
        key: &RequestKey,
        status: AssetStatus,
        emitter: &mut ResponseEmitter,
        events: &mut Events,
    ) {
        let Some(pending) = self.pending_requests.get_mut(key) else {
            debug!("compile group created for unknown request {}, ignoring", key);
            return;
        };

        if !status.is_definitive() {
            // not in the queue, it may still have been compiled already
            pending.state = PendingState::AwaitingExistenceCheck;
            events.push_asset_exists(RequestAssetExists {
                key: *key,
                platform: pending.platform.clone(),
                search_term: pending.search_term.clone(),
                asset_id: pending.asset_id,
            });
            return;
        }

        if pending.is_status_request {
            debug!("GetAssetStatus: {} is {:?}", pending, status);
            self.respond(key, status, emitter);
        }
        // otherwise the answer comes with on_compile_group_finished()
    }

    pub fn on_compile_group_finished(
        &mut self,
        key: &RequestKey,
        status: AssetStatus,
        emitter: &mut ResponseEmitter,
        events: &mut Events,
    ) {
        // status requests are usually answered already
        let Some(pending) = self.pending_requests.get_mut(key) else {
            return;
        };

        // the source compiled, that does not mean this product was emitted
        if pending.asset_id.is_valid() {
            pending.state = PendingState::AwaitingExistenceCheck;
            events.push_asset_exists(RequestAssetExists {
                key: *key,
                platform: pending.platform.clone(),
                search_term: pending.search_term.clone(),
                asset_id: pending.asset_id,
            });
            return;
        }

        debug!("compile group finished: {} is {:?}", pending, status);
        self.respond(key, status, emitter);
    }

    pub fn on_asset_exists_response(
        &mut self,
        key: &RequestKey,
        exists: bool,
        emitter: &mut ResponseEmitter,
    ) {
        let Some(pending) = self.pending_requests.get(key) else {
            debug!("existence check answered for unknown request {}, ignoring", key);
            return;
        };

        info!(
            "asset {} is {}",
            pending,
            if exists { "compiled already" } else { "missing" }
        );
        let status = if exists {
            AssetStatus::Compiled
        } else {
            AssetStatus::Missing
        };
        self.respond(key, status, emitter);
    }

    /// Number of status requests still waiting for an answer
    pub fn outstanding_requests(&self) -> usize {
        self.pending_requests.len()
    }

    pub fn pending_request(&self, key: &RequestKey) -> Option<&PendingAssetRequest> {
        self.pending_requests.get(key)
    }

    pub fn clear(&mut self) {
        self.pending_requests.clear();
    }

    fn respond(&mut self, key: &RequestKey, status: AssetStatus, emitter: &mut ResponseEmitter) {
        self.pending_requests.remove(key);
        emitter.send_response(key, &Response::asset_status(status));
    }
}
