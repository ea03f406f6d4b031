use std::{mem, vec::IntoIter};

use assetlink_shared::{AssetId, RequestKey, Uuid};

use crate::AssetServerError;

/// Asks the compile queue to create or locate the compile group for an asset.
/// Answered through `AssetRequestServer::on_compile_group_created()` and
/// `on_compile_group_finished()` with the same key.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RequestCompileGroup {
    pub key: RequestKey,
    pub platform: String,
    pub search_term: String,
    pub asset_id: AssetId,
    pub is_status_request: bool,
}

/// Asks the catalog whether an asset exists on disk. Answered through
/// `AssetRequestServer::on_asset_exists_response()` with the same key.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RequestAssetExists {
    pub key: RequestKey,
    pub platform: String,
    pub search_term: String,
    pub asset_id: AssetId,
}

/// Priority bump for the compile job of one asset. Nothing is sent back to
/// the client.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EscalateAsset {
    ByUuid { platform: String, asset_uuid: Uuid },
    BySearchTerm { platform: String, search_term: String },
}

/// Everything the server produced for its collaborators since the last call
/// to `AssetRequestServer::receive()`
pub struct Events {
    compile_groups: Vec<RequestCompileGroup>,
    asset_exists: Vec<RequestAssetExists>,
    escalations: Vec<EscalateAsset>,
    errors: Vec<AssetServerError>,

    empty: bool,
}

impl Default for Events {
    fn default() -> Self {
        Self::new()
    }
}

impl Events {
    pub(crate) fn new() -> Self {
        Self {
            compile_groups: Vec::new(),
            asset_exists: Vec::new(),
            escalations: Vec::new(),
            errors: Vec::new(),

            empty: true,
        }
    }

    // Public

    pub fn is_empty(&self) -> bool {
        self.empty
    }

    pub fn read<V: Event>(&mut self) -> V::Iter {
        V::iter(self)
    }

    pub fn has<V: Event>(&self) -> bool {
        V::has(self)
    }

    // Crate-public

    pub(crate) fn push_compile_group(&mut self, request: RequestCompileGroup) {
        self.compile_groups.push(request);
        self.empty = false;
    }

    pub(crate) fn push_asset_exists(&mut self, request: RequestAssetExists) {
        self.asset_exists.push(request);
        self.empty = false;
    }

    pub(crate) fn push_escalation(&mut self, escalation: EscalateAsset) {
        self.escalations.push(escalation);
        self.empty = false;
    }

    pub(crate) fn push_error(&mut self, error: AssetServerError) {
        self.errors.push(error);
        self.empty = false;
    }
}

// Event Trait
pub trait Event {
    type Iter;

    fn iter(events: &mut Events) -> Self::Iter;

    fn has(events: &Events) -> bool;
}

// Compile Group Event
pub struct CompileGroupEvent;
impl Event for CompileGroupEvent {
    type Iter = IntoIter<RequestCompileGroup>;

    fn iter(events: &mut Events) -> Self::Iter {
        let list = mem::take(&mut events.compile_groups);
        IntoIterator::into_iter(list)
    }

    fn has(events: &Events) -> bool {
        !events.compile_groups.is_empty()
    }
}

// Asset Exists Event
pub struct AssetExistsEvent;
impl Event for AssetExistsEvent {
    type Iter = IntoIter<RequestAssetExists>;

    fn iter(events: &mut Events) -> Self::Iter {
        let list = mem::take(&mut events.asset_exists);
        IntoIterator::into_iter(list)
    }

    fn has(events: &Events) -> bool {
        !events.asset_exists.is_empty()
    }
}

// Escalate Event
pub struct EscalateEvent;
impl Event for EscalateEvent {
    type Iter = IntoIter<EscalateAsset>;

    fn iter(events: &mut Events) -> Self::Iter {
        let list = mem::take(&mut events.escalations);
        IntoIterator::into_iter(list)
    }

    fn has(events: &Events) -> bool {
        !events.escalations.is_empty()
    }
}

// Error Event
pub struct ErrorEvent;
impl Event for ErrorEvent {
    type Iter = IntoIter<AssetServerError>;

    fn iter(events: &mut Events) -> Self::Iter {
        let list = mem::take(&mut events.errors);
        IntoIterator::into_iter(list)
    }

    fn has(events: &Events) -> bool {
        !events.errors.is_empty()
    }
}
