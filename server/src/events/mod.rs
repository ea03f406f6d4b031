mod events;

pub use events::{
    AssetExistsEvent, CompileGroupEvent, ErrorEvent, EscalateAsset, EscalateEvent, Event, Events,
    RequestAssetExists, RequestCompileGroup,
};
