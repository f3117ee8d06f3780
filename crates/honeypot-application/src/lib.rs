//! Application layer: keeps the client's local view consistent with the
//! remote session store.

pub mod synchronizer;

pub use synchronizer::{
    CONNECTION_ERROR_REPLY, DeleteOutcome, LoadOutcome, RefreshOutcome, SendOutcome,
    SessionSynchronizer, Viewport,
};
