//! rerun-storage: the durable tracking store, the local fallback cache,
//! and the remote durable mirror.

#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

mod error;
mod fallback;
mod mirror;
mod queue_view;
mod store;

pub use error::StoreError;
pub use fallback::FallbackCache;
pub use mirror::{RemoteMirror, DEFAULT_MIRROR_PATH};
pub use queue_view::JobTrackingQueue;
pub use store::{OnConflict, TrackingStore};
