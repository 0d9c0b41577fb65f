//! Data model shared by the sampler, the differ and the renderer.

mod delta;
mod event;
mod snapshot;

pub use delta::{Delta, DisplayMode};
pub use event::EventKind;
pub use snapshot::{Counter, NamespaceStats, Snapshot};
