//! Acquisition of `top` counters from the server.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────┐
//! │                 Sampler                  │
//! │   run_top() ──► decode ──► Snapshot      │
//! └─────────┬────────────────────────────────┘
//!           │
//!    ┌──────▼──────┐
//!    │  TopSource  │ (trait)
//!    └──────┬──────┘
//!           │
//!     ┌─────┴───────────┐
//!     │                 │
//! ┌───▼─────────┐ ┌─────▼──────┐
//! │ MongoSource │ │  MockTop   │
//! │ (sync       │ │ (scripted  │
//! │  driver)    │ │  replies)  │
//! └─────────────┘ └────────────┘
//! ```
//!
//! # Usage
//!
//! ```
//! use mgotop::collector::{Sampler, mock::MockTop};
//!
//! let mut sampler = Sampler::new(MockTop::steady_load());
//! let snapshot = sampler.sample().unwrap();
//! assert_eq!(snapshot.len(), 2);
//! ```

pub mod decode;
mod error;
pub mod mock;
mod mongo;
mod sampler;
pub mod traits;

pub use decode::decode_top_reply;
pub use error::CollectError;
pub use mongo::MongoSource;
pub use sampler::Sampler;
pub use traits::TopSource;
