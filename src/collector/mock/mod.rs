//! Scripted `top` sources for testing without a server.

mod scenarios;
mod source;

pub use source::MockTop;
