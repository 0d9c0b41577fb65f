//! Abstraction over the server session so the sampler can be driven by a
//! real MongoDB connection or by scripted replies in tests.

use mongodb::bson::Document;

use super::CollectError;

/// Source of raw `top` replies.
///
/// The real implementation is [`super::MongoSource`]; tests use
/// [`super::mock::MockTop`].
pub trait TopSource: Send {
    /// Issues `{top: 1}` against the `admin` database and returns the reply
    /// document as received.
    fn run_top(&mut self) -> Result<Document, CollectError>;

    /// Human-readable description of the endpoint, for logs.
    fn describe(&self) -> String {
        String::from("top source")
    }
}
