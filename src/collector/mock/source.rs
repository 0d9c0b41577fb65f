use std::collections::VecDeque;

use mongodb::bson::{Document, doc};

use crate::collector::{CollectError, TopSource};
use crate::models::EventKind;

/// A [`TopSource`] that replays a fixed list of replies.
///
/// Once the script is exhausted every call fails with
/// [`CollectError::Command`], which is how a dropped session looks to the
/// sampler.
#[derive(Debug, Default)]
pub struct MockTop {
    replies: VecDeque<Result<Document, CollectError>>,
    calls: usize,
}

impl MockTop {
    pub fn new(replies: Vec<Document>) -> Self {
        Self {
            replies: replies.into_iter().map(Ok).collect(),
            calls: 0,
        }
    }

    /// A source whose first call fails with `err`.
    pub fn failing(err: CollectError) -> Self {
        let mut mock = Self::default();
        mock.replies.push_back(Err(err));
        mock
    }

    /// Appends a reply to the script.
    pub fn push(&mut self, reply: Document) {
        self.replies.push_back(Ok(reply));
    }

    /// Appends a failure to the script.
    pub fn push_error(&mut self, err: CollectError) {
        self.replies.push_back(Err(err));
    }

    /// Number of `run_top` calls made so far.
    pub fn calls(&self) -> usize {
        self.calls
    }

    /// Builds an `ok: 1` reply. Each namespace lists `(event, time, count)`
    /// triples; unlisted events are omitted from the document.
    pub fn reply(namespaces: &[(&str, &[(EventKind, i64, i64)])]) -> Document {
        let mut totals = doc! { "note": "all times in microseconds" };
        for (namespace, events) in namespaces {
            let mut stats = Document::new();
            for (kind, time, count) in events.iter() {
                stats.insert(kind.wire_name(), doc! { "time": *time, "count": *count });
            }
            totals.insert(*namespace, stats);
        }
        doc! { "totals": totals, "ok": 1.0 }
    }
}

impl TopSource for MockTop {
    fn run_top(&mut self) -> Result<Document, CollectError> {
        self.calls += 1;
        self.replies
            .pop_front()
            .unwrap_or_else(|| Err(CollectError::Command("mock script exhausted".to_string())))
    }

    fn describe(&self) -> String {
        format!("mock ({} replies left)", self.replies.len())
    }
}
