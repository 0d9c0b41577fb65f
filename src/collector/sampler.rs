//! Sampler: turns raw `top` replies into snapshots.

use std::time::{Duration, Instant};

use tracing::debug;

use super::decode::decode_top_reply;
use super::{CollectError, TopSource};
use crate::models::Snapshot;

/// Issues `top` through a [`TopSource`] and decodes the reply.
///
/// The source is owned exclusively; the sampler is the only user of the
/// server session.
pub struct Sampler<S: TopSource> {
    source: S,
    samples: u64,
    last_duration: Option<Duration>,
}

impl<S: TopSource> Sampler<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            samples: 0,
            last_duration: None,
        }
    }

    /// Takes one snapshot.
    ///
    /// Transport failures, decode failures and `ok != 1` replies are all
    /// reported as errors.
    pub fn sample(&mut self) -> Result<Snapshot, CollectError> {
        let start = Instant::now();
        let reply = self.source.run_top()?;
        let snapshot = decode_top_reply(reply)?;
        let elapsed = start.elapsed();

        self.samples += 1;
        self.last_duration = Some(elapsed);
        debug!(
            sample = self.samples,
            namespaces = snapshot.len(),
            elapsed_ms = elapsed.as_millis() as u64,
            "top sampled"
        );

        Ok(snapshot)
    }

    /// Number of successful samples so far.
    pub fn samples(&self) -> u64 {
        self.samples
    }

    /// Round-trip time of the last successful sample.
    pub fn last_duration(&self) -> Option<Duration> {
        self.last_duration
    }

    pub fn source(&self) -> &S {
        &self.source
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collector::mock::MockTop;
    use crate::models::{Counter, EventKind};
    use mongodb::bson::doc;

    #[test]
    fn test_sample_decodes_reply() {
        let mut sampler = Sampler::new(MockTop::new(vec![MockTop::reply(&[(
            "db.c",
            &[(EventKind::Total, 100, 10)],
        )])]));

        let snap = sampler.sample().unwrap();
        assert_eq!(
            snap.get("db.c").unwrap().get(EventKind::Total),
            Counter::new(100, 10)
        );
        assert_eq!(sampler.samples(), 1);
        assert!(sampler.last_duration().is_some());
    }

    #[test]
    fn test_ok_zero_fails() {
        let mut sampler = Sampler::new(MockTop::new(vec![doc! { "totals": {}, "ok": 0 }]));
        let err = sampler.sample().unwrap_err();
        assert!(matches!(err, CollectError::NotOk(_)));
        assert_eq!(sampler.samples(), 0);
    }

    #[test]
    fn test_transport_error_propagates() {
        let mut sampler = Sampler::new(MockTop::failing(CollectError::Command(
            "connection reset".to_string(),
        )));
        let err = sampler.sample().unwrap_err();
        assert_eq!(err, CollectError::Command("connection reset".to_string()));
    }
}
