//! Main monitor loop: sample, diff, render, sleep.

use std::convert::Infallible;
use std::io::{self, Write};
use std::time::Duration;

use chrono::Local;
use tracing::{info, trace};

use crate::collector::{CollectError, Sampler, TopSource};
use crate::models::{DisplayMode, EventKind, Snapshot};
use crate::rates::diff;

use super::input::InputDrainer;
use super::render::{FrameLayout, Renderer};

/// Fatal conditions that end the monitor.
#[derive(Debug)]
pub enum AppError {
    /// The server could not be reached at startup.
    Connect(CollectError),
    /// A tick's sample failed.
    Sampling(CollectError),
    /// Reading stdin failed in the input drainer.
    Input(io::Error),
    /// Writing a frame failed.
    Output(io::Error),
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppError::Connect(e) => write!(f, "{}", e),
            AppError::Sampling(e) => write!(f, "sampling failed: {}", e),
            AppError::Input(e) => write!(f, "reading terminal input: {}", e),
            AppError::Output(e) => write!(f, "writing to terminal: {}", e),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Connect(e) | AppError::Sampling(e) => Some(e),
            AppError::Input(e) | AppError::Output(e) => Some(e),
        }
    }
}

/// User-facing settings of the monitor.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Sort key as typed; resolved with [`EventKind::from_sort_key`].
    pub sort_key: String,
    pub limit: usize,
    pub mode: DisplayMode,
    /// Pause between ticks.
    pub interval: Duration,
}

/// The monitor: owns the sampler, the previous snapshot and the renderer.
pub struct App<S: TopSource, W: Write> {
    sampler: Sampler<S>,
    renderer: Renderer,
    out: W,
    sort_by: Option<EventKind>,
    mode: DisplayMode,
    interval: Duration,
    prior: Option<Snapshot>,
    first: bool,
}

impl<S: TopSource, W: Write> App<S, W> {
    pub fn new(sampler: Sampler<S>, settings: Settings, out: W) -> Self {
        let sort_by = EventKind::from_sort_key(&settings.sort_key);
        let renderer = Renderer::new(FrameLayout {
            sort_key: settings.sort_key,
            limit: settings.limit,
            mode: settings.mode,
        });
        Self {
            sampler,
            renderer,
            out,
            sort_by,
            mode: settings.mode,
            interval: settings.interval,
            prior: None,
            first: true,
        }
    }

    /// Event the sort key resolved to, `None` if it did not resolve.
    pub fn sort_by(&self) -> Option<EventKind> {
        self.sort_by
    }

    /// One tick without the sleep.
    ///
    /// The very first tick only records a baseline; returns whether a frame
    /// was drawn.
    pub fn tick(&mut self) -> Result<bool, AppError> {
        let current = self.sampler.sample().map_err(AppError::Sampling)?;

        let Some(prior) = self.prior.take() else {
            trace!(namespaces = current.len(), "baseline snapshot recorded");
            self.prior = Some(current);
            return Ok(false);
        };

        let deltas = diff(&prior, &current, self.sort_by, self.mode);
        self.renderer
            .render(&mut self.out, &deltas, self.first, &Local::now())
            .map_err(AppError::Output)?;
        self.first = false;
        self.prior = Some(current);

        Ok(true)
    }

    /// Runs until a fatal error. Never returns otherwise.
    pub fn run(mut self, input: &mut InputDrainer) -> Result<Infallible, AppError> {
        info!(
            source = %self.sampler.source().describe(),
            interval_ms = self.interval.as_millis() as u64,
            "monitor started"
        );
        loop {
            self.tick()?;
            input.wait(self.interval).map_err(AppError::Input)?;
        }
    }

    pub fn output(&self) -> &W {
        &self.out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collector::mock::MockTop;
    use std::io::Cursor;

    fn settings(sort_key: &str, limit: usize, mode: DisplayMode) -> Settings {
        Settings {
            sort_key: sort_key.to_string(),
            limit,
            mode,
            interval: Duration::ZERO,
        }
    }

    fn app(mock: MockTop, settings: Settings) -> App<MockTop, Vec<u8>> {
        App::new(Sampler::new(mock), settings, Vec::new())
    }

    fn text(app: &App<MockTop, Vec<u8>>) -> String {
        String::from_utf8(app.output().clone()).unwrap()
    }

    #[test]
    fn first_tick_is_baseline_only() {
        let mut app = app(MockTop::steady_load(), settings("total", 20, DisplayMode::Count));
        assert!(!app.tick().unwrap());
        assert!(app.output().is_empty());
        assert!(app.tick().unwrap());
        assert!(!app.output().is_empty());
    }

    #[test]
    fn frames_sorted_by_selected_event() {
        let mut app = app(MockTop::steady_load(), settings("insert", 20, DisplayMode::Count));
        app.tick().unwrap();
        app.tick().unwrap();

        let out = text(&app);
        let rows: Vec<&str> = out.lines().skip(2).collect();
        assert_eq!(rows.len(), 2);
        // orders: total +5, wlock +5, insert +5; users: total +7, rlock +7, query +7
        assert_eq!(rows[0], "\x1b[2K5\t0\t5\t0\t5\t0\t0\t0\t0\tshop.orders");
        assert_eq!(rows[1], "\x1b[2K7\t7\t0\t7\t0\t0\t0\t0\t0\tshop.users");
    }

    #[test]
    fn time_mode_frames() {
        let mut app = app(MockTop::steady_load(), settings("total", 20, DisplayMode::Time));
        app.tick().unwrap();
        app.tick().unwrap();

        let out = text(&app);
        assert!(out.contains("sort: total time(ms)"));
        let rows: Vec<&str> = out.lines().skip(2).collect();
        // users: total time +3000us = 3ms; orders: +2000us = 2ms
        assert!(rows[0].ends_with("shop.users"));
        assert!(rows[0].starts_with("\x1b[2K3\t2\t0\t2\t"));
        assert!(rows[1].ends_with("shop.orders"));
    }

    #[test]
    fn second_frame_repaints_in_place() {
        let mut app = app(MockTop::steady_load(), settings("total", 3, DisplayMode::Count));
        app.tick().unwrap();
        app.tick().unwrap();
        let first_len = app.output().len();
        app.tick().unwrap();

        let first = String::from_utf8(app.output()[..first_len].to_vec()).unwrap();
        let second = String::from_utf8(app.output()[first_len..].to_vec()).unwrap();
        assert!(!first.contains("\x1b[5A"));
        assert!(second.starts_with("\x1b[5A\r"));
    }

    #[test]
    fn new_namespaces_wait_a_tick() {
        let mut app = app(MockTop::namespace_churn(), settings("total", 20, DisplayMode::Count));
        app.tick().unwrap();
        app.tick().unwrap();

        let out = text(&app);
        let rows: Vec<&str> = out.lines().skip(2).collect();
        assert_eq!(rows, vec!["\x1b[2K0\t0\t0\t0\t0\t0\t0\t0\t0\tapp.kept"]);
    }

    #[test]
    fn restart_renders_negative_deltas() {
        let mut app = app(MockTop::restarted_server(), settings("command", 20, DisplayMode::Count));
        app.tick().unwrap();
        app.tick().unwrap();

        let out = text(&app);
        assert!(out.contains("-897\t0\t0\t0\t0\t0\t0\t0\t-897\tadmin.$cmd"));
    }

    #[test]
    fn unresolved_sort_key_still_renders() {
        let mut app = app(MockTop::steady_load(), settings("latency", 20, DisplayMode::Count));
        assert_eq!(app.sort_by(), None);
        app.tick().unwrap();
        app.tick().unwrap();

        let out = text(&app);
        assert!(out.contains("sort: latency event count"));
        let rows: Vec<&str> = out.lines().skip(2).collect();
        assert!(rows[0].ends_with("shop.orders"));
        assert!(rows[1].ends_with("shop.users"));
    }

    #[test]
    fn server_refusal_is_fatal() {
        let mut mock = MockTop::default();
        mock.push(mongodb::bson::doc! { "totals": {}, "ok": 1 });
        mock.push(mongodb::bson::doc! { "ok": 0, "errmsg": "not authorized on admin" });

        let mut app = app(mock, settings("total", 20, DisplayMode::Count));
        assert!(!app.tick().unwrap());
        let err = app.tick().unwrap_err();
        assert!(matches!(err, AppError::Sampling(CollectError::NotOk(_))));
        assert!(err.to_string().starts_with("sampling failed: server refused top"));
    }

    #[test]
    fn run_stops_on_sampling_error() {
        let app = app(MockTop::steady_load(), settings("total", 20, DisplayMode::Count));
        let mut input = InputDrainer::spawn_with(Cursor::new(""), io::sink()).unwrap();

        let Err(err) = app.run(&mut input);
        assert!(matches!(err, AppError::Sampling(CollectError::Command(_))));
    }
}
