//! Frame rendering with in-place repaint.
//!
//! A frame is: banner, column header, then up to `limit` data rows. The
//! first frame is printed where the cursor is. Every later frame first moves
//! the cursor up over the previous one (`limit + 2` lines) and overwrites it,
//! erasing each line before writing so shorter lines leave no stale suffix.
//! When a frame has fewer rows than `limit`, rows of the previous frame below
//! it stay on screen.

use std::io::{self, Write};

use chrono::{DateTime, TimeZone};
use crossterm::cursor::MoveUp;
use crossterm::queue;
use crossterm::style::{Attribute, Print, SetAttribute};
use crossterm::terminal::{Clear, ClearType};

use crate::fmt::{format_banner, format_header, format_row, format_timestamp};
use crate::models::{Delta, DisplayMode};

/// What every frame looks like, fixed for the lifetime of the monitor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameLayout {
    /// Sort key as typed by the user, shown in the banner.
    pub sort_key: String,
    /// Maximum number of data rows.
    pub limit: usize,
    pub mode: DisplayMode,
}

impl FrameLayout {
    /// Lines occupied by a full frame: banner, header and `limit` rows.
    pub fn height(&self) -> usize {
        self.limit.saturating_add(2)
    }
}

/// Writes frames to a terminal.
///
/// Frames are assembled in an internal buffer and flushed with a single
/// `write_all`, so a frame is never interleaved with other writers holding
/// the same stdout.
pub struct Renderer {
    layout: FrameLayout,
    buf: Vec<u8>,
    frames: u64,
}

impl Renderer {
    pub fn new(layout: FrameLayout) -> Self {
        Self {
            layout,
            buf: Vec::with_capacity(4096),
            frames: 0,
        }
    }

    pub fn layout(&self) -> &FrameLayout {
        &self.layout
    }

    /// Number of frames written so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Renders one frame of `deltas` (already sorted) to `out`.
    ///
    /// `first` suppresses the cursor-up repositioning.
    pub fn render<W, Tz>(
        &mut self,
        out: &mut W,
        deltas: &[Delta],
        first: bool,
        at: &DateTime<Tz>,
    ) -> io::Result<()>
    where
        W: Write,
        Tz: TimeZone,
        Tz::Offset: std::fmt::Display,
    {
        self.buf.clear();
        write_frame(&mut self.buf, &self.layout, deltas, first, &format_timestamp(at))?;
        out.write_all(&self.buf)?;
        out.flush()?;
        self.frames += 1;
        Ok(())
    }
}

/// Writes one frame's bytes to `w`.
pub fn write_frame<W: Write>(
    w: &mut W,
    layout: &FrameLayout,
    deltas: &[Delta],
    first: bool,
    timestamp: &str,
) -> io::Result<()> {
    if !first {
        let up = u16::try_from(layout.height()).unwrap_or(u16::MAX);
        queue!(w, MoveUp(up), Print('\r'))?;
    }

    queue!(
        w,
        Clear(ClearType::CurrentLine),
        SetAttribute(Attribute::Bold),
        Print(format_banner(&layout.sort_key, layout.mode, timestamp)),
        SetAttribute(Attribute::Reset),
        Print('\n'),
        Clear(ClearType::CurrentLine),
        Print(format_header()),
        Print('\n'),
    )?;

    for delta in deltas.iter().take(layout.limit) {
        queue!(
            w,
            Clear(ClearType::CurrentLine),
            Print(format_row(delta)),
            Print('\n')
        )?;
    }

    Ok(())
}
