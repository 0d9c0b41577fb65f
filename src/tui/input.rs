//! Input drainer: keeps echoed keystrokes from scrolling the display.
//!
//! The terminal stays in cooked mode, so a user pressing Enter echoes a
//! newline that would push the whole table down one line. A background
//! thread reads stdin line by line and, for every newline, moves the cursor
//! back up and erases that line.

use std::io::{self, BufRead, BufReader, Write};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::thread;
use std::time::{Duration, Instant};

use crossterm::cursor::MoveUp;
use crossterm::queue;
use crossterm::style::Print;
use crossterm::terminal::{Clear, ClearType};
use tracing::debug;

/// Bytes undoing one echoed newline: cursor up, erase line, column 1.
pub fn erase_sequence() -> io::Result<Vec<u8>> {
    let mut seq = Vec::with_capacity(12);
    queue!(seq, MoveUp(1), Clear(ClearType::CurrentLine), Print('\r'))?;
    Ok(seq)
}

/// Reads `reader` to EOF, writing [`erase_sequence`] to `out` for every
/// complete line. Returns the number of lines erased.
///
/// Only the erase sequence is ever written. Input is consumed as raw
/// bytes, so non-UTF-8 keystrokes are not an error.
pub fn drain<R: BufRead, W: Write>(mut reader: R, out: &mut W) -> io::Result<u64> {
    let seq = erase_sequence()?;
    let mut buf = Vec::new();
    let mut lines = 0;

    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            return Ok(lines);
        }
        if buf.last() == Some(&b'\n') {
            out.write_all(&seq)?;
            out.flush()?;
            lines += 1;
        }
    }
}

/// Handle to the background drain thread.
///
/// The thread owns stdin for the rest of the process. A read or write
/// failure is reported through [`InputDrainer::wait`]; EOF just stops the
/// thread.
pub struct InputDrainer {
    errors: Receiver<io::Error>,
    closed: bool,
}

impl InputDrainer {
    /// Starts draining the process's stdin, erasing on stdout.
    pub fn spawn() -> io::Result<Self> {
        Self::spawn_with(BufReader::new(io::stdin()), io::stdout())
    }

    /// Starts draining `reader`, erasing on `out`.
    pub fn spawn_with<R, W>(reader: R, mut out: W) -> io::Result<Self>
    where
        R: BufRead + Send + 'static,
        W: Write + Send + 'static,
    {
        let (tx, rx) = mpsc::channel();

        thread::Builder::new()
            .name("mgotop-input".to_string())
            .spawn(move || match drain(reader, &mut out) {
                Ok(lines) => debug!(lines, "stdin closed, input drainer stopped"),
                Err(e) => {
                    let _ = tx.send(e);
                }
            })?;

        Ok(Self {
            errors: rx,
            closed: false,
        })
    }

    /// Sleeps for `timeout`, returning early only if the drainer failed.
    pub fn wait(&mut self, timeout: Duration) -> io::Result<()> {
        let deadline = Instant::now() + timeout;

        if !self.closed {
            match self.errors.recv_timeout(timeout) {
                Ok(err) => return Err(err),
                Err(RecvTimeoutError::Timeout) => return Ok(()),
                Err(RecvTimeoutError::Disconnected) => self.closed = true,
            }
        }

        thread::sleep(deadline.saturating_duration_since(Instant::now()));
        Ok(())
    }

    /// `true` once the drain thread has stopped.
    pub fn is_closed(&self) -> bool {
        self.closed
    }
}
