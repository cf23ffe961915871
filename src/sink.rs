//! Event sinks that receive driver output

use crate::cursor_types::{CursorEvent, Phase};
use crate::error::Result;
use indicatif::ProgressBar;
use serde::Serialize;
use std::io::Write;

/// Region name the montage engine routes cursor events to by default
pub const DEFAULT_REGION: &str = "A";

/// Receiver for synthetic cursor events
pub trait CursorSink {
    fn submit(&mut self, event: &CursorEvent) -> Result<()>;
}

impl<S: CursorSink + ?Sized> CursorSink for &mut S {
    fn submit(&mut self, event: &CursorEvent) -> Result<()> {
        (**self).submit(event)
    }
}

impl<S: CursorSink + ?Sized> CursorSink for Box<S> {
    fn submit(&mut self, event: &CursorEvent) -> Result<()> {
        (**self).submit(event)
    }
}

/// Writes each event as one JSON object per line
pub struct JsonLinesSink<W: Write> {
    writer: W,
}

impl<W: Write> JsonLinesSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> CursorSink for JsonLinesSink<W> {
    fn submit(&mut self, event: &CursorEvent) -> Result<()> {
        serde_json::to_writer(&mut self.writer, event)?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()?;
        Ok(())
    }
}

/// Subscribed-event arguments in the shape the montage engine parses:
/// every value is a string, and the phase is folded into the event name.
#[derive(Debug, Serialize)]
struct MontageArgs<'a> {
    event: String,
    region: &'a str,
    id: &'a str,
    x: String,
    y: String,
    z: String,
}

/// Writes events as montage `cursor_down` / `cursor_up` argument maps
pub struct MontageSink<W: Write> {
    writer: W,
    region: String,
}

impl<W: Write> MontageSink<W> {
    #[cfg(test)]
    pub fn new(writer: W) -> Self {
        Self::with_region(writer, DEFAULT_REGION)
    }

    pub fn with_region(writer: W, region: impl Into<String>) -> Self {
        Self {
            writer,
            region: region.into(),
        }
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> CursorSink for MontageSink<W> {
    fn submit(&mut self, event: &CursorEvent) -> Result<()> {
        let args = MontageArgs {
            event: format!("cursor_{}", event.phase.as_str()),
            region: &self.region,
            id: &event.id,
            x: event.x.to_string(),
            y: event.y.to_string(),
            z: event.z.to_string(),
        };
        serde_json::to_writer(&mut self.writer, &args)?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()?;
        Ok(())
    }
}

/// Keeps a copy of every event, optionally forwarding to an inner sink
#[derive(Default)]
pub struct RecordingSink {
    events: Vec<CursorEvent>,
    inner: Option<Box<dyn CursorSink>>,
}

impl RecordingSink {
    #[cfg(test)]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record events after they have been accepted by `inner`
    pub fn forwarding(inner: Box<dyn CursorSink>) -> Self {
        Self {
            events: Vec::new(),
            inner: Some(inner),
        }
    }

    #[cfg(test)]
    pub fn events(&self) -> &[CursorEvent] {
        &self.events
    }

    pub fn into_events(self) -> Vec<CursorEvent> {
        self.events
    }
}

impl CursorSink for RecordingSink {
    fn submit(&mut self, event: &CursorEvent) -> Result<()> {
        if let Some(inner) = self.inner.as_mut() {
            inner.submit(event)?;
        }
        self.events.push(event.clone());
        Ok(())
    }
}

/// Forwards to `inner` and advances a progress bar once per completed pair
pub struct ProgressSink<S> {
    inner: S,
    bar: ProgressBar,
}

impl<S: CursorSink> ProgressSink<S> {
    pub fn new(inner: S, bar: ProgressBar) -> Self {
        Self { inner, bar }
    }

    pub fn finish(self) -> S {
        self.bar.finish_and_clear();
        self.inner
    }
}

impl<S: CursorSink> CursorSink for ProgressSink<S> {
    fn submit(&mut self, event: &CursorEvent) -> Result<()> {
        if let Err(e) = self.inner.submit(event) {
            self.bar.finish_and_clear();
            return Err(e);
        }
        if event.phase == Phase::Release {
            self.bar.inc(1);
        }
        Ok(())
    }
}
