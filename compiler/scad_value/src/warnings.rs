//! Destinations for warnings raised while combining values.
//!
//! Value operations never fail: a mismatched matrix product or an oversized
//! range expansion yields `Undefined`. The reason is reported through a
//! `WarningSink`, which may be:
//! - Log: `tracing::warn!` (default)
//! - Buffer: captured for later display or test assertions
//! - Callback: forwarded to a host-provided function
//! - Silent: discarded
//!
//! Uses enum dispatch for the built-in sinks; only `Callback` goes through
//! a trait object.

use std::fmt;

use parking_lot::Mutex;

/// Warning sink that collects messages in order.
pub struct BufferWarnings {
    messages: Mutex<Vec<String>>,
}

impl BufferWarnings {
    pub fn new() -> Self {
        BufferWarnings {
            messages: Mutex::new(Vec::new()),
        }
    }

    /// Record one message.
    pub fn push(&self, msg: &str) {
        self.messages.lock().push(msg.to_owned());
    }

    /// All messages recorded so far.
    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().clone()
    }

    /// Remove and return the recorded messages.
    pub fn take(&self) -> Vec<String> {
        std::mem::take(&mut *self.messages.lock())
    }

    pub fn is_empty(&self) -> bool {
        self.messages.lock().is_empty()
    }
}

impl Default for BufferWarnings {
    fn default() -> Self {
        Self::new()
    }
}

/// Where warnings go.
#[derive(Default)]
pub enum WarningSink {
    /// `tracing::warn!` with target `scad_value`.
    #[default]
    Log,
    /// Captures into a buffer.
    Buffer(BufferWarnings),
    /// Host callback, fire-and-forget.
    Callback(Box<dyn Fn(&str)>),
    /// Discards everything.
    Silent,
}

impl WarningSink {
    /// A fresh buffering sink.
    pub fn buffer() -> Self {
        WarningSink::Buffer(BufferWarnings::new())
    }

    pub fn callback(f: impl Fn(&str) + 'static) -> Self {
        WarningSink::Callback(Box::new(f))
    }

    /// Emit one warning.
    pub fn warn(&self, msg: &str) {
        match self {
            Self::Log => tracing::warn!(target: "scad_value", "{msg}"),
            Self::Buffer(buffer) => buffer.push(msg),
            Self::Callback(f) => f(msg),
            Self::Silent => {}
        }
    }

    /// Messages captured so far.
    ///
    /// Empty for sinks that don't capture (log, callback, silent).
    pub fn captured(&self) -> Vec<String> {
        match self {
            Self::Buffer(buffer) => buffer.messages(),
            Self::Log | Self::Callback(_) | Self::Silent => Vec::new(),
        }
    }

    /// Remove and return the messages captured so far.
    pub fn take_captured(&self) -> Vec<String> {
        match self {
            Self::Buffer(buffer) => buffer.take(),
            Self::Log | Self::Callback(_) | Self::Silent => Vec::new(),
        }
    }
}

impl fmt::Debug for WarningSink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Log => write!(f, "Log"),
            Self::Buffer(buffer) => write!(f, "Buffer({} messages)", buffer.messages.lock().len()),
            Self::Callback(_) => write!(f, "Callback"),
            Self::Silent => write!(f, "Silent"),
        }
    }
}

#[cfg(test)]
mod tests;
