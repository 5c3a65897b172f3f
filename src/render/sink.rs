use std::io::{self, Write};
use std::sync::{Arc, Mutex, PoisonError};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

const ENABLE_LOGS: bool = true;

use crate::log_warn;

/// Handle to an output previously appended to a sink.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DisplayId(String);

impl DisplayId {
    pub fn new() -> Self {
        Self(Uuid::new_v4().simple().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for DisplayId {
    fn default() -> Self {
        Self::new()
    }
}

/// The host output surface. Calls are applied in the order they are made and
/// are assumed to succeed.
pub trait RenderSink: Send + Sync {
    /// Appends a new output and returns a handle for later replacement.
    fn display(&self, html: &str) -> DisplayId;

    /// Replaces the output shown under `id`.
    fn update(&self, id: &DisplayId, html: &str);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderEvent {
    Display { id: DisplayId, html: String },
    Update { id: DisplayId, html: String },
}

impl RenderEvent {
    pub fn id(&self) -> &DisplayId {
        match self {
            RenderEvent::Display { id, .. } | RenderEvent::Update { id, .. } => id,
        }
    }

    pub fn html(&self) -> &str {
        match self {
            RenderEvent::Display { html, .. } | RenderEvent::Update { html, .. } => html,
        }
    }

    /// Body of the event when it is a single `<script>` element.
    pub fn script(&self) -> Option<&str> {
        self.html()
            .strip_prefix("<script>")
            .and_then(|rest| rest.strip_suffix("</script>"))
    }
}

/// Keeps every render call in memory. Clones share the same log.
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    events: Arc<Mutex<Vec<RenderEvent>>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<RenderEvent> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Script bodies in emission order, across all display slots.
    pub fn scripts(&self) -> Vec<String> {
        self.events()
            .iter()
            .filter_map(|event| event.script().map(str::to_string))
            .collect()
    }

    pub fn clear(&self) {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    fn push(&self, event: RenderEvent) {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event);
    }
}

impl RenderSink for RecordingSink {
    fn display(&self, html: &str) -> DisplayId {
        let id = DisplayId::new();
        self.push(RenderEvent::Display {
            id: id.clone(),
            html: html.to_string(),
        });
        id
    }

    fn update(&self, id: &DisplayId, html: &str) {
        self.push(RenderEvent::Update {
            id: id.clone(),
            html: html.to_string(),
        });
    }
}

/// Writes HTML outputs using the evcxr Jupyter kernel's content markers.
/// The kernel has no in-place replacement, so updates are appended too.
pub struct NotebookSink<W: Write + Send> {
    out: Mutex<W>,
}

impl NotebookSink<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write + Send> NotebookSink<W> {
    pub fn new(out: W) -> Self {
        Self {
            out: Mutex::new(out),
        }
    }

    pub fn into_inner(self) -> W {
        self.out.into_inner().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_html(&self, html: &str) {
        let mut out = self.out.lock().unwrap_or_else(PoisonError::into_inner);
        let result = writeln!(out, "EVCXR_BEGIN_CONTENT text/html\n{html}\nEVCXR_END_CONTENT")
            .and_then(|_| out.flush());
        if let Err(err) = result {
            log_warn!("failed to write notebook output: {}", err);
        }
    }
}

impl<W: Write + Send> RenderSink for NotebookSink<W> {
    fn display(&self, html: &str) -> DisplayId {
        self.write_html(html);
        DisplayId::new()
    }

    fn update(&self, _id: &DisplayId, html: &str) {
        self.write_html(html);
    }
}
