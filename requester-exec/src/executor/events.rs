use std::path::PathBuf;

use async_trait::async_trait;
use requester_core::types::InputSpec;
use requester_core::Resolved;

/// Callbacks issued to the presentation layer while a chain runs.
#[derive(Debug, Clone)]
pub enum Event {
    PromptInputs {
        endpoint: String,
        inputs: Vec<InputSpec>,
    },
    RenderOutput {
        outputs: Vec<Resolved>,
    },
    DeliverFile {
        path: PathBuf,
    },
    ShowEndpointList,
    ReportError {
        message: String,
        fatal: bool,
    },
}

impl Event {
    pub fn kind(&self) -> &'static str {
        match self {
            Event::PromptInputs { .. } => "prompt_inputs",
            Event::RenderOutput { .. } => "render_output",
            Event::DeliverFile { .. } => "deliver_file",
            Event::ShowEndpointList => "show_endpoint_list",
            Event::ReportError { .. } => "report_error",
        }
    }
}

#[async_trait]
pub trait EventSink: Send + Sync {
    async fn emit(&self, event: Event);
}

pub struct CompositeEventSink {
    sinks: Vec<Box<dyn EventSink>>,
}

impl Default for CompositeEventSink {
    fn default() -> Self {
        Self::new()
    }
}

impl CompositeEventSink {
    pub fn new() -> Self {
        Self { sinks: Vec::new() }
    }

    pub fn add(&mut self, sink: Box<dyn EventSink>) {
        self.sinks.push(sink);
    }
}

#[async_trait]
impl EventSink for CompositeEventSink {
    async fn emit(&self, event: Event) {
        for sink in &self.sinks {
            sink.emit(event.clone()).await;
        }
    }
}

/// Writes every event to the `tracing` subscriber.
pub struct LogEventSink;

#[async_trait]
impl EventSink for LogEventSink {
    async fn emit(&self, event: Event) {
        match event {
            Event::PromptInputs { endpoint, inputs } => {
                let names: Vec<&str> = inputs.iter().map(|i| i.name.as_str()).collect();
                tracing::info!(%endpoint, inputs = ?names, "awaiting inputs");
            }
            Event::RenderOutput { outputs } => {
                for out in &outputs {
                    tracing::info!(output = %out.name, value = %out.value.display(), "output");
                }
            }
            Event::DeliverFile { path } => {
                tracing::info!(path = %path.display(), "file delivered");
            }
            Event::ShowEndpointList => tracing::debug!("returning to endpoint list"),
            Event::ReportError { message, fatal: true } => tracing::error!("{message}"),
            Event::ReportError { message, fatal: false } => tracing::warn!("{message}"),
        }
    }
}

pub struct NoOpEventSink;

#[async_trait]
impl EventSink for NoOpEventSink {
    async fn emit(&self, _event: Event) {}
}
