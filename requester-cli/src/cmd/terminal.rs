use std::path::PathBuf;

use async_trait::async_trait;
use requester_core::{Resolved, ResolvedValue};
use requester_exec::{Event, EventSink};

use crate::output::{print_error, print_warning, OutputFormat};

/// Presents chain events on the terminal. Delivered files are copied to `out_dir`.
pub struct TerminalEventSink {
    format: OutputFormat,
    quiet: bool,
    out_dir: PathBuf,
}

impl TerminalEventSink {
    pub fn new(format: OutputFormat, quiet: bool, out_dir: PathBuf) -> Self {
        Self {
            format,
            quiet,
            out_dir,
        }
    }

    fn render(&self, outputs: &[Resolved]) {
        if self.quiet {
            return;
        }
        match self.format {
            OutputFormat::Json => {
                let map: serde_json::Map<String, serde_json::Value> = outputs
                    .iter()
                    .map(|o| {
                        let value = match &o.value {
                            ResolvedValue::Json(v) => v.clone(),
                            bytes @ ResolvedValue::Bytes(_) => bytes.display().into(),
                        };
                        (o.name.clone(), value)
                    })
                    .collect();
                let payload = serde_json::json!({ "outputs": map });
                println!("{}", serde_json::to_string(&payload).unwrap_or_default());
            }
            OutputFormat::Text | OutputFormat::Dot => {
                for o in outputs {
                    let label = if o.label.is_empty() { &o.name } else { &o.label };
                    println!("{label}: {}", o.value.display());
                }
            }
        }
    }

    async fn save(&self, path: PathBuf) {
        let Some(name) = path.file_name() else {
            return;
        };
        let dest = self.out_dir.join(name);
        match tokio::fs::copy(&path, &dest).await {
            Ok(_) => {
                if self.quiet {
                    return;
                }
                match self.format {
                    OutputFormat::Json => {
                        let payload = serde_json::json!({ "file": dest.display().to_string() });
                        println!("{}", serde_json::to_string(&payload).unwrap_or_default());
                    }
                    OutputFormat::Text | OutputFormat::Dot => {
                        println!("saved: {}", dest.display())
                    }
                }
            }
            Err(e) => print_error(
                self.format,
                self.quiet,
                &format!("failed to save {}: {e}", dest.display()),
            ),
        }
    }
}

#[async_trait]
impl EventSink for TerminalEventSink {
    async fn emit(&self, event: Event) {
        match event {
            Event::RenderOutput { outputs } => self.render(&outputs),
            Event::DeliverFile { path } => self.save(path).await,
            Event::ReportError { message, fatal: true } => {
                print_error(self.format, self.quiet, &message)
            }
            Event::ReportError {
                message,
                fatal: false,
            } => print_warning(self.format, self.quiet, &message),
            // Prompts and the endpoint menu are driven by the run loop.
            Event::PromptInputs { .. } | Event::ShowEndpointList => {}
        }
    }
}
