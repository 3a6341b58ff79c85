use std::path::{Path, PathBuf};

use requester_core::types::{output_file_name, Endpoint, ResponseKind};
use requester_core::{Resolved, ResolvedValue};
use tempfile::TempDir;

use crate::executor::chain::{ChainState, RequestChain};
use crate::executor::events::Event;
use crate::executor::result::{ChainError, Completion};

/// Scratch directory for file outputs. Created on first use and removed with the session.
#[derive(Debug)]
pub struct SessionFiles {
    root: Option<PathBuf>,
    dir: Option<TempDir>,
}

impl SessionFiles {
    pub fn new(root: Option<PathBuf>) -> Self {
        Self { root, dir: None }
    }

    pub fn path(&self) -> Option<&Path> {
        self.dir.as_ref().map(TempDir::path)
    }

    /// Write `bytes` to `<session dir>/<name>`, replacing any earlier file of that name.
    pub fn persist(&mut self, name: &str, bytes: &[u8]) -> std::io::Result<PathBuf> {
        let dir = match self.dir.take() {
            Some(dir) => dir,
            None => {
                let mut builder = tempfile::Builder::new();
                builder.prefix("requester-");
                match &self.root {
                    Some(root) => builder.tempdir_in(root)?,
                    None => builder.tempdir()?,
                }
            }
        };
        let path = dir.path().join(output_file_name(name));
        let written = std::fs::write(&path, bytes);
        self.dir = Some(dir);
        written.map(|_| path)
    }
}

impl RequestChain {
    pub(crate) async fn finish(
        &mut self,
        endpoint: &Endpoint,
        outputs: Vec<Resolved>,
    ) -> Result<Completion, ChainError> {
        let done = match endpoint.response {
            ResponseKind::File => {
                let mut paths = Vec::with_capacity(outputs.len());
                for output in &outputs {
                    let bytes = match &output.value {
                        ResolvedValue::Bytes(b) => b.clone(),
                        other => other.display().into_bytes(),
                    };
                    let path = self.files.persist(&output.name, &bytes)?;
                    tracing::info!(output = %output.name, path = %path.display(), "file written");
                    self.events
                        .emit(Event::DeliverFile { path: path.clone() })
                        .await;
                    paths.push(path);
                }
                self.events.emit(Event::ShowEndpointList).await;
                Completion::Files(paths)
            }
            ResponseKind::Json | ResponseKind::Text => {
                self.events
                    .emit(Event::RenderOutput {
                        outputs: outputs.clone(),
                    })
                    .await;
                Completion::Rendered(outputs)
            }
        };

        tracing::info!(endpoint = %endpoint.name, "request chain completed");
        self.reset();
        Ok(done)
    }

    /// Abandon the current chain: keep only `cache` outputs and start a fresh HTTP session.
    pub fn reset(&mut self) {
        self.cache.retain_cached();
        self.stack.clear();
        self.pending.clear();
        self.awaiting = None;
        if let Err(e) = self.http.new_session() {
            tracing::warn!(error = %e, "failed to start a new http session");
        }
        self.state = ChainState::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_names_cannot_escape_the_session_dir() {
        assert_eq!(output_file_name("result.pdb"), "result.pdb");
        assert_eq!(output_file_name("../../etc/passwd"), "passwd");
        assert_eq!(output_file_name(".."), "output");
        assert_eq!(output_file_name(""), "output");
    }

    #[test]
    fn files_live_in_one_session_dir() {
        let root = tempfile::tempdir().unwrap();
        let mut files = SessionFiles::new(Some(root.path().to_path_buf()));
        let a = files.persist("a.txt", b"one").unwrap();
        let b = files.persist("b.txt", b"two").unwrap();
        assert_eq!(a.parent(), b.parent());
        assert!(a.starts_with(root.path()));
        assert_eq!(std::fs::read(&b).unwrap(), b"two");

        let dir = files.path().unwrap().to_path_buf();
        drop(files);
        assert!(!dir.exists());
    }
}
