use std::collections::BTreeMap;
use std::sync::Arc;

use requester_core::types::{AnyValue, Endpoint, InputSpec};
use requester_core::{external_tokens, substitute_in, EndpointCatalog, Resolved};

use crate::executor::cache::{Cache, MergedValues};
use crate::executor::events::{Event, EventSink};
use crate::executor::extract::extract_outputs;
use crate::executor::http::{HttpClient, ReqwestHttpClient};
use crate::executor::request::build_request;
use crate::executor::response::decode_body;
use crate::executor::result::{ChainError, Completion, Progress, Prompt};
use crate::executor::session::SessionFiles;
use crate::executor::types::SessionOptions;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChainState {
    Idle,
    Resolving,
    AwaitingInput,
    Executing,
    Terminal,
}

/// One interactive session: resolves an endpoint's producers, prompts for inputs and runs the
/// resulting chain of requests one at a time.
pub struct RequestChain {
    pub(crate) catalog: Arc<EndpointCatalog>,
    pub(crate) http: Box<dyn HttpClient>,
    pub(crate) events: Arc<dyn EventSink>,
    pub(crate) options: SessionOptions,
    /// Work list; the last element runs next.
    pub(crate) stack: Vec<Endpoint>,
    pub(crate) cache: Cache,
    pub(crate) pending: BTreeMap<String, Resolved>,
    pub(crate) awaiting: Option<Prompt>,
    pub(crate) state: ChainState,
    pub(crate) files: SessionFiles,
}

enum Resolution {
    Pushed,
    Ready,
}

impl RequestChain {
    pub fn new(
        catalog: Arc<EndpointCatalog>,
        http: Box<dyn HttpClient>,
        events: Arc<dyn EventSink>,
        options: SessionOptions,
    ) -> Self {
        let files = SessionFiles::new(options.temp_root.clone());
        Self {
            catalog,
            http,
            events,
            options,
            stack: Vec::new(),
            cache: Cache::new(),
            pending: BTreeMap::new(),
            awaiting: None,
            state: ChainState::Idle,
            files,
        }
    }

    /// Session backed by reqwest, using the catalog's proxies.
    pub fn with_reqwest(
        catalog: Arc<EndpointCatalog>,
        events: Arc<dyn EventSink>,
        options: SessionOptions,
    ) -> Result<Self, ChainError> {
        let http = ReqwestHttpClient::new(catalog.proxies())?;
        Ok(Self::new(catalog, Box::new(http), events, options))
    }

    pub fn catalog(&self) -> &EndpointCatalog {
        &self.catalog
    }

    pub fn list_visible_endpoints(&self) -> Vec<&Endpoint> {
        self.catalog.list_visible()
    }

    pub fn state(&self) -> ChainState {
        self.state
    }

    pub fn cache(&self) -> &Cache {
        &self.cache
    }

    /// The endpoint currently waiting for inputs, if any.
    pub fn pending_inputs(&self) -> Option<&Prompt> {
        self.awaiting.as_ref()
    }

    /// Queue `endpoint` (or resume the top of the stack) and run until the chain needs inputs
    /// or completes.
    pub async fn init_request(&mut self, endpoint: Option<&str>) -> Result<Progress, ChainError> {
        let result = self.start(endpoint).await;
        self.settle(result).await
    }

    pub fn set_input_value(&mut self, spec: &InputSpec, value: AnyValue) {
        tracing::debug!(input = %spec.name, "input set");
        self.pending
            .insert(spec.name.clone(), Resolved::input(spec, value));
    }

    /// Execute the endpoint awaiting inputs with the values set so far, then keep going.
    pub async fn continue_request(&mut self) -> Result<Progress, ChainError> {
        let result = self.resume().await;
        self.settle(result).await
    }

    async fn start(&mut self, endpoint: Option<&str>) -> Result<Progress, ChainError> {
        match endpoint {
            Some(name) => {
                let ep = self
                    .catalog
                    .get(name)
                    .cloned()
                    .ok_or_else(|| ChainError::UnknownEndpoint(name.to_string()))?;
                tracing::info!(endpoint = %ep.name, "request started");
                self.awaiting = None;
                self.stack.push(ep);
            }
            None if self.stack.is_empty() => return Err(ChainError::NothingPending),
            None => {}
        }
        self.drive().await
    }

    async fn resume(&mut self) -> Result<Progress, ChainError> {
        if self.stack.is_empty() {
            return Err(ChainError::NothingPending);
        }
        self.awaiting = None;
        match self.execute_top().await? {
            Some(done) => Ok(Progress::Completed(done)),
            None => self.drive().await,
        }
    }

    async fn drive(&mut self) -> Result<Progress, ChainError> {
        loop {
            self.state = ChainState::Resolving;
            if let Resolution::Pushed = self.resolve_next()? {
                continue;
            }

            let top = self.stack.last().ok_or(ChainError::NothingPending)?;
            if !top.inputs.is_empty() {
                let prompt = Prompt {
                    endpoint: top.name.clone(),
                    inputs: substitute_in(&top.inputs, &self.cache)?,
                };
                self.state = ChainState::AwaitingInput;
                self.awaiting = Some(prompt.clone());
                self.events
                    .emit(Event::PromptInputs {
                        endpoint: prompt.endpoint.clone(),
                        inputs: prompt.inputs.clone(),
                    })
                    .await;
                return Ok(Progress::AwaitingInput(prompt));
            }

            if let Some(done) = self.execute_top().await? {
                return Ok(Progress::Completed(done));
            }
        }
    }

    /// Push the producer of the first unmet token of the top endpoint, if there is one.
    fn resolve_next(&mut self) -> Result<Resolution, ChainError> {
        let top = self.stack.last().ok_or(ChainError::NothingPending)?;

        for token in external_tokens(top)? {
            if self.cache.contains(&token) {
                continue;
            }
            let producer = self
                .catalog
                .find_producer(&token)
                .ok_or_else(|| ChainError::EndpointForTokenNotFound(token.clone()))?;

            if let Some(pos) = self.stack.iter().position(|e| e.name == producer.name) {
                let mut path: Vec<String> =
                    self.stack[pos..].iter().map(|e| e.name.clone()).collect();
                path.push(producer.name.clone());
                return Err(ChainError::DependencyCycle(path));
            }

            tracing::debug!(
                endpoint = %top.name,
                %token,
                producer = %producer.name,
                "queued producer"
            );
            let producer = producer.clone();
            self.stack.push(producer);
            return Ok(Resolution::Pushed);
        }

        Ok(Resolution::Ready)
    }

    /// Pop and send the top endpoint. Returns the completion when it was the last one.
    async fn execute_top(&mut self) -> Result<Option<Completion>, ChainError> {
        let endpoint = self.stack.pop().ok_or(ChainError::NothingPending)?;
        self.state = ChainState::Executing;

        let merged = MergedValues {
            cache: &self.cache,
            pending: &self.pending,
        };
        let endpoint: Endpoint = substitute_in(&endpoint, &merged)?;
        self.pending.clear();

        let request = build_request(&endpoint)?;
        tracing::debug!(
            endpoint = %endpoint.name,
            method = %request.method,
            url = %request.url,
            "sending request"
        );
        let response = self.http.send(request, self.options.timeout).await?;
        tracing::debug!(endpoint = %endpoint.name, status = response.status, "response received");

        if !response.is_success() {
            return Err(ChainError::Status {
                status: response.status,
                reason: response.reason,
            });
        }

        let body = decode_body(endpoint.response, response.body)?;
        let extraction = extract_outputs(&endpoint, &body);

        for failure in &extraction.failures {
            self.events
                .emit(Event::ReportError {
                    message: format!("{}: {}", failure.output, failure.message),
                    fatal: false,
                })
                .await;
        }
        for output in &extraction.outputs {
            if self.cache.store(output.clone()) {
                tracing::debug!(output = %output.name, value = %output.value.display(), "cached");
            }
        }

        if !self.stack.is_empty() {
            return Ok(None);
        }

        self.state = ChainState::Terminal;
        let done = self.finish(&endpoint, extraction.outputs).await?;
        Ok(Some(done))
    }

    /// Every chain error passes through here: report it, reset, and go back to the list.
    async fn settle(&mut self, result: Result<Progress, ChainError>) -> Result<Progress, ChainError> {
        if let Err(err) = &result {
            tracing::error!(error = %err, "request chain failed");
            self.events
                .emit(Event::ReportError {
                    message: err.to_string(),
                    fatal: true,
                })
                .await;
            self.reset();
            self.events.emit(Event::ShowEndpointList).await;
        }
        result
    }
}
