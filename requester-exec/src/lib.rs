#![forbid(unsafe_code)]

//! Runtime for chained API requests: resolves producer endpoints, prompts for inputs through an
//! [`EventSink`], sends requests and extracts outputs into the session cache.
//!
//! Configuration parsing and validation live in `requester-core`.

pub mod executor;

pub use crate::executor::{
    build_request, decode_body, extract_outputs, Cache, ChainError, ChainState, Completion,
    CompositeEventSink, Event, EventSink, Extraction, HttpClient, HttpError, HttpRequest,
    HttpResponse, LogEventSink, NoOpEventSink, OutputFailure, Progress, Prompt, RequestBody,
    RequestChain, ReqwestHttpClient, ResponseBody, SessionFiles, SessionOptions,
};
