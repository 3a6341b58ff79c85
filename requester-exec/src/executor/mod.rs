mod cache;
mod chain;
pub mod events;
pub mod extract;
pub mod http;
mod request;
pub mod response;
mod result;
mod session;
mod types;

pub use cache::Cache;
pub use chain::{ChainState, RequestChain};
pub use events::{CompositeEventSink, Event, EventSink, LogEventSink, NoOpEventSink};
pub use extract::{extract_outputs, Extraction, OutputFailure};
pub use http::{
    FilePart, HttpClient, HttpError, HttpRequest, HttpResponse, RequestBody, ReqwestHttpClient,
};
pub use request::build_request;
pub use response::{decode_body, ResponseBody};
pub use result::{ChainError, Completion, Progress, Prompt};
pub use session::SessionFiles;
pub use types::SessionOptions;
