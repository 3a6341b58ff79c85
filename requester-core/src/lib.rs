#![forbid(unsafe_code)]

//! Endpoint catalog, configuration validation, and `{{token}}` templating for chained API
//! requests. The runtime that executes chains lives in `requester-exec`.

pub mod catalog;
pub mod error;
pub mod parser;
pub mod path;
pub mod planner;
pub mod tokens;
pub mod types;
pub mod validate;

pub use crate::catalog::EndpointCatalog;
pub use crate::error::{ConfigError, ParseError, ValidationError, Violation};
pub use crate::parser::{parse_config_str, DocumentFormat, ParsedConfig};
pub use crate::path::{OutputPath, PathError};
pub use crate::planner::{external_tokens, plan_endpoint, DependencyGraph, Plan, PlannerError};
pub use crate::tokens::{
    extract_tokens, substitute, substitute_in, tokens_in, Resolved, ResolvedValue, TokenError,
    TokenSource,
};
pub use crate::types::{Endpoint, InputSpec, OutputSpec, RequesterConfig};
pub use crate::validate::{validate_config, Validate};
