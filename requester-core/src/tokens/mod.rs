//! `{{token}}` placeholders: extraction and type-preserving substitution.

mod substitute;
mod template;
mod value;

pub use substitute::{extract_tokens, substitute, substitute_in, tokens_in, TokenError, TokenSource};
pub use template::{parse_template, Segment, Template};
pub use value::{Resolved, ResolvedValue};
