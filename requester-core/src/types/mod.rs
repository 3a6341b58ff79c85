mod common;
mod config;
mod endpoint;
mod input;
mod output;

pub use common::{AnyValue, ValueMap};
pub use config::{RequesterConfig, DEFAULT_TIMEOUT};
pub use endpoint::{BodyRef, Endpoint, ResponseKind};
pub use input::{InputSpec, InputType, MoleculeFormat};
pub use output::{output_file_name, OutputSpec, OutputType};
