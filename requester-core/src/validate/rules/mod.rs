pub(crate) mod common;
pub(crate) mod document;
pub(crate) mod endpoint;
pub(crate) mod inputs;
pub(crate) mod outputs;
