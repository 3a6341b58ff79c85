pub mod config;
pub mod endpoints;
pub mod plan;
pub mod run;
pub mod terminal;
pub mod validate;
