pub mod handlers;
pub mod models;
pub mod optimizer;
pub mod pipeline;
pub mod prompt_builder;
pub mod prompts;
pub mod stats;
pub mod taxonomy;
pub mod validator;
