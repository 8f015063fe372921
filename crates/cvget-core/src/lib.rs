pub mod config;
pub mod logging;

pub mod dataset;
pub mod extract;
pub mod fetch;
pub mod layout;
pub mod pipeline;
pub mod retrieve;
pub mod url_model;
pub mod validate;
