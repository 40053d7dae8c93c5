pub mod config;
pub mod logging;

pub mod encode;
pub mod host;
pub mod inline;
pub mod paths;
pub mod task;
