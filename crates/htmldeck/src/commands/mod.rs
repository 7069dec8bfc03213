pub mod build;
pub mod completion;
pub mod config;
