pub mod app;
pub mod cli;
pub mod config;
pub mod credential;
pub mod endpoint;
pub mod notice;
pub mod paths;
pub mod workflow;
