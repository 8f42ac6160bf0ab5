#![allow(clippy::missing_errors_doc)]

pub mod cli;
pub mod client;
pub mod config;
pub mod endpoints;
pub mod error;
