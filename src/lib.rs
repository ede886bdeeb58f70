#![warn(rust_2018_idioms)]

pub mod adapter;
pub mod app;
pub mod config;
pub mod domain;
pub mod error;
pub mod healthcheck;
pub mod otlp;
pub mod port;

pub use healthcheck::{healthcheck, healthcheck_with_port};
