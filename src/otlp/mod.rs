//! OpenTelemetry Protocol (OTLP) receiver module
//!
//! This module provides:
//! - the OTLP HTTP/protobuf logs endpoint
//! - transport decompression of request bodies
//! - flattening of OTel log records into flat sink events

pub mod convert;
pub mod decompress;
pub mod flatten;
pub mod receiver;

pub use receiver::otlp_routes;
