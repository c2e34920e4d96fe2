//! HTTP transport module
//!
//! Provides the classified HTTP client used by the executor and session layers.

mod client;

pub use client::{HttpClient, HttpError, HttpRequest, HttpResponse};
