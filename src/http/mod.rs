//! HTTP transport module
//!
//! A thin, retrying HTTP client used by the HTTP-backed document store.
//!
//! # Overview
//!
//! The client handles:
//! - Automatic retries with configurable backoff
//! - Retry-After handling for 429 responses
//! - Error classification for retry decisions
//!
//! Timeouts and cancellation live here, at the transport boundary; the
//! navigation engine above never mutates its state until a request has
//! fully succeeded, so a failed or abandoned request is always safe.

mod client;

pub use client::{HttpClient, HttpClientConfig, HttpClientConfigBuilder, RequestConfig};
