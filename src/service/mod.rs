//! Request/response contracts of the remote scan service.
//!
//! Implementations only move bytes: they report the status code and raw body
//! of whatever came back and leave every interpretation to the controllers.

use serde::Serialize;
use std::future::Future;

use crate::{error::TransportError, model::ScanLevel};

mod http;


pub use http::HttpService;

pub const SCAN_PATH: &str = "/api/scan";
pub const CHAT_PATH: &str = "/api/chat";
pub const REPORT_PATH: &str = "/api/report/pdf";

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ScanRequest {
    #[serde(rename = "url")]
    pub target: String,
    pub level: ScanLevel,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ChatRequest {
    pub message: String,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub include_scan: bool,
}

/// Whatever the service answered, untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

pub trait ScanService {
    fn scan(
        &self,
        request: &ScanRequest,
    ) -> impl Future<Output = Result<RawResponse, TransportError>> + Send;

    fn chat(
        &self,
        request: &ChatRequest,
    ) -> impl Future<Output = Result<RawResponse, TransportError>> + Send;

    /// Retrieves the rendered report of the latest scan.
    fn export_report(&self) -> impl Future<Output = Result<Vec<u8>, TransportError>> + Send;
}
