//! HTTP status classification

use reqwest::StatusCode;

use crate::error::Error;
use crate::transport::RawResponse;

/// Anything that can report an HTTP status code
pub trait HasStatus {
    /// Status code, or `None` when there is no HTTP status to inspect
    fn http_status(&self) -> Option<u16>;
}

impl HasStatus for u16 {
    fn http_status(&self) -> Option<u16> {
        Some(*self)
    }
}

impl HasStatus for StatusCode {
    fn http_status(&self) -> Option<u16> {
        Some(self.as_u16())
    }
}

impl HasStatus for RawResponse {
    fn http_status(&self) -> Option<u16> {
        Some(self.status.as_u16())
    }
}

impl HasStatus for reqwest::Response {
    fn http_status(&self) -> Option<u16> {
        Some(self.status().as_u16())
    }
}

impl HasStatus for Error {
    fn http_status(&self) -> Option<u16> {
        self.status()
    }
}

/// True when the status is in `[200, 300)`
pub fn is_request_successful<S: HasStatus + ?Sized>(subject: &S) -> bool {
    matches!(subject.http_status(), Some(code) if (200..300).contains(&code))
}

/// True when the status is outside `[200, 300)` or missing entirely
pub fn is_request_error<S: HasStatus + ?Sized>(subject: &S) -> bool {
    !is_request_successful(subject)
}
