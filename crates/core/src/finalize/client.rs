//! # Finalization Client
//!
//! Issues the one-shot packet finalization request and interprets the
//! response into a tagged outcome. The transport is a trait seam so the flow
//! can be exercised without a live endpoint; the HTTP implementation posts
//! with an asynchronous-origin marker header so the server can tell the call
//! apart from a full-page navigation.
//!
//! Every failure mode (transport, HTTP status, body decode) is contained
//! here: callers get an outcome value, never an error to propagate. Failed
//! finalizations leave the page UI untouched; the server-side record is
//! reconciled by other means.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Header marking the finalize call as an asynchronous fetch
pub const ASYNC_ORIGIN_HEADER: &str = "X-Requested-With";
/// Value for [`ASYNC_ORIGIN_HEADER`]
pub const ASYNC_ORIGIN_VALUE: &str = "fetch";

/// Download locations for the assembled compliance packet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PacketLocations {
    /// Machine-readable report
    pub json_url: String,
    /// Tabular report
    pub csv_url: String,
}

/// Wire shape of the finalize endpoint's JSON body
#[derive(Debug, Deserialize)]
struct FinalizeResponse {
    #[serde(default)]
    ok: bool,
    #[serde(default)]
    json_url: Option<String>,
    #[serde(default)]
    csv_url: Option<String>,
}

/// Why a finalize attempt failed
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FinalizeError {
    /// Endpoint answered with a non-success status
    #[error("finalize endpoint returned status {0}")]
    Http(u16),
    /// Body was not the expected JSON shape
    #[error("failed to decode finalize response: {0}")]
    Decode(String),
    /// Request never produced a response
    #[error("finalize transport failure: {0}")]
    Transport(String),
    /// Progress root carried no finalize endpoint attribute
    #[error("no finalize endpoint configured on the progress root")]
    MissingEndpoint,
}

/// Tagged result of a finalize attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FinalizeOutcome {
    /// Server assembled the packet and returned its download locations
    Ready(PacketLocations),
    /// Server answered successfully but declined (`ok: false`); left as a
    /// silent no-op pending clarified requirements
    Declined,
    /// Attempt failed; UI stays in its awaiting-result appearance
    Failed(FinalizeError),
}

impl FinalizeOutcome {
    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready(_))
    }
}

/// Interpret a finalize response from its HTTP status and raw body.
///
/// Success requires a success status AND `ok: true` AND both download
/// locations present; anything else maps to `Declined` or a typed failure.
pub fn interpret_response(status: u16, body: &[u8]) -> FinalizeOutcome {
    if !(200..300).contains(&status) {
        return FinalizeOutcome::Failed(FinalizeError::Http(status));
    }
    let response: FinalizeResponse = match serde_json::from_slice(body) {
        Ok(r) => r,
        Err(e) => return FinalizeOutcome::Failed(FinalizeError::Decode(e.to_string())),
    };
    if !response.ok {
        return FinalizeOutcome::Declined;
    }
    match (response.json_url, response.csv_url) {
        (Some(json_url), Some(csv_url)) => {
            FinalizeOutcome::Ready(PacketLocations { json_url, csv_url })
        }
        _ => FinalizeOutcome::Failed(FinalizeError::Decode(
            "response missing packet download locations".to_string(),
        )),
    }
}

/// Transport seam for the finalize call
#[async_trait]
pub trait FinalizeTransport: Send + Sync + 'static {
    /// POST to the finalize endpoint and interpret the answer
    async fn finalize(&self, endpoint: &str) -> FinalizeOutcome;
}

/// Real HTTP transport backed by reqwest
#[derive(Debug, Clone, Default)]
pub struct HttpFinalizeTransport {
    client: reqwest::Client,
}

impl HttpFinalizeTransport {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl FinalizeTransport for HttpFinalizeTransport {
    async fn finalize(&self, endpoint: &str) -> FinalizeOutcome {
        let response = match self
            .client
            .post(endpoint)
            .header(ASYNC_ORIGIN_HEADER, ASYNC_ORIGIN_VALUE)
            .send()
            .await
        {
            Ok(r) => r,
            Err(e) => return FinalizeOutcome::Failed(FinalizeError::Transport(e.to_string())),
        };

        let status = response.status().as_u16();
        match response.bytes().await {
            Ok(body) => interpret_response(status, &body),
            Err(e) => FinalizeOutcome::Failed(FinalizeError::Transport(e.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_status_with_ok_body_is_ready() {
        let body = br#"{"ok": true, "json_url": "/exports/p.json", "csv_url": "/exports/p.csv"}"#;
        let outcome = interpret_response(200, body);
        assert_eq!(
            outcome,
            FinalizeOutcome::Ready(PacketLocations {
                json_url: "/exports/p.json".to_string(),
                csv_url: "/exports/p.csv".to_string(),
            })
        );
    }

    #[test]
    fn test_extra_fields_are_ignored() {
        let body =
            br#"{"ok": true, "order_id": "ORD-1", "json_url": "/a.json", "csv_url": "/a.csv"}"#;
        assert!(interpret_response(200, body).is_ready());
    }

    #[test]
    fn test_ok_false_is_declined_not_failed() {
        let body = br#"{"ok": false, "json_url": "/a.json", "csv_url": "/a.csv"}"#;
        assert_eq!(interpret_response(200, body), FinalizeOutcome::Declined);
    }

    #[test]
    fn test_missing_ok_flag_is_declined() {
        assert_eq!(interpret_response(200, b"{}"), FinalizeOutcome::Declined);
    }

    #[test]
    fn test_non_success_status_wins_over_body() {
        let body = br#"{"ok": true, "json_url": "/a.json", "csv_url": "/a.csv"}"#;
        assert_eq!(
            interpret_response(502, body),
            FinalizeOutcome::Failed(FinalizeError::Http(502))
        );
    }

    #[test]
    fn test_malformed_body_is_decode_failure() {
        match interpret_response(200, b"<html>oops</html>") {
            FinalizeOutcome::Failed(FinalizeError::Decode(_)) => {}
            other => panic!("expected decode failure, got {:?}", other),
        }
    }

    #[test]
    fn test_ok_true_without_locations_is_decode_failure() {
        let body = br#"{"ok": true, "json_url": "/a.json"}"#;
        match interpret_response(200, body) {
            FinalizeOutcome::Failed(FinalizeError::Decode(_)) => {}
            other => panic!("expected decode failure, got {:?}", other),
        }
    }

    #[test]
    fn test_transport_error_display() {
        let err = FinalizeError::Transport("connection refused".to_string());
        assert!(err.to_string().contains("connection refused"));
    }

    #[test]
    fn test_transport_seam_is_object_safe() {
        struct Always(FinalizeOutcome);

        #[async_trait]
        impl FinalizeTransport for Always {
            async fn finalize(&self, _endpoint: &str) -> FinalizeOutcome {
                self.0.clone()
            }
        }

        let transport: Box<dyn FinalizeTransport> = Box::new(Always(FinalizeOutcome::Declined));
        let outcome = tokio_test::block_on(transport.finalize("local:demo"));
        assert_eq!(outcome, FinalizeOutcome::Declined);
    }
}
