//! Delivery of feedback records to the collection endpoint.
//!
//! The endpoint (a script web app) is called one-way: its response is never
//! read. A completed call therefore only means nothing failed at the
//! transport layer. Rejections or silent drops on the receiving side are
//! invisible here, which is why a successful call is reported as
//! [`SubmitOutcome::SentUnconfirmed`] rather than "delivered".
//!
//! One `submit` is exactly one POST. No retries, no queue, no idempotency
//! key: submitting the same record twice delivers it twice.

use std::fmt;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::feedback::record::FeedbackRecord;

/// Form field names the endpoint expects.
pub const NAME_FIELD: &str = "name";
pub const MESSAGE_FIELD: &str = "feedback";

/// What the caller may honestly conclude about a submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The request went out and the transport did not fail.
    /// Delivery is not confirmed.
    SentUnconfirmed { submitted_at: DateTime<Utc> },
    /// DNS, connection refused, reset, and similar.
    TransportError(String),
    /// Nothing was sent (no endpoint, or the request could not be built).
    NotAttempted(String),
}

impl SubmitOutcome {
    pub fn was_sent(&self) -> bool {
        matches!(self, SubmitOutcome::SentUnconfirmed { .. })
    }
}

impl fmt::Display for SubmitOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SubmitOutcome::SentUnconfirmed { submitted_at } => {
                write!(f, "sent at {} (delivery not confirmed)", submitted_at.to_rfc3339())
            }
            SubmitOutcome::TransportError(msg) => write!(f, "transport error: {msg}"),
            SubmitOutcome::NotAttempted(msg) => write!(f, "not sent: {msg}"),
        }
    }
}

/// Body encoding for the POST.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FormEncoding {
    /// `multipart/form-data`
    #[default]
    Multipart,
    /// `application/x-www-form-urlencoded`
    UrlEncoded,
}

impl FormEncoding {
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "multipart" => Some(FormEncoding::Multipart),
            "urlencoded" => Some(FormEncoding::UrlEncoded),
            _ => None,
        }
    }
}

#[async_trait]
pub trait FeedbackSubmitter: Send + Sync {
    /// Returns the name of the submitter.
    fn name(&self) -> &str;

    /// Sends one record. The record is assumed valid.
    async fn submit(&self, record: &FeedbackRecord) -> SubmitOutcome;
}

#[derive(Debug, Clone, Default)]
pub struct SubmitterConfig {
    pub endpoint_url: Option<String>,
    pub encoding: FormEncoding,
}

/// Posts `name` and `feedback` form fields to an HTTP(S) endpoint.
///
/// Redirects are not followed, so each `submit` is exactly one request.
pub struct HttpSubmitter {
    endpoint_url: Option<String>,
    encoding: FormEncoding,
    client: Option<reqwest::Client>,
}

impl HttpSubmitter {
    pub fn new(config: SubmitterConfig) -> Self {
        // No request timeout: a hanging endpoint keeps the form pending.
        let client = match reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::none())
            .build()
        {
            Ok(client) => Some(client),
            Err(e) => {
                warn!("Failed to build feedback HTTP client: {}", e);
                None
            }
        };
        Self {
            endpoint_url: config.endpoint_url,
            encoding: config.encoding,
            client,
        }
    }
}

#[async_trait]
impl FeedbackSubmitter for HttpSubmitter {
    fn name(&self) -> &str {
        "http"
    }

    async fn submit(&self, record: &FeedbackRecord) -> SubmitOutcome {
        let Some(url) = self.endpoint_url.as_deref() else {
            warn!("Feedback submitted but no endpoint is configured");
            return SubmitOutcome::NotAttempted("no feedback endpoint configured".to_string());
        };

        let Some(client) = self.client.as_ref() else {
            return SubmitOutcome::NotAttempted("feedback HTTP client unavailable".to_string());
        };

        let request = client.post(url);
        let request = match self.encoding {
            FormEncoding::Multipart => {
                let form = reqwest::multipart::Form::new()
                    .text(NAME_FIELD, record.name().to_string())
                    .text(MESSAGE_FIELD, record.message().to_string());
                request.multipart(form)
            }
            FormEncoding::UrlEncoded => request.form(&[
                (NAME_FIELD, record.name()),
                (MESSAGE_FIELD, record.message()),
            ]),
        };

        let submitted_at = Utc::now();
        info!(
            "Submitting feedback: encoding={:?}, name_len={}, message_len={}",
            self.encoding,
            record.name().chars().count(),
            record.message().chars().count()
        );

        match request.send().await {
            Ok(response) => {
                // Status and body are never inspected.
                debug!("Feedback endpoint answered (unread) status {}", response.status());
                SubmitOutcome::SentUnconfirmed { submitted_at }
            }
            Err(e) if e.is_builder() => {
                warn!("Feedback request could not be built: {}", e);
                SubmitOutcome::NotAttempted(e.to_string())
            }
            Err(e) => {
                warn!("Feedback transport error: {}", e);
                SubmitOutcome::TransportError(e.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feedback::record::FeedbackDraft;

    #[test]
    fn test_form_encoding_parse() {
        assert_eq!(FormEncoding::parse("multipart"), Some(FormEncoding::Multipart));
        assert_eq!(FormEncoding::parse("URLENCODED"), Some(FormEncoding::UrlEncoded));
        assert_eq!(FormEncoding::parse("json"), None);
    }

    #[test]
    fn test_form_encoding_serialization() {
        assert_eq!(
            serde_json::to_string(&FormEncoding::UrlEncoded).unwrap(),
            "\"urlencoded\""
        );
        assert_eq!(FormEncoding::default(), FormEncoding::Multipart);
    }

    #[test]
    fn test_outcome_display_does_not_claim_delivery() {
        let outcome = SubmitOutcome::SentUnconfirmed {
            submitted_at: Utc::now(),
        };
        assert!(outcome.to_string().contains("not confirmed"));
        assert!(outcome.was_sent());
        assert!(!SubmitOutcome::TransportError("x".into()).was_sent());
    }

    #[test]
    fn test_no_endpoint_is_not_attempted() {
        let submitter = HttpSubmitter::new(SubmitterConfig::default());
        let record = FeedbackDraft::new("a", "b").validate().unwrap();
        let outcome = tokio_test::block_on(submitter.submit(&record));
        assert!(matches!(outcome, SubmitOutcome::NotAttempted(_)));
    }

    #[tokio::test]
    async fn test_invalid_url_is_not_attempted() {
        let submitter = HttpSubmitter::new(SubmitterConfig {
            endpoint_url: Some("not a url".to_string()),
            encoding: FormEncoding::UrlEncoded,
        });
        let record = FeedbackDraft::new("a", "b").validate().unwrap();
        let outcome = submitter.submit(&record).await;
        assert!(matches!(outcome, SubmitOutcome::NotAttempted(_)));
    }
}
