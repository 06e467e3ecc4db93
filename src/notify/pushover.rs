//! Pushover push notifications for threshold alerts.

use crate::notify::Notifier;
use crate::types::{Credentials, HttpConfig, Result, WatchError};
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, error};

const PUSH_URL: &str = "https://api.pushover.net/1/messages.json";

/// Pushover message request body (form-encoded).
#[derive(Serialize)]
struct SendMessageRequest<'a> {
    token: &'a str,
    user: &'a str,
    title: &'a str,
    message: &'a str,
    priority: i8,
}

/// Pushover notification handler.
pub struct PushoverNotifier {
    client: Client,
    credentials: Credentials,
    url: String,
}

impl PushoverNotifier {
    /// Create a new Pushover notifier.
    pub fn new(credentials: Credentials, http: &HttpConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(http.timeout_secs))
            .user_agent(&http.user_agent)
            .build()?;

        Ok(Self {
            client,
            credentials,
            url: PUSH_URL.to_string(),
        })
    }
}

impl Notifier for PushoverNotifier {
    async fn send(&self, title: &str, message: &str, priority: i8) -> Result<()> {
        let body = SendMessageRequest {
            token: &self.credentials.api_key,
            user: &self.credentials.user_key,
            title,
            message,
            priority,
        };

        let response = self.client.post(&self.url).form(&body).send().await?;

        if response.status().is_success() {
            debug!(title, priority, "pushover message sent");
            Ok(())
        } else {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            error!("failed to send pushover message: {} {}", status, error_text);
            Err(WatchError::NotifyError(format!("{}: {}", status, error_text)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_body_field_names_match_pushover_api() {
        let body = SendMessageRequest {
            token: "app-token",
            user: "user-key",
            title: "Aurora activity",
            message: "Very likely!",
            priority: 1,
        };

        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(value["token"], "app-token");
        assert_eq!(value["user"], "user-key");
        assert_eq!(value["title"], "Aurora activity");
        assert_eq!(value["message"], "Very likely!");
        assert_eq!(value["priority"], 1);
    }

    #[test]
    fn test_notifier_construction() {
        let credentials = Credentials {
            api_key: "a".to_string(),
            user_key: "u".to_string(),
        };
        let notifier = PushoverNotifier::new(credentials, &HttpConfig::default()).unwrap();
        assert_eq!(notifier.url, PUSH_URL);
    }
}
