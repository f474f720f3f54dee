//! MailerLite subscriber API client.

use crate::wire::{CreateGroupRequest, DataEnvelope, GroupRecord, OK_ONLY, OK_OR_CREATED};
use async_trait::async_trait;
use listwire_config::MailerLiteConfig;
use listwire_core::{
    GroupId, ImportBatch, ListwireError, ListwireResult, Subscriber, SubscriberFields,
    SubscriberListService,
};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, Response, StatusCode};
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, error, info};

/// Client for the MailerLite groups and subscribers endpoints.
///
/// Holds only immutable configuration: the API root, the fixed header set
/// and an optional default group. Every call is a single POST; nothing is
/// retried.
#[derive(Clone)]
pub struct MailerLiteClient {
    client: Client,
    base_url: String,
    headers: HeaderMap,
    default_group_id: Option<GroupId>,
}

impl MailerLiteClient {
    /// Creates a new client from connection settings.
    pub fn new(config: &MailerLiteConfig) -> ListwireResult<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }

        let client = builder
            .build()
            .map_err(|e| ListwireError::Configuration(format!("Failed to create HTTP client: {}", e)))?;

        Self::with_client(client, config)
    }

    /// Creates a client around an existing `reqwest` client.
    pub fn with_client(client: Client, config: &MailerLiteConfig) -> ListwireResult<Self> {
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            headers: default_headers(&config.api_key)?,
            default_group_id: config.default_group_id.clone(),
        })
    }

    /// Returns the API root this client talks to.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Creates a group, returning its ID or `None` after logging the failure.
    pub async fn create_group(&self, group_name: &str) -> Option<GroupId> {
        match self.try_create_group(group_name).await {
            Ok(id) => Some(id),
            Err(e) => {
                report_failure("Error creating group", &e);
                None
            }
        }
    }

    /// Adds a subscriber to a group, returning false after logging the failure.
    pub async fn add_subscriber_to_group(
        &self,
        email: &str,
        group_id: &GroupId,
        fields: Option<SubscriberFields>,
    ) -> bool {
        match self.try_add_subscriber_to_group(email, group_id, fields).await {
            Ok(()) => true,
            Err(e) => {
                report_failure("Error adding subscriber", &e);
                false
            }
        }
    }

    /// Imports subscribers into a group, returning false after logging the failure.
    pub async fn bulk_add_subscribers_to_group(&self, subscribers: &[Subscriber], group_id: &GroupId) -> bool {
        match self.try_bulk_add_subscribers_to_group(subscribers, group_id).await {
            Ok(()) => true,
            Err(e) => {
                report_failure("Error bulk adding subscribers", &e);
                false
            }
        }
    }

    async fn post<B: Serialize + ?Sized>(
        &self,
        operation: &'static str,
        path: &str,
        body: &B,
        accepted: &[StatusCode],
    ) -> ListwireResult<Response> {
        let url = self.url(path);
        debug!(operation, %url, "MailerLite POST");

        let response = self
            .client
            .post(&url)
            .headers(self.headers.clone())
            .json(body)
            .send()
            .await
            .map_err(|e| ListwireError::Transport(format!("{} request failed: {}", operation, e)))?;

        let status = response.status();
        if !accepted.contains(&status) {
            let body = match response.text().await {
                Ok(body) => body,
                Err(e) => {
                    debug!(operation, %status, error = %e, "Failed to read rejection body");
                    format!("<unreadable response body: {}>", e)
                }
            };
            return Err(ListwireError::rejected(operation, status.as_u16(), body));
        }

        debug!(operation, %status, "MailerLite request accepted");
        Ok(response)
    }
}

#[async_trait]
impl SubscriberListService for MailerLiteClient {
    async fn try_create_group(&self, group_name: &str) -> ListwireResult<GroupId> {
        let response = self
            .post("create_group", "/groups", &CreateGroupRequest { name: group_name }, OK_OR_CREATED)
            .await?;

        let envelope: DataEnvelope<GroupRecord> = response
            .json()
            .await
            .map_err(|e| ListwireError::Decode(format!("create_group response: {}", e)))?;

        info!(group_id = %envelope.data.id, group_name, "Group created");
        Ok(envelope.data.id)
    }

    async fn try_add_subscriber_to_group(
        &self,
        email: &str,
        group_id: &GroupId,
        fields: Option<SubscriberFields>,
    ) -> ListwireResult<()> {
        let subscriber = Subscriber {
            email: email.to_string(),
            fields,
            groups: vec![group_id.clone()],
        };

        self.post("add_subscriber_to_group", "/subscribers", &subscriber, OK_OR_CREATED)
            .await?;
        Ok(())
    }

    async fn try_bulk_add_subscribers_to_group(
        &self,
        subscribers: &[Subscriber],
        group_id: &GroupId,
    ) -> ListwireResult<()> {
        let path = format!("/groups/{}/import-subscribers", group_id);
        self.post(
            "bulk_add_subscribers_to_group",
            &path,
            &ImportBatch::borrowed(subscribers),
            OK_ONLY,
        )
        .await?;

        info!(%group_id, count = subscribers.len(), "Bulk import accepted");
        Ok(())
    }

    async fn try_add_subscriber(&self, mut subscriber: Subscriber) -> ListwireResult<()> {
        if let Some(default_group) = &self.default_group_id {
            subscriber.join_group(default_group.clone());
        }

        debug!(
            email = %subscriber.email,
            groups = subscriber.groups.len(),
            has_fields = subscriber.fields.is_some(),
            "Adding subscriber"
        );

        self.post("add_subscriber", "/subscribers", &subscriber, OK_OR_CREATED)
            .await?;
        Ok(())
    }
}

/// Creates a shareable MailerLite service.
pub fn create_mailerlite_service(config: &MailerLiteConfig) -> ListwireResult<Arc<dyn SubscriberListService>> {
    let client = MailerLiteClient::new(config)?;
    Ok(Arc::new(client))
}

fn default_headers(api_key: &str) -> ListwireResult<HeaderMap> {
    let mut auth = HeaderValue::from_str(&format!("Bearer {}", api_key))
        .map_err(|_| ListwireError::configuration("API key contains characters not allowed in a header"))?;
    auth.set_sensitive(true);

    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
    headers.insert(AUTHORIZATION, auth);
    Ok(headers)
}

fn report_failure(context: &str, err: &ListwireError) {
    error!(
        status = ?err.status(),
        body = err.body().unwrap_or_default(),
        code = err.error_code(),
        "{}: {}",
        context,
        err
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_construction() {
        let config = MailerLiteConfig::new("k").with_base_url("http://localhost:8080/api");
        let client = MailerLiteClient::new(&config).unwrap();
        assert_eq!(client.url("/groups"), "http://localhost:8080/api/groups");

        let trailing = MailerLiteConfig::new("k").with_base_url("http://localhost:8080/api/");
        let client = MailerLiteClient::new(&trailing).unwrap();
        assert_eq!(client.url("/groups"), "http://localhost:8080/api/groups");
    }

    #[test]
    fn test_default_base_url() {
        let client = MailerLiteClient::new(&MailerLiteConfig::new("k")).unwrap();
        assert_eq!(client.base_url(), "https://connect.mailerlite.com/api");
    }

    #[test]
    fn test_headers() {
        let headers = default_headers("abc").unwrap();
        assert_eq!(headers[CONTENT_TYPE], "application/json");
        assert_eq!(headers[ACCEPT], "application/json");
        assert_eq!(headers[AUTHORIZATION], "Bearer abc");
        assert!(headers[AUTHORIZATION].is_sensitive());
    }

    #[test]
    fn test_api_key_with_newline_is_rejected() {
        let err = default_headers("abc\ndef").unwrap_err();
        assert_eq!(err.error_code(), "CONFIGURATION_ERROR");
    }
}
