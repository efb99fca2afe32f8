//! ARM Client
//!
//! Combines the HTTP layer with typed resource IDs and response models.
//! Token acquisition is left to the caller.

use super::http::ArmHttpClient;
use super::models::{MachineLearningCompute, Page, ReplicationProtectedItem};
use crate::config::ClientConfig;
use crate::recaser::{default_registry, Registry};
use crate::resourceids::{MachineLearningComputeId, ReplicationProtectedItemId, ResourceId};
use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use url::Url;

/// Upper bound on followed `nextLink`s for one listing
const MAX_PAGES: usize = 1000;

/// Main ARM client
#[derive(Clone)]
pub struct ArmClient {
    pub http: ArmHttpClient,
    endpoint: Url,
    token: String,
    registry: &'static Registry,
    recovery_services_api_version: String,
    machine_learning_api_version: String,
}

impl ArmClient {
    /// Create a client from configuration and a bearer token
    pub fn new(config: &ClientConfig, token: impl Into<String>) -> Result<Self> {
        let endpoint = config.effective_endpoint(None)?;
        let http = ArmHttpClient::new(&config.effective_user_agent())?;

        Ok(Self {
            http,
            endpoint,
            token: token.into(),
            registry: default_registry(),
            recovery_services_api_version: config.recovery_services_api_version().to_string(),
            machine_learning_api_version: config.machine_learning_api_version().to_string(),
        })
    }

    /// Use `registry` instead of the built-in one when normalizing IDs
    pub fn with_registry(mut self, registry: &'static Registry) -> Self {
        self.registry = registry;
        self
    }

    /// Replace the bearer token (e.g. after a refresh)
    pub fn set_token(&mut self, token: impl Into<String>) {
        self.token = token.into();
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    pub fn registry(&self) -> &'static Registry {
        self.registry
    }

    /// Build the request URL for a resource
    pub fn resource_url<T: ResourceId>(&self, id: &T, api_version: &str) -> Result<String> {
        self.request_url(id, None, api_version)
    }

    /// Build the request URL for a child collection of a resource
    pub fn collection_url<T: ResourceId>(&self, parent: &T, collection: &str, api_version: &str) -> Result<String> {
        self.request_url(parent, Some(collection), api_version)
    }

    /// Each ID segment is percent-encoded on its own, so reserved characters
    /// in names stay inside their segment
    fn request_url<T: ResourceId>(&self, id: &T, collection: Option<&str>, api_version: &str) -> Result<String> {
        let mut url = self.endpoint.clone();
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|_| anyhow::anyhow!("Endpoint cannot carry a path: {}", self.endpoint))?;
            segments.pop_if_empty();
            for segment in T::schema().segments() {
                let value = segment
                    .literal()
                    .or_else(|| id.value_for(segment.key()))
                    .unwrap_or_default();
                segments.push(value);
            }
            if let Some(collection) = collection {
                segments.push(collection);
            }
        }
        url.query_pairs_mut().append_pair("api-version", api_version);
        Ok(url.into())
    }

    /// GET a resource and decode it
    pub async fn get_resource<T, M>(&self, id: &T, api_version: &str) -> Result<M>
    where
        T: ResourceId,
        M: DeserializeOwned,
    {
        let url = self.resource_url(id, api_version)?;
        let response = self.http.get(&url, &self.token).await?;
        serde_json::from_value(response).with_context(|| format!("Failed to decode {}", id.id()))
    }

    /// PUT a resource body, returning the service's response
    pub async fn put_resource<T, B>(&self, id: &T, api_version: &str, body: &B) -> Result<Value>
    where
        T: ResourceId,
        B: Serialize,
    {
        let url = self.resource_url(id, api_version)?;
        let body = serde_json::to_value(body).context("Failed to encode request body")?;
        self.http.put(&url, &self.token, &body).await
    }

    /// DELETE a resource
    pub async fn delete_resource<T: ResourceId>(&self, id: &T, api_version: &str) -> Result<()> {
        let url = self.resource_url(id, api_version)?;
        self.http.delete(&url, &self.token).await?;
        Ok(())
    }

    /// GET every page of a list response, following `nextLink`.
    ///
    /// A `nextLink` outside the endpoint's origin is an error; the bearer
    /// token is only sent to the configured endpoint.
    pub async fn list_all<M: DeserializeOwned>(&self, url: &str) -> Result<Vec<M>> {
        let mut all_items = Vec::new();
        let mut next_url = Some(url.to_string());
        let mut pages = 0;

        while let Some(url) = next_url {
            if pages == MAX_PAGES {
                tracing::warn!("stopping after {} pages", MAX_PAGES);
                break;
            }
            pages += 1;

            let response = self.http.get(&url, &self.token).await?;
            let page: Page<M> =
                serde_json::from_value(response).context("Failed to decode list response")?;
            all_items.extend(page.value);

            next_url = match page.next_link.filter(|link| !link.is_empty()) {
                Some(link) => Some(self.check_next_link(&link)?),
                None => None,
            };
        }

        tracing::debug!("listed {} items over {} pages", all_items.len(), pages);
        Ok(all_items)
    }

    fn check_next_link(&self, link: &str) -> Result<String> {
        let next = Url::parse(link).with_context(|| format!("Invalid nextLink: {}", link))?;
        if next.origin() != self.endpoint.origin() {
            anyhow::bail!(
                "Refusing to follow nextLink to {} outside {}",
                next.origin().ascii_serialization(),
                self.endpoint.origin().ascii_serialization()
            );
        }
        Ok(next.into())
    }

    // =========================================================================
    // Site Recovery helpers
    // =========================================================================

    /// GET a replication protected item with its IDs re-cased
    pub async fn get_replication_protected_item(
        &self,
        id: &ReplicationProtectedItemId,
    ) -> Result<ReplicationProtectedItem> {
        let mut item: ReplicationProtectedItem = self
            .get_resource(id, &self.recovery_services_api_version)
            .await?;
        item.normalize_ids(self.registry);
        Ok(item)
    }

    /// Every protected item of the container `id` belongs to
    pub async fn list_replication_protected_items(
        &self,
        id: &ReplicationProtectedItemId,
    ) -> Result<Vec<ReplicationProtectedItem>> {
        let url = self.collection_url(
            &id.container_id(),
            "replicationProtectedItems",
            &self.recovery_services_api_version,
        )?;
        let mut items: Vec<ReplicationProtectedItem> = self.list_all(&url).await?;
        for item in &mut items {
            item.normalize_ids(self.registry);
        }
        Ok(items)
    }

    pub async fn put_replication_protected_item(
        &self,
        id: &ReplicationProtectedItemId,
        item: &ReplicationProtectedItem,
    ) -> Result<Value> {
        self.put_resource(id, &self.recovery_services_api_version, item)
            .await
    }

    pub async fn delete_replication_protected_item(&self, id: &ReplicationProtectedItemId) -> Result<()> {
        self.delete_resource(id, &self.recovery_services_api_version)
            .await
    }

    // =========================================================================
    // Machine Learning helpers
    // =========================================================================

    /// GET a workspace compute with its IDs re-cased
    pub async fn get_machine_learning_compute(
        &self,
        id: &MachineLearningComputeId,
    ) -> Result<MachineLearningCompute> {
        let mut compute: MachineLearningCompute = self
            .get_resource(id, &self.machine_learning_api_version)
            .await?;
        compute.normalize_ids(self.registry);
        Ok(compute)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resourceids::{EventHubId, SubscriptionId};

    fn client(endpoint: &str) -> ArmClient {
        let config = ClientConfig {
            endpoint: Some(endpoint.to_string()),
            ..Default::default()
        };
        ArmClient::new(&config, "token").unwrap()
    }

    #[test]
    fn test_resource_url() {
        let client = client("https://management.azure.com/");
        let id = EventHubId::new("sub", "rg", "ns", "hub");
        assert_eq!(
            client.resource_url(&id, "2021-11-01").unwrap(),
            "https://management.azure.com/subscriptions/sub/resourceGroups/rg/providers/Microsoft.EventHub/namespaces/ns/eventhubs/hub?api-version=2021-11-01"
        );
    }

    #[test]
    fn test_collection_url_with_endpoint_path() {
        let client = client("http://127.0.0.1:9000/arm/");
        let id = SubscriptionId::new("sub");
        assert_eq!(
            client.collection_url(&id, "resourcegroups", "2021-04-01").unwrap(),
            "http://127.0.0.1:9000/arm/subscriptions/sub/resourcegroups?api-version=2021-04-01"
        );
    }

    #[test]
    fn test_resource_url_escapes_reserved_characters() {
        let client = client("https://management.azure.com/");
        let id = EventHubId::new("sub", "rg", "ns", "eh#1?x=y z%");
        let url = Url::parse(&client.resource_url(&id, "2021-11-01").unwrap()).unwrap();

        assert_eq!(
            url.path(),
            "/subscriptions/sub/resourceGroups/rg/providers/Microsoft.EventHub/namespaces/ns/eventhubs/eh%231%3Fx=y%20z%25"
        );
        assert_eq!(url.query(), Some("api-version=2021-11-01"));
        assert_eq!(url.fragment(), None);
        assert_eq!(url.path_segments().map(Iterator::count), Some(10));
    }

    #[test]
    fn test_resource_url_keeps_slash_inside_value() {
        let client = client("https://management.azure.com/");
        let id = EventHubId::new("sub", "rg", "ns", "a/b");
        let url = client.resource_url(&id, "2021-11-01").unwrap();
        assert!(url.contains("/eventhubs/a%2Fb?api-version="));
    }

    #[test]
    fn test_next_link_must_stay_on_endpoint() {
        let client = client("http://127.0.0.1:9000/");
        assert_eq!(
            client.check_next_link("http://127.0.0.1:9000/page2?token=x").unwrap(),
            "http://127.0.0.1:9000/page2?token=x"
        );
        assert!(client.check_next_link("https://127.0.0.1:9000/page2").is_err());
        assert!(client.check_next_link("http://127.0.0.1:9001/page2").is_err());
        assert!(client.check_next_link("http://attacker.example/page2").is_err());
        assert!(client.check_next_link("/relative").is_err());
    }

    #[test]
    fn test_invalid_endpoint_is_rejected() {
        let config = ClientConfig {
            endpoint: Some("::".to_string()),
            ..Default::default()
        };
        assert!(ArmClient::new(&config, "token").is_err());
    }
}
