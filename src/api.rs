//! Group backend seam
//!
//! `GroupApi` is what an edit session talks to. `HttpGroupApi` implements it
//! against the HR REST backend (feature `client`).

use async_trait::async_trait;

use crate::error::Result;
use crate::group::{GroupPayload, GroupSummary, GroupUpdate};

#[async_trait]
pub trait GroupApi: Send + Sync {
    /// `GET /User/groups/{id}`
    async fn fetch_group(&self, group_id: &str) -> Result<GroupPayload>;

    /// `PATCH /User/groups/{id}` with the whole permission map
    async fn update_group(&self, group_id: &str, update: &GroupUpdate<'_>) -> Result<GroupPayload>;

    /// `GET /User/groups/all`
    async fn list_groups(&self) -> Result<Vec<GroupSummary>>;
}

#[cfg(feature = "client")]
pub use http::HttpGroupApi;

#[cfg(feature = "client")]
mod http {
    use async_trait::async_trait;
    use tracing::{debug, warn};

    use super::GroupApi;
    use crate::config::ClientConfig;
    use crate::error::{err, PermatrixError, Result};
    use crate::group::{GroupListResponse, GroupPayload, GroupResponse, GroupSummary, GroupUpdate};

    /// reqwest-backed `GroupApi`
    pub struct HttpGroupApi {
        client: reqwest::Client,
        config: ClientConfig,
    }

    impl HttpGroupApi {
        pub fn new(config: ClientConfig) -> Result<Self> {
            config.validate()?;
            let client = reqwest::Client::builder()
                .timeout(config.timeout)
                .build()
                .map_err(err)?;
            Ok(HttpGroupApi { client, config })
        }

        pub fn config(&self) -> &ClientConfig {
            &self.config
        }

        fn authed(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
            match &self.config.token {
                Some(t) => req.bearer_auth(t),
                None => req,
            }
        }

        async fn send<T: serde::de::DeserializeOwned>(
            &self,
            req: reqwest::RequestBuilder,
        ) -> Result<T> {
            let response = self.authed(req).send().await.map_err(err)?;
            if !response.status().is_success() {
                let status = response.status().as_u16();
                let body = match response.text().await {
                    Ok(body) => body,
                    Err(e) => {
                        warn!(status, error = %e, "could not read error body");
                        String::new()
                    }
                };
                return Err(PermatrixError::Api { status, body });
            }
            let bytes = response.bytes().await.map_err(err)?;
            Ok(serde_json::from_slice(&bytes)?)
        }
    }

    #[async_trait]
    impl GroupApi for HttpGroupApi {
        async fn fetch_group(&self, group_id: &str) -> Result<GroupPayload> {
            let url = self.config.group_url(group_id);
            debug!(%url, "fetching group");
            let r: GroupResponse = self.send(self.client.get(&url)).await?;
            Ok(r.into_payload())
        }

        async fn update_group(
            &self,
            group_id: &str,
            update: &GroupUpdate<'_>,
        ) -> Result<GroupPayload> {
            let url = self.config.group_url(group_id);
            debug!(%url, modules = update.permissions.len(), "patching group");
            let r: GroupResponse = self.send(self.client.patch(&url).json(update)).await?;
            Ok(r.into_payload())
        }

        async fn list_groups(&self) -> Result<Vec<GroupSummary>> {
            let url = self.config.group_url("all");
            let r: GroupListResponse = self.send(self.client.get(&url)).await?;
            Ok(r.into_groups())
        }
    }
}
