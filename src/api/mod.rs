//! HTTP plumbing and the per-resource gateways.

pub mod auth;
pub mod database;
pub mod engineer;
pub mod society;

use std::marker::PhantomData;
use std::sync::Arc;

use async_trait::async_trait;
use reqwest::{Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};
use url::Url;

use crate::config::ConsoleConfig;
use crate::error::ConsoleError;
use crate::models::{BatchType, Engineer, EngineerType, Resource, Society, User};
use crate::session::Session;

pub use auth::AuthGateway;
pub use database::{BackupDownload, DatabaseGateway};

/// Shared HTTP client bound to one backend and one session.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
    session: Arc<Session>,
    log_requests: bool,
}

impl ApiClient {
    pub fn new(base_url: &str, session: Arc<Session>) -> Result<Self, ConsoleError> {
        let parsed = Url::parse(base_url).map_err(|e| ConsoleError::InvalidUrl(format!("{base_url}: {e}")))?;
        if parsed.cannot_be_a_base() {
            return Err(ConsoleError::InvalidUrl(format!("{base_url}: not a base URL")));
        }

        Ok(Self {
            http: reqwest::Client::new(),
            base_url: parsed,
            session,
            log_requests: true,
        })
    }

    pub fn from_config(config: &ConsoleConfig, session: Arc<Session>) -> Result<Self, ConsoleError> {
        let mut client = Self::new(&config.api.base_url, session)?;
        client.log_requests = config.api.enable_request_logging;
        Ok(client)
    }

    pub fn session(&self) -> &Arc<Session> {
        &self.session
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Appends percent-encoded path segments to the base URL.
    pub fn url<I, S>(&self, segments: I) -> Url
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut url = self.base_url.clone();
        // Checked in `new`: the base URL can always take path segments
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    /// Request with the bearer token current at call time.
    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        if self.log_requests {
            debug!(%method, %url, "api request");
        }

        let builder = self.http.request(method, url);
        match self.session.token() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn send(&self, builder: RequestBuilder) -> Result<Response, ConsoleError> {
        let response = builder.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        warn!(status = status.as_u16(), "api request failed");
        Err(ConsoleError::from_response(status.as_u16(), &body))
    }

    pub async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, ConsoleError> {
        let response = self.send(self.request(Method::GET, url)).await?;
        Ok(response.json::<T>().await?)
    }

    pub async fn post_json<B, T>(&self, url: Url, body: &B) -> Result<T, ConsoleError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self.send(self.request(Method::POST, url).json(body)).await?;
        Ok(response.json::<T>().await?)
    }

    pub async fn put_json<B, T>(&self, url: Url, body: &B) -> Result<T, ConsoleError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self.send(self.request(Method::PUT, url).json(body)).await?;
        Ok(response.json::<T>().await?)
    }

    pub async fn delete(&self, url: Url) -> Result<(), ConsoleError> {
        self.send(self.request(Method::DELETE, url)).await?;
        Ok(())
    }

    /// POST with an empty JSON object, returning the raw response.
    pub async fn post_empty(&self, url: Url) -> Result<Response, ConsoleError> {
        self.send(self.request(Method::POST, url).json(&serde_json::json!({}))).await
    }

    /// POST that must not carry a bearer header (login).
    pub async fn post_public_json<B, T>(&self, url: Url, body: &B) -> Result<T, ConsoleError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        if self.log_requests {
            debug!(%url, "public api request");
        }
        let response = self.send(self.http.post(url).json(body)).await?;
        Ok(response.json::<T>().await?)
    }
}

/// Contract shared by every resource gateway: one request per call, token
/// attached, errors returned untouched.
#[async_trait]
pub trait ResourceGateway<R: Resource>: Send + Sync {
    async fn list(&self) -> Result<Vec<R>, ConsoleError>;

    async fn get_by_key(&self, key: &R::Key) -> Result<R, ConsoleError>;

    async fn create(&self, request: &R::Request) -> Result<R, ConsoleError>;

    async fn update(&self, id: &R::Id, request: &R::Request) -> Result<R, ConsoleError>;

    async fn delete(&self, id: &R::Id) -> Result<(), ConsoleError>;
}

/// Gateways that can fetch a per-name aggregate.
#[async_trait]
pub trait SummaryGateway: Send + Sync {
    type Summary: Send;

    async fn summary(&self, name: &str) -> Result<Self::Summary, ConsoleError>;
}

/// REST gateway for the collection named by `R::COLLECTION`.
#[derive(Debug, Clone)]
pub struct Gateway<R> {
    client: ApiClient,
    _resource: PhantomData<fn() -> R>,
}

pub type EngineerGateway = Gateway<Engineer>;
pub type SocietyGateway = Gateway<Society>;
pub type EngineerTypeGateway = Gateway<EngineerType>;
pub type BatchTypeGateway = Gateway<BatchType>;
pub type UserGateway = Gateway<User>;

impl<R: Resource> Gateway<R> {
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            _resource: PhantomData,
        }
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    /// Collection URL followed by `extra` segments.
    pub(crate) fn url(&self, extra: &[&str]) -> Url {
        self.client.url(R::COLLECTION.iter().chain(extra.iter()))
    }
}

#[async_trait]
impl<R: Resource> ResourceGateway<R> for Gateway<R> {
    async fn list(&self) -> Result<Vec<R>, ConsoleError> {
        self.client.get_json(self.url(&[])).await
    }

    async fn get_by_key(&self, key: &R::Key) -> Result<R, ConsoleError> {
        let key = key.to_string();
        self.client.get_json(self.url(&[key.as_str()])).await
    }

    async fn create(&self, request: &R::Request) -> Result<R, ConsoleError> {
        self.client.post_json(self.url(&[]), request).await
    }

    async fn update(&self, id: &R::Id, request: &R::Request) -> Result<R, ConsoleError> {
        let id = id.to_string();
        self.client.put_json(self.url(&[id.as_str()]), request).await
    }

    async fn delete(&self, id: &R::Id) -> Result<(), ConsoleError> {
        let id = id.to_string();
        self.client.delete(self.url(&[id.as_str()])).await
    }
}
