//! `reqwest` implementation of the backend traits.

use std::collections::BTreeMap;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Method, RequestBuilder, Url};
use serde_json::{Map, Value};

use crate::domain::resource::{Endpoints, UpdateMethod};
use crate::domain::types::{EntityId, FlagName};
use crate::dto::api::{Acknowledgement, ApiEnvelope, ListPage, ListQuery};
use crate::dto::payload::{MultipartBody, Payload};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{CollectionReader, CollectionWriter, DashboardReader};

/// Talks to the booking backend over HTTP.
#[derive(Clone, Debug)]
pub struct HttpRepository {
    client: Client,
    base_url: Url,
}

impl HttpRepository {
    pub fn new(base_url: &str) -> RepositoryResult<Self> {
        Self::with_timeout(base_url, None)
    }

    /// Builds a repository whose requests give up after `timeout`.
    pub fn with_timeout(base_url: &str, timeout: Option<Duration>) -> RepositoryResult<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|e| RepositoryError::InvalidEndpoint(format!("{base_url}: {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(RepositoryError::InvalidEndpoint(base_url.to_string()));
        }

        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            base_url,
        })
    }

    /// Appends an endpoint path to the base URL, keeping any base path prefix.
    fn url(&self, path: &str) -> Url {
        let mut url = self.base_url.clone();
        let joined = format!(
            "{}/{}",
            url.path().trim_end_matches('/'),
            path.trim_start_matches('/')
        );
        url.set_path(&joined);
        url
    }

    async fn send(&self, request: RequestBuilder) -> RepositoryResult<ApiEnvelope<Value>> {
        let response = request.send().await?;
        let status = response.status();
        let body = response.bytes().await?;
        let envelope = serde_json::from_slice::<ApiEnvelope<Value>>(&body);

        if !status.is_success() {
            let message = envelope.ok().and_then(|envelope| envelope.message);
            log::warn!("Backend answered {status}: {message:?}");
            return Err(RepositoryError::Status {
                status: status.as_u16(),
                message,
            });
        }

        let envelope = envelope?;
        if !envelope.success {
            return Err(RepositoryError::Rejected(envelope.message));
        }

        Ok(envelope)
    }

    fn with_payload(
        request: RequestBuilder,
        payload: &Payload,
    ) -> RepositoryResult<RequestBuilder> {
        Ok(match payload {
            Payload::Json(value) => request.json(value),
            Payload::Multipart(body) => request.multipart(multipart_form(body)?),
        })
    }
}

fn multipart_form(body: &MultipartBody) -> RepositoryResult<Form> {
    let mut form = Form::new();
    for (name, value) in &body.fields {
        form = form.text(name.clone(), value.clone());
    }
    for file in &body.files {
        let part = Part::bytes(file.bytes.clone())
            .file_name(file.file_name.clone())
            .mime_str(&file.content_type)?;
        form = form.part(file.field.clone(), part);
    }
    Ok(form)
}

#[async_trait]
impl CollectionReader for HttpRepository {
    async fn list_records(
        &self,
        endpoints: &Endpoints,
        query: &ListQuery,
    ) -> RepositoryResult<ListPage> {
        let url = self.url(&endpoints.list);
        log::debug!("GET {url} {:?}", query.to_pairs());

        let envelope = self
            .send(self.client.get(url).query(&query.to_pairs()))
            .await?;

        Ok(ListPage::from_envelope(envelope)?)
    }
}

#[async_trait]
impl CollectionWriter for HttpRepository {
    async fn create_record(
        &self,
        endpoints: &Endpoints,
        payload: &Payload,
    ) -> RepositoryResult<Acknowledgement> {
        let url = self.url(&endpoints.collection);
        log::debug!("POST {url}");

        let request = Self::with_payload(self.client.post(url), payload)?;
        Ok(self.send(request).await?.into())
    }

    async fn update_record(
        &self,
        endpoints: &Endpoints,
        id: &EntityId,
        payload: &Payload,
    ) -> RepositoryResult<Acknowledgement> {
        let url = self.url(&endpoints.item_path(id));
        let method = match endpoints.update_method {
            UpdateMethod::Patch => Method::PATCH,
            UpdateMethod::Put => Method::PUT,
        };
        log::debug!("{method} {url}");

        let request = Self::with_payload(self.client.request(method, url), payload)?;
        Ok(self.send(request).await?.into())
    }

    async fn delete_record(
        &self,
        endpoints: &Endpoints,
        id: &EntityId,
    ) -> RepositoryResult<Acknowledgement> {
        let url = self.url(&endpoints.item_path(id));
        log::debug!("DELETE {url}");

        Ok(self.send(self.client.delete(url)).await?.into())
    }

    async fn set_flag(
        &self,
        endpoints: &Endpoints,
        id: &EntityId,
        flag: &FlagName,
        value: bool,
    ) -> RepositoryResult<Acknowledgement> {
        let url = self.url(&endpoints.item_path(id));
        log::debug!("PATCH {url} {flag}={value}");

        let mut body = Map::new();
        body.insert(flag.as_str().to_string(), Value::Bool(value));

        let request = self.client.patch(url).json(&Value::Object(body));
        Ok(self.send(request).await?.into())
    }
}

#[async_trait]
impl DashboardReader for HttpRepository {
    async fn resource_counts(&self, endpoint: &str) -> RepositoryResult<BTreeMap<String, u64>> {
        let url = self.url(endpoint);
        log::debug!("GET {url}");

        let envelope = self.send(self.client.get(url)).await?;
        let data = envelope
            .data
            .ok_or_else(|| RepositoryError::Decode("dashboard response carries no data".into()))?;

        Ok(serde_json::from_value(data)?)
    }
}
