//! REST implementation of the document store seam.
//!
//! Speaks to the hosted document API with `reqwest`:
//!
//! - `POST   {base}/collections/projects` - create, returns `{"id": ...}`
//! - `GET    {base}/collections/projects` - ordered list, newest first
//! - `GET    {base}/collections/projects/{id}` - point get, 404 means absent
//! - `PATCH  {base}/collections/projects/{id}` - field set + array-union merge

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::StatusCode;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::config::ClientConfig;

use super::types::{BackerDoc, CommentDoc, ProjectDoc};
use super::{DocumentStore, ProjectPatch, RemoteError, StoredDoc};

/// Client for the hosted document API.
#[derive(Clone)]
pub struct RestDocumentStore {
    inner: Arc<RestStoreInner>,
}

struct RestStoreInner {
    client: reqwest::Client,
    base: String,
    token: SecretString,
}

/// Response body of a create call.
#[derive(Debug, Deserialize)]
struct CreateResponse {
    id: String,
}

/// One document in a list or point-get response.
#[derive(Debug, Deserialize)]
struct DocEnvelope {
    id: String,
    #[serde(flatten)]
    doc: ProjectDoc,
}

/// Response body of a list call.
#[derive(Debug, Deserialize)]
struct ListResponse {
    #[serde(default)]
    documents: Vec<DocEnvelope>,
}

/// Wire body of an update call.
#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
struct UpdateBody {
    #[serde(skip_serializing_if = "Option::is_none")]
    set: Option<SetOps>,
    #[serde(skip_serializing_if = "Option::is_none")]
    array_union: Option<ArrayUnionOps>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SetOps {
    current_funding: rust_decimal::Decimal,
}

#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
struct ArrayUnionOps {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    backers: Vec<BackerDoc>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    comments: Vec<CommentDoc>,
}

impl From<ProjectPatch> for UpdateBody {
    fn from(patch: ProjectPatch) -> Self {
        let set = patch
            .current_funding
            .map(|current_funding| SetOps { current_funding });

        let mut arrays = ArrayUnionOps::default();
        if let Some(backer) = patch.add_backer {
            arrays.backers.push(backer);
        }
        if let Some(comment) = patch.add_comment {
            arrays.comments.push(comment);
        }
        let array_union =
            (!arrays.backers.is_empty() || !arrays.comments.is_empty()).then_some(arrays);

        Self { set, array_union }
    }
}

impl RestDocumentStore {
    /// Create a store client from configuration.
    #[must_use]
    pub fn new(config: &ClientConfig) -> Self {
        Self {
            inner: Arc::new(RestStoreInner {
                client: reqwest::Client::new(),
                base: config.store_url.as_str().trim_end_matches('/').to_owned(),
                token: config.store_token.clone(),
            }),
        }
    }

    fn collection_url(&self) -> String {
        format!("{}/collections/projects", self.inner.base)
    }

    fn document_url(&self, id: &str) -> String {
        format!("{}/collections/projects/{id}", self.inner.base)
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        request.bearer_auth(self.inner.token.expose_secret())
    }

    /// Read a response body, mapping non-success statuses to [`RemoteError`].
    async fn read_success(response: reqwest::Response) -> Result<String, RemoteError> {
        let status = response.status();

        if status == StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get("Retry-After")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse::<u64>().ok())
                .unwrap_or(1);
            return Err(RemoteError::RateLimited(retry_after));
        }

        // Take the body as text first for better error diagnostics
        let body = response.text().await?;

        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(RemoteError::Permission(excerpt(&body)));
        }

        if !status.is_success() {
            tracing::error!(
                status = %status,
                body = %excerpt(&body),
                "document store returned non-success status"
            );
            return Err(RemoteError::Status {
                status: status.as_u16(),
                message: excerpt(&body),
            });
        }

        Ok(body)
    }

    fn parse<T: serde::de::DeserializeOwned>(body: &str) -> Result<T, RemoteError> {
        serde_json::from_str(body).map_err(|e| {
            tracing::error!(
                error = %e,
                body = %excerpt(body),
                "failed to parse document store response"
            );
            RemoteError::Parse(e)
        })
    }
}

fn excerpt(body: &str) -> String {
    body.chars().take(200).collect()
}

#[async_trait]
impl DocumentStore for RestDocumentStore {
    #[instrument(skip(self, doc), fields(title = %doc.title))]
    async fn create_project(&self, doc: ProjectDoc) -> Result<String, RemoteError> {
        let response = self
            .authorize(self.inner.client.post(self.collection_url()))
            .json(&doc)
            .send()
            .await?;

        let body = Self::read_success(response).await?;
        let created: CreateResponse = Self::parse(&body)?;
        debug!(id = %created.id, "project created");
        Ok(created.id)
    }

    #[instrument(skip(self))]
    async fn list_projects(&self) -> Result<Vec<StoredDoc>, RemoteError> {
        let response = self
            .authorize(self.inner.client.get(self.collection_url()))
            .query(&[("orderBy", "createdAt"), ("direction", "desc")])
            .send()
            .await?;

        let body = Self::read_success(response).await?;
        let list: ListResponse = Self::parse(&body)?;
        Ok(list
            .documents
            .into_iter()
            .map(|envelope| StoredDoc {
                id: envelope.id,
                doc: envelope.doc,
            })
            .collect())
    }

    #[instrument(skip(self), fields(id = %id))]
    async fn get_project(&self, id: &str) -> Result<Option<StoredDoc>, RemoteError> {
        let response = self
            .authorize(self.inner.client.get(self.document_url(id)))
            .send()
            .await?;

        // A missing document is a normal return, not an error path
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        let body = Self::read_success(response).await?;
        let envelope: DocEnvelope = Self::parse(&body)?;
        Ok(Some(StoredDoc {
            id: envelope.id,
            doc: envelope.doc,
        }))
    }

    #[instrument(skip(self, patch), fields(id = %id))]
    async fn update_project(&self, id: &str, patch: ProjectPatch) -> Result<(), RemoteError> {
        let body = UpdateBody::from(patch);
        let response = self
            .authorize(self.inner.client.patch(self.document_url(id)))
            .json(&body)
            .send()
            .await?;

        Self::read_success(response).await?;
        Ok(())
    }
}
