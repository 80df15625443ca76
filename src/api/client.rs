use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::api::auth::RequestAuth;
use crate::api::documents::{Operation, NEW_BLOG, NEW_COMMENT, NEW_POST, TOP_PAGE};
use crate::api::error::ApiError;
use crate::api::BlogApi;
use crate::auth::IdentityProvider;
use crate::config::{ApiConfig, ConfigError};
use crate::model::{Blog, Connection, CreateBlogInput, CreateCommentInput, CreatePostInput};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GraphqlRequest<'a, V> {
    query: &'a str,
    operation_name: &'a str,
    variables: V,
}

#[derive(Deserialize)]
struct GraphqlResponse<T> {
    data: Option<T>,
    #[serde(default)]
    errors: Vec<GraphqlErrorEntry>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GraphqlErrorEntry {
    message: String,
    #[serde(default)]
    error_type: Option<String>,
}

#[derive(Serialize)]
struct InputVariables<I> {
    input: I,
}

#[derive(Serialize)]
struct NoVariables {}

#[derive(Deserialize)]
struct Created {
    id: String,
}

/// GraphQL client for the blog backend.
pub struct GraphqlClient {
    client: Client,
    endpoint: String,
    auth: RequestAuth,
}

impl GraphqlClient {
    pub fn new(api: &ApiConfig, auth: RequestAuth) -> Result<Self, ApiError> {
        let client = Client::builder()
            .connect_timeout(api.connect_timeout())
            .timeout(api.request_timeout())
            .build()
            .map_err(ApiError::Client)?;

        Ok(Self {
            client,
            endpoint: api.endpoint.trim().to_string(),
            auth,
        })
    }

    /// Build a client whose credential follows `api.auth_mode`.
    pub fn from_config(
        api: &ApiConfig,
        identity: Arc<dyn IdentityProvider>,
    ) -> Result<Self, ClientSetupError> {
        let auth = RequestAuth::from_config(api, identity)?;
        Ok(Self::new(api, auth)?)
    }

    /// Execute one operation and decode its `data` object.
    pub async fn execute<V, T>(&self, operation: &Operation, variables: V) -> Result<T, ApiError>
    where
        V: Serialize + Send,
        T: DeserializeOwned + Send,
    {
        let body = GraphqlRequest {
            query: operation.document,
            operation_name: operation.name,
            variables,
        };

        let mut builder = self.client.post(&self.endpoint).json(&body);
        if let Some((name, value)) = self.auth.header() {
            builder = builder.header(name, value);
        }

        let response = builder.send().await.map_err(|source| ApiError::Transport {
            operation: operation.name,
            source,
        })?;

        let status = response.status();
        let bytes = response.bytes().await.map_err(|source| ApiError::Transport {
            operation: operation.name,
            source,
        })?;

        if !status.is_success() {
            return Err(ApiError::Status {
                operation: operation.name,
                status: status.as_u16(),
                body: String::from_utf8_lossy(&bytes).into_owned(),
            });
        }

        let decoded: GraphqlResponse<T> =
            serde_json::from_slice(&bytes).map_err(|source| ApiError::Decode {
                operation: operation.name,
                source,
            })?;

        if !decoded.errors.is_empty() {
            return Err(ApiError::Graphql {
                operation: operation.name,
                messages: decoded
                    .errors
                    .into_iter()
                    .map(|entry| match entry.error_type {
                        Some(kind) => format!("{}: {}", kind, entry.message),
                        None => entry.message,
                    })
                    .collect(),
            });
        }

        decoded.data.ok_or(ApiError::MissingData {
            operation: operation.name,
            field: "data",
        })
    }

    async fn create<I>(&self, operation: &Operation, input: I) -> Result<String, ApiError>
    where
        I: Serialize + Send,
    {
        let mut data: HashMap<String, Option<Created>> = self
            .execute(operation, InputVariables { input })
            .await?;

        let created = data
            .remove(operation.root_field)
            .flatten()
            .ok_or(ApiError::MissingData {
                operation: operation.name,
                field: operation.root_field,
            })?;

        tracing::debug!(operation = operation.name, id = %created.id, "created");
        Ok(created.id)
    }
}

#[async_trait]
impl BlogApi for GraphqlClient {
    async fn list_blogs(&self) -> Result<Vec<Blog>, ApiError> {
        let mut data: HashMap<String, Option<Connection<Blog>>> =
            self.execute(&TOP_PAGE, NoVariables {}).await?;

        let blogs = data
            .remove(TOP_PAGE.root_field)
            .flatten()
            .ok_or(ApiError::MissingData {
                operation: TOP_PAGE.name,
                field: TOP_PAGE.root_field,
            })?
            .into_present();

        tracing::debug!(count = blogs.len(), "fetched blogs");
        Ok(blogs)
    }

    async fn create_blog(&self, input: CreateBlogInput) -> Result<String, ApiError> {
        self.create(&NEW_BLOG, input).await
    }

    async fn create_post(&self, input: CreatePostInput) -> Result<String, ApiError> {
        self.create(&NEW_POST, input).await
    }

    async fn create_comment(&self, input: CreateCommentInput) -> Result<String, ApiError> {
        self.create(&NEW_COMMENT, input).await
    }
}

/// Failure while wiring the client from configuration.
#[derive(Debug, thiserror::Error)]
pub enum ClientSetupError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Api(#[from] ApiError),
}
