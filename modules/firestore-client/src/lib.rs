pub mod error;
pub mod types;
pub mod value;

pub use error::{FirestoreError, Result};
pub use types::{CommitResponse, Document, ListDocumentsResponse, Write};
pub use value::Value;

use reqwest::RequestBuilder;
use types::CommitRequest;

pub const PRODUCTION_ENDPOINT: &str = "https://firestore.googleapis.com/v1";
pub const DEFAULT_DATABASE: &str = "(default)";

/// Firestore rejects commits with more writes than this.
pub const MAX_BATCH_WRITES: usize = 500;

const PAGE_SIZE: u32 = 300;

/// The emulator accepts this bearer token as an admin and bypasses security rules.
const EMULATOR_TOKEN: &str = "owner";

#[derive(Debug, Clone)]
enum Auth {
    None,
    ApiKey(String),
    Bearer(String),
}

pub struct FirestoreClient {
    client: reqwest::Client,
    endpoint: String,
    project_id: String,
    database: String,
    auth: Auth,
}

impl FirestoreClient {
    pub fn new(endpoint: &str, project_id: &str, database: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.trim_end_matches('/').to_string(),
            project_id: project_id.to_string(),
            database: database.to_string(),
            auth: Auth::None,
        }
    }

    /// Client for a local emulator listening on `host` (e.g. `localhost:8080`).
    pub fn emulator(host: &str, project_id: &str, database: &str) -> Self {
        Self::new(&format!("http://{host}/v1"), project_id, database)
            .with_bearer_token(EMULATOR_TOKEN.to_string())
    }

    pub fn with_api_key(mut self, key: String) -> Self {
        self.auth = Auth::ApiKey(key);
        self
    }

    pub fn with_bearer_token(mut self, token: String) -> Self {
        self.auth = Auth::Bearer(token);
        self
    }

    pub fn project_id(&self) -> &str {
        &self.project_id
    }

    /// Resource path of the documents root, relative to the endpoint.
    fn documents_path(&self) -> String {
        format!(
            "projects/{}/databases/{}/documents",
            self.project_id, self.database
        )
    }

    /// Full resource name of a document, as used in writes.
    pub fn document_name(&self, collection: &str, id: &str) -> String {
        format!("{}/{}/{}", self.documents_path(), collection, id)
    }

    fn collection_url(&self, collection: &str) -> String {
        format!("{}/{}/{}", self.endpoint, self.documents_path(), collection)
    }

    fn commit_url(&self) -> String {
        format!("{}/{}:commit", self.endpoint, self.documents_path())
    }

    fn authorize(&self, req: RequestBuilder) -> RequestBuilder {
        match &self.auth {
            Auth::None => req,
            Auth::ApiKey(key) => req.query(&[("key", key.as_str())]),
            Auth::Bearer(token) => req.bearer_auth(token),
        }
    }

    /// List every document in a top-level collection, following page tokens
    /// until the collection is exhausted. Order is whatever the store returns.
    pub async fn list_documents(&self, collection: &str) -> Result<Vec<Document>> {
        let url = self.collection_url(collection);
        let mut documents = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let mut req = self
                .client
                .get(&url)
                .query(&[("pageSize", PAGE_SIZE.to_string())]);
            if let Some(token) = &page_token {
                req = req.query(&[("pageToken", token.as_str())]);
            }

            let resp = self.authorize(req).send().await?;
            let status = resp.status();
            if !status.is_success() {
                let body = resp.text().await.unwrap_or_default();
                return Err(FirestoreError::Api {
                    status: status.as_u16(),
                    message: body,
                });
            }

            let page: ListDocumentsResponse = resp.json().await?;
            tracing::debug!(
                collection,
                count = page.documents.len(),
                has_more = page.next_page_token.is_some(),
                "Fetched document page"
            );
            documents.extend(page.documents);

            match page.next_page_token {
                Some(token) if !token.is_empty() => page_token = Some(token),
                _ => break,
            }
        }

        Ok(documents)
    }

    /// Apply a batch of writes atomically. Callers keep batches at or below
    /// [`MAX_BATCH_WRITES`].
    pub async fn commit(&self, writes: &[Write]) -> Result<CommitResponse> {
        if writes.is_empty() {
            return Ok(CommitResponse::default());
        }

        let req = self
            .client
            .post(self.commit_url())
            .json(&CommitRequest { writes });
        let resp = self.authorize(req).send().await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(FirestoreError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let committed: CommitResponse = resp.json().await?;
        tracing::debug!(writes = writes.len(), "Committed write batch");
        Ok(committed)
    }
}
