use std::sync::Arc;

use async_trait::async_trait;
use firestore_client::{Document, FirestoreClient};
use serde::de::DeserializeOwned;
use serde_json::Value as JsonValue;
use tracing::{debug, info};

use observatory_common::{Collection, Config, FetchError, Risk, Solution, StoreTarget};

/// Read access to the two backing collections.
///
/// Each call is a full scan. The two calls are independent: one failing says
/// nothing about the other. Returned order is store-defined.
#[async_trait]
pub trait RiskGateway: Send + Sync {
    async fn list_risks(&self) -> Result<Vec<Risk>, FetchError>;

    async fn list_solutions(&self) -> Result<Vec<Solution>, FetchError>;
}

#[async_trait]
impl<G: RiskGateway + ?Sized> RiskGateway for Arc<G> {
    async fn list_risks(&self) -> Result<Vec<Risk>, FetchError> {
        (**self).list_risks().await
    }

    async fn list_solutions(&self) -> Result<Vec<Solution>, FetchError> {
        (**self).list_solutions().await
    }
}

// ---------------------------------------------------------------------------
// Firestore (production and emulator)
// ---------------------------------------------------------------------------

pub struct FirestoreGateway {
    client: FirestoreClient,
}

impl FirestoreGateway {
    pub fn new(client: FirestoreClient) -> Self {
        Self { client }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(client_from_config(config))
    }

    pub fn client(&self) -> &FirestoreClient {
        &self.client
    }

    async fn list_collection<T: DeserializeOwned>(
        &self,
        collection: Collection,
    ) -> Result<Vec<T>, FetchError> {
        let documents = self
            .client
            .list_documents(collection.as_str())
            .await
            .map_err(|e| FetchError::new(collection, e.to_string()))?;

        debug!(%collection, count = documents.len(), "Decoding documents");
        documents
            .iter()
            .map(decode_document::<T>)
            .collect::<Result<Vec<T>, String>>()
            .map_err(|msg| FetchError::new(collection, msg))
    }
}

#[async_trait]
impl RiskGateway for FirestoreGateway {
    async fn list_risks(&self) -> Result<Vec<Risk>, FetchError> {
        self.list_collection(Collection::Risks).await
    }

    async fn list_solutions(&self) -> Result<Vec<Solution>, FetchError> {
        self.list_collection(Collection::Solutions).await
    }
}

/// Build a store client for the configured target. A bearer token, when
/// present, takes precedence over the API key.
pub fn client_from_config(config: &Config) -> FirestoreClient {
    match &config.target {
        StoreTarget::Emulator { host } => {
            info!(host = host.as_str(), "Routing store traffic to the local emulator");
            FirestoreClient::emulator(host, &config.project_id, &config.database)
        }
        StoreTarget::Production { endpoint } => {
            let client = FirestoreClient::new(endpoint, &config.project_id, &config.database);
            match (&config.access_token, &config.api_key) {
                (Some(token), _) => client.with_bearer_token(token.clone()),
                (None, Some(key)) => client.with_api_key(key.clone()),
                (None, None) => client,
            }
        }
    }
}

/// Map a stored document onto a record. The document key becomes `id`,
/// replacing any `id` field stored in the body.
pub fn decode_document<T: DeserializeOwned>(doc: &Document) -> Result<T, String> {
    let mut body = doc.to_json_object().map_err(|e| e.to_string())?;
    body.insert("id".to_string(), JsonValue::String(doc.id().to_string()));
    serde_json::from_value(JsonValue::Object(body))
        .map_err(|e| format!("malformed document {}: {e}", doc.id()))
}
