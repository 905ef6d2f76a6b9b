//! Qdrant vector store adapter

use async_trait::async_trait;
use qdrant_client::prelude::*;
use qdrant_client::qdrant::value::Kind;
use qdrant_client::qdrant::vectors_config::Config as VectorsConfig;
use qdrant_client::qdrant::{CreateCollection, Distance, SearchPoints, Value, VectorParams};
use std::collections::HashMap;
use std::env;

use stp_core::{Document, Error, Result, SearchHit, VectorStore};

/// Collection holding one point per ingested textbook file.
pub const COLLECTION_NAME: &str = "textbook_chapters";

/// Qdrant-backed vector store.
///
/// The collection is pinned to a single embedding dimension at creation;
/// `upsert` rejects vectors of any other dimension.
pub struct QdrantStore {
    client: QdrantClient,
    collection_name: String,
    dimension: u64,
}

impl QdrantStore {
    /// Connect to Qdrant at `url` (gRPC port), optionally authenticated.
    pub fn new(url: &str, api_key: Option<String>, dimension: usize) -> Result<Self> {
        let mut config = QdrantClientConfig::from_url(url);
        config.api_key = api_key;

        let client = config
            .build()
            .map_err(|e| Error::StoreUnavailable(e.to_string()))?;

        Ok(Self {
            client,
            collection_name: COLLECTION_NAME.to_string(),
            dimension: dimension as u64,
        })
    }

    /// Connect using `QDRANT_URL` / `QDRANT_API_KEY`.
    pub fn from_env(dimension: usize) -> Result<Self> {
        dotenvy::dotenv().ok();

        let url = env::var("QDRANT_URL").unwrap_or_else(|_| "http://localhost:6334".to_string());
        let api_key = env::var("QDRANT_API_KEY").ok().filter(|key| !key.is_empty());

        Self::new(&url, api_key, dimension)
    }

    /// Override the collection name (used by tests and one-off loads).
    pub fn with_collection(mut self, name: impl Into<String>) -> Self {
        self.collection_name = name.into();
        self
    }

    fn payload_str(payload: &HashMap<String, Value>, key: &str) -> String {
        payload
            .get(key)
            .and_then(|value| match &value.kind {
                Some(Kind::StringValue(s)) => Some(s.clone()),
                _ => None,
            })
            .unwrap_or_default()
    }
}

#[async_trait]
impl VectorStore for QdrantStore {
    async fn ensure_collection(&self) -> Result<()> {
        let collections = self
            .client
            .list_collections()
            .await
            .map_err(|e| Error::StoreUnavailable(e.to_string()))?;

        let exists = collections
            .collections
            .iter()
            .any(|collection| collection.name == self.collection_name);

        if !exists {
            let create = CreateCollection {
                collection_name: self.collection_name.clone(),
                vectors_config: Some(
                    VectorsConfig::Params(VectorParams {
                        size: self.dimension,
                        distance: Distance::Cosine.into(),
                        ..Default::default()
                    })
                    .into(),
                ),
                ..Default::default()
            };

            self.client
                .create_collection(&create)
                .await
                .map_err(|e| Error::StoreUnavailable(e.to_string()))?;
        }

        Ok(())
    }

    async fn upsert(&self, document: &Document, vector: Vec<f32>) -> Result<()> {
        if vector.len() as u64 != self.dimension {
            return Err(Error::VectorStore(format!(
                "vector of dimension {} does not match collection dimension {}",
                vector.len(),
                self.dimension
            )));
        }

        let mut payload = HashMap::new();
        payload.insert("text".to_string(), Value::from(document.text.clone()));
        payload.insert(
            "chapter_slug".to_string(),
            Value::from(document.chapter_slug.clone()),
        );
        payload.insert(
            "section_title".to_string(),
            Value::from(document.section_title.clone()),
        );

        let point = PointStruct::new(document.id.clone(), vector, payload);

        self.client
            .upsert_points_blocking(&self.collection_name, None, vec![point], None)
            .await
            .map_err(|e| Error::StoreUnavailable(e.to_string()))?;

        Ok(())
    }

    async fn search(&self, vector: Vec<f32>, limit: u64) -> Result<Vec<SearchHit>> {
        let search_points = SearchPoints {
            collection_name: self.collection_name.clone(),
            vector,
            limit,
            with_payload: Some(true.into()),
            ..Default::default()
        };

        let response = self
            .client
            .search_points(&search_points)
            .await
            .map_err(|e| Error::StoreUnavailable(e.to_string()))?;

        let mut hits = Vec::with_capacity(response.result.len());
        for point in response.result {
            hits.push(SearchHit {
                text: Self::payload_str(&point.payload, "text"),
                chapter_slug: Self::payload_str(&point.payload, "chapter_slug"),
                section_title: Self::payload_str(&point.payload, "section_title"),
                score: point.score,
            });
        }

        Ok(hits)
    }

    async fn count(&self) -> Result<usize> {
        let info = self
            .client
            .collection_info(&self.collection_name)
            .await
            .map_err(|e| Error::StoreUnavailable(e.to_string()))?;

        Ok(info
            .result
            .and_then(|collection| collection.points_count)
            .unwrap_or(0) as usize)
    }
}
