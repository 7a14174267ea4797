//! Conversion of agent output into chat-renderable parts

use std::collections::HashMap;

use async_trait::async_trait;
use base64::{engine::general_purpose, Engine as _};
use bytes::Bytes;
use serde::Serialize;
use serde_json::Value;
use tokio::sync::RwLock;
use tracing::{debug, info};
use uuid::Uuid;

use crate::{
    host::{error::HostError, state::ToolActions},
    protocol::{FilePart, Metadata, Part},
};

/// Key of the data part that stands in for a stored file
pub const ARTIFACT_FILE_ID_KEY: &str = "artifact-file-id";

const DEFAULT_FILE_MIME_TYPE: &str = "application/octet-stream";

/// One piece of an agent's answer, as the chat layer sees it
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ResponsePart {
    Text(String),
    Data(Metadata),
}

impl ResponsePart {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            ResponsePart::Text(text) => Some(text),
            ResponsePart::Data(_) => None,
        }
    }

    pub fn as_data(&self) -> Option<&Metadata> {
        match self {
            ResponsePart::Data(data) => Some(data),
            ResponsePart::Text(_) => None,
        }
    }
}

/// Where files returned by agents are kept
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ArtifactStore: Send + Sync {
    async fn save(&self, file_id: &str, mime_type: &str, bytes: Bytes) -> anyhow::Result<()>;
}

/// A file kept by [`InMemoryArtifactStore`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredArtifact {
    pub mime_type: String,
    pub bytes: Bytes,
}

/// Keeps artifacts in memory, later saves under the same id win
#[derive(Debug, Default)]
pub struct InMemoryArtifactStore {
    artifacts: RwLock<HashMap<String, StoredArtifact>>,
}

impl InMemoryArtifactStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn get(&self, file_id: &str) -> Option<StoredArtifact> {
        self.artifacts.read().await.get(file_id).cloned()
    }

    pub async fn len(&self) -> usize {
        self.artifacts.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.artifacts.read().await.is_empty()
    }
}

#[async_trait]
impl ArtifactStore for InMemoryArtifactStore {
    async fn save(&self, file_id: &str, mime_type: &str, bytes: Bytes) -> anyhow::Result<()> {
        debug!(file_id, mime_type, size = bytes.len(), "storing artifact");
        self.artifacts.write().await.insert(
            file_id.to_string(),
            StoredArtifact {
                mime_type: mime_type.to_string(),
                bytes,
            },
        );
        Ok(())
    }
}

/// Convert one part
///
/// Text and data pass through. Files are decoded, saved to `store` and
/// replaced by a reference to the stored artifact, raising `actions` so the
/// file reaches the user unsummarized. Unknown kinds become a text note.
pub async fn convert_part(
    part: &Part,
    actions: &mut ToolActions,
    store: &dyn ArtifactStore,
) -> Result<ResponsePart, HostError> {
    match part {
        Part::Text(text) => Ok(ResponsePart::Text(text.text.clone())),
        Part::Data(data) => Ok(ResponsePart::Data(data.data.clone())),
        Part::File(file) => {
            let file_id = save_file(file, store).await?;
            actions.escalate_to_user();

            let mut data = Metadata::new();
            data.insert(ARTIFACT_FILE_ID_KEY.to_string(), Value::String(file_id));
            Ok(ResponsePart::Data(data))
        }
        Part::Unknown(kind) => Ok(ResponsePart::Text(format!("Unknown type: {}", kind))),
    }
}

/// Convert parts in order, stopping at the first failure
pub async fn convert_parts(
    parts: &[Part],
    actions: &mut ToolActions,
    store: &dyn ArtifactStore,
) -> Result<Vec<ResponsePart>, HostError> {
    let mut converted = Vec::with_capacity(parts.len());
    for part in parts {
        converted.push(convert_part(part, actions, store).await?);
    }
    Ok(converted)
}

async fn save_file(file: &FilePart, store: &dyn ArtifactStore) -> Result<String, HostError> {
    let content = &file.file;
    let file_id = content
        .name
        .clone()
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| Uuid::new_v4().to_string());

    let encoded = content
        .bytes
        .as_deref()
        .ok_or_else(|| HostError::InvalidFileContent {
            name: file_id.clone(),
            reason: "no inline bytes".to_string(),
        })?;

    let bytes = general_purpose::STANDARD
        .decode(encoded)
        .map_err(|e| HostError::InvalidFileContent {
            name: file_id.clone(),
            reason: e.to_string(),
        })?;

    let mime_type = content.mime_type.as_deref().unwrap_or(DEFAULT_FILE_MIME_TYPE);
    store
        .save(&file_id, mime_type, Bytes::from(bytes))
        .await
        .map_err(|source| HostError::ArtifactStore {
            file_id: file_id.clone(),
            source,
        })?;

    info!(file_id = %file_id, mime_type, "saved file artifact");
    Ok(file_id)
}
