//! Persisted layout of the clipboard stack.
//!
//! The stack is stored as a JSON array under [`CLIPBOARD_STACK_KEY`]. Each
//! record carries `id`, `createdAt`, `contentType` and exactly one payload
//! field matching the content type. Binary payloads are standard base64.

use super::snapshot::{Content, ContentKind, ContentSnapshot};
use crate::storage::{Defaults, CLIPBOARD_STACK_KEY};
use anyhow::{anyhow, bail, Context, Result};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SnapshotRecord {
    id: Uuid,
    created_at: DateTime<Utc>,
    content_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text_data: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    image_data: Option<String>,
    #[serde(
        default,
        rename = "fileURLStrings",
        skip_serializing_if = "Option::is_none"
    )]
    file_url_strings: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    rtf_data: Option<String>,
}

impl From<&ContentSnapshot> for SnapshotRecord {
    fn from(snapshot: &ContentSnapshot) -> Self {
        let mut record = SnapshotRecord {
            id: snapshot.id(),
            created_at: snapshot.captured_at(),
            content_type: snapshot.kind().wire_name().to_string(),
            text_data: None,
            image_data: None,
            file_url_strings: None,
            rtf_data: None,
        };

        match snapshot.content() {
            Content::Text(text) => record.text_data = Some(text.clone()),
            Content::Image(bytes) => record.image_data = Some(BASE64.encode(bytes)),
            Content::FileList(files) => record.file_url_strings = Some(files.clone()),
            Content::RichText(bytes) => record.rtf_data = Some(BASE64.encode(bytes)),
        }

        record
    }
}

impl TryFrom<SnapshotRecord> for ContentSnapshot {
    type Error = anyhow::Error;

    fn try_from(record: SnapshotRecord) -> Result<Self> {
        let kind = ContentKind::from_wire_name(&record.content_type)
            .ok_or_else(|| anyhow!("Unknown content type: {}", record.content_type))?;

        let populated = [
            record.text_data.is_some(),
            record.image_data.is_some(),
            record.file_url_strings.is_some(),
            record.rtf_data.is_some(),
        ]
        .iter()
        .filter(|set| **set)
        .count();
        if populated != 1 {
            bail!("Record {} has {} payload fields, expected 1", record.id, populated);
        }

        let content = match kind {
            ContentKind::Text => record.text_data.map(Content::Text),
            ContentKind::Image => record
                .image_data
                .map(|data| BASE64.decode(data).map(Content::Image))
                .transpose()
                .context("Invalid base64 in imageData")?,
            ContentKind::FileList => record.file_url_strings.map(Content::FileList),
            ContentKind::RichText => record
                .rtf_data
                .map(|data| BASE64.decode(data).map(Content::RichText))
                .transpose()
                .context("Invalid base64 in rtfData")?,
        }
        .ok_or_else(|| anyhow!("Record {} has no payload for {}", record.id, kind))?;

        Ok(ContentSnapshot::from_parts(record.id, record.created_at, content))
    }
}

pub fn encode_stack(items: &[ContentSnapshot]) -> Result<Vec<u8>> {
    let records: Vec<SnapshotRecord> = items.iter().map(SnapshotRecord::from).collect();
    serde_json::to_vec(&records).context("Failed to encode clipboard stack")
}

pub fn decode_stack(bytes: &[u8]) -> Result<Vec<ContentSnapshot>> {
    let records: Vec<SnapshotRecord> =
        serde_json::from_slice(bytes).context("Failed to parse clipboard stack")?;
    records.into_iter().map(ContentSnapshot::try_from).collect()
}

/// Loads the persisted stack. Missing or corrupt data yields an empty list.
pub fn load<D: Defaults>(defaults: &D) -> Vec<ContentSnapshot> {
    let bytes = match defaults.get(CLIPBOARD_STACK_KEY) {
        Ok(Some(bytes)) => bytes,
        Ok(None) => {
            debug!("No saved clipboard stack");
            return Vec::new();
        }
        Err(e) => {
            warn!(error = %e, "Failed to read clipboard stack, starting empty");
            return Vec::new();
        }
    };

    match decode_stack(&bytes) {
        Ok(items) => items,
        Err(e) => {
            warn!("Failed to load clipboard stack, starting empty: {e:#}");
            Vec::new()
        }
    }
}

pub fn save<D: Defaults>(defaults: &mut D, items: &[ContentSnapshot]) -> Result<()> {
    let bytes = encode_stack(items)?;
    defaults.set(CLIPBOARD_STACK_KEY, &bytes)
}
