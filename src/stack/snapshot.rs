use crate::utils::file_uri::display_name;
use crate::utils::unicode::truncate_chars;
use chrono::{DateTime, Utc};
use std::fmt;
use uuid::Uuid;

const PREVIEW_MAX_CHARS: usize = 30;

/// Payload-free tag of a [`Content`] variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContentKind {
    Text,
    Image,
    FileList,
    RichText,
}

impl ContentKind {
    /// Name used for `contentType` in the persisted stack.
    pub fn wire_name(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Image => "image",
            Self::FileList => "fileURL",
            Self::RichText => "rtf",
        }
    }

    pub fn from_wire_name(s: &str) -> Option<Self> {
        match s {
            "text" => Some(Self::Text),
            "image" => Some(Self::Image),
            "fileURL" => Some(Self::FileList),
            "rtf" => Some(Self::RichText),
            _ => None,
        }
    }
}

impl fmt::Display for ContentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Text => "text",
            Self::Image => "image",
            Self::FileList => "file list",
            Self::RichText => "rich text",
        };
        write!(f, "{}", s)
    }
}

/// One clipboard capture. Exactly one representation is held.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Content {
    Text(String),
    /// PNG-encoded bitmap.
    Image(Vec<u8>),
    /// Paths or `file://` URIs, in pasteboard order.
    FileList(Vec<String>),
    /// Formatted-text bytes in the pasteboard's native encoding.
    RichText(Vec<u8>),
}

impl Content {
    pub fn kind(&self) -> ContentKind {
        match self {
            Self::Text(_) => ContentKind::Text,
            Self::Image(_) => ContentKind::Image,
            Self::FileList(_) => ContentKind::FileList,
            Self::RichText(_) => ContentKind::RichText,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentSnapshot {
    id: Uuid,
    captured_at: DateTime<Utc>,
    content: Content,
}

impl ContentSnapshot {
    pub fn new(content: Content) -> Self {
        Self {
            id: Uuid::new_v4(),
            captured_at: Utc::now(),
            content,
        }
    }

    /// Rebuilds a snapshot whose identity was assigned earlier.
    pub fn from_parts(id: Uuid, captured_at: DateTime<Utc>, content: Content) -> Self {
        Self {
            id,
            captured_at,
            content,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn captured_at(&self) -> DateTime<Utc> {
        self.captured_at
    }

    pub fn content(&self) -> &Content {
        &self.content
    }

    pub fn kind(&self) -> ContentKind {
        self.content.kind()
    }

    /// Short label for lists and popups. Recomputed on every call.
    pub fn preview_label(&self) -> String {
        match &self.content {
            Content::Text(text) => {
                let head = truncate_chars(text, PREVIEW_MAX_CHARS);
                if head.len() < text.len() {
                    format!("{head}...")
                } else {
                    head.to_string()
                }
            }
            Content::Image(_) => "Image".to_string(),
            Content::FileList(files) => files
                .first()
                .and_then(|first| display_name(first))
                .unwrap_or_else(|| "File".to_string()),
            Content::RichText(_) => "Formatted text".to_string(),
        }
    }
}
