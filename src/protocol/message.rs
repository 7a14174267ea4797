//! A2A message types

use serde::{
    de::{self, Deserializer},
    ser::{SerializeMap, Serializer},
    Deserialize, Serialize,
};
use serde_json::{Map, Value};

/// Free-form metadata attached to messages, parts and tasks
pub type Metadata = Map<String, Value>;

/// A message in the A2A protocol
///
/// Messages are the primary unit of communication between agents.
/// Each message has a role (user or agent), one or more parts (text, file, or data),
/// and optional metadata.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Message {
    /// Role of the message sender
    pub role: Role,

    /// Message content parts (at least one required)
    pub parts: Vec<Part>,

    /// Optional metadata for the message
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
}

impl Message {
    /// Create a new message with text content
    pub fn new(role: Role, text: impl Into<String>) -> Self {
        Self {
            role,
            parts: vec![Part::text(text)],
            metadata: None,
        }
    }

    /// Create a user message with text content
    pub fn user(text: impl Into<String>) -> Self {
        Self::new(Role::User, text)
    }

    /// Create an agent message with text content
    pub fn agent(text: impl Into<String>) -> Self {
        Self::new(Role::Agent, text)
    }

    /// Add a metadata field to the message
    pub fn with_metadata(mut self, key: impl Into<String>, value: Value) -> Self {
        self.metadata
            .get_or_insert_with(Map::new)
            .insert(key.into(), value);
        self
    }

    /// Replace the message metadata
    pub fn with_metadata_map(mut self, metadata: Metadata) -> Self {
        self.metadata = Some(metadata);
        self
    }

    /// Add a message part
    pub fn with_part(mut self, part: Part) -> Self {
        self.parts.push(part);
        self
    }

    /// Concatenate the text parts, separated by newlines
    pub fn text(&self) -> String {
        self.parts
            .iter()
            .filter_map(|part| match part {
                Part::Text(text) => Some(text.text.as_str()),
                _ => None,
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Role of a message sender
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Message from a user
    User,

    /// Message from an AI agent
    Agent,
}

/// Text content
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TextPart {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
}

/// Structured content
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DataPart {
    pub data: Metadata,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
}

/// File content, carried inline as base64 or by reference
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FileContent {
    /// Name of the file
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// MIME type of the file
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,

    /// Base64-encoded file content
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bytes: Option<String>,

    /// URI reference to the file
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
}

/// File part wrapper
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FilePart {
    pub file: FileContent,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
}

/// A part of a message or artifact
///
/// Parts carry a `"type"` tag on the wire. Tags this crate does not know are
/// kept as [`Part::Unknown`] so newer agents do not break older hosts.
#[derive(Debug, Clone, PartialEq)]
pub enum Part {
    /// Text content
    Text(TextPart),

    /// File content
    File(FilePart),

    /// Structured data
    Data(DataPart),

    /// A part kind this crate does not understand, with its tag
    Unknown(String),
}

impl Part {
    /// Create a text part
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(TextPart {
            text: text.into(),
            metadata: None,
        })
    }

    /// Create a data part
    pub fn data(data: Metadata) -> Self {
        Self::Data(DataPart {
            data,
            metadata: None,
        })
    }

    /// Create a file part with base64-encoded bytes
    pub fn file_with_bytes(
        name: impl Into<String>,
        mime_type: impl Into<String>,
        bytes_base64: impl Into<String>,
    ) -> Self {
        Self::File(FilePart {
            file: FileContent {
                name: Some(name.into()),
                mime_type: Some(mime_type.into()),
                bytes: Some(bytes_base64.into()),
                uri: None,
            },
            metadata: None,
        })
    }

    /// Create a file part referencing a URI
    pub fn file_with_uri(name: impl Into<String>, uri: impl Into<String>) -> Self {
        Self::File(FilePart {
            file: FileContent {
                name: Some(name.into()),
                mime_type: None,
                bytes: None,
                uri: Some(uri.into()),
            },
            metadata: None,
        })
    }

    /// The wire tag of this part
    pub fn kind(&self) -> &str {
        match self {
            Part::Text(_) => "text",
            Part::File(_) => "file",
            Part::Data(_) => "data",
            Part::Unknown(kind) => kind,
        }
    }
}

#[derive(Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
enum TaggedPartRef<'a> {
    Text(&'a TextPart),
    File(&'a FilePart),
    Data(&'a DataPart),
}

#[derive(Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
enum TaggedPart {
    Text(TextPart),
    File(FilePart),
    Data(DataPart),
}

impl Serialize for Part {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Part::Text(part) => TaggedPartRef::Text(part).serialize(serializer),
            Part::File(part) => TaggedPartRef::File(part).serialize(serializer),
            Part::Data(part) => TaggedPartRef::Data(part).serialize(serializer),
            Part::Unknown(kind) => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("type", kind)?;
                map.end()
            }
        }
    }
}

impl<'de> Deserialize<'de> for Part {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        let kind = value
            .get("type")
            .and_then(Value::as_str)
            .ok_or_else(|| de::Error::missing_field("type"))?
            .to_string();

        match kind.as_str() {
            "text" | "file" | "data" => {
                let tagged = TaggedPart::deserialize(value).map_err(de::Error::custom)?;
                Ok(match tagged {
                    TaggedPart::Text(part) => Part::Text(part),
                    TaggedPart::File(part) => Part::File(part),
                    TaggedPart::Data(part) => Part::Data(part),
                })
            }
            _ => Ok(Part::Unknown(kind)),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_message_creation() {
        let msg = Message::user("Hello, agent!");
        assert_eq!(msg.role, Role::User);
        assert_eq!(msg.parts.len(), 1);

        match &msg.parts[0] {
            Part::Text(part) => assert_eq!(part.text, "Hello, agent!"),
            _ => panic!("Expected text part"),
        }
    }

    #[test]
    fn test_message_with_metadata() {
        let msg = Message::user("Test").with_metadata("message_id", json!("m-1"));

        let metadata = msg.metadata.unwrap();
        assert_eq!(metadata["message_id"], "m-1");
    }

    #[test]
    fn test_message_text_joins_text_parts() {
        let msg = Message::user("first")
            .with_part(Part::data(Map::new()))
            .with_part(Part::text("second"));

        assert_eq!(msg.text(), "first\nsecond");
    }

    #[test]
    fn test_part_type_tags() {
        let text = serde_json::to_value(Part::text("hi")).unwrap();
        assert_eq!(text, json!({"type": "text", "text": "hi"}));

        let file = serde_json::to_value(Part::file_with_bytes("x.png", "image/png", "AAEC")).unwrap();
        assert_eq!(file["type"], "file");
        assert_eq!(file["file"]["mimeType"], "image/png");
        assert_eq!(file["file"]["bytes"], "AAEC");
        assert!(file["file"].get("uri").is_none());
    }

    #[test]
    fn test_unknown_part_is_preserved() {
        let part: Part = serde_json::from_value(json!({"type": "video", "url": "x"})).unwrap();
        assert_eq!(part, Part::Unknown("video".to_string()));
        assert_eq!(part.kind(), "video");

        let json = serde_json::to_value(&part).unwrap();
        assert_eq!(json, json!({"type": "video"}));
    }

    #[test]
    fn test_part_without_type_is_rejected() {
        let result: Result<Part, _> = serde_json::from_value(json!({"text": "hi"}));
        assert!(result.is_err());
    }

    #[test]
    fn test_malformed_known_part_is_rejected() {
        let result: Result<Part, _> = serde_json::from_value(json!({"type": "data", "data": 3}));
        assert!(result.is_err());
    }
}
