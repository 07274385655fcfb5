//! AsyncAPI 3.0 document model
//!
//! All maps are ordered so that serializing the same document twice yields
//! identical bytes.

use crate::error::{ContractError, ContractResult};
use crate::schema::{SCHEMA_REF_PREFIX, SchemaNode};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// AsyncAPI version written into generated documents
pub const ASYNCAPI_VERSION: &str = "3.0.0";

/// Content type of every generated message
pub const JSON_CONTENT_TYPE: &str = "application/json";

/// Schema format of every generated schema entry
pub const SCHEMA_FORMAT: &str = "application/schema+json;version=draft-07";

/// Prefix of references to channels
pub const CHANNEL_REF_PREFIX: &str = "#/channels/";

/// Prefix of references to messages
pub const MESSAGE_REF_PREFIX: &str = "#/components/messages/";

/// Message contract document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub asyncapi: String,

    pub info: Info,

    #[serde(default = "default_content_type")]
    pub default_content_type: String,

    /// Channels keyed by fully-qualified type identity
    #[serde(default)]
    pub channels: BTreeMap<String, Channel>,

    /// Operations keyed by `{simpleName}Operation`
    #[serde(default)]
    pub operations: BTreeMap<String, Operation>,

    #[serde(default)]
    pub components: Components,
}

fn default_content_type() -> String {
    JSON_CONTENT_TYPE.to_string()
}

/// Document title and version
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Info {
    pub title: String,
    pub version: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// A `$ref` object
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reference {
    #[serde(rename = "$ref")]
    pub reference: String,
}

impl Reference {
    pub fn new(reference: impl Into<String>) -> Self {
        Self {
            reference: reference.into(),
        }
    }

    pub fn to_schema(name: &str) -> Self {
        Self::new(format!("{}{}", SCHEMA_REF_PREFIX, name))
    }

    pub fn to_message(name: &str) -> Self {
        Self::new(format!("{}{}", MESSAGE_REF_PREFIX, name))
    }

    /// Reference to a channel key, escaped as a JSON pointer and percent-encoded
    pub fn to_channel(key: &str) -> Self {
        let pointer = key.replace('~', "~0").replace('/', "~1");
        Self::new(format!(
            "{}{}",
            CHANNEL_REF_PREFIX,
            urlencoding::encode(&pointer)
        ))
    }

    /// Key named by a reference with the given prefix
    pub fn target(&self, prefix: &str) -> Option<String> {
        let raw = self.reference.strip_prefix(prefix)?;
        let decoded = urlencoding::decode(raw).ok()?;
        Some(decoded.replace("~1", "/").replace("~0", "~"))
    }
}

/// Addressable destination for one message type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Channel {
    pub address: String,

    #[serde(default)]
    pub messages: BTreeMap<String, Reference>,
}

/// Operation direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Send,
    Receive,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Operation {
    pub action: Action,
    pub channel: Reference,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub name: String,
    pub content_type: String,
    pub payload: Reference,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Components {
    #[serde(default)]
    pub messages: BTreeMap<String, Message>,

    #[serde(default)]
    pub schemas: BTreeMap<String, MultiFormatSchema>,
}

/// A schema entry tagged with its schema format
///
/// Plain schema objects are accepted on read and assumed to be draft-07.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "Value")]
pub struct MultiFormatSchema {
    pub schema_format: String,
    pub schema: SchemaNode,
}

impl MultiFormatSchema {
    pub fn new(schema: SchemaNode) -> Self {
        Self {
            schema_format: SCHEMA_FORMAT.to_string(),
            schema,
        }
    }
}

impl TryFrom<Value> for MultiFormatSchema {
    type Error = String;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        let format = value.get("schemaFormat").and_then(Value::as_str);
        match (format, value.get("schema")) {
            (Some(format), Some(schema)) => Ok(Self {
                schema_format: format.to_string(),
                schema: SchemaNode::from_value(schema)?,
            }),
            _ => Ok(Self::new(SchemaNode::from_value(&value)?)),
        }
    }
}

impl Document {
    /// Create an empty document
    pub fn new(title: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            asyncapi: ASYNCAPI_VERSION.to_string(),
            info: Info {
                title: title.into(),
                version: version.into(),
                description: None,
            },
            default_content_type: default_content_type(),
            channels: BTreeMap::new(),
            operations: BTreeMap::new(),
            components: Components::default(),
        }
    }

    /// Schema registry entries in key order
    pub fn schemas(&self) -> impl Iterator<Item = (&str, &SchemaNode)> {
        self.components
            .schemas
            .iter()
            .map(|(name, entry)| (name.as_str(), &entry.schema))
    }

    pub fn schema(&self, name: &str) -> Option<&SchemaNode> {
        self.components.schemas.get(name).map(|entry| &entry.schema)
    }

    /// Distinct origin namespaces of all schemas, sorted
    pub fn namespaces(&self) -> Vec<String> {
        let mut namespaces: Vec<String> = self
            .schemas()
            .map(|(_, node)| node.origin_namespace().unwrap_or_default().to_string())
            .collect();
        namespaces.sort();
        namespaces.dedup();
        namespaces
    }

    pub fn is_empty(&self) -> bool {
        self.channels.is_empty() && self.operations.is_empty() && self.components.schemas.is_empty()
    }

    /// Check that every internal reference resolves
    pub fn validate(&self) -> ContractResult<()> {
        if self.info.title.trim().is_empty() {
            return Err(ContractError::InvalidDocument(
                "info.title must not be blank".to_string(),
            ));
        }
        if self.info.version.trim().is_empty() {
            return Err(ContractError::InvalidDocument(
                "info.version must not be blank".to_string(),
            ));
        }

        for (key, channel) in &self.channels {
            for reference in channel.messages.values() {
                let resolved = reference
                    .target(MESSAGE_REF_PREFIX)
                    .is_some_and(|name| self.components.messages.contains_key(&name));
                if !resolved {
                    return Err(ContractError::InvalidDocument(format!(
                        "channel '{}' references unknown message '{}'",
                        key, reference.reference
                    )));
                }
            }
        }

        for (key, message) in &self.components.messages {
            let resolved = message
                .payload
                .target(SCHEMA_REF_PREFIX)
                .is_some_and(|name| self.components.schemas.contains_key(&name));
            if !resolved {
                return Err(ContractError::InvalidDocument(format!(
                    "message '{}' references unknown schema '{}'",
                    key, message.payload.reference
                )));
            }
        }

        for (key, operation) in &self.operations {
            let resolved = operation
                .channel
                .target(CHANNEL_REF_PREFIX)
                .is_some_and(|name| self.channels.contains_key(&name));
            if !resolved {
                return Err(ContractError::InvalidDocument(format!(
                    "operation '{}' references unknown channel '{}'",
                    key, operation.channel.reference
                )));
            }
        }

        for (key, node) in self.schemas() {
            for target in node.referenced_schemas() {
                if !self.components.schemas.contains_key(&target) {
                    return Err(ContractError::InvalidDocument(format!(
                        "schema '{}' references unknown schema '{}'",
                        key, target
                    )));
                }
            }
        }

        Ok(())
    }
}
