use serde::{Deserialize, Serialize};

pub const SIGNATURE_HEADER: &str = "x-signature-ed25519";
pub const TIMESTAMP_HEADER: &str = "x-signature-timestamp";

/// Messages flagged this way are only shown to the invoking user.
pub const MESSAGE_FLAG_EPHEMERAL: u64 = 1 << 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "u8", into = "u8")]
pub enum InteractionType {
    Ping,
    ApplicationCommand,
    Unknown(u8),
}

impl From<u8> for InteractionType {
    fn from(value: u8) -> Self {
        match value {
            1 => InteractionType::Ping,
            2 => InteractionType::ApplicationCommand,
            other => InteractionType::Unknown(other),
        }
    }
}

impl From<InteractionType> for u8 {
    fn from(value: InteractionType) -> Self {
        match value {
            InteractionType::Ping => 1,
            InteractionType::ApplicationCommand => 2,
            InteractionType::Unknown(other) => other,
        }
    }
}

/// A dynamically typed command option value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OptionValue {
    Bool(bool),
    Number(f64),
    String(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommandOption {
    pub name: String,
    pub value: OptionValue,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CommandData {
    pub name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<CommandOption>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Interaction {
    #[serde(rename = "type")]
    pub kind: InteractionType,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<CommandData>,
}

impl Interaction {
    pub fn ping() -> Self {
        Self {
            kind: InteractionType::Ping,
            id: String::new(),
            data: None,
        }
    }

    pub fn command(name: impl Into<String>, options: Vec<CommandOption>) -> Self {
        Self {
            kind: InteractionType::ApplicationCommand,
            id: String::new(),
            data: Some(CommandData {
                name: name.into(),
                options,
            }),
        }
    }

    pub fn command_name(&self) -> Option<&str> {
        self.data.as_ref().map(|d| d.name.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum InteractionResponseType {
    Pong,
    ChannelMessageWithSource,
}

impl TryFrom<u8> for InteractionResponseType {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(InteractionResponseType::Pong),
            4 => Ok(InteractionResponseType::ChannelMessageWithSource),
            other => Err(format!("unsupported interaction response type {other}")),
        }
    }
}

impl From<InteractionResponseType> for u8 {
    fn from(value: InteractionResponseType) -> Self {
        match value {
            InteractionResponseType::Pong => 1,
            InteractionResponseType::ChannelMessageWithSource => 4,
        }
    }
}

/// Message payload. `embeds` and `attachments` are passed through untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InteractionResponseData {
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub embeds: Option<Vec<serde_json::Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flags: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attachments: Option<Vec<serde_json::Value>>,
}

/// An outbound reply. A Pong never carries data and a channel message always
/// does, so the wire shape is checked in both directions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "InteractionResponseWire", into = "InteractionResponseWire")]
pub enum InteractionResponse {
    Pong,
    ChannelMessageWithSource(InteractionResponseData),
}

#[derive(Serialize, Deserialize)]
struct InteractionResponseWire {
    #[serde(rename = "type")]
    kind: InteractionResponseType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    data: Option<InteractionResponseData>,
}

impl TryFrom<InteractionResponseWire> for InteractionResponse {
    type Error = String;

    fn try_from(wire: InteractionResponseWire) -> Result<Self, Self::Error> {
        match (wire.kind, wire.data) {
            (InteractionResponseType::Pong, None) => Ok(InteractionResponse::Pong),
            (InteractionResponseType::Pong, Some(_)) => {
                Err("pong response must not carry data".to_string())
            }
            (InteractionResponseType::ChannelMessageWithSource, Some(data)) => {
                Ok(InteractionResponse::ChannelMessageWithSource(data))
            }
            (InteractionResponseType::ChannelMessageWithSource, None) => {
                Err("channel message response requires data".to_string())
            }
        }
    }
}

impl From<InteractionResponse> for InteractionResponseWire {
    fn from(response: InteractionResponse) -> Self {
        match response {
            InteractionResponse::Pong => Self {
                kind: InteractionResponseType::Pong,
                data: None,
            },
            InteractionResponse::ChannelMessageWithSource(data) => Self {
                kind: InteractionResponseType::ChannelMessageWithSource,
                data: Some(data),
            },
        }
    }
}

impl InteractionResponse {
    pub fn pong() -> Self {
        InteractionResponse::Pong
    }

    pub fn message(content: impl Into<String>) -> Self {
        Self::with_data(InteractionResponseData {
            content: content.into(),
            ..InteractionResponseData::default()
        })
    }

    pub fn ephemeral(content: impl Into<String>) -> Self {
        Self::with_data(InteractionResponseData {
            content: content.into(),
            flags: Some(MESSAGE_FLAG_EPHEMERAL),
            ..InteractionResponseData::default()
        })
    }

    pub fn with_data(data: InteractionResponseData) -> Self {
        InteractionResponse::ChannelMessageWithSource(data)
    }

    pub fn kind(&self) -> InteractionResponseType {
        match self {
            InteractionResponse::Pong => InteractionResponseType::Pong,
            InteractionResponse::ChannelMessageWithSource(_) => {
                InteractionResponseType::ChannelMessageWithSource
            }
        }
    }

    pub fn data(&self) -> Option<&InteractionResponseData> {
        match self {
            InteractionResponse::Pong => None,
            InteractionResponse::ChannelMessageWithSource(data) => Some(data),
        }
    }

    pub fn content(&self) -> Option<&str> {
        self.data().map(|d| d.content.as_str())
    }
}
