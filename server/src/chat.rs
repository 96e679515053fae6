//! Inbound chat payloads and the request body the sports-proxy expects.

use serde::Serialize;
use serde_json::Value;

pub const DEFAULT_MESSAGE: &str = "Hello";
pub const DEFAULT_USER_ID: &str = "dev-user";
pub const DEFAULT_SPORT: &str = "baseball";

const PROXY_MODEL: &str = "gpt-4";

/// Chat payload posted by the frontend. Every field is optional; see
/// [`IncomingChatRequest::resolve`] for the defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IncomingChatRequest {
    pub message: Option<String>,
    pub input: Option<String>,
    pub user_id: Option<String>,
    pub sport: Option<String>,
}

/// An [`IncomingChatRequest`] with defaults applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedChat {
    pub message: String,
    pub user_id: String,
    pub sport: String,
}

impl IncomingChatRequest {
    /// Reads the known fields out of any JSON document. Only non-empty strings
    /// count as present; everything else is treated as missing.
    pub fn from_json(value: &Value) -> Self {
        Self {
            message: string_field(value, "message"),
            input: string_field(value, "input"),
            user_id: string_field(value, "userId"),
            sport: string_field(value, "sport"),
        }
    }

    pub fn resolve(self) -> ResolvedChat {
        ResolvedChat {
            message: self
                .message
                .or(self.input)
                .unwrap_or_else(|| DEFAULT_MESSAGE.to_string()),
            user_id: self.user_id.unwrap_or_else(|| DEFAULT_USER_ID.to_string()),
            sport: self.sport.unwrap_or_else(|| DEFAULT_SPORT.to_string()),
        }
    }
}

fn string_field(value: &Value, key: &str) -> Option<String> {
    value
        .get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ProxyRequest {
    pub model: String,
    pub input: String,
    pub tools: Vec<ToolSpec>,
    pub memories: Vec<Memory>,
    pub stream: bool,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ToolSpec {
    pub name: String,
    pub description: String,
    pub input_schema: Value,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Memory {
    pub key: String,
    pub value: String,
}

impl ProxyRequest {
    pub fn from_chat(chat: &ResolvedChat) -> Self {
        Self {
            model: PROXY_MODEL.to_string(),
            input: chat.message.clone(),
            tools: vec![resolve_team_tool()],
            memories: vec![
                Memory {
                    key: "user_sport".to_string(),
                    value: chat.sport.clone(),
                },
                Memory {
                    key: "user_id".to_string(),
                    value: chat.user_id.clone(),
                },
            ],
            stream: true,
        }
    }
}

fn resolve_team_tool() -> ToolSpec {
    ToolSpec {
        name: "resolve_team".to_string(),
        description: "Resolve team name to team information".to_string(),
        input_schema: serde_json::json!({
            "type": "object",
            "properties": {
                "name": { "type": "string", "description": "Team name" }
            }
        }),
    }
}
