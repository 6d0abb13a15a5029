// crates/core/src/request.rs
use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Intent the platform reports when the user asks for help.
pub const HELP_INTENT: &str = "YANDEX.HELP";
/// The skill's own route intent ("from X to Y ...").
pub const MAIN_INTENT: &str = "mainintent";

pub const SLOT_FROM: &str = "from";
pub const SLOT_TO: &str = "to";
pub const SLOT_WHEN: &str = "when";
pub const SLOT_SCHEDULE: &str = "schedule";
pub const SLOT_DETAIL: &str = "detail";

/// Entity type whose value replaces its covered tokens with a digit string.
pub const NUMBER_ENTITY: &str = "YANDEX.NUMBER";

/// Inbound webhook payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillRequest {
    pub version: String,
    pub session: Session,
    #[serde(default)]
    pub request: Request,
}

/// Session block. Echoed back verbatim in the response envelope, so unknown
/// fields are preserved through the flatten map.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Session {
    #[serde(default)]
    pub user: Option<User>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct User {
    pub user_id: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Request {
    #[serde(default)]
    pub original_utterance: String,
    #[serde(default)]
    pub nlu: Nlu,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Nlu {
    #[serde(default)]
    pub tokens: Vec<String>,
    #[serde(default)]
    pub entities: Vec<Entity>,
    #[serde(default)]
    pub intents: HashMap<String, Intent>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entity {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub value: Value,
    pub tokens: TokenSpan,
}

/// Half-open token range `[start, end)` into the utterance token list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenSpan {
    pub start: usize,
    pub end: usize,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Intent {
    #[serde(default)]
    pub slots: HashMap<String, Slot>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Slot {
    #[serde(default)]
    pub tokens: Option<TokenSpan>,
    #[serde(default)]
    pub value: Value,
}

impl SkillRequest {
    pub fn user_id(&self) -> Option<&str> {
        self.session.user.as_ref().map(|u| u.user_id.as_str())
    }

    pub fn intent(&self, name: &str) -> Option<&Intent> {
        self.request.nlu.intents.get(name)
    }
}

impl Intent {
    pub fn slot(&self, name: &str) -> Option<&Slot> {
        self.slots.get(name)
    }

    pub fn has_slot(&self, name: &str) -> bool {
        self.slots.contains_key(name)
    }
}
