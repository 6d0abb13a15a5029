// crates/core/src/response.rs
use serde::{Deserialize, Serialize};

use crate::request::{Session, SkillRequest};

/// Outbound webhook envelope. Built once per request, never retained.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillResponse {
    pub version: String,
    pub session: Session,
    pub response: ResponseBody,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResponseBody {
    pub text: String,
    pub end_session: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub buttons: Vec<Button>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Button {
    pub title: String,
    pub url: String,
}

impl SkillRequest {
    /// Plain spoken reply echoing this request's version and session.
    pub fn reply(&self, text: impl Into<String>, end_session: bool) -> SkillResponse {
        SkillResponse {
            version: self.version.clone(),
            session: self.session.clone(),
            response: ResponseBody {
                text: text.into(),
                end_session,
                buttons: Vec::new(),
            },
        }
    }
}

impl SkillResponse {
    pub fn with_button(mut self, title: impl Into<String>, url: impl Into<String>) -> Self {
        self.response.buttons.push(Button {
            title: title.into(),
            url: url.into(),
        });
        self
    }
}
