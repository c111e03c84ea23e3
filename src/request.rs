//! Hook request and response envelope.
//!
//! One JSON object arrives on stdin; one JSON object (or nothing, for a
//! silent pass-through) leaves on stdout. The process exit code is always
//! zero — the decision lives entirely in the payload.

use crate::defaults::{TRIGGER_HAIKU, TRIGGER_VOICE};
use serde::Serialize;
use serde_json::Value;

/// Pull the originating prompt text out of a raw stdin payload.
///
/// Accepted shapes, first match wins: a `prompt`, `content` or `message`
/// field; a nested object is flattened through its `content` then `text`
/// field. Anything that is not a JSON object is taken as the prompt verbatim.
pub fn extract_prompt(raw: &str) -> String {
    let Ok(Value::Object(map)) = serde_json::from_str::<Value>(raw) else {
        return raw.to_string();
    };

    let Some(field) = ["prompt", "content", "message"]
        .iter()
        .find_map(|key| map.get(*key))
    else {
        return String::new();
    };

    match field {
        Value::String(s) => s.clone(),
        Value::Object(nested) => nested
            .get("content")
            .or_else(|| nested.get("text"))
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| field.to_string()),
        other => other.to_string(),
    }
}

/// Operating mode, selected by a trigger prefix on the prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoiceMode {
    Standard,
    Haiku,
}

impl VoiceMode {
    /// Detect a voice trigger. Haiku is checked first: it is the longer
    /// prefix and would otherwise be shadowed by the plain trigger.
    pub fn detect(prompt: &str) -> Option<Self> {
        let lower = prompt.to_lowercase();
        if lower.starts_with(TRIGGER_HAIKU) {
            Some(VoiceMode::Haiku)
        } else if lower.starts_with(TRIGGER_VOICE) {
            Some(VoiceMode::Standard)
        } else {
            None
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            VoiceMode::Standard => "VOICE",
            VoiceMode::Haiku => "HAIKU",
        }
    }
}

/// Rejection payload: `{"decision": "block", "reason": ...}`.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct BlockResponse {
    pub decision: &'static str,
    pub reason: String,
}

impl BlockResponse {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            decision: "block",
            reason: reason.into(),
        }
    }
}

/// Approval payload carrying the transcription back to the caller.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ApproveResponse {
    pub hook_specific_output: HookOutput,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct HookOutput {
    pub hook_event_name: &'static str,
    pub updated_prompt: String,
    pub additional_context: String,
}

impl ApproveResponse {
    pub fn with_transcription(text: &str) -> Self {
        Self {
            hook_specific_output: HookOutput {
                hook_event_name: "UserPromptSubmit",
                updated_prompt: text.to_string(),
                additional_context: format!("VOICE TRANSCRIPTION: {}", text),
            },
        }
    }
}
