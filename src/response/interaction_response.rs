//! 交互回调的响应构造
//!
use crate::discord::types::{custom_ids, ActionRow, Component};
use crate::dto::submission::QUANTITY_MAX_LEN;
use serde::Serialize;
use serde_json::{json, Value};

/// 回调类型
pub mod callback_type {
    pub const PONG: u8 = 1;
    pub const CHANNEL_MESSAGE_WITH_SOURCE: u8 = 4;
    pub const MODAL: u8 = 9;
}

/// 仅提交者可见
const EPHEMERAL_FLAG: u64 = 1 << 6;

#[derive(Clone, Debug, Serialize)]
pub struct InteractionCallback {
    #[serde(rename = "type")]
    pub kind: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl InteractionCallback {
    pub fn pong() -> Self {
        Self {
            kind: callback_type::PONG,
            data: None,
        }
    }

    /// 仅提交者可见的确认/拒绝消息
    pub fn ephemeral(content: impl Into<String>) -> Self {
        Self {
            kind: callback_type::CHANNEL_MESSAGE_WITH_SOURCE,
            data: Some(json!({
                "content": content.into(),
                "flags": EPHEMERAL_FLAG,
            })),
        }
    }

    /// 数量填写表单
    pub fn quantity_modal() -> Self {
        Self {
            kind: callback_type::MODAL,
            data: Some(json!({
                "custom_id": custom_ids::SUBMIT_MODAL,
                "title": "Record today's contribution",
                "components": [ActionRow::with(vec![Component::text_input(
                    custom_ids::QUANTITY_INPUT,
                    "How many did you contribute?",
                    QUANTITY_MAX_LEN,
                )])],
            })),
        }
    }
}
