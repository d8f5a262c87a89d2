//! 平台接口用到的最小数据结构，只声明核心消费的字段
//!
use serde::{Deserialize, Serialize};

/// 嵌入消息颜色
pub mod colors {
    pub const GOLD: u32 = 0xF1C40F;
    pub const GREEN: u32 = 0x2ECC71;
}

/// 组件的 custom_id，入口发布与交互分发两侧共用
pub mod custom_ids {
    pub const SUBMIT_BUTTON: &str = "contribution_open";
    pub const SUBMIT_MODAL: &str = "contribution_submit";
    pub const QUANTITY_INPUT: &str = "quantity";
}

/// 交互类型
pub mod interaction_type {
    pub const PING: u8 = 1;
    pub const MESSAGE_COMPONENT: u8 = 3;
    pub const MODAL_SUBMIT: u8 = 5;
}

/// 组件类型
pub mod component_type {
    pub const ACTION_ROW: u8 = 1;
    pub const BUTTON: u8 = 2;
    pub const TEXT_INPUT: u8 = 4;
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Embed {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<u32>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<EmbedField>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub footer: Option<EmbedFooter>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmbedField {
    pub name: String,
    pub value: String,
    pub inline: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmbedFooter {
    pub text: String,
}

/// 频道历史里的一条消息，作者用于识别自己发过的内容
#[derive(Clone, Debug, Deserialize)]
pub struct Message {
    pub id: String,
    pub author: MessageAuthor,
    #[serde(default)]
    pub embeds: Vec<Embed>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct MessageAuthor {
    pub id: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ActionRow {
    #[serde(rename = "type")]
    pub kind: u8,
    pub components: Vec<Component>,
}

impl ActionRow {
    pub fn with(components: Vec<Component>) -> Self {
        Self {
            kind: component_type::ACTION_ROW,
            components,
        }
    }
}

/// 按钮/文本输入共用的组件结构，未用到的字段不序列化
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Component {
    #[serde(rename = "type")]
    pub kind: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emoji: Option<PartialEmoji>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_length: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
}

impl Component {
    /// 绿色提交按钮
    pub fn button(custom_id: &str, label: &str, emoji: &str) -> Self {
        // style 3 = success
        Self {
            kind: component_type::BUTTON,
            style: Some(3),
            label: Some(label.to_string()),
            emoji: Some(PartialEmoji {
                name: emoji.to_string(),
            }),
            custom_id: Some(custom_id.to_string()),
            ..Default::default()
        }
    }

    /// 单行必填文本输入
    pub fn text_input(custom_id: &str, label: &str, max_length: u16) -> Self {
        // style 1 = short
        Self {
            kind: component_type::TEXT_INPUT,
            style: Some(1),
            label: Some(label.to_string()),
            custom_id: Some(custom_id.to_string()),
            max_length: Some(max_length),
            required: Some(true),
            placeholder: Some("e.g. 3".to_string()),
            ..Default::default()
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PartialEmoji {
    pub name: String,
}

/// 平台推送过来的一次交互
#[derive(Clone, Debug, Deserialize)]
pub struct Interaction {
    #[serde(rename = "type")]
    pub kind: u8,
    #[serde(default)]
    pub data: Option<InteractionData>,
    #[serde(default)]
    pub member: Option<GuildMember>,
    #[serde(default)]
    pub user: Option<User>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct InteractionData {
    #[serde(default)]
    pub custom_id: Option<String>,
    #[serde(default)]
    pub components: Option<Vec<SubmittedRow>>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct SubmittedRow {
    #[serde(default)]
    pub components: Vec<SubmittedField>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct SubmittedField {
    pub custom_id: String,
    #[serde(default)]
    pub value: String,
}

#[derive(Clone, Debug, Deserialize)]
pub struct User {
    pub id: String,
    pub username: String,
    #[serde(default)]
    pub global_name: Option<String>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct GuildMember {
    #[serde(default)]
    pub nick: Option<String>,
    #[serde(default)]
    pub user: Option<User>,
}

impl Interaction {
    pub fn custom_id(&self) -> Option<&str> {
        self.data.as_ref().and_then(|data| data.custom_id.as_deref())
    }

    /// 表单里某个输入框的原始文本
    pub fn field_value(&self, custom_id: &str) -> Option<&str> {
        let rows = self.data.as_ref()?.components.as_ref()?;
        for row in rows {
            for field in &row.components {
                if field.custom_id == custom_id {
                    return Some(field.value.as_str());
                }
            }
        }
        None
    }

    /// 提交者的 user_id 与展示名，服务器昵称优先于全局名
    pub fn submitter(&self) -> Option<(i64, String)> {
        let user = self
            .member
            .as_ref()
            .and_then(|member| member.user.as_ref())
            .or(self.user.as_ref())?;
        let user_id = user.id.parse().ok()?;
        let display_name = self
            .member
            .as_ref()
            .and_then(|member| member.nick.clone())
            .or_else(|| user.global_name.clone())
            .unwrap_or_else(|| user.username.clone());
        Some((user_id, display_name))
    }
}
