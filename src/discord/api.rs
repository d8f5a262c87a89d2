//! Discord REST(v10) 客户端
//!
use crate::discord::client::ChatClient;
use crate::discord::types::{ActionRow, Embed, Message};
use crate::error::publish_error::PublishError;
use async_trait::async_trait;
use reqwest::StatusCode;

const API_BASE: &str = "https://discord.com/api/v10";

pub struct DiscordApi {
    http: reqwest::Client,
    token: String,
    app_id: String,
}

impl DiscordApi {
    pub fn new(token: String, app_id: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            token,
            app_id,
        }
    }

    fn auth(&self) -> String {
        format!("Bot {}", self.token)
    }

    /// 404/403 说明频道配置错误，单独归类为 TargetUnresolved
    async fn check(
        response: reqwest::Response,
        channel_id: u64,
    ) -> Result<reqwest::Response, PublishError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        if status == StatusCode::NOT_FOUND || status == StatusCode::FORBIDDEN {
            return Err(PublishError::TargetUnresolved(channel_id));
        }
        let body = response.text().await.unwrap_or_default();
        Err(PublishError::Api(format!("status {}: {}", status, body)))
    }
}

#[async_trait]
impl ChatClient for DiscordApi {
    fn self_user_id(&self) -> &str {
        // Bot 用户id与应用id一致
        &self.app_id
    }

    async fn send_message(
        &self,
        channel_id: u64,
        embed: Embed,
        components: Vec<ActionRow>,
    ) -> Result<Message, PublishError> {
        let body = serde_json::json!({
            "embeds": [embed],
            "components": components,
        });
        let response = self
            .http
            .post(format!("{API_BASE}/channels/{channel_id}/messages"))
            .header("Authorization", self.auth())
            .json(&body)
            .send()
            .await?;
        let response = Self::check(response, channel_id).await?;
        Ok(response.json::<Message>().await?)
    }

    async fn edit_message(
        &self,
        channel_id: u64,
        message_id: &str,
        embed: Embed,
    ) -> Result<(), PublishError> {
        let body = serde_json::json!({ "embeds": [embed] });
        let response = self
            .http
            .patch(format!(
                "{API_BASE}/channels/{channel_id}/messages/{message_id}"
            ))
            .header("Authorization", self.auth())
            .json(&body)
            .send()
            .await?;
        Self::check(response, channel_id).await?;
        Ok(())
    }

    async fn recent_messages(
        &self,
        channel_id: u64,
        limit: u8,
    ) -> Result<Vec<Message>, PublishError> {
        let response = self
            .http
            .get(format!("{API_BASE}/channels/{channel_id}/messages"))
            .header("Authorization", self.auth())
            .query(&[("limit", u32::from(limit))])
            .send()
            .await?;
        let response = Self::check(response, channel_id).await?;
        Ok(response.json::<Vec<Message>>().await?)
    }

    async fn delete_message(
        &self,
        channel_id: u64,
        message_id: &str,
    ) -> Result<(), PublishError> {
        let response = self
            .http
            .delete(format!(
                "{API_BASE}/channels/{channel_id}/messages/{message_id}"
            ))
            .header("Authorization", self.auth())
            .send()
            .await?;
        Self::check(response, channel_id).await?;
        Ok(())
    }
}
