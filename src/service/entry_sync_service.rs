use crate::config::parameter::BotChannels;
use crate::discord::client::ChatClient;
use crate::discord::types::{colors, custom_ids, ActionRow, Component, Embed};
use crate::error::publish_error::PublishError;
use std::sync::Arc;

/// 清理旧入口时扫描的历史条数
pub const CLEANUP_WINDOW: u8 = 50;

/// 表单入口同步：启动时执行一次，保证窗口内只剩一个提交入口
#[derive(Clone)]
pub struct EntrySyncService {
    chat: Arc<dyn ChatClient>,
    form_channel: u64,
}

impl EntrySyncService {
    pub fn new(chat: &Arc<dyn ChatClient>, channels: &BotChannels) -> Self {
        Self {
            chat: Arc::clone(chat),
            form_channel: channels.form,
        }
    }

    /// 删除窗口内自己发过的全部消息，再发一条新的入口
    pub async fn sync(&self) -> Result<(), PublishError> {
        let history = self
            .chat
            .recent_messages(self.form_channel, CLEANUP_WINDOW)
            .await?;
        for message in &history {
            if message.author.id == self.chat.self_user_id() {
                self.chat
                    .delete_message(self.form_channel, &message.id)
                    .await?;
            }
        }

        self.chat
            .send_message(
                self.form_channel,
                prompt_embed(),
                vec![ActionRow::with(vec![Component::button(
                    custom_ids::SUBMIT_BUTTON,
                    "Record contribution",
                    "📦",
                )])],
            )
            .await?;
        tracing::info!("entry point synced - channel:{}", self.form_channel);
        Ok(())
    }
}

/// 表单入口消息
fn prompt_embed() -> Embed {
    Embed {
        title: Some("🧰 Daily Contribution Log".to_string()),
        description: Some(
            "Press the button to record how many items you contributed today.".to_string(),
        ),
        color: Some(colors::GREEN),
        ..Default::default()
    }
}
