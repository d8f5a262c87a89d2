use crate::discord::types::{ActionRow, Embed, Message};
use crate::error::publish_error::PublishError;
use async_trait::async_trait;

/// 核心消费的消息平台能力：发送、原地编辑、有界历史、删除。
/// 发布与入口同步都走这个接口，测试里用 mock 替换。
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ChatClient: Send + Sync {
    /// 机器人自身的用户id，用来在频道历史里识别自己发的消息
    fn self_user_id(&self) -> &str;

    async fn send_message(
        &self,
        channel_id: u64,
        embed: Embed,
        components: Vec<ActionRow>,
    ) -> Result<Message, PublishError>;

    async fn edit_message(
        &self,
        channel_id: u64,
        message_id: &str,
        embed: Embed,
    ) -> Result<(), PublishError>;

    /// 最近的消息，最新在前，最多 limit 条
    async fn recent_messages(
        &self,
        channel_id: u64,
        limit: u8,
    ) -> Result<Vec<Message>, PublishError>;

    async fn delete_message(&self, channel_id: u64, message_id: &str)
        -> Result<(), PublishError>;
}
