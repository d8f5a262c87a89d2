use crate::discord::client::ChatClient;
use crate::discord::types::{colors, Embed, EmbedFooter};
use crate::dto::tally_dto::RankedEntry;
use crate::error::db_error::DbError;
use crate::error::publish_error::PublishError;
use crate::repository::contribution_repository::ContributionRepositoryTrait;
use chrono::NaiveDate;
use std::sync::Arc;

/// 查找旧榜时扫描的历史条数
pub const SCAN_WINDOW: u8 = 10;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PublishOutcome {
    Created,
    Edited,
    Skipped,
}

#[derive(Clone)]
pub struct LeaderboardService {
    contribution_repo: Arc<dyn ContributionRepositoryTrait>,
    chat: Arc<dyn ChatClient>,
    channel_id: u64,
}

impl LeaderboardService {
    pub fn new(
        contribution_repo: &Arc<dyn ContributionRepositoryTrait>,
        chat: &Arc<dyn ChatClient>,
        channel_id: u64,
    ) -> Self {
        Self {
            contribution_repo: Arc::clone(contribution_repo),
            chat: Arc::clone(chat),
            channel_id,
        }
    }

    /// 当日排名：总量降序，平分按 user_id 升序。
    /// 名次从1开始连续编号，平分不共享名次。空榜返回空表。
    pub async fn render(&self, day: NaiveDate) -> Result<Vec<RankedEntry>, DbError> {
        let mut rows = self.contribution_repo.list_day(day).await?;
        rows.sort_by(|a, b| b.total.cmp(&a.total).then(a.user_id.cmp(&b.user_id)));
        Ok(rows
            .into_iter()
            .enumerate()
            .map(|(index, row)| RankedEntry {
                rank: index + 1,
                display_name: row.display_name,
                total: row.total,
            })
            .collect())
    }

    /// 发布渲染结果：窗口内找到旧榜就原地编辑，否则新发一条。
    /// 旧榜超出扫描窗口时会多出一条，属于接受的有界过期行为。
    pub async fn publish(
        &self,
        day: NaiveDate,
        entries: &[RankedEntry],
    ) -> Result<PublishOutcome, PublishError> {
        if entries.is_empty() {
            return Ok(PublishOutcome::Skipped);
        }
        let embed = leaderboard_embed(day, entries);

        let history = self
            .chat
            .recent_messages(self.channel_id, SCAN_WINDOW)
            .await?;
        for message in &history {
            if message.author.id == self.chat.self_user_id() && !message.embeds.is_empty() {
                self.chat
                    .edit_message(self.channel_id, &message.id, embed)
                    .await?;
                return Ok(PublishOutcome::Edited);
            }
        }

        self.chat
            .send_message(self.channel_id, embed, vec![])
            .await?;
        tracing::debug!(
            "publish - no artifact in last {} messages, created a new one",
            SCAN_WINDOW
        );
        Ok(PublishOutcome::Created)
    }

    /// 读库、渲染、发布。只记日志，失败不往上抛。
    pub async fn refresh(&self, day: NaiveDate) {
        let entries = match self.render(day).await {
            Ok(entries) => entries,
            Err(err) => {
                tracing::error!("refresh render - day:{} | err:{}", day, err.to_string());
                return;
            }
        };
        if let Err(err) = self.publish(day, &entries).await {
            tracing::error!(
                "refresh publish - channel:{} | err:{}",
                self.channel_id,
                err.to_string()
            );
        }
    }
}

/// 排行榜消息
fn leaderboard_embed(day: NaiveDate, entries: &[RankedEntry]) -> Embed {
    let mut description = String::new();
    for entry in entries {
        description.push_str(&format!(
            "**{}. {}** — {}\n",
            entry.rank, entry.display_name, entry.total
        ));
    }
    Embed {
        title: Some("🏆 Daily Contribution Ranking".to_string()),
        description: Some(description),
        color: Some(colors::GOLD),
        footer: Some(EmbedFooter {
            text: format!("Date: {day}"),
        }),
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::discord::client::MockChatClient;
    use crate::discord::types::{Message, MessageAuthor};
    use crate::model::contribution::ContributionRow;
    use crate::repository::contribution_repository::MockContributionRepositoryTrait;
    use mockall::Sequence;

    const BOT_ID: &str = "777";
    const CHANNEL: u64 = 30;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, 7).unwrap()
    }

    fn row(user_id: i64, display_name: &str, total: i64) -> ContributionRow {
        ContributionRow {
            user_id,
            display_name: display_name.to_string(),
            day: day().to_string(),
            total,
        }
    }

    fn message(id: &str, author: &str, with_embed: bool) -> Message {
        Message {
            id: id.to_string(),
            author: MessageAuthor {
                id: author.to_string(),
            },
            embeds: if with_embed {
                vec![Embed::default()]
            } else {
                vec![]
            },
        }
    }

    fn service(
        repo: MockContributionRepositoryTrait,
        chat: MockChatClient,
    ) -> LeaderboardService {
        let repo: Arc<dyn ContributionRepositoryTrait> = Arc::new(repo);
        let chat: Arc<dyn ChatClient> = Arc::new(chat);
        LeaderboardService::new(&repo, &chat, CHANNEL)
    }

    #[tokio::test]
    async fn render_orders_by_total_desc_then_user_id_asc() {
        let mut repo = MockContributionRepositoryTrait::new();
        repo.expect_list_day()
            .returning(|_| Ok(vec![row(1, "A", 5), row(3, "C", 9), row(2, "B", 9)]));

        let board = service(repo, MockChatClient::new());
        let entries = board.render(day()).await.unwrap();

        assert_eq!(
            entries,
            vec![
                RankedEntry {
                    rank: 1,
                    display_name: "B".to_string(),
                    total: 9
                },
                RankedEntry {
                    rank: 2,
                    display_name: "C".to_string(),
                    total: 9
                },
                RankedEntry {
                    rank: 3,
                    display_name: "A".to_string(),
                    total: 5
                },
            ]
        );
    }

    #[tokio::test]
    async fn render_empty_day_yields_empty() {
        let mut repo = MockContributionRepositoryTrait::new();
        repo.expect_list_day().returning(|_| Ok(vec![]));

        let board = service(repo, MockChatClient::new());
        assert!(board.render(day()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn publish_skips_when_nothing_rendered() {
        // mock 上没有任何期望，任何平台调用都会失败
        let board = service(MockContributionRepositoryTrait::new(), MockChatClient::new());
        let outcome = board.publish(day(), &[]).await.unwrap();
        assert_eq!(outcome, PublishOutcome::Skipped);
    }

    #[tokio::test]
    async fn publish_edits_artifact_found_in_window() {
        let mut chat = MockChatClient::new();
        chat.expect_self_user_id().return_const(BOT_ID.to_string());
        chat.expect_recent_messages()
            .returning(|_, _| Ok(vec![message("m0", "123", true), message("m1", BOT_ID, true)]));
        chat.expect_edit_message()
            .withf(|channel, id, _| *channel == CHANNEL && id == "m1")
            .times(1)
            .returning(|_, _, _| Ok(()));

        let board = service(MockContributionRepositoryTrait::new(), chat);
        let entries = vec![RankedEntry {
            rank: 1,
            display_name: "A".to_string(),
            total: 5,
        }];
        let outcome = board.publish(day(), &entries).await.unwrap();
        assert_eq!(outcome, PublishOutcome::Edited);
    }

    #[tokio::test]
    async fn publish_creates_when_window_has_no_artifact() {
        let mut chat = MockChatClient::new();
        chat.expect_self_user_id().return_const(BOT_ID.to_string());
        // 自己发的但没有embed的消息不算榜
        chat.expect_recent_messages()
            .returning(|_, _| Ok(vec![message("m0", "123", true), message("m1", BOT_ID, false)]));
        chat.expect_send_message()
            .withf(|channel, _, _| *channel == CHANNEL)
            .times(1)
            .returning(|_, _, _| Ok(message("new", BOT_ID, true)));

        let board = service(MockContributionRepositoryTrait::new(), chat);
        let entries = vec![RankedEntry {
            rank: 1,
            display_name: "A".to_string(),
            total: 5,
        }];
        let outcome = board.publish(day(), &entries).await.unwrap();
        assert_eq!(outcome, PublishOutcome::Created);
    }

    #[tokio::test]
    async fn second_publish_edits_instead_of_creating_again() {
        let mut chat = MockChatClient::new();
        let mut seq = Sequence::new();
        chat.expect_self_user_id().return_const(BOT_ID.to_string());
        chat.expect_recent_messages()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Ok(vec![]));
        chat.expect_send_message()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _, _| Ok(message("board", BOT_ID, true)));
        chat.expect_recent_messages()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Ok(vec![message("board", BOT_ID, true)]));
        chat.expect_edit_message()
            .withf(|_, id, _| id == "board")
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _, _| Ok(()));

        let board = service(MockContributionRepositoryTrait::new(), chat);
        let entries = vec![RankedEntry {
            rank: 1,
            display_name: "A".to_string(),
            total: 5,
        }];
        assert_eq!(
            board.publish(day(), &entries).await.unwrap(),
            PublishOutcome::Created
        );
        assert_eq!(
            board.publish(day(), &entries).await.unwrap(),
            PublishOutcome::Edited
        );
    }
}
