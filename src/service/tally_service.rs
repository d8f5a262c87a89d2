use crate::config::parameter::BotChannels;
use crate::discord::client::ChatClient;
use crate::discord::types::{colors, Embed, EmbedField};
use crate::error::db_error::DbError;
use crate::repository::contribution_repository::ContributionRepositoryTrait;
use crate::service::leaderboard_service::LeaderboardService;
use chrono::NaiveDate;
use std::sync::Arc;

#[derive(Clone)]
pub struct TallyService {
    contribution_repo: Arc<dyn ContributionRepositoryTrait>,
    chat: Arc<dyn ChatClient>,
    leaderboard: Arc<LeaderboardService>,
    audit_channel: u64,
}

impl TallyService {
    pub fn new(
        contribution_repo: &Arc<dyn ContributionRepositoryTrait>,
        chat: &Arc<dyn ChatClient>,
        leaderboard: &Arc<LeaderboardService>,
        channels: &BotChannels,
    ) -> Self {
        Self {
            contribution_repo: Arc::clone(contribution_repo),
            chat: Arc::clone(chat),
            leaderboard: Arc::clone(leaderboard),
            audit_channel: channels.audit,
        }
    }

    /// 记录一次有效提交，返回当日最新总量。
    /// 每次调用只写库一次；审计与排行榜刷新在写库成功后异步执行，
    /// 不阻塞提交者的确认，失败也不回传。
    pub async fn record(
        &self,
        user_id: i64,
        display_name: &str,
        day: NaiveDate,
        delta: i64,
    ) -> Result<i64, DbError> {
        let new_total = self
            .contribution_repo
            .upsert_delta(user_id, display_name, day, delta)
            .await?;

        let service = self.clone();
        tokio::spawn(async move {
            service.after_commit(user_id, day, delta, new_total).await;
        });

        Ok(new_total)
    }

    /// 写库成功后的副作用：审计消息 + 排行榜刷新
    pub(crate) async fn after_commit(&self, user_id: i64, day: NaiveDate, delta: i64, new_total: i64) {
        if let Err(err) = self
            .chat
            .send_message(self.audit_channel, audit_embed(user_id, delta, new_total), vec![])
            .await
        {
            tracing::error!(
                "record audit - channel:{} | err:{}",
                self.audit_channel,
                err.to_string()
            );
        }
        self.leaderboard.refresh(day).await;
    }
}

/// 审计消息
fn audit_embed(user_id: i64, delta: i64, new_total: i64) -> Embed {
    Embed {
        title: Some("🧰 Contribution recorded".to_string()),
        color: Some(colors::GREEN),
        fields: vec![
            EmbedField {
                name: "👤 User".to_string(),
                value: format!("<@{user_id}>"),
                inline: false,
            },
            EmbedField {
                name: "📦 Added".to_string(),
                value: delta.to_string(),
                inline: false,
            },
            EmbedField {
                name: "📊 Total today".to_string(),
                value: new_total.to_string(),
                inline: false,
            },
        ],
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::discord::client::MockChatClient;
    use crate::discord::types::{Message, MessageAuthor};
    use crate::dto::submission::parse_quantity;
    use crate::model::contribution::ContributionRow;
    use crate::repository::contribution_repository::MockContributionRepositoryTrait;
    use crate::service::leaderboard_service::PublishOutcome;
    use async_trait::async_trait;
    use mockall::Sequence;
    use std::collections::HashMap;
    use tokio::sync::Mutex;

    const BOT_ID: &str = "777";

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, 7).unwrap()
    }

    fn channels() -> BotChannels {
        BotChannels {
            form: 10,
            audit: 20,
            leaderboard: 30,
        }
    }

    fn bot_message(id: &str) -> Message {
        Message {
            id: id.to_string(),
            author: MessageAuthor {
                id: BOT_ID.to_string(),
            },
            embeds: vec![Embed::default()],
        }
    }

    /// 审计/刷新等副作用全部放行的宽松平台替身
    fn lenient_chat() -> MockChatClient {
        let mut chat = MockChatClient::new();
        chat.expect_self_user_id().return_const(BOT_ID.to_string());
        chat.expect_send_message()
            .returning(|_, _, _| Ok(bot_message("any")));
        chat.expect_edit_message().returning(|_, _, _| Ok(()));
        chat.expect_recent_messages().returning(|_, _| Ok(vec![]));
        chat
    }

    fn build(
        repo: Arc<dyn ContributionRepositoryTrait>,
        chat: Arc<dyn ChatClient>,
    ) -> TallyService {
        let leaderboard = Arc::new(LeaderboardService::new(&repo, &chat, channels().leaderboard));
        TallyService::new(&repo, &chat, &leaderboard, &channels())
    }

    /// 内存版存储：按 (user_id, day) 原子累加
    #[derive(Default)]
    struct MemoryRepo {
        rows: Mutex<HashMap<(i64, String), (String, i64)>>,
    }

    #[async_trait]
    impl ContributionRepositoryTrait for MemoryRepo {
        async fn upsert_delta(
            &self,
            user_id: i64,
            display_name: &str,
            day: NaiveDate,
            delta: i64,
        ) -> Result<i64, DbError> {
            let mut rows = self.rows.lock().await;
            let entry = rows
                .entry((user_id, day.to_string()))
                .or_insert_with(|| (display_name.to_string(), 0));
            entry.0 = display_name.to_string();
            entry.1 += delta;
            Ok(entry.1)
        }

        async fn get_total(&self, user_id: i64, day: NaiveDate) -> Result<Option<i64>, DbError> {
            let rows = self.rows.lock().await;
            Ok(rows.get(&(user_id, day.to_string())).map(|entry| entry.1))
        }

        async fn list_day(&self, day: NaiveDate) -> Result<Vec<ContributionRow>, DbError> {
            let rows = self.rows.lock().await;
            Ok(rows
                .iter()
                .filter(|((_, row_day), _)| *row_day == day.to_string())
                .map(|((user_id, row_day), (display_name, total))| ContributionRow {
                    user_id: *user_id,
                    display_name: display_name.clone(),
                    day: row_day.clone(),
                    total: *total,
                })
                .collect())
        }
    }

    #[tokio::test]
    async fn record_upserts_exactly_once_and_returns_new_total() {
        let mut repo = MockContributionRepositoryTrait::new();
        repo.expect_upsert_delta()
            .withf(|user_id, name, _, delta| *user_id == 42 && name == "Stone" && *delta == 3)
            .times(1)
            .returning(|_, _, _, _| Ok(5));
        repo.expect_list_day().returning(|_| Ok(vec![]));

        let repo: Arc<dyn ContributionRepositoryTrait> = Arc::new(repo);
        let chat: Arc<dyn ChatClient> = Arc::new(lenient_chat());
        let tally = build(repo, chat);

        let new_total = tally.record(42, "Stone", day(), 3).await.unwrap();
        assert_eq!(new_total, 5);
    }

    #[tokio::test]
    async fn store_fault_propagates_and_spawns_nothing() {
        let mut repo = MockContributionRepositoryTrait::new();
        repo.expect_upsert_delta()
            .times(1)
            .returning(|_, _, _, _| Err(DbError::Unavailable("disk gone".to_string())));

        let repo: Arc<dyn ContributionRepositoryTrait> = Arc::new(repo);
        // 副作用侧零期望：写库失败后不允许碰平台
        let chat: Arc<dyn ChatClient> = Arc::new(MockChatClient::new());
        let tally = build(repo, chat);

        let result = tally.record(42, "Stone", day(), 3).await;
        assert!(matches!(result, Err(DbError::Unavailable(_))));
    }

    #[tokio::test]
    async fn concurrent_submissions_for_one_user_all_land() {
        let repo = Arc::new(MemoryRepo::default());
        let repo_dyn: Arc<dyn ContributionRepositoryTrait> = repo.clone();
        let chat: Arc<dyn ChatClient> = Arc::new(lenient_chat());
        let tally = build(repo_dyn, chat);

        let mut handles = vec![];
        for delta in 1..=20i64 {
            let tally = tally.clone();
            handles.push(tokio::spawn(async move {
                tally.record(42, "Stone", day(), delta).await.unwrap();
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        // Σ 1..=20
        assert_eq!(repo.get_total(42, day()).await.unwrap(), Some(210));
    }

    #[tokio::test]
    async fn three_then_two_totals_five_and_second_publish_edits() {
        let repo = Arc::new(MemoryRepo::default());
        let repo_dyn: Arc<dyn ContributionRepositoryTrait> = repo.clone();
        let chat: Arc<dyn ChatClient> = Arc::new(lenient_chat());
        let tally = build(repo_dyn.clone(), chat);

        let first = parse_quantity("3").unwrap();
        assert_eq!(tally.record(42, "Stone", day(), first).await.unwrap(), 3);
        let second = parse_quantity("2").unwrap();
        assert_eq!(tally.record(42, "Stone", day(), second).await.unwrap(), 5);

        // 两次发布：第一次新发，第二次在窗口内找到旧榜后原地编辑
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
            .returning(|_, _, _| Ok(bot_message("board")));
        chat.expect_recent_messages()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Ok(vec![bot_message("board")]));
        chat.expect_edit_message()
            .withf(|_, id, embed| {
                id == "board"
                    && embed
                        .description
                        .as_deref()
                        .is_some_and(|text| text.contains("**1. Stone** — 5"))
            })
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _, _| Ok(()));

        let chat: Arc<dyn ChatClient> = Arc::new(chat);
        let board = LeaderboardService::new(&repo_dyn, &chat, channels().leaderboard);

        let entries = board.render(day()).await.unwrap();
        assert_eq!(
            board.publish(day(), &entries).await.unwrap(),
            PublishOutcome::Created
        );
        let entries = board.render(day()).await.unwrap();
        assert_eq!(
            board.publish(day(), &entries).await.unwrap(),
            PublishOutcome::Edited
        );
    }
}
