use crate::db::database::{Database, DatabaseTrait};
use crate::error::db_error::DbError;
use crate::model::contribution::ContributionRow;
use async_trait::async_trait;
use chrono::NaiveDate;
use std::sync::Arc;

#[derive(Clone)]
pub struct ContributionRepository {
    pub(crate) db_conn: Arc<Database>,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ContributionRepositoryTrait: Send + Sync {
    /// 累加当日贡献并返回最新总量。
    /// 单条语句完成读改写，同一 (user_id, day) 的并发提交在存储层串行化。
    async fn upsert_delta(
        &self,
        user_id: i64,
        display_name: &str,
        day: NaiveDate,
        delta: i64,
    ) -> Result<i64, DbError>;

    /// 单个用户当日总量，无记录时返回 None
    async fn get_total(&self, user_id: i64, day: NaiveDate) -> Result<Option<i64>, DbError>;

    /// 当日全部记录，无序，排序交给渲染层
    async fn list_day(&self, day: NaiveDate) -> Result<Vec<ContributionRow>, DbError>;
}

impl ContributionRepository {
    pub fn new(db_conn: &Arc<Database>) -> Self {
        Self {
            db_conn: Arc::clone(db_conn),
        }
    }
}

#[async_trait]
impl ContributionRepositoryTrait for ContributionRepository {
    async fn upsert_delta(
        &self,
        user_id: i64,
        display_name: &str,
        day: NaiveDate,
        delta: i64,
    ) -> Result<i64, DbError> {
        let total: i64 = sqlx::query_scalar(
            "INSERT INTO contributions (user_id, display_name, day, total)
             VALUES (?, ?, ?, ?)
             ON CONFLICT(user_id, day)
             DO UPDATE SET total = total + excluded.total,
                           display_name = excluded.display_name
             RETURNING total",
        )
        .bind(user_id)
        .bind(display_name)
        .bind(day.to_string())
        .bind(delta)
        .fetch_one(self.db_conn.get_pool())
        .await
        .map_err(|err| {
            tracing::error!(
                "upsert_delta - user_id:{} | day:{} | err:{}",
                user_id,
                day,
                err.to_string()
            );
            DbError::Unavailable(err.to_string())
        })?;
        Ok(total)
    }

    async fn get_total(&self, user_id: i64, day: NaiveDate) -> Result<Option<i64>, DbError> {
        let total: Option<i64> = sqlx::query_scalar(
            "SELECT total FROM contributions WHERE user_id = ? AND day = ?",
        )
        .bind(user_id)
        .bind(day.to_string())
        .fetch_optional(self.db_conn.get_pool())
        .await
        .map_err(|err| {
            tracing::error!(
                "get_total - user_id:{} | day:{} | err:{}",
                user_id,
                day,
                err.to_string()
            );
            DbError::Unavailable(err.to_string())
        })?;
        Ok(total)
    }

    async fn list_day(&self, day: NaiveDate) -> Result<Vec<ContributionRow>, DbError> {
        let rows = sqlx::query_as::<_, ContributionRow>(
            "SELECT user_id, display_name, day, total FROM contributions WHERE day = ?",
        )
        .bind(day.to_string())
        .fetch_all(self.db_conn.get_pool())
        .await
        .map_err(|err| {
            tracing::error!("list_day - day:{} | err:{}", day, err.to_string());
            DbError::Unavailable(err.to_string())
        })?;
        Ok(rows)
    }
}
