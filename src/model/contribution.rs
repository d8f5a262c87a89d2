//! 内部用到的数据模型
//!
use serde::{Deserialize, Serialize};

/// 数据库存储的单个用户当日贡献量，(user_id, day) 唯一
#[derive(Clone, Debug, Deserialize, Serialize, sqlx::FromRow)]
pub struct ContributionRow {
    pub user_id: i64,
    /// 最近一次提交时观察到的展示名，仅用于渲染
    pub display_name: String,
    /// ISO 8601 日期文本，例如 2026-08-07
    pub day: String,
    pub total: i64,
}
