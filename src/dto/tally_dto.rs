//! 排行榜传输用到的数据结构
//!
use serde::Serialize;

/// 渲染后的一行排名，名次从1开始连续编号
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RankedEntry {
    pub rank: usize,
    pub display_name: String,
    pub total: i64,
}
