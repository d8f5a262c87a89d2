//! 提交数量的解析与校验
//!
use thiserror::Error;

/// 数量上限：4位数字
pub const QUANTITY_MAX: i64 = 9999;
/// 表单输入框长度限制，与 QUANTITY_MAX 对应
pub const QUANTITY_MAX_LEN: u16 = 4;

/// 所有非法输入共用同一个错误，不区分原因
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
#[error("quantity must be a whole number between 1 and {QUANTITY_MAX}")]
pub struct InvalidQuantity;

/// 解析用户在表单里填写的数量，纯函数，无副作用
pub fn parse_quantity(raw: &str) -> Result<i64, InvalidQuantity> {
    let value: i64 = raw.trim().parse().map_err(|_| InvalidQuantity)?;
    if value <= 0 || value > QUANTITY_MAX {
        return Err(InvalidQuantity);
    }
    Ok(value)
}
