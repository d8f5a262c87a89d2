use chrono::{Local, NaiveDate};

/// 服务器本地日期，记账与渲染都用它做 day 键
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}
