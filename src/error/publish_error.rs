use thiserror::Error;

/// 发布/同步消息时的错误，只在各自边界记录日志，不影响提交者的确认
#[derive(Error, Debug)]
pub enum PublishError {
    /// 配置的频道不存在或不可访问
    #[error("channel {0} could not be resolved")]
    TargetUnresolved(u64),
    #[error("platform api error: {0}")]
    Api(String),
}

impl From<reqwest::Error> for PublishError {
    fn from(err: reqwest::Error) -> Self {
        PublishError::Api(err.to_string())
    }
}
