use dotenv;

pub fn init() {
    dotenv::dotenv().ok().expect("Failed to load .env file");
    // 给日志库设置环境变量
    if std::env::var_os("RUST_LOG").is_none() {
        std::env::set_var("RUST_LOG", "debug")
    }
    if std::env::var_os("PORT").is_none() {
        std::env::set_var("PORT", "3000")
    }
    if std::env::var_os("DATABASE_URL").is_none() {
        std::env::set_var("DATABASE_URL", "sqlite://tally.db?mode=rwc")
    }
    // 机器人凭证与频道配置必须显式给出
    for key in [
        "DISCORD_TOKEN",
        "DISCORD_APP_ID",
        "DISCORD_PUBLIC_KEY",
        "FORM_CHANNEL_ID",
        "LOG_CHANNEL_ID",
        "RANK_CHANNEL_ID",
    ] {
        if std::env::var_os(key).is_none() {
            panic!("config -- env var `{}` is not exist ", key);
        }
    }
}

pub fn get(parameter: &str) -> String {
    let env_parameter = std::env::var(parameter)
        .expect(&format!("{} is not defined in the environment.", parameter));
    return env_parameter;
}

pub fn get_u64(parameter: &str) -> u64 {
    get(parameter)
        .parse()
        .unwrap_or_else(|_| panic!("{} must be an unsigned integer.", parameter))
}

/// 机器人用到的三个频道：表单入口、审计日志、排行榜
#[derive(Clone, Copy, Debug)]
pub struct BotChannels {
    pub form: u64,
    pub audit: u64,
    pub leaderboard: u64,
}

impl BotChannels {
    pub fn from_env() -> Self {
        Self {
            form: get_u64("FORM_CHANNEL_ID"),
            audit: get_u64("LOG_CHANNEL_ID"),
            leaderboard: get_u64("RANK_CHANNEL_ID"),
        }
    }
}
