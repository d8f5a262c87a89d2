use crate::config::parameter::{self, BotChannels};
use crate::db::database::{self, DatabaseTrait};
use crate::discord::api::DiscordApi;
use crate::discord::client::ChatClient;
use crate::middleware::signature::InteractionVerifier;
use crate::repository::contribution_repository::{
    ContributionRepository, ContributionRepositoryTrait,
};
use crate::service::entry_sync_service::EntrySyncService;
use crate::service::leaderboard_service::LeaderboardService;
use crate::service::tally_service::TallyService;
use crate::state::tally_state::TallyState;

use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::fmt::time;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use std::sync::Arc;

mod config;
mod db;
mod discord;
mod dto;
mod error;
mod handler;
mod middleware;
mod model;
mod repository;
mod response;
mod routes;
mod service;
mod state;
mod utils;

// 内存分配器
#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

#[cfg(target_env = "msvc")]
use mimalloc::MiMalloc;

#[cfg(target_env = "msvc")]
#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() {
    // 参数初始化
    parameter::init();

    let connection = database::Database::init()
        .await
        .unwrap_or_else(|e| panic!("Database error: {}", e.to_string()));
    let db_pool = Arc::new(connection);

    // 日志
    let file_appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix("logger")
        .filename_suffix("log")
        .max_log_files(60)
        .build("log")
        .expect("file log init failed!");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    let file_log_subscriber = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_timer(time::LocalTime::rfc_3339());

    let console_subscriber = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stdout)
        .with_timer(time::LocalTime::rfc_3339());
    tracing_subscriber::registry()
        .with(file_log_subscriber)
        .with(console_subscriber)
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let channels = BotChannels::from_env();
    let verifier = InteractionVerifier::from_hex(&parameter::get("DISCORD_PUBLIC_KEY"))
        .unwrap_or_else(|e| panic!("config -- DISCORD_PUBLIC_KEY is invalid: {}", e));

    // 所有共享句柄在这里构造，显式传给各组件
    let contribution_repo: Arc<dyn ContributionRepositoryTrait> =
        Arc::new(ContributionRepository::new(&db_pool));
    let chat: Arc<dyn ChatClient> = Arc::new(DiscordApi::new(
        parameter::get("DISCORD_TOKEN"),
        parameter::get("DISCORD_APP_ID"),
    ));

    let leaderboard = Arc::new(LeaderboardService::new(
        &contribution_repo,
        &chat,
        channels.leaderboard,
    ));
    let tally_service = Arc::new(TallyService::new(
        &contribution_repo,
        &chat,
        &leaderboard,
        &channels,
    ));

    // 启动时同步表单入口，窗口内只留一个
    let entry_sync = EntrySyncService::new(&chat, &channels);
    tokio::spawn(async move {
        if let Err(err) = entry_sync.sync().await {
            tracing::error!("entry point sync failed, error:{}", err.to_string());
        }
    });

    let host = format!("0.0.0.0:{}", parameter::get("PORT"));
    let listener = tokio::net::TcpListener::bind(host).await.unwrap();

    tracing::info!("listening on {}", listener.local_addr().unwrap());

    axum::serve(
        listener,
        routes::root::routes(TallyState::new(&tally_service, verifier)),
    )
    .await
    .unwrap_or_else(|e| panic!("Server error: {}", e.to_string()));
}
