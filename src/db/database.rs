use crate::config::parameter;
use async_trait::async_trait;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::{Error, Pool, Sqlite};

pub struct Database {
    pool: Pool<Sqlite>,
}

#[async_trait]
pub trait DatabaseTrait {
    async fn init() -> Result<Self, Error>
    where
        Self: Sized;
    fn get_pool(&self) -> &Pool<Sqlite>;
}

#[async_trait]
impl DatabaseTrait for Database {
    async fn init() -> Result<Self, Error> {
        let database_url = parameter::get("DATABASE_URL");
        let pool = SqlitePoolOptions::new()
            .max_connections(10)
            .connect(&database_url)
            .await?;

        // 建表，幂等
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS contributions (
                user_id      BIGINT NOT NULL,
                display_name TEXT   NOT NULL,
                day          TEXT   NOT NULL,
                total        BIGINT NOT NULL,
                PRIMARY KEY (user_id, day)
            )",
        )
        .execute(&pool)
        .await?;

        Ok(Self { pool })
    }

    fn get_pool(&self) -> &Pool<Sqlite> {
        &self.pool
    }
}
