use sqlx::postgres::{PgPool, PgPoolOptions};

use crate::controllers::analytics::AnalyticsController;
use crate::controllers::budget::BudgetController;
use crate::controllers::transaction::TransactionController;
use crate::controllers::user::UserController;
use crate::core::error::ConfigError;

#[derive(Clone, Debug)]
pub(crate) struct AppState {
    pub(crate) pool: PgPool,
    pub(crate) user_controller: UserController,
    pub(crate) budget_controller: BudgetController,
    pub(crate) transaction_controller: TransactionController,
    pub(crate) analytics_controller: AnalyticsController,
}

impl AppState {
    pub(crate) async fn new(
        database_url: &str,
        secret: &str,
        token_ttl_secs: i64,
    ) -> Result<Self, ConfigError> {
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect(database_url)
            .await?;

        Self::with_pool(pool, secret, token_ttl_secs)
    }

    pub(crate) fn with_pool(
        pool: PgPool,
        secret: &str,
        token_ttl_secs: i64,
    ) -> Result<Self, ConfigError> {
        Ok(AppState {
            pool: pool.clone(),
            user_controller: UserController::new(pool.clone(), secret, token_ttl_secs)?,
            budget_controller: BudgetController::new(pool.clone()),
            transaction_controller: TransactionController::new(pool.clone()),
            analytics_controller: AnalyticsController::new(pool),
        })
    }
}
