use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};

use crate::controllers::budget::budget_owner;
use crate::core::error::Error;
use crate::types::response;
use crate::types::transaction::TransactionKind;
use crate::types::user::Principal;
use crate::utils::auth::authorize_owner;

#[derive(Clone, Debug)]
pub(crate) struct AnalyticsController {
    pool: PgPool,
}

impl AnalyticsController {
    pub(crate) fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub(crate) async fn summary(
        &self,
        budget_id: i32,
        principal: &Principal,
    ) -> Result<response::BudgetSummary, Error> {
        authorize_owner(budget_owner(&self.pool, budget_id).await?.as_deref(), principal)?;

        let summary = sqlx::query(
            "SELECT
                budgets.id,
                budgets.amount,
                COALESCE(SUM(transactions.amount) FILTER (WHERE transactions.kind = 'INCOME'), 0) AS total_income,
                COALESCE(SUM(transactions.amount) FILTER (WHERE transactions.kind = 'EXPENSE'), 0) AS total_expense
            FROM budgets
            LEFT JOIN transactions ON transactions.budget_id = budgets.id
            WHERE budgets.id = $1
            GROUP BY budgets.id, budgets.amount;",
        )
        .bind(budget_id)
        .map(map_summary)
        .fetch_one(&self.pool)
        .await?;

        Ok(summary)
    }

    pub(crate) async fn sum_by_category(
        &self,
        budget_id: i32,
        kind: TransactionKind,
        principal: &Principal,
    ) -> Result<Vec<response::CategorySummary>, Error> {
        authorize_owner(budget_owner(&self.pool, budget_id).await?.as_deref(), principal)?;

        let summaries = sqlx::query(
            "SELECT category, SUM(amount) AS total
            FROM transactions
            WHERE budget_id = $1 AND kind = $2
            GROUP BY category
            ORDER BY category;",
        )
        .bind(budget_id)
        .bind(kind.as_str())
        .map(|row: PgRow| response::CategorySummary {
            category: row.get("category"),
            total: row.get("total"),
        })
        .fetch_all(&self.pool)
        .await?;

        Ok(summaries)
    }

    pub(crate) async fn sum_by_month(
        &self,
        budget_id: i32,
        kind: TransactionKind,
        principal: &Principal,
    ) -> Result<Vec<response::MonthlySummary>, Error> {
        authorize_owner(budget_owner(&self.pool, budget_id).await?.as_deref(), principal)?;

        let summaries = sqlx::query(
            "SELECT
                CAST(EXTRACT(YEAR FROM date) AS INTEGER) AS year,
                CAST(EXTRACT(MONTH FROM date) AS INTEGER) AS month,
                SUM(amount) AS total
            FROM transactions
            WHERE budget_id = $1 AND kind = $2
            GROUP BY year, month
            ORDER BY year, month;",
        )
        .bind(budget_id)
        .bind(kind.as_str())
        .map(|row: PgRow| response::MonthlySummary {
            year: row.get("year"),
            month: row.get("month"),
            total: row.get("total"),
        })
        .fetch_all(&self.pool)
        .await?;

        Ok(summaries)
    }
}

fn map_summary(row: PgRow) -> response::BudgetSummary {
    let amount: f64 = row.get("amount");
    let total_income: f64 = row.get("total_income");
    let total_expense: f64 = row.get("total_expense");

    response::BudgetSummary {
        budget_id: row.get("id"),
        total_income,
        total_expense,
        balance: amount + total_income - total_expense,
    }
}
