use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};

use crate::core::error::Error;
use crate::types::response;
use crate::types::user::Principal;
use crate::utils::auth::authorize_owner;

#[derive(Clone, Debug)]
pub(crate) struct BudgetController {
    pool: PgPool,
}

/// Recorded owner of a budget, shared with the transaction and analytics
/// controllers.
pub(crate) async fn budget_owner(pool: &PgPool, id: i32) -> Result<Option<String>, Error> {
    match sqlx::query(
        "SELECT users.username
        FROM budgets
        JOIN users ON budgets.user_id = users.id
        WHERE budgets.id = $1;",
    )
    .bind(id)
    .map(|row: PgRow| row.get("username"))
    .fetch_one(pool)
    .await
    {
        Ok(username) => Ok(Some(username)),
        Err(sqlx::Error::RowNotFound) => Ok(None),
        Err(e) => Err(Error::Sql(e)),
    }
}

impl BudgetController {
    pub(crate) fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub(crate) async fn create(
        &self,
        principal: &Principal,
        name: &str,
        amount: f64,
    ) -> Result<response::Budget, Error> {
        match sqlx::query(
            "INSERT INTO budgets (name, amount, user_id)
            SELECT $1, $2, id FROM users WHERE username = $3
            RETURNING id, name, amount;",
        )
        .bind(name)
        .bind(amount)
        .bind(&principal.username)
        .map(map_budget)
        .fetch_one(&self.pool)
        .await
        {
            Ok(budget) => Ok(budget),
            Err(sqlx::Error::RowNotFound) => Err(Error::Unauthorized),
            Err(e) => Err(Error::Sql(e)),
        }
    }

    pub(crate) async fn list(&self, principal: &Principal) -> Result<Vec<response::Budget>, Error> {
        let budgets = sqlx::query(
            "SELECT budgets.id, budgets.name, budgets.amount
            FROM budgets
            JOIN users ON budgets.user_id = users.id
            WHERE users.username = $1
            ORDER BY budgets.id;",
        )
        .bind(&principal.username)
        .map(map_budget)
        .fetch_all(&self.pool)
        .await?;

        Ok(budgets)
    }

    pub(crate) async fn get(
        &self,
        id: i32,
        principal: &Principal,
    ) -> Result<response::Budget, Error> {
        authorize_owner(budget_owner(&self.pool, id).await?.as_deref(), principal)?;

        let budget = sqlx::query("SELECT id, name, amount FROM budgets WHERE id = $1;")
            .bind(id)
            .map(map_budget)
            .fetch_one(&self.pool)
            .await?;

        Ok(budget)
    }

    pub(crate) async fn update(
        &self,
        id: i32,
        principal: &Principal,
        name: &str,
        amount: f64,
    ) -> Result<response::Budget, Error> {
        authorize_owner(budget_owner(&self.pool, id).await?.as_deref(), principal)?;

        let budget = sqlx::query(
            "UPDATE budgets SET name = $1, amount = $2 WHERE id = $3 RETURNING id, name, amount;",
        )
        .bind(name)
        .bind(amount)
        .bind(id)
        .map(map_budget)
        .fetch_one(&self.pool)
        .await?;

        Ok(budget)
    }

    pub(crate) async fn delete(&self, id: i32, principal: &Principal) -> Result<(), Error> {
        authorize_owner(budget_owner(&self.pool, id).await?.as_deref(), principal)?;

        sqlx::query("DELETE FROM budgets WHERE id = $1;")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}

fn map_budget(row: PgRow) -> response::Budget {
    response::Budget {
        id: row.get("id"),
        name: row.get("name"),
        amount: row.get("amount"),
    }
}
