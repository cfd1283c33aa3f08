use chrono::Utc;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};

use crate::controllers::budget::budget_owner;
use crate::core::error::Error;
use crate::types::request::TransactionData;
use crate::types::response;
use crate::types::transaction::TransactionKind;
use crate::types::user::Principal;
use crate::utils::auth::authorize_owner;

#[derive(Clone, Debug)]
pub(crate) struct TransactionController {
    pool: PgPool,
}

impl TransactionController {
    pub(crate) fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Transactions carry no owner of their own; the parent budget's owner
    /// decides access.
    async fn transaction_owner(&self, id: i32) -> Result<Option<String>, Error> {
        match sqlx::query(
            "SELECT users.username
            FROM transactions
            JOIN budgets ON transactions.budget_id = budgets.id
            JOIN users ON budgets.user_id = users.id
            WHERE transactions.id = $1;",
        )
        .bind(id)
        .map(|row: PgRow| row.get("username"))
        .fetch_one(&self.pool)
        .await
        {
            Ok(username) => Ok(Some(username)),
            Err(sqlx::Error::RowNotFound) => Ok(None),
            Err(e) => Err(Error::Sql(e)),
        }
    }

    pub(crate) async fn add(
        &self,
        budget_id: i32,
        principal: &Principal,
        params: &TransactionData,
    ) -> Result<response::Transaction, Error> {
        authorize_owner(budget_owner(&self.pool, budget_id).await?.as_deref(), principal)?;

        let date = params.date.unwrap_or_else(|| Utc::now().date_naive());

        let transaction = sqlx::query(
            "INSERT INTO transactions (budget_id, amount, kind, description, date, category)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, amount, kind, description, date, category;",
        )
        .bind(budget_id)
        .bind(params.amount)
        .bind(params.kind.as_str())
        .bind(&params.description)
        .bind(date)
        .bind(&params.category)
        .map(map_transaction)
        .fetch_one(&self.pool)
        .await?;

        Ok(transaction)
    }

    pub(crate) async fn list(
        &self,
        budget_id: i32,
        principal: &Principal,
    ) -> Result<Vec<response::Transaction>, Error> {
        authorize_owner(budget_owner(&self.pool, budget_id).await?.as_deref(), principal)?;

        let transactions = sqlx::query(
            "SELECT id, amount, kind, description, date, category
            FROM transactions
            WHERE budget_id = $1
            ORDER BY id;",
        )
        .bind(budget_id)
        .map(map_transaction)
        .fetch_all(&self.pool)
        .await?;

        Ok(transactions)
    }

    pub(crate) async fn update(
        &self,
        id: i32,
        principal: &Principal,
        params: &TransactionData,
    ) -> Result<response::Transaction, Error> {
        authorize_owner(self.transaction_owner(id).await?.as_deref(), principal)?;

        let date = params.date.unwrap_or_else(|| Utc::now().date_naive());

        let transaction = sqlx::query(
            "UPDATE transactions
            SET amount = $1, kind = $2, description = $3, date = $4, category = $5
            WHERE id = $6
            RETURNING id, amount, kind, description, date, category;",
        )
        .bind(params.amount)
        .bind(params.kind.as_str())
        .bind(&params.description)
        .bind(date)
        .bind(&params.category)
        .bind(id)
        .map(map_transaction)
        .fetch_one(&self.pool)
        .await?;

        Ok(transaction)
    }

    pub(crate) async fn delete(&self, id: i32, principal: &Principal) -> Result<(), Error> {
        authorize_owner(self.transaction_owner(id).await?.as_deref(), principal)?;

        sqlx::query("DELETE FROM transactions WHERE id = $1;")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}

fn map_transaction(row: PgRow) -> response::Transaction {
    let kind: String = row.get("kind");

    response::Transaction {
        id: row.get("id"),
        amount: row.get("amount"),
        kind: TransactionKind::from(kind.as_str()),
        description: row.get("description"),
        date: row.get("date"),
        category: row.get("category"),
    }
}
