use chrono::NaiveDate;
use serde::Serialize;

use crate::types::transaction::TransactionKind;

#[derive(Serialize)]
pub(crate) struct Token {
    pub(crate) token: String,
}

impl Token {
    pub(crate) fn new(token: String) -> Self {
        Self { token }
    }
}

#[derive(Serialize)]
pub(crate) struct Message {
    pub(crate) message: String,
}

impl Message {
    pub(crate) fn new(message: &str) -> Self {
        Self {
            message: message.to_string(),
        }
    }
}

#[derive(Serialize)]
pub(crate) struct CurrentUser {
    pub(crate) username: String,
}

#[derive(Serialize)]
pub(crate) struct Budget {
    pub(crate) id: i32,
    pub(crate) name: String,
    pub(crate) amount: f64,
}

#[derive(Serialize)]
pub(crate) struct Transaction {
    pub(crate) id: i32,
    pub(crate) amount: f64,
    #[serde(rename = "type")]
    pub(crate) kind: TransactionKind,
    pub(crate) description: Option<String>,
    pub(crate) date: NaiveDate,
    pub(crate) category: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct BudgetSummary {
    pub(crate) budget_id: i32,
    pub(crate) total_income: f64,
    pub(crate) total_expense: f64,
    pub(crate) balance: f64,
}

#[derive(Serialize)]
pub(crate) struct CategorySummary {
    pub(crate) category: Option<String>,
    pub(crate) total: f64,
}

#[derive(Serialize)]
pub(crate) struct MonthlySummary {
    pub(crate) year: i32,
    pub(crate) month: i32,
    pub(crate) total: f64,
}
