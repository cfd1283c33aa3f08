use chrono::NaiveDate;
use serde::Deserialize;

use crate::types::transaction::TransactionKind;

#[derive(Deserialize)]
pub(crate) struct LoginData {
    pub(crate) username: String,
    pub(crate) password: String,
}

#[derive(Deserialize)]
pub(crate) struct RegistrationData {
    pub(crate) username: String,
    pub(crate) email: String,
    pub(crate) password: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct BudgetData {
    pub(crate) name: String,
    pub(crate) amount: f64,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TransactionData {
    pub(crate) amount: f64,
    #[serde(rename = "type")]
    pub(crate) kind: TransactionKind,
    pub(crate) description: Option<String>,
    pub(crate) date: Option<NaiveDate>,
    pub(crate) category: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct KindParams {
    #[serde(rename = "type")]
    pub(crate) kind: TransactionKind,
}
