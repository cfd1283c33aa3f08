pub(crate) mod admin;
pub(crate) mod analytics;
pub(crate) mod auth;
pub(crate) mod budgets;
pub(crate) mod router;
pub(crate) mod transactions;
pub(crate) mod users;
