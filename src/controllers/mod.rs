pub(crate) mod analytics;
pub(crate) mod budget;
pub(crate) mod transaction;
pub(crate) mod user;
