use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub(crate) struct Args {
    pub(crate) database_host: String,
    pub(crate) database_port: u16,
    pub(crate) database_name: String,
    pub(crate) database_user: String,
    pub(crate) database_password: String,
    pub(crate) log_level: String,
    pub(crate) port: u16,
    pub(crate) secret: String,
    /// Token lifetime in seconds.
    #[serde(default = "default_token_ttl")]
    pub(crate) token_ttl: i64,
}

fn default_token_ttl() -> i64 {
    3600
}
