use std::net::SocketAddr;
use std::path::PathBuf;

/// Connection settings for the document store.
#[derive(Clone)]
pub struct DbConfig {
    /// Endpoint understood by the SurrealDB `any` engine,
    /// e.g. `ws://127.0.0.1:8000`, `surrealkv://.wishes/db` or `mem://`.
    pub url: String,
    pub namespace: String,
    pub database: String,
    /// Root credentials for remote servers; both must be set to sign in.
    pub username: Option<String>,
    pub password: Option<String>,
}

impl std::fmt::Debug for DbConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DbConfig")
            .field("url", &self.url)
            .field("namespace", &self.namespace)
            .field("database", &self.database)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub listen: SocketAddr,
    pub db: DbConfig,

    /// Env-filter directive for console and file output.
    pub log: String,
    /// Optional JSON-lines log file.
    pub log_file: Option<PathBuf>,
}
