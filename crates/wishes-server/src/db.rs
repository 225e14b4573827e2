use anyhow::Context;
use surrealdb::{
    engine::any::{connect, Any},
    opt::auth::Root,
    Surreal,
};
use tracing::info;

use crate::config::DbConfig;

pub type SurrealDb = Surreal<Any>;

/// Process-wide handle to the document store.
///
/// Cloning is cheap and shares the underlying connection.
#[derive(Clone)]
pub struct Db {
    inner: SurrealDb,
}

impl Db {
    /// Connect to the endpoint in `config`, sign in if credentials are given,
    /// and select the namespace/database.
    pub async fn connect(config: &DbConfig) -> anyhow::Result<Self> {
        // The `any` engine picks the transport by scheme (ws://, http://, surrealkv://, mem://).
        let inner = connect(config.url.as_str())
            .await
            .with_context(|| format!("connecting to {}", config.url))?;

        if let (Some(username), Some(password)) = (&config.username, &config.password) {
            inner
                .signin(Root {
                    username: username.as_str(),
                    password: password.as_str(),
                })
                .await
                .context("signing in to surrealdb")?;
        }

        inner
            .use_ns(config.namespace.as_str())
            .use_db(config.database.as_str())
            .await
            .context("selecting surreal namespace/db")?;

        info!(url = %config.url, ns = %config.namespace, db = %config.database, "store connected");
        Ok(Self { inner })
    }

    /// Apply schema at startup.
    pub async fn apply_schema(&self) -> anyhow::Result<()> {
        let schema = include_str!("../schema.surql");
        self.inner
            .query(schema)
            .await
            .context("applying schema")?
            .check()
            .context("applying schema")?;
        Ok(())
    }

    pub fn inner(&self) -> &SurrealDb {
        &self.inner
    }
}
