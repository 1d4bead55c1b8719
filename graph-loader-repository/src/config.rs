//! Connection configuration for the Neo4j backend.

use url::Url;

use crate::errors::GraphError;

/// Default Bolt endpoint.
pub const DEFAULT_URL: &str = "bolt://localhost:7687/";

/// Default `user:password` pair.
pub const DEFAULT_AUTH: &str = "neo4j:myneo4j";

/// Default number of rows fetched per pull.
const DEFAULT_FETCH_SIZE: usize = 500;

/// A user name and password pair.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub user: String,
    pub password: String,
}

impl Credentials {
    /// Parse `user:password`, splitting on the first `:`.
    pub fn parse(auth: &str) -> Result<Self, GraphError> {
        let (user, password) = auth
            .split_once(':')
            .ok_or_else(|| GraphError::invalid_credentials("expected 'user:password'"))?;

        if user.is_empty() {
            return Err(GraphError::invalid_credentials("user name is empty"));
        }

        Ok(Self {
            user: user.to_string(),
            password: password.to_string(),
        })
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("user", &self.user)
            .field("password", &"***")
            .finish()
    }
}

/// Configuration for the Neo4jClient.
#[derive(Debug, Clone)]
pub struct Neo4jConfig {
    /// Bolt URL of the server.
    pub url: String,
    pub credentials: Credentials,
    /// Target database; the server default when `None`.
    pub database: Option<String>,
    pub fetch_size: usize,
}

impl Neo4jConfig {
    /// Build a config from a URL and a `user:password` string.
    pub fn new(url: &str, auth: &str) -> Result<Self, GraphError> {
        Url::parse(url)
            .map_err(|e| GraphError::connection(format!("Invalid URL '{}': {}", url, e)))?;

        Ok(Self {
            url: url.to_string(),
            credentials: Credentials::parse(auth)?,
            database: None,
            fetch_size: DEFAULT_FETCH_SIZE,
        })
    }

    /// Target a specific database.
    pub fn with_database(mut self, database: impl Into<String>) -> Self {
        self.database = Some(database.into());
        self
    }
}
