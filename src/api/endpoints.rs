// Server API endpoint functions.
// Typed methods for the session, connection, and environment endpoints.

use crate::error::{Result, ShellError};

use super::client::ApiClient;
use super::types::{Connection, Environment, LoginUser, Page};

const USER_PATH: &str = "/api/oauth/user_a";
const LOGOUT_PATH: &str = "/api/oauth/logout_a";
const CONNECTION_LIST_PATH: &str = "/api/connection/datasource/list";
const ENVIRONMENT_LIST_PATH: &str = "/api/common/environment/list_a";

/// Page size used when loading the full connection list.
const CONNECTION_PAGE_SIZE: u32 = 1000;

impl ApiClient {
    /// Get the signed-in user. A missing session is `Ok(None)`, not an error.
    pub async fn get_user(&self) -> Result<Option<LoginUser>> {
        match self.get::<LoginUser>(USER_PATH).await {
            Err(ShellError::Unauthorized) => Ok(None),
            other => other,
        }
    }

    /// Invalidate the current session.
    pub async fn user_logout(&self) -> Result<()> {
        self.post::<serde_json::Value>(LOGOUT_PATH).await?;
        Ok(())
    }

    /// Get all saved connections.
    pub async fn get_connection_list(&self) -> Result<Vec<Connection>> {
        let params = [
            ("pageNo", "1".to_string()),
            ("pageSize", CONNECTION_PAGE_SIZE.to_string()),
            ("refresh", "true".to_string()),
        ];
        let page: Option<Page<Connection>> =
            self.get_with_params(CONNECTION_LIST_PATH, &params).await?;
        let Some(page) = page else {
            return Ok(Vec::new());
        };
        if page.total > page.data.len() as u64 {
            tracing::warn!(
                total = page.total,
                loaded = page.data.len(),
                "connection list truncated"
            );
        }
        Ok(page.data)
    }

    /// Get the connection environments.
    pub async fn get_connection_env_list(&self) -> Result<Vec<Environment>> {
        let environments: Option<Vec<Environment>> = self.get(ENVIRONMENT_LIST_PATH).await?;
        Ok(environments.unwrap_or_default())
    }
}
