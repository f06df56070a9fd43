// Session service seam.
// The shell talks to the server only through this trait so the worker can run against fakes.

use async_trait::async_trait;

use crate::error::Result;

use super::client::ApiClient;
use super::types::{Connection, Environment, LoginUser};

/// Network-backed operations the navigation shell depends on.
#[async_trait]
pub trait SessionApi: Send + Sync {
    /// Current session identity, `None` when signed out.
    async fn get_user(&self) -> Result<Option<LoginUser>>;

    async fn user_logout(&self) -> Result<()>;

    async fn get_connection_list(&self) -> Result<Vec<Connection>>;

    async fn get_connection_env_list(&self) -> Result<Vec<Environment>>;
}

#[async_trait]
impl SessionApi for ApiClient {
    async fn get_user(&self) -> Result<Option<LoginUser>> {
        ApiClient::get_user(self).await
    }

    async fn user_logout(&self) -> Result<()> {
        ApiClient::user_logout(self).await
    }

    async fn get_connection_list(&self) -> Result<Vec<Connection>> {
        ApiClient::get_connection_list(self).await
    }

    async fn get_connection_env_list(&self) -> Result<Vec<Environment>> {
        ApiClient::get_connection_env_list(self).await
    }
}
