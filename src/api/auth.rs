use async_trait::async_trait;
use reqwest::Method;

use crate::{
    api::{ApiError, Client},
    types::{AuthKey, AuthKeysResponse},
};

/// Exchanges account credentials for the auth keys visible to the account.
#[async_trait]
pub trait AuthKeysGetter: Send + Sync {
    async fn get_auth_keys(&self, email: &str, password: &str) -> Result<Vec<AuthKey>, ApiError>;
}

/// Lists the auth keys of the account the client is authenticated as.
#[async_trait]
pub trait AuthService: Send + Sync {
    async fn list_auth_keys(&self) -> Result<Vec<AuthKey>, ApiError>;
}

#[async_trait]
impl AuthKeysGetter for Client {
    async fn get_auth_keys(&self, email: &str, password: &str) -> Result<Vec<AuthKey>, ApiError> {
        let builder = self
            .request(Method::GET, "v1/auth/keys")?
            .basic_auth(email, Some(password));

        let response: AuthKeysResponse = Client::json(builder).await?;
        Ok(response.keys)
    }
}

#[async_trait]
impl AuthService for Client {
    async fn list_auth_keys(&self) -> Result<Vec<AuthKey>, ApiError> {
        let response: AuthKeysResponse = self.get("v1/auth/keys").await?;
        Ok(response.keys)
    }
}
