use async_trait::async_trait;

use crate::{
    api::{ApiError, Client},
    types::ProvidersResponse,
};

#[async_trait]
pub trait ProvidersService: Send + Sync {
    async fn list_providers(&self) -> Result<Vec<String>, ApiError>;

    /// Providers of the projects the account tracks.
    async fn list_added_providers(&self) -> Result<Vec<String>, ApiError>;
}

#[async_trait]
impl ProvidersService for Client {
    async fn list_providers(&self) -> Result<Vec<String>, ApiError> {
        let response: ProvidersResponse = self.get("v1/providers").await?;
        Ok(response.providers)
    }

    async fn list_added_providers(&self) -> Result<Vec<String>, ApiError> {
        let response: ProvidersResponse = self.get("v1/providers/added").await?;
        Ok(response.providers)
    }
}
