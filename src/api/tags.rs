use async_trait::async_trait;
use reqwest::Method;

use crate::{
    api::{ApiError, Client},
    types::{Tag, TagRequest, TagsResponse},
};

#[async_trait]
pub trait TagsService: Send + Sync {
    async fn list_tags(&self) -> Result<Vec<Tag>, ApiError>;
    async fn get_tag(&self, id: &str) -> Result<Tag, ApiError>;
    async fn add_tag(&self, name: &str) -> Result<Tag, ApiError>;
    async fn update_tag(&self, id: &str, name: &str) -> Result<Tag, ApiError>;
    async fn delete_tag(&self, id: &str) -> Result<(), ApiError>;
}

#[async_trait]
impl TagsService for Client {
    async fn list_tags(&self) -> Result<Vec<Tag>, ApiError> {
        let response: TagsResponse = self.get("v1/tags").await?;
        Ok(response.tags)
    }

    async fn get_tag(&self, id: &str) -> Result<Tag, ApiError> {
        self.get(&format!("v1/tags/{id}")).await
    }

    async fn add_tag(&self, name: &str) -> Result<Tag, ApiError> {
        let builder = self
            .request(Method::POST, "v1/tags")?
            .json(&TagRequest { name });
        Client::json(builder).await
    }

    async fn update_tag(&self, id: &str, name: &str) -> Result<Tag, ApiError> {
        let builder = self
            .request(Method::POST, &format!("v1/tags/{id}"))?
            .json(&TagRequest { name });
        Client::json(builder).await
    }

    async fn delete_tag(&self, id: &str) -> Result<(), ApiError> {
        self.delete(&format!("v1/tags/{id}")).await
    }
}
