use async_trait::async_trait;
use reqwest::Method;

use crate::{
    api::{ApiError, Client},
    types::{
        AddProjectRequest, Project, ProjectListOptions, ProjectOptions, ProjectRef,
        ProjectsResponse,
    },
};

#[async_trait]
pub trait ProjectsService: Send + Sync {
    /// Returns one page of tracked projects and the number of the last page.
    async fn list_projects(
        &self,
        options: &ProjectListOptions,
    ) -> Result<(Vec<Project>, u32), ApiError>;

    async fn search_projects(
        &self,
        query: &str,
        provider: Option<&str>,
    ) -> Result<Vec<Project>, ApiError>;

    async fn get_project(&self, project: &ProjectRef) -> Result<Project, ApiError>;

    async fn add_project(
        &self,
        provider: &str,
        name: &str,
        options: &ProjectOptions,
    ) -> Result<Project, ApiError>;

    async fn update_project(
        &self,
        project: &ProjectRef,
        options: &ProjectOptions,
    ) -> Result<Project, ApiError>;

    async fn delete_project(&self, project: &ProjectRef) -> Result<(), ApiError>;
}

#[async_trait]
impl ProjectsService for Client {
    async fn list_projects(
        &self,
        options: &ProjectListOptions,
    ) -> Result<(Vec<Project>, u32), ApiError> {
        let mut query: Vec<(&str, String)> = Vec::new();
        if options.page > 1 {
            query.push(("page", options.page.to_string()));
        }
        if let Some(provider) = options.provider.as_deref().filter(|p| !p.is_empty()) {
            query.push(("provider", provider.to_string()));
        }
        if let Some(order) = options.order {
            query.push(("order", order.as_str().to_string()));
        }

        let builder = self.request(Method::GET, "v1/projects")?.query(&query);
        let response: ProjectsResponse = Client::json(builder).await?;
        Ok((response.projects, response.total_pages))
    }

    async fn search_projects(
        &self,
        query: &str,
        provider: Option<&str>,
    ) -> Result<Vec<Project>, ApiError> {
        let mut params = vec![("q", query)];
        if let Some(provider) = provider.filter(|p| !p.is_empty()) {
            params.push(("provider", provider));
        }

        let builder = self
            .request(Method::GET, "v1/projects/search")?
            .query(&params);
        let response: ProjectsResponse = Client::json(builder).await?;
        Ok(response.projects)
    }

    async fn get_project(&self, project: &ProjectRef) -> Result<Project, ApiError> {
        self.get(&project.path()).await
    }

    async fn add_project(
        &self,
        provider: &str,
        name: &str,
        options: &ProjectOptions,
    ) -> Result<Project, ApiError> {
        let body = AddProjectRequest {
            provider,
            name,
            options,
        };
        let builder = self.request(Method::POST, "v1/projects")?.json(&body);
        Client::json(builder).await
    }

    async fn update_project(
        &self,
        project: &ProjectRef,
        options: &ProjectOptions,
    ) -> Result<Project, ApiError> {
        let builder = self.request(Method::POST, &project.path())?.json(options);
        Client::json(builder).await
    }

    async fn delete_project(&self, project: &ProjectRef) -> Result<(), ApiError> {
        self.delete(&project.path()).await
    }
}
