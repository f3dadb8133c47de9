use async_trait::async_trait;
use reqwest::Method;

use crate::{
    api::{ApiError, Client},
    types::{ProjectRef, Release, ReleaseNote, ReleasesResponse},
};

#[async_trait]
pub trait ReleasesService: Send + Sync {
    /// Returns one page of project releases and the number of the last page.
    async fn list_releases(
        &self,
        project: &ProjectRef,
        page: u32,
    ) -> Result<(Vec<Release>, u32), ApiError>;

    async fn get_release(&self, project: &ProjectRef, version: &str)
    -> Result<Release, ApiError>;

    /// Latest release that is not excluded by the project's filters.
    async fn get_latest_release(&self, project: &ProjectRef) -> Result<Release, ApiError>;

    async fn get_release_note(
        &self,
        project: &ProjectRef,
        version: &str,
    ) -> Result<ReleaseNote, ApiError>;
}

#[async_trait]
impl ReleasesService for Client {
    async fn list_releases(
        &self,
        project: &ProjectRef,
        page: u32,
    ) -> Result<(Vec<Release>, u32), ApiError> {
        let mut builder = self.request(Method::GET, &format!("{}/releases", project.path()))?;
        if page > 1 {
            builder = builder.query(&[("page", page)]);
        }
        let response: ReleasesResponse = Client::json(builder).await?;
        Ok((response.releases, response.total_pages))
    }

    async fn get_release(
        &self,
        project: &ProjectRef,
        version: &str,
    ) -> Result<Release, ApiError> {
        self.get(&format!("{}/releases/{version}", project.path()))
            .await
    }

    async fn get_latest_release(&self, project: &ProjectRef) -> Result<Release, ApiError> {
        self.get(&format!("{}/latest-release", project.path())).await
    }

    async fn get_release_note(
        &self,
        project: &ProjectRef,
        version: &str,
    ) -> Result<ReleaseNote, ApiError> {
        self.get(&format!("{}/releases/{version}/note", project.path()))
            .await
    }
}
