use crate::api::ApiClient;
use crate::error::PortalResult;
use crate::http::HttpClient;
use async_trait::async_trait;
use internhub_shared::protocol::{
    CreateInternship, GetInternship, ListInternships, UpdateInternship, UpdateInternshipStatus,
};
use internhub_shared::validation::validate_job_posting;
use internhub_shared::{EntityId, Internship, JobStatus, NewInternship};

#[async_trait(?Send)]
pub trait JobGateway {
    async fn get_all(&self) -> PortalResult<Vec<Internship>>;
    async fn get_by_id(&self, id: &str) -> PortalResult<Internship>;
    async fn create(&self, posting: NewInternship) -> PortalResult<Internship>;
    async fn update(&self, id: &str, posting: NewInternship) -> PortalResult<Internship>;
    async fn update_status(
        &self,
        id: &str,
        status: JobStatus,
        reason: Option<String>,
    ) -> PortalResult<Internship>;
}

#[async_trait(?Send)]
impl<C: HttpClient> JobGateway for ApiClient<C> {
    async fn get_all(&self) -> PortalResult<Vec<Internship>> {
        self.call(ListInternships)
            .await
            .map_err(|e| e.in_op("jobs.get_all"))
    }

    async fn get_by_id(&self, id: &str) -> PortalResult<Internship> {
        self.call(GetInternship { id: id.to_string() })
            .await
            .map_err(|e| e.in_op_with("jobs.get_by_id", id))
    }

    async fn create(&self, posting: NewInternship) -> PortalResult<Internship> {
        validate_job_posting(&posting)?;
        self.call(CreateInternship(posting))
            .await
            .map_err(|e| e.in_op("jobs.create"))
    }

    async fn update(&self, id: &str, posting: NewInternship) -> PortalResult<Internship> {
        validate_job_posting(&posting)?;
        self.call(UpdateInternship {
            id: EntityId::from(id),
            posting,
        })
        .await
        .map_err(|e| e.in_op_with("jobs.update", id))
    }

    async fn update_status(
        &self,
        id: &str,
        status: JobStatus,
        reason: Option<String>,
    ) -> PortalResult<Internship> {
        self.call(UpdateInternshipStatus {
            id: id.to_string(),
            status,
            reason,
        })
        .await
        .map_err(|e| e.in_op_with("jobs.update_status", id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::testing::{api, url};
    use internhub_shared::LocationType;
    use internhub_shared::protocol::HttpMethod;
    use serde_json::json;

    fn job_json(id: u32, status: &str) -> serde_json::Value {
        json!({
            "id": id, "title": "Data intern", "description": "ETL pipelines",
            "programs": ["MCA"], "location_type": "REMOTE", "is_paid": false,
            "duration": "3 months", "status": status,
            "created_at": "2024-06-01T08:00:00Z"
        })
    }

    fn posting() -> NewInternship {
        NewInternship {
            title: "Data intern".to_string(),
            description: "ETL pipelines".to_string(),
            department: Some("Computer Applications".to_string()),
            programs: vec!["MCA".to_string()],
            location_type: LocationType::Remote,
            is_paid: false,
            stipend: None,
            duration: "3 months".to_string(),
            status: JobStatus::Pending,
        }
    }

    #[tokio::test]
    async fn test_create_posts_pending_job() {
        let api = api();
        api.http_client().mock_response(
            HttpMethod::Post,
            &url("/internships"),
            201,
            job_json(1, "PENDING"),
        );

        let created = api.create(posting()).await.unwrap();
        assert_eq!(created.status, JobStatus::Pending);

        let (_, _, body) = api.http_client().last_request().unwrap();
        assert!(body.unwrap().contains(r#""status":"PENDING""#));
    }

    #[tokio::test]
    async fn test_invalid_posting_is_not_sent() {
        let api = api();
        let mut bad = posting();
        bad.title = "  ".to_string();
        assert!(api.create(bad).await.unwrap_err().is_validation());
        assert_eq!(api.http_client().request_count(), 0);
    }

    #[tokio::test]
    async fn test_approve_patches_status() {
        let api = api();
        api.http_client().mock_response(
            HttpMethod::Patch,
            &url("/internships/1/status"),
            200,
            job_json(1, "APPROVED"),
        );
        let job = api
            .update_status("1", JobStatus::Approved, None)
            .await
            .unwrap();
        assert_eq!(job.status, JobStatus::Approved);
        let (method, _, body) = api.http_client().last_request().unwrap();
        assert_eq!(method, "PATCH");
        assert_eq!(body.as_deref(), Some(r#"{"status":"APPROVED"}"#));
    }

    #[tokio::test]
    async fn test_update_puts_posting_to_its_id() {
        let api = api();
        api.http_client().mock_response(
            HttpMethod::Put,
            &url("/internships/1"),
            200,
            job_json(1, "PENDING"),
        );
        let mut edited = posting();
        edited.duration = "6 months".to_string();

        api.update("1", edited).await.unwrap();
        let (method, path, body) = api.http_client().last_request().unwrap();
        assert_eq!(method, "PUT");
        assert_eq!(path, url("/internships/1"));
        assert!(body.unwrap().contains(r#""duration":"6 months""#));
    }

    #[tokio::test]
    async fn test_missing_job_is_not_found() {
        let api = api();
        let err = api.get_by_id("404").await.unwrap_err();
        assert!(err.is_not_found());
        assert!(err.to_string().contains("jobs.get_by_id(404)"));
    }
}
