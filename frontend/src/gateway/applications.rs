use crate::api::ApiClient;
use crate::error::PortalResult;
use crate::http::HttpClient;
use async_trait::async_trait;
use internhub_shared::protocol::{ApplyToInternship, ListApplications, UpdateApplicationStatus};
use internhub_shared::validation::optional;
use internhub_shared::{Application, ApplicationStatus};

#[async_trait(?Send)]
pub trait ApplicationGateway {
    async fn get_all(&self) -> PortalResult<Vec<Application>>;
    async fn apply(&self, job_id: &str) -> PortalResult<Application>;
    async fn update_status(
        &self,
        id: &str,
        status: ApplicationStatus,
        reason: Option<String>,
    ) -> PortalResult<Application>;

    async fn approve(&self, id: &str) -> PortalResult<Application> {
        self.update_status(id, ApplicationStatus::Approved, None)
            .await
    }

    async fn reject(&self, id: &str, reason: Option<String>) -> PortalResult<Application> {
        self.update_status(id, ApplicationStatus::Rejected, reason)
            .await
    }
}

#[async_trait(?Send)]
impl<C: HttpClient> ApplicationGateway for ApiClient<C> {
    async fn get_all(&self) -> PortalResult<Vec<Application>> {
        self.call(ListApplications)
            .await
            .map_err(|e| e.in_op("applications.get_all"))
    }

    async fn apply(&self, job_id: &str) -> PortalResult<Application> {
        self.call(ApplyToInternship {
            job_id: job_id.to_string(),
        })
        .await
        .map_err(|e| e.in_op_with("applications.apply", job_id))
    }

    async fn update_status(
        &self,
        id: &str,
        status: ApplicationStatus,
        reason: Option<String>,
    ) -> PortalResult<Application> {
        self.call(UpdateApplicationStatus {
            id: id.to_string(),
            status,
            reason: reason.as_deref().and_then(optional),
        })
        .await
        .map_err(|e| e.in_op_with("applications.update_status", id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::testing::{api, url};
    use internhub_shared::protocol::HttpMethod;
    use serde_json::json;

    #[tokio::test]
    async fn test_reject_sends_trimmed_reason() {
        let api = api();
        api.http_client().mock_response(
            HttpMethod::Patch,
            &url("/applications/3/status"),
            200,
            json!({
                "id": 3, "student_id": 8, "jobId": 1, "status": "REJECTED",
                "appliedAt": "2024-06-02T10:00:00Z", "rejectionReason": "Seats filled"
            }),
        );

        let app = api
            .reject("3", Some("  Seats filled ".to_string()))
            .await
            .unwrap();
        assert_eq!(app.status, ApplicationStatus::Rejected);

        let (_, _, body) = api.http_client().last_request().unwrap();
        let body = body.unwrap();
        assert!(body.contains(r#""rejectionReason":"Seats filled""#));
    }

    #[tokio::test]
    async fn test_blank_reason_is_omitted() {
        let api = api();
        let _ = api.reject("3", Some("   ".to_string())).await;
        let (_, _, body) = api.http_client().last_request().unwrap();
        assert_eq!(body.as_deref(), Some(r#"{"status":"REJECTED"}"#));
    }

    #[tokio::test]
    async fn test_apply_posts_job_id() {
        let api = api();
        let _ = api.apply("12").await;
        let (method, url_called, body) = api.http_client().last_request().unwrap();
        assert_eq!(method, "POST");
        assert_eq!(url_called, url("/applications"));
        assert_eq!(body.as_deref(), Some(r#"{"jobId":"12"}"#));
    }
}
