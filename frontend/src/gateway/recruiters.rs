use crate::api::ApiClient;
use crate::error::PortalResult;
use crate::http::HttpClient;
use async_trait::async_trait;
use internhub_shared::protocol::{ListRecruiters, OnboardRecruiter, ToggleRecruiterStatus};
use internhub_shared::{NewRecruiter, Recruiter};

#[async_trait(?Send)]
pub trait RecruiterGateway {
    async fn get_all(&self) -> PortalResult<Vec<Recruiter>>;
    async fn onboard(&self, recruiter: NewRecruiter) -> PortalResult<Recruiter>;
    async fn toggle_status(&self, id: &str) -> PortalResult<Recruiter>;
}

#[async_trait(?Send)]
impl<C: HttpClient> RecruiterGateway for ApiClient<C> {
    async fn get_all(&self) -> PortalResult<Vec<Recruiter>> {
        self.call(ListRecruiters)
            .await
            .map_err(|e| e.in_op("recruiters.get_all"))
    }

    async fn onboard(&self, recruiter: NewRecruiter) -> PortalResult<Recruiter> {
        let email = recruiter.email.clone();
        self.call(OnboardRecruiter(recruiter))
            .await
            .map_err(|e| e.in_op_with("recruiters.onboard", email))
    }

    async fn toggle_status(&self, id: &str) -> PortalResult<Recruiter> {
        self.call(ToggleRecruiterStatus { id: id.to_string() })
            .await
            .map_err(|e| e.in_op_with("recruiters.toggle_status", id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::testing::{api, url};
    use internhub_shared::AccountStatus;
    use internhub_shared::protocol::HttpMethod;
    use serde_json::json;

    #[tokio::test]
    async fn test_onboard_conflict_surfaces_backend_message() {
        let api = api();
        api.http_client().mock_response(
            HttpMethod::Post,
            &url("/recruiters"),
            409,
            json!({"message": "Email already registered"}),
        );
        let err = api
            .onboard(NewRecruiter {
                name: "Priya".to_string(),
                email: "priya@acme.com".to_string(),
                company_name: "Acme".to_string(),
                phone: None,
                password: "password123".to_string(),
            })
            .await
            .unwrap_err();
        assert_eq!(err.message(), "Email already registered");
    }

    #[tokio::test]
    async fn test_toggle_returns_new_status() {
        let api = api();
        api.http_client().mock_response(
            HttpMethod::Patch,
            &url("/recruiters/r1/toggle"),
            200,
            json!({"id": "r1", "name": "Priya", "email": "priya@acme.com",
                   "companyName": "Acme", "status": "INACTIVE"}),
        );
        let recruiter = api.toggle_status("r1").await.unwrap();
        assert_eq!(recruiter.status, AccountStatus::Inactive);
    }
}
