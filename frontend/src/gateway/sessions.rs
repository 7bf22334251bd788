use crate::api::ApiClient;
use crate::error::PortalResult;
use crate::http::HttpClient;
use async_trait::async_trait;
use internhub_shared::protocol::{
    CreateSession, GetSession, ListSessions, ToggleSessionStatus, UpdateSession,
};
use internhub_shared::validation::validate_session;
use internhub_shared::{AcademicSession, NewSession};

#[async_trait(?Send)]
pub trait SessionGateway {
    async fn get_all(&self) -> PortalResult<Vec<AcademicSession>>;
    async fn get_by_id(&self, id: &str) -> PortalResult<AcademicSession>;
    async fn create(&self, session: NewSession) -> PortalResult<AcademicSession>;
    async fn update(&self, id: &str, session: NewSession) -> PortalResult<AcademicSession>;
    /// 在启用/归档之间切换
    async fn toggle_status(&self, id: &str) -> PortalResult<AcademicSession>;
}

#[async_trait(?Send)]
impl<C: HttpClient> SessionGateway for ApiClient<C> {
    async fn get_all(&self) -> PortalResult<Vec<AcademicSession>> {
        self.call(ListSessions)
            .await
            .map_err(|e| e.in_op("sessions.get_all"))
    }

    async fn get_by_id(&self, id: &str) -> PortalResult<AcademicSession> {
        self.call(GetSession { id: id.to_string() })
            .await
            .map_err(|e| e.in_op_with("sessions.get_by_id", id))
    }

    async fn create(&self, session: NewSession) -> PortalResult<AcademicSession> {
        validate_session(&session)?;
        self.call(CreateSession(session))
            .await
            .map_err(|e| e.in_op("sessions.create"))
    }

    async fn update(&self, id: &str, session: NewSession) -> PortalResult<AcademicSession> {
        validate_session(&session)?;
        self.call(UpdateSession {
            id: id.to_string(),
            session,
        })
        .await
        .map_err(|e| e.in_op_with("sessions.update", id))
    }

    async fn toggle_status(&self, id: &str) -> PortalResult<AcademicSession> {
        self.call(ToggleSessionStatus { id: id.to_string() })
            .await
            .map_err(|e| e.in_op_with("sessions.toggle_status", id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::testing::{api, url};
    use chrono::NaiveDate;
    use internhub_shared::protocol::HttpMethod;
    use serde_json::json;

    #[tokio::test]
    async fn test_update_puts_flattened_body() {
        let api = api();
        api.http_client().mock_response(
            HttpMethod::Put,
            &url("/sessions/s9"),
            200,
            json!({
                "id": "s9", "academicYear": "2025-2026", "program": "MBA",
                "batch": "2025-2027", "startDate": "2025-07-01", "endDate": "2026-04-30",
                "isActive": true
            }),
        );

        let session = NewSession {
            academic_year: "2025-2026".to_string(),
            program: "MBA".to_string(),
            sub_program: None,
            batch: "2025-2027".to_string(),
            start_date: NaiveDate::from_ymd_opt(2025, 7, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2026, 4, 30).unwrap(),
            mode: None,
            duration: None,
            stipend: None,
        };
        let updated = api.update("s9", session).await.unwrap();
        assert_eq!(updated.program, "MBA");

        let (method, _, body) = api.http_client().last_request().unwrap();
        assert_eq!(method, "PUT");
        let body = body.unwrap();
        assert!(body.contains(r#""academicYear":"2025-2026""#));
        assert!(!body.contains(r#""id""#));
    }

    #[tokio::test]
    async fn test_toggle_hits_toggle_endpoint() {
        let api = api();
        let _ = api.toggle_status("s1").await;
        let (method, url_called, _) = api.http_client().last_request().unwrap();
        assert_eq!(method, "PATCH");
        assert_eq!(url_called, url("/sessions/s1/toggle"));
    }
}
