use super::{filled, parse_number};
use crate::error::PortalResult;
use crate::gateway::SessionGateway;
use internhub_shared::validation::{ValidationResult, optional, parse_date, require, validate_session};
use internhub_shared::{AcademicSession, EntityId, NewSession};

/// 学年会话表单（新建/编辑共用）
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionForm {
    /// 编辑中的会话 id；`None` 表示新建
    pub editing: Option<EntityId>,
    pub academic_year: String,
    pub program: String,
    pub sub_program: String,
    pub batch: String,
    /// `YYYY-MM-DD`
    pub start_date: String,
    pub end_date: String,
    pub mode: String,
    pub duration: String,
    pub stipend: String,
}

impl SessionForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn edit(session: &AcademicSession) -> Self {
        Self {
            editing: Some(session.id.clone()),
            academic_year: session.academic_year.clone(),
            program: session.program.clone(),
            sub_program: session.sub_program.clone().unwrap_or_default(),
            batch: session.batch.clone(),
            start_date: session.start_date.format("%Y-%m-%d").to_string(),
            end_date: session.end_date.format("%Y-%m-%d").to_string(),
            mode: session.mode.clone().unwrap_or_default(),
            duration: session.duration.clone().unwrap_or_default(),
            stipend: session.stipend.map(|s| s.to_string()).unwrap_or_default(),
        }
    }

    pub fn can_submit(&self) -> bool {
        filled(&[
            &self.academic_year,
            &self.program,
            &self.batch,
            &self.start_date,
            &self.end_date,
        ])
    }

    pub fn to_request(&self) -> ValidationResult<NewSession> {
        let session = NewSession {
            academic_year: require("academicYear", "Academic year", &self.academic_year)?,
            program: require("program", "Program", &self.program)?,
            sub_program: optional(&self.sub_program),
            batch: require("batch", "Batch", &self.batch)?,
            start_date: parse_date("startDate", "Start date", &self.start_date)?,
            end_date: parse_date("endDate", "End date", &self.end_date)?,
            mode: optional(&self.mode),
            duration: optional(&self.duration),
            stipend: parse_number("stipend", "Stipend", &self.stipend)?,
        };
        validate_session(&session)?;
        Ok(session)
    }

    pub fn validate(&self) -> ValidationResult {
        self.to_request().map(|_| ())
    }

    pub async fn submit<G: SessionGateway + ?Sized>(
        &self,
        gateway: &G,
    ) -> PortalResult<AcademicSession> {
        let session = self.to_request()?;
        match &self.editing {
            Some(id) => gateway.update(id, session).await,
            None => gateway.create(session).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::testing::{api, url};
    use internhub_shared::protocol::HttpMethod;
    use internhub_shared::validation::MSG_END_BEFORE_START;
    use serde_json::json;

    fn form(start: &str, end: &str) -> SessionForm {
        SessionForm {
            academic_year: "2024-2025".to_string(),
            program: "MCA".to_string(),
            batch: "2022-2025".to_string(),
            start_date: start.to_string(),
            end_date: end.to_string(),
            ..SessionForm::new()
        }
    }

    #[tokio::test]
    async fn test_end_before_start_makes_no_call() {
        let api = api();
        let form = form("2024-06-01", "2024-03-01");
        assert!(form.can_submit());

        let err = form.submit(&api).await.unwrap_err();
        assert!(err.is_validation());
        assert_eq!(err.field, Some("endDate"));
        assert_eq!(err.message(), MSG_END_BEFORE_START);
        assert_eq!(api.http_client().request_count(), 0);
    }

    #[tokio::test]
    async fn test_new_session_is_created() {
        let api = api();
        api.http_client().mock_response(
            HttpMethod::Post,
            &url("/sessions"),
            201,
            json!({
                "id": 1, "academicYear": "2024-2025", "program": "MCA", "batch": "2022-2025",
                "startDate": "2024-06-01", "endDate": "2024-12-01", "isActive": true
            }),
        );
        let created = form("2024-06-01", "2024-12-01").submit(&api).await.unwrap();
        assert_eq!(created.id, "1");
        assert_eq!(api.http_client().request_count(), 1);
    }

    #[tokio::test]
    async fn test_edit_form_updates_existing_session() {
        let api = api();
        let existing = AcademicSession {
            id: "s7".to_string(),
            academic_year: "2024-2025".to_string(),
            program: "MCA".to_string(),
            sub_program: None,
            batch: "2022-2025".to_string(),
            start_date: chrono::NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            end_date: chrono::NaiveDate::from_ymd_opt(2024, 12, 1).unwrap(),
            is_active: true,
            mode: None,
            duration: None,
            stipend: Some(5000.0),
        };
        let form = SessionForm::edit(&existing);
        assert_eq!(form.start_date, "2024-06-01");
        assert_eq!(form.stipend, "5000");

        let _ = form.submit(&api).await;
        let (method, called, _) = api.http_client().last_request().unwrap();
        assert_eq!(method, "PUT");
        assert_eq!(called, url("/sessions/s7"));
    }

    #[test]
    fn test_bad_inputs_are_reported_per_field() {
        assert!(!SessionForm::new().can_submit());
        assert_eq!(
            form("2024-06-01", "June").validate().unwrap_err().field,
            "endDate"
        );
        let mut f = form("2024-06-01", "2024-12-01");
        f.stipend = "lots".to_string();
        assert_eq!(f.validate().unwrap_err().field, "stipend");
    }
}
