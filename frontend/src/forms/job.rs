use super::{ProgramSelection, filled, parse_number};
use crate::error::PortalResult;
use crate::gateway::JobGateway;
use internhub_shared::validation::{ValidationResult, optional, validate_job_posting};
use internhub_shared::{EntityId, Internship, JobStatus, LocationType, NewInternship};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct JobPostingForm {
    /// 编辑已有岗位时为其 id
    pub editing: Option<EntityId>,
    pub title: String,
    pub description: String,
    /// 院系 -> 专业 级联选择
    pub selection: ProgramSelection,
    pub location_type: LocationType,
    pub is_paid: bool,
    pub stipend: String,
    pub duration: String,
}

impl JobPostingForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// 只有待审批的岗位可以修改
    pub fn is_editable(job: &Internship) -> bool {
        job.status == JobStatus::Pending
    }

    /// 以已有岗位填充表单；不可修改的岗位返回 `None`
    pub fn edit(job: &Internship) -> Option<Self> {
        if !Self::is_editable(job) {
            return None;
        }
        let mut selection = ProgramSelection::default();
        if let Some(department) = &job.department {
            selection.select_department(department);
        }
        for program in &job.programs {
            selection.toggle_program(program);
        }
        Some(Self {
            editing: Some(job.id.clone()),
            title: job.title.clone(),
            description: job.description.clone(),
            selection,
            location_type: job.location_type,
            is_paid: job.is_paid,
            stipend: job.stipend.map(|s| s.to_string()).unwrap_or_default(),
            duration: job.duration.clone(),
        })
    }

    pub fn can_submit(&self) -> bool {
        filled(&[&self.title, &self.description, &self.duration])
            && !self.selection.programs().is_empty()
    }

    /// 新建和修改后的岗位一律以 PENDING 提交，等待审批
    pub fn to_request(&self) -> ValidationResult<NewInternship> {
        let stipend = if self.is_paid {
            parse_number("stipend", "Stipend", &self.stipend)?
        } else {
            None
        };
        let posting = NewInternship {
            title: self.title.trim().to_string(),
            description: self.description.trim().to_string(),
            department: optional(self.selection.department()),
            programs: self.selection.programs().to_vec(),
            location_type: self.location_type,
            is_paid: self.is_paid,
            stipend,
            duration: self.duration.trim().to_string(),
            status: JobStatus::Pending,
        };
        validate_job_posting(&posting)?;
        Ok(posting)
    }

    pub fn validate(&self) -> ValidationResult {
        self.to_request().map(|_| ())
    }

    pub async fn submit<G: JobGateway + ?Sized>(&self, gateway: &G) -> PortalResult<Internship> {
        let posting = self.to_request()?;
        match &self.editing {
            Some(id) => gateway.update(id, posting).await,
            None => gateway.create(posting).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::testing::{api, url};
    use internhub_shared::protocol::HttpMethod;
    use serde_json::json;

    fn filled_form() -> JobPostingForm {
        let mut form = JobPostingForm {
            title: "Data intern".to_string(),
            description: "ETL".to_string(),
            duration: "3 months".to_string(),
            ..JobPostingForm::new()
        };
        form.selection.select_department("Computer Applications");
        form.selection.toggle_program("MCA");
        form
    }

    #[test]
    fn test_status_defaults_to_pending() {
        let request = filled_form().to_request().unwrap();
        assert_eq!(request.status, JobStatus::Pending);
        assert_eq!(request.department.as_deref(), Some("Computer Applications"));
        assert_eq!(request.programs, vec!["MCA"]);
    }

    #[test]
    fn test_changing_department_recomputes_programs() {
        let mut form = filled_form();
        form.selection.select_department("Management");
        assert!(form.selection.programs().is_empty());
        assert_eq!(form.selection.options(), &["MBA", "BBA"]);
        assert!(!form.can_submit());
    }

    #[test]
    fn test_unpaid_posting_drops_stipend() {
        let mut form = filled_form();
        form.stipend = "9000".to_string();
        assert_eq!(form.to_request().unwrap().stipend, None);

        form.is_paid = true;
        assert_eq!(form.to_request().unwrap().stipend, Some(9000.0));
        form.stipend = String::new();
        assert_eq!(form.validate().unwrap_err().field, "stipend");
    }

    #[tokio::test]
    async fn test_recruiter_post_then_coordinator_approve() {
        let api = api();
        let job = |status: &str| {
            json!({
                "id": 21, "title": "Data intern", "description": "ETL", "programs": ["MCA"],
                "location_type": "ONSITE", "is_paid": false, "duration": "3 months",
                "status": status, "created_at": "2024-06-01T08:00:00Z"
            })
        };
        api.http_client()
            .mock_response(HttpMethod::Post, &url("/internships"), 201, job("PENDING"));
        api.http_client().mock_response(
            HttpMethod::Patch,
            &url("/internships/21/status"),
            200,
            job("APPROVED"),
        );

        let posted = filled_form().submit(&api).await.unwrap();
        assert_eq!(posted.status, JobStatus::Pending);
        let (_, _, body) = api.http_client().last_request().unwrap();
        assert!(body.unwrap().contains(r#""status":"PENDING""#));

        let approved = crate::forms::approve_job(&api, &posted).await.unwrap().unwrap();
        assert_eq!(approved.status, JobStatus::Approved);
        assert!(internhub_shared::stats::pending_approvals(&[approved]).is_empty());
    }

    fn pending_job() -> Internship {
        Internship {
            id: "21".to_string(),
            title: "Data intern".to_string(),
            description: "ETL".to_string(),
            department: Some("Computer Applications".to_string()),
            programs: vec!["MCA".to_string()],
            location_type: LocationType::Hybrid,
            is_paid: true,
            stipend: Some(12000.0),
            duration: "3 months".to_string(),
            status: JobStatus::Pending,
            created_at: chrono::Utc::now(),
            company_name: Some("Acme".to_string()),
        }
    }

    #[test]
    fn test_edit_prefills_pending_job_only() {
        let form = JobPostingForm::edit(&pending_job()).unwrap();
        assert_eq!(form.editing.as_deref(), Some("21"));
        assert_eq!(form.selection.programs(), ["MCA".to_string()]);
        assert_eq!(form.stipend, "12000");
        assert!(form.can_submit());

        let approved = Internship {
            status: JobStatus::Approved,
            ..pending_job()
        };
        assert!(JobPostingForm::edit(&approved).is_none());
    }

    #[tokio::test]
    async fn test_edit_submits_update_not_create() {
        let api = api();
        api.http_client().mock_response(
            HttpMethod::Put,
            &url("/internships/21"),
            200,
            json!({
                "id": 21, "title": "Data engineering intern", "description": "ETL",
                "programs": ["MCA"], "location_type": "HYBRID", "is_paid": true,
                "stipend": 12000.0, "duration": "3 months", "status": "PENDING",
                "created_at": "2024-06-01T08:00:00Z"
            }),
        );
        let mut form = JobPostingForm::edit(&pending_job()).unwrap();
        form.title = "Data engineering intern".to_string();

        let updated = form.submit(&api).await.unwrap();
        assert_eq!(updated.title, "Data engineering intern");
        assert_eq!(api.http_client().request_count(), 1);
        let (method, path, _) = api.http_client().last_request().unwrap();
        assert_eq!(method, "PUT");
        assert_eq!(path, url("/internships/21"));
    }
}
