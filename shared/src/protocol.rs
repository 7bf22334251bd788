use crate::model::*;
use serde::{Serialize, de::DeserializeOwned};

/// HTTP Methods for API Requests
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
        }
    }

    /// GET/DELETE 不携带请求体
    pub fn has_body(&self) -> bool {
        !matches!(self, HttpMethod::Get | HttpMethod::Delete)
    }
}

/// A trait that defines the request-response relationship and metadata for an API endpoint.
///
/// Path parameters are fields marked `#[serde(skip)]`; everything else is the JSON body.
pub trait ApiRequest: Serialize {
    /// The response type returned by this request.
    type Response: DeserializeOwned;
    /// The HTTP method.
    const METHOD: HttpMethod;
    /// The URL path relative to the API base.
    fn path(&self) -> String;

    /// Serialized JSON body, `None` for body-less methods.
    fn body(&self) -> Result<Option<String>, serde_json::Error> {
        if Self::METHOD.has_body() {
            serde_json::to_string(self).map(Some)
        } else {
            Ok(None)
        }
    }
}

macro_rules! collection {
    ($name:ident, $resp:ty, $path:expr) => {
        #[derive(Debug, Serialize)]
        pub struct $name;

        impl ApiRequest for $name {
            type Response = $resp;
            const METHOD: HttpMethod = HttpMethod::Get;
            fn path(&self) -> String {
                $path.to_string()
            }
        }
    };
}

macro_rules! by_id {
    ($name:ident, $resp:ty, $method:expr, $fmt:expr) => {
        #[derive(Debug, Serialize)]
        pub struct $name {
            #[serde(skip)]
            pub id: EntityId,
        }

        impl ApiRequest for $name {
            type Response = $resp;
            const METHOD: HttpMethod = $method;
            fn path(&self) -> String {
                format!($fmt, self.id)
            }
        }
    };
}

// =========================================================
// Auth
// =========================================================

#[derive(Debug, Serialize)]
#[serde(transparent)]
pub struct LoginRequest(pub Credentials);

impl ApiRequest for LoginRequest {
    type Response = LoginResponse;
    const METHOD: HttpMethod = HttpMethod::Post;
    fn path(&self) -> String {
        "/auth/login".to_string()
    }
}

// =========================================================
// Internships
// =========================================================

collection!(ListInternships, Vec<Internship>, "/internships");
by_id!(GetInternship, Internship, HttpMethod::Get, "/internships/{}");

#[derive(Debug, Serialize)]
#[serde(transparent)]
pub struct CreateInternship(pub NewInternship);

impl ApiRequest for CreateInternship {
    type Response = Internship;
    const METHOD: HttpMethod = HttpMethod::Post;
    fn path(&self) -> String {
        "/internships".to_string()
    }
}

#[derive(Debug, Serialize)]
pub struct UpdateInternship {
    #[serde(skip)]
    pub id: EntityId,
    #[serde(flatten)]
    pub posting: NewInternship,
}

impl ApiRequest for UpdateInternship {
    type Response = Internship;
    const METHOD: HttpMethod = HttpMethod::Put;
    fn path(&self) -> String {
        format!("/internships/{}", self.id)
    }
}

#[derive(Debug, Serialize)]
pub struct UpdateInternshipStatus {
    #[serde(skip)]
    pub id: EntityId,
    pub status: JobStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl ApiRequest for UpdateInternshipStatus {
    type Response = Internship;
    const METHOD: HttpMethod = HttpMethod::Patch;
    fn path(&self) -> String {
        format!("/internships/{}/status", self.id)
    }
}

// =========================================================
// Applications
// =========================================================

collection!(ListApplications, Vec<Application>, "/applications");

#[derive(Debug, Serialize)]
pub struct ApplyToInternship {
    #[serde(rename = "jobId")]
    pub job_id: EntityId,
}

impl ApiRequest for ApplyToInternship {
    type Response = Application;
    const METHOD: HttpMethod = HttpMethod::Post;
    fn path(&self) -> String {
        "/applications".to_string()
    }
}

#[derive(Debug, Serialize)]
pub struct UpdateApplicationStatus {
    #[serde(skip)]
    pub id: EntityId,
    pub status: ApplicationStatus,
    #[serde(rename = "rejectionReason", skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl ApiRequest for UpdateApplicationStatus {
    type Response = Application;
    const METHOD: HttpMethod = HttpMethod::Patch;
    fn path(&self) -> String {
        format!("/applications/{}/status", self.id)
    }
}

// =========================================================
// Sessions
// =========================================================

collection!(ListSessions, Vec<AcademicSession>, "/sessions");
by_id!(GetSession, AcademicSession, HttpMethod::Get, "/sessions/{}");
by_id!(
    ToggleSessionStatus,
    AcademicSession,
    HttpMethod::Patch,
    "/sessions/{}/toggle"
);

#[derive(Debug, Serialize)]
#[serde(transparent)]
pub struct CreateSession(pub NewSession);

impl ApiRequest for CreateSession {
    type Response = AcademicSession;
    const METHOD: HttpMethod = HttpMethod::Post;
    fn path(&self) -> String {
        "/sessions".to_string()
    }
}

#[derive(Debug, Serialize)]
pub struct UpdateSession {
    #[serde(skip)]
    pub id: EntityId,
    #[serde(flatten)]
    pub session: NewSession,
}

impl ApiRequest for UpdateSession {
    type Response = AcademicSession;
    const METHOD: HttpMethod = HttpMethod::Put;
    fn path(&self) -> String {
        format!("/sessions/{}", self.id)
    }
}

// =========================================================
// Recruiters
// =========================================================

collection!(ListRecruiters, Vec<Recruiter>, "/recruiters");
by_id!(
    ToggleRecruiterStatus,
    Recruiter,
    HttpMethod::Patch,
    "/recruiters/{}/toggle"
);

#[derive(Debug, Serialize)]
#[serde(transparent)]
pub struct OnboardRecruiter(pub NewRecruiter);

impl ApiRequest for OnboardRecruiter {
    type Response = Recruiter;
    const METHOD: HttpMethod = HttpMethod::Post;
    fn path(&self) -> String {
        "/recruiters".to_string()
    }
}

// =========================================================
// Faculty / Guides
// =========================================================

collection!(ListFaculty, Vec<FacultyMember>, "/faculty");
collection!(
    ListGuideAssignments,
    Vec<GuideAssignment>,
    "/faculty/assignments"
);

#[derive(Debug, Serialize)]
pub struct AssignGuide {
    #[serde(skip)]
    pub id: EntityId,
    #[serde(rename = "guideName")]
    pub guide_name: String,
}

impl ApiRequest for AssignGuide {
    type Response = GuideAssignment;
    const METHOD: HttpMethod = HttpMethod::Post;
    fn path(&self) -> String {
        format!("/faculty/assignments/{}/guide", self.id)
    }
}

#[derive(Debug, Serialize)]
pub struct AddFeedback {
    #[serde(skip)]
    pub id: EntityId,
    pub message: String,
}

impl ApiRequest for AddFeedback {
    type Response = GuideAssignment;
    const METHOD: HttpMethod = HttpMethod::Post;
    fn path(&self) -> String {
        format!("/faculty/assignments/{}/feedback", self.id)
    }
}

// =========================================================
// Closures
// =========================================================

collection!(ListClosures, Vec<ClosureRecord>, "/closures");
by_id!(GetClosure, ClosureRecord, HttpMethod::Get, "/closures/{}");

#[derive(Debug, Serialize)]
pub struct SubmitEvaluation {
    #[serde(skip)]
    pub id: EntityId,
    #[serde(flatten)]
    pub evaluation: Evaluation,
}

impl ApiRequest for SubmitEvaluation {
    type Response = ClosureRecord;
    const METHOD: HttpMethod = HttpMethod::Post;
    fn path(&self) -> String {
        format!("/closures/{}/evaluation", self.id)
    }
}

// =========================================================
// Weekly progress reports
// =========================================================

collection!(ListReports, Vec<ProgressReport>, "/reports");

#[derive(Debug, Serialize)]
#[serde(transparent)]
pub struct SubmitReport(pub NewProgressReport);

impl ApiRequest for SubmitReport {
    type Response = ProgressReport;
    const METHOD: HttpMethod = HttpMethod::Post;
    fn path(&self) -> String {
        "/reports".to_string()
    }
}

#[derive(Debug, Serialize)]
pub struct ReviewReport {
    #[serde(skip)]
    pub id: EntityId,
    #[serde(rename = "facultyComment")]
    pub comment: String,
}

impl ApiRequest for ReviewReport {
    type Response = ProgressReport;
    const METHOD: HttpMethod = HttpMethod::Patch;
    fn path(&self) -> String {
        format!("/reports/{}/review", self.id)
    }
}

// =========================================================
// Admin users
// =========================================================

collection!(ListUsers, Vec<AdminUser>, "/admin/users");
by_id!(
    ToggleUserStatus,
    AdminUser,
    HttpMethod::Patch,
    "/admin/users/{}/toggle"
);
by_id!(DeleteUser, (), HttpMethod::Delete, "/admin/users/{}");

#[derive(Debug, Serialize)]
#[serde(transparent)]
pub struct CreateUser(pub NewUser);

impl ApiRequest for CreateUser {
    type Response = AdminUser;
    const METHOD: HttpMethod = HttpMethod::Post;
    fn path(&self) -> String {
        "/admin/users".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_params_are_not_serialized() {
        let req = UpdateInternshipStatus {
            id: "42".to_string(),
            status: JobStatus::Approved,
            reason: None,
        };
        assert_eq!(req.path(), "/internships/42/status");
        assert_eq!(
            req.body().unwrap().as_deref(),
            Some(r#"{"status":"APPROVED"}"#)
        );
    }

    #[test]
    fn test_get_and_delete_have_no_body() {
        assert_eq!(ListInternships.body().unwrap(), None);
        let del = DeleteUser { id: "9".to_string() };
        assert_eq!(del.path(), "/admin/users/9");
        assert_eq!(del.body().unwrap(), None);
    }

    #[test]
    fn test_rejection_reason_wire_name() {
        let req = UpdateApplicationStatus {
            id: "5".to_string(),
            status: ApplicationStatus::Rejected,
            reason: Some("Incomplete profile".to_string()),
        };
        let body = req.body().unwrap().unwrap();
        assert!(body.contains(r#""rejectionReason":"Incomplete profile""#));
        assert!(body.contains(r#""status":"REJECTED""#));
    }

    #[test]
    fn test_evaluation_is_flattened() {
        let req = SubmitEvaluation {
            id: "c1".to_string(),
            evaluation: Evaluation {
                rating: 4,
                remarks: "Solid work".to_string(),
            },
        };
        assert_eq!(req.path(), "/closures/c1/evaluation");
        assert_eq!(
            req.body().unwrap().as_deref(),
            Some(r#"{"rating":4,"remarks":"Solid work"}"#)
        );
    }
}
