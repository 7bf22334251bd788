use crate::api::ApiClient;
use crate::error::PortalResult;
use crate::http::HttpClient;
use async_trait::async_trait;
use internhub_shared::protocol::{AddFeedback, AssignGuide, ListFaculty, ListGuideAssignments};
use internhub_shared::validation::{validate_feedback, validate_guide_name};
use internhub_shared::{FacultyMember, GuideAssignment};

#[async_trait(?Send)]
pub trait GuideGateway {
    async fn get_all(&self) -> PortalResult<Vec<GuideAssignment>>;
    async fn list_faculty(&self) -> PortalResult<Vec<FacultyMember>>;
    /// NOT_STARTED -> IN_PROGRESS 由后端在指派时完成
    async fn assign_guide(&self, id: &str, guide_name: &str) -> PortalResult<GuideAssignment>;
    /// 反馈只追加
    async fn add_feedback(&self, id: &str, message: &str) -> PortalResult<GuideAssignment>;
}

#[async_trait(?Send)]
impl<C: HttpClient> GuideGateway for ApiClient<C> {
    async fn get_all(&self) -> PortalResult<Vec<GuideAssignment>> {
        self.call(ListGuideAssignments)
            .await
            .map_err(|e| e.in_op("guides.get_all"))
    }

    async fn list_faculty(&self) -> PortalResult<Vec<FacultyMember>> {
        self.call(ListFaculty)
            .await
            .map_err(|e| e.in_op("guides.list_faculty"))
    }

    async fn assign_guide(&self, id: &str, guide_name: &str) -> PortalResult<GuideAssignment> {
        let guide_name = validate_guide_name(guide_name)?;
        self.call(AssignGuide {
            id: id.to_string(),
            guide_name,
        })
        .await
        .map_err(|e| e.in_op_with("guides.assign_guide", id))
    }

    async fn add_feedback(&self, id: &str, message: &str) -> PortalResult<GuideAssignment> {
        let message = validate_feedback(message)?;
        self.call(AddFeedback {
            id: id.to_string(),
            message,
        })
        .await
        .map_err(|e| e.in_op_with("guides.add_feedback", id))
    }
}
