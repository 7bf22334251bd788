use crate::error::PortalResult;
use crate::gateway::GuideGateway;
use internhub_shared::validation::{
    ValidationError, ValidationResult, validate_feedback, validate_guide_name,
};
use internhub_shared::{EntityId, GuideAssignment, GuideStatus};

const MSG_ALREADY_ASSIGNED: &str = "A guide has already been assigned to this student";

/// 指派指导教师：只有未开始的记录可以指派
#[derive(Debug, Clone, PartialEq)]
pub struct GuideAssignmentForm {
    pub assignment_id: EntityId,
    pub status: GuideStatus,
    pub guide_name: String,
}

impl GuideAssignmentForm {
    pub fn for_assignment(assignment: &GuideAssignment) -> Self {
        Self {
            assignment_id: assignment.id.clone(),
            status: assignment.status,
            guide_name: String::new(),
        }
    }

    /// 当前状态是否允许进入进行中
    pub fn is_assignable(&self) -> bool {
        self.status.can_transition_to(GuideStatus::InProgress)
    }

    /// 名称去空白后非空才可提交
    pub fn can_submit(&self) -> bool {
        self.is_assignable() && !self.guide_name.trim().is_empty()
    }

    pub fn validate(&self) -> ValidationResult {
        if !self.is_assignable() {
            return Err(ValidationError::new("guide", MSG_ALREADY_ASSIGNED));
        }
        validate_guide_name(&self.guide_name).map(|_| ())
    }

    pub async fn submit<G: GuideGateway + ?Sized>(
        &self,
        gateway: &G,
    ) -> PortalResult<GuideAssignment> {
        self.validate()?;
        gateway
            .assign_guide(&self.assignment_id, &self.guide_name)
            .await
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeedbackForm {
    pub assignment_id: EntityId,
    pub message: String,
}

impl FeedbackForm {
    pub fn new(assignment_id: impl Into<EntityId>) -> Self {
        Self {
            assignment_id: assignment_id.into(),
            message: String::new(),
        }
    }

    pub fn can_submit(&self) -> bool {
        !self.message.trim().is_empty()
    }

    pub fn validate(&self) -> ValidationResult {
        validate_feedback(&self.message).map(|_| ())
    }

    pub async fn submit<G: GuideGateway + ?Sized>(
        &self,
        gateway: &G,
    ) -> PortalResult<GuideAssignment> {
        self.validate()?;
        gateway.add_feedback(&self.assignment_id, &self.message).await
    }
}
