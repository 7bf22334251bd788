use crate::error::PortalResult;
use crate::gateway::ClosureGateway;
use internhub_shared::validation::{
    RATING_RANGE, ValidationError, ValidationResult, validate_evaluation,
};
use internhub_shared::{ClosureRecord, ClosureStatus, EntityId, Evaluation};

const MSG_ALREADY_CLOSED: &str = "This internship has already been closed";

/// 结项评价：每条结项记录只能评价一次
#[derive(Debug, Clone, PartialEq)]
pub struct EvaluationForm {
    pub closure_id: EntityId,
    pub status: ClosureStatus,
    /// 0 表示尚未选择
    pub rating: u8,
    pub remarks: String,
}

impl EvaluationForm {
    /// 记录已关闭或已有评价时返回 `None`
    pub fn for_record(record: &ClosureRecord) -> Option<Self> {
        record.awaiting_evaluation().then(|| Self {
            closure_id: record.id.clone(),
            status: record.status.clone(),
            rating: 0,
            remarks: String::new(),
        })
    }

    pub fn can_submit(&self) -> bool {
        self.status.can_transition_to(ClosureStatus::Closed)
            && RATING_RANGE.contains(&self.rating)
            && !self.remarks.trim().is_empty()
    }

    fn evaluation(&self) -> Evaluation {
        Evaluation {
            rating: self.rating,
            remarks: self.remarks.clone(),
        }
    }

    pub fn validate(&self) -> ValidationResult {
        if !self.status.can_transition_to(ClosureStatus::Closed) {
            return Err(ValidationError::new("evaluation", MSG_ALREADY_CLOSED));
        }
        validate_evaluation(&self.evaluation())
    }

    pub async fn submit<G: ClosureGateway + ?Sized>(
        &self,
        gateway: &G,
    ) -> PortalResult<ClosureRecord> {
        self.validate()?;
        gateway
            .submit_evaluation(&self.closure_id, self.evaluation())
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::testing::api;

    fn record(status: ClosureStatus, evaluated: bool) -> ClosureRecord {
        ClosureRecord {
            id: "c1".to_string(),
            student_name: "Kiran".to_string(),
            internship_title: "Data intern".to_string(),
            company_name: "Acme".to_string(),
            status,
            documents: vec![],
            evaluation: evaluated.then(|| Evaluation {
                rating: 4,
                remarks: "Good".to_string(),
            }),
        }
    }

    #[test]
    fn test_only_pending_records_can_be_evaluated() {
        assert!(EvaluationForm::for_record(&record(ClosureStatus::PendingReview, false)).is_some());
        assert!(EvaluationForm::for_record(&record(ClosureStatus::Closed, true)).is_none());
        assert!(EvaluationForm::for_record(&record(ClosureStatus::PendingReview, true)).is_none());
    }

    #[test]
    fn test_rating_must_be_chosen() {
        let mut form =
            EvaluationForm::for_record(&record(ClosureStatus::PendingReview, false)).unwrap();
        form.remarks = "Solid work".to_string();
        assert!(!form.can_submit());
        form.rating = 5;
        assert!(form.can_submit());
        assert!(form.validate().is_ok());
    }

    #[tokio::test]
    async fn test_closed_record_rejects_evaluation_without_request() {
        let api = api();
        let mut form =
            EvaluationForm::for_record(&record(ClosureStatus::PendingReview, false)).unwrap();
        form.rating = 4;
        form.remarks = "Late submission".to_string();
        // 页面打开期间记录已被关闭
        form.status = ClosureStatus::Closed;

        assert!(!form.can_submit());
        let err = form.submit(&api).await.unwrap_err();
        assert!(err.is_validation());
        assert_eq!(err.message(), MSG_ALREADY_CLOSED);
        assert_eq!(api.http_client().request_count(), 0);
    }
}
