use crate::api::ApiClient;
use crate::error::PortalResult;
use crate::http::HttpClient;
use async_trait::async_trait;
use internhub_shared::protocol::{GetClosure, ListClosures, SubmitEvaluation};
use internhub_shared::validation::validate_evaluation;
use internhub_shared::{ClosureRecord, Evaluation};

#[async_trait(?Send)]
pub trait ClosureGateway {
    async fn get_all(&self) -> PortalResult<Vec<ClosureRecord>>;
    async fn get_by_id(&self, id: &str) -> PortalResult<ClosureRecord>;
    /// 提交评价后记录变为 CLOSED
    async fn submit_evaluation(
        &self,
        id: &str,
        evaluation: Evaluation,
    ) -> PortalResult<ClosureRecord>;
}

#[async_trait(?Send)]
impl<C: HttpClient> ClosureGateway for ApiClient<C> {
    async fn get_all(&self) -> PortalResult<Vec<ClosureRecord>> {
        self.call(ListClosures)
            .await
            .map_err(|e| e.in_op("closures.get_all"))
    }

    async fn get_by_id(&self, id: &str) -> PortalResult<ClosureRecord> {
        self.call(GetClosure { id: id.to_string() })
            .await
            .map_err(|e| e.in_op_with("closures.get_by_id", id))
    }

    async fn submit_evaluation(
        &self,
        id: &str,
        evaluation: Evaluation,
    ) -> PortalResult<ClosureRecord> {
        validate_evaluation(&evaluation)?;
        let evaluation = Evaluation {
            rating: evaluation.rating,
            remarks: evaluation.remarks.trim().to_string(),
        };
        self.call(SubmitEvaluation {
            id: id.to_string(),
            evaluation,
        })
        .await
        .map_err(|e| e.in_op_with("closures.submit_evaluation", id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::testing::{api, url};
    use internhub_shared::ClosureStatus;
    use internhub_shared::protocol::HttpMethod;
    use serde_json::json;

    #[tokio::test]
    async fn test_evaluation_closes_record() {
        let api = api();
        api.http_client().mock_response(
            HttpMethod::Post,
            &url("/closures/c1/evaluation"),
            200,
            json!({
                "id": "c1", "studentName": "Kiran", "internshipTitle": "Data intern",
                "companyName": "Acme", "status": "CLOSED",
                "documents": [{"name": "Certificate", "url": "https://files/c1.pdf"}],
                "evaluation": {"rating": 5, "remarks": "Excellent"}
            }),
        );
        let record = api
            .submit_evaluation(
                "c1",
                Evaluation {
                    rating: 5,
                    remarks: " Excellent ".to_string(),
                },
            )
            .await
            .unwrap();
        assert_eq!(record.status, ClosureStatus::Closed);
        assert!(!record.awaiting_evaluation());
    }

    #[tokio::test]
    async fn test_out_of_range_rating_is_not_sent() {
        let api = api();
        let err = api
            .submit_evaluation(
                "c1",
                Evaluation {
                    rating: 9,
                    remarks: "?".to_string(),
                },
            )
            .await
            .unwrap_err();
        assert_eq!(err.field, Some("rating"));
        assert_eq!(api.http_client().request_count(), 0);
    }
}
