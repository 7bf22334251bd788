use super::filled;
use crate::error::PortalResult;
use crate::gateway::RecruiterGateway;
use internhub_shared::validation::{ValidationResult, optional, validate_recruiter};
use internhub_shared::{NewRecruiter, Recruiter};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecruiterForm {
    pub name: String,
    pub email: String,
    pub company_name: String,
    pub phone: String,
    pub password: String,
    pub confirm_password: String,
}

impl RecruiterForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn can_submit(&self) -> bool {
        filled(&[
            &self.name,
            &self.email,
            &self.company_name,
            &self.password,
            &self.confirm_password,
        ])
    }

    pub fn to_request(&self) -> ValidationResult<NewRecruiter> {
        let recruiter = NewRecruiter {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            company_name: self.company_name.trim().to_string(),
            phone: optional(&self.phone),
            password: self.password.clone(),
        };
        validate_recruiter(&recruiter, &self.confirm_password)?;
        Ok(recruiter)
    }

    pub fn validate(&self) -> ValidationResult {
        self.to_request().map(|_| ())
    }

    pub async fn submit<G: RecruiterGateway + ?Sized>(
        &self,
        gateway: &G,
    ) -> PortalResult<Recruiter> {
        let recruiter = self.to_request()?;
        gateway.onboard(recruiter).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::testing::api;
    use internhub_shared::validation::MSG_PASSWORD_MISMATCH;

    #[tokio::test]
    async fn test_password_mismatch_blocks_submit() {
        let api = api();
        let form = RecruiterForm {
            name: "Priya".to_string(),
            email: "priya@acme.com".to_string(),
            company_name: "Acme".to_string(),
            phone: " ".to_string(),
            password: "password123".to_string(),
            confirm_password: "password321".to_string(),
        };
        assert!(form.can_submit());
        let err = form.submit(&api).await.unwrap_err();
        assert_eq!(err.message(), MSG_PASSWORD_MISMATCH);
        assert_eq!(api.http_client().request_count(), 0);
    }

    #[test]
    fn test_blank_phone_is_omitted() {
        let form = RecruiterForm {
            name: "Priya".to_string(),
            email: "priya@acme.com".to_string(),
            company_name: "Acme".to_string(),
            phone: "   ".to_string(),
            password: "password123".to_string(),
            confirm_password: "password123".to_string(),
        };
        assert_eq!(form.to_request().unwrap().phone, None);
    }
}
