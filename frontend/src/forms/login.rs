use crate::error::PortalResult;
use crate::gateway::AuthGateway;
use internhub_shared::validation::{ValidationResult, validate_credentials};
use internhub_shared::{Credentials, LoginResponse};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl LoginForm {
    pub fn can_submit(&self) -> bool {
        !self.email.trim().is_empty() && !self.password.is_empty()
    }

    fn credentials(&self) -> Credentials {
        Credentials {
            email: self.email.trim().to_string(),
            password: self.password.clone(),
        }
    }

    pub fn validate(&self) -> ValidationResult {
        validate_credentials(&self.credentials())
    }

    pub async fn submit<G: AuthGateway + ?Sized>(&self, gateway: &G) -> PortalResult<LoginResponse> {
        self.validate()?;
        gateway.login(self.credentials()).await
    }
}
