use super::filled;
use crate::error::PortalResult;
use crate::gateway::UserGateway;
use internhub_shared::validation::{ValidationError, ValidationResult, optional, validate_new_user};
use internhub_shared::{AdminUser, NewUser, Role};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserForm {
    pub name: String,
    pub email: String,
    pub role: Option<Role>,
    pub password: String,
    pub department_id: String,
}

impl UserForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn can_submit(&self) -> bool {
        filled(&[&self.name, &self.email, &self.password]) && self.role.is_some()
    }

    pub fn to_request(&self) -> ValidationResult<NewUser> {
        let role = self
            .role
            .ok_or_else(|| ValidationError::new("role", "Role is required"))?;
        let user = NewUser {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            role,
            password: self.password.clone(),
            department_id: optional(&self.department_id),
        };
        validate_new_user(&user)?;
        Ok(user)
    }

    pub fn validate(&self) -> ValidationResult {
        self.to_request().map(|_| ())
    }

    pub async fn submit<G: UserGateway + ?Sized>(&self, gateway: &G) -> PortalResult<AdminUser> {
        let user = self.to_request()?;
        gateway.create(user).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_is_required() {
        let mut form = UserForm {
            name: "Dr. Rao".to_string(),
            email: "rao@uni.edu".to_string(),
            password: "changeme123".to_string(),
            ..UserForm::new()
        };
        assert!(!form.can_submit());
        assert_eq!(form.validate().unwrap_err().field, "role");
        form.role = Some(Role::Faculty);
        assert!(form.validate().is_ok());
    }
}
