use crate::api::ApiClient;
use crate::error::PortalResult;
use crate::http::HttpClient;
use async_trait::async_trait;
use internhub_shared::protocol::{CreateUser, DeleteUser, ListUsers, ToggleUserStatus};
use internhub_shared::validation::validate_new_user;
use internhub_shared::{AdminUser, NewUser};

#[async_trait(?Send)]
pub trait UserGateway {
    async fn get_all(&self) -> PortalResult<Vec<AdminUser>>;
    async fn create(&self, user: NewUser) -> PortalResult<AdminUser>;
    async fn toggle_status(&self, id: &str) -> PortalResult<AdminUser>;
    async fn delete(&self, id: &str) -> PortalResult<()>;
}

#[async_trait(?Send)]
impl<C: HttpClient> UserGateway for ApiClient<C> {
    async fn get_all(&self) -> PortalResult<Vec<AdminUser>> {
        self.call(ListUsers)
            .await
            .map_err(|e| e.in_op("users.get_all"))
    }

    async fn create(&self, mut user: NewUser) -> PortalResult<AdminUser> {
        validate_new_user(&user)?;
        user.name = user.name.trim().to_string();
        user.email = user.email.trim().to_string();
        self.call(CreateUser(user))
            .await
            .map_err(|e| e.in_op("users.create"))
    }

    async fn toggle_status(&self, id: &str) -> PortalResult<AdminUser> {
        self.call(ToggleUserStatus { id: id.to_string() })
            .await
            .map_err(|e| e.in_op_with("users.toggle_status", id))
    }

    async fn delete(&self, id: &str) -> PortalResult<()> {
        self.call(DeleteUser { id: id.to_string() })
            .await
            .map_err(|e| e.in_op_with("users.delete", id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::testing::{api, url};
    use internhub_shared::Role;
    use internhub_shared::protocol::HttpMethod;
    use serde_json::json;

    #[tokio::test]
    async fn test_create_user_serializes_role_tag() {
        let api = api();
        api.http_client().mock_response(
            HttpMethod::Post,
            &url("/admin/users"),
            201,
            json!({"id": 11, "name": "Dr. Rao", "email": "rao@uni.edu", "role": "HOD"}),
        );
        let created = api
            .create(NewUser {
                name: "Dr. Rao".to_string(),
                email: "rao@uni.edu".to_string(),
                role: Role::HeadOfDepartment,
                password: "changeme123".to_string(),
                department_id: None,
            })
            .await
            .unwrap();
        assert!(created.is_active);
        assert_eq!(created.role, Some(Role::HeadOfDepartment));

        let (_, _, body) = api.http_client().last_request().unwrap();
        assert!(body.unwrap().contains(r#""role":"HOD""#));
    }

    #[tokio::test]
    async fn test_delete_accepts_empty_response() {
        let api = api();
        api.http_client()
            .mock_raw(HttpMethod::Delete, &url("/admin/users/11"), 204, "");
        api.delete("11").await.unwrap();
    }
}
