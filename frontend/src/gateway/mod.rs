//! 资源网关
//!
//! 每种后端资源一个 trait，视图只依赖 trait，便于替换和模拟。
//! 每次调用都是一次请求-响应往返：不批量、不缓存、不做乐观更新。

mod applications;
mod auth;
mod closures;
mod guides;
mod jobs;
mod recruiters;
mod reports;
mod sessions;
mod users;

pub use applications::ApplicationGateway;
pub use auth::AuthGateway;
pub use closures::ClosureGateway;
pub use guides::GuideGateway;
pub use jobs::JobGateway;
pub use recruiters::RecruiterGateway;
pub use reports::ReportGateway;
pub use sessions::SessionGateway;
pub use users::UserGateway;

/// 仪表盘需要读取的全部资源
pub trait PortalGateways:
    JobGateway
    + ApplicationGateway
    + SessionGateway
    + RecruiterGateway
    + GuideGateway
    + ClosureGateway
    + ReportGateway
{
}

impl<T> PortalGateways for T where
    T: JobGateway
        + ApplicationGateway
        + SessionGateway
        + RecruiterGateway
        + GuideGateway
        + ClosureGateway
        + ReportGateway
{
}

#[cfg(test)]
pub(crate) mod testing {
    use crate::api::ApiClient;
    use crate::http::MockHttpClient;

    pub const BASE: &str = "https://api.test";

    pub fn api() -> ApiClient<MockHttpClient> {
        ApiClient::new(BASE, MockHttpClient::new()).with_token("test-token")
    }

    pub fn url(path: &str) -> String {
        format!("{}{}", BASE, path)
    }
}
