//! InternHub 共享层
//!
//! 与目标平台无关的纯领域逻辑：视图模型、角色、接口协议、校验规则与仪表盘聚合。

pub mod catalog;
pub mod model;
pub mod protocol;
pub mod role;
pub mod serde_helper;
pub mod stats;
pub mod validation;

pub use model::*;
pub use role::Role;

// =========================================================
// 常量定义 (Constants)
// =========================================================

pub const HEADER_AUTHORIZATION: &str = "Authorization";
pub const HEADER_CONTENT_TYPE: &str = "Content-Type";
pub const CONTENT_TYPE_JSON: &str = "application/json";
