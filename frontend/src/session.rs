//! 会话存储
//!
//! 唯一的持久化客户端状态：一个本地键保存 `{ user, token }`。
//! 存储后端通过 `SessionStorage` 注入，浏览器中为 LocalStorage，测试中为内存表。

use internhub_shared::User;
use serde::{Deserialize, Serialize};

/// 键值存储接口
pub trait SessionStorage {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> bool;
    fn delete(&self, key: &str) -> bool;
}

/// 持久化的会话记录
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersistedSession {
    pub user: User,
    pub token: String,
}

/// 会话存储服务
#[derive(Debug, Clone)]
pub struct SessionStore<S> {
    storage: S,
    key: String,
}

impl<S: SessionStorage> SessionStore<S> {
    pub fn new(storage: S, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
        }
    }

    /// 读取持久化会话；记录损坏时清除并视为未登录
    pub fn current_session(&self) -> Option<PersistedSession> {
        let raw = self.storage.get(&self.key)?;
        match serde_json::from_str::<PersistedSession>(&raw) {
            Ok(session) if !session.token.is_empty() => Some(session),
            Ok(_) => {
                self.storage.delete(&self.key);
                None
            }
            Err(e) => {
                log_warn!("[Session] Discarding unreadable session record: {}", e);
                self.storage.delete(&self.key);
                None
            }
        }
    }

    /// 写入会话，返回是否持久化成功
    pub fn set_current_user(&self, user: User, token: String) -> bool {
        let session = PersistedSession { user, token };
        match serde_json::to_string(&session) {
            Ok(raw) => self.storage.set(&self.key, &raw),
            Err(e) => {
                log_error!("[Session] Failed to serialize session: {}", e);
                false
            }
        }
    }

    pub fn clear(&self) {
        self.storage.delete(&self.key);
    }
}

// =========================================================
// 测试环境实现 (Mock)
// =========================================================

#[cfg(test)]
pub mod tests {
    use super::*;
    use internhub_shared::Role;
    use std::cell::RefCell;
    use std::collections::HashMap;
    use std::rc::Rc;

    /// 内存存储；克隆共享同一张表，用于模拟页面重载
    #[derive(Clone, Default)]
    pub struct MemoryStorage {
        pub map: Rc<RefCell<HashMap<String, String>>>,
    }

    impl SessionStorage for MemoryStorage {
        fn get(&self, key: &str) -> Option<String> {
            self.map.borrow().get(key).cloned()
        }

        fn set(&self, key: &str, value: &str) -> bool {
            self.map
                .borrow_mut()
                .insert(key.to_string(), value.to_string());
            true
        }

        fn delete(&self, key: &str) -> bool {
            self.map.borrow_mut().remove(key).is_some()
        }
    }

    pub fn user(role: Option<Role>) -> User {
        User {
            id: "u1".to_string(),
            name: "Meera Iyer".to_string(),
            email: "meera@uni.edu".to_string(),
            role,
            department_id: Some("d1".to_string()),
        }
    }

    #[test]
    fn test_session_survives_reload() {
        let storage = MemoryStorage::default();
        let store = SessionStore::new(storage.clone(), "session");
        assert!(store.current_session().is_none());

        store.set_current_user(user(Some(Role::HeadOfDepartment)), "tok".to_string());

        // 新的 store 实例模拟页面重载
        let reloaded = SessionStore::new(storage, "session");
        let restored = reloaded.current_session().unwrap();
        assert_eq!(restored.user.role, Some(Role::HeadOfDepartment));
        assert_eq!(restored.token, "tok");
    }

    #[test]
    fn test_clear_removes_record() {
        let storage = MemoryStorage::default();
        let store = SessionStore::new(storage.clone(), "session");
        store.set_current_user(user(Some(Role::Student)), "tok".to_string());
        store.clear();
        assert!(store.current_session().is_none());
        assert!(storage.map.borrow().is_empty());
    }

    #[test]
    fn test_corrupt_record_is_discarded() {
        let storage = MemoryStorage::default();
        storage.set("session", "{not json");
        let store = SessionStore::new(storage.clone(), "session");
        assert!(store.current_session().is_none());
        assert!(storage.get("session").is_none());
    }

    #[test]
    fn test_empty_token_is_not_authenticated() {
        let storage = MemoryStorage::default();
        let store = SessionStore::new(storage, "session");
        store.set_current_user(user(Some(Role::Student)), String::new());
        assert!(store.current_session().is_none());
    }

    #[test]
    fn test_unknown_role_round_trips_as_none() {
        let storage = MemoryStorage::default();
        let store = SessionStore::new(storage, "session");
        store.set_current_user(user(None), "tok".to_string());
        let restored = store.current_session().unwrap();
        assert_eq!(restored.user.role, None);
    }
}
