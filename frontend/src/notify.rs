//! 通知中心
//!
//! 每个重要的变更操作（审批、驳回、指派……）都会产生一条通知。
//! 通知只存在于内存中，按时间倒序保存，超过容量时丢弃最旧的条目。

use crate::error::PortalError;
use std::collections::VecDeque;

pub type NotificationId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
    Warning,
    Info,
}

impl NotificationKind {
    /// daisyUI alert 样式
    pub fn alert_class(&self) -> &'static str {
        match self {
            NotificationKind::Success => "alert alert-success",
            NotificationKind::Error => "alert alert-error",
            NotificationKind::Warning => "alert alert-warning",
            NotificationKind::Info => "alert alert-info",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub id: NotificationId,
    pub title: String,
    pub message: String,
    pub kind: NotificationKind,
    pub category: Option<String>,
    pub read: bool,
}

/// 新通知的内容，`id` 由通知中心分配
#[derive(Debug, Clone, PartialEq)]
pub struct NewNotification {
    pub title: String,
    pub message: String,
    pub kind: NotificationKind,
    pub category: Option<String>,
}

impl NewNotification {
    pub fn new(kind: NotificationKind, title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            kind,
            category: None,
        }
    }

    pub fn success(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(NotificationKind::Success, title, message)
    }

    pub fn info(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(NotificationKind::Info, title, message)
    }

    /// 校验错误以警告展示，其余错误展示后端原始消息
    pub fn from_error(title: impl Into<String>, err: &PortalError) -> Self {
        let kind = if err.is_validation() {
            NotificationKind::Warning
        } else {
            NotificationKind::Error
        };
        Self::new(kind, title, err.message())
    }

    pub fn in_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NotificationFeed {
    items: VecDeque<Notification>,
    capacity: usize,
    next_id: NotificationId,
}

impl NotificationFeed {
    pub fn new(capacity: usize) -> Self {
        Self {
            items: VecDeque::new(),
            capacity: capacity.max(1),
            next_id: 1,
        }
    }

    pub fn push(&mut self, notification: NewNotification) -> NotificationId {
        let id = self.next_id;
        self.next_id += 1;

        self.items.push_front(Notification {
            id,
            title: notification.title,
            message: notification.message,
            kind: notification.kind,
            category: notification.category,
            read: false,
        });
        self.items.truncate(self.capacity);
        id
    }

    /// 最新的在前
    pub fn items(&self) -> impl Iterator<Item = &Notification> {
        self.items.iter()
    }

    pub fn get(&self, id: NotificationId) -> Option<&Notification> {
        self.items.iter().find(|n| n.id == id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn unread_count(&self) -> usize {
        self.items.iter().filter(|n| !n.read).count()
    }

    /// 返回是否找到该通知
    pub fn mark_read(&mut self, id: NotificationId) -> bool {
        match self.items.iter_mut().find(|n| n.id == id) {
            Some(n) => {
                n.read = true;
                true
            }
            None => false,
        }
    }

    pub fn mark_all_read(&mut self) {
        for n in self.items.iter_mut() {
            n.read = true;
        }
    }

    pub fn dismiss(&mut self, id: NotificationId) -> Option<Notification> {
        let index = self.items.iter().position(|n| n.id == id)?;
        self.items.remove(index)
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn by_category<'a>(&'a self, category: &'a str) -> impl Iterator<Item = &'a Notification> {
        self.items
            .iter()
            .filter(move |n| n.category.as_deref() == Some(category))
    }

    /// 已出现过的分类，按首次出现顺序
    pub fn categories(&self) -> Vec<String> {
        let mut seen: Vec<String> = Vec::new();
        for category in self.items.iter().filter_map(|n| n.category.as_ref()) {
            if !seen.contains(category) {
                seen.push(category.clone());
            }
        }
        seen
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_newest_first_and_unread_count() {
        let mut feed = NotificationFeed::new(10);
        let first = feed.push(NewNotification::success("Approved", "Job approved"));
        let second = feed.push(NewNotification::info("Assigned", "Guide assigned"));

        let ids: Vec<_> = feed.items().map(|n| n.id).collect();
        assert_eq!(ids, vec![second, first]);
        assert_eq!(feed.unread_count(), 2);

        assert!(feed.mark_read(first));
        assert_eq!(feed.unread_count(), 1);
        assert!(!feed.mark_read(999));

        feed.mark_all_read();
        assert_eq!(feed.unread_count(), 0);
    }

    #[test]
    fn test_capacity_drops_oldest() {
        let mut feed = NotificationFeed::new(2);
        let oldest = feed.push(NewNotification::info("1", "one"));
        feed.push(NewNotification::info("2", "two"));
        feed.push(NewNotification::info("3", "three"));

        assert_eq!(feed.len(), 2);
        assert!(feed.get(oldest).is_none());
    }

    #[test]
    fn test_dismiss_and_category_filter() {
        let mut feed = NotificationFeed::new(10);
        let job = feed.push(NewNotification::success("Approved", "x").in_category("jobs"));
        feed.push(NewNotification::success("Rejected", "y").in_category("applications"));
        feed.push(NewNotification::new(NotificationKind::Warning, "Check", "z").in_category("jobs"));

        assert_eq!(feed.by_category("jobs").count(), 2);
        assert_eq!(feed.categories(), vec!["jobs", "applications"]);

        let removed = feed.dismiss(job).unwrap();
        assert_eq!(removed.title, "Approved");
        assert_eq!(feed.by_category("jobs").count(), 1);
        assert!(feed.dismiss(job).is_none());
    }

    #[test]
    fn test_error_notification_keeps_backend_message() {
        let err = PortalError::from_response(409, r#"{"message":"Email already registered"}"#);
        let n = NewNotification::from_error("Onboarding failed", &err);
        assert_eq!(n.kind, NotificationKind::Error);
        assert_eq!(n.message, "Email already registered");

        let invalid: PortalError =
            internhub_shared::validation::ValidationError::new("title", "Title is required").into();
        assert_eq!(
            NewNotification::from_error("x", &invalid).kind,
            NotificationKind::Warning
        );
    }
}
