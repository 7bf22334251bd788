//! 视图生命周期内的请求取消
//!
//! 每个视图持有一个 `ViewScope`，通过 `track` 包装发出的请求。
//! 视图卸载时调用 `cancel_all`（或直接丢弃 scope），所有未完成的请求被中止，
//! 被中止的 future 返回 `None`，不会再写入已销毁的视图状态。
//! 已完成请求的句柄在下一次 `track` 时清理。

use futures::future::{AbortHandle, Abortable};
use std::cell::{Cell, RefCell};
use std::future::Future;
use std::rc::Rc;

#[derive(Debug)]
struct Tracked {
    handle: AbortHandle,
    done: Rc<Cell<bool>>,
}

#[derive(Debug, Default)]
pub struct ViewScope {
    handles: RefCell<Vec<Tracked>>,
    cancelled: Cell<bool>,
}

impl ViewScope {
    pub fn new() -> Self {
        Self::default()
    }

    /// 包装一个请求；scope 已取消时立即返回 `None`
    pub fn track<F: Future>(&self, future: F) -> impl Future<Output = Option<F::Output>> + use<F> {
        let (handle, registration) = AbortHandle::new_pair();
        let done = Rc::new(Cell::new(false));
        if self.is_cancelled() {
            handle.abort();
        } else {
            let mut handles = self.handles.borrow_mut();
            handles.retain(|t| !t.done.get());
            handles.push(Tracked {
                handle,
                done: done.clone(),
            });
        }
        let tracked = Abortable::new(future, registration);
        async move {
            let output = tracked.await.ok();
            done.set(true);
            output
        }
    }

    pub fn cancel_all(&self) {
        self.cancelled.set(true);
        for tracked in self.handles.borrow_mut().drain(..) {
            tracked.handle.abort();
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.get()
    }

    /// 仍登记在 scope 中的句柄数
    #[cfg(test)]
    fn tracked(&self) -> usize {
        self.handles.borrow().len()
    }
}

impl Drop for ViewScope {
    fn drop(&mut self) {
        self.cancel_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::channel::oneshot;

    #[tokio::test]
    async fn test_completed_request_yields_value() {
        let scope = ViewScope::new();
        let result = scope.track(async { 42 }).await;
        assert_eq!(result, Some(42));
    }

    #[tokio::test]
    async fn test_cancel_aborts_in_flight_request() {
        let scope = ViewScope::new();
        let (tx, rx) = oneshot::channel::<u32>();
        let pending = scope.track(rx);
        assert_eq!(scope.tracked(), 1);

        scope.cancel_all();
        let _ = tx.send(7);

        assert!(pending.await.is_none());
        assert!(scope.is_cancelled());
    }

    #[tokio::test]
    async fn test_track_after_cancel_never_runs() {
        let scope = ViewScope::new();
        scope.cancel_all();
        assert!(scope.track(async { "late" }).await.is_none());
        assert_eq!(scope.tracked(), 0);
    }

    #[tokio::test]
    async fn test_finished_handles_are_pruned() {
        let scope = ViewScope::new();
        for n in 0..5 {
            assert_eq!(scope.track(async move { n }).await, Some(n));
        }
        let (_tx, rx) = oneshot::channel::<u32>();
        let _pending = scope.track(rx);
        // 只剩仍在进行的请求
        assert_eq!(scope.tracked(), 1);
    }

    #[tokio::test]
    async fn test_drop_cancels() {
        let (tx, rx) = oneshot::channel::<u32>();
        let pending = {
            let scope = ViewScope::new();
            scope.track(rx)
        };
        let _ = tx.send(1);
        assert!(pending.await.is_none());
    }
}
