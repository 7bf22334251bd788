//! 审批工作流
//!
//! 动作只对允许流转的状态生效；状态已离开 PENDING 的记录直接返回
//! `Ok(None)`，不发请求（界面上对应的按钮也已隐藏）。

use crate::error::PortalResult;
use crate::gateway::{ApplicationGateway, JobGateway};
use internhub_shared::validation::optional;
use internhub_shared::{Application, Internship, JobStatus};

pub async fn approve_application<G: ApplicationGateway + ?Sized>(
    gateway: &G,
    application: &Application,
) -> PortalResult<Option<Application>> {
    if !application.status.is_reviewable() {
        return Ok(None);
    }
    gateway.approve(&application.id).await.map(Some)
}

pub async fn reject_application<G: ApplicationGateway + ?Sized>(
    gateway: &G,
    application: &Application,
    reason: &str,
) -> PortalResult<Option<Application>> {
    if !application.status.is_reviewable() {
        return Ok(None);
    }
    gateway
        .reject(&application.id, optional(reason))
        .await
        .map(Some)
}

async fn transition_job<G: JobGateway + ?Sized>(
    gateway: &G,
    job: &Internship,
    next: JobStatus,
    reason: Option<String>,
) -> PortalResult<Option<Internship>> {
    if !job.status.can_transition_to(next) {
        return Ok(None);
    }
    gateway.update_status(&job.id, next, reason).await.map(Some)
}

pub async fn approve_job<G: JobGateway + ?Sized>(
    gateway: &G,
    job: &Internship,
) -> PortalResult<Option<Internship>> {
    transition_job(gateway, job, JobStatus::Approved, None).await
}

pub async fn reject_job<G: JobGateway + ?Sized>(
    gateway: &G,
    job: &Internship,
    reason: &str,
) -> PortalResult<Option<Internship>> {
    transition_job(gateway, job, JobStatus::Rejected, optional(reason)).await
}

pub async fn close_job<G: JobGateway + ?Sized>(
    gateway: &G,
    job: &Internship,
) -> PortalResult<Option<Internship>> {
    transition_job(gateway, job, JobStatus::Closed, None).await
}
