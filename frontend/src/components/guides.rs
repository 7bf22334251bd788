use crate::auth::use_auth;
use crate::components::common::{
    PageHeader, StatusBadge, list_state, render_list, replace_item, settle, spawn_action,
    spawn_tracked, use_view_scope,
};
use crate::components::toast::use_notify;
use crate::forms::{FeedbackForm, GuideAssignmentForm};
use crate::gateway::GuideGateway;
use internhub_shared::{FacultyMember, GuideAssignment, GuideStatus};
use leptos::prelude::*;

const CATEGORY: &str = "guides";

fn status_tone(status: GuideStatus) -> &'static str {
    match status {
        GuideStatus::NotStarted => "ghost",
        GuideStatus::InProgress => "info",
        GuideStatus::Completed => "success",
    }
}

fn student_line(a: &GuideAssignment) -> String {
    format!("{} ({})", a.student_name, a.student_reg_no)
}

/// 指导教师分配：只有未开始的记录可以指派，未填写教师姓名前提交按钮保持禁用
#[component]
pub fn GuidesPage() -> impl IntoView {
    let auth = use_auth();
    let notify = use_notify();
    let scope = use_view_scope();

    let assignments = list_state::<GuideAssignment>();
    let faculty = RwSignal::new(Vec::<FacultyMember>::new());

    if let Some(api) = auth.api() {
        spawn_tracked(scope, async move { api.get_all().await }, move |r| {
            settle(assignments, r)
        });
    }
    // 教师名单只用于输入提示，加载失败不影响分配
    if let Some(api) = auth.api() {
        spawn_tracked(scope, async move { api.list_faculty().await }, move |r| {
            if let Ok(list) = r {
                faculty.set(list);
            }
        });
    }

    let on_assign = move |form: GuideAssignmentForm| {
        let Some(api) = auth.api() else { return };
        spawn_action(
            scope,
            notify,
            CATEGORY,
            "Guide assigned",
            async move { form.submit(&api).await },
            move |assignment| {
                let message = format!(
                    "{} now guides {}",
                    assignment.guide.clone().unwrap_or_default(),
                    assignment.student_name
                );
                replace_item(assignments, assignment, |a| &a.id);
                message
            },
        );
    };

    let row = move |a: GuideAssignment| {
        let initial = GuideAssignmentForm::for_assignment(&a);
        // 已指派或已完成的记录只展示，不再提供指派入口
        let assign = initial.is_assignable().then(|| {
            let form = RwSignal::new(initial);
            view! {
                <div class="join">
                    <input
                        type="text"
                        list="faculty-names"
                        class="input input-bordered input-sm join-item"
                        placeholder="Guide name"
                        prop:value=move || form.with(|f| f.guide_name.clone())
                        on:input=move |ev| {
                            let name = event_target_value(&ev);
                            form.update(|f| f.guide_name = name);
                        }
                    />
                    <button
                        class="btn btn-primary btn-sm join-item"
                        disabled=move || !form.with(GuideAssignmentForm::can_submit)
                        on:click=move |_| on_assign(form.get_untracked())
                    >
                        "Assign"
                    </button>
                </div>
            }
        });
        view! {
            <tr>
                <td>{student_line(&a)}</td>
                <td>{a.internship_title.clone()} <div class="text-xs text-base-content/60">{a.company_name.clone()}</div></td>
                <td><StatusBadge label=a.status.label() tone=status_tone(a.status) /></td>
                <td>{a.guide.clone().unwrap_or_else(|| "-".to_string())}</td>
                <td>{assign}</td>
            </tr>
        }
    };

    view! {
        <PageHeader title="Guide assignments" subtitle="Faculty guides for interning students" />
        <datalist id="faculty-names">
            <For each=move || faculty.get() key=|f| f.id.clone() let:member>
                <option value=member.name.clone()>{member.department.clone().unwrap_or_default()}</option>
            </For>
        </datalist>
        <div class="card bg-base-100 shadow-xl">
            <div class="card-body overflow-x-auto">
                <table class="table">
                    <thead>
                        <tr>
                            <th>"Student"</th>
                            <th>"Internship"</th>
                            <th>"Status"</th>
                            <th>"Guide"</th>
                            <th>"Assign"</th>
                        </tr>
                    </thead>
                    <tbody>{render_list(assignments, "No students to assign.", row)}</tbody>
                </table>
            </div>
        </div>
    }
}

/// 教师名下的学生与反馈记录（只追加）
#[component]
pub fn MyStudentsPage() -> impl IntoView {
    let auth = use_auth();
    let notify = use_notify();
    let scope = use_view_scope();

    let assignments = list_state::<GuideAssignment>();

    if let Some(api) = auth.api() {
        spawn_tracked(scope, async move { api.get_all().await }, move |r| {
            settle(assignments, r)
        });
    }

    let on_feedback = move |form: FeedbackForm, draft: RwSignal<FeedbackForm>| {
        let Some(api) = auth.api() else { return };
        spawn_action(
            scope,
            notify,
            CATEGORY,
            "Feedback added",
            async move { form.submit(&api).await },
            move |assignment| {
                let message = format!("Feedback recorded for {}", assignment.student_name);
                draft.update(|f| f.message.clear());
                replace_item(assignments, assignment, |a| &a.id);
                message
            },
        );
    };

    let card = move |a: GuideAssignment| {
        let draft = RwSignal::new(FeedbackForm::new(a.id.clone()));
        view! {
            <div class="card bg-base-100 shadow">
                <div class="card-body">
                    <div class="flex items-center justify-between">
                        <h3 class="card-title">{student_line(&a)}</h3>
                        <StatusBadge label=a.status.label() tone=status_tone(a.status) />
                    </div>
                    <p class="text-sm text-base-content/70">
                        {a.internship_title.clone()} " at " {a.company_name.clone()}
                    </p>
                    <ul class="space-y-1 text-sm">
                        {a.feedback
                            .iter()
                            .map(|f| view! {
                                <li>
                                    <span class="font-semibold">{f.author.clone()}</span>
                                    <span class="text-base-content/50">
                                        " · " {f.created_at.format("%Y-%m-%d").to_string()}
                                    </span>
                                    <p>{f.message.clone()}</p>
                                </li>
                            })
                            .collect_view()}
                    </ul>
                    <textarea
                        class="textarea textarea-bordered w-full"
                        placeholder="Add feedback"
                        prop:value=move || draft.with(|f| f.message.clone())
                        on:input=move |ev| {
                            let message = event_target_value(&ev);
                            draft.update(|f| f.message = message);
                        }
                    ></textarea>
                    <div class="card-actions justify-end">
                        <button
                            class="btn btn-primary btn-sm"
                            disabled=move || !draft.with(FeedbackForm::can_submit)
                            on:click=move |_| on_feedback(draft.get_untracked(), draft)
                        >
                            "Add feedback"
                        </button>
                    </div>
                </div>
            </div>
        }
    };

    view! {
        <PageHeader title="My students" subtitle="Students you guide this session" />
        <div class="grid grid-cols-1 lg:grid-cols-2 gap-4">
            {render_list(assignments, "No students assigned to you yet.", card)}
        </div>
    }
}
