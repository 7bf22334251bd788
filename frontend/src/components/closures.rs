use crate::auth::use_auth;
use crate::components::common::{
    PageHeader, StatusBadge, list_state, render_list, replace_item, settle, spawn_action,
    spawn_tracked, use_view_scope,
};
use crate::components::toast::use_notify;
use crate::error::PortalError;
use crate::forms::EvaluationForm;
use crate::gateway::ClosureGateway;
use internhub_shared::validation::RATING_RANGE;
use internhub_shared::{ClosureRecord, ClosureStatus};
use leptos::prelude::*;

const CATEGORY: &str = "closures";

/// 结项记录；待审核且未评价的记录显示评分表单
#[component]
pub fn ClosuresPage() -> impl IntoView {
    let auth = use_auth();
    let notify = use_notify();
    let scope = use_view_scope();

    let closures = list_state::<ClosureRecord>();

    if let Some(api) = auth.api() {
        spawn_tracked(scope, async move { api.get_all().await }, move |r| {
            settle(closures, r)
        });
    }

    let on_evaluate = move |form: EvaluationForm| {
        if let Err(e) = form.validate() {
            notify.failure(CATEGORY, "Evaluation incomplete", &PortalError::from(e));
            return;
        }
        let Some(api) = auth.api() else { return };
        spawn_action(
            scope,
            notify,
            CATEGORY,
            "Evaluation submitted",
            async move { form.submit(&api).await },
            move |record| {
                let message = format!("{} is closed", record.internship_title);
                replace_item(closures, record, |c| &c.id);
                message
            },
        );
    };

    let card = move |record: ClosureRecord| {
        let (label, tone) = match record.status {
            ClosureStatus::PendingReview => ("Pending review", "warning"),
            ClosureStatus::Closed => ("Closed", "success"),
        };
        let group = format!("rating-{}", record.id);
        let evaluation_form = EvaluationForm::for_record(&record).map(|initial| {
            let form = RwSignal::new(initial);
            view! {
                <div class="space-y-2 border-t border-base-300 pt-2">
                    <div class="rating">
                        {RATING_RANGE
                            .map(|star| view! {
                                <input
                                    type="radio"
                                    name=group.clone()
                                    class="mask mask-star-2 bg-orange-400"
                                    prop:checked=move || form.with(|f| f.rating == star)
                                    on:change=move |_| form.update(|f| f.rating = star)
                                />
                            })
                            .collect_view()}
                    </div>
                    <textarea
                        class="textarea textarea-bordered w-full"
                        placeholder="Remarks"
                        prop:value=move || form.with(|f| f.remarks.clone())
                        on:input=move |ev| {
                            let remarks = event_target_value(&ev);
                            form.update(|f| f.remarks = remarks);
                        }
                    ></textarea>
                    <div class="card-actions justify-end">
                        <button
                            class="btn btn-primary btn-sm"
                            disabled=move || !form.with(EvaluationForm::can_submit)
                            on:click=move |_| on_evaluate(form.get_untracked())
                        >
                            "Submit evaluation"
                        </button>
                    </div>
                </div>
            }
        });

        view! {
            <div class="card bg-base-100 shadow">
                <div class="card-body">
                    <div class="flex items-center justify-between">
                        <h3 class="card-title">{record.student_name.clone()}</h3>
                        <StatusBadge label=label tone=tone />
                    </div>
                    <p class="text-sm text-base-content/70">
                        {record.internship_title.clone()} " at " {record.company_name.clone()}
                    </p>
                    <ul class="text-sm">
                        {record
                            .documents
                            .iter()
                            .map(|d| view! {
                                <li>
                                    <a class="link link-primary" href=d.url.clone() target="_blank" rel="noopener">
                                        {d.name.clone()}
                                    </a>
                                </li>
                            })
                            .collect_view()}
                    </ul>
                    {record.evaluation.clone().map(|e| view! {
                        <p class="text-sm">
                            <span class="font-semibold">{format!("Rated {} / 5", e.rating)}</span>
                            " · " {e.remarks}
                        </p>
                    })}
                    {evaluation_form}
                </div>
            </div>
        }
    };

    view! {
        <PageHeader title="Internship closures" subtitle="Completion documents and final evaluation" />
        <div class="grid grid-cols-1 lg:grid-cols-2 gap-4">
            {render_list(closures, "No closure requests yet.", card)}
        </div>
    }
}
