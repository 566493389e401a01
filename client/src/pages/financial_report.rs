//! Financial report page: payments over a date range.
//!
//! SYSTEM CONTEXT
//! ==============
//! The range lives in the URL (`?start_date=..&end_date=..`) so a session
//! that expires mid-visit resumes on the same report after signing back in.

#[cfg(test)]
#[path = "financial_report_test.rs"]
mod financial_report_test;

use leptos::prelude::*;

use crate::routes::{FINANCIAL_REPORT_PATH, NavigationTarget};
use crate::state::report::{ReportState, format_amount, validate_date_range};

const START_PARAM: &str = "start_date";
const END_PARAM: &str = "end_date";

/// Date inputs prefilled from the current query string.
fn initial_range(target: &NavigationTarget) -> (String, String) {
    (
        target.query_param(START_PARAM).unwrap_or_default(),
        target.query_param(END_PARAM).unwrap_or_default(),
    )
}

fn report_url(start: &str, end: &str) -> String {
    format!(
        "{FINANCIAL_REPORT_PATH}?{START_PARAM}={}&{END_PARAM}={}",
        urlencoding::encode(start),
        urlencoding::encode(end)
    )
}

fn paid_label(paid: bool) -> &'static str {
    if paid { "Paid" } else { "Unpaid" }
}

#[component]
pub fn FinancialReportPage() -> impl IntoView {
    let location = leptos_router::hooks::use_location();
    let target = NavigationTarget::new(location.pathname.get_untracked(), location.search.get_untracked());
    let (start, end) = initial_range(&target);
    let autoload = validate_date_range(&start, &end).ok();

    let start_date = RwSignal::new(start);
    let end_date = RwSignal::new(end);
    let state = RwSignal::new(ReportState::default());
    let form_error = RwSignal::new(None::<&'static str>);

    #[cfg(feature = "csr")]
    let services = crate::app::use_services();
    #[cfg(feature = "csr")]
    let navigate = leptos_router::hooks::use_navigate();

    let load = move |range: (String, String)| {
        state.update(|s| s.loading = true);
        #[cfg(feature = "csr")]
        {
            let client = services.with_value(|s| s.client.clone());
            leptos::task::spawn_local(async move {
                let result = crate::net::api::fetch_financial_report(&client, &range.0, &range.1).await;
                state.update(|s| s.apply_load(result));
            });
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = range;
        }
    };

    if let Some(range) = autoload {
        load(range);
    }

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        match validate_date_range(&start_date.get(), &end_date.get()) {
            Ok(range) => {
                form_error.set(None);
                #[cfg(feature = "csr")]
                navigate(
                    &report_url(&range.0, &range.1),
                    leptos_router::NavigateOptions { replace: true, ..Default::default() },
                );
                load(range);
            }
            Err(message) => form_error.set(Some(message)),
        }
    };

    view! {
        <section class="report">
            <h1>"Financial report"</h1>
            <form class="report__range" on:submit=on_submit>
                <label>
                    "From "
                    <input
                        type="date"
                        prop:value=move || start_date.get()
                        on:input=move |ev| start_date.set(event_target_value(&ev))
                    />
                </label>
                <label>
                    "To "
                    <input
                        type="date"
                        prop:value=move || end_date.get()
                        on:input=move |ev| end_date.set(event_target_value(&ev))
                    />
                </label>
                <button type="submit" disabled=move || state.get().loading>"Show"</button>
            </form>
            <Show when=move || form_error.get().is_some()>
                <p class="banner banner--error">{move || form_error.get().unwrap_or_default()}</p>
            </Show>
            <Show when=move || state.get().error.is_some()>
                <p class="banner banner--error">{move || state.get().error.unwrap_or_default()}</p>
            </Show>
            <Show when=move || state.get().loading>
                <p class="report__loading">"Loading..."</p>
            </Show>
            {move || {
                state
                    .get()
                    .report
                    .map(|report| {
                        view! {
                            <div class="report__summary">
                                <p>"Total payments: " {format_amount(report.total_payments)}</p>
                                <p>"Paid: " {format!("{:.2}%", report.paid_percentage)}</p>
                            </div>
                            <h2>"By language"</h2>
                            <ul class="report__languages">
                                {report
                                    .language_stats
                                    .into_iter()
                                    .map(|s| view! { <li>{s.language} ": " {format_amount(s.amount)}</li> })
                                    .collect_view()}
                            </ul>
                            <h2>"By month"</h2>
                            <ul class="report__months">
                                {report
                                    .monthly_stats
                                    .into_iter()
                                    .map(|s| view! { <li>{s.month} ": " {format_amount(s.amount)}</li> })
                                    .collect_view()}
                            </ul>
                            <h2>"Payments"</h2>
                            <table class="report__details">
                                <thead>
                                    <tr>
                                        <th>"Date"</th>
                                        <th>"Course"</th>
                                        <th>"Language"</th>
                                        <th>"Amount"</th>
                                        <th>"Status"</th>
                                    </tr>
                                </thead>
                                <tbody>
                                    {report
                                        .detailed_data
                                        .into_iter()
                                        .map(|row| {
                                            view! {
                                                <tr>
                                                    <td>{row.date.unwrap_or_else(|| "-".to_owned())}</td>
                                                    <td>{row.course}</td>
                                                    <td>{row.language}</td>
                                                    <td>{format_amount(row.amount)}</td>
                                                    <td>{paid_label(row.status)}</td>
                                                </tr>
                                            }
                                        })
                                        .collect_view()}
                                </tbody>
                            </table>
                        }
                    })
            }}
        </section>
    }
}
