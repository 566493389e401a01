//! Customers page: table with create, edit and delete.
//!
//! SYSTEM CONTEXT
//! ==============
//! Loads through the shared HTTP client, so an expired session ends here in a
//! hard redirect to login rather than an error banner.

#[cfg(test)]
#[path = "customers_test.rs"]
mod customers_test;

use leptos::prelude::*;

use crate::net::types::{Customer, NewCustomer};
use crate::state::customers::CustomersState;

/// Raw form fields as typed by the user.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
struct CustomerForm {
    last_name: String,
    first_name: String,
    middle_name: String,
    phone_number: String,
    male: bool,
    birth_date: String,
}

fn validate_new_customer(form: &CustomerForm) -> Result<NewCustomer, &'static str> {
    let last_name = form.last_name.trim();
    let first_name = form.first_name.trim();
    let phone_number = form.phone_number.trim();
    let birth_date = form.birth_date.trim();
    if last_name.is_empty() || first_name.is_empty() {
        return Err("Enter last and first name.");
    }
    if phone_number.is_empty() {
        return Err("Enter a phone number.");
    }
    if birth_date.is_empty() {
        return Err("Enter a birth date.");
    }
    let middle_name = Some(form.middle_name.trim()).filter(|m| !m.is_empty()).map(str::to_owned);
    Ok(NewCustomer {
        last_name: last_name.to_owned(),
        first_name: first_name.to_owned(),
        middle_name,
        phone_number: phone_number.to_owned(),
        gender: form.male,
        birth_date: birth_date.to_owned(),
    })
}

/// Form prefilled from an existing record, for editing.
fn form_from(customer: &Customer) -> CustomerForm {
    CustomerForm {
        last_name: customer.last_name.clone(),
        first_name: customer.first_name.clone(),
        middle_name: customer.middle_name.clone().unwrap_or_default(),
        phone_number: customer.phone_number.clone(),
        male: customer.gender,
        birth_date: customer.birth_date.clone(),
    }
}

/// The full record sent by an edit: validated fields under the existing id.
fn edited_customer(id: i64, fields: NewCustomer) -> Customer {
    Customer {
        id,
        last_name: fields.last_name,
        first_name: fields.first_name,
        middle_name: fields.middle_name,
        phone_number: fields.phone_number,
        gender: fields.gender,
        birth_date: fields.birth_date,
    }
}

fn gender_label(male: bool) -> &'static str {
    if male { "M" } else { "F" }
}

#[component]
pub fn CustomersPage() -> impl IntoView {
    let state = RwSignal::new(CustomersState { loading: true, ..CustomersState::default() });
    let form = RwSignal::new(CustomerForm::default());
    let form_error = RwSignal::new(None::<&'static str>);
    // Id of the record loaded into the form, `None` while creating.
    let editing = RwSignal::new(None::<i64>);

    #[cfg(feature = "csr")]
    let services = crate::app::use_services();

    #[cfg(feature = "csr")]
    {
        let client = services.with_value(|s| s.client.clone());
        leptos::task::spawn_local(async move {
            let result = crate::net::api::fetch_customers(&client).await;
            state.update(|s| s.apply_load(result));
        });
    }

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let fields = match validate_new_customer(&form.get()) {
            Ok(c) => c,
            Err(message) => {
                form_error.set(Some(message));
                return;
            }
        };
        form_error.set(None);
        let edited = editing.get_untracked().map(|id| edited_customer(id, fields.clone()));

        #[cfg(feature = "csr")]
        {
            let client = services.with_value(|s| s.client.clone());
            leptos::task::spawn_local(async move {
                let saved = match edited {
                    Some(customer) => {
                        let result = crate::net::api::update_customer(&client, &customer).await;
                        let ok = result.is_ok();
                        state.update(|s| s.apply_updated(result));
                        ok
                    }
                    None => {
                        let result = crate::net::api::create_customer(&client, &fields).await;
                        let ok = result.is_ok();
                        state.update(|s| s.apply_created(result));
                        ok
                    }
                };
                if saved {
                    form.set(CustomerForm::default());
                    editing.set(None);
                }
            });
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = (fields, edited);
        }
    };

    let on_edit = move |customer: Customer| {
        form.set(form_from(&customer));
        form_error.set(None);
        editing.set(Some(customer.id));
    };

    let on_cancel_edit = move |_| {
        form.set(CustomerForm::default());
        form_error.set(None);
        editing.set(None);
    };

    let on_delete = move |id: i64| {
        #[cfg(feature = "csr")]
        {
            let client = services.with_value(|s| s.client.clone());
            leptos::task::spawn_local(async move {
                let result = crate::net::api::delete_customer(&client, id).await;
                state.update(|s| s.apply_deleted(id, result));
            });
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = id;
        }
    };

    view! {
        <section class="customers">
            <h1>"Customers"</h1>
            <Show when=move || state.get().error.is_some()>
                <p class="banner banner--error">{move || state.get().error.unwrap_or_default()}</p>
            </Show>
            <Show when=move || state.get().loading>
                <p class="customers__loading">"Loading..."</p>
            </Show>
            <table class="customers__table">
                <thead>
                    <tr>
                        <th>"Name"</th>
                        <th>"Phone"</th>
                        <th>"Gender"</th>
                        <th>"Birth date"</th>
                        <th></th>
                    </tr>
                </thead>
                <tbody>
                    <For
                        each=move || state.get().items
                        key=|c| (c.id, c.full_name(), c.phone_number.clone(), c.gender, c.birth_date.clone())
                        children=move |c| {
                            let id = c.id;
                            let record = c.clone();
                            view! {
                                <tr>
                                    <td>{c.full_name()}</td>
                                    <td>{c.phone_number.clone()}</td>
                                    <td>{gender_label(c.gender)}</td>
                                    <td>{c.birth_date.clone()}</td>
                                    <td>
                                        <button class="customers__edit" on:click=move |_| on_edit(record.clone())>
                                            "Edit"
                                        </button>
                                        <button class="customers__delete" on:click=move |_| on_delete(id)>
                                            "Delete"
                                        </button>
                                    </td>
                                </tr>
                            }
                        }
                    />
                </tbody>
            </table>

            <form class="customers__form" on:submit=on_submit>
                <h2>{move || if editing.get().is_some() { "Edit customer" } else { "New customer" }}</h2>
                <input
                    placeholder="Last name"
                    prop:value=move || form.get().last_name
                    on:input=move |ev| form.update(|f| f.last_name = event_target_value(&ev))
                />
                <input
                    placeholder="First name"
                    prop:value=move || form.get().first_name
                    on:input=move |ev| form.update(|f| f.first_name = event_target_value(&ev))
                />
                <input
                    placeholder="Middle name"
                    prop:value=move || form.get().middle_name
                    on:input=move |ev| form.update(|f| f.middle_name = event_target_value(&ev))
                />
                <input
                    placeholder="Phone"
                    prop:value=move || form.get().phone_number
                    on:input=move |ev| form.update(|f| f.phone_number = event_target_value(&ev))
                />
                <label>
                    <input
                        type="checkbox"
                        prop:checked=move || form.get().male
                        on:change=move |ev| form.update(|f| f.male = event_target_checked(&ev))
                    />
                    "Male"
                </label>
                <input
                    type="date"
                    prop:value=move || form.get().birth_date
                    on:input=move |ev| form.update(|f| f.birth_date = event_target_value(&ev))
                />
                <button type="submit">{move || if editing.get().is_some() { "Save" } else { "Add" }}</button>
                <button type="button" hidden=move || editing.get().is_none() on:click=on_cancel_edit>
                    "Cancel"
                </button>
                <Show when=move || form_error.get().is_some()>
                    <p class="banner banner--error">{move || form_error.get().unwrap_or_default()}</p>
                </Show>
            </form>
        </section>
    }
}
