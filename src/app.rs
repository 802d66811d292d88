use std::collections::BTreeMap;
use std::sync::Arc;

use dioxus::prelude::*;
use rfd::{FileDialog, MessageDialog, MessageLevel};

use crate::domain::entities::category::{initial_visibility, remap_visibility};
use crate::domain::entities::cell::CellValue;
use crate::domain::entities::edit::CellAddress;
use crate::domain::entities::user::{
    next_sort, BlockStatus, SortDirection, SortKey, UserAccount, UserQuery, BUSINESS_TYPES,
    COUNTRIES, STATUS_OPTIONS, TIER_OPTIONS,
};
use crate::infra::mock::users::load_users;
use crate::infra::save::log_sink::LogSink;
use crate::ui::state::app_state::{AppState, Tab};
use crate::usecase::ports::save::SaveReceipt;
use crate::usecase::services::import_service::{ImportService, ImportSession};
use crate::usecase::services::save_service::SaveService;
use crate::usecase::services::summary_service::summarize;
use crate::usecase::services::user_service::{query_users, save_user};

const ALL_OPTION: &str = "All";
const FLAG_HEADER: &str = "TrackStock";
const ROWS_PER_PAGE_OPTIONS: [usize; 5] = [5, 10, 15, 20, 50];

const PANEL_STYLE: &str =
    "border: 1px solid #ddd; border-radius: 8px; background: #fff; margin-bottom: 16px;";
const OVERLAY_STYLE: &str = "position: fixed; inset: 0; background: rgba(0,0,0,0.35); display: flex; align-items: center; justify-content: center; z-index: 1200;";
const DIALOG_STYLE: &str = "background: #fff; padding: 16px; border: 1px solid #999; border-radius: 8px; min-width: 360px; max-width: 720px; max-height: 80vh; overflow: auto;";
const TH_STYLE: &str = "border: 1px solid #bbb; background: #eef3fb; padding: 6px; text-align: left; white-space: nowrap;";
const TD_STYLE: &str = "border: 1px solid #bbb; padding: 4px 6px;";

fn alert(title: &str, description: &str) {
    MessageDialog::new()
        .set_level(MessageLevel::Error)
        .set_title(title)
        .set_description(description)
        .show();
}

#[component]
pub fn App() -> Element {
    let AppState {
        mut active_tab,
        mut status,
        busy,
        mut users,
        user_query,
        user_draft,
        advanced_filters,
        session,
        search_term,
        active_category,
        column_visibility,
        expanded_categories,
        editing_cell,
        editing_value,
        editing_header,
        header_input,
        show_new_category,
        new_category_name,
        show_column_selector,
        show_summary,
        last_receipt,
    } = AppState::new();

    use_effect(move || {
        let loaded = load_users();
        *status.write() = format!("Loaded {} users", loaded.len());
        *users.write() = loaded;
    });

    let tab = active_tab();

    rsx! {
        div {
            style: "font-family: system-ui, sans-serif; color: #222; padding: 12px; background: #f5f5f7; min-height: 100vh;",
            nav {
                style: "display: flex; gap: 12px; align-items: center; flex-wrap: wrap; padding: 8px 0; border-bottom: 1px solid #ddd; margin-bottom: 16px;",
                span { style: "font-size: 18px; font-weight: 700; margin-right: 12px;", "BizStack" }
                for (target, label) in [
                    (Tab::Dashboard, "Dashboard"),
                    (Tab::Users, "Users"),
                    (Tab::Import, "Import"),
                ] {
                    button {
                        style: if tab == target {
                            "border: none; background: #2563eb; color: #fff; padding: 6px 14px; border-radius: 6px; cursor: pointer;"
                        } else {
                            "border: 1px solid #bbb; background: #fff; padding: 6px 14px; border-radius: 6px; cursor: pointer;"
                        },
                        onclick: move |_| active_tab.set(target),
                        "{label}"
                    }
                }
                span { style: "margin-left: auto; color: #666; font-size: 13px;", "{status}" }
            }

            if tab == Tab::Dashboard {
                DashboardView { active_tab, users, session }
            }
            if tab == Tab::Users {
                UsersView { users, user_query, user_draft, advanced_filters, status }
            }
            if tab == Tab::Import {
                ImportView {
                    session,
                    search_term,
                    active_category,
                    column_visibility,
                    expanded_categories,
                    editing_cell,
                    editing_value,
                    editing_header,
                    header_input,
                    show_new_category,
                    new_category_name,
                    show_column_selector,
                    show_summary,
                    last_receipt,
                    status,
                    busy,
                }
            }
        }
    }
}

#[component]
fn DashboardView(
    mut active_tab: Signal<Tab>,
    users: Signal<Vec<UserAccount>>,
    session: Signal<Option<ImportSession>>,
) -> Element {
    let user_count = users().len();
    let session_snapshot = session();

    rsx! {
        section { style: "margin-bottom: 24px;",
            h1 { style: "margin: 0 0 4px; font-size: 24px;", "Welcome back" }
            p { style: "color: #666; margin: 0;", "Here's an overview of your inventory management system." }
        }
        div {
            style: "display: grid; grid-template-columns: repeat(auto-fit, minmax(260px, 1fr)); gap: 16px;",
            div { style: PANEL_STYLE,
                div { style: "padding: 12px 16px; background: #f0f0f2; font-weight: 600;", "Import Inventory" }
                div { style: "padding: 16px;",
                    p { style: "color: #666;", "Import your inventory data from Excel spreadsheets to quickly update your system." }
                    button {
                        style: "border: none; background: #2563eb; color: #fff; padding: 6px 14px; border-radius: 6px; cursor: pointer;",
                        onclick: move |_| active_tab.set(Tab::Import),
                        "Import file"
                    }
                }
            }
            div { style: PANEL_STYLE,
                div { style: "padding: 12px 16px; background: #f0f0f2; font-weight: 600;", "User Management" }
                div { style: "padding: 16px;",
                    p { style: "color: #666;", "{user_count} registered users" }
                    button {
                        style: "border: none; background: #2563eb; color: #fff; padding: 6px 14px; border-radius: 6px; cursor: pointer;",
                        onclick: move |_| active_tab.set(Tab::Users),
                        "Manage users"
                    }
                }
            }
            div { style: PANEL_STYLE,
                div { style: "padding: 12px 16px; background: #f0f0f2; font-weight: 600;", "Current Session" }
                div { style: "padding: 16px;",
                    if let Some(current) = session_snapshot {
                        p { style: "color: #666;",
                            "{current.file_name}: {current.store.buckets().len()} categories, {current.store.total_rows()} items"
                        }
                    } else {
                        p { style: "color: #666;", "No import in progress." }
                    }
                }
            }
        }
    }
}

#[component]
fn UsersView(
    users: Signal<Vec<UserAccount>>,
    mut user_query: Signal<UserQuery>,
    mut user_draft: Signal<Option<UserAccount>>,
    mut advanced_filters: Signal<bool>,
    status: Signal<String>,
) -> Element {
    let query = user_query();
    let page = query_users(&users(), &query);
    let showing_advanced = advanced_filters();
    let draft_snapshot = user_draft();

    let status_options: Vec<String> = std::iter::once(ALL_OPTION.to_string())
        .chain(STATUS_OPTIONS.iter().map(|s| s.to_string()))
        .collect();

    rsx! {
        div {
            style: "display: flex; gap: 12px; align-items: flex-end; flex-wrap: wrap; margin-bottom: 12px;",
            div { style: "flex: 1; min-width: 240px;",
                div { style: "font-size: 13px; font-weight: 600; margin-bottom: 4px;", "Search" }
                input {
                    style: "width: 100%; padding: 6px 8px; border: 1px solid #bbb; border-radius: 6px;",
                    placeholder: "Search by name, email, or business name...",
                    value: "{query.search}",
                    oninput: move |event| {
                        let mut query = user_query.write();
                        query.search = event.value();
                        query.page = 1;
                    },
                }
            }
            div {
                div { style: "font-size: 13px; font-weight: 600; margin-bottom: 4px;", "Status" }
                select {
                    style: "padding: 6px 8px; border: 1px solid #bbb; border-radius: 6px;",
                    value: "{query.status}",
                    onchange: move |event| {
                        let mut query = user_query.write();
                        query.status = event.value();
                        query.page = 1;
                    },
                    for option in status_options {
                        option { value: "{option}", "{option}" }
                    }
                }
            }
            button {
                style: "border: 1px solid #bbb; background: #fff; padding: 6px 14px; border-radius: 6px; cursor: pointer;",
                onclick: move |_| {
                    let next = !advanced_filters();
                    advanced_filters.set(next);
                },
                if showing_advanced { "Hide Filters" } else { "Advanced Filters" }
            }
        }

        if showing_advanced {
            div {
                style: "display: flex; gap: 12px; flex-wrap: wrap; align-items: flex-end; padding: 12px; background: #eee; border-radius: 8px; margin-bottom: 12px;",
                FilterSelect {
                    label: "Business Type",
                    options: BUSINESS_TYPES.to_vec(),
                    selected: query.business_type.clone(),
                    on_select: move |value| {
                        let mut query = user_query.write();
                        query.business_type = value;
                        query.page = 1;
                    },
                }
                FilterSelect {
                    label: "Tier",
                    options: TIER_OPTIONS.to_vec(),
                    selected: query.tier.clone(),
                    on_select: move |value| {
                        let mut query = user_query.write();
                        query.tier = value;
                        query.page = 1;
                    },
                }
                FilterSelect {
                    label: "Country",
                    options: COUNTRIES.to_vec(),
                    selected: query.country.clone(),
                    on_select: move |value| {
                        let mut query = user_query.write();
                        query.country = value;
                        query.page = 1;
                    },
                }
                button {
                    style: "border: none; background: #dc2626; color: #fff; padding: 6px 14px; border-radius: 6px; cursor: pointer;",
                    onclick: move |_| {
                        user_query.set(UserQuery::default());
                    },
                    "Clear All Filters"
                }
            }
        }

        div {
            style: "display: flex; justify-content: space-between; align-items: center; margin-bottom: 8px; color: #666; font-size: 13px;",
            span { "Total {page.total_matched} users" }
            label {
                "Rows per page: "
                select {
                    value: "{query.page_size}",
                    onchange: move |event| {
                        let size = event.value().parse::<usize>().unwrap_or(15);
                        let mut query = user_query.write();
                        query.page_size = size;
                        query.page = 1;
                    },
                    for option in ROWS_PER_PAGE_OPTIONS {
                        option { value: "{option}", "{option}" }
                    }
                }
            }
        }

        div { style: PANEL_STYLE,
            table { style: "border-collapse: collapse; width: 100%;",
                thead {
                    tr {
                        for key in SortKey::ALL {
                            th {
                                style: "{TH_STYLE} cursor: pointer;",
                                onclick: move |_| {
                                    let mut query = user_query.write();
                                    query.sort = next_sort(query.sort, key);
                                    query.page = 1;
                                },
                                "{key.label()}"
                                if let Some(sort) = query.sort {
                                    if sort.key == key {
                                        span { style: "margin-left: 4px; color: #2563eb;",
                                            if sort.direction == SortDirection::Asc { "▲" } else { "▼" }
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
                tbody {
                    if page.users.is_empty() {
                        tr {
                            td {
                                style: "{TD_STYLE} text-align: center; color: #666; padding: 24px;",
                                colspan: "6",
                                "No users found matching your filters."
                            }
                        }
                    }
                    {page.users.iter().map(|user| {
                        let row = user.clone();
                        let row_for_click = user.clone();
                        rsx!(
                            tr {
                                style: "cursor: pointer;",
                                onclick: move |_| {
                                    user_draft.set(Some(row_for_click.clone()));
                                },
                                td { style: TD_STYLE,
                                    div { style: "font-weight: 600;", "{row.username}" }
                                    div { style: "color: #666; font-size: 12px;", "{row.email}" }
                                }
                                td { style: TD_STYLE, "{row.business_name}" }
                                td { style: TD_STYLE, "{row.country}" }
                                td { style: TD_STYLE,
                                    span {
                                        style: if row.block_status == BlockStatus::Blocked {
                                            "color: #b91c1c; background: #fee2e2; padding: 2px 8px; border-radius: 10px; font-size: 12px;"
                                        } else {
                                            "color: #166534; background: #dcfce7; padding: 2px 8px; border-radius: 10px; font-size: 12px;"
                                        },
                                        "{row.block_status}"
                                    }
                                }
                                td { style: TD_STYLE, "{row.tier}" }
                                td { style: TD_STYLE, "{row.email}" }
                            }
                        )
                    })}
                }
            }
        }

        div {
            style: "display: flex; justify-content: space-between; align-items: center; padding: 8px 0;",
            span { style: "color: #666; font-size: 13px;", "Page {page.page} of {page.total_pages}" }
            div { style: "display: flex; gap: 8px;",
                button {
                    style: "border: 1px solid #bbb; background: #fff; padding: 4px 12px; border-radius: 6px; cursor: pointer;",
                    disabled: page.page <= 1,
                    onclick: move |_| {
                        let mut query = user_query.write();
                        query.page = query.page.saturating_sub(1).max(1);
                    },
                    "Previous"
                }
                button {
                    style: "border: 1px solid #bbb; background: #fff; padding: 4px 12px; border-radius: 6px; cursor: pointer;",
                    disabled: page.page >= page.total_pages,
                    onclick: move |_| {
                        let mut query = user_query.write();
                        query.page += 1;
                    },
                    "Next"
                }
            }
        }

        if let Some(draft) = draft_snapshot {
            UserDetailDialog { users, user_draft, status, draft }
        }
    }
}

#[component]
fn FilterSelect(
    label: &'static str,
    options: Vec<&'static str>,
    selected: String,
    on_select: EventHandler<String>,
) -> Element {
    rsx! {
        div {
            div { style: "font-size: 13px; font-weight: 600; margin-bottom: 4px;", "{label}" }
            select {
                style: "padding: 6px 8px; border: 1px solid #bbb; border-radius: 6px;",
                value: "{selected}",
                onchange: move |event| on_select.call(event.value()),
                option { value: "{ALL_OPTION}", "{ALL_OPTION}" }
                for option in options {
                    option { value: "{option}", "{option}" }
                }
            }
        }
    }
}

#[component]
fn UserDetailDialog(
    mut users: Signal<Vec<UserAccount>>,
    mut user_draft: Signal<Option<UserAccount>>,
    mut status: Signal<String>,
    draft: UserAccount,
) -> Element {
    let is_unblocked = draft.block_status == BlockStatus::Unblocked;

    rsx! {
        div { style: OVERLAY_STYLE,
            div { style: DIALOG_STYLE,
                div { style: "font-size: 18px; font-weight: 700; margin-bottom: 12px;", "User Details" }
                div { style: "display: grid; grid-template-columns: 1fr 1fr; gap: 12px;",
                    label {
                        div { style: "font-size: 13px; font-weight: 600;", "Username" }
                        input {
                            style: "width: 100%; padding: 6px 8px; border: 1px solid #bbb; border-radius: 6px;",
                            value: "{draft.username}",
                            oninput: move |event| {
                                if let Some(draft) = user_draft.write().as_mut() {
                                    draft.username = event.value();
                                }
                            },
                        }
                    }
                    label {
                        div { style: "font-size: 13px; font-weight: 600;", "Email" }
                        input {
                            style: "width: 100%; padding: 6px 8px; border: 1px solid #bbb; border-radius: 6px;",
                            value: "{draft.email}",
                            oninput: move |event| {
                                if let Some(draft) = user_draft.write().as_mut() {
                                    draft.email = event.value();
                                }
                            },
                        }
                    }
                    label {
                        div { style: "font-size: 13px; font-weight: 600;", "Business Name" }
                        input {
                            style: "width: 100%; padding: 6px 8px; border: 1px solid #bbb; border-radius: 6px;",
                            value: "{draft.business_name}",
                            oninput: move |event| {
                                if let Some(draft) = user_draft.write().as_mut() {
                                    draft.business_name = event.value();
                                }
                            },
                        }
                    }
                    label {
                        div { style: "font-size: 13px; font-weight: 600;", "Business Type" }
                        select {
                            style: "width: 100%; padding: 6px 8px; border: 1px solid #bbb; border-radius: 6px;",
                            value: "{draft.business_type}",
                            onchange: move |event| {
                                if let Some(draft) = user_draft.write().as_mut() {
                                    draft.business_type = event.value();
                                }
                            },
                            for option in BUSINESS_TYPES {
                                option { value: "{option}", "{option}" }
                            }
                        }
                    }
                    label {
                        div { style: "font-size: 13px; font-weight: 600;", "Country" }
                        select {
                            style: "width: 100%; padding: 6px 8px; border: 1px solid #bbb; border-radius: 6px;",
                            value: "{draft.country}",
                            onchange: move |event| {
                                if let Some(draft) = user_draft.write().as_mut() {
                                    draft.country = event.value();
                                }
                            },
                            for option in COUNTRIES {
                                option { value: "{option}", "{option}" }
                            }
                        }
                    }
                    label {
                        div { style: "font-size: 13px; font-weight: 600;", "Tier" }
                        select {
                            style: "width: 100%; padding: 6px 8px; border: 1px solid #bbb; border-radius: 6px;",
                            value: "{draft.tier}",
                            onchange: move |event| {
                                if let Some(draft) = user_draft.write().as_mut() {
                                    draft.tier = event.value();
                                }
                            },
                            for option in TIER_OPTIONS {
                                option { value: "{option}", "{option}" }
                            }
                        }
                    }
                }
                label {
                    style: "display: flex; align-items: center; gap: 8px; margin-top: 12px; cursor: pointer;",
                    input {
                        r#type: "checkbox",
                        checked: is_unblocked,
                        onchange: move |_| {
                            if let Some(draft) = user_draft.write().as_mut() {
                                draft.block_status =
                                    if draft.block_status == BlockStatus::Unblocked {
                                        BlockStatus::Blocked
                                    } else {
                                        BlockStatus::Unblocked
                                    };
                            }
                        },
                    }
                    if is_unblocked {
                        span { "User is Unblocked" }
                    } else {
                        span { style: "color: #b91c1c; font-weight: 600;", "User is Blocked" }
                    }
                }
                div { style: "display: flex; justify-content: flex-end; gap: 8px; margin-top: 16px;",
                    button {
                        style: "border: 1px solid #bbb; background: #fff; padding: 6px 14px; border-radius: 6px; cursor: pointer;",
                        onclick: move |_| user_draft.set(None),
                        "Cancel"
                    }
                    button {
                        style: "border: none; background: #2563eb; color: #fff; padding: 6px 14px; border-radius: 6px; cursor: pointer;",
                        onclick: move |_| {
                            let Some(updated) = user_draft() else {
                                return;
                            };
                            if save_user(&mut users.write(), &updated) {
                                *status.write() = format!("Saved changes for {}", updated.username);
                            } else {
                                *status.write() = "User no longer exists".to_string();
                            }
                            user_draft.set(None);
                        },
                        "Save Changes"
                    }
                }
            }
        }
    }
}

#[component]
fn ImportView(
    mut session: Signal<Option<ImportSession>>,
    mut search_term: Signal<String>,
    mut active_category: Signal<Option<String>>,
    mut column_visibility: Signal<BTreeMap<String, bool>>,
    mut expanded_categories: Signal<BTreeMap<String, bool>>,
    mut editing_cell: Signal<Option<CellAddress>>,
    mut editing_value: Signal<String>,
    mut editing_header: Signal<Option<String>>,
    mut header_input: Signal<String>,
    mut show_new_category: Signal<bool>,
    mut new_category_name: Signal<String>,
    mut show_column_selector: Signal<bool>,
    mut show_summary: Signal<bool>,
    mut last_receipt: Signal<Option<SaveReceipt>>,
    mut status: Signal<String>,
    mut busy: Signal<bool>,
) -> Element {
    let session_snapshot = session();

    let mut reset_session = move || {
        session.set(None);
        search_term.set(String::new());
        active_category.set(None);
        column_visibility.set(BTreeMap::new());
        expanded_categories.set(BTreeMap::new());
        editing_cell.set(None);
        editing_value.set(String::new());
        editing_header.set(None);
        show_new_category.set(false);
        show_column_selector.set(false);
        show_summary.set(false);
    };

    let Some(current) = session_snapshot else {
        return rsx! {
            div { style: PANEL_STYLE,
                div { style: "padding: 12px 16px; background: #f0f0f2; font-weight: 600;", "Upload Data File" }
                div {
                    style: "padding: 32px; display: flex; flex-direction: column; align-items: center; gap: 8px;",
                    p { style: "color: #666; margin: 0;", "Excel, CSV, or TSV" }
                    button {
                        style: "border: none; background: #2563eb; color: #fff; padding: 8px 18px; border-radius: 6px; cursor: pointer;",
                        disabled: busy(),
                        onclick: move |_| {
                            if busy() {
                                return;
                            }
                            let Some(file_path) = FileDialog::new()
                                .add_filter("Data files", &["csv", "tsv", "xlsx", "xls", "txt"])
                                .pick_file() else {
                                *status.write() = "Import cancelled".to_string();
                                return;
                            };

                            *busy.write() = true;
                            *status.write() = format!("Importing {}", file_path.display());

                            match ImportService::new().import_file(&file_path) {
                                Ok(imported) => {
                                    let headers = imported.store.headers().to_vec();
                                    column_visibility.set(initial_visibility(&headers));
                                    expanded_categories.set(
                                        imported
                                            .store
                                            .buckets()
                                            .iter()
                                            .map(|bucket| (bucket.name.clone(), true))
                                            .collect(),
                                    );
                                    search_term.set(String::new());
                                    active_category.set(None);
                                    editing_cell.set(None);
                                    *status.write() = format!(
                                        "Imported {} ({} items in {} categories)",
                                        imported.file_name,
                                        imported.store.total_rows(),
                                        imported.store.buckets().len()
                                    );
                                    session.set(Some(imported));
                                }
                                Err(err) => {
                                    alert("Import failed", &err.to_string());
                                    *status.write() = format!("Import failed: {err}");
                                }
                            }

                            *busy.write() = false;
                        },
                        "Choose File"
                    }
                }
            }
        };
    };

    let headers = current.store.headers().to_vec();
    let visibility_snapshot = column_visibility();
    let visible_headers: Vec<String> = headers
        .iter()
        .filter(|header| visibility_snapshot.get(*header).copied().unwrap_or(true))
        .cloned()
        .collect();
    let category_names: Vec<String> = current
        .store
        .buckets()
        .iter()
        .map(|bucket| bucket.name.clone())
        .collect();
    let active = active_category();
    let filtered = current
        .store
        .filtered(&search_term(), active.as_deref());
    let expanded_snapshot = expanded_categories();
    let editing_snapshot = editing_cell();
    let summary = if show_summary() {
        Some(summarize(&current.store))
    } else {
        None
    };

    rsx! {
        div {
            style: "display: flex; justify-content: space-between; align-items: center; margin-bottom: 12px;",
            div { style: "display: flex; align-items: center; gap: 8px;",
                button {
                    style: "border: 1px solid #bbb; background: #fff; padding: 4px 10px; border-radius: 6px; cursor: pointer;",
                    onclick: move |_| reset_session(),
                    "← Back"
                }
                span { style: "font-weight: 600;", "Edit: {current.file_name}" }
            }
            div { style: "display: flex; gap: 8px;",
                button {
                    style: "border: 1px solid #bbb; background: #fff; padding: 4px 12px; border-radius: 6px; cursor: pointer;",
                    onclick: move |_| show_summary.set(true),
                    "View Summary"
                }
                button {
                    style: "border: none; background: #16a34a; color: #fff; padding: 4px 14px; border-radius: 6px; cursor: pointer;",
                    onclick: move |_| {
                        let Some(current) = session() else {
                            return;
                        };
                        let save_service = SaveService::new(Arc::new(LogSink));
                        match save_service.save_inventory(&current.store) {
                            Ok(receipt) => {
                                *status.write() = format!(
                                    "Saved {} categories ({} items)",
                                    receipt.categories, receipt.items
                                );
                                last_receipt.set(Some(receipt));
                            }
                            Err(err) => {
                                alert("Save failed", &err.to_string());
                                *status.write() = format!("Save failed: {err}");
                            }
                        }
                    },
                    "Save"
                }
            }
        }

        div {
            style: "display: flex; gap: 16px; flex-wrap: wrap; align-items: flex-end; margin-bottom: 12px;",
            div { style: "flex: 2; min-width: 260px;",
                div { style: "font-size: 13px; font-weight: 600; margin-bottom: 4px;", "Filter Category" }
                div { style: "display: flex; gap: 6px; flex-wrap: wrap;",
                    button {
                        style: if active.is_none() {
                            "border: none; background: #2563eb; color: #fff; padding: 4px 12px; border-radius: 12px; cursor: pointer;"
                        } else {
                            "border: 1px solid #bbb; background: #fff; padding: 4px 12px; border-radius: 12px; cursor: pointer;"
                        },
                        onclick: move |_| active_category.set(None),
                        "All"
                    }
                    {category_names.iter().map(|name| {
                        let chip_name = name.clone();
                        let is_active = active.as_deref() == Some(name.as_str());
                        let label = name.clone();
                        rsx!(
                            button {
                                style: if is_active {
                                    "border: none; background: #2563eb; color: #fff; padding: 4px 12px; border-radius: 12px; cursor: pointer;"
                                } else {
                                    "border: 1px solid #bbb; background: #fff; padding: 4px 12px; border-radius: 12px; cursor: pointer;"
                                },
                                onclick: move |_| active_category.set(Some(chip_name.clone())),
                                "{label}"
                            }
                        )
                    })}
                }
            }
            div { style: "flex: 1; min-width: 200px;",
                div { style: "font-size: 13px; font-weight: 600; margin-bottom: 4px;", "Search Items" }
                input {
                    style: "width: 100%; padding: 6px 8px; border: 1px solid #bbb; border-radius: 6px;",
                    placeholder: "Type to search items...",
                    value: "{search_term}",
                    oninput: move |event| search_term.set(event.value()),
                }
            }
            div { style: "display: flex; gap: 8px;",
                button {
                    style: "border: 1px solid #bbb; background: #fff; padding: 6px 12px; border-radius: 6px; cursor: pointer;",
                    onclick: move |_| {
                        let next = !show_column_selector();
                        show_column_selector.set(next);
                    },
                    "Column Visibility"
                }
                button {
                    style: "border: none; background: #2563eb; color: #fff; padding: 6px 12px; border-radius: 6px; cursor: pointer;",
                    onclick: move |_| {
                        new_category_name.set(String::new());
                        show_new_category.set(true);
                    },
                    "Add Category"
                }
            }
        }

        if show_column_selector() {
            div {
                style: "border: 1px solid #bbb; border-radius: 8px; background: #fff; padding: 8px; margin-bottom: 12px; max-width: 360px;",
                {headers.iter().map(|header| {
                    let name = header.clone();
                    let name_for_toggle = header.clone();
                    let name_for_rename = header.clone();
                    let checked = visibility_snapshot.get(header).copied().unwrap_or(true);
                    rsx!(
                        div {
                            style: "display: flex; align-items: center; gap: 8px; padding: 4px 2px;",
                            input {
                                r#type: "checkbox",
                                checked: checked,
                                onclick: move |_| {
                                    column_visibility
                                        .write()
                                        .insert(name_for_toggle.clone(), !checked);
                                },
                            }
                            span { style: "flex: 1;", "{name}" }
                            button {
                                style: "border: 1px solid #bbb; background: #fff; padding: 2px 8px; border-radius: 6px; cursor: pointer; font-size: 12px;",
                                onclick: move |_| {
                                    header_input.set(name_for_rename.clone());
                                    editing_header.set(Some(name_for_rename.clone()));
                                },
                                "Rename"
                            }
                        }
                    )
                })}
            }
        }

        if filtered.is_empty() {
            div {
                style: "padding: 32px; text-align: center; background: #fff; border: 1px solid #ddd; border-radius: 8px; color: #666;",
                if search_term().is_empty() {
                    "No items found in the selected category."
                } else {
                    "No matching items found. Try a different search term."
                }
            }
        }

        {filtered.buckets().iter().map(|bucket| {
            let category = bucket.name.clone();
            let category_for_toggle = category.clone();
            let category_for_add = category.clone();
            let category_for_remove = category.clone();
            let item_count = bucket.rows.len();
            let is_expanded = expanded_snapshot.get(&category).copied().unwrap_or(true);
            rsx!(
                div { style: PANEL_STYLE,
                    div {
                        style: "display: flex; justify-content: space-between; align-items: center; padding: 10px 14px; background: #f0f0f2; border-bottom: 1px solid #ddd;",
                        div {
                            style: "display: flex; align-items: center; gap: 8px; cursor: pointer;",
                            onclick: move |_| {
                                let mut expanded = expanded_categories.write();
                                let next = !expanded.get(&category_for_toggle).copied().unwrap_or(true);
                                expanded.insert(category_for_toggle.clone(), next);
                            },
                            span { if is_expanded { "▾" } else { "▸" } }
                            span { style: "font-weight: 600;", "Category: {bucket.name}" }
                            span {
                                style: "background: #ddd; border-radius: 10px; padding: 2px 8px; font-size: 12px;",
                                "{item_count} items"
                            }
                        }
                        div { style: "display: flex; gap: 8px;",
                            button {
                                style: "border: none; background: #2563eb; color: #fff; padding: 4px 10px; border-radius: 6px; cursor: pointer; font-size: 13px;",
                                onclick: move |_| {
                                    if let Some(current) = session.write().as_mut() {
                                        current.store.add_row(&category_for_add);
                                    }
                                },
                                "Add Item"
                            }
                            button {
                                style: "border: 1px solid #dc2626; color: #dc2626; background: #fff; padding: 4px 10px; border-radius: 6px; cursor: pointer; font-size: 13px;",
                                onclick: move |_| {
                                    if let Some(current) = session.write().as_mut() {
                                        current.store.remove_category(&category_for_remove);
                                    }
                                },
                                "Remove"
                            }
                        }
                    }
                    if is_expanded {
                        div { style: "overflow-x: auto;",
                            table { style: "border-collapse: collapse; width: 100%;",
                                thead {
                                    tr {
                                        for header in visible_headers.clone() {
                                            th { style: TH_STYLE, "{header}" }
                                        }
                                        th { style: "{TH_STYLE} text-align: right;", "Actions" }
                                    }
                                }
                                tbody {
                                    {bucket.rows.iter().enumerate().map(|(row_idx, row)| {
                                        let category_for_row = bucket.name.clone();
                                        rsx!(
                                            tr {
                                                {visible_headers.iter().map(|header| {
                                                    let header = header.clone();
                                                    let category_for_cell = category_for_row.clone();
                                                    let cell = current
                                                        .store
                                                        .column_index(&header)
                                                        .and_then(|idx| row.get(idx))
                                                        .cloned()
                                                        .unwrap_or(CellValue::Empty);
                                                    let address = CellAddress {
                                                        category: category_for_cell.clone(),
                                                        row_idx,
                                                        header: header.clone(),
                                                    };
                                                    let is_editing = editing_snapshot.as_ref() == Some(&address);
                                                    if header == FLAG_HEADER {
                                                        let flagged = cell.is_true();
                                                        rsx!(
                                                            td { style: "{TD_STYLE} text-align: center;",
                                                                input {
                                                                    r#type: "checkbox",
                                                                    checked: flagged,
                                                                    onclick: move |_| {
                                                                        if let Some(current) = session.write().as_mut() {
                                                                            current.store.toggle_flag(
                                                                                &address.category,
                                                                                address.row_idx,
                                                                                &address.header,
                                                                            );
                                                                        }
                                                                    },
                                                                }
                                                            }
                                                        )
                                                    } else if is_editing {
                                                        rsx!(
                                                            td { style: TD_STYLE,
                                                                input {
                                                                    style: "width: 100%; padding: 2px 4px;",
                                                                    value: "{editing_value}",
                                                                    oninput: move |event| editing_value.set(event.value()),
                                                                    onkeydown: move |event| {
                                                                        if event.key() == Key::Enter {
                                                                            let next_value = editing_value();
                                                                            if let Some(current) = session.write().as_mut() {
                                                                                current.store.edit_cell(
                                                                                    &address.category,
                                                                                    address.row_idx,
                                                                                    &address.header,
                                                                                    if next_value.is_empty() {
                                                                                        CellValue::Empty
                                                                                    } else {
                                                                                        CellValue::text(next_value.clone())
                                                                                    },
                                                                                );
                                                                            }
                                                                            editing_cell.set(None);
                                                                            editing_value.set(String::new());
                                                                        } else if event.key() == Key::Escape {
                                                                            editing_cell.set(None);
                                                                            editing_value.set(String::new());
                                                                        }
                                                                    },
                                                                }
                                                            }
                                                        )
                                                    } else {
                                                        let display = cell.to_string();
                                                        let shown = if display.is_empty() { "-".to_string() } else { display.clone() };
                                                        rsx!(
                                                            td {
                                                                style: "{TD_STYLE} cursor: pointer;",
                                                                ondoubleclick: move |_| {
                                                                    editing_value.set(display.clone());
                                                                    editing_cell.set(Some(address.clone()));
                                                                },
                                                                "{shown}"
                                                            }
                                                        )
                                                    }
                                                })}
                                                td { style: "{TD_STYLE} text-align: right; white-space: nowrap;",
                                                    {
                                                        let category_for_variant = category_for_row.clone();
                                                        let category_for_delete = category_for_row.clone();
                                                        rsx!(
                                                            button {
                                                                style: "border: 1px solid #2563eb; color: #2563eb; background: #fff; padding: 2px 8px; border-radius: 6px; cursor: pointer; font-size: 12px; margin-right: 6px;",
                                                                title: "Add Variant",
                                                                onclick: move |_| {
                                                                    if let Some(current) = session.write().as_mut() {
                                                                        current.store.add_variant_row(&category_for_variant, row_idx);
                                                                    }
                                                                },
                                                                "+"
                                                            }
                                                            button {
                                                                style: "border: 1px solid #dc2626; color: #dc2626; background: #fff; padding: 2px 8px; border-radius: 6px; cursor: pointer; font-size: 12px;",
                                                                title: "Remove Item",
                                                                onclick: move |_| {
                                                                    if let Some(current) = session.write().as_mut() {
                                                                        current.store.remove_row(&category_for_delete, row_idx);
                                                                    }
                                                                },
                                                                "✕"
                                                            }
                                                        )
                                                    }
                                                }
                                            }
                                        )
                                    })}
                                }
                            }
                        }
                    }
                }
            )
        })}

        if show_new_category() {
            div { style: OVERLAY_STYLE,
                div { style: DIALOG_STYLE,
                    div { style: "font-weight: 700; margin-bottom: 8px;", "Add New Category" }
                    input {
                        style: "width: 100%; padding: 6px 8px; border: 1px solid #bbb; border-radius: 6px;",
                        placeholder: "Enter category name",
                        value: "{new_category_name}",
                        oninput: move |event| new_category_name.set(event.value()),
                    }
                    div { style: "display: flex; justify-content: flex-end; gap: 8px; margin-top: 12px;",
                        button {
                            style: "border: 1px solid #bbb; background: #fff; padding: 6px 14px; border-radius: 6px; cursor: pointer;",
                            onclick: move |_| show_new_category.set(false),
                            "Cancel"
                        }
                        button {
                            style: "border: none; background: #2563eb; color: #fff; padding: 6px 14px; border-radius: 6px; cursor: pointer;",
                            onclick: move |_| {
                                let name = new_category_name();
                                let created = match session.write().as_mut() {
                                    Some(current) => current.store.add_category(&name),
                                    None => false,
                                };
                                if created {
                                    expanded_categories
                                        .write()
                                        .insert(name.trim().to_string(), true);
                                    new_category_name.set(String::new());
                                    show_new_category.set(false);
                                    *status.write() = format!("Added category {}", name.trim());
                                } else {
                                    *status.write() =
                                        "Category name must be unique and non-empty".to_string();
                                }
                            },
                            "Create"
                        }
                    }
                }
            }
        }

        if let Some(old_header) = editing_header() {
            div { style: OVERLAY_STYLE,
                div { style: DIALOG_STYLE,
                    div { style: "font-weight: 700; margin-bottom: 8px;", "Edit Column Header" }
                    input {
                        style: "width: 100%; padding: 6px 8px; border: 1px solid #bbb; border-radius: 6px;",
                        placeholder: "Enter header name",
                        value: "{header_input}",
                        oninput: move |event| header_input.set(event.value()),
                    }
                    div { style: "display: flex; justify-content: flex-end; gap: 8px; margin-top: 12px;",
                        button {
                            style: "border: 1px solid #bbb; background: #fff; padding: 6px 14px; border-radius: 6px; cursor: pointer;",
                            onclick: move |_| editing_header.set(None),
                            "Cancel"
                        }
                        button {
                            style: "border: none; background: #2563eb; color: #fff; padding: 6px 14px; border-radius: 6px; cursor: pointer;",
                            onclick: move |_| {
                                let new_header = header_input().trim().to_string();
                                let renamed = match session.write().as_mut() {
                                    Some(current) => {
                                        current.store.rename_header(&old_header, &new_header)
                                    }
                                    None => false,
                                };
                                if renamed {
                                    remap_visibility(
                                        &mut column_visibility.write(),
                                        &old_header,
                                        &new_header,
                                    );
                                    *status.write() =
                                        format!("Renamed {old_header} to {new_header}");
                                    editing_header.set(None);
                                } else {
                                    *status.write() =
                                        "Header name must be unique and non-empty".to_string();
                                }
                            },
                            "Save"
                        }
                    }
                }
            }
        }

        if let Some(report) = summary {
            div { style: OVERLAY_STYLE,
                div { style: DIALOG_STYLE,
                    div { style: "font-size: 18px; font-weight: 700; margin-bottom: 12px;", "Inventory Dashboard" }
                    div { style: "margin-bottom: 6px; font-weight: 600;", "Items per Category" }
                    table { style: "border-collapse: collapse; width: 100%; margin-bottom: 16px;",
                        thead {
                            tr {
                                th { style: TH_STYLE, "Category" }
                                th { style: TH_STYLE, "Items" }
                                th { style: TH_STYLE, "Total Value" }
                            }
                        }
                        tbody {
                            {report.categories.iter().map(|category| {
                                let value = format!("${:.2}", category.total_value);
                                rsx!(
                                    tr {
                                        td { style: TD_STYLE, "{category.name}" }
                                        td { style: TD_STYLE, "{category.item_count}" }
                                        td { style: TD_STYLE, "{value}" }
                                    }
                                )
                            })}
                        }
                    }
                    div { style: "margin-bottom: 6px; font-weight: 600;",
                        {format!("Total Value: ${:.2}", report.total_value)}
                    }
                    div { style: "margin: 12px 0 6px; font-weight: 600;", "Top 10 Items by Stock Level" }
                    if report.top_stock.is_empty() {
                        div { style: "color: #666;", "No stock level data available" }
                    }
                    {report.top_stock.iter().map(|item| {
                        let stock = CellValue::Number(item.stock).to_string();
                        rsx!(
                            div { style: "display: flex; justify-content: space-between; padding: 2px 0;",
                                span { "{item.name} ({item.category})" }
                                span { "{stock}" }
                            }
                        )
                    })}
                    div { style: "display: flex; justify-content: flex-end; margin-top: 12px;",
                        button {
                            style: "border: none; background: #2563eb; color: #fff; padding: 6px 14px; border-radius: 6px; cursor: pointer;",
                            onclick: move |_| show_summary.set(false),
                            "Close"
                        }
                    }
                }
            }
        }

        if let Some(receipt) = last_receipt() {
            div { style: OVERLAY_STYLE,
                div { style: DIALOG_STYLE,
                    div { style: "font-size: 18px; font-weight: 700; margin-bottom: 8px;", "Inventory Saved" }
                    p { style: "color: #666;",
                        "Saved {receipt.categories} categories with {receipt.items} items at {receipt.saved_at}."
                    }
                    div { style: "display: flex; justify-content: flex-end; margin-top: 12px;",
                        button {
                            style: "border: none; background: #16a34a; color: #fff; padding: 6px 14px; border-radius: 6px; cursor: pointer;",
                            onclick: move |_| {
                                last_receipt.set(None);
                                reset_session();
                            },
                            "Done"
                        }
                    }
                }
            }
        }
    }
}
