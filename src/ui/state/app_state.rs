use std::collections::BTreeMap;

use dioxus::prelude::{use_signal, Signal};

use crate::domain::entities::edit::CellAddress;
use crate::domain::entities::user::{UserAccount, UserQuery};
use crate::usecase::ports::save::SaveReceipt;
use crate::usecase::services::import_service::ImportSession;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Dashboard,
    Users,
    Import,
}

/// Every signal the shell needs, created once at the top of `App` and handed
/// down to the section views. Mutations to the category store and user list
/// always go through the domain/usecase surfaces; these signals only hold the
/// resulting snapshots plus transient view state.
pub struct AppState {
    pub active_tab: Signal<Tab>,
    pub status: Signal<String>,
    pub busy: Signal<bool>,

    // User listing
    pub users: Signal<Vec<UserAccount>>,
    pub user_query: Signal<UserQuery>,
    pub user_draft: Signal<Option<UserAccount>>,
    pub advanced_filters: Signal<bool>,

    // Import session
    pub session: Signal<Option<ImportSession>>,
    pub search_term: Signal<String>,
    pub active_category: Signal<Option<String>>,
    pub column_visibility: Signal<BTreeMap<String, bool>>,
    pub expanded_categories: Signal<BTreeMap<String, bool>>,
    pub editing_cell: Signal<Option<CellAddress>>,
    pub editing_value: Signal<String>,
    pub editing_header: Signal<Option<String>>,
    pub header_input: Signal<String>,
    pub show_new_category: Signal<bool>,
    pub new_category_name: Signal<String>,
    pub show_column_selector: Signal<bool>,
    pub show_summary: Signal<bool>,
    pub last_receipt: Signal<Option<SaveReceipt>>,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            active_tab: use_signal(|| Tab::Dashboard),
            status: use_signal(|| "Ready".to_string()),
            busy: use_signal(|| false),

            users: use_signal(Vec::<UserAccount>::new),
            user_query: use_signal(UserQuery::default),
            user_draft: use_signal(|| None::<UserAccount>),
            advanced_filters: use_signal(|| false),

            session: use_signal(|| None::<ImportSession>),
            search_term: use_signal(String::new),
            active_category: use_signal(|| None::<String>),
            column_visibility: use_signal(BTreeMap::<String, bool>::new),
            expanded_categories: use_signal(BTreeMap::<String, bool>::new),
            editing_cell: use_signal(|| None::<CellAddress>),
            editing_value: use_signal(String::new),
            editing_header: use_signal(|| None::<String>),
            header_input: use_signal(String::new),
            show_new_category: use_signal(|| false),
            new_category_name: use_signal(String::new),
            show_column_selector: use_signal(|| false),
            show_summary: use_signal(|| false),
            last_receipt: use_signal(|| None::<SaveReceipt>),
        }
    }
}
