use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::domain::entities::category::{
    initial_visibility, remap_visibility, CategoryStore, UNCATEGORIZED,
};
use crate::domain::entities::cell::CellValue;
use crate::domain::entities::table::SheetTable;
use crate::domain::entities::user::{
    next_sort, BlockStatus, SortDirection, SortKey, SortSpec, UserAccount, UserQuery,
    BUSINESS_TYPES, COUNTRIES, TIER_OPTIONS,
};
use crate::infra::import::{parse_table, shape_table, ImportError};
use crate::infra::mock::users::load_users;
use crate::infra::save::log_sink::LogSink;
use crate::usecase::ports::save::InventorySink;
use crate::usecase::services::import_service::ImportService;
use crate::usecase::services::save_service::build_payload;
use crate::usecase::services::summary_service::summarize;
use crate::usecase::services::user_service::{query_users, save_user};

fn unique_test_dir(prefix: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock should be after epoch")
        .as_nanos();
    std::env::temp_dir().join(format!("bizstack-{prefix}-{nanos}"))
}

fn text(value: &str) -> CellValue {
    CellValue::text(value)
}

fn inventory_table() -> SheetTable {
    SheetTable {
        headers: vec![
            "ITEM_NAME".to_string(),
            "Category".to_string(),
            "Variant".to_string(),
            "PRICE".to_string(),
            "STOCK".to_string(),
            "TrackStock".to_string(),
        ],
        rows: vec![
            vec![
                text("Apple"),
                text("Fruit"),
                text("Red"),
                CellValue::Number(2.0),
                CellValue::Number(3.0),
                CellValue::Bool(true),
            ],
            vec![
                text("Banana"),
                text("Fruit"),
                CellValue::Empty,
                CellValue::Number(1.5),
                CellValue::Number(10.0),
                CellValue::Empty,
            ],
            vec![
                text("Wrench"),
                text("Tools"),
                CellValue::Empty,
                CellValue::Number(12.0),
                CellValue::Number(4.0),
                CellValue::Bool(false),
            ],
        ],
    }
}

// --- import: delimited files ---

#[test]
fn csv_import_parses_headers_and_rows() {
    let temp_dir = unique_test_dir("csv-basic");
    fs::create_dir_all(&temp_dir).expect("should create temp dir");
    let file = temp_dir.join("items.csv");
    fs::write(&file, "Name,Category,Price\nApple,Fruit,2\nHammer,Tools,9.5\n")
        .expect("should write csv fixture");

    let table = parse_table(&file).expect("csv import should succeed");

    assert_eq!(table.headers, vec!["Name", "Category", "Price"]);
    assert_eq!(table.rows.len(), 2);
    assert_eq!(table.rows[0][0], text("Apple"));
    assert_eq!(table.rows[1][2], text("9.5"));

    fs::remove_dir_all(&temp_dir).expect("should cleanup temp dir");
}

#[test]
fn tsv_import_uses_tab_delimiter() {
    let temp_dir = unique_test_dir("tsv-basic");
    fs::create_dir_all(&temp_dir).expect("should create temp dir");
    let file = temp_dir.join("items.tsv");
    fs::write(&file, "Name\tCategory\nApple\tFruit\n").expect("should write tsv fixture");

    let table = parse_table(&file).expect("tsv import should succeed");

    assert_eq!(table.headers, vec!["Name", "Category"]);
    assert_eq!(table.rows, vec![vec![text("Apple"), text("Fruit")]]);

    fs::remove_dir_all(&temp_dir).expect("should cleanup temp dir");
}

#[test]
fn csv_import_ragged_rows_are_padded_and_truncated() {
    let temp_dir = unique_test_dir("csv-ragged");
    fs::create_dir_all(&temp_dir).expect("should create temp dir");
    let file = temp_dir.join("ragged.csv");
    fs::write(&file, "A,B,C\nshort\none,two,three,extra\n").expect("should write csv fixture");

    let table = parse_table(&file).expect("ragged csv should still import");

    assert_eq!(
        table.rows[0],
        vec![text("short"), CellValue::Empty, CellValue::Empty]
    );
    assert_eq!(table.rows[1], vec![text("one"), text("two"), text("three")]);

    fs::remove_dir_all(&temp_dir).expect("should cleanup temp dir");
}

#[test]
fn import_rejects_file_with_no_data_rows() {
    let temp_dir = unique_test_dir("csv-empty");
    fs::create_dir_all(&temp_dir).expect("should create temp dir");

    let empty = temp_dir.join("empty.csv");
    fs::write(&empty, "").expect("should write empty fixture");
    assert_eq!(parse_table(&empty), Err(ImportError::EmptySheet));

    let header_only = temp_dir.join("header-only.csv");
    fs::write(&header_only, "Name,Category\n,\n  ,\n").expect("should write header-only fixture");
    assert_eq!(parse_table(&header_only), Err(ImportError::EmptySheet));

    fs::remove_dir_all(&temp_dir).expect("should cleanup temp dir");
}

#[test]
fn import_reports_decode_error_for_invalid_workbook() {
    let temp_dir = unique_test_dir("xlsx-broken");
    fs::create_dir_all(&temp_dir).expect("should create temp dir");
    let file = temp_dir.join("broken.xlsx");
    fs::write(&file, b"this is not a zip archive").expect("should write broken fixture");

    let result = parse_table(&file);

    assert!(
        matches!(result, Err(ImportError::Decode(_))),
        "invalid workbook should be a decode error: {result:?}"
    );

    fs::remove_dir_all(&temp_dir).expect("should cleanup temp dir");
}

#[test]
fn shape_table_fills_blank_headers_with_placeholders() {
    let raw = vec![
        vec![text("Name"), CellValue::Empty, text("  ")],
        vec![text("Apple"), text("x"), text("y")],
    ];

    let table = shape_table(raw).expect("shaping should succeed");

    assert_eq!(table.headers[0], "Name");
    for placeholder in &table.headers[1..] {
        assert!(
            placeholder.starts_with("Column") && placeholder.len() == "Column".len() + 5,
            "blank header should become a generated placeholder: {placeholder}"
        );
    }
    assert_ne!(table.headers[1], table.headers[2]);
}

#[test]
fn shape_table_assigns_placeholders_to_duplicate_headers() {
    let raw = vec![
        vec![text("Name"), text("Name"), text("Stock"), text(" Name ")],
        vec![text("a"), text("b"), text("c"), text("d")],
    ];

    let table = shape_table(raw).expect("shaping should succeed");

    assert_eq!(table.headers[0], "Name");
    assert_eq!(table.headers[2], "Stock");
    for repeat in [&table.headers[1], &table.headers[3]] {
        assert!(
            repeat.starts_with("Column"),
            "repeated header should become a generated placeholder: {repeat}"
        );
    }
    let mut unique: Vec<&String> = table.headers.iter().collect();
    unique.sort();
    unique.dedup();
    assert_eq!(unique.len(), table.headers.len(), "headers should be unique");
}

#[test]
fn shape_table_drops_fully_blank_rows_only() {
    let raw = vec![
        vec![text("Name"), text("Stock")],
        vec![CellValue::Empty, text("  ")],
        vec![text("Apple"), CellValue::Empty],
    ];

    let table = shape_table(raw).expect("shaping should succeed");

    assert_eq!(table.rows.len(), 1);
    assert_eq!(table.rows[0][0], text("Apple"));
}

#[test]
fn import_service_categorizes_and_names_the_session() {
    let temp_dir = unique_test_dir("import-session");
    fs::create_dir_all(&temp_dir).expect("should create temp dir");
    let file = temp_dir.join("stock list.csv");
    fs::write(
        &file,
        "ITEM_NAME,Category,PRICE\nApple,Fruit,2\nMystery,,1\nBanana,Fruit,1\n",
    )
    .expect("should write csv fixture");

    let session = ImportService::new()
        .import_file(&file)
        .expect("import should succeed");

    assert_eq!(session.file_name, "stock list.csv");
    let names: Vec<&str> = session
        .store
        .buckets()
        .iter()
        .map(|bucket| bucket.name.as_str())
        .collect();
    assert_eq!(names, vec!["Fruit", UNCATEGORIZED]);
    assert_eq!(
        session
            .store
            .bucket("Fruit")
            .expect("Fruit bucket should exist")
            .rows
            .len(),
        2
    );

    fs::remove_dir_all(&temp_dir).expect("should cleanup temp dir");
}

// --- category store ---

#[test]
fn categorize_groups_in_encounter_order() {
    let store = CategoryStore::categorize(&inventory_table());

    let names: Vec<&str> = store
        .buckets()
        .iter()
        .map(|bucket| bucket.name.as_str())
        .collect();
    assert_eq!(names, vec!["Fruit", "Tools"]);
    assert_eq!(store.total_rows(), 3);
}

#[test]
fn category_column_matches_case_insensitive_substring() {
    let store = CategoryStore::categorize(&SheetTable {
        headers: vec!["Name".to_string(), "product_category".to_string()],
        rows: vec![vec![text("Apple"), text("Fruit")]],
    });

    assert_eq!(store.category_column(), Some(1));
    assert!(store.bucket("Fruit").is_some());
}

#[test]
fn rows_without_category_column_land_in_uncategorized() {
    let store = CategoryStore::categorize(&SheetTable {
        headers: vec!["Name".to_string(), "Price".to_string()],
        rows: vec![vec![text("Apple"), text("2")]],
    });

    assert_eq!(store.buckets().len(), 1);
    assert_eq!(store.buckets()[0].name, UNCATEGORIZED);
}

#[test]
fn rename_header_propagates_to_all_rows() {
    let mut store = CategoryStore::categorize(&inventory_table());

    assert!(store.rename_header("PRICE", "UnitPrice"));
    assert_eq!(store.column_index("PRICE"), None);
    let idx = store
        .column_index("UnitPrice")
        .expect("renamed header should resolve");
    for bucket in store.buckets() {
        for row in &bucket.rows {
            assert!(row.get(idx).is_some(), "rows stay aligned after rename");
        }
    }
}

#[test]
fn rename_header_refuses_blank_and_missing() {
    let mut store = CategoryStore::categorize(&inventory_table());

    assert!(!store.rename_header("PRICE", "   "));
    assert!(!store.rename_header("NoSuchColumn", "Other"));
    assert!(!store.rename_header("PRICE", "PRICE"));
    assert_eq!(store.column_index("PRICE"), Some(3));
}

#[test]
fn rename_header_refuses_names_already_in_use() {
    let mut store = CategoryStore::categorize(&inventory_table());

    assert!(!store.rename_header("PRICE", "STOCK"));
    assert!(!store.rename_header("PRICE", " STOCK "));
    assert_eq!(store.column_index("PRICE"), Some(3));
    assert_eq!(store.column_index("STOCK"), Some(4));
}

#[test]
fn remap_visibility_follows_a_rename() {
    let mut visibility = BTreeMap::new();
    visibility.insert("PRICE".to_string(), false);

    remap_visibility(&mut visibility, "PRICE", "UnitPrice");

    assert_eq!(visibility.get("PRICE"), None);
    assert_eq!(visibility.get("UnitPrice"), Some(&false));
}

#[test]
fn initial_visibility_shows_every_header() {
    let visibility = initial_visibility(&["A".to_string(), "B".to_string()]);

    assert_eq!(visibility.len(), 2);
    assert!(visibility.values().all(|visible| *visible));
}

#[test]
fn edit_cell_replaces_value_and_ignores_bad_targets() {
    let mut store = CategoryStore::categorize(&inventory_table());

    store.edit_cell("Fruit", 0, "ITEM_NAME", text("Green Apple"));
    assert_eq!(store.buckets()[0].rows[0][0], text("Green Apple"));

    let before = store.clone();
    store.edit_cell("NoSuchCategory", 0, "ITEM_NAME", text("x"));
    store.edit_cell("Fruit", 99, "ITEM_NAME", text("x"));
    store.edit_cell("Fruit", 0, "NoSuchHeader", text("x"));
    assert_eq!(store, before, "bad targets should be silent no-ops");
}

#[test]
fn add_row_forces_the_category_column() {
    let mut store = CategoryStore::categorize(&inventory_table());

    store.add_row("Tools");

    let bucket = store.bucket("Tools").expect("Tools bucket should exist");
    let added = bucket.rows.last().expect("row should be appended");
    assert_eq!(added.len(), store.headers().len());
    assert_eq!(added[1], text("Tools"));
    assert_eq!(added[0], CellValue::Empty);
}

#[test]
fn add_row_creates_a_missing_bucket() {
    let mut store = CategoryStore::categorize(&inventory_table());

    store.add_row("Dairy");

    assert_eq!(
        store
            .bucket("Dairy")
            .expect("new bucket should exist")
            .rows
            .len(),
        1
    );
}

#[test]
fn add_variant_row_clones_and_clears_the_variant_field() {
    let mut store = CategoryStore::categorize(&inventory_table());

    store.add_variant_row("Fruit", 0);

    let bucket = store.bucket("Fruit").expect("Fruit bucket should exist");
    assert_eq!(bucket.rows.len(), 3);
    let variant = &bucket.rows[1];
    assert_eq!(variant[0], text("Apple"), "non-variant fields are copied");
    assert_eq!(variant[2], CellValue::Empty, "variant field is cleared");
    assert_eq!(bucket.rows[2][0], text("Banana"), "later rows shift down");
}

#[test]
fn remove_row_drops_bucket_when_last_row_goes() {
    let mut store = CategoryStore::categorize(&inventory_table());

    store.remove_row("Tools", 0);

    assert!(store.bucket("Tools").is_none());
    assert_eq!(store.buckets().len(), 1);

    store.remove_row("Fruit", 0);
    assert_eq!(
        store
            .bucket("Fruit")
            .expect("Fruit should survive with one row")
            .rows
            .len(),
        1
    );
}

#[test]
fn add_category_rejects_blank_and_duplicate_names() {
    let mut store = CategoryStore::categorize(&inventory_table());

    assert!(store.add_category("  Dairy "));
    assert!(store.bucket("Dairy").is_some(), "name should be trimmed");
    assert!(!store.add_category("Dairy"));
    assert!(!store.add_category("Fruit"));
    assert!(!store.add_category("   "));
    assert_eq!(store.buckets().len(), 3);
}

#[test]
fn toggle_flag_coerces_non_boolean_values() {
    let mut store = CategoryStore::categorize(&inventory_table());

    // true -> false
    store.toggle_flag("Fruit", 0, "TrackStock");
    assert_eq!(store.buckets()[0].rows[0][5], CellValue::Bool(false));

    // empty counts as false -> true
    store.toggle_flag("Fruit", 1, "TrackStock");
    assert_eq!(store.buckets()[0].rows[1][5], CellValue::Bool(true));

    // text counts as false -> true
    store.edit_cell("Fruit", 0, "TrackStock", text("yes"));
    store.toggle_flag("Fruit", 0, "TrackStock");
    assert_eq!(store.buckets()[0].rows[0][5], CellValue::Bool(true));
}

#[test]
fn filtered_with_empty_search_is_identity() {
    let store = CategoryStore::categorize(&inventory_table());

    assert_eq!(store.filtered("", None), store);
}

#[test]
fn filtered_matches_any_field_case_insensitively() {
    let store = CategoryStore::categorize(&inventory_table());

    let by_name = store.filtered("APPLE", None);
    assert_eq!(by_name.total_rows(), 1);
    assert_eq!(by_name.buckets()[0].rows[0][0], text("Apple"));

    // numbers match against their display form
    let by_price = store.filtered("12", None);
    assert_eq!(by_price.total_rows(), 1);
    assert_eq!(by_price.buckets()[0].name, "Tools");

    let nothing = store.filtered("zzz", None);
    assert!(nothing.is_empty(), "buckets with no matches are dropped");
}

#[test]
fn filtered_restricts_to_the_active_category_after_search() {
    let store = CategoryStore::categorize(&inventory_table());

    let active = store.filtered("", Some("Tools"));
    assert_eq!(active.buckets().len(), 1);
    assert_eq!(active.buckets()[0].name, "Tools");

    // search already removed every Tools row, so the restriction yields nothing
    let empty = store.filtered("Apple", Some("Tools"));
    assert!(empty.is_empty());
}

// --- summary ---

#[test]
fn summarize_totals_price_times_stock_per_category() {
    let store = CategoryStore::categorize(&inventory_table());

    let summary = summarize(&store);

    let fruit = summary
        .categories
        .iter()
        .find(|category| category.name == "Fruit")
        .expect("Fruit summary should exist");
    assert_eq!(fruit.item_count, 2);
    assert!((fruit.total_value - (2.0 * 3.0 + 1.5 * 10.0)).abs() < 1e-9);
    assert!((summary.total_value - (21.0 + 48.0)).abs() < 1e-9);
}

#[test]
fn summarize_treats_unparseable_numbers_as_zero() {
    let store = CategoryStore::categorize(&SheetTable {
        headers: vec![
            "ITEM_NAME".to_string(),
            "Category".to_string(),
            "PRICE".to_string(),
            "STOCK".to_string(),
        ],
        rows: vec![
            vec![text("Good"), text("A"), CellValue::Number(2.0), CellValue::Number(3.0)],
            vec![text("Bad"), text("A"), CellValue::Number(5.0), text("not a number")],
        ],
    });

    let summary = summarize(&store);

    assert!((summary.total_value - 6.0).abs() < 1e-9);
    assert_eq!(summary.top_stock.len(), 1, "zero stock rows are excluded");
    assert_eq!(summary.top_stock[0].name, "Good");
}

#[test]
fn summarize_resolves_fields_case_insensitively() {
    let store = CategoryStore::categorize(&SheetTable {
        headers: vec![
            "Item_Name".to_string(),
            "Category".to_string(),
            "Price".to_string(),
            "Stock".to_string(),
        ],
        rows: vec![vec![
            text("Apple"),
            text("Fruit"),
            text("2.5"),
            text("4"),
        ]],
    });

    let summary = summarize(&store);

    assert!((summary.total_value - 10.0).abs() < 1e-9);
    assert_eq!(summary.top_stock[0].name, "Apple");
}

#[test]
fn summarize_ranks_top_stock_and_truncates_long_names() {
    let mut rows = Vec::new();
    for stock in 1..=12 {
        rows.push(vec![
            text(&format!("Item number {stock:02} with long name")),
            text("Bulk"),
            CellValue::Number(1.0),
            CellValue::Number(stock as f64),
        ]);
    }
    rows.push(vec![
        CellValue::Empty,
        text("Bulk"),
        CellValue::Number(1.0),
        CellValue::Number(99.0),
    ]);
    let store = CategoryStore::categorize(&SheetTable {
        headers: vec![
            "ITEM_NAME".to_string(),
            "Category".to_string(),
            "PRICE".to_string(),
            "STOCK".to_string(),
        ],
        rows,
    });

    let summary = summarize(&store);

    assert_eq!(summary.top_stock.len(), 10);
    assert_eq!(summary.top_stock[0].name, "Unknown");
    assert!((summary.top_stock[0].stock - 99.0).abs() < 1e-9);
    assert!((summary.top_stock[1].stock - 12.0).abs() < 1e-9);
    assert_eq!(summary.top_stock[1].name, "Item number 12 ...");
}

// --- users ---

fn sample_users() -> Vec<UserAccount> {
    let base = |id: &str, username: &str, business: &str, country: &str| UserAccount {
        id: id.to_string(),
        username: username.to_string(),
        email: format!("{username}@example.com"),
        business_name: business.to_string(),
        mobile_no: "N/A".to_string(),
        country: country.to_string(),
        block_status: BlockStatus::Unblocked,
        tier: "Free".to_string(),
        business_type: "Retail".to_string(),
    };
    vec![
        base("u-1", "carol", "Carol Goods", "USA"),
        UserAccount {
            block_status: BlockStatus::Blocked,
            tier: "Premium".to_string(),
            business_type: "Wholesale".to_string(),
            ..base("u-2", "alice", "Alice Imports", "India")
        },
        base("u-3", "bob", "Bob Retail", "UK"),
    ]
}

#[test]
fn query_users_searches_name_email_and_business() {
    let users = sample_users();

    let by_name = query_users(
        &users,
        &UserQuery {
            search: "ALI".to_string(),
            ..UserQuery::default()
        },
    );
    assert_eq!(by_name.total_matched, 1);
    assert_eq!(by_name.users[0].username, "alice");

    let by_business = query_users(
        &users,
        &UserQuery {
            search: "retail".to_string(),
            ..UserQuery::default()
        },
    );
    assert_eq!(by_business.total_matched, 1);
    assert_eq!(by_business.users[0].username, "bob");
}

#[test]
fn query_users_stacks_categorical_filters() {
    let users = sample_users();

    let page = query_users(
        &users,
        &UserQuery {
            status: "Blocked".to_string(),
            tier: "Premium".to_string(),
            business_type: "Wholesale".to_string(),
            country: "india".to_string(),
            ..UserQuery::default()
        },
    );

    assert_eq!(page.total_matched, 1);
    assert_eq!(page.users[0].id, "u-2");

    let none = query_users(
        &users,
        &UserQuery {
            status: "Blocked".to_string(),
            tier: "Free".to_string(),
            ..UserQuery::default()
        },
    );
    assert_eq!(none.total_matched, 0);
    assert_eq!(none.total_pages, 1, "an empty result still has one page");
}

#[test]
fn next_sort_cycles_through_three_states() {
    let first = next_sort(None, SortKey::Name).expect("first click should sort");
    assert_eq!(first.direction, SortDirection::Asc);

    let second = next_sort(Some(first), SortKey::Name).expect("second click should flip");
    assert_eq!(second.direction, SortDirection::Desc);

    assert_eq!(next_sort(Some(second), SortKey::Name), None);

    // clicking a different column restarts at ascending
    let other = next_sort(Some(first), SortKey::Email).expect("new column should sort");
    assert_eq!(other.key, SortKey::Email);
    assert_eq!(other.direction, SortDirection::Asc);
}

#[test]
fn query_users_sorts_and_unsorted_keeps_input_order() {
    let users = sample_users();

    let asc = query_users(
        &users,
        &UserQuery {
            sort: Some(SortSpec {
                key: SortKey::Name,
                direction: SortDirection::Asc,
            }),
            ..UserQuery::default()
        },
    );
    let names: Vec<&str> = asc.users.iter().map(|user| user.username.as_str()).collect();
    assert_eq!(names, vec!["alice", "bob", "carol"]);

    let desc = query_users(
        &users,
        &UserQuery {
            sort: Some(SortSpec {
                key: SortKey::Name,
                direction: SortDirection::Desc,
            }),
            ..UserQuery::default()
        },
    );
    let names: Vec<&str> = desc.users.iter().map(|user| user.username.as_str()).collect();
    assert_eq!(names, vec!["carol", "bob", "alice"]);

    let unsorted = query_users(&users, &UserQuery::default());
    let names: Vec<&str> = unsorted
        .users
        .iter()
        .map(|user| user.username.as_str())
        .collect();
    assert_eq!(names, vec!["carol", "alice", "bob"]);
}

#[test]
fn query_users_compares_sort_fields_case_sensitively() {
    let mut users = sample_users();
    users[0].username = "Zed".to_string();

    let asc = query_users(
        &users,
        &UserQuery {
            sort: Some(SortSpec {
                key: SortKey::Name,
                direction: SortDirection::Asc,
            }),
            ..UserQuery::default()
        },
    );
    let names: Vec<&str> = asc.users.iter().map(|user| user.username.as_str()).collect();

    // upper-case orders before lower-case
    assert_eq!(names, vec!["Zed", "alice", "bob"]);
}

#[test]
fn query_users_paginates_and_clamps_the_page() {
    let users = sample_users();

    let page_one = query_users(
        &users,
        &UserQuery {
            page_size: 2,
            ..UserQuery::default()
        },
    );
    assert_eq!(page_one.users.len(), 2);
    assert_eq!(page_one.total_pages, 2);
    assert_eq!(page_one.page, 1);

    let page_two = query_users(
        &users,
        &UserQuery {
            page: 2,
            page_size: 2,
            ..UserQuery::default()
        },
    );
    assert_eq!(page_two.users.len(), 1);
    assert_eq!(page_two.users[0].username, "bob");

    let clamped = query_users(
        &users,
        &UserQuery {
            page: 99,
            page_size: 2,
            ..UserQuery::default()
        },
    );
    assert_eq!(clamped.page, 2, "out-of-range page lands on the last page");
}

#[test]
fn save_user_replaces_matching_id_only() {
    let mut users = sample_users();
    let mut updated = users[1].clone();
    updated.username = "alice.renamed".to_string();
    updated.block_status = BlockStatus::Unblocked;

    assert!(save_user(&mut users, &updated));
    assert_eq!(users[1].username, "alice.renamed");
    assert_eq!(users.len(), 3);

    let mut ghost = updated.clone();
    ghost.id = "u-404".to_string();
    assert!(!save_user(&mut users, &ghost));
}

#[test]
fn load_users_enriches_from_the_fixed_option_lists() {
    let users = load_users();

    assert_eq!(users.len(), 12);
    for user in &users {
        assert!(!user.country.is_empty());
        assert!(TIER_OPTIONS.contains(&user.tier.as_str()));
        assert!(BUSINESS_TYPES.contains(&user.business_type.as_str()));
    }

    // records with missing source fields fall back to N/A
    let no_accounts = users
        .iter()
        .find(|user| user.id == "u-1008")
        .expect("u-1008 should load");
    assert_eq!(no_accounts.business_name, "N/A");
    assert_eq!(no_accounts.mobile_no, "N/A");
    assert!(COUNTRIES.contains(&no_accounts.country.as_str()));

    let no_email = users
        .iter()
        .find(|user| user.id == "u-1009")
        .expect("u-1009 should load");
    assert_eq!(no_email.email, "N/A");

    let no_username = users
        .iter()
        .find(|user| user.id == "u-1010")
        .expect("u-1010 should load");
    assert_eq!(no_username.username, "N/A");
}

// --- save ---

#[test]
fn build_payload_keys_items_by_header() {
    let store = CategoryStore::categorize(&inventory_table());

    let payload = build_payload(&store);

    assert_eq!(payload.categories.len(), 2);
    assert_eq!(payload.categories[0].name, "Fruit");
    assert_eq!(payload.categories[0].items.len(), 2);

    let apple = &payload.categories[0].items[0];
    assert_eq!(apple["ITEM_NAME"], serde_json::json!("Apple"));
    assert_eq!(apple["PRICE"], serde_json::json!(2.0));
    assert_eq!(apple["TrackStock"], serde_json::json!(true));
    assert_eq!(apple["Variant"], serde_json::json!("Red"));
    assert!(apple["Variant"].is_string());

    let body = serde_json::to_string(&payload).expect("payload should serialize");
    assert!(body.starts_with(r#"{"categories":[{"name":"Fruit""#));
}

#[test]
fn log_sink_returns_a_receipt_with_counts() {
    let store = CategoryStore::categorize(&inventory_table());
    let sink = Arc::new(LogSink);

    let receipt = sink
        .submit(&build_payload(&store))
        .expect("logging sink should accept any payload");

    assert_eq!(receipt.categories, 2);
    assert_eq!(receipt.items, 3);
    assert!(!receipt.saved_at.is_empty());
}
