use crate::domain::entities::user::{SortDirection, UserAccount, UserPage, UserQuery};

/// Runs the listing pipeline: text filter, then each categorical filter, then
/// sort, then the pagination slice. Each step narrows the previous step's
/// output; the base list is never mutated.
pub fn query_users(users: &[UserAccount], query: &UserQuery) -> UserPage {
    let mut items: Vec<UserAccount> = users.to_vec();

    let search = query.search.trim().to_lowercase();
    if !search.is_empty() {
        items.retain(|user| {
            user.username.to_lowercase().contains(&search)
                || user.email.to_lowercase().contains(&search)
                || user.business_name.to_lowercase().contains(&search)
        });
    }

    if query.status != "All" {
        items.retain(|user| user.block_status.to_string() == query.status);
    }
    if query.business_type != "All" {
        items.retain(|user| user.business_type == query.business_type);
    }
    if query.tier != "All" {
        items.retain(|user| user.tier == query.tier);
    }
    if query.country != "All" {
        items.retain(|user| user.country.eq_ignore_ascii_case(&query.country));
    }

    if let Some(sort) = query.sort {
        items.sort_by(|a, b| {
            let ordering = sort.key.field(a).cmp(&sort.key.field(b));
            match sort.direction {
                SortDirection::Asc => ordering,
                SortDirection::Desc => ordering.reverse(),
            }
        });
    }

    let total_matched = items.len();
    let page_size = query.page_size.max(1);
    let total_pages = total_matched.div_ceil(page_size).max(1);
    let page = query.page.clamp(1, total_pages);
    let start = (page - 1) * page_size;
    let users = items
        .into_iter()
        .skip(start)
        .take(page_size)
        .collect();

    UserPage {
        users,
        total_matched,
        total_pages,
        page,
    }
}

/// Detail-modal save: replaces the record whose id matches. Returns whether a
/// record was replaced.
pub fn save_user(users: &mut [UserAccount], updated: &UserAccount) -> bool {
    match users.iter_mut().find(|user| user.id == updated.id) {
        Some(slot) => {
            *slot = updated.clone();
            true
        }
        None => false,
    }
}
