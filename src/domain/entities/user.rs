use std::fmt;

/// One row of the user-listing view. Fields not present in the mock source
/// (block status, tier, business type, sometimes country) are filled in by
/// the mock enrichment collaborator at load time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserAccount {
    pub id: String,
    pub username: String,
    pub email: String,
    pub business_name: String,
    pub mobile_no: String,
    pub country: String,
    pub block_status: BlockStatus,
    pub tier: String,
    pub business_type: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockStatus {
    Blocked,
    Unblocked,
}

impl fmt::Display for BlockStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BlockStatus::Blocked => write!(f, "Blocked"),
            BlockStatus::Unblocked => write!(f, "Unblocked"),
        }
    }
}

pub const STATUS_OPTIONS: [&str; 2] = ["Blocked", "Unblocked"];
pub const BUSINESS_TYPES: [&str; 5] = [
    "Retail",
    "Food Service",
    "Wholesale",
    "Manufacturing",
    "Services",
];
pub const TIER_OPTIONS: [&str; 5] = ["Free", "Basic", "Premium", "Pro", "Enterprise"];
pub const COUNTRIES: [&str; 8] = [
    "INDIA", "India", "USA", "UK", "Canada", "Australia", "N/A", "Downtown",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Name,
    BusinessName,
    Country,
    Status,
    Tier,
    Email,
}

impl SortKey {
    pub const ALL: [SortKey; 6] = [
        SortKey::Name,
        SortKey::BusinessName,
        SortKey::Country,
        SortKey::Status,
        SortKey::Tier,
        SortKey::Email,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            SortKey::Name => "Name",
            SortKey::BusinessName => "Business Name",
            SortKey::Country => "Country",
            SortKey::Status => "Status",
            SortKey::Tier => "Tier",
            SortKey::Email => "Email",
        }
    }

    /// Raw field value the sort compares. Comparison is case-sensitive, so
    /// upper-case values order before lower-case ones.
    pub fn field(&self, user: &UserAccount) -> String {
        match self {
            SortKey::Name => user.username.clone(),
            SortKey::BusinessName => user.business_name.clone(),
            SortKey::Country => user.country.clone(),
            SortKey::Status => user.block_status.to_string(),
            SortKey::Tier => user.tier.clone(),
            SortKey::Email => user.email.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortSpec {
    pub key: SortKey,
    pub direction: SortDirection,
}

/// Tri-state sort cycling: clicking a fresh column sorts ascending, a second
/// click flips to descending, a third returns to the unsorted input order.
pub fn next_sort(current: Option<SortSpec>, key: SortKey) -> Option<SortSpec> {
    match current {
        Some(spec) if spec.key == key => match spec.direction {
            SortDirection::Asc => Some(SortSpec {
                key,
                direction: SortDirection::Desc,
            }),
            SortDirection::Desc => None,
        },
        _ => Some(SortSpec {
            key,
            direction: SortDirection::Asc,
        }),
    }
}

/// Filter, sort, and pagination state for the user listing. All derived and
/// ephemeral; the query is re-run against the base list on every change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserQuery {
    pub search: String,
    pub status: String,
    pub business_type: String,
    pub tier: String,
    pub country: String,
    pub sort: Option<SortSpec>,
    pub page: usize,
    pub page_size: usize,
}

impl Default for UserQuery {
    fn default() -> Self {
        UserQuery {
            search: String::new(),
            status: "All".to_string(),
            business_type: "All".to_string(),
            tier: "All".to_string(),
            country: "All".to_string(),
            sort: None,
            page: 1,
            page_size: 15,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserPage {
    pub users: Vec<UserAccount>,
    pub total_matched: usize,
    pub total_pages: usize,
    pub page: usize,
}
