use std::collections::BTreeMap;

use rand::seq::SliceRandom;
use rand::Rng;
use serde::Deserialize;

use crate::domain::entities::user::{
    BlockStatus, UserAccount, BUSINESS_TYPES, COUNTRIES, TIER_OPTIONS,
};

const RAW_DIRECTORY: &str = include_str!("../../../assets/bizstack-users.json");

#[derive(Debug, Deserialize)]
struct RawDirectory {
    #[serde(rename = "Bizstack")]
    bizstack: BTreeMap<String, RawUser>,
}

#[derive(Debug, Deserialize)]
struct RawUser {
    username: Option<String>,
    email: Option<String>,
    #[serde(default)]
    accounts: Vec<RawAccount>,
}

#[derive(Debug, Deserialize)]
struct RawAccount {
    #[serde(rename = "businessName")]
    business_name: Option<String>,
    #[serde(rename = "mobileNo")]
    mobile_no: Option<String>,
    region_name: Option<String>,
    country: Option<String>,
}

/// Loads the embedded mock directory and enriches each record with the
/// attributes the real backend does not provide yet. The source is consumed
/// read-only; only the extracted list is ever mutated.
pub fn load_users() -> Vec<UserAccount> {
    let directory: RawDirectory = match serde_json::from_str(RAW_DIRECTORY) {
        Ok(directory) => directory,
        Err(err) => {
            tracing::error!(target: "bizstack::mock", %err, "embedded user data is malformed");
            return Vec::new();
        }
    };

    let mut rng = rand::thread_rng();
    directory
        .bizstack
        .into_iter()
        .map(|(id, user)| extract_user(id, user, &mut rng))
        .collect()
}

fn extract_user(id: String, user: RawUser, rng: &mut impl Rng) -> UserAccount {
    let account = user.accounts.into_iter().next();
    let (business_name, mobile_no, country) = match account {
        Some(account) => (
            account.business_name,
            account.mobile_no,
            account.region_name.or(account.country),
        ),
        None => (None, None, None),
    };

    let fallback = |value: Option<String>| {
        value
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| "N/A".to_string())
    };

    UserAccount {
        id,
        username: fallback(user.username),
        email: fallback(user.email),
        business_name: fallback(business_name),
        mobile_no: fallback(mobile_no),
        country: country
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| pick(&COUNTRIES, rng)),
        block_status: mock_block_status(rng),
        tier: pick(&TIER_OPTIONS, rng),
        business_type: pick(&BUSINESS_TYPES, rng),
    }
}

// Mock enrichment: these attributes are pseudorandom stand-ins, not real
// backend data. Swapping in an authoritative source replaces this section
// without touching the listing or filter logic.

fn mock_block_status(rng: &mut impl Rng) -> BlockStatus {
    if rng.gen_bool(0.5) {
        BlockStatus::Blocked
    } else {
        BlockStatus::Unblocked
    }
}

fn pick(options: &[&str], rng: &mut impl Rng) -> String {
    options
        .choose(rng)
        .copied()
        .unwrap_or("N/A")
        .to_string()
}
