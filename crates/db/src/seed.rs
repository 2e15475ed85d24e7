//! Idempotent default data.
//!
//! Inserts the country codes the apps ship with, one Terms of Service and one
//! Privacy Policy, and an initial API key. Rows that already exist (country
//! codes by code, policies by type, keys by digest) are left alone, so the
//! seed can run on every deploy.

use reporter_core::api_keys::{generate_api_key, hash_api_key};
use reporter_core::policy::PolicyType;

use crate::models::api_key::NewApiKey;
use crate::models::country_code::CreateCountryCode;
use crate::models::policy::CreatePolicy;
use crate::stores::{StoreResult, Stores};

/// `(code, country name)` pairs inserted by the seed.
pub const COUNTRY_CODES: &[(&str, &str)] = &[
    ("US", "United States"),
    ("CA", "Canada"),
    ("MX", "Mexico"),
    ("GB", "United Kingdom"),
    ("IE", "Ireland"),
    ("DE", "Germany"),
    ("AT", "Austria"),
    ("CH", "Switzerland"),
    ("FR", "France"),
    ("ES", "Spain"),
    ("IT", "Italy"),
    ("NL", "Netherlands"),
    ("BE", "Belgium"),
    ("SE", "Sweden"),
    ("NO", "Norway"),
    ("DK", "Denmark"),
    ("FI", "Finland"),
    ("PL", "Poland"),
    ("PT", "Portugal"),
    ("BR", "Brazil"),
    ("AR", "Argentina"),
    ("AU", "Australia"),
    ("NZ", "New Zealand"),
    ("JP", "Japan"),
    ("KR", "South Korea"),
    ("IN", "India"),
    ("ZA", "South Africa"),
];

pub const DEFAULT_APP_NAME: &str = "reporter-admin";

/// API key to install. When `plaintext` is `None` a key is generated, but
/// only if no key exists yet.
#[derive(Debug, Clone)]
pub struct SeedApiKey {
    pub app_name: String,
    pub plaintext: Option<String>,
}

/// What a seed run actually inserted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SeedReport {
    pub country_codes_created: usize,
    pub policies_created: usize,
    /// Plaintext of a newly inserted key. Shown once, never stored.
    pub api_key_created: Option<String>,
}

fn default_policy(policy_type: PolicyType) -> CreatePolicy {
    let (title, subtitle, text) = match policy_type {
        PolicyType::TermsOfService => (
            "Terms of Service",
            "Please read these terms before taking part",
            "By taking part in a study you agree to submit only content you own \
             and to follow the instructions given in each onboarding step.",
        ),
        PolicyType::PrivacyPolicy => (
            "Privacy Policy",
            "How we handle your data",
            "We store the answers you submit and the files you upload for the \
             duration of the study. You can ask for your data to be deleted at \
             any time.",
        ),
    };
    CreatePolicy {
        policy_type,
        title: title.to_string(),
        subtitle: subtitle.to_string(),
        text: text.to_string(),
    }
}

/// Insert everything that is missing.
pub async fn run(stores: &Stores, api_key: Option<&SeedApiKey>) -> StoreResult<SeedReport> {
    let mut report = SeedReport::default();

    for (code, country_name) in COUNTRY_CODES {
        if stores.country_codes.find_by_code(code).await?.is_some() {
            continue;
        }
        let input = CreateCountryCode {
            code: code.to_string(),
            country_name: country_name.to_string(),
        };
        stores.country_codes.create(&input, None).await?;
        report.country_codes_created += 1;
    }

    for policy_type in PolicyType::ALL {
        if !stores.policies.find_by_type(policy_type).await?.is_empty() {
            continue;
        }
        stores
            .policies
            .create(&default_policy(policy_type), None)
            .await?;
        report.policies_created += 1;
    }

    if let Some(seed) = api_key {
        report.api_key_created = seed_api_key(stores, seed).await?;
    }

    tracing::info!(
        country_codes = report.country_codes_created,
        policies = report.policies_created,
        api_key = report.api_key_created.is_some(),
        "Seed complete",
    );
    Ok(report)
}

async fn seed_api_key(stores: &Stores, seed: &SeedApiKey) -> StoreResult<Option<String>> {
    let plaintext = match &seed.plaintext {
        Some(plaintext) => {
            if stores
                .api_keys
                .find_by_hash(&hash_api_key(plaintext))
                .await?
                .is_some()
            {
                return Ok(None);
            }
            plaintext.clone()
        }
        None => {
            if !stores.api_keys.find().await?.is_empty() {
                return Ok(None);
            }
            generate_api_key()
        }
    };

    stores
        .api_keys
        .create(&NewApiKey {
            app_name: seed.app_name.clone(),
            key_hash: hash_api_key(&plaintext),
        })
        .await?;
    Ok(Some(plaintext))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::memory::MemoryStore;

    fn stores() -> Stores {
        Stores::in_memory(Arc::new(MemoryStore::new()))
    }

    #[tokio::test]
    async fn first_run_inserts_defaults() {
        let stores = stores();
        let report = run(&stores, None).await.unwrap();

        assert_eq!(report.country_codes_created, COUNTRY_CODES.len());
        assert_eq!(report.policies_created, 2);
        assert_eq!(report.api_key_created, None);
        assert_eq!(
            stores.policies.find_by_type(PolicyType::PrivacyPolicy).await.unwrap().len(),
            1
        );
    }

    #[tokio::test]
    async fn second_run_inserts_nothing() {
        let stores = stores();
        let seed = SeedApiKey {
            app_name: DEFAULT_APP_NAME.into(),
            plaintext: Some("fixed-key".into()),
        };
        run(&stores, Some(&seed)).await.unwrap();
        let again = run(&stores, Some(&seed)).await.unwrap();

        assert_eq!(again, SeedReport::default());
        assert_eq!(stores.country_codes.find().await.unwrap().len(), COUNTRY_CODES.len());
        assert_eq!(stores.api_keys.find().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn generated_key_is_only_created_once() {
        let stores = stores();
        let seed = SeedApiKey {
            app_name: DEFAULT_APP_NAME.into(),
            plaintext: None,
        };
        let first = run(&stores, Some(&seed)).await.unwrap();
        let plaintext = first.api_key_created.expect("key generated on first run");

        let stored = stores
            .api_keys
            .find_by_hash(&hash_api_key(&plaintext))
            .await
            .unwrap();
        assert!(stored.is_some());

        let second = run(&stores, Some(&seed)).await.unwrap();
        assert_eq!(second.api_key_created, None);
    }
}
