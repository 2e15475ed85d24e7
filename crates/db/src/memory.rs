//! In-memory implementation of every store trait.
//!
//! Rows live in insertion-ordered vectors behind one `RwLock`, so `find`
//! returns creation order exactly like the `ORDER BY created_at` queries.
//! Removal mirrors the schema's `ON DELETE` rules:
//!
//! - removing an API key clears `created_by` / `updated_by` wherever it appears
//! - removing a step, country code or policy drops it from every join list
//! - removing a form or onboarding clears the reference that pointed at it
//!
//! Unique constraints are not emulated; callers check for duplicates first.

use async_trait::async_trait;
use chrono::Utc;
use reporter_core::policy::PolicyType;
use reporter_core::types::DbId;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::models::api_key::{ApiKey, NewApiKey};
use crate::models::country_code::{CountryCode, CreateCountryCode};
use crate::models::form::{Form, NewForm};
use crate::models::onboarding::{NewOnboarding, Onboarding, OnboardingRow};
use crate::models::onboarding_step::{CreateOnboardingStep, OnboardingStep};
use crate::models::policy::{CreatePolicy, Policy};
use crate::models::study::{NewStudy, Study, StudyRow};
use crate::stores::{
    ApiKeyStore, CountryCodeStore, FormStore, HealthStore, OnboardingStepStore, OnboardingStore,
    PolicyStore, StoreResult, StudyStore,
};

struct OnboardingRecord {
    row: OnboardingRow,
    step_ids: Vec<DbId>,
}

struct StudyRecord {
    row: StudyRow,
    country_code_ids: Vec<DbId>,
    policy_ids: Vec<DbId>,
}

#[derive(Default)]
struct Tables {
    api_keys: Vec<ApiKey>,
    country_codes: Vec<CountryCode>,
    policies: Vec<Policy>,
    steps: Vec<OnboardingStep>,
    forms: Vec<Form>,
    onboardings: Vec<OnboardingRecord>,
    studies: Vec<StudyRecord>,
}

/// Clear audit references to a removed API key.
macro_rules! clear_audit {
    ($rows:expr, $key:expr) => {
        for row in $rows {
            if row.created_by == Some($key) {
                row.created_by = None;
            }
            if row.updated_by == Some($key) {
                row.updated_by = None;
            }
        }
    };
}

impl Tables {
    fn onboarding(&self, record: &OnboardingRecord) -> Onboarding {
        let steps = record
            .step_ids
            .iter()
            .filter_map(|id| self.steps.iter().find(|step| step.id == *id).cloned())
            .collect();
        let form = record
            .row
            .form_id
            .and_then(|id| self.forms.iter().find(|form| form.id == id).cloned());
        record.row.clone().into_onboarding(steps, form)
    }

    fn study(&self, record: &StudyRecord) -> Study {
        let country_codes = record
            .country_code_ids
            .iter()
            .filter_map(|id| self.country_codes.iter().find(|c| c.id == *id).cloned())
            .collect();
        let policies = record
            .policy_ids
            .iter()
            .filter_map(|id| self.policies.iter().find(|p| p.id == *id).cloned())
            .collect();
        let onboarding = record.row.onboarding_id.and_then(|id| {
            self.onboardings
                .iter()
                .find(|o| o.row.id == id)
                .map(|o| self.onboarding(o))
        });
        record.row.clone().into_study(country_codes, policies, onboarding)
    }
}

/// Position of the row with `id`, or `RowNotFound`.
fn position<T>(rows: &[T], id: DbId, key: impl Fn(&T) -> DbId) -> StoreResult<usize> {
    rows.iter()
        .position(|row| key(row) == id)
        .ok_or(sqlx::Error::RowNotFound)
}

/// Thread-safe in-memory store; wrap in `Arc` and hand to
/// [`crate::stores::Stores::in_memory`].
#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl HealthStore for MemoryStore {
    async fn ping(&self) -> StoreResult<()> {
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// API keys
// ---------------------------------------------------------------------------

#[async_trait]
impl ApiKeyStore for MemoryStore {
    async fn create(&self, input: &NewApiKey) -> StoreResult<ApiKey> {
        let now = Utc::now();
        let key = ApiKey {
            id: Uuid::new_v4(),
            app_name: input.app_name.clone(),
            key_hash: input.key_hash.clone(),
            created_at: now,
            updated_at: now,
        };
        self.tables.write().await.api_keys.push(key.clone());
        Ok(key)
    }

    async fn find(&self) -> StoreResult<Vec<ApiKey>> {
        Ok(self.tables.read().await.api_keys.clone())
    }

    async fn find_by_hash(&self, key_hash: &str) -> StoreResult<Option<ApiKey>> {
        let tables = self.tables.read().await;
        Ok(tables
            .api_keys
            .iter()
            .find(|key| key.key_hash == key_hash)
            .cloned())
    }

    async fn remove(&self, entity: &ApiKey) -> StoreResult<ApiKey> {
        let mut tables = self.tables.write().await;
        let index = position(&tables.api_keys, entity.id, |k| k.id)?;
        let removed = tables.api_keys.remove(index);

        clear_audit!(tables.country_codes.iter_mut(), removed.id);
        clear_audit!(tables.policies.iter_mut(), removed.id);
        clear_audit!(tables.steps.iter_mut(), removed.id);
        clear_audit!(tables.forms.iter_mut(), removed.id);
        clear_audit!(tables.onboardings.iter_mut().map(|o| &mut o.row), removed.id);
        clear_audit!(tables.studies.iter_mut().map(|s| &mut s.row), removed.id);
        Ok(removed)
    }
}

// ---------------------------------------------------------------------------
// Country codes
// ---------------------------------------------------------------------------

#[async_trait]
impl CountryCodeStore for MemoryStore {
    async fn create(
        &self,
        input: &CreateCountryCode,
        created_by: Option<DbId>,
    ) -> StoreResult<CountryCode> {
        let now = Utc::now();
        let code = CountryCode {
            id: Uuid::new_v4(),
            code: input.code.clone(),
            country_name: input.country_name.clone(),
            created_by,
            updated_by: created_by,
            created_at: now,
            updated_at: now,
        };
        self.tables.write().await.country_codes.push(code.clone());
        Ok(code)
    }

    async fn find(&self) -> StoreResult<Vec<CountryCode>> {
        Ok(self.tables.read().await.country_codes.clone())
    }

    async fn find_by_ids(&self, ids: &[DbId]) -> StoreResult<Vec<CountryCode>> {
        let tables = self.tables.read().await;
        Ok(tables
            .country_codes
            .iter()
            .filter(|c| ids.contains(&c.id))
            .cloned()
            .collect())
    }

    async fn find_one(&self, id: DbId) -> StoreResult<Option<CountryCode>> {
        let tables = self.tables.read().await;
        Ok(tables.country_codes.iter().find(|c| c.id == id).cloned())
    }

    async fn find_by_code(&self, code: &str) -> StoreResult<Option<CountryCode>> {
        let tables = self.tables.read().await;
        Ok(tables.country_codes.iter().find(|c| c.code == code).cloned())
    }

    async fn save(&self, entity: &CountryCode) -> StoreResult<CountryCode> {
        let mut tables = self.tables.write().await;
        let index = position(&tables.country_codes, entity.id, |c| c.id)?;
        let stored = &mut tables.country_codes[index];
        stored.code = entity.code.clone();
        stored.country_name = entity.country_name.clone();
        stored.updated_by = entity.updated_by;
        stored.updated_at = Utc::now();
        Ok(stored.clone())
    }

    async fn remove(&self, entity: &CountryCode) -> StoreResult<CountryCode> {
        let mut tables = self.tables.write().await;
        let index = position(&tables.country_codes, entity.id, |c| c.id)?;
        let removed = tables.country_codes.remove(index);
        for study in &mut tables.studies {
            study.country_code_ids.retain(|id| *id != removed.id);
        }
        Ok(removed)
    }
}

// ---------------------------------------------------------------------------
// Policies
// ---------------------------------------------------------------------------

#[async_trait]
impl PolicyStore for MemoryStore {
    async fn create(&self, input: &CreatePolicy, created_by: Option<DbId>) -> StoreResult<Policy> {
        let now = Utc::now();
        let policy = Policy {
            id: Uuid::new_v4(),
            policy_type: input.policy_type,
            title: input.title.clone(),
            subtitle: input.subtitle.clone(),
            text: input.text.clone(),
            created_by,
            updated_by: created_by,
            created_at: now,
            updated_at: now,
        };
        self.tables.write().await.policies.push(policy.clone());
        Ok(policy)
    }

    async fn find(&self) -> StoreResult<Vec<Policy>> {
        Ok(self.tables.read().await.policies.clone())
    }

    async fn find_by_type(&self, policy_type: PolicyType) -> StoreResult<Vec<Policy>> {
        let tables = self.tables.read().await;
        Ok(tables
            .policies
            .iter()
            .filter(|p| p.policy_type == policy_type)
            .cloned()
            .collect())
    }

    async fn find_by_ids(&self, ids: &[DbId]) -> StoreResult<Vec<Policy>> {
        let tables = self.tables.read().await;
        Ok(tables
            .policies
            .iter()
            .filter(|p| ids.contains(&p.id))
            .cloned()
            .collect())
    }

    async fn find_one(&self, id: DbId) -> StoreResult<Option<Policy>> {
        let tables = self.tables.read().await;
        Ok(tables.policies.iter().find(|p| p.id == id).cloned())
    }

    async fn save(&self, entity: &Policy) -> StoreResult<Policy> {
        let mut tables = self.tables.write().await;
        let index = position(&tables.policies, entity.id, |p| p.id)?;
        let stored = &mut tables.policies[index];
        stored.policy_type = entity.policy_type;
        stored.title = entity.title.clone();
        stored.subtitle = entity.subtitle.clone();
        stored.text = entity.text.clone();
        stored.updated_by = entity.updated_by;
        stored.updated_at = Utc::now();
        Ok(stored.clone())
    }

    async fn remove(&self, entity: &Policy) -> StoreResult<Policy> {
        let mut tables = self.tables.write().await;
        let index = position(&tables.policies, entity.id, |p| p.id)?;
        let removed = tables.policies.remove(index);
        for study in &mut tables.studies {
            study.policy_ids.retain(|id| *id != removed.id);
        }
        Ok(removed)
    }
}

// ---------------------------------------------------------------------------
// Onboarding steps
// ---------------------------------------------------------------------------

#[async_trait]
impl OnboardingStepStore for MemoryStore {
    async fn create(
        &self,
        input: &CreateOnboardingStep,
        created_by: Option<DbId>,
    ) -> StoreResult<OnboardingStep> {
        let now = Utc::now();
        let step = OnboardingStep {
            id: Uuid::new_v4(),
            title: input.title.clone(),
            subtitle: input.subtitle.clone(),
            description: input.description.clone(),
            image_url: input.image_url.clone(),
            details: input.details.clone(),
            order: input.order,
            platform: input.platform,
            created_by,
            updated_by: created_by,
            created_at: now,
            updated_at: now,
        };
        self.tables.write().await.steps.push(step.clone());
        Ok(step)
    }

    async fn find(&self) -> StoreResult<Vec<OnboardingStep>> {
        Ok(self.tables.read().await.steps.clone())
    }

    async fn find_by_ids(&self, ids: &[DbId]) -> StoreResult<Vec<OnboardingStep>> {
        let tables = self.tables.read().await;
        Ok(tables
            .steps
            .iter()
            .filter(|s| ids.contains(&s.id))
            .cloned()
            .collect())
    }

    async fn find_one(&self, id: DbId) -> StoreResult<Option<OnboardingStep>> {
        let tables = self.tables.read().await;
        Ok(tables.steps.iter().find(|s| s.id == id).cloned())
    }

    async fn save(&self, entity: &OnboardingStep) -> StoreResult<OnboardingStep> {
        let mut tables = self.tables.write().await;
        let index = position(&tables.steps, entity.id, |s| s.id)?;
        let stored = &mut tables.steps[index];
        let created_by = stored.created_by;
        let created_at = stored.created_at;
        *stored = OnboardingStep {
            created_by,
            created_at,
            updated_at: Utc::now(),
            ..entity.clone()
        };
        Ok(stored.clone())
    }

    async fn remove(&self, entity: &OnboardingStep) -> StoreResult<OnboardingStep> {
        let mut tables = self.tables.write().await;
        let index = position(&tables.steps, entity.id, |s| s.id)?;
        let removed = tables.steps.remove(index);
        for onboarding in &mut tables.onboardings {
            onboarding.step_ids.retain(|id| *id != removed.id);
        }
        Ok(removed)
    }
}

// ---------------------------------------------------------------------------
// Forms
// ---------------------------------------------------------------------------

#[async_trait]
impl FormStore for MemoryStore {
    async fn create(&self, input: &NewForm) -> StoreResult<Form> {
        let now = Utc::now();
        let form = Form {
            id: Uuid::new_v4(),
            name: input.name.clone(),
            fields: input.fields.clone(),
            created_by: input.created_by,
            updated_by: input.created_by,
            created_at: now,
            updated_at: now,
        };
        self.tables.write().await.forms.push(form.clone());
        Ok(form)
    }

    async fn find(&self) -> StoreResult<Vec<Form>> {
        Ok(self.tables.read().await.forms.clone())
    }

    async fn find_one(&self, id: DbId) -> StoreResult<Option<Form>> {
        let tables = self.tables.read().await;
        Ok(tables.forms.iter().find(|f| f.id == id).cloned())
    }

    async fn save(&self, entity: &Form) -> StoreResult<Form> {
        let mut tables = self.tables.write().await;
        let index = position(&tables.forms, entity.id, |f| f.id)?;
        let stored = &mut tables.forms[index];
        stored.name = entity.name.clone();
        stored.fields = entity.fields.clone();
        stored.updated_by = entity.updated_by;
        stored.updated_at = Utc::now();
        Ok(stored.clone())
    }

    async fn remove(&self, entity: &Form) -> StoreResult<Form> {
        let mut tables = self.tables.write().await;
        let index = position(&tables.forms, entity.id, |f| f.id)?;
        let removed = tables.forms.remove(index);
        for onboarding in &mut tables.onboardings {
            if onboarding.row.form_id == Some(removed.id) {
                onboarding.row.form_id = None;
            }
        }
        Ok(removed)
    }
}

// ---------------------------------------------------------------------------
// Onboardings
// ---------------------------------------------------------------------------

#[async_trait]
impl OnboardingStore for MemoryStore {
    async fn create(&self, input: &NewOnboarding) -> StoreResult<Onboarding> {
        let now = Utc::now();
        let record = OnboardingRecord {
            row: OnboardingRow {
                id: Uuid::new_v4(),
                name: input.name.clone(),
                form_id: input.form_id,
                created_by: input.created_by,
                updated_by: input.created_by,
                created_at: now,
                updated_at: now,
            },
            step_ids: input.step_ids.clone(),
        };
        let mut tables = self.tables.write().await;
        let onboarding = tables.onboarding(&record);
        tables.onboardings.push(record);
        Ok(onboarding)
    }

    async fn find(&self) -> StoreResult<Vec<Onboarding>> {
        let tables = self.tables.read().await;
        Ok(tables.onboardings.iter().map(|o| tables.onboarding(o)).collect())
    }

    async fn find_one(&self, id: DbId) -> StoreResult<Option<Onboarding>> {
        let tables = self.tables.read().await;
        Ok(tables
            .onboardings
            .iter()
            .find(|o| o.row.id == id)
            .map(|o| tables.onboarding(o)))
    }

    async fn save(&self, entity: &Onboarding) -> StoreResult<Onboarding> {
        let mut tables = self.tables.write().await;
        let index = position(&tables.onboardings, entity.id, |o| o.row.id)?;
        let record = &mut tables.onboardings[index];
        record.row.name = entity.name.clone();
        record.row.form_id = entity.form.as_ref().map(|form| form.id);
        record.row.updated_by = entity.updated_by;
        record.row.updated_at = Utc::now();
        record.step_ids = entity.steps.iter().map(|step| step.id).collect();
        Ok(tables.onboarding(&tables.onboardings[index]))
    }

    async fn remove(&self, entity: &Onboarding) -> StoreResult<Onboarding> {
        let mut tables = self.tables.write().await;
        let index = position(&tables.onboardings, entity.id, |o| o.row.id)?;
        let removed = tables.onboarding(&tables.onboardings[index]);
        tables.onboardings.remove(index);
        for study in &mut tables.studies {
            if study.row.onboarding_id == Some(removed.id) {
                study.row.onboarding_id = None;
            }
        }
        Ok(removed)
    }
}

// ---------------------------------------------------------------------------
// Studies
// ---------------------------------------------------------------------------

#[async_trait]
impl StudyStore for MemoryStore {
    async fn create(&self, input: &NewStudy) -> StoreResult<Study> {
        let now = Utc::now();
        let record = StudyRecord {
            row: StudyRow {
                id: Uuid::new_v4(),
                name: input.name.clone(),
                description: input.description.clone(),
                onboarding_id: input.onboarding_id,
                created_by: input.created_by,
                updated_by: input.created_by,
                created_at: now,
                updated_at: now,
            },
            country_code_ids: input.country_code_ids.clone(),
            policy_ids: input.policy_ids.clone(),
        };
        let mut tables = self.tables.write().await;
        let study = tables.study(&record);
        tables.studies.push(record);
        Ok(study)
    }

    async fn find(&self) -> StoreResult<Vec<Study>> {
        let tables = self.tables.read().await;
        Ok(tables.studies.iter().map(|s| tables.study(s)).collect())
    }

    async fn find_one(&self, id: DbId) -> StoreResult<Option<Study>> {
        let tables = self.tables.read().await;
        Ok(tables
            .studies
            .iter()
            .find(|s| s.row.id == id)
            .map(|s| tables.study(s)))
    }

    async fn save(&self, entity: &Study) -> StoreResult<Study> {
        let mut tables = self.tables.write().await;
        let index = position(&tables.studies, entity.id, |s| s.row.id)?;
        let record = &mut tables.studies[index];
        record.row.name = entity.name.clone();
        record.row.description = entity.description.clone();
        record.row.onboarding_id = entity.onboarding.as_ref().map(|o| o.id);
        record.row.updated_by = entity.updated_by;
        record.row.updated_at = Utc::now();
        record.country_code_ids = entity.country_codes.iter().map(|c| c.id).collect();
        record.policy_ids = entity.policies.iter().map(|p| p.id).collect();
        Ok(tables.study(&tables.studies[index]))
    }

    async fn remove(&self, entity: &Study) -> StoreResult<Study> {
        let mut tables = self.tables.write().await;
        let index = position(&tables.studies, entity.id, |s| s.row.id)?;
        let removed = tables.study(&tables.studies[index]);
        tables.studies.remove(index);
        Ok(removed)
    }
}
