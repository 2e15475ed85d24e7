//! Store traits, one per aggregate.
//!
//! Handlers only talk to these traits. [`crate::repositories`] implements
//! them over PostgreSQL and [`crate::memory::MemoryStore`] implements them in
//! memory with the same semantics, including the `ON DELETE` behaviour of
//! the schema.
//!
//! Conventions shared by every store:
//! - `find` lists in creation order.
//! - `find_by_ids` returns whatever exists, in storage order, silently
//!   skipping unknown ids.
//! - `save` overwrites every column of an existing entity (and, for
//!   aggregates, replaces its relation rows with the entity's current
//!   collections) and fails with `RowNotFound` if the entity is gone.
//! - `remove` hard-deletes and hands back the removed entity.

use std::sync::Arc;

use async_trait::async_trait;
use reporter_core::policy::PolicyType;
use reporter_core::types::DbId;

use crate::memory::MemoryStore;
use crate::models::api_key::{ApiKey, NewApiKey};
use crate::models::country_code::{CountryCode, CreateCountryCode};
use crate::models::form::{Form, NewForm};
use crate::models::onboarding::{NewOnboarding, Onboarding};
use crate::models::onboarding_step::{CreateOnboardingStep, OnboardingStep};
use crate::models::policy::{CreatePolicy, Policy};
use crate::models::study::{NewStudy, Study};
use crate::repositories::{
    ApiKeyRepo, CountryCodeRepo, FormRepo, HealthRepo, OnboardingRepo, OnboardingStepRepo,
    PolicyRepo, StudyRepo,
};
use crate::DbPool;

pub type StoreResult<T> = Result<T, sqlx::Error>;

/// Reachability of whatever backs the stores.
#[async_trait]
pub trait HealthStore: Send + Sync {
    async fn ping(&self) -> StoreResult<()>;
}

#[async_trait]
pub trait ApiKeyStore: Send + Sync {
    async fn create(&self, input: &NewApiKey) -> StoreResult<ApiKey>;
    async fn find(&self) -> StoreResult<Vec<ApiKey>>;
    async fn find_by_hash(&self, key_hash: &str) -> StoreResult<Option<ApiKey>>;
    async fn remove(&self, entity: &ApiKey) -> StoreResult<ApiKey>;
}

#[async_trait]
pub trait CountryCodeStore: Send + Sync {
    async fn create(
        &self,
        input: &CreateCountryCode,
        created_by: Option<DbId>,
    ) -> StoreResult<CountryCode>;
    async fn find(&self) -> StoreResult<Vec<CountryCode>>;
    async fn find_by_ids(&self, ids: &[DbId]) -> StoreResult<Vec<CountryCode>>;
    async fn find_one(&self, id: DbId) -> StoreResult<Option<CountryCode>>;
    async fn find_by_code(&self, code: &str) -> StoreResult<Option<CountryCode>>;
    async fn save(&self, entity: &CountryCode) -> StoreResult<CountryCode>;
    async fn remove(&self, entity: &CountryCode) -> StoreResult<CountryCode>;
}

#[async_trait]
pub trait PolicyStore: Send + Sync {
    async fn create(&self, input: &CreatePolicy, created_by: Option<DbId>) -> StoreResult<Policy>;
    async fn find(&self) -> StoreResult<Vec<Policy>>;
    async fn find_by_type(&self, policy_type: PolicyType) -> StoreResult<Vec<Policy>>;
    async fn find_by_ids(&self, ids: &[DbId]) -> StoreResult<Vec<Policy>>;
    async fn find_one(&self, id: DbId) -> StoreResult<Option<Policy>>;
    async fn save(&self, entity: &Policy) -> StoreResult<Policy>;
    async fn remove(&self, entity: &Policy) -> StoreResult<Policy>;
}

#[async_trait]
pub trait OnboardingStepStore: Send + Sync {
    async fn create(
        &self,
        input: &CreateOnboardingStep,
        created_by: Option<DbId>,
    ) -> StoreResult<OnboardingStep>;
    async fn find(&self) -> StoreResult<Vec<OnboardingStep>>;
    async fn find_by_ids(&self, ids: &[DbId]) -> StoreResult<Vec<OnboardingStep>>;
    async fn find_one(&self, id: DbId) -> StoreResult<Option<OnboardingStep>>;
    async fn save(&self, entity: &OnboardingStep) -> StoreResult<OnboardingStep>;
    async fn remove(&self, entity: &OnboardingStep) -> StoreResult<OnboardingStep>;
}

#[async_trait]
pub trait FormStore: Send + Sync {
    async fn create(&self, input: &NewForm) -> StoreResult<Form>;
    async fn find(&self) -> StoreResult<Vec<Form>>;
    async fn find_one(&self, id: DbId) -> StoreResult<Option<Form>>;
    async fn save(&self, entity: &Form) -> StoreResult<Form>;
    async fn remove(&self, entity: &Form) -> StoreResult<Form>;
}

#[async_trait]
pub trait OnboardingStore: Send + Sync {
    async fn create(&self, input: &NewOnboarding) -> StoreResult<Onboarding>;
    async fn find(&self) -> StoreResult<Vec<Onboarding>>;
    async fn find_one(&self, id: DbId) -> StoreResult<Option<Onboarding>>;
    async fn save(&self, entity: &Onboarding) -> StoreResult<Onboarding>;
    async fn remove(&self, entity: &Onboarding) -> StoreResult<Onboarding>;
}

#[async_trait]
pub trait StudyStore: Send + Sync {
    async fn create(&self, input: &NewStudy) -> StoreResult<Study>;
    async fn find(&self) -> StoreResult<Vec<Study>>;
    async fn find_one(&self, id: DbId) -> StoreResult<Option<Study>>;
    async fn save(&self, entity: &Study) -> StoreResult<Study>;
    async fn remove(&self, entity: &Study) -> StoreResult<Study>;
}

/// Every store the application needs, behind trait objects.
///
/// Cheap to clone.
#[derive(Clone)]
pub struct Stores {
    pub health: Arc<dyn HealthStore>,
    pub api_keys: Arc<dyn ApiKeyStore>,
    pub country_codes: Arc<dyn CountryCodeStore>,
    pub policies: Arc<dyn PolicyStore>,
    pub onboarding_steps: Arc<dyn OnboardingStepStore>,
    pub forms: Arc<dyn FormStore>,
    pub onboardings: Arc<dyn OnboardingStore>,
    pub studies: Arc<dyn StudyStore>,
}

impl Stores {
    /// PostgreSQL-backed stores sharing one pool.
    pub fn postgres(pool: &DbPool) -> Self {
        Self {
            health: Arc::new(HealthRepo::new(pool.clone())),
            api_keys: Arc::new(ApiKeyRepo::new(pool.clone())),
            country_codes: Arc::new(CountryCodeRepo::new(pool.clone())),
            policies: Arc::new(PolicyRepo::new(pool.clone())),
            onboarding_steps: Arc::new(OnboardingStepRepo::new(pool.clone())),
            forms: Arc::new(FormRepo::new(pool.clone())),
            onboardings: Arc::new(OnboardingRepo::new(pool.clone())),
            studies: Arc::new(StudyRepo::new(pool.clone())),
        }
    }

    /// All stores backed by one shared [`MemoryStore`].
    pub fn in_memory(store: Arc<MemoryStore>) -> Self {
        Self {
            health: store.clone(),
            api_keys: store.clone(),
            country_codes: store.clone(),
            policies: store.clone(),
            onboarding_steps: store.clone(),
            forms: store.clone(),
            onboardings: store.clone(),
            studies: store,
        }
    }
}
