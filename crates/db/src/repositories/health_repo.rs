//! Database reachability check behind [`HealthStore`].

use async_trait::async_trait;
use sqlx::PgPool;

use crate::stores::{HealthStore, StoreResult};

pub struct HealthRepo {
    pool: PgPool,
}

impl HealthRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl HealthStore for HealthRepo {
    async fn ping(&self) -> StoreResult<()> {
        crate::health_check(&self.pool).await
    }
}
