use async_trait::async_trait;
use common::pagination::{Page, Pagination};
use models::perfume::{self, PerfumeDraft, PerfumeProjection};
use sea_orm::DatabaseConnection;

use crate::db::perfume_service;
use crate::errors::ServiceError;
use crate::perfume::domain::PerfumeFilter;

#[async_trait]
pub trait PerfumeRepository: Send + Sync {
    async fn find_by_id(&self, id: i32) -> Result<Option<perfume::Model>, ServiceError>;
    async fn find_all_ordered_by_id(&self, opts: Pagination) -> Result<Page<PerfumeProjection>, ServiceError>;
    async fn list_all_ordered_by_id(&self) -> Result<Vec<PerfumeProjection>, ServiceError>;
    async fn find_projections_by_ids(&self, ids: &[i32]) -> Result<Vec<PerfumeProjection>, ServiceError>;
    async fn find_by_ids(&self, ids: &[i32]) -> Result<Vec<perfume::Model>, ServiceError>;
    async fn find_by_filter(&self, filter: &PerfumeFilter, opts: Pagination) -> Result<Page<PerfumeProjection>, ServiceError>;
    async fn find_by_perfumer_order_by_price_desc(&self, perfumer: &str) -> Result<Vec<perfume::Model>, ServiceError>;
    async fn find_by_gender_order_by_price_desc(&self, gender: &str) -> Result<Vec<perfume::Model>, ServiceError>;
    async fn find_by_perfumer_containing(&self, text: &str, opts: Pagination) -> Result<Page<PerfumeProjection>, ServiceError>;
    async fn find_by_title_containing(&self, text: &str, opts: Pagination) -> Result<Page<PerfumeProjection>, ServiceError>;
    async fn find_by_country_containing(&self, text: &str, opts: Pagination) -> Result<Page<PerfumeProjection>, ServiceError>;
    async fn save(&self, draft: PerfumeDraft) -> Result<perfume::Model, ServiceError>;
    async fn delete(&self, id: i32) -> Result<bool, ServiceError>;
}

/// SeaORM-backed repository implementation.
#[derive(Clone)]
pub struct SeaOrmPerfumeRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmPerfumeRepository {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }
}

#[async_trait]
impl PerfumeRepository for SeaOrmPerfumeRepository {
    async fn find_by_id(&self, id: i32) -> Result<Option<perfume::Model>, ServiceError> {
        perfume_service::get_perfume(&self.db, id).await
    }

    async fn find_all_ordered_by_id(&self, opts: Pagination) -> Result<Page<PerfumeProjection>, ServiceError> {
        perfume_service::list_perfumes_paginated(&self.db, opts).await
    }

    async fn list_all_ordered_by_id(&self) -> Result<Vec<PerfumeProjection>, ServiceError> {
        perfume_service::list_all_perfumes(&self.db).await
    }

    async fn find_projections_by_ids(&self, ids: &[i32]) -> Result<Vec<PerfumeProjection>, ServiceError> {
        perfume_service::list_perfume_projections_by_ids(&self.db, ids).await
    }

    async fn find_by_ids(&self, ids: &[i32]) -> Result<Vec<perfume::Model>, ServiceError> {
        perfume_service::list_perfumes_by_ids(&self.db, ids).await
    }

    async fn find_by_filter(&self, filter: &PerfumeFilter, opts: Pagination) -> Result<Page<PerfumeProjection>, ServiceError> {
        perfume_service::search_perfumes(&self.db, filter, opts).await
    }

    async fn find_by_perfumer_order_by_price_desc(&self, perfumer: &str) -> Result<Vec<perfume::Model>, ServiceError> {
        perfume_service::list_by_perfumer_price_desc(&self.db, perfumer).await
    }

    async fn find_by_gender_order_by_price_desc(&self, gender: &str) -> Result<Vec<perfume::Model>, ServiceError> {
        perfume_service::list_by_gender_price_desc(&self.db, gender).await
    }

    async fn find_by_perfumer_containing(&self, text: &str, opts: Pagination) -> Result<Page<PerfumeProjection>, ServiceError> {
        perfume_service::search_by_perfumer(&self.db, text, opts).await
    }

    async fn find_by_title_containing(&self, text: &str, opts: Pagination) -> Result<Page<PerfumeProjection>, ServiceError> {
        perfume_service::search_by_title(&self.db, text, opts).await
    }

    async fn find_by_country_containing(&self, text: &str, opts: Pagination) -> Result<Page<PerfumeProjection>, ServiceError> {
        perfume_service::search_by_country(&self.db, text, opts).await
    }

    async fn save(&self, draft: PerfumeDraft) -> Result<perfume::Model, ServiceError> {
        perfume_service::save_perfume(&self.db, draft).await
    }

    async fn delete(&self, id: i32) -> Result<bool, ServiceError> {
        perfume_service::delete_perfume(&self.db, id).await
    }
}
