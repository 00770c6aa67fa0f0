use sea_orm::{
    sea_query::{Expr, Func, LikeExpr},
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, DbErr, EntityTrait, Order,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Select, TransactionTrait,
};
use models::perfume::{self, PerfumeDraft, PerfumeProjection};
use common::pagination::{Page, Pagination};

use crate::errors::ServiceError;
use crate::perfume::domain::PerfumeFilter;

fn db_err(e: DbErr) -> ServiceError { ServiceError::Db(e.to_string()) }

/// Restrict a query to the projection columns.
fn projected(select: Select<perfume::Entity>) -> sea_orm::Selector<sea_orm::SelectModel<PerfumeProjection>> {
    select
        .select_only()
        .columns(PerfumeProjection::COLUMNS)
        .into_model::<PerfumeProjection>()
}

/// Run a projection query page by page.
async fn fetch_projection_page(
    db: &DatabaseConnection,
    select: Select<perfume::Entity>,
    opts: Pagination,
) -> Result<Page<PerfumeProjection>, ServiceError> {
    let (page_idx, per_page) = opts.normalize();
    let paginator = projected(select).paginate(db, per_page);
    let totals = paginator.num_items_and_pages().await.map_err(db_err)?;
    let items = paginator.fetch_page(page_idx).await.map_err(db_err)?;
    Ok(Page::new(items, page_idx, per_page, totals.number_of_items, totals.number_of_pages))
}

/// Escape LIKE wildcards so user text matches literally.
fn contains_pattern(text: &str) -> LikeExpr {
    let escaped = text
        .to_lowercase()
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    LikeExpr::new(format!("%{escaped}%")).escape('\\')
}

/// Get perfume by id.
pub async fn get_perfume(db: &DatabaseConnection, id: i32) -> Result<Option<perfume::Model>, ServiceError> {
    perfume::Entity::find_by_id(id).one(db).await.map_err(db_err)
}

/// List projections ordered by id, paginated.
pub async fn list_perfumes_paginated(db: &DatabaseConnection, opts: Pagination) -> Result<Page<PerfumeProjection>, ServiceError> {
    let select = perfume::Entity::find().order_by_asc(perfume::Column::Id);
    fetch_projection_page(db, select, opts).await
}

/// List every projection ordered by id.
pub async fn list_all_perfumes(db: &DatabaseConnection) -> Result<Vec<PerfumeProjection>, ServiceError> {
    projected(perfume::Entity::find().order_by_asc(perfume::Column::Id))
        .all(db)
        .await
        .map_err(db_err)
}

/// Projections whose id is in `ids`, ordered by id.
pub async fn list_perfume_projections_by_ids(db: &DatabaseConnection, ids: &[i32]) -> Result<Vec<PerfumeProjection>, ServiceError> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }
    projected(
        perfume::Entity::find()
            .filter(perfume::Column::Id.is_in(ids.iter().copied()))
            .order_by_asc(perfume::Column::Id),
    )
    .all(db)
    .await
    .map_err(db_err)
}

/// Full entities whose id is in `ids`, ordered by id.
pub async fn list_perfumes_by_ids(db: &DatabaseConnection, ids: &[i32]) -> Result<Vec<perfume::Model>, ServiceError> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }
    perfume::Entity::find()
        .filter(perfume::Column::Id.is_in(ids.iter().copied()))
        .order_by_asc(perfume::Column::Id)
        .all(db)
        .await
        .map_err(db_err)
}

/// Filtered search: perfumer set, gender set and inclusive price range, sorted by price.
pub async fn search_perfumes(db: &DatabaseConnection, filter: &PerfumeFilter, opts: Pagination) -> Result<Page<PerfumeProjection>, ServiceError> {
    let mut cond = Condition::all();
    if !filter.perfumers.is_empty() {
        cond = cond.add(perfume::Column::Perfumer.is_in(filter.perfumers.iter().cloned()));
    }
    if !filter.genders.is_empty() {
        cond = cond.add(perfume::Column::PerfumeGender.is_in(filter.genders.iter().cloned()));
    }
    if let Some((min, max)) = filter.price {
        cond = cond.add(perfume::Column::Price.between(min, max));
    }
    let order = if filter.sort_by_price { Order::Asc } else { Order::Desc };
    let select = perfume::Entity::find()
        .filter(cond)
        .order_by(perfume::Column::Price, order)
        .order_by_asc(perfume::Column::Id);
    fetch_projection_page(db, select, opts).await
}

/// Exact match on one column, most expensive first.
async fn list_by_column_price_desc(db: &DatabaseConnection, column: perfume::Column, value: &str) -> Result<Vec<perfume::Model>, ServiceError> {
    perfume::Entity::find()
        .filter(column.eq(value))
        .order_by_desc(perfume::Column::Price)
        .order_by_asc(perfume::Column::Id)
        .all(db)
        .await
        .map_err(db_err)
}

pub async fn list_by_perfumer_price_desc(db: &DatabaseConnection, perfumer: &str) -> Result<Vec<perfume::Model>, ServiceError> {
    list_by_column_price_desc(db, perfume::Column::Perfumer, perfumer).await
}

pub async fn list_by_gender_price_desc(db: &DatabaseConnection, gender: &str) -> Result<Vec<perfume::Model>, ServiceError> {
    list_by_column_price_desc(db, perfume::Column::PerfumeGender, gender).await
}

/// Case-insensitive substring match on one text column, ordered by id.
async fn search_column_containing(db: &DatabaseConnection, column: perfume::Column, text: &str, opts: Pagination) -> Result<Page<PerfumeProjection>, ServiceError> {
    let select = perfume::Entity::find()
        .filter(Expr::expr(Func::lower(Expr::col((perfume::Entity, column)))).like(contains_pattern(text)))
        .order_by_asc(perfume::Column::Id);
    fetch_projection_page(db, select, opts).await
}

pub async fn search_by_perfumer(db: &DatabaseConnection, text: &str, opts: Pagination) -> Result<Page<PerfumeProjection>, ServiceError> {
    search_column_containing(db, perfume::Column::Perfumer, text, opts).await
}

pub async fn search_by_title(db: &DatabaseConnection, text: &str, opts: Pagination) -> Result<Page<PerfumeProjection>, ServiceError> {
    search_column_containing(db, perfume::Column::PerfumeTitle, text, opts).await
}

pub async fn search_by_country(db: &DatabaseConnection, text: &str, opts: Pagination) -> Result<Page<PerfumeProjection>, ServiceError> {
    search_column_containing(db, perfume::Column::Country, text, opts).await
}

/// Insert when `draft.id` is `None`, otherwise update the existing row. One transaction.
pub async fn save_perfume(db: &DatabaseConnection, draft: PerfumeDraft) -> Result<perfume::Model, ServiceError> {
    let txn = db.begin().await.map_err(db_err)?;
    let saved = match draft.id {
        None => draft.into_new_active_model().insert(&txn).await.map_err(db_err)?,
        Some(id) => {
            let existing = perfume::Entity::find_by_id(id)
                .one(&txn)
                .await
                .map_err(db_err)?
                .ok_or_else(ServiceError::perfume_not_found)?;
            draft.apply_to(existing).update(&txn).await.map_err(db_err)?
        }
    };
    txn.commit().await.map_err(db_err)?;
    Ok(saved)
}

/// Delete perfume; `false` when no row matched.
pub async fn delete_perfume(db: &DatabaseConnection, id: i32) -> Result<bool, ServiceError> {
    let txn = db.begin().await.map_err(db_err)?;
    let res = perfume::Entity::delete_by_id(id).exec(&txn).await.map_err(db_err)?;
    txn.commit().await.map_err(db_err)?;
    Ok(res.rows_affected > 0)
}
