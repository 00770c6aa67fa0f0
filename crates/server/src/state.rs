use std::sync::Arc;

use sea_orm::DatabaseConnection;
use service::perfume::{
    image_store::ImageStore,
    query::PerfumeQueries,
    repository::SeaOrmPerfumeRepository,
    service::PerfumeService,
};

pub type CatalogService = PerfumeService<SeaOrmPerfumeRepository>;
pub type CatalogQueries = PerfumeQueries<SeaOrmPerfumeRepository>;

#[derive(Clone)]
pub struct ServerState {
    pub perfumes: Arc<CatalogService>,
    pub queries: Arc<CatalogQueries>,
}

impl ServerState {
    /// Wire the SeaORM repository and the image store rooted at `static_root`.
    pub fn new(db: DatabaseConnection, static_root: &str) -> Self {
        let repo = Arc::new(SeaOrmPerfumeRepository::new(db));
        let perfumes = Arc::new(PerfumeService::new(repo, ImageStore::new(static_root)));
        let queries = Arc::new(PerfumeQueries::new(Arc::clone(&perfumes)));
        Self { perfumes, queries }
    }
}
