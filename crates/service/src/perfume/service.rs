use std::sync::Arc;

use common::pagination::{Page, Pagination};
use models::perfume::{self, PerfumeDraft, PerfumeProjection};
use tracing::{info, instrument, warn};

use crate::errors::ServiceError;
use crate::metrics;
use crate::perfume::domain::{
    ImageStatus, ImageUpload, PerfumeSearchRequest, SavedPerfume, SearchPerfume,
};
use crate::perfume::image_store::ImageStore;
use crate::perfume::repository::PerfumeRepository;

/// Confirmation returned by [`PerfumeService::delete`].
pub const PERFUME_DELETED: &str = "Perfume deleted successfully";

/// Application service for the perfume catalog.
/// Lookups, search and pagination go to the repository; image files go to the image store.
pub struct PerfumeService<R: PerfumeRepository> {
    repo: Arc<R>,
    images: ImageStore,
}

impl<R: PerfumeRepository> PerfumeService<R> {
    pub fn new(repo: Arc<R>, images: ImageStore) -> Self { Self { repo, images } }

    pub fn images(&self) -> &ImageStore { &self.images }

    #[instrument(skip(self))]
    pub async fn get_by_id(&self, id: i32) -> Result<perfume::Model, ServiceError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(ServiceError::perfume_not_found)
    }

    pub async fn get_all(&self, opts: Pagination) -> Result<Page<PerfumeProjection>, ServiceError> {
        self.repo.find_all_ordered_by_id(opts).await
    }

    /// Every projection, ordered by id, without paging.
    pub async fn list_all(&self) -> Result<Vec<PerfumeProjection>, ServiceError> {
        self.repo.list_all_ordered_by_id().await
    }

    pub async fn get_by_ids(&self, ids: &[i32]) -> Result<Vec<PerfumeProjection>, ServiceError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        self.repo.find_projections_by_ids(ids).await
    }

    /// Full entities for `ids`, ordered by id.
    pub async fn get_full_by_ids(&self, ids: &[i32]) -> Result<Vec<perfume::Model>, ServiceError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        self.repo.find_by_ids(ids).await
    }

    #[instrument(skip(self))]
    pub async fn search(&self, request: PerfumeSearchRequest, opts: Pagination) -> Result<Page<PerfumeProjection>, ServiceError> {
        let filter = request.into_filter()?;
        self.repo.find_by_filter(&filter, opts).await
    }

    pub async fn find_by_perfumer(&self, perfumer: &str) -> Result<Vec<perfume::Model>, ServiceError> {
        self.repo.find_by_perfumer_order_by_price_desc(perfumer).await
    }

    pub async fn find_by_gender(&self, gender: &str) -> Result<Vec<perfume::Model>, ServiceError> {
        self.repo.find_by_gender_order_by_price_desc(gender).await
    }

    #[instrument(skip(self))]
    pub async fn find_by_text(&self, search_type: SearchPerfume, text: &str, opts: Pagination) -> Result<Page<PerfumeProjection>, ServiceError> {
        match search_type {
            SearchPerfume::Brand => self.repo.find_by_perfumer_containing(text, opts).await,
            SearchPerfume::PerfumeTitle => self.repo.find_by_title_containing(text, opts).await,
            SearchPerfume::Country => self.repo.find_by_country_containing(text, opts).await,
        }
    }

    /// Create or update a perfume, optionally storing a new image first.
    ///
    /// A failed image write does not fail the save: the record is persisted with
    /// its `filename` untouched and the outcome reports `ImageStatus::Failed`.
    /// If the record write fails after an image was stored, the image is removed again.
    #[instrument(skip(self, draft, image), fields(id = ?draft.id, has_image = image.is_some()))]
    pub async fn save(&self, mut draft: PerfumeDraft, image: Option<ImageUpload>) -> Result<SavedPerfume, ServiceError> {
        draft.validate()?;

        let mut stored_path = None;
        let image_status = match image {
            None => ImageStatus::NotProvided,
            Some(upload) => match self.images.store(upload.original_name.as_deref(), &upload.bytes).await {
                Ok(img) => {
                    metrics::IMAGES_STORED_TOTAL.inc();
                    draft.filename = Some(img.public_path.clone());
                    stored_path = Some(img.public_path.clone());
                    ImageStatus::Stored { path: img.public_path }
                }
                Err(e) => {
                    metrics::IMAGE_FAILURES_TOTAL.inc();
                    warn!(error = %e, "image write failed; saving perfume without new image");
                    ImageStatus::Failed { reason: e.to_string() }
                }
            },
        };

        let perfume = match self.repo.save(draft).await {
            Ok(p) => p,
            Err(e) => {
                if let Some(path) = stored_path {
                    if let Err(rm) = self.images.remove(&path).await {
                        warn!(%path, error = %rm, "failed to remove orphaned image");
                    }
                }
                return Err(e);
            }
        };

        metrics::PERFUMES_SAVED_TOTAL.inc();
        info!(id = perfume.id, filename = ?perfume.filename, "perfume saved");
        Ok(SavedPerfume { perfume, image: image_status })
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: i32) -> Result<&'static str, ServiceError> {
        if !self.repo.delete(id).await? {
            return Err(ServiceError::perfume_not_found());
        }
        metrics::PERFUMES_DELETED_TOTAL.inc();
        info!(id, "perfume deleted");
        Ok(PERFUME_DELETED)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::PERFUME_NOT_FOUND;
    use crate::perfume::repository::SeaOrmPerfumeRepository;
    use crate::test_support::{get_db, sample_draft};
    use tempfile::TempDir;

    async fn setup() -> Result<(PerfumeService<SeaOrmPerfumeRepository>, TempDir), anyhow::Error> {
        let db = get_db().await?;
        let tmp = tempfile::tempdir()?;
        let svc = PerfumeService::new(
            Arc::new(SeaOrmPerfumeRepository::new(db)),
            ImageStore::new(tmp.path().join("static")),
        );
        Ok((svc, tmp))
    }

    fn draft(title: &str, perfumer: &str, gender: &str, country: &str, price: i32) -> PerfumeDraft {
        let mut d = sample_draft(title, perfumer, price);
        d.perfume_gender = gender.into();
        d.country = country.into();
        d
    }

    async fn seed(svc: &PerfumeService<SeaOrmPerfumeRepository>) -> Result<Vec<perfume::Model>, anyhow::Error> {
        let rows = [
            ("Chance", "Chanel", "female", "France", 120),
            ("Bleu de Chanel", "Chanel", "male", "France", 150),
            ("Sauvage", "Dior", "male", "France", 95),
            ("J'adore", "Dior", "female", "France", 130),
            ("Aventus", "Creed", "male", "United Kingdom", 320),
            ("Light Blue", "Dolce & Gabbana", "female", "Italy", 80),
        ];
        let mut out = Vec::new();
        for (t, p, g, c, price) in rows {
            out.push(svc.save(draft(t, p, g, c, price), None).await?.perfume);
        }
        Ok(out)
    }

    #[tokio::test]
    async fn get_by_id_returns_entity_or_not_found() -> Result<(), anyhow::Error> {
        let (svc, _tmp) = setup().await?;
        let seeded = seed(&svc).await?;

        let got = svc.get_by_id(seeded[2].id).await?;
        assert_eq!(got, seeded[2]);

        let err = svc.get_by_id(9999).await.unwrap_err();
        assert!(matches!(&err, ServiceError::NotFound(m) if m == PERFUME_NOT_FOUND));
        assert_eq!(err.status_code(), axum::http::StatusCode::NOT_FOUND);
        Ok(())
    }

    #[tokio::test]
    async fn get_all_pages_concatenate_to_full_id_ordered_set() -> Result<(), anyhow::Error> {
        let (svc, _tmp) = setup().await?;
        let seeded = seed(&svc).await?;

        let mut ids = Vec::new();
        let mut page = 1;
        loop {
            let p = svc.get_all(Pagination { page, per_page: 4 }).await?;
            assert_eq!(p.total_items, 6);
            assert_eq!(p.total_pages, 2);
            ids.extend(p.items.iter().map(|i| i.id));
            if p.is_last() { break; }
            page += 1;
        }
        let expected: Vec<i32> = seeded.iter().map(|m| m.id).collect();
        assert_eq!(ids, expected);
        assert!(ids.windows(2).all(|w| w[0] < w[1]));
        Ok(())
    }

    #[tokio::test]
    async fn get_all_on_empty_store_is_empty_page() -> Result<(), anyhow::Error> {
        let (svc, _tmp) = setup().await?;
        let p = svc.get_all(Pagination::default()).await?;
        assert!(p.items.is_empty());
        assert_eq!(p.total_items, 0);
        Ok(())
    }

    #[tokio::test]
    async fn get_by_ids_returns_subset_and_handles_empty_input() -> Result<(), anyhow::Error> {
        let (svc, _tmp) = setup().await?;
        let seeded = seed(&svc).await?;

        assert!(svc.get_by_ids(&[]).await?.is_empty());

        let wanted = [seeded[4].id, seeded[0].id, 9999];
        let got = svc.get_by_ids(&wanted).await?;
        let got_ids: Vec<i32> = got.iter().map(|p| p.id).collect();
        assert_eq!(got_ids, vec![seeded[0].id, seeded[4].id]);
        assert_eq!(got[1].perfume_title, "Aventus");

        let full = svc.get_full_by_ids(&wanted).await?;
        assert_eq!(full, vec![seeded[0].clone(), seeded[4].clone()]);
        Ok(())
    }

    #[tokio::test]
    async fn search_applies_all_filters_and_price_sort() -> Result<(), anyhow::Error> {
        let (svc, _tmp) = setup().await?;
        seed(&svc).await?;

        let req = PerfumeSearchRequest {
            perfumers: vec!["Chanel".into(), "Dior".into()],
            genders: vec!["male".into()],
            prices: vec![95, 150],
            sort_by_price: true,
        };
        let page = svc.search(req, Pagination::default()).await?;
        let titles: Vec<&str> = page.items.iter().map(|p| p.perfume_title.as_str()).collect();
        // Inclusive on both ends: 95 and 150 qualify.
        assert_eq!(titles, vec!["Sauvage", "Bleu de Chanel"]);

        let desc = PerfumeSearchRequest {
            perfumers: vec!["Chanel".into(), "Dior".into()],
            genders: vec!["male".into()],
            prices: vec![95, 150],
            sort_by_price: false,
        };
        let page = svc.search(desc, Pagination::default()).await?;
        let titles: Vec<&str> = page.items.iter().map(|p| p.perfume_title.as_str()).collect();
        assert_eq!(titles, vec!["Bleu de Chanel", "Sauvage"]);
        Ok(())
    }

    #[tokio::test]
    async fn search_with_empty_dimensions_matches_everything() -> Result<(), anyhow::Error> {
        let (svc, _tmp) = setup().await?;
        seed(&svc).await?;

        let page = svc.search(PerfumeSearchRequest::default(), Pagination::default()).await?;
        assert_eq!(page.total_items, 6);
        // Default sort is most expensive first.
        assert_eq!(page.items[0].perfume_title, "Aventus");
        assert_eq!(page.items[5].perfume_title, "Light Blue");

        let only_price = PerfumeSearchRequest { prices: vec![0, 100], ..Default::default() };
        let page = svc.search(only_price, Pagination::default()).await?;
        assert!(page.items.iter().all(|p| (0..=100).contains(&p.price)));
        assert_eq!(page.total_items, 2);
        Ok(())
    }

    #[tokio::test]
    async fn search_rejects_reversed_price_range() -> Result<(), anyhow::Error> {
        let (svc, _tmp) = setup().await?;
        let req = PerfumeSearchRequest { prices: vec![300, 10], ..Default::default() };
        let err = svc.search(req, Pagination::default()).await.unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
        Ok(())
    }

    #[tokio::test]
    async fn exact_lookups_order_by_price_desc() -> Result<(), anyhow::Error> {
        let (svc, _tmp) = setup().await?;
        seed(&svc).await?;

        let dior = svc.find_by_perfumer("Dior").await?;
        let prices: Vec<i32> = dior.iter().map(|p| p.price).collect();
        assert_eq!(prices, vec![130, 95]);
        assert!(svc.find_by_perfumer("dior").await?.is_empty());

        let female = svc.find_by_gender("female").await?;
        let prices: Vec<i32> = female.iter().map(|p| p.price).collect();
        assert_eq!(prices, vec![130, 120, 80]);
        Ok(())
    }

    #[tokio::test]
    async fn find_by_text_dispatches_on_search_type() -> Result<(), anyhow::Error> {
        let (svc, _tmp) = setup().await?;
        seed(&svc).await?;

        let brand = svc.find_by_text(SearchPerfume::Brand, "Chanel", Pagination::default()).await?;
        assert_eq!(brand.total_items, 2);
        assert!(brand.items.iter().all(|p| p.perfumer == "Chanel"));

        // "Chanel" also appears in a title, but only as a title search.
        let title = svc.find_by_text(SearchPerfume::PerfumeTitle, "chanel", Pagination::default()).await?;
        assert_eq!(title.items.len(), 1);
        assert_eq!(title.items[0].perfume_title, "Bleu de Chanel");

        let country = svc.find_by_text(SearchPerfume::Country, "italy", Pagination::default()).await?;
        assert_eq!(country.items.len(), 1);
        assert_eq!(country.items[0].perfumer, "Dolce & Gabbana");
        Ok(())
    }

    #[tokio::test]
    async fn save_without_image_keeps_filename() -> Result<(), anyhow::Error> {
        let (svc, _tmp) = setup().await?;
        let mut d = sample_draft("Chance", "Chanel", 120);
        d.filename = Some("/uploads/existing.png".into());
        let saved = svc.save(d, None).await?;
        assert_eq!(saved.image, ImageStatus::NotProvided);
        assert_eq!(saved.perfume.filename.as_deref(), Some("/uploads/existing.png"));

        let plain = svc.save(sample_draft("Sauvage", "Dior", 95), None).await?;
        assert_eq!(plain.perfume.filename, None);
        Ok(())
    }

    #[tokio::test]
    async fn save_with_image_writes_file_and_sets_filename() -> Result<(), anyhow::Error> {
        let (svc, tmp) = setup().await?;
        let bytes = b"\x89PNG\r\n\x1a\nfake".to_vec();
        let saved = svc
            .save(
                sample_draft("Chance", "Chanel", 120),
                Some(ImageUpload { original_name: Some("x.png".into()), bytes: bytes.clone() }),
            )
            .await?;

        let filename = saved.perfume.filename.clone().expect("filename set");
        let name = filename.strip_prefix("/uploads/").expect("uploads prefix");
        assert_eq!(name.len(), 36 + ".x.png".len());
        assert!(name.ends_with(".x.png"));
        assert!(uuid::Uuid::parse_str(&name[..36]).is_ok());
        assert_eq!(saved.image, ImageStatus::Stored { path: filename.clone() });

        let on_disk = tokio::fs::read(tmp.path().join("static").join("uploads").join(name)).await?;
        assert_eq!(on_disk, bytes);

        let reloaded = svc.get_by_id(saved.perfume.id).await?;
        assert_eq!(reloaded.filename, Some(filename));
        Ok(())
    }

    #[tokio::test]
    async fn save_reports_image_failure_and_still_persists() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let tmp = tempfile::tempdir()?;
        let blocker = tmp.path().join("blocker");
        tokio::fs::write(&blocker, b"file, not dir").await?;
        let svc = PerfumeService::new(Arc::new(SeaOrmPerfumeRepository::new(db)), ImageStore::new(&blocker));

        let saved = svc
            .save(
                sample_draft("Chance", "Chanel", 120),
                Some(ImageUpload { original_name: Some("x.png".into()), bytes: b"data".to_vec() }),
            )
            .await?;
        assert!(saved.image_failed());
        assert_eq!(saved.perfume.filename, None);
        assert_eq!(svc.get_by_id(saved.perfume.id).await?, saved.perfume);
        Ok(())
    }

    #[tokio::test]
    async fn failed_record_write_removes_orphaned_image() -> Result<(), anyhow::Error> {
        let (svc, _tmp) = setup().await?;
        let mut d = sample_draft("Chance", "Chanel", 120);
        d.id = Some(4242);
        let err = svc
            .save(d, Some(ImageUpload { original_name: Some("x.png".into()), bytes: b"data".to_vec() }))
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));

        let mut entries = tokio::fs::read_dir(svc.images().uploads_dir()).await?;
        assert!(entries.next_entry().await?.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn save_updates_existing_record_in_place() -> Result<(), anyhow::Error> {
        let (svc, _tmp) = setup().await?;
        let created = svc.save(sample_draft("Chance", "Chanel", 120), None).await?.perfume;
        let mut edit = PerfumeDraft::from(created.clone());
        edit.perfume_title = "Chance Eau Tendre".into();
        let updated = svc.save(edit, None).await?.perfume;
        assert_eq!(updated.id, created.id);
        assert_eq!(svc.get_by_id(created.id).await?.perfume_title, "Chance Eau Tendre");
        assert_eq!(svc.list_all().await?.len(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn save_rejects_invalid_draft() -> Result<(), anyhow::Error> {
        let (svc, _tmp) = setup().await?;
        let err = svc.save(sample_draft("", "Chanel", 120), None).await.unwrap_err();
        assert!(matches!(err, ServiceError::Model(_)));
        assert_eq!(err.status_code(), axum::http::StatusCode::BAD_REQUEST);
        Ok(())
    }

    #[tokio::test]
    async fn delete_then_lookup_is_not_found() -> Result<(), anyhow::Error> {
        let (svc, _tmp) = setup().await?;
        let seeded = seed(&svc).await?;

        assert_eq!(svc.delete(seeded[0].id).await?, PERFUME_DELETED);
        assert!(matches!(svc.get_by_id(seeded[0].id).await, Err(ServiceError::NotFound(_))));

        let err = svc.delete(seeded[0].id).await.unwrap_err();
        assert!(matches!(&err, ServiceError::NotFound(m) if m == PERFUME_NOT_FOUND));
        assert_eq!(svc.list_all().await?.len(), 5);
        Ok(())
    }
}
