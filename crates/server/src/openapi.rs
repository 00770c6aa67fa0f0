use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(utoipa::ToSchema)]
pub struct PerfumeSearchRequestDoc {
    pub perfumers: Vec<String>,
    pub genders: Vec<String>,
    /// `[min, max]`, inclusive; empty for no price restriction
    pub prices: Vec<i32>,
    pub sort_by_price: bool,
}

#[derive(utoipa::ToSchema)]
pub struct TextSearchRequestDoc {
    /// `BRAND`, `PERFUME_TITLE` or `COUNTRY`
    pub search_type: String,
    pub text: String,
}

#[derive(utoipa::ToSchema)]
pub struct PerfumeDraftDoc {
    pub perfume_title: String,
    pub perfumer: String,
    pub year: i32,
    pub country: String,
    pub perfume_gender: String,
    pub fragrance_top_notes: Option<String>,
    pub fragrance_middle_notes: Option<String>,
    pub fragrance_base_notes: Option<String>,
    pub description: Option<String>,
    pub filename: Option<String>,
    pub price: i32,
    pub volume: Option<String>,
    pub perfume_type: Option<String>,
}

/// `perfume` part (JSON text) plus optional `file` part.
#[derive(utoipa::ToSchema)]
pub struct PerfumeFormDoc {
    pub perfume: PerfumeDraftDoc,
    #[schema(value_type = Option<String>, format = Binary)]
    pub file: Option<Vec<u8>>,
}

#[derive(utoipa::ToSchema)]
pub struct QueryRequestDoc {
    /// `perfume`, `perfumes` or `perfumesIds`
    pub operation: String,
    #[schema(value_type = Object)]
    pub arguments: Option<serde_json::Value>,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::perfumes::list,
        crate::routes::perfumes::get,
        crate::routes::perfumes::by_ids,
        crate::routes::perfumes::search,
        crate::routes::perfumes::by_perfumer,
        crate::routes::perfumes::by_gender,
        crate::routes::perfumes::by_text,
        crate::routes::admin::create,
        crate::routes::admin::update,
        crate::routes::admin::delete,
        crate::routes::query::execute,
    ),
    components(
        schemas(
            HealthResponse,
            PerfumeSearchRequestDoc,
            TextSearchRequestDoc,
            PerfumeDraftDoc,
            PerfumeFormDoc,
            QueryRequestDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "perfumes"),
        (name = "admin"),
        (name = "query")
    )
)]
pub struct ApiDoc;
