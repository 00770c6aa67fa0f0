use once_cell::sync::Lazy;
use prometheus::{register_int_counter, Encoder, IntCounter, TextEncoder};

// Prometheus metrics (default registry)
pub static PERFUMES_SAVED_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!(
        "perfume_catalog_perfumes_saved_total",
        "Total perfumes created or updated"
    )
    .expect("register perfumes_saved_total")
});

pub static PERFUMES_DELETED_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!(
        "perfume_catalog_perfumes_deleted_total",
        "Total perfumes deleted"
    )
    .expect("register perfumes_deleted_total")
});

pub static IMAGES_STORED_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!(
        "perfume_catalog_images_stored_total",
        "Total product images written to disk"
    )
    .expect("register images_stored_total")
});

pub static IMAGE_FAILURES_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!(
        "perfume_catalog_image_failures_total",
        "Total product image writes that failed"
    )
    .expect("register image_failures_total")
});

pub fn encode_metrics() -> (axum::http::StatusCode, String) {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        return (
            axum::http::StatusCode::INTERNAL_SERVER_ERROR,
            format!("metrics encode error: {e}"),
        );
    }
    (
        axum::http::StatusCode::OK,
        String::from_utf8(buffer).unwrap_or_default(),
    )
}
