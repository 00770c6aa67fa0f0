use serde::{Deserialize, Serialize};

use crate::errors::ServiceError;

/// Filter input for the catalog search.
///
/// `prices` is either empty (no price restriction) or `[min, max]`, both ends inclusive.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PerfumeSearchRequest {
    #[serde(default)]
    pub perfumers: Vec<String>,
    #[serde(default)]
    pub genders: Vec<String>,
    #[serde(default)]
    pub prices: Vec<i32>,
    /// `true` sorts cheapest first, `false` most expensive first.
    #[serde(default, alias = "sortByPrice")]
    pub sort_by_price: bool,
}

/// Validated search filter handed to the repository.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PerfumeFilter {
    pub perfumers: Vec<String>,
    pub genders: Vec<String>,
    pub price: Option<(i32, i32)>,
    pub sort_by_price: bool,
}

impl PerfumeSearchRequest {
    pub fn into_filter(self) -> Result<PerfumeFilter, ServiceError> {
        let price = match self.prices.as_slice() {
            [] => None,
            [min, max] if min <= max => Some((*min, *max)),
            [min, max] => {
                return Err(ServiceError::Validation(format!(
                    "prices out of order: min {min} > max {max}"
                )))
            }
            other => {
                return Err(ServiceError::Validation(format!(
                    "prices must hold exactly two values, got {}",
                    other.len()
                )))
            }
        };
        Ok(PerfumeFilter {
            perfumers: self.perfumers,
            genders: self.genders,
            price,
            sort_by_price: self.sort_by_price,
        })
    }
}

/// Which field a free-text search matches against.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SearchPerfume {
    Brand,
    PerfumeTitle,
    Country,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TextSearchRequest {
    #[serde(alias = "searchType")]
    pub search_type: SearchPerfume,
    pub text: String,
}

/// Raw image received with a save request.
#[derive(Clone, Debug, PartialEq)]
pub struct ImageUpload {
    /// Client-side file name; only its last path component is kept.
    pub original_name: Option<String>,
    pub bytes: Vec<u8>,
}

/// What happened to the image part of a save.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ImageStatus {
    NotProvided,
    Stored { path: String },
    /// The record was saved but the image was not; `filename` is unchanged.
    Failed { reason: String },
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SavedPerfume {
    pub perfume: models::perfume::Model,
    pub image: ImageStatus,
}

impl SavedPerfume {
    pub fn image_failed(&self) -> bool { matches!(self.image, ImageStatus::Failed { .. }) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_prices_mean_no_price_restriction() {
        let f = PerfumeSearchRequest::default().into_filter().unwrap();
        assert_eq!(f.price, None);
    }

    #[test]
    fn ordered_pair_becomes_inclusive_range() {
        let req = PerfumeSearchRequest { prices: vec![10, 10], ..Default::default() };
        assert_eq!(req.into_filter().unwrap().price, Some((10, 10)));
    }

    #[test]
    fn out_of_order_or_wrong_length_prices_are_rejected() {
        let req = PerfumeSearchRequest { prices: vec![200, 10], ..Default::default() };
        assert!(matches!(req.into_filter(), Err(ServiceError::Validation(_))));
        let req = PerfumeSearchRequest { prices: vec![10], ..Default::default() };
        assert!(matches!(req.into_filter(), Err(ServiceError::Validation(_))));
        let req = PerfumeSearchRequest { prices: vec![1, 2, 3], ..Default::default() };
        assert!(matches!(req.into_filter(), Err(ServiceError::Validation(_))));
    }

    #[test]
    fn search_request_accepts_camel_case_sort_flag() {
        let req: PerfumeSearchRequest = serde_json::from_str(
            r#"{"perfumers":["Chanel"],"genders":[],"prices":[1,500],"sortByPrice":true}"#,
        )
        .unwrap();
        assert!(req.sort_by_price);
        assert_eq!(req.perfumers, vec!["Chanel".to_string()]);
    }

    #[test]
    fn search_type_uses_upper_snake_names() {
        let t: SearchPerfume = serde_json::from_str("\"PERFUME_TITLE\"").unwrap();
        assert_eq!(t, SearchPerfume::PerfumeTitle);
        assert_eq!(serde_json::to_string(&SearchPerfume::Brand).unwrap(), "\"BRAND\"");
        assert!(serde_json::from_str::<SearchPerfume>("\"VOLUME\"").is_err());
    }

    #[test]
    fn image_status_serializes_with_tag() {
        let v = serde_json::to_value(ImageStatus::Stored { path: "/uploads/a.png".into() }).unwrap();
        assert_eq!(v["status"], "stored");
        assert_eq!(v["path"], "/uploads/a.png");
        let v = serde_json::to_value(ImageStatus::NotProvided).unwrap();
        assert_eq!(v["status"], "not_provided");
    }
}
