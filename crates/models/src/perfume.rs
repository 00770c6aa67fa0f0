use sea_orm::{entity::prelude::*, FromQueryResult, Set};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::errors;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "perfume")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub perfume_title: String,
    pub perfumer: String,
    pub year: i32,
    pub country: String,
    pub perfume_gender: String,
    pub fragrance_top_notes: String,
    pub fragrance_middle_notes: String,
    pub fragrance_base_notes: String,
    pub description: Option<String>,
    pub filename: Option<String>,
    pub price: i32,
    pub volume: String,
    pub perfume_type: String,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef { panic!("no relations defined here") }
}

impl ActiveModelBehavior for ActiveModel {}

/// Reduced read view used by list and search queries.
#[derive(Clone, Debug, PartialEq, FromQueryResult, Serialize, Deserialize)]
pub struct PerfumeProjection {
    pub id: i32,
    pub perfume_title: String,
    pub perfumer: String,
    pub price: i32,
    pub volume: String,
    pub filename: Option<String>,
}

impl PerfumeProjection {
    /// Columns selected for the projection, in declaration order.
    pub const COLUMNS: [Column; 6] = [
        Column::Id,
        Column::PerfumeTitle,
        Column::Perfumer,
        Column::Price,
        Column::Volume,
        Column::Filename,
    ];
}

impl From<Model> for PerfumeProjection {
    fn from(m: Model) -> Self {
        Self {
            id: m.id,
            perfume_title: m.perfume_title,
            perfumer: m.perfumer,
            price: m.price,
            volume: m.volume,
            filename: m.filename,
        }
    }
}

/// Writable fields of a perfume. `id = None` creates, `Some` updates.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PerfumeDraft {
    #[serde(default)]
    pub id: Option<i32>,
    pub perfume_title: String,
    pub perfumer: String,
    pub year: i32,
    pub country: String,
    pub perfume_gender: String,
    #[serde(default)]
    pub fragrance_top_notes: String,
    #[serde(default)]
    pub fragrance_middle_notes: String,
    #[serde(default)]
    pub fragrance_base_notes: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub filename: Option<String>,
    pub price: i32,
    #[serde(default)]
    pub volume: String,
    #[serde(default)]
    pub perfume_type: String,
}

pub fn validate_required(field: &str, value: &str) -> Result<(), errors::ModelError> {
    if value.trim().is_empty() {
        return Err(errors::ModelError::Required(field.to_owned()));
    }
    Ok(())
}

pub fn validate_price(price: i32) -> Result<(), errors::ModelError> {
    if price < 0 {
        return Err(errors::ModelError::Invalid { field: "price", reason: format!("{price} is negative") });
    }
    Ok(())
}

pub fn validate_year(year: i32) -> Result<(), errors::ModelError> {
    if !(1000..=9999).contains(&year) {
        return Err(errors::ModelError::Invalid { field: "year", reason: format!("{year} is not a four digit year") });
    }
    Ok(())
}

impl PerfumeDraft {
    pub fn validate(&self) -> Result<(), errors::ModelError> {
        validate_required("perfume_title", &self.perfume_title)?;
        validate_required("perfumer", &self.perfumer)?;
        validate_required("country", &self.country)?;
        validate_required("perfume_gender", &self.perfume_gender)?;
        validate_price(self.price)?;
        validate_year(self.year)?;
        Ok(())
    }

    /// Active model for an insert; the store assigns the id.
    pub fn into_new_active_model(self) -> ActiveModel {
        let now = Utc::now().into();
        ActiveModel {
            perfume_title: Set(self.perfume_title),
            perfumer: Set(self.perfumer),
            year: Set(self.year),
            country: Set(self.country),
            perfume_gender: Set(self.perfume_gender),
            fragrance_top_notes: Set(self.fragrance_top_notes),
            fragrance_middle_notes: Set(self.fragrance_middle_notes),
            fragrance_base_notes: Set(self.fragrance_base_notes),
            description: Set(self.description),
            filename: Set(self.filename),
            price: Set(self.price),
            volume: Set(self.volume),
            perfume_type: Set(self.perfume_type),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
    }

    /// Copy the draft onto an existing row, keeping its id and `created_at`.
    pub fn apply_to(self, existing: Model) -> ActiveModel {
        let mut am: ActiveModel = existing.into();
        am.perfume_title = Set(self.perfume_title);
        am.perfumer = Set(self.perfumer);
        am.year = Set(self.year);
        am.country = Set(self.country);
        am.perfume_gender = Set(self.perfume_gender);
        am.fragrance_top_notes = Set(self.fragrance_top_notes);
        am.fragrance_middle_notes = Set(self.fragrance_middle_notes);
        am.fragrance_base_notes = Set(self.fragrance_base_notes);
        am.description = Set(self.description);
        am.filename = Set(self.filename);
        am.price = Set(self.price);
        am.volume = Set(self.volume);
        am.perfume_type = Set(self.perfume_type);
        am.updated_at = Set(Utc::now().into());
        am
    }
}

impl From<Model> for PerfumeDraft {
    fn from(m: Model) -> Self {
        Self {
            id: Some(m.id),
            perfume_title: m.perfume_title,
            perfumer: m.perfumer,
            year: m.year,
            country: m.country,
            perfume_gender: m.perfume_gender,
            fragrance_top_notes: m.fragrance_top_notes,
            fragrance_middle_notes: m.fragrance_middle_notes,
            fragrance_base_notes: m.fragrance_base_notes,
            description: m.description,
            filename: m.filename,
            price: m.price,
            volume: m.volume,
            perfume_type: m.perfume_type,
        }
    }
}
