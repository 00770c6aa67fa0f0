//! Query-gateway adapters.
//!
//! GraphQL-style callers pass a named operation plus a string-keyed argument bag.
//! These adapters parse the arguments and delegate to [`PerfumeService`], sharing
//! its structured `NotFound` contract.

use std::str::FromStr;
use std::sync::Arc;

use models::perfume::{self, PerfumeProjection};
use serde_json::{Map, Value};
use tracing::debug;

use crate::errors::ServiceError;
use crate::perfume::repository::PerfumeRepository;
use crate::perfume::service::PerfumeService;

pub type QueryArguments = Map<String, Value>;

/// Named operations exposed to the query gateway.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QueryOperation {
    /// `perfume(id)`
    Perfume,
    /// `perfumes`
    Perfumes,
    /// `perfumesIds(ids)`
    PerfumesIds,
}

impl FromStr for QueryOperation {
    type Err = ServiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "perfume" => Ok(Self::Perfume),
            "perfumes" => Ok(Self::Perfumes),
            "perfumesIds" => Ok(Self::PerfumesIds),
            other => Err(ServiceError::Validation(format!("unknown query operation: {other}"))),
        }
    }
}

/// Accepts `"42"` or `42`.
fn parse_id(value: &Value) -> Result<i32, ServiceError> {
    let parsed = match value {
        Value::String(s) => s.trim().parse::<i32>().ok(),
        Value::Number(n) => n.as_i64().and_then(|n| i32::try_from(n).ok()),
        _ => None,
    };
    parsed.ok_or_else(|| ServiceError::Validation(format!("invalid id: {value}")))
}

fn required<'a>(args: &'a QueryArguments, name: &str) -> Result<&'a Value, ServiceError> {
    args.get(name)
        .ok_or_else(|| ServiceError::Validation(format!("missing argument: {name}")))
}

pub struct PerfumeQueries<R: PerfumeRepository> {
    service: Arc<PerfumeService<R>>,
}

impl<R: PerfumeRepository> PerfumeQueries<R> {
    pub fn new(service: Arc<PerfumeService<R>>) -> Self { Self { service } }

    /// `{"id": "<numeric>"}` → one perfume.
    pub async fn perfume_by_query(&self, args: &QueryArguments) -> Result<perfume::Model, ServiceError> {
        let id = parse_id(required(args, "id")?)?;
        self.service.get_by_id(id).await
    }

    /// No arguments → every projection ordered by id.
    pub async fn all_perfumes_by_query(&self) -> Result<Vec<PerfumeProjection>, ServiceError> {
        self.service.list_all().await
    }

    /// `{"ids": ["<numeric>", ...]}` → full perfumes for those ids.
    pub async fn perfumes_by_ids_query(&self, args: &QueryArguments) -> Result<Vec<perfume::Model>, ServiceError> {
        let ids = required(args, "ids")?
            .as_array()
            .ok_or_else(|| ServiceError::Validation("ids must be a list".into()))?
            .iter()
            .map(parse_id)
            .collect::<Result<Vec<_>, _>>()?;
        self.service.get_full_by_ids(&ids).await
    }

    /// Run a named operation and serialise its result.
    pub async fn execute(&self, operation: &str, args: &QueryArguments) -> Result<Value, ServiceError> {
        let op = operation.parse::<QueryOperation>()?;
        debug!(?op, "query gateway operation");
        let value = match op {
            QueryOperation::Perfume => serde_json::to_value(self.perfume_by_query(args).await?),
            QueryOperation::Perfumes => serde_json::to_value(self.all_perfumes_by_query().await?),
            QueryOperation::PerfumesIds => serde_json::to_value(self.perfumes_by_ids_query(args).await?),
        };
        value.map_err(|e| ServiceError::Validation(format!("cannot serialise result: {e}")))
    }
}
