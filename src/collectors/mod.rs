// Collector module: one trait, one implementation per recruitment API.

use std::collections::HashMap;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::AppError;
use crate::models::vacancy::{PLACEHOLDER, Vacancy};

mod hh;
pub mod runner;
mod superjob;

pub use hh::HeadHunter;
pub use superjob::SuperJob;

/// Both APIs are paged at 50 items per request.
pub const PAGE_SIZE: u32 = 50;

/// A recruitment platform we know how to collect from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Platform {
    #[value(alias = "hh.ru")]
    Hh,
    #[value(alias = "superjob", alias = "superjob.ru")]
    Sj,
}

impl Platform {
    /// The origin tag written into every vacancy from this platform.
    pub fn source_tag(&self) -> &'static str {
        match self {
            Platform::Hh => "hh.ru",
            Platform::Sj => "superjob.ru",
        }
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Platform::Hh => "hh",
            Platform::Sj => "sj",
        })
    }
}

/// Trait that all vacancy sources implement. Each source knows one external
/// API's request shape and turns its raw items into normalized [`Vacancy`]
/// records, validated against the supplied currency-rate table.
#[async_trait]
pub trait VacancySource: Send + Sync {
    /// Source tag, e.g. "hh.ru".
    fn name(&self) -> &str;

    /// One GET against the platform API, decoded as a generic JSON value.
    async fn fetch(&self, query: &str, page: u32) -> Result<Value, AppError>;

    /// Normalize every raw item in a decoded response body.
    fn parse(&self, data: &Value, rates: &HashMap<String, f64>) -> Vec<Vacancy>;

    /// Fetch one page and normalize it.
    async fn collect(
        &self,
        query: &str,
        page: u32,
        rates: &HashMap<String, f64>,
    ) -> Result<Vec<Vacancy>, AppError> {
        let data = self.fetch(query, page).await?;
        Ok(self.parse(&data, rates))
    }
}

/// Extract a string field, falling back to the placeholder. Upstream data is
/// known to be incomplete, so missing or non-string values never fail.
pub(crate) fn text(value: Option<&Value>) -> String {
    value
        .and_then(Value::as_str)
        .unwrap_or(PLACEHOLDER)
        .to_string()
}
