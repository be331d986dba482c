//! File-backed vacancy store: one JSON array of field-mappings per file.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::error::AppError;
use crate::models::vacancy::Vacancy;

mod filter;

pub use filter::Criterion;

pub struct JsonStore {
    path: PathBuf,
}

impl JsonStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        JsonStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Number of records currently in the backing file.
    pub fn len(&self) -> Result<usize, AppError> {
        Ok(self.read_raw()?.len())
    }

    pub fn is_empty(&self) -> Result<bool, AppError> {
        Ok(self.len()? == 0)
    }

    /// Write the full list to the backing file, replacing any existing
    /// content. Callers that want accumulation must read-then-merge first.
    pub fn add_all(&self, vacancies: &[Vacancy]) -> Result<(), AppError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(vacancies)?;
        fs::write(&self.path, json)?;
        Ok(())
    }

    /// Read every stored record and keep those matching all given criteria.
    /// An empty criteria set returns the whole file.
    pub fn query_all(&self, criteria: &[Criterion]) -> Result<Vec<Vacancy>, AppError> {
        let vacancies: Vec<Vacancy> = serde_json::from_str(&fs::read_to_string(&self.path)?)?;

        if criteria.is_empty() {
            return Ok(vacancies);
        }

        Ok(vacancies
            .into_iter()
            .filter(|v| criteria.iter().all(|c| c.matches(v)))
            .collect())
    }

    /// Remove every stored record whose serialized field-mapping structurally
    /// equals one of the given records. Matching is on the full mapping, so
    /// records differing in any field are distinct. Returns the removed count.
    pub fn delete_all(&self, vacancies: &[Vacancy]) -> Result<usize, AppError> {
        let stored = self.read_raw()?;
        let doomed: Vec<Value> = vacancies
            .iter()
            .map(serde_json::to_value)
            .collect::<Result<_, _>>()?;

        let before = stored.len();
        let kept: Vec<Value> = stored
            .into_iter()
            .filter(|record| !doomed.contains(record))
            .collect();

        let removed = before - kept.len();
        fs::write(&self.path, serde_json::to_string_pretty(&kept)?)?;
        Ok(removed)
    }

    fn read_raw(&self) -> Result<Vec<Value>, AppError> {
        Ok(serde_json::from_str(&fs::read_to_string(&self.path)?)?)
    }
}
