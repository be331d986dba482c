use std::collections::HashMap;

use crate::collectors::VacancySource;
use crate::error::AppError;
use crate::models::vacancy::Vacancy;

/// Fetch `pages` pages from every source in turn, one request at a time, and
/// accumulate the normalized records into a single list.
///
/// The first failing fetch aborts the whole run; nothing is retried.
pub async fn collect_all(
    sources: &[Box<dyn VacancySource>],
    query: &str,
    pages: u32,
    rates: &HashMap<String, f64>,
) -> Result<Vec<Vacancy>, AppError> {
    let mut vacancies = Vec::new();

    for page in 0..pages {
        for source in sources {
            let batch = source.collect(query, page, rates).await?;
            tracing::info!(
                "Fetched {} vacancies from {} (page {page})",
                batch.len(),
                source.name()
            );
            vacancies.extend(batch);
        }
    }

    Ok(vacancies)
}
