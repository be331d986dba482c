use clap::ValueEnum;

use crate::collectors::Platform;
use crate::error::AppError;
use crate::models::vacancy::Vacancy;

/// One named filter predicate. A query combines criteria with logical AND.
#[derive(Debug, Clone, PartialEq)]
pub enum Criterion {
    /// Case-insensitive exact match on location.
    City(String),
    /// Case-insensitive exact match on employer.
    Employer(String),
    /// The record's salary must fit fully within the requested band.
    Salary { from: f64, to: f64 },
    /// At least one keyword appears in the description.
    Description(Vec<String>),
    /// At least one keyword appears in the requirement text.
    Requirements(Vec<String>),
    /// Case-insensitive exact match on the origin tag.
    Source(String),
}

impl Criterion {
    /// Parse one `key=value` filter at the input boundary. Unrecognized keys
    /// are a hard error, not a silently-empty filter.
    pub fn parse(key: &str, value: &str) -> Result<Criterion, AppError> {
        match key {
            "city" | "location" => Ok(Criterion::City(value.to_string())),
            "employer" => Ok(Criterion::Employer(value.to_string())),
            "salary" => parse_band(value),
            "description" => Ok(Criterion::Description(keywords(value))),
            "requirements" => Ok(Criterion::Requirements(keywords(value))),
            "source" => Ok(Criterion::Source(normalize_source(value))),
            other => Err(AppError::InvalidFilter(other.to_string())),
        }
    }

    pub fn matches(&self, vacancy: &Vacancy) -> bool {
        match self {
            Criterion::City(city) => eq_fold(vacancy.location(), city),
            Criterion::Employer(employer) => eq_fold(vacancy.employer(), employer),
            Criterion::Salary { from, to } => {
                vacancy.salary_from() >= *from && vacancy.salary_to() <= *to
            }
            Criterion::Description(words) => any_substring(vacancy.description(), words),
            Criterion::Requirements(words) => any_substring(vacancy.requirement(), words),
            Criterion::Source(source) => eq_fold(vacancy.source(), source),
        }
    }
}

fn eq_fold(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}

fn any_substring(text: &str, words: &[String]) -> bool {
    let haystack = text.to_lowercase();
    words.iter().any(|w| haystack.contains(&w.to_lowercase()))
}

/// Salary bands are written as "FROM-TO", e.g. `salary=60000-90000`.
fn parse_band(value: &str) -> Result<Criterion, AppError> {
    let (from, to) = value
        .split_once('-')
        .ok_or_else(|| AppError::InvalidFilter(format!("salary={value}")))?;
    let parse = |s: &str| {
        s.trim()
            .parse::<f64>()
            .map_err(|_| AppError::InvalidFilter(format!("salary={value}")))
    };
    Ok(Criterion::Salary {
        from: parse(from)?,
        to: parse(to)?,
    })
}

fn keywords(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|w| w.trim().to_string())
        .filter(|w| !w.is_empty())
        .collect()
}

/// Accept platform shorthand ("hh", "sj", "superjob") for the source filter
/// and widen it to the stored origin tag.
fn normalize_source(value: &str) -> String {
    match Platform::from_str(value, true) {
        Ok(platform) => platform.source_tag().to_string(),
        Err(_) => value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::vacancy::{LOCAL_CURRENCY, Salary, SalaryRange, VacancyFields};

    fn vacancy(from: f64, to: f64) -> Vacancy {
        Vacancy::new(VacancyFields {
            title: "Rust developer".into(),
            location: "Moscow".into(),
            link: "https://example.com/1".into(),
            employer: "Acme".into(),
            salary: Some(Salary::Range(SalaryRange {
                from,
                to,
                currency: LOCAL_CURRENCY.into(),
            })),
            description: "Work on backend services in Rust".into(),
            requirement: "Three years of systems programming".into(),
            experience: "3-6 years".into(),
            source: "hh.ru".into(),
        })
    }

    #[test]
    fn unknown_key_is_rejected() {
        let err = Criterion::parse("rating", "5").unwrap_err();
        assert!(matches!(err, AppError::InvalidFilter(_)));
    }

    #[test]
    fn city_match_ignores_case() {
        let c = Criterion::parse("city", "moscow").unwrap();
        assert!(c.matches(&vacancy(0.0, 0.0)));
    }

    #[test]
    fn salary_band_requires_full_fit() {
        let band = Criterion::parse("salary", "60000-90000").unwrap();

        assert!(band.matches(&vacancy(80_000.0, 80_000.0)));
        // Fails from >= 60000
        assert!(!band.matches(&vacancy(50_000.0, 70_000.0)));
        // Fails both bounds
        assert!(!band.matches(&vacancy(0.0, 0.0)));
    }

    #[test]
    fn malformed_salary_band_is_invalid() {
        assert!(matches!(
            Criterion::parse("salary", "60000"),
            Err(AppError::InvalidFilter(_))
        ));
        assert!(matches!(
            Criterion::parse("salary", "low-high"),
            Err(AppError::InvalidFilter(_))
        ));
    }

    #[test]
    fn description_matches_on_any_keyword() {
        let c = Criterion::parse("description", "python, BACKEND").unwrap();
        assert!(c.matches(&vacancy(0.0, 0.0)));

        let miss = Criterion::parse("description", "frontend, mobile").unwrap();
        assert!(!miss.matches(&vacancy(0.0, 0.0)));
    }

    #[test]
    fn source_shorthand_widens_to_origin_tag() {
        let c = Criterion::parse("source", "HH").unwrap();
        assert_eq!(c, Criterion::Source("hh.ru".to_string()));
        assert!(c.matches(&vacancy(0.0, 0.0)));

        let sj = Criterion::parse("source", "superjob").unwrap();
        assert_eq!(sj, Criterion::Source("superjob.ru".to_string()));
        assert!(!sj.matches(&vacancy(0.0, 0.0)));
    }
}
