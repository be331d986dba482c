use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// All salaries are normalized into rubles during validation.
pub const LOCAL_CURRENCY: &str = "RUB";

/// Substituted for any missing or non-string upstream field.
pub const PLACEHOLDER: &str = "...";

/// Structured salary triple as stored in the data file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SalaryRange {
    #[serde(default, deserialize_with = "null_to_zero")]
    pub from: f64,
    #[serde(default, deserialize_with = "null_to_zero")]
    pub to: f64,
    #[serde(default = "local_currency")]
    pub currency: String,
}

impl SalaryRange {
    pub fn zero() -> Self {
        SalaryRange {
            from: 0.0,
            to: 0.0,
            currency: local_currency(),
        }
    }
}

/// Salary as it appears on disk: either the structured triple or a
/// pre-rendered "from -> to" string (legacy representation, accepted on
/// read but never written by this crate).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Salary {
    Range(SalaryRange),
    Text(String),
}

/// One normalized job posting. Field order matches the persisted JSON shape.
///
/// Fields are immutable after construction except through [`Vacancy::validate`],
/// which repairs the salary in place.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vacancy {
    #[serde(default = "placeholder", deserialize_with = "string_or_placeholder")]
    title: String,
    #[serde(default = "placeholder", deserialize_with = "string_or_placeholder")]
    location: String,
    #[serde(default = "placeholder", deserialize_with = "string_or_placeholder")]
    link: String,
    #[serde(default = "placeholder", deserialize_with = "string_or_placeholder")]
    employer: String,
    #[serde(default)]
    salary: Option<Salary>,
    #[serde(default = "placeholder", deserialize_with = "string_or_placeholder")]
    description: String,
    #[serde(default = "placeholder", deserialize_with = "string_or_placeholder")]
    requirement: String,
    #[serde(default = "placeholder", deserialize_with = "string_or_placeholder")]
    experience: String,
    #[serde(default = "placeholder", deserialize_with = "string_or_placeholder")]
    source: String,
}

/// Raw field set produced by a collector, one per API item.
#[derive(Debug, Clone)]
pub struct VacancyFields {
    pub title: String,
    pub location: String,
    pub link: String,
    pub employer: String,
    pub salary: Option<Salary>,
    pub description: String,
    pub requirement: String,
    pub experience: String,
    pub source: String,
}

impl Vacancy {
    pub fn new(fields: VacancyFields) -> Self {
        Vacancy {
            title: fields.title,
            location: fields.location,
            link: fields.link,
            employer: fields.employer,
            salary: fields.salary,
            description: fields.description,
            requirement: fields.requirement,
            experience: fields.experience,
            source: fields.source,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn link(&self) -> &str {
        &self.link
    }

    pub fn employer(&self) -> &str {
        &self.employer
    }

    pub fn salary(&self) -> Option<&Salary> {
        self.salary.as_ref()
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn requirement(&self) -> &str {
        &self.requirement
    }

    pub fn experience(&self) -> &str {
        &self.experience
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// Lower salary bound; 0 for a missing or text-only salary.
    pub fn salary_from(&self) -> f64 {
        match &self.salary {
            Some(Salary::Range(r)) => r.from,
            _ => 0.0,
        }
    }

    /// Upper salary bound; 0 for a missing or text-only salary.
    pub fn salary_to(&self) -> f64 {
        match &self.salary {
            Some(Salary::Range(r)) => r.to,
            _ => 0.0,
        }
    }

    /// Human-readable "from -> to" form of the salary.
    pub fn salary_display(&self) -> String {
        match &self.salary {
            Some(Salary::Range(r)) => format!("{} -> {}", r.from, r.to),
            Some(Salary::Text(s)) => s.clone(),
            None => "0 -> 0".to_string(),
        }
    }

    /// Repair pass run once per record before it enters any collection.
    ///
    /// A missing salary becomes the zero-valued local-currency triple, and any
    /// currency listed in `rates` is converted into [`LOCAL_CURRENCY`] in
    /// place. Currencies absent from the table are left untouched, which also
    /// makes a second call with the same table a no-op.
    pub fn validate(&mut self, rates: &HashMap<String, f64>) {
        match &mut self.salary {
            None => self.salary = Some(Salary::Range(SalaryRange::zero())),
            Some(Salary::Range(range)) => {
                if let Some(rate) = rates.get(&range.currency) {
                    range.from *= rate;
                    range.to *= rate;
                    range.currency = local_currency();
                }
            }
            Some(Salary::Text(_)) => {}
        }
    }

    fn salary_key(&self) -> (f64, f64) {
        (self.salary_from(), self.salary_to())
    }
}

// Two vacancies compare on the (salary.from, salary.to) pair and nothing
// else. total_cmp keeps the order total so records can be sorted directly.
impl Ord for Vacancy {
    fn cmp(&self, other: &Self) -> Ordering {
        let (a_from, a_to) = self.salary_key();
        let (b_from, b_to) = other.salary_key();
        a_from.total_cmp(&b_from).then(a_to.total_cmp(&b_to))
    }
}

impl PartialOrd for Vacancy {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Vacancy {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Vacancy {}

impl fmt::Display for Vacancy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} | {} | {} | {} | {} | {} | {} | {} | {}",
            self.title,
            self.location,
            self.link,
            self.employer,
            self.salary_display(),
            self.description,
            self.requirement,
            self.experience,
            self.source
        )
    }
}

fn local_currency() -> String {
    LOCAL_CURRENCY.to_string()
}

fn placeholder() -> String {
    PLACEHOLDER.to_string()
}

fn null_to_zero<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(0.0))
}

/// Upstream data is known to be incomplete: a null or non-string value in a
/// string slot deserializes as the placeholder instead of failing.
fn string_or_placeholder<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::String(s) => s,
        _ => placeholder(),
    })
}
