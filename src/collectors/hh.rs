use std::collections::HashMap;

use async_trait::async_trait;
use serde_json::Value;

use crate::collectors::{PAGE_SIZE, Platform, VacancySource, text};
use crate::error::AppError;
use crate::models::vacancy::{LOCAL_CURRENCY, Salary, SalaryRange, Vacancy, VacancyFields};

const BASE_URL: &str = "https://api.hh.ru/vacancies";

/// hh.ru adapter. The API is open; it only insists on a User-Agent header.
pub struct HeadHunter {
    client: reqwest::Client,
}

impl HeadHunter {
    pub fn new(client: reqwest::Client) -> Self {
        HeadHunter { client }
    }
}

#[async_trait]
impl VacancySource for HeadHunter {
    fn name(&self) -> &str {
        Platform::Hh.source_tag()
    }

    async fn fetch(&self, query: &str, page: u32) -> Result<Value, AppError> {
        let resp = self
            .client
            .get(BASE_URL)
            .header("User-Agent", "HH-User-Agent")
            .query(&[("text", query)])
            .query(&[("page", page), ("per_page", PAGE_SIZE)])
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(AppError::from_status(self.name(), status.as_u16()));
        }

        Ok(resp.json().await?)
    }

    fn parse(&self, data: &Value, rates: &HashMap<String, f64>) -> Vec<Vacancy> {
        let items = data
            .get("items")
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or_default();

        let mut vacancies = Vec::with_capacity(items.len());
        for item in items {
            let mut vacancy = Vacancy::new(parse_item(item));
            vacancy.validate(rates);
            vacancies.push(vacancy);
        }
        vacancies
    }
}

fn parse_item(item: &Value) -> VacancyFields {
    VacancyFields {
        title: text(item.get("name")),
        location: text(item.pointer("/area/name")),
        link: text(item.get("alternate_url")),
        employer: text(item.pointer("/employer/name")),
        salary: parse_salary(item.get("salary")),
        description: text(item.pointer("/snippet/responsibility")),
        requirement: text(item.pointer("/snippet/requirement")),
        experience: text(item.pointer("/experience/name")),
        source: Platform::Hh.source_tag().to_string(),
    }
}

/// A fully absent salary block stays absent (the validation pass turns it
/// into the zero-valued ruble triple); a present block gets each bound
/// defaulted to 0 independently and its currency code uppercased.
fn parse_salary(raw: Option<&Value>) -> Option<Salary> {
    let block = raw?;
    if block.is_null() {
        return None;
    }
    Some(Salary::Range(SalaryRange {
        from: block.get("from").and_then(Value::as_f64).unwrap_or(0.0),
        to: block.get("to").and_then(Value::as_f64).unwrap_or(0.0),
        currency: block
            .get("currency")
            .and_then(Value::as_str)
            .unwrap_or(LOCAL_CURRENCY)
            .to_uppercase(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::vacancy::PLACEHOLDER;
    use serde_json::json;

    fn rates() -> HashMap<String, f64> {
        HashMap::from([("USD".to_string(), 90.0), ("EUR".to_string(), 100.0)])
    }

    #[test]
    fn parses_full_item() {
        let data = json!({
            "items": [{
                "name": "Rust developer",
                "area": {"name": "Москва"},
                "alternate_url": "https://hh.ru/vacancy/1",
                "employer": {"name": "Acme"},
                "salary": {"from": 100000, "to": 150000, "currency": "rur"},
                "snippet": {"responsibility": "Build services", "requirement": "Rust"},
                "experience": {"name": "1-3 years"}
            }]
        });

        let vacancies = HeadHunter::new(reqwest::Client::new()).parse(&data, &rates());

        assert_eq!(vacancies.len(), 1);
        let v = &vacancies[0];
        assert_eq!(v.title(), "Rust developer");
        assert_eq!(v.location(), "Москва");
        assert_eq!(v.employer(), "Acme");
        assert_eq!(v.salary_from(), 100_000.0);
        assert_eq!(v.salary_to(), 150_000.0);
        assert_eq!(v.source(), "hh.ru");
    }

    #[test]
    fn missing_fields_fall_back_to_placeholder() {
        let data = json!({"items": [{"salary": null}]});

        let vacancies = HeadHunter::new(reqwest::Client::new()).parse(&data, &rates());

        let v = &vacancies[0];
        assert_eq!(v.title(), PLACEHOLDER);
        assert_eq!(v.location(), PLACEHOLDER);
        assert_eq!(v.requirement(), PLACEHOLDER);
        assert_eq!(v.experience(), PLACEHOLDER);
    }

    #[test]
    fn null_salary_validates_to_zero_rubles() {
        let data = json!({"items": [{"name": "No salary", "salary": null}]});

        let vacancies = HeadHunter::new(reqwest::Client::new()).parse(&data, &rates());

        let v = &vacancies[0];
        assert_eq!(v.salary_from(), 0.0);
        assert_eq!(v.salary_to(), 0.0);
        match v.salary() {
            Some(Salary::Range(r)) => assert_eq!(r.currency, LOCAL_CURRENCY),
            other => panic!("expected structured salary, got {other:?}"),
        }
    }

    #[test]
    fn dollar_salary_is_converted_during_parse() {
        let data = json!({
            "items": [{
                "name": "Remote",
                "salary": {"from": 1000, "to": null, "currency": "USD"}
            }]
        });

        let vacancies = HeadHunter::new(reqwest::Client::new()).parse(&data, &rates());

        let v = &vacancies[0];
        assert_eq!(v.salary_from(), 90_000.0);
        assert_eq!(v.salary_to(), 0.0);
    }

    #[test]
    fn missing_items_list_yields_empty_result() {
        let data = json!({"found": 0});

        let vacancies = HeadHunter::new(reqwest::Client::new()).parse(&data, &rates());

        assert!(vacancies.is_empty());
    }
}
