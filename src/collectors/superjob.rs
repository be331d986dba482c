use std::collections::HashMap;

use async_trait::async_trait;
use serde_json::Value;

use crate::collectors::{PAGE_SIZE, Platform, VacancySource, text};
use crate::error::AppError;
use crate::models::vacancy::{
    LOCAL_CURRENCY, PLACEHOLDER, Salary, SalaryRange, Vacancy, VacancyFields,
};

const BASE_URL: &str = "https://api.superjob.ru/2.0/vacancies/";

/// superjob.ru adapter. Requests are authorized with the app token in the
/// X-Api-App-Id header.
pub struct SuperJob {
    client: reqwest::Client,
    token: String,
}

impl SuperJob {
    pub fn new(client: reqwest::Client, token: String) -> Self {
        SuperJob { client, token }
    }
}

#[async_trait]
impl VacancySource for SuperJob {
    fn name(&self) -> &str {
        Platform::Sj.source_tag()
    }

    async fn fetch(&self, query: &str, page: u32) -> Result<Value, AppError> {
        let resp = self
            .client
            .get(BASE_URL)
            .header("X-Api-App-Id", &self.token)
            .query(&[("keyword", query)])
            .query(&[("page", page), ("count", PAGE_SIZE)])
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
            .get("objects")
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
        title: text(item.get("profession")),
        location: text(item.pointer("/town/title")),
        link: text(item.get("link")),
        employer: text(item.get("firm_name")),
        salary: Some(parse_salary(item)),
        description: text(item.get("candidat")),
        // superjob has no separate requirements field
        requirement: PLACEHOLDER.to_string(),
        experience: text(item.pointer("/experience/title")),
        source: Platform::Sj.source_tag().to_string(),
    }
}

/// superjob always carries salary fields on the item itself; each bound is
/// defaulted to 0 independently when absent.
fn parse_salary(item: &Value) -> Salary {
    Salary::Range(SalaryRange {
        from: item
            .get("payment_from")
            .and_then(Value::as_f64)
            .unwrap_or(0.0),
        to: item.get("payment_to").and_then(Value::as_f64).unwrap_or(0.0),
        currency: item
            .get("currency")
            .and_then(Value::as_str)
            .unwrap_or(LOCAL_CURRENCY)
            .to_uppercase(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn rates() -> HashMap<String, f64> {
        HashMap::from([("USD".to_string(), 90.0), ("EUR".to_string(), 100.0)])
    }

    fn source() -> SuperJob {
        SuperJob::new(reqwest::Client::new(), "token".to_string())
    }

    #[test]
    fn parses_full_item() {
        let data = json!({
            "objects": [{
                "profession": "Backend engineer",
                "town": {"title": "Санкт-Петербург"},
                "link": "https://superjob.ru/vakansii/1.html",
                "firm_name": "Widgets LLC",
                "payment_from": 120000,
                "payment_to": 180000,
                "currency": "rub",
                "candidat": "Develop and support services",
                "experience": {"title": "От 3 лет"}
            }]
        });

        let vacancies = source().parse(&data, &rates());

        assert_eq!(vacancies.len(), 1);
        let v = &vacancies[0];
        assert_eq!(v.title(), "Backend engineer");
        assert_eq!(v.location(), "Санкт-Петербург");
        assert_eq!(v.employer(), "Widgets LLC");
        assert_eq!(v.salary_from(), 120_000.0);
        assert_eq!(v.salary_to(), 180_000.0);
        assert_eq!(v.requirement(), PLACEHOLDER);
        assert_eq!(v.source(), "superjob.ru");
    }

    #[test]
    fn each_salary_bound_defaults_independently() {
        let data = json!({
            "objects": [
                {"profession": "A", "payment_to": 90000},
                {"profession": "B", "payment_from": 50000}
            ]
        });

        let vacancies = source().parse(&data, &rates());

        assert_eq!(vacancies[0].salary_from(), 0.0);
        assert_eq!(vacancies[0].salary_to(), 90_000.0);
        assert_eq!(vacancies[1].salary_from(), 50_000.0);
        assert_eq!(vacancies[1].salary_to(), 0.0);
    }

    #[test]
    fn euro_salary_is_converted_during_parse() {
        let data = json!({
            "objects": [{
                "profession": "Relocation",
                "payment_from": 3000,
                "payment_to": 4000,
                "currency": "EUR"
            }]
        });

        let vacancies = source().parse(&data, &rates());

        let v = &vacancies[0];
        assert_eq!(v.salary_from(), 300_000.0);
        assert_eq!(v.salary_to(), 400_000.0);
        match v.salary() {
            Some(Salary::Range(r)) => assert_eq!(r.currency, LOCAL_CURRENCY),
            other => panic!("expected structured salary, got {other:?}"),
        }
    }
}
