//! Exchange-rate lookup against the apilayer exchangerates_data API.

use std::collections::HashMap;

use serde_json::Value;

use crate::error::AppError;
use crate::models::vacancy::LOCAL_CURRENCY;

const BASE_URL: &str = "https://api.apilayer.com/exchangerates_data/latest";

/// Currencies we convert into rubles during validation.
const CONVERTED: [&str; 2] = ["USD", "EUR"];

/// Fetch the ruble rate for one base currency.
pub async fn currency_rate(
    client: &reqwest::Client,
    api_key: &str,
    base: &str,
) -> Result<f64, AppError> {
    let resp = client
        .get(BASE_URL)
        .header("apikey", api_key)
        .query(&[("base", base)])
        .send()
        .await?;

    let status = resp.status();
    if !status.is_success() {
        return Err(AppError::from_status("exchangerates", status.as_u16()));
    }

    let body: Value = resp.json().await?;
    body.pointer(&format!("/rates/{LOCAL_CURRENCY}"))
        .and_then(Value::as_f64)
        .ok_or_else(|| AppError::MissingRate(base.to_string()))
}

/// Build the rate table handed to every validation pass: one ruble rate per
/// converted currency, fetched sequentially.
pub async fn load_rates(
    client: &reqwest::Client,
    api_key: &str,
) -> Result<HashMap<String, f64>, AppError> {
    let mut rates = HashMap::with_capacity(CONVERTED.len());
    for currency in CONVERTED {
        let rate = currency_rate(client, api_key, currency).await?;
        tracing::debug!("Rate {currency} -> {LOCAL_CURRENCY}: {rate}");
        rates.insert(currency.to_string(), rate);
    }
    Ok(rates)
}
