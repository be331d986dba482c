use clap::Parser;
use tracing_subscriber::EnvFilter;

use jobscout::collectors::{self, HeadHunter, PAGE_SIZE, Platform, SuperJob, VacancySource};
use jobscout::config::{Command, Config, Order};
use jobscout::error::AppError;
use jobscout::rates;
use jobscout::store::{Criterion, JsonStore};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("jobscout=info")),
        )
        .init();

    let config = Config::parse();
    let store = JsonStore::new(config.store_path());

    match &config.command {
        Command::Fetch {
            query,
            platforms,
            count,
            sj_token,
            rates_key,
        } => {
            fetch(
                &store,
                query,
                platforms,
                *count,
                sj_token.as_deref(),
                rates_key,
            )
            .await?
        }
        Command::Query { filters, sort, top } => query(&store, filters, *sort, *top)?,
        Command::Delete { filters } => delete(&store, filters)?,
        Command::Count => println!("{}", store.len()?),
    }

    Ok(())
}

async fn fetch(
    store: &JsonStore,
    query: &str,
    platforms: &[Platform],
    count: u32,
    sj_token: Option<&str>,
    rates_key: &str,
) -> anyhow::Result<()> {
    let client = reqwest::Client::new();

    tracing::info!("Loading currency rates...");
    let rates = rates::load_rates(&client, rates_key).await?;

    let mut sources: Vec<Box<dyn VacancySource>> = Vec::with_capacity(platforms.len());
    for platform in platforms {
        sources.push(match platform {
            Platform::Hh => Box::new(HeadHunter::new(client.clone())),
            Platform::Sj => {
                let token = sj_token
                    .ok_or_else(|| anyhow::anyhow!("SJ_API_TOKEN is required for superjob.ru"))?;
                Box::new(SuperJob::new(client.clone(), token.to_string()))
            }
        });
    }

    let vacancies =
        collectors::runner::collect_all(&sources, query, count / PAGE_SIZE, &rates).await?;
    store.add_all(&vacancies)?;
    tracing::info!(
        "Saved {} vacancies to {}",
        vacancies.len(),
        store.path().display()
    );

    Ok(())
}

fn query(
    store: &JsonStore,
    filters: &[String],
    sort: Option<Order>,
    top: Option<usize>,
) -> anyhow::Result<()> {
    let criteria = parse_filters(filters)?;
    let mut matches = store.query_all(&criteria)?;

    match sort {
        Some(Order::Asc) => matches.sort(),
        Some(Order::Desc) => matches.sort_by(|a, b| b.cmp(a)),
        None => {}
    }
    if let Some(n) = top {
        matches.truncate(n);
    }

    for vacancy in &matches {
        println!("{vacancy}\n");
    }
    tracing::info!("{} vacancies matched", matches.len());

    Ok(())
}

fn delete(store: &JsonStore, filters: &[String]) -> anyhow::Result<()> {
    let criteria = parse_filters(filters)?;
    let doomed = store.query_all(&criteria)?;
    let removed = store.delete_all(&doomed)?;
    tracing::info!("Removed {removed} vacancies from {}", store.path().display());

    Ok(())
}

fn parse_filters(raw: &[String]) -> Result<Vec<Criterion>, AppError> {
    raw.iter()
        .map(|pair| {
            let (key, value) = pair
                .split_once('=')
                .ok_or_else(|| AppError::InvalidFilter(pair.clone()))?;
            Criterion::parse(key, value)
        })
        .collect()
}
