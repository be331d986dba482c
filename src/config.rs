use std::path::PathBuf;

use clap::Parser;

use crate::collectors::Platform;

#[derive(Parser, Debug, Clone)]
#[command(name = "jobscout", about = "Vacancy search across hh.ru and superjob.ru")]
pub struct Config {
    /// Directory holding the JSON data files
    #[arg(long, env = "JOBSCOUT_DATA_DIR", default_value = "data_json")]
    pub data_dir: PathBuf,

    /// Data file name inside the data directory
    #[arg(long, default_value = "vacancies.json")]
    pub file: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(clap::Subcommand, Debug, Clone)]
pub enum Command {
    /// Fetch vacancies from the selected platforms and store them
    Fetch {
        /// Search query
        query: String,

        /// Platforms to fetch from
        #[arg(long, value_enum, value_delimiter = ',',
              default_values_t = [Platform::Hh, Platform::Sj])]
        platforms: Vec<Platform>,

        /// How many vacancies to process, 50 per page
        #[arg(long, default_value_t = 50,
              value_parser = clap::value_parser!(u32).range(50..=1000))]
        count: u32,

        /// superjob.ru application token
        #[arg(long, env = "SJ_API_TOKEN", hide_env_values = true)]
        sj_token: Option<String>,

        /// exchangerates_data API key
        #[arg(long, env = "EXCHANGE_RATES_API_KEY", hide_env_values = true)]
        rates_key: String,
    },
    /// List stored vacancies matching the given filters
    Query {
        /// Filters: city, employer, salary=FROM-TO, description, requirements, source
        #[arg(long = "filter", value_name = "KEY=VALUE")]
        filters: Vec<String>,

        /// Sort the matches by salary
        #[arg(long, value_enum)]
        sort: Option<Order>,

        /// Keep only the first N records after sorting
        #[arg(long)]
        top: Option<usize>,
    },
    /// Delete stored vacancies matching the given filters
    Delete {
        /// Filters: city, employer, salary=FROM-TO, description, requirements, source
        #[arg(long = "filter", value_name = "KEY=VALUE")]
        filters: Vec<String>,
    },
    /// Print the number of stored vacancies
    Count,
}

#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Order {
    Asc,
    Desc,
}

impl Config {
    pub fn store_path(&self) -> PathBuf {
        self.data_dir.join(&self.file)
    }
}
