mod api;
mod config;
mod error;
mod filters;
mod models;
mod present;
mod query;
mod session;
mod tui;

use anyhow::{Context, Result};
use api::{JobSearch, JobsApiClient};
use clap::{Args, Parser, Subcommand};
use config::Config;
use filters::{FilterState, Selection};
use models::{Benefit, EmploymentType, ExperienceLevel, JobRecord, SortMode};
use query::{build_params, encode_query, SearchContext};
use session::Session;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "jobboard")]
#[command(about = "Search job listings from the terminal")]
struct Cli {
    /// Path to config.toml (defaults to the user config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run one search and print the results
    Search {
        #[command(flatten)]
        context: ContextArgs,

        #[command(flatten)]
        filters: FilterArgs,

        /// Result order (relevance, date, salary)
        #[arg(short, long, default_value = "relevance")]
        sort: SortMode,

        /// Print the raw job records as JSON
        #[arg(long)]
        json: bool,
    },

    /// Browse jobs interactively
    Browse {
        #[command(flatten)]
        context: ContextArgs,

        #[command(flatten)]
        filters: FilterArgs,
    },

    /// Print the request parameters a search would send
    Params {
        #[command(flatten)]
        context: ContextArgs,

        #[command(flatten)]
        filters: FilterArgs,
    },
}

#[derive(Args, Debug, Clone)]
struct ContextArgs {
    /// Free-text search (defaults to "jobs")
    query: Option<String>,

    /// Location to search in (defaults to anywhere)
    #[arg(short, long)]
    location: Option<String>,
}

impl ContextArgs {
    fn to_context(&self) -> SearchContext {
        SearchContext::new(
            self.query.clone().unwrap_or_default(),
            self.location.clone().unwrap_or_default(),
        )
    }
}

#[derive(Args, Debug, Clone)]
struct FilterArgs {
    /// Employment type to include (fulltime, parttime, intern, contractor); repeatable
    #[arg(short = 't', long = "type", value_name = "TYPE")]
    employment: Vec<EmploymentType>,

    /// Only remote jobs
    #[arg(long)]
    remote: bool,

    /// Do not let the API translate the location
    #[arg(long)]
    no_translate: bool,

    /// Experience level (entry, mid, senior, executive); repeatable
    #[arg(short, long, value_name = "LEVEL")]
    experience: Vec<ExperienceLevel>,

    /// Minimum yearly salary
    #[arg(long, value_name = "AMOUNT")]
    min_salary: Option<u64>,

    /// Maximum yearly salary
    #[arg(long, value_name = "AMOUNT")]
    max_salary: Option<u64>,

    /// Required benefit (healthInsurance, dentalInsurance, visionInsurance,
    /// retirementPlan, paidTimeOff); repeatable
    #[arg(short, long = "benefit", value_name = "BENEFIT")]
    benefits: Vec<Benefit>,
}

impl FilterArgs {
    /// No `--type` flags means the default (all types).
    fn to_filters(&self) -> FilterState {
        let mut filters = FilterState::default();
        if !self.employment.is_empty() {
            filters.set_employment_types(Selection::from_values(self.employment.iter().copied()));
        }
        filters.set_remote_only(self.remote);
        filters.set_auto_translate_location(!self.no_translate);
        filters.set_experience_levels(Selection::from_values(self.experience.iter().copied()));
        filters.set_salary_range(self.min_salary, self.max_salary);
        filters.set_benefits(Selection::from_values(self.benefits.iter().copied()));
        filters
    }
}

fn init_stderr_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("jobboard=warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// The TUI owns the terminal, so browse mode logs to a file.
fn init_file_logging() -> Result<PathBuf> {
    let dir = config::log_dir();
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("Failed to create log directory {}", dir.display()))?;
    let path = dir.join("jobboard.log");
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("Failed to open log file {}", path.display()))?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("jobboard=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(path)
}

fn print_filter_summary(filters: &FilterState) {
    let tags = filters.describe_active_filters();
    if tags.is_empty() {
        println!("Filters: none");
    } else {
        let labels: Vec<String> = tags.into_iter().map(|t| t.label).collect();
        println!(
            "Filters ({}): {}",
            filters.active_filter_count(),
            labels.join(" | ")
        );
    }
}

fn print_jobs(jobs: &[JobRecord]) {
    if jobs.is_empty() {
        println!("{}", present::NO_JOBS_MESSAGE);
        return;
    }
    println!(
        "{:<4} {:<34} {:<22} {:<20} {:<22} {:>12}",
        "#", "TITLE", "COMPANY", "LOCATION", "SALARY", "POSTED"
    );
    println!("{}", "-".repeat(119));
    for (i, job) in jobs.iter().enumerate() {
        println!(
            "{:<4} {:<34} {:<22} {:<20} {:<22} {:>12}",
            i + 1,
            present::truncate(&job.title, 32),
            present::truncate(&job.company, 20),
            present::truncate(&job.location, 18),
            present::truncate(present::list_salary(job), 20),
            present::truncate(&job.time_ago_posted, 12)
        );
    }
    println!("\n{} job(s)", jobs.len());
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Params { context, filters } => {
            let params = build_params(&filters.to_filters(), &context.to_context());
            println!("{}", encode_query(&params));
        }

        Commands::Search {
            context,
            filters,
            sort,
            json,
        } => {
            init_stderr_logging();
            let config = Config::load(cli.config.as_deref())?;
            config.log_redacted();

            let filters = filters.to_filters();
            let params = build_params(&filters, &context.to_context());
            let client = JobsApiClient::new(&config)?;
            let runtime = tokio::runtime::Runtime::new().context("Failed to start async runtime")?;

            let mut jobs = runtime
                .block_on(client.search(params))
                .context("Search failed")?;
            present::sort_jobs(&mut jobs, sort);

            if json {
                println!("{}", serde_json::to_string_pretty(&jobs)?);
            } else {
                print_filter_summary(&filters);
                println!();
                print_jobs(&jobs);
            }
        }

        Commands::Browse { context, filters } => {
            let log_path = init_file_logging()?;
            let config = Config::load(cli.config.as_deref())?;
            config.log_redacted();

            let client = Arc::new(JobsApiClient::new(&config)?);
            let runtime = tokio::runtime::Runtime::new().context("Failed to start async runtime")?;
            let session = Session::new(context.to_context(), config.debounce)
                .with_filters(filters.to_filters());

            tracing::info!(log = %log_path.display(), "Starting browser");
            tui::run_browse(runtime.handle(), client, session, config.locations.clone())?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args).expect("valid args")
    }

    #[test]
    fn test_params_defaults() {
        let Commands::Params { context, filters } = parse(&["jobboard", "params"]).command else {
            panic!("expected params command");
        };
        assert_eq!(filters.to_filters(), FilterState::default());
        assert_eq!(
            encode_query(&build_params(&filters.to_filters(), &context.to_context())),
            "query=jobs&location=anywhere&autoTranslateLocation=true&remoteOnly=false&employmentTypes=fulltime%3Bparttime%3Bintern%3Bcontractor"
        );
    }

    #[test]
    fn test_search_flags_map_to_filters() {
        let cli = parse(&[
            "jobboard",
            "search",
            "rust",
            "--location",
            "Berlin",
            "--type",
            "contractor",
            "-t",
            "parttime",
            "--remote",
            "--no-translate",
            "-e",
            "senior",
            "--min-salary",
            "90000",
            "--benefit",
            "paidTimeOff",
            "--sort",
            "salary",
        ]);
        let Commands::Search {
            context,
            filters,
            sort,
            json,
        } = cli.command
        else {
            panic!("expected search command");
        };

        assert_eq!(sort, SortMode::Salary);
        assert!(!json);
        assert_eq!(context.to_context(), SearchContext::new("rust", "Berlin"));

        let filters = filters.to_filters();
        assert_eq!(filters.employment_types.join(), "contractor;parttime");
        assert!(filters.remote_only);
        assert!(!filters.auto_translate_location);
        assert_eq!(filters.experience_levels.join(), "senior");
        assert_eq!(filters.min_salary, Some(90_000));
        assert_eq!(filters.max_salary, None);
        assert_eq!(filters.benefits.join(), "paidTimeOff");
        assert_eq!(filters.active_filter_count(), 6);
    }

    #[test]
    fn test_bad_values_rejected() {
        assert!(Cli::try_parse_from(["jobboard", "search", "--type", "gig"]).is_err());
        assert!(Cli::try_parse_from(["jobboard", "search", "--sort", "oldest"]).is_err());
        assert!(Cli::try_parse_from(["jobboard", "search", "--min-salary", "lots"]).is_err());
    }
}
