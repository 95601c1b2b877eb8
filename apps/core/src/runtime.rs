use std::path::PathBuf;

use crate::config::{self, ConfigError};
use crate::core_service::{DashboardService, ServiceError};
use crate::filter::TransactionFilter;
use crate::model::{decimal_text, Category};

const USAGE: &str = "usage: bankdash-core [--config <path>] [--data <path>] \
<search <query> | accounts|transactions|loans [--page N] | overview | json <payload>>";

#[derive(Debug)]
pub enum RuntimeError {
    Config(ConfigError),
    Service(ServiceError),
    Logging(std::io::Error),
}

impl std::fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Config(error) => write!(f, "config error: {error}"),
            Self::Service(error) => write!(f, "service error: {error}"),
            Self::Logging(error) => write!(f, "logging init failed: {error}"),
        }
    }
}

impl std::error::Error for RuntimeError {}

impl From<ConfigError> for RuntimeError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<ServiceError> for RuntimeError {
    fn from(value: ServiceError) -> Self {
        Self::Service(value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliCommand {
    Search(String),
    List { category: Category, page: usize },
    Overview,
    Json(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliOptions {
    pub config_path: Option<PathBuf>,
    pub data_path: Option<PathBuf>,
    pub command: CliCommand,
}

pub fn parse_cli_args(args: &[String]) -> Result<CliOptions, String> {
    let mut config_path = None;
    let mut data_path = None;
    let mut page = None;
    let mut positional: Vec<&str> = Vec::new();

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--config" => config_path = Some(PathBuf::from(flag_value(&mut iter, "--config")?)),
            "--data" => data_path = Some(PathBuf::from(flag_value(&mut iter, "--data")?)),
            "--page" => {
                let raw = flag_value(&mut iter, "--page")?;
                let parsed = raw
                    .parse::<usize>()
                    .map_err(|_| format!("invalid --page value '{raw}'"))?;
                page = Some(parsed);
            }
            "-h" | "--help" => return Err(USAGE.to_string()),
            other if other.starts_with("--") => return Err(format!("unknown flag '{other}'")),
            other => positional.push(other),
        }
    }

    let Some((&name, rest)) = positional.split_first() else {
        return Err(USAGE.to_string());
    };

    let command = match name {
        "search" => CliCommand::Search(rest.join(" ")),
        "overview" => CliCommand::Overview,
        "json" => {
            if rest.is_empty() {
                return Err("json command requires a payload".to_string());
            }
            CliCommand::Json(rest.join(" "))
        }
        other => match Category::parse(other) {
            Some(category) => CliCommand::List {
                category,
                page: page.unwrap_or(1),
            },
            None => return Err(format!("unknown command '{other}'\n{USAGE}")),
        },
    };

    if page.is_some() && !matches!(command, CliCommand::List { .. }) {
        return Err("--page only applies to listing commands".to_string());
    }

    Ok(CliOptions {
        config_path,
        data_path,
        command,
    })
}

fn flag_value<'a>(
    iter: &mut impl Iterator<Item = &'a String>,
    flag: &str,
) -> Result<&'a str, String> {
    iter.next()
        .map(String::as_str)
        .ok_or_else(|| format!("{flag} requires a value"))
}

pub fn run_with_options(options: CliOptions) -> Result<(), RuntimeError> {
    let mut config = config::load(options.config_path.as_deref())?;
    if let Some(data_path) = options.data_path {
        config.data_path = data_path;
    }

    let log_path = crate::logging::init(&config).map_err(RuntimeError::Logging)?;
    crate::logging::info(&format!(
        "startup config_path={} data_path={}",
        config.config_path.display(),
        config.data_path.display()
    ));
    println!("[bankdash-core] logging to {}", log_path.display());

    let service = DashboardService::new(config)?;
    for line in execute(&service, &options.command)? {
        println!("{line}");
    }
    Ok(())
}

/// Renders a command's output as printable lines.
pub fn execute(
    service: &DashboardService,
    command: &CliCommand,
) -> Result<Vec<String>, ServiceError> {
    let mut lines = Vec::new();
    match command {
        CliCommand::Search(query) => {
            let results = service.search(query);
            if results.is_empty() {
                lines.push("[bankdash-core] no results found".to_string());
                return Ok(lines);
            }
            lines.push(format!("[bankdash-core] {} result(s) for '{query}'", results.len()));
            for category in Category::ALL {
                lines.push(format!(
                    "[bankdash-core] {category}: {} match(es)",
                    results.count(category)
                ));
            }
            for hit in service.preview(query) {
                lines.push(format!("  {} -> {}", hit.label, hit.link));
            }
        }
        CliCommand::List { category, page } => {
            let (current, total, rows) = match category {
                Category::Accounts => {
                    let page = service.list_accounts(*page)?;
                    let rows = page
                        .items
                        .iter()
                        .map(|a| {
                            format!(
                                "  #{} {} ${}",
                                a.account_id,
                                a.account_type,
                                decimal_text(a.balance)
                            )
                        })
                        .collect::<Vec<_>>();
                    (page.current_page, page.total_pages, rows)
                }
                Category::Transactions => {
                    let page = service.list_transactions(&TransactionFilter::default(), *page)?;
                    let rows = page
                        .items
                        .iter()
                        .map(|t| {
                            format!(
                                "  {} {} ${} account #{} {}",
                                t.date,
                                t.transaction_type,
                                decimal_text(t.amount),
                                t.account_id,
                                t.status
                            )
                        })
                        .collect::<Vec<_>>();
                    (page.current_page, page.total_pages, rows)
                }
                Category::Loans => {
                    let page = service.list_loans(*page)?;
                    let rows = page
                        .items
                        .iter()
                        .map(|l| {
                            let branch = service.data().branch_name(l.branch_id).unwrap_or("-");
                            format!(
                                "  #{} ${} {}% {} {} ({branch})",
                                l.loan_id,
                                decimal_text(l.amount),
                                decimal_text(l.interest_rate),
                                l.status,
                                l.purpose
                            )
                        })
                        .collect::<Vec<_>>();
                    (page.current_page, page.total_pages, rows)
                }
            };
            lines.push(format!("[bankdash-core] {category} page {current} of {total}"));
            lines.extend(rows);
        }
        CliCommand::Overview => {
            let overview = service.overview();
            lines.push(format!(
                "[bankdash-core] total_balance=${} active_accounts={} total_transactions={}",
                decimal_text(overview.total_balance),
                overview.active_accounts,
                overview.total_transactions
            ));
            for t in overview.recent_transactions {
                lines.push(format!(
                    "  {} {} ${}",
                    t.date,
                    t.transaction_type,
                    decimal_text(t.amount)
                ));
            }
        }
        CliCommand::Json(payload) => {
            lines.push(crate::transport::handle_json(service, payload));
        }
    }
    Ok(lines)
}
