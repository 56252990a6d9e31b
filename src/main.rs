use clap::CommandFactory;
use folio::ContributionStats;
use folio::application::{Portfolio, refresh_cache};
use folio::config::{self, Cli, Commands, parse_args};
use folio::display;
use folio::infrastructure::{Cache, GitHubClient, cache_path};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = parse_args();
    init_logging();

    // Default to the activity view if no subcommand provided
    match cli.command.clone().unwrap_or(Commands::Activity { json: false }) {
        Commands::Repos { json } => {
            let portfolio = build_portfolio(&cli)?;
            match portfolio.repositories().await {
                Ok(repos) if json => println!("{}", serde_json::to_string_pretty(&repos)?),
                Ok(repos) if repos.is_empty() => {
                    if !cli.quiet {
                        println!("No public repositories for {}", portfolio.username());
                    }
                }
                Ok(repos) => println!("{}", display::repository_table(&repos)),
                Err(reason) => eprintln!("Repositories unavailable: {}", reason),
            }
        }

        Commands::Activity { json } => {
            let portfolio = build_portfolio(&cli)?;
            let report = portfolio.contributions().await;
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                println!("{}", display::heatmap(&report.contributions));
                println!("{}", display::stats_summary(&report.stats));
                if !cli.quiet {
                    println!("Source: {}", report.source);
                }
            }
        }

        Commands::Open { name } => {
            let portfolio = build_portfolio(&cli)?;
            let repos = portfolio
                .repositories()
                .await
                .map_err(|reason| anyhow::anyhow!("Cannot look up {}: {}", name, reason))?;
            let url = repos
                .iter()
                .find(|repo| repo.matches_name(&name))
                .and_then(|repo| repo.html_url.clone())
                .ok_or_else(|| anyhow::anyhow!("No listed repository named {}", name))?;
            if !cli.quiet {
                eprintln!("Opening: {}", url);
            }
            open::that(&url)?;
        }

        Commands::Data { action } => match action {
            config::DataCommands::Refresh => {
                let portfolio = build_portfolio(&cli)?;
                let cache = Cache::open()?;
                let result = refresh_cache(&portfolio, &cache, cli.quiet).await?;
                if !cli.quiet {
                    println!("{}", result);
                }
            }
            config::DataCommands::Clear => {
                let cache = Cache::open()?;
                cache.clear()?;
                if !cli.quiet {
                    println!("Cache cleared");
                }
            }
            config::DataCommands::Status => {
                let cache = Cache::open()?;
                let stats = cache.stats()?;
                if !cli.quiet {
                    println!("Cache Statistics:");
                    println!("  Repositories: {}", stats.repo_count);
                    println!("  Calendar days: {}", stats.day_count);
                    println!("  Size: {} bytes", stats.size_bytes);
                    match stats.refreshed_at {
                        Some(at) => println!("  Refreshed: {}", at.to_rfc3339()),
                        None => println!("  Refreshed: never"),
                    }
                } else {
                    // JSON output for quiet mode (script-friendly)
                    println!(
                        "{{\"repos\":{},\"days\":{},\"size\":{}}}",
                        stats.repo_count, stats.day_count, stats.size_bytes
                    );
                }
            }
            config::DataCommands::Export => {
                let cache = Cache::open()?;
                let repositories = cache.load_repositories()?;
                let contributions = cache.load_contributions()?;
                let stats = contributions
                    .last()
                    .map(|newest| ContributionStats::from_calendar(&contributions, newest.date))
                    .unwrap_or_default();

                #[derive(serde::Serialize)]
                struct ExportData {
                    repositories: Vec<folio::RepositorySummary>,
                    contributions: Vec<folio::ContributionDay>,
                    stats: ContributionStats,
                    source: Option<folio::CalendarSource>,
                }

                let data = ExportData {
                    repositories,
                    contributions,
                    stats,
                    source: cache.calendar_source()?,
                };
                println!("{}", serde_json::to_string_pretty(&data)?);
            }
            config::DataCommands::Reveal => {
                let path = cache_path()?;
                println!("{}", path.display());
            }
        },

        Commands::Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "folio", &mut std::io::stdout());
        }

        Commands::Version => {
            println!("folio {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}

fn build_portfolio(cli: &Cli) -> anyhow::Result<Portfolio> {
    let client = GitHubClient::new(&cli.github_settings())?;
    Ok(Portfolio::new(client, cli.outbound_policy()))
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
