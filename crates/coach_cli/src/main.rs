//! Coach CLI
//!
//! Command-line front end for the coaching engine: catalog listing, market
//! sampling, coach profiles, team reports and scripted roster sessions.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use coach_core::catalog::{CatalogSources, CatalogStore, CoachCatalog, JsonTeamSource};
use coach_core::config::DEFAULT_CONFIG_REL_PATH;
use coach_core::stats::{build_report, CoachProfile, Trend};
use coach_core::{
    CoachingConfig, MarketFilter, MarketSampler, Position, RosterEvent, RosterService,
    TeamSource,
};
use env_logger::Env;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "coach_cli", version = coach_core::VERSION)]
#[command(about = "Inspect coaches, sample hiring markets and preview team impact", long_about = None)]
struct Cli {
    /// YAML configuration file (defaults to data/coaching.yaml if present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// External coach feed (overrides config and environment)
    #[arg(long, global = true)]
    feed: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List every coach in the merged catalog
    Catalog {
        /// Category filter: all, O, D, S or a category name
        #[arg(long, default_value = "all")]
        category: MarketFilter,
    },

    /// Sample a hiring market
    Market {
        #[arg(long, default_value = "all")]
        category: MarketFilter,

        /// Number of candidates (defaults to market.slots)
        #[arg(long)]
        count: Option<usize>,

        /// Fixed RNG seed (defaults to market.seed, then entropy)
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Show one coach's profile
    Profile {
        #[arg(long)]
        name: String,

        /// Number of specialties to show (defaults to profile.top_specialties)
        #[arg(long)]
        top: Option<usize>,
    },

    /// Before/after team statistics for a coaching staff
    Report {
        #[arg(long)]
        team_id: String,

        /// Team feed file (defaults to team_feed_path)
        #[arg(long)]
        team_feed: Option<PathBuf>,

        /// Coach names making up the staff
        #[arg(long = "coach", num_args = 1..)]
        coaches: Vec<String>,
    },

    /// Run a scripted roster session
    Session {
        /// Coaches to hire, in order
        #[arg(long, num_args = 1..)]
        hire: Vec<String>,

        /// Positions to fire afterwards (Offense/Defense)
        #[arg(long, num_args = 1..)]
        fire: Vec<Position>,
    },
}

fn load_config(path: Option<&PathBuf>) -> Result<CoachingConfig> {
    match path {
        Some(path) => {
            if !path.exists() {
                bail!("Config file {} does not exist", path.display());
            }
            CoachingConfig::from_path(path)
                .with_context(|| format!("Failed to load config {}", path.display()))
        }
        None => CoachingConfig::from_path(DEFAULT_CONFIG_REL_PATH)
            .with_context(|| format!("Failed to load config {}", DEFAULT_CONFIG_REL_PATH)),
    }
}

fn load_catalog(cli: &Cli, config: &CoachingConfig) -> Arc<CoachCatalog> {
    let feed = cli.feed.clone().unwrap_or_else(|| config.feed_path());
    let store = CatalogStore::new(CatalogSources::with_feed(feed));
    let catalog = store.get_or_load();
    for error in store.load_errors() {
        eprintln!("warning: {}", error);
    }
    catalog
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let config = load_config(cli.config.as_ref())?;
    let catalog = load_catalog(&cli, &config);

    match &cli.command {
        Commands::Catalog { category } => print_catalog(&catalog, *category),
        Commands::Market { category, count, seed } => {
            let count = count.unwrap_or(config.market.slots);
            let mut sampler = match seed {
                Some(seed) => MarketSampler::with_seed(*seed),
                None => MarketSampler::from_config(&config.market),
            };
            println!("Hiring market [{}]", category);
            for coach in sampler.sample(&catalog, *category, count) {
                let summary = coach.summary();
                println!(
                    "  {:<20} {:<14} {}  ${}/wk{}",
                    summary.name,
                    summary.category.to_string(),
                    stars(summary.star_rating),
                    coach_core::stats::format_thousands(summary.weekly_salary),
                    if summary.placeholder { "  (open)" } else { "" }
                );
            }
        }
        Commands::Profile { name, top } => {
            let coach = catalog
                .by_name(name)
                .with_context(|| format!("No coach named '{}'", name))?;
            let profile =
                CoachProfile::from_record(coach, top.unwrap_or(config.profile.top_specialties));
            print_profile(&profile);
        }
        Commands::Report { team_id, team_feed, coaches } => {
            let path = team_feed.clone().unwrap_or_else(|| config.team_feed_path());
            let teams = JsonTeamSource::open(&path)
                .with_context(|| format!("Failed to read team feed {}", path.display()))?;
            let team = teams.team_by_id(team_id)?;
            let staff = coaches
                .iter()
                .map(|name| {
                    catalog.by_name(name).cloned().with_context(|| format!("No coach named '{}'", name))
                })
                .collect::<Result<Vec<_>>>()?;
            print_report(&build_report(&team, &staff));
        }
        Commands::Session { hire, fire } => run_session(&catalog, hire, fire)?,
    }

    Ok(())
}

fn stars(rating: u8) -> String {
    format!("{:<5}", "*".repeat(usize::from(rating)))
}

fn print_catalog(catalog: &CoachCatalog, filter: MarketFilter) {
    let mut shown = 0;
    for coach in catalog.iter().filter(|c| filter.matches(c)) {
        println!(
            "{:<20} {:<14} {} {:>4.1}  ${}M/yr",
            coach.name(),
            coach.category().to_string(),
            stars(coach.star_rating()),
            coach.overall_rating(),
            coach.salary()
        );
        shown += 1;
    }
    println!("{} of {} coaches", shown, catalog.len());
}

fn print_profile(profile: &CoachProfile) {
    println!("{}", profile.name);
    println!("  Experience:    {} years", profile.experience);
    println!("  Previous team: {}", profile.previous_team);
    println!("  Championships: {}", profile.championships);
    println!("  Specialties:");
    for entry in &profile.specialties {
        println!("    {:<22} {:>3}%", entry.label, entry.percent);
    }
    println!("  Contract:");
    for term in &profile.contract_terms {
        println!("    {:<16} {}", term.key, term.value);
    }
}

fn print_report(report: &coach_core::PerformanceReport) {
    println!("{}", report.team_name);
    for stat in &report.stats {
        let arrow = match stat.trend() {
            Trend::Up => "↑",
            Trend::Down => "↓",
            Trend::Unchanged => "=",
        };
        println!("  {:<22} {:>3}% -> {:>3}% {}", stat.label, stat.before, stat.after, arrow);
    }
    let summary = &report.summary;
    println!(
        "  Weekly investment: ${}",
        coach_core::stats::format_thousands(summary.weekly_investment)
    );
    println!("  Performance gain:  +{:.1}%", summary.performance_gain_percent);
    println!("  Playoff bonus:     ${}", coach_core::stats::format_thousands(summary.playoff_bonus));
    println!("  {}", summary.verdict());
}

fn run_session(catalog: &CoachCatalog, hire: &[String], fire: &[Position]) -> Result<()> {
    let roster = RosterService::new();
    roster.subscribe(|event: &RosterEvent| println!("  {}", event));

    for name in hire {
        let coach = catalog.by_name(name).with_context(|| format!("No coach named '{}'", name))?;
        if let Err(e) = roster.hire(coach) {
            println!("  ✗ {}", e);
        }
    }
    for position in fire {
        if let Err(e) = roster.fire(*position) {
            println!("  ✗ {}", e);
        }
    }

    for position in Position::ALL {
        match roster.occupant(position) {
            Some(coach) => println!("{:<8} {}", position.to_string(), coach.name()),
            None => println!("{:<8} (vacant)", position.to_string()),
        }
    }
    let bonus = roster.team_bonus();
    println!(
        "Team bonus: offense +{}, defense +{}, special teams +{} (total +{})",
        bonus.offense_bonus,
        bonus.defense_bonus,
        bonus.special_teams_bonus,
        bonus.total()
    );
    Ok(())
}
