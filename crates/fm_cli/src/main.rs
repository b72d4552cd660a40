//! fm - Football Manager CLI
//!
//! Loads a season snapshot, runs one command against it and writes mutations
//! back (primary store first, backup location on failure).

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use env_logger::Env;
use fm_core::engine::EngineConfig;
use fm_core::models::{PlayerQuery, Position};
use fm_core::{SavedTo, Session, SnapshotStore};
use serde::Serialize;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "fm")]
#[command(about = "Simulate matches and manage a football season", long_about = None)]
struct Cli {
    /// Season data file (JSON)
    #[arg(long, global = true, default_value = "league.json")]
    data: PathBuf,

    /// Backup location used when the data file cannot be written
    #[arg(long, global = true)]
    backup: Option<PathBuf>,

    /// Engine config file (.yaml/.yml or .json)
    #[arg(long, global = true, conflicts_with = "preset")]
    config: Option<PathBuf>,

    /// Engine preset: realistic, arcade or defensive
    #[arg(long, global = true)]
    preset: Option<String>,

    /// Seed for reproducible matches
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Print JSON instead of text
    #[arg(long, global = true, default_value = "false")]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play one match and update the season
    Simulate {
        home: String,
        away: String,
    },

    /// Current market value of a player
    Value {
        player: String,
        /// Team of the player, when the name is shared
        #[arg(long)]
        team: Option<String>,
    },

    /// Move a player to another team for their market value
    Transfer {
        player: String,
        to: String,
        /// Current team of the player, when the name is shared
        #[arg(long)]
        from: Option<String>,
    },

    /// Per-90 and conversion metrics of a player
    Efficiency {
        player: String,
        #[arg(long)]
        team: Option<String>,
    },

    /// Squad summary of a team
    Report { team: String },

    /// League table
    Table,

    /// Top goal scorers
    Scorers {
        #[arg(long, default_value = "10")]
        limit: usize,
    },

    /// Search players
    Search {
        /// Name substring
        #[arg(long)]
        name: Option<String>,
        /// Team substring
        #[arg(long)]
        team: Option<String>,
        /// Position (GK, DF, MF, FW or full name)
        #[arg(long)]
        position: Option<Position>,
        #[arg(long)]
        min_rating: Option<u8>,
    },

    /// Played matches or completed transfers
    History {
        #[arg(long, default_value = "false")]
        transfers: bool,
    },

    /// Write the current season to the backup location
    Backup,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let config = load_config(&cli)?;
    let store = match &cli.backup {
        Some(backup) => SnapshotStore::new(&cli.data, backup),
        None => SnapshotStore::with_default_backup(&cli.data),
    };
    let mut session = Session::open(&store, config, cli.seed)
        .with_context(|| format!("Failed to load season data from {}", cli.data.display()))?;

    match cli.command {
        Commands::Simulate { home, away } => {
            let result = session.simulate_match(&home, &away)?;
            if cli.json {
                print_json(&result)?;
            } else {
                println!("{}", result);
                for event in &result.events {
                    println!("  {:>3}'  {:<6} {} ({})", event.minute, event.event_type, event.player, event.team);
                }
            }
            persist(&session, &store)?;
        }

        Commands::Value { player, team } => {
            let value = session.value(&player, team.as_deref())?;
            if cli.json {
                print_json(&value)?;
            } else {
                println!("{}: {}", player, value);
            }
        }

        Commands::Transfer { player, to, from } => {
            let record = match from {
                Some(from) => session.transfer_player_from(&player, &from, &to)?,
                None => session.transfer_player(&player, &to)?,
            };
            if cli.json {
                print_json(&record)?;
            } else {
                println!("{}: {} -> {} for {}", record.player, record.from_team, record.to_team, record.fee);
            }
            persist(&session, &store)?;
        }

        Commands::Efficiency { player, team } => {
            let eff = session.efficiency(&player, team.as_deref())?;
            if cli.json {
                print_json(&eff)?;
            } else {
                println!("{} ({})", eff.player, eff.team);
                println!("   Goals per 90:       {:.2}", eff.goals_per_90);
                println!("   Assists per 90:     {:.2}", eff.assists_per_90);
                println!("   Goal contributions: {}", eff.goal_contributions);
                println!("   Shot conversion:    {:.1}%", eff.shot_conversion_percent());
            }
        }

        Commands::Report { team } => {
            let report = session.team_report(&team)?;
            if cli.json {
                print_json(&report)?;
            } else {
                println!("{} (position {}, {} pts)", report.team_name, report.league_position, report.points);
                println!("   Squad size:     {}", report.squad_size);
                println!("   Top scorer:     {} ({})", report.top_scorer.name, report.top_scorer.count);
                println!("   Top assister:   {} ({})", report.top_assister.name, report.top_assister.count);
                println!("   Goals/assists:  {}/{}", report.total_goals, report.total_assists);
                println!("   Average age:    {:.1}", report.squad_age_average);
                println!("   Average rating: {:.1}", report.squad_rating_average);
            }
        }

        Commands::Table => {
            let table = session.league_table();
            if cli.json {
                print_json(&table)?;
            } else {
                println!("{:>3}  {:<24} {:>3} {:>4} {:>4}", "#", "Team", "P", "GD", "Pts");
                for row in &table {
                    println!(
                        "{:>3}  {:<24} {:>3} {:>4} {:>4}",
                        row.rank,
                        row.team,
                        row.played,
                        row.goal_difference(),
                        row.points
                    );
                }
            }
        }

        Commands::Scorers { limit } => {
            let scorers = session.top_scorers(limit);
            if cli.json {
                print_json(&scorers)?;
            } else {
                for (i, player) in scorers.iter().enumerate() {
                    println!(
                        "{:>3}. {:<24} {:<20} {:>3} goals {:>3} assists",
                        i + 1,
                        player.name,
                        player.team,
                        player.stats.goals,
                        player.stats.assists
                    );
                }
            }
        }

        Commands::Search { name, team, position, min_rating } => {
            let query = PlayerQuery { name, team, position, min_rating };
            let found = session.search(&query);
            if cli.json {
                print_json(&found)?;
            } else if found.is_empty() {
                println!("No players found");
            } else {
                for player in found {
                    println!(
                        "{:<24} {:<20} {:<10} age {:>2}  rating {:>2}",
                        player.name, player.team, player.position, player.age, player.rating
                    );
                }
            }
        }

        Commands::History { transfers } => {
            if transfers {
                let history = session.transfer_history();
                if cli.json {
                    print_json(&history)?;
                } else {
                    for t in history {
                        println!("{}  {}: {} -> {} for {}", t.date.format("%Y-%m-%d"), t.player, t.from_team, t.to_team, t.fee);
                    }
                }
            } else {
                let history = session.match_history();
                if cli.json {
                    print_json(&history)?;
                } else {
                    for m in history {
                        println!("{}  {}", m.played_at.format("%Y-%m-%d %H:%M"), m);
                    }
                }
            }
        }

        Commands::Backup => {
            session.save_backup(&store)?;
            println!("Backup written to {}", store.backup_path().display());
        }
    }

    Ok(())
}

fn load_config(cli: &Cli) -> Result<EngineConfig> {
    if let Some(path) = &cli.config {
        return EngineConfig::from_path(path)
            .with_context(|| format!("Failed to read engine config {}", path.display()));
    }
    match &cli.preset {
        Some(name) => match EngineConfig::preset(name) {
            Some(config) => Ok(config),
            None => bail!("Unknown preset '{}' (expected realistic, arcade or defensive)", name),
        },
        None => Ok(EngineConfig::default()),
    }
}

fn persist(session: &Session, store: &SnapshotStore) -> Result<()> {
    match session.persist(store).context("Failed to save season data")? {
        SavedTo::Primary => log::debug!("Season saved to {}", store.primary_path().display()),
        SavedTo::Backup => eprintln!(
            "warning: could not write {}, season saved to backup {}",
            store.primary_path().display(),
            store.backup_path().display()
        ),
    }
    Ok(())
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
