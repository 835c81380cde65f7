//! Binary entrypoint for the codexhunt CLI.
//!
//! Commands:
//! - `init` - create a starter `config.toml` and the catalog seed `data/seeds/catalog.json`
//! - `status` - print the player sidebar and the control panel
//! - `missions` / `badges` - print the mission archive or the achievement wall
//! - `play <mission>` - open an interactive mission terminal on stdin
//! - `submit <mission> <answer...>` - verify one answer and apply the reward
//! - `hint <mission> [query...]` - ask the oracle once
//! - `rename <name>` / `reset` - manage the saved snapshot
//!
//! See the library crate docs for module-level details: `codexhunt::`.
use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use log::{info, warn};
use std::time::Instant;
use tokio::io::{AsyncBufReadExt, BufReader};

use codexhunt::config::Config;
use codexhunt::hunt::{canonical_catalog, resolve_catalog, write_catalog_json, Completion};
use codexhunt::metrics;
use codexhunt::shell::render::{
    render_badges, render_briefing, render_dashboard, render_missions, render_sidebar,
    render_transcript,
};
use codexhunt::shell::{HintService, HuntShell, SubmitOutcome, TerminalInput};
use codexhunt::storage::JsonFileStore;

#[derive(Parser)]
#[command(name = "codexhunt")]
#[command(about = "A gamified progression tracker for a programming-puzzle treasure hunt")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path (can be used before or after subcommand)
    #[arg(short, long, default_value = "config.toml", global = true)]
    config: String,

    /// Verbose logging (-v, -vv for more; may appear before or after subcommand)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default configuration and catalog seed
    Init,
    /// Show the player status and the next mission
    Status,
    /// List every mission with its status
    Missions,
    /// Show unlocked and locked badges
    Badges,
    /// Open an interactive terminal for a mission (`:hint [question]`, `:back`)
    Play {
        /// Mission id (e.g. m001)
        mission: String,
    },
    /// Submit a single answer for a mission
    Submit {
        mission: String,
        /// Answer text; multiple words are joined with spaces
        #[arg(required = true, num_args = 1..)]
        answer: Vec<String>,
    },
    /// Ask the oracle for a hint
    Hint {
        mission: String,
        /// Optional question for the oracle
        query: Vec<String>,
    },
    /// Change the player name
    Rename { name: String },
    /// Delete all saved progress
    Reset,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Init writes the config, so it never reads one
    let config = if matches!(cli.command, Commands::Init) {
        init_logging(&None, cli.verbose);
        Config::default()
    } else {
        match Config::load(&cli.config).await {
            Ok(cfg) => {
                init_logging(&Some(cfg.clone()), cli.verbose);
                cfg
            }
            Err(e) => {
                init_logging(&None, cli.verbose);
                warn!("{} (using built-in defaults; run `codexhunt init`)", e);
                Config::default()
            }
        }
    };

    match cli.command {
        Commands::Init => run_init(&cli.config).await?,
        Commands::Status => {
            let shell = open_shell(&config);
            println!("{}", render_sidebar(shell.state(), shell.catalog()));
            println!();
            print!("{}", render_dashboard(shell.state(), shell.catalog()));
        }
        Commands::Missions => {
            let shell = open_shell(&config);
            print!("{}", render_missions(shell.state(), shell.catalog()));
        }
        Commands::Badges => {
            let shell = open_shell(&config);
            print!("{}", render_badges(shell.state(), shell.catalog()));
        }
        Commands::Play { mission } => {
            let mut shell = open_shell(&config);
            let hints = HintService::new(config.hint.clone());
            run_play(&mut shell, &hints, &mission).await?;
            let m = metrics::snapshot();
            info!(
                "Session metrics: answers {} ({} accepted, {} rejected), hints {} ({} failed), missions completed {}",
                m.answers_submitted,
                m.answers_accepted,
                m.answers_rejected,
                m.hints_requested,
                m.hints_failed,
                m.missions_completed
            );
        }
        Commands::Submit { mission, answer } => {
            let mut shell = open_shell(&config);
            let answer = answer.join(" ");
            let session = shell.open_mission(&mission)?;
            let skip = session.logs().len();
            let outcome = shell.submit(&answer, Instant::now());
            if let Some(session) = shell.active() {
                print!("{}", render_transcript(session, skip));
            }
            match outcome {
                SubmitOutcome::Accepted => {
                    shell.close_mission();
                    if let Completion::Applied(report) = shell.complete_now(&mission) {
                        println!("+{} XP", report.xp_awarded);
                        if report.leveled_up() {
                            println!("ACCESS LEVEL UP: {}", report.new_level);
                        }
                        for badge in &report.new_badges {
                            if let Ok(b) = shell.catalog().badge(badge) {
                                println!("BADGE UNLOCKED: {} {}", b.icon, b.name);
                            }
                        }
                    } else {
                        println!("Mission already completed; no reward applied.");
                    }
                    println!("{}", render_sidebar(shell.state(), shell.catalog()));
                }
                SubmitOutcome::Rejected => std::process::exit(1),
                SubmitOutcome::Ignored => {
                    eprintln!("Error: empty answer.");
                    std::process::exit(2);
                }
            }
        }
        Commands::Hint { mission, query } => {
            let mut shell = open_shell(&config);
            shell.open_mission(&mission)?;
            let query = query.join(" ");
            let request = shell
                .begin_hint(Some(&query))
                .ok_or_else(|| anyhow!("no hint available for {}", mission))?;
            let hints = HintService::new(config.hint.clone());
            let text = hints
                .request_hint(
                    &request.mission_title,
                    &request.mission_context,
                    &request.user_query,
                )
                .await;
            shell.finish_hint(&text);
            println!("{}", text);
        }
        Commands::Rename { name } => {
            let mut shell = open_shell(&config);
            shell.rename(&name)?;
            println!("{}", render_sidebar(shell.state(), shell.catalog()));
        }
        Commands::Reset => {
            let mut shell = open_shell(&config);
            shell.reset()?;
            println!("Progress reset.");
        }
    }

    Ok(())
}

async fn run_init(config_path: &str) -> Result<()> {
    info!("Initializing new codexhunt configuration");
    let cfg = Config::default();
    Config::create_default(config_path).await?;
    info!("Configuration file created at {}", config_path);

    tokio::fs::create_dir_all(&cfg.storage.data_dir).await?;
    if let Some(seed) = &cfg.storage.catalog_file {
        write_catalog_json(seed, &canonical_catalog())?;
        info!("Catalog seed written to {}", seed);
    }
    Ok(())
}

fn open_shell(config: &Config) -> HuntShell<JsonFileStore> {
    let catalog = resolve_catalog(config.storage.catalog_file.as_deref());
    let store = JsonFileStore::new(&config.storage.data_dir, &config.storage.save_key);
    HuntShell::open(catalog, store, config.hunt.clone())
}

async fn wait_for(deadline: Option<Instant>) {
    match deadline {
        Some(at) => tokio::time::sleep_until(tokio::time::Instant::from_std(at)).await,
        None => std::future::pending::<()>().await,
    }
}

async fn run_play(
    shell: &mut HuntShell<JsonFileStore>,
    hints: &HintService,
    mission_id: &str,
) -> Result<()> {
    let session = shell.open_mission(mission_id)?;
    print!("{}", render_briefing(session.mission()));
    println!("Type an answer, `:hint [question]` for help or `:back` to leave.");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdin_open = true;
    let mut printed = 0;

    loop {
        match shell.active() {
            Some(session) => {
                print!("{}", render_transcript(session, printed));
                printed = session.logs().len();
            }
            None => break,
        }
        if !stdin_open && !shell.has_pending() {
            break;
        }

        let deadline = shell.next_deadline();
        tokio::select! {
            line = lines.next_line(), if stdin_open => {
                let Some(line) = line? else {
                    stdin_open = false;
                    continue;
                };
                match TerminalInput::parse(&line) {
                    TerminalInput::Back => {
                        shell.close_mission();
                        break;
                    }
                    TerminalInput::Hint(query) => {
                        if let Some(request) = shell.begin_hint(query) {
                            if let Some(session) = shell.active() {
                                print!("{}", render_transcript(session, printed));
                                printed = session.logs().len();
                            }
                            let text = hints
                                .request_hint(
                                    &request.mission_title,
                                    &request.mission_context,
                                    &request.user_query,
                                )
                                .await;
                            shell.finish_hint(&text);
                        }
                    }
                    TerminalInput::Answer(answer) => {
                        shell.submit(answer, Instant::now());
                    }
                }
            }
            _ = wait_for(deadline) => {
                shell.tick(Instant::now());
            }
        }
    }

    println!();
    println!("{}", render_sidebar(shell.state(), shell.catalog()));
    print!("{}", render_dashboard(shell.state(), shell.catalog()));
    Ok(())
}

fn init_logging(config: &Option<Config>, verbosity: u8) {
    use std::io::Write;
    let mut builder = env_logger::Builder::new();
    // CLI verbosity overrides the configured level
    let configured = config
        .as_ref()
        .and_then(|c| c.logging.level.parse::<log::LevelFilter>().ok())
        .unwrap_or(log::LevelFilter::Info);
    let base_level = match verbosity {
        0 => configured,
        1 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    builder.filter_level(base_level);

    let log_file = config
        .as_ref()
        .and_then(|c| c.logging.file.as_ref())
        .and_then(|file| {
            std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(file)
                .ok()
        });

    if let Some(f) = log_file {
        let write_mutex = std::sync::Arc::new(std::sync::Mutex::new(f));
        // Echo to the console only when attached to a terminal
        let is_tty = atty::is(atty::Stream::Stderr);
        builder.format(move |fmt, record| {
            let ts = chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ");
            let line = format!("{} [{}] {}", ts, record.level(), record.args());
            if let Ok(mut guard) = write_mutex.lock() {
                let _ = writeln!(guard, "{}", line);
            }
            if is_tty {
                writeln!(fmt, "{}", line)
            } else {
                Ok(())
            }
        });
    } else {
        builder.format(|fmt, record| {
            let ts = chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ");
            writeln!(fmt, "{} [{}] {}", ts, record.level(), record.args())
        });
    }
    let _ = builder.try_init();
}
