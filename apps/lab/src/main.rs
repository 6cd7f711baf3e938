use std::{io::Write, path::PathBuf};

use anyhow::{Context, Result};
use catalog::{load_catalog, LabCatalog};
use clap::{Parser, Subcommand};
use lab_core::{ExperimentScreen, GoalBoard, ParentSummary, PuzzleDeck, QuizReview};
use shared::{
    domain::{ActionId, ExperimentId},
    protocol::LabRequest,
};
use tokio::io::BufReader;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod config;
mod controller;
mod render;
mod session;

use config::load_settings;
use session::{run_session, Presenter};

#[derive(Parser, Debug)]
#[command(name = "lab", about = "Fun Lab experiments from the terminal")]
struct Cli {
    /// Catalog TOML file; the built-in Fun Lab catalog is used when absent.
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,
    /// Pause in milliseconds between the "Mixing..." banner and the reaction reveal.
    #[arg(long, global = true)]
    delay_ms: Option<u64>,
    /// Print snapshots as JSON.
    #[arg(long, global = true)]
    json: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    List,
    Show {
        experiment: String,
    },
    Mix {
        experiment: String,
        reagents: Vec<String>,
    },
    Run {
        experiment: String,
        actions: Vec<String>,
    },
    Session {
        experiment: String,
    },
    Review {
        #[arg(long)]
        subject: Option<String>,
    },
    Goals {
        #[arg(long)]
        toggle: Vec<u32>,
    },
    /// Answer math puzzles in order; a correct answer moves to the next one.
    Puzzle {
        answers: Vec<String>,
    },
    /// Progress summary for parents, built from quiz results and daily goals.
    Parents,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut settings = load_settings();
    if let Some(path) = cli.catalog.clone() {
        settings.catalog_path = Some(path);
    }
    if let Some(ms) = cli.delay_ms {
        settings.reveal_delay_ms = ms;
    }

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&settings.log_filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    let catalog = match &settings.catalog_path {
        Some(path) => load_catalog(path)?,
        None => LabCatalog::builtin().context("built-in catalog is invalid")?,
    };
    info!(
        catalog = ?settings.catalog_path,
        experiments = catalog.experiments().len(),
        "lab ready"
    );

    let presenter = Presenter {
        json: cli.json,
        reveal_delay: settings.reveal_delay(),
    };
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Command::List => {
            if cli.json {
                writeln!(
                    out,
                    "{}",
                    serde_json::to_string_pretty(&serde_json::json!({
                        "reagents": catalog.reagents(),
                        "experiments": catalog.experiments(),
                    }))?
                )?;
            } else {
                write!(out, "{}", render::catalog_listing(&catalog))?;
            }
        }
        Command::Show { experiment } => {
            let screen = open_screen(&catalog, &experiment)?;
            if cli.json {
                writeln!(out, "{}", serde_json::to_string_pretty(screen.experiment())?)?;
            } else {
                write!(out, "{}", render::experiment_sheet(&catalog, screen.experiment()))?;
            }
        }
        Command::Mix {
            experiment,
            reagents,
        } => {
            let mut screen = open_screen(&catalog, &experiment)?;
            for raw in reagents {
                let event = screen.handle(LabRequest::AddReagent {
                    reagent_id: controller::reagent_id(&catalog, &raw),
                });
                presenter.present(&mut out, &catalog, &screen, &event).await?;
            }
        }
        Command::Run {
            experiment,
            actions,
        } => {
            let mut screen = open_screen(&catalog, &experiment)?;
            for action in actions {
                let event = screen.handle(LabRequest::AdvanceStep {
                    action_id: ActionId::new(action),
                });
                presenter.present(&mut out, &catalog, &screen, &event).await?;
            }
        }
        Command::Session { experiment } => {
            let mut screen = open_screen(&catalog, &experiment)?;
            if !cli.json {
                write!(out, "{}", render::experiment_sheet(&catalog, screen.experiment()))?;
                writeln!(out, "\n{}", controller::HELP)?;
            }
            let input = BufReader::new(tokio::io::stdin());
            let handled = run_session(&catalog, &mut screen, &presenter, input, &mut out).await?;
            info!(experiment = %experiment, handled, "session closed");
        }
        Command::Review { subject } => {
            let review = QuizReview::sample().context("sample quiz review is invalid")?;
            if cli.json {
                writeln!(out, "{}", serde_json::to_string_pretty(&review)?)?;
            } else {
                writeln!(out, "{}", render::quiz_review(&review, subject.as_deref()))?;
            }
        }
        Command::Goals { toggle } => {
            let mut board = GoalBoard::sample();
            let unknown = board.toggle_all(toggle);
            for id in &unknown {
                warn!(id, "no goal with this id");
            }
            if cli.json {
                writeln!(out, "{}", render::goal_board_json(&board, &unknown)?)?;
            } else {
                for id in &unknown {
                    writeln!(out, "no goal with id {id}")?;
                }
                writeln!(out, "{}", render::goal_board(&board))?;
            }
        }
        Command::Puzzle { answers } => {
            let mut deck = PuzzleDeck::sample();
            if !cli.json {
                writeln!(out, "{}", render::puzzle_card(deck.current()))?;
            }
            for answer in answers {
                let verdict = deck.answer(&answer);
                if cli.json {
                    writeln!(
                        out,
                        "{}",
                        serde_json::json!({
                            "answer": answer,
                            "verdict": verdict,
                            "next": deck.current(),
                        })
                    )?;
                } else {
                    writeln!(out, "{}", render::puzzle_verdict(&answer, verdict, deck.current()))?;
                }
            }
            info!(solved = deck.solved(), "puzzles finished");
        }
        Command::Parents => {
            let review = QuizReview::sample().context("sample quiz review is invalid")?;
            let summary = ParentSummary::build(&review, &GoalBoard::sample());
            if cli.json {
                writeln!(out, "{}", serde_json::to_string_pretty(&summary)?)?;
            } else {
                writeln!(out, "{}", render::parent_summary(&summary))?;
            }
        }
    }

    Ok(())
}

fn open_screen<'a>(catalog: &'a LabCatalog, experiment: &str) -> Result<ExperimentScreen<'a>> {
    Ok(ExperimentScreen::open(catalog, &ExperimentId::new(experiment))?)
}
