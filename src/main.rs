use anyhow::{Context, Result};
use chess_controller::core::{ControllerConfig, FileStore, KeyValueStore, MemoryStore};
use chess_controller::game::resources::engine::{EngineBridge, LocalEngine};
use chess_controller::game::resources::NoticeKind;
use chess_controller::game::types::{Color, Position};
use chess_controller::game::{ClickOutcome, SelectionController};
use clap::Parser;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Play chess against the bundled engine from a terminal
#[derive(Parser, Debug)]
#[command(name = "chess-controller", version)]
struct Args {
    /// Config file (defaults to config.json in the user config directory)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory for persisted stats (defaults to the user data directory)
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Keep stats in memory only
    #[arg(long)]
    no_persist: bool,

    /// Play Black instead of White
    #[arg(long)]
    black: bool,

    /// Seed for the engine's move picker
    #[arg(long)]
    seed: Option<u64>,
}

const HELP: &str = "\
commands:
  new [difficulty]   start a game (difficulty 1-8)
  click <square>     click a square, e.g. click e2
  <square>           same as click
  promote <choice>   answer a promotion prompt (q, r, b, n)
  resign             resign the current game
  reset              clear the board
  board              show the board
  history            show the move list
  stats              show games played, wins and draws
  quit               leave";

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let mut config = ControllerConfig::load_or_default(args.config.as_deref());
    if args.black {
        config.human_white = false;
        config.human_black = true;
    }

    let store: Box<dyn KeyValueStore> = if args.no_persist {
        Box::new(MemoryStore::new())
    } else {
        match args.data_dir {
            Some(dir) => Box::new(FileStore::new(dir)),
            None => Box::new(FileStore::in_user_data_dir()),
        }
    };
    let engine = match args.seed {
        Some(seed) => LocalEngine::with_seed(seed),
        None => LocalEngine::new(),
    };
    let mut controller =
        SelectionController::new(config, EngineBridge::new(Box::new(engine)), store);
    info!("[MAIN] Controller ready");

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    println!("{HELP}");
    print_board(&controller);

    loop {
        prompt("> ")?;
        let Some(line) = lines.next() else {
            break;
        };
        let line = line.context("failed to read command")?;
        let mut words = line.split_whitespace();
        let Some(command) = words.next() else {
            continue;
        };
        let argument = words.next();

        match command {
            "quit" | "exit" => break,
            "help" => println!("{HELP}"),
            "new" => {
                let difficulty = match argument.map(str::parse::<u8>) {
                    Some(Ok(level)) => Some(level),
                    Some(Err(_)) => {
                        println!("difficulty must be a number from 1 to 8");
                        continue;
                    }
                    None => None,
                };
                if !controller.start_new_game(difficulty) {
                    println!("no engine available");
                }
            }
            "click" => match argument.and_then(Position::from_algebraic) {
                Some(pos) => click(&mut controller, pos, &mut lines)?,
                None => println!("usage: click <square>"),
            },
            "promote" => {
                report(controller.choose_promotion(argument));
            }
            "resign" => {
                prompt("Are you sure you want to resign? (y/n) ")?;
                let answer = lines.next().transpose()?.unwrap_or_default();
                if answer.trim().eq_ignore_ascii_case("y") {
                    controller.resign();
                }
            }
            "reset" => controller.reset(),
            "board" => {}
            "history" => {
                for line in controller.move_list() {
                    println!("{line}");
                }
                continue;
            }
            "stats" => {
                let stats = controller.stats();
                println!(
                    "played {}  wins {}  draws {}",
                    stats.played, stats.wins, stats.draws
                );
                continue;
            }
            other => match Position::from_algebraic(other) {
                Some(pos) => click(&mut controller, pos, &mut lines)?,
                None => {
                    println!("unknown command {other:?}, try help");
                    continue;
                }
            },
        }

        controller.process_engine_updates();
        print_board(&controller);
    }

    Ok(())
}

fn click<B: BufRead>(
    controller: &mut SelectionController,
    pos: Position,
    lines: &mut io::Lines<B>,
) -> Result<()> {
    let outcome = controller.click(pos);
    if let ClickOutcome::PromotionRequired { .. } = outcome {
        report(outcome);
        prompt("Promote to (q/r/b/n): ")?;
        let choice = lines.next().transpose()?;
        report(controller.choose_promotion(choice.as_deref()));
    } else {
        report(outcome);
    }
    Ok(())
}

fn report(outcome: ClickOutcome) {
    match outcome {
        ClickOutcome::Selected { possible_moves, .. } => {
            let targets: Vec<String> = possible_moves.iter().map(|p| p.to_algebraic()).collect();
            println!("moves: {}", targets.join(" "));
        }
        ClickOutcome::PromotionRequired { from, to } => println!("{from}-{to} promotes"),
        ClickOutcome::Moved(mv) => println!("played {mv}"),
        ClickOutcome::Ignored | ClickOutcome::Deselected | ClickOutcome::Rejected { .. } => {}
    }
}

fn print_board(controller: &SelectionController) {
    print!("{}", controller.view().render_text());
    let captured = controller.captured();
    println!(
        "captured  white: {}  black: {}  (material {:+})",
        captured.display(Color::White),
        captured.display(Color::Black),
        captured.material_advantage()
    );
    println!("{} | {}", controller.status_text(), controller.turn_text());
    if let Some(notice) = controller.notices().active() {
        let tag = match notice.kind {
            NoticeKind::Info => "info",
            NoticeKind::Success => "ok",
            NoticeKind::Error => "error",
        };
        println!("[{tag}] {}", notice.text);
    }
}

fn prompt(text: &str) -> Result<()> {
    print!("{text}");
    io::stdout().flush().context("failed to flush stdout")
}
