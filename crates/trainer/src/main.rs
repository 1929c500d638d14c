//! Terminal opening trainer.
//!
//! One event loop owns the practice controller. Fetches run on tasks and
//! report back through a channel; the controller discards stale results.

use std::io::Write;
use std::sync::Arc;

use opening_core::model::RandomPick;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc::{self, UnboundedSender};
use tracing_subscriber::EnvFilter;

use trainer::client::{FetchError, HttpOpeningClient, OpeningSource};
use trainer::commands::{parse_command, Command, HELP};
use trainer::config::TrainerConfig;
use trainer::practice::{PracticeController, RandomRequest, VariationRequest};
use trainer::render;

enum Fetched {
    Variation(VariationRequest, Result<Vec<String>, FetchError>),
    Random(RandomRequest, Result<RandomPick, FetchError>),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Logs go to stderr so they don't interleave with the board.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = TrainerConfig::from_env();
    tracing::info!(api_url = %config.api_url, "Starting trainer");
    let client = Arc::new(HttpOpeningClient::new(&config)?);

    let mut trainer = PracticeController::new();
    let (tx, mut rx) = mpsc::unbounded_channel::<Fetched>();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    println!("{HELP}\n");
    show(&trainer);

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                let command = match parse_command(&line) {
                    Ok(command) => command,
                    Err(e) => {
                        println!("{e}");
                        prompt();
                        continue;
                    }
                };
                if command == Command::Quit {
                    break;
                }
                handle(command, &mut trainer, &client, &tx).await;
            }
            Some(fetched) = rx.recv() => match fetched {
                Fetched::Variation(request, result) => {
                    if trainer.finish_variation(request, result) {
                        show(&trainer);
                    }
                }
                Fetched::Random(request, result) => {
                    match trainer.finish_random(request, result) {
                        Some(follow_up) => spawn_variation(&client, &tx, follow_up),
                        None => show(&trainer),
                    }
                }
            },
        }
    }

    Ok(())
}

async fn handle(
    command: Command,
    trainer: &mut PracticeController,
    client: &Arc<HttpOpeningClient>,
    tx: &UnboundedSender<Fetched>,
) {
    match command {
        Command::Drop { from, to } => {
            trainer.attempt_move(from, to);
        }
        Command::Next => {
            trainer.step_forward();
        }
        Command::Prev => {
            trainer.step_backward();
        }
        Command::Reset => trainer.reset_board(),
        Command::Undo => {
            if !trainer.reset_to_last_good_position() {
                println!("No wrong move to undo.");
            }
        }
        Command::Free => trainer.enter_freeplay_mode(),
        Command::Load {
            opening_id,
            variation_name,
        } => {
            let request = trainer.begin_variation(opening_id, variation_name);
            println!("Loading {}...", request.variation_name);
            spawn_variation(client, tx, request);
            prompt();
            return;
        }
        Command::Random => {
            let request = trainer.begin_random();
            println!("Picking a random variation...");
            let client = Arc::clone(client);
            let tx = tx.clone();
            tokio::spawn(async move {
                let result = client.random_variation().await;
                let _ = tx.send(Fetched::Random(request, result));
            });
            prompt();
            return;
        }
        Command::List => {
            match client.list_openings().await {
                Ok(openings) => println!("{}", render::render_openings(&openings)),
                Err(e) => println!("Could not list openings: {e}"),
            }
            prompt();
            return;
        }
        Command::Detail(id) => {
            match client.opening_detail(id).await {
                Ok(opening) => println!("{}", render::render_detail(&opening)),
                Err(e) => println!("Could not load opening {id}: {e}"),
            }
            prompt();
            return;
        }
        Command::Help => {
            println!("{HELP}");
            prompt();
            return;
        }
        Command::Board | Command::Quit => {}
    }
    show(trainer);
}

fn spawn_variation(
    client: &Arc<HttpOpeningClient>,
    tx: &UnboundedSender<Fetched>,
    request: VariationRequest,
) {
    let client = Arc::clone(client);
    let tx = tx.clone();
    tokio::spawn(async move {
        let result = client
            .variation_moves(request.opening_id, &request.variation_name)
            .await;
        let _ = tx.send(Fetched::Variation(request, result));
    });
}

fn show(trainer: &PracticeController) {
    println!("\n{}", render::render_board(&trainer.current_position()));
    println!("{}", render::render_status(trainer.session()));
    prompt();
}

fn prompt() {
    print!("> ");
    let _ = std::io::stdout().flush();
}
