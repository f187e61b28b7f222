use std::process::ExitCode;

use clap::Parser;
use codebreaker::adapters::hints_http::HttpHintProvider;
use codebreaker::adapters::rounds_sea::SeaRoundStore;
use codebreaker::config::db::DbProfile;
use codebreaker::config::game::GameConfig;
use codebreaker::console::{self, ConsoleCommand, HELP, HISTORY_LIMIT};
use codebreaker::domain::knowledge::KnowledgeBoard;
use codebreaker::error::AppError;
use codebreaker::infra::db::connect_db;
use codebreaker::services::game_flow::GameFlowService;
use codebreaker::services::hints::HintService;
use codebreaker::telemetry;
use time::OffsetDateTime;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "codebreaker")]
#[command(about = "Crack the hidden digit code")]
struct Args {
    /// Play today's shared four-digit challenge instead of a random code
    #[arg(long)]
    daily: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    telemetry::init_tracing();
    let args = Args::parse();

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "codebreaker stopped");
            eprintln!("❌ {}", e.detail());
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> Result<(), AppError> {
    let config = GameConfig::from_env()?;
    let db = connect_db(DbProfile::Prod).await?;
    let store = SeaRoundStore::new(db);

    let hints = match &config.hint_url {
        Some(url) => Some(HintService::new(
            HttpHintProvider::new(url.clone())?,
            config.hint_timeout,
        )),
        None => None,
    };

    let flow = if args.daily {
        GameFlowService::daily(store, config, OffsetDateTime::now_utc().date())
    } else {
        GameFlowService::new(store, config)
    };
    info!(mode = ?flow.mode(), hints = hints.is_some(), "codebreaker started");

    let mut board = KnowledgeBoard::new();
    let round = flow.active_round().await?;
    say(&console::render_round(&round)).await;
    say("Type ':help' for commands.").await;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        prompt().await;
        let Some(line) = lines
            .next_line()
            .await
            .map_err(|e| AppError::internal(format!("stdin: {e}")))?
        else {
            break;
        };

        let command = match console::parse_command(&line) {
            Ok(Some(c)) => c,
            Ok(None) => continue,
            Err(msg) => {
                say(&msg).await;
                continue;
            }
        };

        let outcome = match command {
            ConsoleCommand::Quit => break,
            ConsoleCommand::Help => Ok(HELP.to_string()),
            ConsoleCommand::Guess(text) => flow
                .submit_guess(&text)
                .await
                .map(|r| console::render_submit(&r)),
            ConsoleCommand::NewRound => flow.reset_round().await.map(|view| {
                board.reset();
                console::render_round(&view)
            }),
            ConsoleCommand::Hint => match &hints {
                Some(service) => ask_for_hint(service, &flow).await,
                None => Err(AppError::hint_unavailable("No hint service is configured")),
            },
            ConsoleCommand::History => flow
                .history(HISTORY_LIMIT)
                .await
                .map(|rounds| console::render_history(&rounds)),
            ConsoleCommand::Review(id) => flow
                .review(id)
                .await
                .map(|review| console::render_review(&review)),
            ConsoleCommand::Mark(digit) => board
                .toggle(digit)
                .map(|_| console::render_board(&board))
                .map_err(AppError::from),
            ConsoleCommand::Board => Ok(console::render_board(&board)),
            ConsoleCommand::Secret => flow.debug_secret().await.map(|code| code.to_string()),
        };

        match outcome {
            Ok(text) => say(&text).await,
            Err(e) if e.is_user_recoverable() || is_notice(&e) => say(&e.detail()).await,
            Err(e) => {
                error!(error = %e, "command failed");
                say(&format!("⚠️  {}", e.detail())).await;
            }
        }
    }

    info!("codebreaker finished");
    Ok(())
}

async fn ask_for_hint(
    service: &HintService<HttpHintProvider>,
    flow: &GameFlowService<SeaRoundStore>,
) -> Result<String, AppError> {
    let token = CancellationToken::new();
    let watcher = {
        let token = token.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                token.cancel();
            }
        })
    };
    say("Thinking... (Ctrl-C to cancel)").await;
    let result = service.hint(flow, &token).await;
    watcher.abort();
    result.map(|hint| format!("💡 {hint}"))
}

/// Failures that are part of normal play and not worth an error log.
fn is_notice(e: &AppError) -> bool {
    matches!(
        e,
        AppError::HintCancelled
            | AppError::HintUnavailable { .. }
            | AppError::Forbidden { .. }
            | AppError::NotFound { .. }
    )
}

async fn say(text: &str) {
    let mut out = tokio::io::stdout();
    let _ = out.write_all(text.as_bytes()).await;
    let _ = out.write_all(b"\n").await;
    let _ = out.flush().await;
}

async fn prompt() {
    let mut out = tokio::io::stdout();
    let _ = out.write_all(b"> ").await;
    let _ = out.flush().await;
}
