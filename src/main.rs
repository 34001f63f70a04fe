//! Modernity Survey command line entry point.
//!
//! ```text
//! modernity-survey [submit]   # score, store and print one submission from stdin
//! modernity-survey analyze    # score and print category responses, no database
//! ```

use clap::{Parser, Subcommand};
use std::error::Error;
use std::io::Read;
use std::process::ExitCode;
use std::sync::Arc;

use modernity_survey::adapters::{connect_pool, run_migrations, PostgresSurveyStore};
use modernity_survey::application::{
    AnalyzeSurveyHandler, AnalyzeSurveyQuery, PersistenceGateway, RetryPolicy,
    SubmitSurveyCommand, SubmitSurveyHandler,
};
use modernity_survey::config::AppConfig;
use modernity_survey::domain::report::ResponseTemplates;
use modernity_survey::domain::scoring::{ScoreEngine, WeightTable};
use modernity_survey::telemetry::init_tracing;

type BoxError = Box<dyn Error + Send + Sync>;

/// Modernity Survey - score worldview survey submissions
#[derive(Debug, Parser)]
#[command(name = "modernity-survey")]
#[command(version)]
#[command(about = "Scores worldview survey submissions read as JSON from stdin")]
struct Cli {
    /// Defaults to `submit`
    #[command(subcommand)]
    command: Option<Command>,
}

impl Cli {
    fn selected(&self) -> Command {
        self.command.unwrap_or(Command::Submit)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Subcommand)]
enum Command {
    /// Score one submission, store it and print the result
    Submit,
    /// Score one submission and print category responses, without storing it
    Analyze,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli.selected()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {}", err);
            ExitCode::FAILURE
        }
    }
}

async fn run(command: Command) -> Result<(), BoxError> {
    let config = AppConfig::load()?;
    match command {
        Command::Submit => config.validate()?,
        Command::Analyze => config.validate_offline()?,
    }
    init_tracing(&config.runtime)?;

    let weights = WeightTable::load(&config.scoring.weights_path)?;
    let engine = Arc::new(ScoreEngine::new(weights));

    let mut input = String::new();
    std::io::stdin().read_to_string(&mut input)?;

    let output = match command {
        Command::Analyze => {
            let templates = ResponseTemplates::load(&config.scoring.templates_path)?;
            let handler = AnalyzeSurveyHandler::new(engine, Arc::new(templates));
            let query: AnalyzeSurveyQuery = serde_json::from_str(&input)?;
            serde_json::to_string_pretty(&handler.handle(&query)?)?
        }
        Command::Submit => {
            let cmd: SubmitSurveyCommand = serde_json::from_str(&input)?;

            let pool = connect_pool(&config.database).await?;
            if config.database.run_migrations {
                run_migrations(&pool).await?;
            }

            let store = Arc::new(PostgresSurveyStore::new(pool.clone()));
            let gateway = PersistenceGateway::new(store, RetryPolicy::from(&config.persistence));
            let handler = SubmitSurveyHandler::new(engine, gateway);

            let result = handler.handle(cmd).await;
            pool.close().await;
            tracing::debug!("Database pool closed");

            serde_json::to_string_pretty(&result?)?
        }
    };

    println!("{}", output);
    Ok(())
}
