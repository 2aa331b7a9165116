use std::io::Write;

use anyhow::{Context as _, Result};
use chrono::Local;
use clap::Parser;
use tp_api::{ApiError, Client};
use tp_core::SystemClock;
use tracing_subscriber::EnvFilter;

use tp_cli::commands::delete::Mode;
use tp_cli::commands::{
    add, day, delete, delete_event, done, gap, list, login, logout, me, pause, pomodoro, start,
    task, update, update_event,
};
use tp_cli::token::{TokenStore, logged_in};
use tp_cli::{Cli, Commands, Config, Context};

async fn dispatch<W: Write>(writer: &mut W, config: &Config, command: &Commands) -> Result<()> {
    let tokens = TokenStore::new(&config.token_path);
    let client = tokens
        .load()?
        .map(|token| Client::with_token(&config.endpoint, token))
        .transpose()
        .context("failed to create API client")?;
    let session = client
        .as_ref()
        .map(|client| Context::new(client, &SystemClock, Local, config.day_shift));
    let ctx = || logged_in(session.as_ref());

    match command {
        Commands::Login(args) => {
            let anonymous =
                Client::anonymous(&config.endpoint).context("failed to create API client")?;
            let mut input = std::io::stdin().lock();
            login::run(writer, &mut input, client.as_ref(), &anonymous, &tokens, args).await
        }
        Commands::Logout => logout::run(writer, logged_in(client.as_ref())?, &tokens).await,
        Commands::My(args) => me::run(writer, ctx()?, args).await,
        Commands::List(args) => list::run(writer, ctx()?, args).await,
        Commands::Add(args) => add::run(writer, ctx()?, args).await,
        Commands::Update(args) => update::run(writer, ctx()?, args).await,
        Commands::Start(args) => start::run(writer, ctx()?, args).await,
        Commands::Pause => pause::run(writer, ctx()?).await,
        Commands::Done(args) => done::run(writer, ctx()?, args).await,
        Commands::Delete(args) => delete::run(writer, ctx()?, args, Mode::Delete).await,
        Commands::Remove(args) => delete::run(writer, ctx()?, args, Mode::Remove).await,
        Commands::Undelete(args) => delete::undelete(writer, ctx()?, args).await,
        Commands::Task(args) => task::run(writer, ctx()?, args).await,
        Commands::Day(args) => day::run(writer, ctx()?, args).await,
        Commands::UpdateEvent(args) => update_event::run(writer, ctx()?, args).await,
        Commands::DeleteEvent(args) => delete_event::run(writer, ctx()?, args, Mode::Delete).await,
        Commands::RemoveEvent(args) => delete_event::run(writer, ctx()?, args, Mode::Remove).await,
        Commands::Gap(args) => gap::run(writer, ctx()?, args).await,
        Commands::Pomodoro(args) => pomodoro::run(writer, ctx()?, args).await,
    }
}

/// Whether the failure came from the backend rejecting the stored token.
fn is_access_denied(err: &anyhow::Error) -> bool {
    err.chain()
        .filter_map(|cause| cause.downcast_ref::<ApiError>())
        .any(ApiError::is_access_denied)
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    // Logs go to stderr so command output stays pipeable.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();

    let Some(command) = &cli.command else {
        use clap::CommandFactory;
        Cli::command().print_help()?;
        println!();
        return Ok(());
    };

    let config = Config::load_from(cli.config.as_deref()).context("failed to load configuration")?;
    tracing::debug!(?config, "loaded configuration");

    let runtime = tokio::runtime::Runtime::new().context("failed to start async runtime")?;
    let mut stdout = std::io::stdout().lock();
    let result = runtime.block_on(dispatch(&mut stdout, &config, command));

    if result.as_ref().is_err_and(is_access_denied) {
        eprintln!("the stored login was rejected, run `todopeer login` again");
    }
    result
}
