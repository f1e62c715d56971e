//! `savepass` - CLI for registering and listing service logins
//!
//! This binary wires the register flow to a `SQLite` store, a terminal alert
//! and a navigator that renders the home listing after a successful save.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use std::io::BufRead;
use std::process::ExitCode;

use anyhow::{bail, Context};
use clap::Parser;
use tracing::debug;

mod cli;

use cli::{
    render_logins, Cli, Command, ConfigCommand, ListCommand, RegisterCommand, StatusCommand,
    StderrAlert, TerminalNavigator,
};
use savepass::{
    init_logging, AuthContext, Config, Field, LoginDataRepository, RegisterLoginData, Screen,
    SqliteStore, StaticSession, SubmitOutcome, User,
};

/// Exit code used when the form did not validate.
const EXIT_INVALID: u8 = 2;

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    init_logging(cli.verbosity());

    let config = Config::load_from(cli.config.clone())?;
    let user = cli.user.clone().map(User::new).or_else(|| config.user());

    match cli.command {
        Command::Register(cmd) => handle_register(&config, user, cmd).await,
        Command::List(cmd) => handle_list(&config, user, &cmd).await,
        Command::Status(cmd) => handle_status(&config, &cmd).await,
        Command::Config(cmd) => handle_config(&config, cmd),
    }
}

fn open_repository(config: &Config) -> anyhow::Result<LoginDataRepository<SqliteStore>> {
    let store = SqliteStore::open(config.database_path())?;
    Ok(LoginDataRepository::with_prefix(
        store,
        config.storage.key_prefix.clone(),
    ))
}

fn read_password_from_stdin() -> anyhow::Result<String> {
    let mut line = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut line)
        .context("failed to read password from stdin")?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

async fn handle_register(
    config: &Config,
    user: Option<User>,
    cmd: RegisterCommand,
) -> anyhow::Result<ExitCode> {
    let repository = open_repository(config)?;
    let session = user.map_or_else(StaticSession::anonymous, StaticSession::signed_in);
    let password = match cmd.password {
        Some(password) => password,
        None => read_password_from_stdin()?,
    };

    let mut navigator = TerminalNavigator::default();
    let mut alert = StderrAlert;
    let mut form = RegisterLoginData::new(&session, &mut navigator, &mut alert, &repository);
    form.set_field(Field::ServiceName, cmd.service_name);
    form.set_field(Field::Email, cmd.email);
    form.set_field(Field::Password, password);

    let outcome = form.submit().await;
    drop(form);

    match outcome {
        SubmitOutcome::Invalid(errors) => {
            for error in errors.iter() {
                eprintln!("{}: {}", error.field.title(), error.message);
            }
            Ok(ExitCode::from(EXIT_INVALID))
        }
        SubmitOutcome::Failed(err) => {
            debug!("Register failed: {err:?}");
            Ok(ExitCode::FAILURE)
        }
        SubmitOutcome::Saved(record) => {
            println!("Saved login for {}.", record.service_name);
            if navigator.current() == Some(Screen::Home) {
                if let Some(user) = session.user() {
                    let records = repository.list(&user.id).await?;
                    println!();
                    print!("{}", render_logins(&records, false));
                }
            }
            Ok(ExitCode::SUCCESS)
        }
    }
}

async fn handle_list(
    config: &Config,
    user: Option<User>,
    cmd: &ListCommand,
) -> anyhow::Result<ExitCode> {
    let Some(user) = user else {
        bail!("no user signed in; pass --user or set session.user_id in the config");
    };
    let repository = open_repository(config)?;

    let records = match &cmd.search {
        Some(query) => repository.search(&user.id, query).await?,
        None => repository.list(&user.id).await?,
    };

    if cmd.json {
        println!("{}", serde_json::to_string_pretty(&records)?);
    } else {
        print!("{}", render_logins(&records, cmd.reveal));
    }
    Ok(ExitCode::SUCCESS)
}

async fn handle_status(config: &Config, cmd: &StatusCommand) -> anyhow::Result<ExitCode> {
    let store = SqliteStore::open(config.database_path())?;
    let stats = store.stats().await?;

    if cmd.json {
        let status = serde_json::json!({
            "database_path": store.path(),
            "slots": stats.total_slots,
            "last_updated": stats.last_updated,
            "db_size_bytes": stats.db_size_bytes,
        });
        println!("{}", serde_json::to_string_pretty(&status)?);
    } else {
        println!("savepass status");
        println!("---------------");
        println!("Database:      {}", store.path().display());
        println!("Slots:         {}", stats.total_slots);
        match stats.last_updated {
            Some(ts) => println!("Last updated:  {}", ts.to_rfc3339()),
            None => println!("Last updated:  never"),
        }
        println!("Size:          {} bytes", stats.db_size_bytes);
    }
    Ok(ExitCode::SUCCESS)
}

fn handle_config(config: &Config, cmd: ConfigCommand) -> anyhow::Result<ExitCode> {
    match cmd {
        ConfigCommand::Show { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(config)?);
            } else {
                println!("Current Configuration");
                println!("=====================");
                println!();
                println!("[Storage]");
                println!("  Database path:  {}", config.database_path().display());
                println!("  Key prefix:     {}", config.storage.key_prefix);
                println!();
                println!("[Session]");
                println!(
                    "  User id:        {}",
                    config.session.user_id.as_deref().unwrap_or("(none)")
                );
            }
        }
        ConfigCommand::Path => {
            println!("{}", Config::default_config_path().display());
        }
        ConfigCommand::Validate { file } => {
            let path = file.unwrap_or_else(Config::default_config_path);
            println!("Validating configuration: {}", path.display());
            match Config::load_from(Some(path)) {
                Ok(_) => println!("Configuration is valid."),
                Err(e) => {
                    println!("Configuration error: {e}");
                    return Ok(ExitCode::FAILURE);
                }
            }
        }
    }
    Ok(ExitCode::SUCCESS)
}
