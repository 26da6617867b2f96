mod args;
mod config;

use args::Command;

use bank::{Ledger, LedgerError, LoadStatus, Result};

use std::process::ExitCode;

use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
enum CommandError {
    #[error(transparent)]
    Ledger(#[from] LedgerError),

    #[error("Account {0} not found.")]
    NotFound(String),
}

fn main() -> Result<ExitCode> {
    config::configure_logging()?;

    log::debug!("Logger configured. Parsing arguments...");

    let app = match args::parse_input_args() {
        Ok(app) => app,
        Err(e) => {
            eprintln!("{e}\n\n{}", args::USAGE);
            return Ok(ExitCode::from(2));
        }
    };

    log::debug!("Opening ledger at {:?}", app.data_file);

    let mut ledger = Ledger::open(&app.data_file);

    if let LoadStatus::Failed(reason) = ledger.load_status() {
        eprintln!(
            "Warning: couldn't load {:?} ({reason}). Starting with an empty ledger.",
            app.data_file
        );
    }

    log::debug!("Executing command: {:?}", app.command);

    let report = match execute(&mut ledger, app.command) {
        Ok(report) => report,
        Err(e) => {
            eprintln!("Error: {e}");
            return Ok(ExitCode::FAILURE);
        }
    };

    if report.changed {
        log::debug!("Ledger changed, saving...");

        if let Err(e) = ledger.save() {
            eprintln!("Error saving data: {e}");
            return Ok(ExitCode::FAILURE);
        }
    }

    for line in report.lines {
        println!("{line}");
    }

    Ok(ExitCode::SUCCESS)
}

/// What a successful command has to show, and whether the ledger needs saving afterwards
struct Report {
    lines: Vec<String>,
    changed: bool,
}

impl Report {
    fn changed(lines: Vec<String>) -> Self {
        Self {
            lines,
            changed: true,
        }
    }

    fn unchanged(lines: Vec<String>) -> Self {
        Self {
            lines,
            changed: false,
        }
    }
}

/// Runs one command against the ledger
fn execute(ledger: &mut Ledger, command: Command) -> std::result::Result<Report, CommandError> {
    let report = match command {
        Command::Create {
            name,
            initial_balance,
        } => {
            let account = ledger.create_account(&name, initial_balance)?;

            Report::changed(vec![
                "Account created successfully!".to_string(),
                format!("  Account Number: {}", account.id()),
                format!("  Holder Name: {}", account.holder_name()),
                format!("  Balance: ${}", account.balance()),
            ])
        }
        Command::Deposit { id, amount } => {
            let balance = ledger
                .deposit(&id, amount)?
                .ok_or_else(|| CommandError::NotFound(id.clone()))?;

            Report::changed(vec![
                "Deposit successful!".to_string(),
                format!("New balance for {id}: ${balance}"),
            ])
        }
        Command::Withdraw { id, amount } => {
            let balance = ledger
                .withdraw(&id, amount)?
                .ok_or_else(|| CommandError::NotFound(id.clone()))?;

            Report::changed(vec![
                "Withdrawal successful!".to_string(),
                format!("New balance for {id}: ${balance}"),
            ])
        }
        Command::Transfer { from, to, amount } => {
            ledger.transfer(&from, &to, amount)?;

            let mut lines = vec!["Transfer successful!".to_string()];
            for id in [&from, &to] {
                if let Some(account) = ledger.find_account(id) {
                    lines.push(format!("New balance for {id}: ${}", account.balance()));
                }
            }

            Report::changed(lines)
        }
        Command::Show { id } => {
            let account = ledger
                .find_account(&id)
                .ok_or_else(|| CommandError::NotFound(id.clone()))?;

            Report::unchanged(vec![
                format!("  Account Number: {}", account.id()),
                format!("  Holder Name: {}", account.holder_name()),
                format!("  Balance: ${}", account.balance()),
            ])
        }
        Command::List => Report::unchanged(ledger.list_accounts()),
    };

    Ok(report)
}
