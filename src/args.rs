use crate::config::AppConfig;

use bank::{Money, MoneyError, Quantizer, Result, DEFAULT_DATA_FILE};

use std::{env, path::PathBuf};

use thiserror::Error;

pub const USAGE: &str = "\
Usage: simple-bank [--file <path>] <command>

Commands:
  create <name> [initial_balance]
  deposit <account_number> <amount>
  withdraw <account_number> <amount>
  transfer <from_account_number> <to_account_number> <amount>
  show <account_number>
  list";

#[derive(Error, Debug)]
pub enum InputArgsError {
    #[error("Couldn't parse input arguments: {0}")]
    Parse(String),

    #[error("Invalid amount {0:?}: {1}")]
    Amount(String, String),
}

/// One ledger operation requested on the command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Create { name: String, initial_balance: Money },
    Deposit { id: String, amount: Money },
    Withdraw { id: String, amount: Money },
    Transfer { from: String, to: String, amount: Money },
    Show { id: String },
    List,
}

/// Parses the process arguments into the data file location and a command
pub fn parse_input_args() -> Result<AppConfig> {
    let config = parse_args(env::args().skip(1))?;

    Ok(config)
}

pub fn parse_args(
    args: impl IntoIterator<Item = String>,
) -> std::result::Result<AppConfig, InputArgsError> {
    let mut args = args.into_iter().peekable();
    let mut data_file = PathBuf::from(DEFAULT_DATA_FILE);

    while let Some(flag) = args.next_if(|arg| arg.starts_with('-')) {
        match flag.as_str() {
            "-f" | "--file" => {
                let path = args.next().ok_or_else(|| {
                    InputArgsError::Parse(format!("{flag} must be followed by a path"))
                })?;
                data_file = PathBuf::from(path);
            }
            _ => Err(InputArgsError::Parse(format!("Unknown option {flag:?}")))?,
        }
    }

    let command = parse_command(args)?;

    Ok(AppConfig { data_file, command })
}

fn parse_command(
    args: impl Iterator<Item = String>,
) -> std::result::Result<Command, InputArgsError> {
    let mut args = args.map(|arg| arg.trim().to_string());

    let name = args
        .next()
        .ok_or_else(|| InputArgsError::Parse("Missing command".to_string()))?;

    let command = match name.as_str() {
        "create" => {
            let name = required(&mut args, "create", "a holder name")?;
            let initial_balance = match args.next() {
                Some(balance) => parse_amount(&balance)?,
                None => Money::ZERO,
            };

            Command::Create {
                name,
                initial_balance,
            }
        }
        "deposit" => Command::Deposit {
            id: required(&mut args, "deposit", "an account number")?,
            amount: parse_amount(&required(&mut args, "deposit", "an amount")?)?,
        },
        "withdraw" => Command::Withdraw {
            id: required(&mut args, "withdraw", "an account number")?,
            amount: parse_amount(&required(&mut args, "withdraw", "an amount")?)?,
        },
        "transfer" => Command::Transfer {
            from: required(&mut args, "transfer", "a sender account number")?,
            to: required(&mut args, "transfer", "a recipient account number")?,
            amount: parse_amount(&required(&mut args, "transfer", "an amount")?)?,
        },
        "show" => Command::Show {
            id: required(&mut args, "show", "an account number")?,
        },
        "list" => Command::List,
        other => Err(InputArgsError::Parse(format!("Unknown command {other:?}")))?,
    };

    if let Some(extra) = args.next() {
        Err(InputArgsError::Parse(format!("Unexpected argument {extra:?}")))?
    }

    Ok(command)
}

fn required(
    args: &mut impl Iterator<Item = String>,
    command: &str,
    what: &str,
) -> std::result::Result<String, InputArgsError> {
    args.next()
        .ok_or_else(|| InputArgsError::Parse(format!("{command} needs {what}")))
}

/// Amounts are checked and brought to cents here, before they reach the ledger
fn parse_amount(input: &str) -> std::result::Result<Money, InputArgsError> {
    let amount = Money::parse(input).map_err(|e| match e {
        MoneyError::Parse(reason, _) => {
            InputArgsError::Amount(input.to_string(), reason.to_string())
        }
    })?;

    if amount.is_negative() {
        Err(InputArgsError::Amount(
            input.to_string(),
            "Amount cannot be negative".to_string(),
        ))?
    }

    Quantizer::CENTS.quantize(amount).ok_or_else(|| {
        InputArgsError::Amount(input.to_string(), "Amount is too large".to_string())
    })
}
