use bank::{Ledger, LedgerError, LoadStatus, Money, DEFAULT_DATA_FILE};

use std::{fs, path::Path, process::Command};

use rust_decimal_macros::dec;

fn run(data_file: &Path, args: &[&str]) -> (bool, String, String) {
    // Running the binary directly to prove everything works end to end
    let output = Command::new(env!("CARGO_BIN_EXE_simple-bank"))
        .arg("--file")
        .arg(data_file)
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .unwrap();

    (
        output.status.success(),
        String::from_utf8(output.stdout).unwrap(),
        String::from_utf8(output.stderr).unwrap(),
    )
}

#[test]
fn transfer_scenario() {
    let dir = tempfile::tempdir().unwrap();
    let mut ledger = Ledger::open(dir.path().join(DEFAULT_DATA_FILE));

    let alice = ledger
        .create_account("Alice", Money::new(dec!(100.00)))
        .unwrap()
        .id()
        .to_string();
    let bob = ledger
        .create_account("Bob", Money::new(dec!(50.00)))
        .unwrap()
        .id()
        .to_string();

    assert_eq!(alice, "ACC001");
    assert_eq!(bob, "ACC002");

    ledger
        .transfer(&alice, &bob, Money::new(dec!(75.00)))
        .unwrap();

    assert_eq!(ledger.find_account(&alice).unwrap().balance().to_string(), "25.00");
    assert_eq!(ledger.find_account(&bob).unwrap().balance().to_string(), "125.00");

    let err = ledger
        .transfer(&alice, &bob, Money::new(dec!(1000.00)))
        .unwrap_err();
    assert!(matches!(err, LedgerError::InsufficientFunds { .. }));

    assert_eq!(ledger.find_account(&alice).unwrap().balance().to_string(), "25.00");
    assert_eq!(ledger.find_account(&bob).unwrap().balance().to_string(), "125.00");
}

#[test]
fn save_then_load_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(DEFAULT_DATA_FILE);

    let mut ledger = Ledger::open(&path);
    ledger.create_account("Alice", Money::new(dec!(10.003))).unwrap();
    ledger.create_account("Doe, Jane", Money::new(dec!(0))).unwrap();
    ledger.create_account("Bob", Money::new(dec!(1234.5))).unwrap();
    ledger.deposit("ACC001", Money::new(dec!(0.007))).unwrap();
    ledger.save().unwrap();

    let mut reloaded = Ledger::open(&path);

    let snapshot = |ledger: &Ledger| {
        ledger
            .accounts()
            .map(|account| {
                (
                    account.id().to_string(),
                    account.holder_name().to_string(),
                    account.balance().to_string(),
                )
            })
            .collect::<Vec<_>>()
    };

    assert_eq!(snapshot(&reloaded), snapshot(&ledger));
    assert_eq!(
        snapshot(&reloaded)[0],
        ("ACC001".to_string(), "Alice".to_string(), "10.01".to_string())
    );

    let next = reloaded.create_account("Carol", Money::ZERO).unwrap();
    assert_eq!(next.id().as_str(), "ACC004");
    assert!(next.id().sequence().unwrap() > 3);
}

#[test]
fn malformed_rows_are_skipped() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(DEFAULT_DATA_FILE);
    fs::write(
        &path,
        "METADATA,5\n\
         account_number,name,balance\n\
         ACC001,Alice\n\
         ACC002,Bob,50.00\n\
         ACC003,Carol,30.00,extra\n\
         ACC004,Dave,not-a-number\n",
    )
    .unwrap();

    let mut ledger = Ledger::open(&path);

    assert_eq!(
        ledger.load_status(),
        &LoadStatus::Loaded {
            accounts: 1,
            skipped: 3,
            header_matched: true,
        }
    );
    assert_eq!(
        ledger.list_accounts(),
        vec!["Account Number: ACC002, Holder: Bob, Balance: 50.00"]
    );

    // Still usable after the partial load
    let id = ledger
        .create_account("Erin", Money::new(dec!(1)))
        .unwrap()
        .id()
        .to_string();
    assert_eq!(id, "ACC005");
    assert_eq!(
        ledger.deposit("ACC002", Money::new(dec!(5))),
        Ok(Some(Money::new(dec!(55.00))))
    );
}

#[test]
fn stale_metadata_is_reconciled() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(DEFAULT_DATA_FILE);
    fs::write(
        &path,
        "account_number,name,balance\n\
         ACC010,Alice,1.00\n\
         ACC004,Bob,2.00\n",
    )
    .unwrap();

    let mut ledger = Ledger::open(&path);

    assert_eq!(ledger.next_sequence(), 11);

    let id = ledger.create_account("Carol", Money::ZERO).unwrap().id().clone();
    assert_eq!(id.as_str(), "ACC011");
}

#[test]
fn binary_session() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(DEFAULT_DATA_FILE);

    let (ok, stdout, _) = run(&path, &["list"]);
    assert!(ok);
    assert_eq!(stdout, "No accounts in the system.\n");

    let (ok, stdout, _) = run(&path, &["create", "Alice", "100.00"]);
    assert!(ok);
    assert!(stdout.contains("Account Number: ACC001"));
    assert!(stdout.contains("Balance: $100.00"));

    let (ok, _, _) = run(&path, &["create", "Bob", "50"]);
    assert!(ok);

    let (ok, stdout, _) = run(&path, &["transfer", "ACC001", "ACC002", "75"]);
    assert!(ok);
    assert!(stdout.contains("New balance for ACC001: $25.00"));
    assert!(stdout.contains("New balance for ACC002: $125.00"));

    let (ok, _, stderr) = run(&path, &["transfer", "ACC001", "ACC002", "1000"]);
    assert!(!ok);
    assert!(stderr.contains("Insufficient funds in account ACC001"));

    let (ok, _, stderr) = run(&path, &["deposit", "ACC999", "10"]);
    assert!(!ok);
    assert!(stderr.contains("Account ACC999 not found."));

    let (ok, _, stderr) = run(&path, &["deposit", "ACC001", "ten"]);
    assert!(!ok);
    assert!(stderr.contains("Invalid amount"));

    let (ok, stdout, _) = run(&path, &["list"]);
    assert!(ok);
    assert_eq!(
        stdout,
        "Account Number: ACC001, Holder: Alice, Balance: 25.00\n\
         Account Number: ACC002, Holder: Bob, Balance: 125.00\n"
    );

    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "METADATA,3\n\
         account_number,name,balance\n\
         ACC001,Alice,25.00\n\
         ACC002,Bob,125.00\n"
    );
}

#[test]
fn binary_survives_unreadable_data_file() {
    let dir = tempfile::tempdir().unwrap();

    // The data file path is a directory, so it can be neither loaded nor saved
    let (ok, stdout, stderr) = run(dir.path(), &["list"]);
    assert!(ok);
    assert_eq!(stdout, "No accounts in the system.\n");
    assert!(stderr.contains("Starting with an empty ledger"));

    let (ok, _, stderr) = run(dir.path(), &["create", "Alice"]);
    assert!(!ok);
    assert!(stderr.contains("Error saving data"));
}
