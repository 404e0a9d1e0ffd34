//! `fundbook init`: create the data directory, ledger files, and the first
//! account.

use std::path::PathBuf;

use dialoguer::{Input, Password};

use fundbook_core::auth::Credentials;
use fundbook_core::LedgerService;

use crate::cli::{Cli, InitArgs};
use crate::context::AppContext;

pub fn run(ctx: &AppContext, cli: &Cli, args: &InitArgs) -> anyhow::Result<()> {
    let data_dir = args
        .dir
        .as_ref()
        .map(PathBuf::from)
        .unwrap_or_else(|| ctx.data_dir.clone());
    LedgerService::init(&data_dir)?;

    // The resolved context path already layers the flag, env, and config
    // file; only an explicit [DIR] argument relocates the users file.
    let users_file = match (&cli.users_file, &args.dir) {
        (Some(path), _) => PathBuf::from(path),
        (None, Some(_)) => data_dir.join("users.json"),
        (None, None) => ctx.users_file.clone(),
    };
    if !users_file.exists() {
        seed_first_account(&users_file, args)?;
    }

    if !ctx.quiet {
        println!("Initialized fund ledger at {}", data_dir.display());
    }
    Ok(())
}

fn seed_first_account(users_file: &std::path::Path, args: &InitArgs) -> anyhow::Result<()> {
    let username = match &args.username {
        Some(value) => value.clone(),
        None if args.no_input => {
            return Err(anyhow::anyhow!(
                "No username provided. Use --username with --no-input."
            ));
        }
        None => Input::new()
            .with_prompt("First account username")
            .interact_text()?,
    };
    let username = username.trim().to_string();
    if username.is_empty() {
        return Err(anyhow::anyhow!("Username must not be empty"));
    }

    let password = read_init_password(args)?;

    let mut credentials = Credentials::default();
    credentials.insert(username, password);
    credentials.save(users_file)?;
    Ok(())
}

fn read_init_password(args: &InitArgs) -> anyhow::Result<String> {
    if let Some(value) = &args.password {
        if !value.trim().is_empty() {
            return Ok(value.clone());
        }
    }
    if args.no_input {
        return Err(anyhow::anyhow!(
            "No password provided. Use --password or FUNDBOOK_PASSWORD with --no-input."
        ));
    }
    Password::new()
        .with_prompt("Enter password")
        .with_confirmation("Confirm password", "Passwords do not match")
        .interact()
        .map_err(|e| anyhow::anyhow!("Failed to read password: {}", e))
}
