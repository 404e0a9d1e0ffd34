//! Authenticated session context.
//!
//! The acting username travels with each mutating call as an explicit
//! `Session` value instead of living in process-global state. A `Session`
//! can only be obtained through `login`.

use dialoguer::{Input, Password};
use fundbook_core::auth::Credentials;

/// An authenticated actor for the duration of one command.
#[derive(Debug, Clone)]
pub struct Session {
    username: String,
}

impl Session {
    pub fn username(&self) -> &str {
        &self.username
    }
}

/// Validate a username/password pair against the credential store.
///
/// The username comes from `--user`/`FUNDBOOK_USER` or an interactive
/// prompt; the password from `FUNDBOOK_PASSWORD` or a hidden prompt.
pub fn login(
    credentials: &Credentials,
    user: Option<&str>,
    no_input: bool,
) -> anyhow::Result<Session> {
    let username = match user {
        Some(value) => value.to_string(),
        None if no_input => {
            return Err(anyhow::anyhow!(
                "No username provided. Use --user or FUNDBOOK_USER."
            ));
        }
        None => Input::new()
            .with_prompt("Username")
            .interact_text()
            .map_err(|e| anyhow::anyhow!("Failed to read username: {}", e))?,
    };

    let password = read_password(no_input)?;
    if !credentials.validate(&username, &password) {
        return Err(anyhow::anyhow!("Invalid username or password"));
    }

    Ok(Session { username })
}

fn read_password(no_input: bool) -> anyhow::Result<String> {
    if let Ok(value) = std::env::var("FUNDBOOK_PASSWORD") {
        if !value.trim().is_empty() {
            return Ok(value);
        }
    }
    if no_input {
        return Err(anyhow::anyhow!(
            "No password provided. Set FUNDBOOK_PASSWORD when using --no-input."
        ));
    }
    Password::new()
        .with_prompt("Password")
        .interact()
        .map_err(|e| anyhow::anyhow!("Failed to read password: {}", e))
}
