use crate::cli::{
    actions::{Action, CredentialArgs},
    commands::{
        ARG_DB_PASSWORD, ARG_DSN, ARG_EMAIL, ARG_MAX_CONNECTIONS, ARG_PASSWORD, CMD_SCHEMA,
        CMD_SIGNIN, CMD_SIGNUP,
    },
    globals::{GlobalArgs, DEFAULT_MAX_CONNECTIONS},
};
use anyhow::{anyhow, Context, Result};
use secrecy::SecretString;

/// # Errors
/// Returns an error if required arguments are missing.
pub fn handler(matches: &clap::ArgMatches) -> Result<Action> {
    let dsn = matches
        .get_one::<String>(ARG_DSN)
        .cloned()
        .context("missing required argument: --dsn")?;

    let mut globals = GlobalArgs::new(dsn);
    globals.max_connections = matches
        .get_one::<u32>(ARG_MAX_CONNECTIONS)
        .copied()
        .unwrap_or(DEFAULT_MAX_CONNECTIONS);

    if let Some(password) = matches.get_one::<String>(ARG_DB_PASSWORD) {
        globals.set_db_password(SecretString::from(password.clone()));
    }

    match matches.subcommand() {
        Some((CMD_SIGNUP, sub)) => Ok(Action::Signup(credentials(globals, sub)?)),
        Some((CMD_SIGNIN, sub)) => Ok(Action::Signin(credentials(globals, sub)?)),
        Some((CMD_SCHEMA, _)) => Ok(Action::Schema(globals)),
        Some((name, _)) => Err(anyhow!("unknown subcommand: {name}")),
        None => Err(anyhow!("missing subcommand")),
    }
}

fn credentials(globals: GlobalArgs, matches: &clap::ArgMatches) -> Result<CredentialArgs> {
    let email = matches
        .get_one::<String>(ARG_EMAIL)
        .cloned()
        .context("missing required argument: --email")?;

    let password = matches
        .get_one::<String>(ARG_PASSWORD)
        .cloned()
        .map(SecretString::from)
        .context("missing required argument: --password")?;

    Ok(CredentialArgs {
        globals,
        email,
        password,
    })
}
