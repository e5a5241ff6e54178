use crate::{auth::AuthService, cli::actions::CredentialArgs};
use anyhow::Result;
use secrecy::ExposeSecret;
use tracing::instrument;

/// Register a user and print it as JSON.
/// # Errors
/// Returns an error if the database is unreachable or signup is rejected.
#[instrument(skip(args), fields(email = %args.email))]
pub async fn execute(args: CredentialArgs) -> Result<()> {
    let store = args.globals.connect().await?;
    let service = AuthService::new(store);

    let user = service
        .signup(&args.email, args.password.expose_secret())
        .await?;

    println!("{}", serde_json::to_string_pretty(&user)?);

    Ok(())
}
