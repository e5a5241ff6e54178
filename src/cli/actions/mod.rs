pub mod schema;
pub mod signin;
pub mod signup;

// Internal "interpreter" for `Action`.
mod run;

use crate::cli::globals::GlobalArgs;
use secrecy::SecretString;

/// Email and password for a signup or signin, plus database settings.
#[derive(Debug)]
pub struct CredentialArgs {
    pub globals: GlobalArgs,
    pub email: String,
    pub password: SecretString,
}

#[derive(Debug)]
pub enum Action {
    Signup(CredentialArgs),
    Signin(CredentialArgs),
    Schema(GlobalArgs),
}

impl Action {
    /// Execute the action.
    /// # Errors
    /// Returns an error if the action fails.
    pub async fn execute(self) -> anyhow::Result<()> {
        run::execute(self).await
    }
}
