use crate::cli::actions::{schema, signin, signup, Action};
use anyhow::Result;

/// Execute the provided action.
// Single dispatch point for all CLI actions.
/// # Errors
/// Returns an error if the action fails.
pub async fn execute(action: Action) -> Result<()> {
    match action {
        Action::Signup(args) => signup::execute(args).await,
        Action::Signin(args) => signin::execute(args).await,
        Action::Schema(globals) => schema::execute(&globals).await,
    }
}
