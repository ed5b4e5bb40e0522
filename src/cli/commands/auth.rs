//! Account commands: signup, login, logout, whoami.

use issueboard_core::{BoardError, IdentityProvider, Result, workflow};

use crate::cli::{CommandContext, CredentialArgs};
use crate::format::print_json;

/// Execute the signup command.
///
/// The new account is signed out again so the user logs in explicitly.
///
/// # Errors
///
/// Returns a validation error for a bad email or password, or
/// `EmailInUse` if the account exists.
pub fn signup(args: &CredentialArgs, ctx: &CommandContext) -> Result<()> {
    let paths = ctx.paths()?;
    let mut identity = paths.open_identity()?;
    let user = workflow::sign_up(&mut identity, &args.email, &args.password)?;

    if ctx.is_json() {
        print_json(&user)?;
    } else {
        println!("Successfully signed up! Please log in.");
    }
    Ok(())
}

/// Execute the login command.
///
/// # Errors
///
/// Returns `InvalidCredentials` if the email or password is wrong.
pub fn login(args: &CredentialArgs, ctx: &CommandContext) -> Result<()> {
    let paths = ctx.paths()?;
    let mut identity = paths.open_identity()?;
    let user = workflow::log_in(&mut identity, &args.email, &args.password)?;

    if ctx.is_json() {
        print_json(&user)?;
    } else {
        println!("Logged in as {}", user.email);
    }
    Ok(())
}

/// Execute the logout command. Signing out twice is not an error.
///
/// # Errors
///
/// Returns an error if the session file cannot be removed.
pub fn logout(ctx: &CommandContext) -> Result<()> {
    let paths = ctx.paths()?;
    let mut identity = paths.open_identity()?;
    workflow::log_out(&mut identity)?;

    if ctx.is_json() {
        print_json(&serde_json::json!({ "signedIn": false }))?;
    } else {
        println!("Logged out.");
    }
    Ok(())
}

/// Execute the whoami command.
///
/// # Errors
///
/// Returns `NotAuthenticated` when nobody is signed in.
pub fn whoami(ctx: &CommandContext) -> Result<()> {
    let paths = ctx.paths()?;
    let identity = paths.open_identity()?;
    let user = identity.current_user().ok_or(BoardError::NotAuthenticated)?;

    if ctx.is_json() {
        print_json(&user)?;
    } else {
        println!("{}", user.email);
    }
    Ok(())
}
