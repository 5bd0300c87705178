//! Login, logout, and identity commands.

use clap::Args;
use serde::Serialize;

use alquiler_core::config::AppConfig;
use alquiler_core::error::AppError;
use alquiler_core::traits::IdentityProvider;

use crate::context::ClientContext;
use crate::output::{self, OutputFormat};

/// Arguments for `login`
#[derive(Debug, Args)]
pub struct LoginArgs {
    /// Account email (will prompt if not provided)
    #[arg(short, long)]
    pub email: Option<String>,

    /// Password (will prompt if not provided)
    #[arg(short, long)]
    pub password: Option<String>,
}

/// Identity summary for `whoami` and `login`
#[derive(Debug, Serialize)]
struct Identity {
    authenticated: bool,
    subject: Option<String>,
    role: Option<String>,
    expires_at: Option<String>,
}

/// Log in and persist the token
pub async fn login(
    args: &LoginArgs,
    config: &AppConfig,
    format: OutputFormat,
) -> Result<(), AppError> {
    let ctx = ClientContext::new(config).await?;

    let email = match &args.email {
        Some(e) => e.clone(),
        None => dialoguer::Input::new()
            .with_prompt("Email")
            .interact_text()
            .map_err(super::input_error)?,
    };

    let password = match &args.password {
        Some(p) => p.clone(),
        None => dialoguer::Password::new()
            .with_prompt("Password")
            .interact()
            .map_err(super::input_error)?,
    };

    let response = ctx.auth_api().login(&email, &password).await?;
    ctx.identity.set_token(&response.token);
    ctx.store.save(&response.token).await?;

    let role = response.rol.clone().or_else(|| ctx.identity.role());
    output::print_success(&format!(
        "Logged in as '{}'{}",
        email,
        role.as_deref()
            .map(|r| format!(" ({r})"))
            .unwrap_or_default()
    ));

    output::print_item(&identity(&ctx, role), format);
    Ok(())
}

/// Remove the saved token
pub async fn logout(config: &AppConfig) -> Result<(), AppError> {
    let ctx = ClientContext::new(config).await?;
    ctx.store.clear().await?;
    ctx.identity.clear();
    output::print_success("Logged out");
    if config.auth.token.is_some() {
        output::print_warning("A token is still configured via auth.token");
    }
    Ok(())
}

/// Show the identity carried by the current token
pub async fn whoami(config: &AppConfig, format: OutputFormat) -> Result<(), AppError> {
    let ctx = ClientContext::new(config).await?;
    let role = ctx.identity.role();
    output::print_item(&identity(&ctx, role), format);

    if ctx.identity.claims().is_some_and(|c| c.is_expired()) {
        output::print_warning("The token has expired; log in again");
    }
    Ok(())
}

fn identity(ctx: &ClientContext, role: Option<String>) -> Identity {
    let claims = ctx.identity.claims();
    Identity {
        authenticated: ctx.identity.is_authenticated(),
        subject: ctx.identity.subject(),
        role,
        expires_at: claims
            .and_then(|c| c.expires_at())
            .map(|at| at.format("%Y-%m-%d %H:%M UTC").to_string()),
    }
}
