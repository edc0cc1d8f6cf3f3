use std::sync::Arc;

use anyhow::{Context, Result};
use colored::Colorize;
use felis_application::{AuthGateway, ProfileView};
use felis_core::guard::{Navigator, Route};
use felis_core::validation::RegistrationForm;
use felis_interaction::HttpAuthApi;

use super::context::AppContext;

fn gateway(ctx: &AppContext) -> Result<AuthGateway> {
    let api = HttpAuthApi::from_config(&ctx.config.api).context("Failed to set up auth client")?;
    Ok(AuthGateway::new(Arc::new(api), ctx.session.clone()))
}

pub async fn login(ctx: &AppContext, email: &str, password: &str) -> Result<()> {
    if ctx.guard.redirect_if_authenticated() {
        println!("{}", "Already logged in.".yellow());
        return Ok(());
    }

    let outcome = gateway(ctx)?.login(email, password).await?;

    let greeting = outcome.message.as_deref().unwrap_or("Logged in");
    println!("{}", greeting.green());
    if let Some(user) = outcome.user() {
        println!("Welcome, {} <{}>", user.user_name.bold(), user.email);
    }
    Ok(())
}

pub async fn register(ctx: &AppContext, form: &RegistrationForm) -> Result<()> {
    if ctx.guard.redirect_if_authenticated() {
        println!("{}", "Already logged in.".yellow());
        return Ok(());
    }

    let outcome = gateway(ctx)?.register(form).await?;

    let message = outcome.message.as_deref().unwrap_or("Account created");
    println!("{}", message.green());
    println!(
        "Log in with {} to continue.",
        format!("felis login --email {}", outcome.user.email).cyan()
    );
    Ok(())
}

pub fn logout(ctx: &AppContext) -> Result<()> {
    ctx.session.clear()?;
    println!("{}", "Logged out.".green());
    ctx.navigator.navigate(Route::Login);
    Ok(())
}

pub fn profile(ctx: &AppContext) -> Result<()> {
    ctx.enter(Route::Profile)?;

    let view = ProfileView::new(ctx.session.clone(), &ctx.cancel);
    let user = view.current_user().context("Session has no user")?;
    view.close();

    println!("{}  {}", user.initials().bold(), user.full_name().bold());
    println!("  {:<10} {}", "username".bright_black(), user.user_name);
    println!("  {:<10} {}", "email".bright_black(), user.email);
    println!("  {:<10} {}", "id".bright_black(), user.id);
    println!(
        "  {:<10} {}",
        "member".bright_black(),
        user.created_at.format("%Y-%m-%d")
    );
    Ok(())
}
