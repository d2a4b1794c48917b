//! Interactive terminal front door for Marketdesk.
//!
//! Drives the auth core against a live backend: sign in directly, pick a
//! demo identity, or run the full signup + passcode flow, then enter the
//! guarded dashboard. The route guard decides which menu the visitor sees.

mod config;

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use console::Term;
use dialoguer::{theme::ColorfulTheme, Input, Password, Select};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api_client::{ApiClient, ApiOptions};
use auth_core::gateway::{IdentityGateway, IdentityStrategyResult, LoginStrategy};
use auth_core::guard::{Admission, Route, RouteGuard};
use auth_core::models::{RegistrationDraft, DEMO_ACCOUNTS};
use auth_core::notify::{Notice, Severity};
use auth_core::registration::{RegistrationFlow, RegistrationState};
use auth_core::session::SessionStore;
use auth_core::validator::{self, RuleState};

use crate::config::Config;

#[derive(Parser)]
#[command(name = "desk", about = "Marketdesk terminal console")]
struct Args {
    /// Override the auth API base URL (defaults to API_URL or localhost)
    #[arg(long)]
    api_url: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn,auth_core=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();
    let mut config = Config::from_env().context("Failed to load configuration")?;
    if let Some(url) = args.api_url {
        config.api_url = url;
    }
    tracing::debug!(api_url = %config.api_url, "configuration loaded");

    let backend = Arc::new(ApiClient::new(ApiOptions {
        base_url: config.api_url.clone(),
    }));
    let sessions = SessionStore::new();
    let gateway = IdentityGateway::new(backend.clone(), sessions.clone());
    let guard = RouteGuard::new(sessions.clone());

    let term = Term::stdout();
    println!("{}", "Marketdesk".bright_green().bold());
    println!("{}", format!("auth API: {}", config.api_url).as_str().dimmed());

    loop {
        println!();
        match guard.admit() {
            Admission::Redirect(_) => {
                let options = vec!["Sign in", "Demo accounts", "Sign up", "Quit"];
                let selection = Select::with_theme(&ColorfulTheme::default())
                    .with_prompt("Welcome - how would you like to continue?")
                    .items(&options)
                    .default(0)
                    .interact_on(&term)?;

                match selection {
                    0 => sign_in(&gateway, &term).await?,
                    1 => demo_login(&gateway, &term).await?,
                    2 => sign_up(backend.clone(), &sessions, &term).await?,
                    3 => {
                        println!("{}", "Goodbye!".bright_blue());
                        return Ok(());
                    }
                    _ => {}
                }
            }
            Admission::Granted => {
                if !dashboard(&sessions, &term)? {
                    println!("{}", "Goodbye!".bright_blue());
                    return Ok(());
                }
            }
        }
    }
}

/// Direct credential exchange.
async fn sign_in(gateway: &IdentityGateway, term: &Term) -> Result<()> {
    let identifier: String = Input::with_theme(&ColorfulTheme::default())
        .with_prompt("Email")
        .interact_text_on(term)?;
    let secret = Password::with_theme(&ColorfulTheme::default())
        .with_prompt("Password")
        .interact_on(term)?;

    match gateway
        .attempt(LoginStrategy::Direct { identifier, secret })
        .await
    {
        Ok(result) => greet(&result),
        Err(err) => println!("{}", err.to_string().as_str().red()),
    }
    Ok(())
}

/// Quick login with one of the bundled catalog identities.
async fn demo_login(gateway: &IdentityGateway, term: &Term) -> Result<()> {
    let labels: Vec<String> = DEMO_ACCOUNTS
        .iter()
        .map(|account| format!("{} <{}>", account.label, account.email))
        .collect();

    let selection = Select::with_theme(&ColorfulTheme::default())
        .with_prompt("Choose a demo account")
        .items(&labels)
        .default(0)
        .interact_on(term)?;
    let account = DEMO_ACCOUNTS[selection];

    match gateway.attempt(LoginStrategy::Demo { account }).await {
        Ok(_) => println!("{}", format!("Welcome back, {}!", account.label).as_str().green()),
        Err(err) => println!("{}", err.to_string().as_str().red()),
    }
    Ok(())
}

/// Full registration: form, live rule feedback, passcode challenge.
async fn sign_up(backend: Arc<ApiClient>, sessions: &SessionStore, term: &Term) -> Result<()> {
    let name: String = Input::with_theme(&ColorfulTheme::default())
        .with_prompt("Full name")
        .interact_text_on(term)?;
    let email: String = Input::with_theme(&ColorfulTheme::default())
        .with_prompt("Email")
        .interact_text_on(term)?;

    let (password, confirmation) = loop {
        let password = Password::with_theme(&ColorfulTheme::default())
            .with_prompt("Password")
            .interact_on(term)?;
        let confirmation = Password::with_theme(&ColorfulTheme::default())
            .with_prompt("Confirm password")
            .interact_on(term)?;

        print_rules(&password, &confirmation);

        if validator::validate(&password, &confirmation).all_pass() {
            break (password, confirmation);
        }
        println!("{}", "The password does not satisfy every requirement yet - try again.".yellow());
    };

    let mut flow = RegistrationFlow::new(backend, sessions.clone());
    flow.submit(RegistrationDraft::new(name, email, password), &confirmation)
        .await?;
    print_notices(flow.take_notices());

    while flow.state() == RegistrationState::AwaitingOtp {
        let code: String = Input::with_theme(&ColorfulTheme::default())
            .with_prompt("Verification code (leave blank to cancel)")
            .allow_empty(true)
            .interact_text_on(term)?;

        if code.trim().is_empty() {
            flow.dismiss().await?;
            println!("{}", "Registration abandoned.".yellow());
            break;
        }

        flow.enter_code(&code).await?;
        print_notices(flow.take_notices());
    }

    if flow.state() == RegistrationState::Authenticated
        && flow.destination() == Some(Route::Onboarding)
    {
        println!("{}", "First time here - let's get you set up.".cyan());
    }
    Ok(())
}

/// The protected area. Returns false when the user wants to quit.
fn dashboard(sessions: &SessionStore, term: &Term) -> Result<bool> {
    println!("{}", "-- Marketdesk overview --".bold());
    println!("{}", "Markets are quiet. Your watchlist has no alerts.".dimmed());

    let options = vec!["Refresh", "Sign out", "Quit"];
    let selection = Select::with_theme(&ColorfulTheme::default())
        .with_prompt("Dashboard")
        .items(&options)
        .default(0)
        .interact_on(term)?;

    match selection {
        1 => {
            sessions.clear();
            println!("{}", "Signed out.".green());
        }
        2 => return Ok(false),
        _ => {}
    }
    Ok(true)
}

fn greet(result: &IdentityStrategyResult) {
    println!("{}", "Authentication successful".green());
    if result.is_new_user {
        println!("{}", "First time here - let's get you set up.".cyan());
    }
}

fn print_notices(notices: Vec<Notice>) {
    for notice in notices {
        match notice.severity {
            Severity::Success => println!("{}", notice.message.as_str().green()),
            Severity::Error => println!("{}", notice.message.as_str().red()),
        }
    }
}

/// Render the rule list the way the signup form does: neutral until the
/// driving field has input, then pass/fail per rule.
fn print_rules(password: &str, confirmation: &str) {
    for (rule, state) in validator::display(password, confirmation) {
        match state {
            RuleState::Neutral => println!("  {} {}", "-".dimmed(), rule.hint().dimmed()),
            RuleState::Pass => println!("  {} {}", "ok".green(), rule.hint()),
            RuleState::Fail => println!("  {} {}", "x".red(), rule.hint()),
        }
    }
}
