//! Command execution helpers for `jecket`.
//!
//! This module owns the runtime flow for each subcommand: loading the
//! config file, resolving settings, building the HTTP transport and turning
//! each [`Outcome`] into a process result.

use std::path::PathBuf;

use anyhow::{Context, bail};
use log::{info, warn};

use crate::bitbucket::{
    BuildStatusReporter, CommentReconciler, CommitLister, HttpTransport, Outcome, Transport,
};
use crate::cli_args::{
    Cli, CommentArgs, Commands, GlobalArgs, ReportArgs, SetConfArgs, SetStatusArgs,
};
use crate::config;
use crate::error::JecketError;
use crate::settings::{STATUS_KEY, STATUS_URL, Settings, resolve_field};

/// Execute the parsed command line.
///
/// # Errors
///
/// Returns an error when configuration cannot be loaded or the remote call
/// does not succeed.
pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let Cli { global, command } = cli;
    match command {
        Commands::SetConf(args) => run_set_conf(&global, &args),
        Commands::SetStatus(args) => {
            let (settings, transport) = connect(global)?;
            run_set_status(&transport, &settings, &args).await
        }
        Commands::SendPrComment(args) => {
            let (settings, transport) = connect(global)?;
            run_send_comment(&transport, &settings, &args).await
        }
        Commands::Report(args) => {
            let (settings, transport) = connect(global)?;
            run_report(&transport, &settings, &args).await
        }
        Commands::ListCommits => {
            let (settings, transport) = connect(global)?;
            run_list_commits(&transport, &settings).await
        }
    }
}

/// Merge the config file under `cli`, then resolve settings against the
/// environment and defaults.
///
/// # Errors
///
/// Returns [`JecketError::Config`] if the config file cannot be read.
pub fn load_settings(cli: GlobalArgs) -> Result<Settings, JecketError> {
    let mut merged = config::load(cli.config.as_deref())?;
    merged.merge(cli);
    Ok(Settings::resolve(&merged.overrides()))
}

fn connect(global: GlobalArgs) -> Result<(Settings, HttpTransport), JecketError> {
    let settings = load_settings(global)?;
    if settings.base_api_link == crate::settings::BASE_API_LINK.default {
        warn!("base link is not configured; requests will fail");
    }
    let transport = HttpTransport::new(settings.credentials.clone())?;
    Ok((settings, transport))
}

fn finish(action: &str, outcome: Outcome) -> anyhow::Result<()> {
    if outcome.is_success() {
        info!("{action} succeeded");
        return Ok(());
    }
    let (code, detail) = outcome.into_pair();
    bail!("{action} failed ({code}): {detail}")
}

fn run_set_conf(global: &GlobalArgs, args: &SetConfArgs) -> anyhow::Result<()> {
    let required = |value: Option<&String>, flag: &'static str| {
        value
            .filter(|v| !v.is_empty())
            .cloned()
            .ok_or(JecketError::MissingInput(flag))
    };
    let content = GlobalArgs {
        base_link: Some(required(global.base_link.as_ref(), "--base-link")?),
        username: Some(required(global.username.as_ref(), "--username")?),
        password: Some(required(global.password.as_ref(), "--password")?),
        config: None,
        ..global.clone()
    };
    let path: PathBuf = match args.path.as_ref().or(global.config.as_ref()) {
        Some(path) => path.clone(),
        None => config::default_write_path()?,
    };
    config::write(&path, &content)
        .with_context(|| format!("writing configuration to {}", path.display()))?;
    println!("{}", path.display());
    Ok(())
}

async fn run_set_status<T: Transport>(
    transport: &T,
    settings: &Settings,
    args: &SetStatusArgs,
) -> anyhow::Result<()> {
    let key = resolve_field(STATUS_KEY, args.key.as_deref());
    let url = resolve_field(STATUS_URL, args.status_url.as_deref());
    let outcome = BuildStatusReporter::new(transport, settings)
        .send_build_status(args.state().as_str(), &key, &url, None)
        .await;
    finish("setting build status", outcome)
}

async fn run_send_comment<T: Transport>(
    transport: &T,
    settings: &Settings,
    args: &CommentArgs,
) -> anyhow::Result<()> {
    let outcome = CommentReconciler::new(transport, settings)
        .post_comment(&args.comment)
        .await;
    finish("sending comment", outcome)
}

async fn run_report<T: Transport>(
    transport: &T,
    settings: &Settings,
    args: &ReportArgs,
) -> anyhow::Result<()> {
    let summary = args.summary();
    let outcome = CommentReconciler::new(transport, settings)
        .report_violations(&args.file, &summary)
        .await;
    finish(&format!("reporting violations on {}", args.file), outcome)
}

async fn run_list_commits<T: Transport>(transport: &T, settings: &Settings) -> anyhow::Result<()> {
    let commits = CommitLister::new(transport, settings).get_commits().await?;
    for id in commits {
        println!("{id}");
    }
    Ok(())
}
