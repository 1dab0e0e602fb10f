use chrono::Utc;
use clap::Parser;
use std::path::Path;
use std::time::Duration;

mod artifact;
mod cli;
mod config;
mod errors;
mod extract;
mod fallback;
mod prompt;
mod provider;
mod report;
mod ux;
mod wire;

use crate::errors::SdkGenError;
use crate::provider::gemini::GeminiClient;
use crate::provider::{GenerationOutcome, Generator};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = cli::Args::parse();
    let cfg = config::Config::from_env(&args);

    ux::print_banner(&cfg.pr);
    report::print_body_report(&cfg.pr.body);

    let intent = extract::extract(&cfg.pr.body);
    let app_name = match &intent.app_name {
        Some(name) => name.clone(),
        None => {
            ux::error("no app name found in PR body; specify APP: <app_name>");
            return Err(SdkGenError::MissingAppName.into());
        }
    };
    ux::announce_intent(&intent);

    if cfg.debug {
        let path = report::save_pr_data(Path::new(&cfg.scratch_dir), &cfg.pr, Utc::now())?;
        println!("debug: PR data saved to {}", path.display());
    }

    let request = prompt::build_prompt(&intent);
    let client = GeminiClient::new(
        cfg.endpoint.clone(),
        cfg.api_key.clone(),
        Duration::from_secs(cfg.timeout_secs),
    );

    ux::announce_generation(&cfg.endpoint);
    let code = match client.generate(&request).await {
        GenerationOutcome::Success { code } => {
            ux::generation_ok();
            code
        }
        GenerationOutcome::Failure { reason } => {
            ux::generation_failed(&reason);
            fallback::synthesize(&app_name)
        }
    };

    let provenance = artifact::Provenance {
        pr_number: cfg.pr.number.clone(),
        pr_title: cfg.pr.title.clone(),
        pr_author: cfg.pr.author.clone(),
        generated_at: Utc::now(),
    };
    let written = artifact::write_artifacts(
        Path::new(&cfg.out_dir),
        &app_name,
        &code,
        &intent,
        &provenance,
        cfg.policy,
    )?;
    ux::print_written(&written);

    Ok(())
}
