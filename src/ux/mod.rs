use colored::Colorize;

use crate::artifact::WrittenArtifacts;
use crate::config::PrInfo;
use crate::extract::AppIntent;

pub fn print_banner(pr: &PrInfo) {
    println!("{}", "Starting SDK generation".bold());
    println!("PR #{}: {}", pr.number, pr.title);
    println!("Author: {}", pr.author);
    println!("{}", "=".repeat(50));
}

pub fn announce_intent(intent: &AppIntent) {
    let name = intent.app_name.as_deref().unwrap_or("?");
    println!("{} {}", "Found app:".green().bold(), name);
    println!("Credentials found: {}", intent.credentials.len());
    println!("Features: {} items", intent.features.len());
}

pub fn announce_generation(endpoint: &str) {
    println!("{} {}", "Calling generation service:".bold(), endpoint);
}

pub fn generation_ok() {
    println!("{}", "Generation succeeded".green().bold());
}

pub fn generation_failed(reason: &str) {
    eprintln!("{} {}", "Generation failed:".yellow().bold(), reason);
    eprintln!("{}", "Falling back to locally synthesized SDK".yellow());
}

pub fn print_written(written: &WrittenArtifacts) {
    println!("{}", "SDK generation complete".green().bold());
    println!("SDK saved to: {}", written.sdk_path.display());
    println!("README saved to: {}", written.readme_path.display());
    println!("Summary saved to: {}", written.summary_path.display());
}

pub fn error(msg: &str) {
    eprintln!("{} {}", "Error:".red().bold(), msg);
}
