use serde::{Deserialize, Serialize};

use crate::cli::{Args, FilenamePolicy};

pub const DEFAULT_ENDPOINT: &str =
    "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.0-flash:generateContent";

/// PR metadata handed in by the CI environment. Missing values fall back to
/// sentinel placeholders; only a missing app name (found later, in the body)
/// is fatal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrInfo {
    pub body: String,
    pub number: String,
    pub title: String,
    pub author: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub out_dir: String,
    pub scratch_dir: String,
    pub endpoint: String,
    pub api_key: String,
    pub timeout_secs: u64,
    pub policy: FilenamePolicy,
    pub debug: bool,
    pub pr: PrInfo,
}

impl Config {
    /// Single point where the environment is read; everything downstream gets
    /// this struct threaded in explicitly.
    pub fn from_env(args: &Args) -> Self {
        let env = |key: &str, default: &str| {
            std::env::var(key).unwrap_or_else(|_| default.to_string())
        };

        Self {
            out_dir: args.out_dir.clone(),
            scratch_dir: args.scratch_dir.clone(),
            endpoint: args
                .endpoint
                .clone()
                .unwrap_or_else(|| env("GEMINI_API_URL", DEFAULT_ENDPOINT)),
            api_key: env("GEMINI_API_KEY", ""),
            timeout_secs: args.timeout_secs,
            policy: args.policy,
            debug: args.debug,
            pr: PrInfo {
                body: env("PR_BODY", ""),
                number: env("PR_NUMBER", "unknown"),
                title: env("PR_TITLE", "Unknown PR"),
                author: env("PR_AUTHOR", "unknown"),
            },
        }
    }
}
