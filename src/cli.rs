use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};

/// How generated SDK files are named.
///
/// `Overwrite` reuses `<app>-sdk.js` across runs, so two concurrent runs for
/// the same app race on the same path; `Timestamped` appends a fresh file per
/// run and is safe under concurrency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilenamePolicy {
    Overwrite,
    Timestamped,
}

#[derive(Parser, Debug)]
#[command(name = "sdkgen", version)]
pub struct Args {
    /// Directory the generated SDK, README and run summary are written to.
    #[arg(long, default_value = "sdks")]
    pub out_dir: String,

    /// Scratch directory for debug dumps (pr-data.json).
    #[arg(long, default_value = "temp")]
    pub scratch_dir: String,

    #[arg(long, value_enum, default_value = "overwrite")]
    pub policy: FilenamePolicy,

    /// Timeout for the single outbound generation call, in seconds.
    #[arg(long, default_value_t = 30)]
    pub timeout_secs: u64,

    /// Override the generation endpoint (otherwise GEMINI_API_URL or the
    /// built-in default).
    #[arg(long)]
    pub endpoint: Option<String>,

    #[arg(long, default_value_t = false)]
    pub debug: bool,
}
