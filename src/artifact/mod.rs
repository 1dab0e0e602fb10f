use chrono::{DateTime, SecondsFormat, Utc};
use fs_err as fs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

use crate::cli::FilenamePolicy;
use crate::errors::SdkGenError;
use crate::extract::AppIntent;

/// Origin metadata recorded in the provenance header and the run summary.
#[derive(Debug, Clone)]
pub struct Provenance {
    pub pr_number: String,
    pub pr_title: String,
    pub pr_author: String,
    pub generated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct WrittenArtifacts {
    pub sdk_path: PathBuf,
    pub readme_path: PathBuf,
    pub summary_path: PathBuf,
}

/// Machine-readable record of one run, overwritten at a fixed path inside the
/// output directory. Field names follow the JSON the downstream CI steps read.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunSummary {
    pub pr_number: String,
    pub pr_title: String,
    pub pr_author: String,
    pub app_name: String,
    pub generated_at: DateTime<Utc>,
    pub api_keys_count: usize,
    pub features_count: usize,
    pub sdk_file: String,
}

pub const SUMMARY_FILENAME: &str = "generation-summary.json";

/// Filesystem-safe token for an app name: every non-alphanumeric byte becomes
/// `-`, the rest is lowercased.
pub fn clean_app_name(app_name: &str) -> String {
    app_name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_lowercase()
            } else {
                '-'
            }
        })
        .collect()
}

/// RFC 3339 instant with `:` and `.` replaced so it can live in a filename,
/// e.g. `2025-06-11T07-31-20-367Z`.
pub fn timestamp_token(t: DateTime<Utc>) -> String {
    t.to_rfc3339_opts(SecondsFormat::Millis, true)
        .replace([':', '.'], "-")
}

pub fn sdk_filename(token: &str, policy: FilenamePolicy, t: DateTime<Utc>) -> String {
    match policy {
        FilenamePolicy::Overwrite => format!("{token}-sdk.js"),
        FilenamePolicy::Timestamped => format!("{token}-sdk-{}.js", timestamp_token(t)),
    }
}

/// Persist the generated code plus companion README and run summary.
///
/// The three writes are independent; a failure part-way leaves earlier files
/// in place (no rollback). Under the `Overwrite` policy, two concurrent runs
/// targeting the same app name race on the same path.
pub fn write_artifacts(
    out_dir: &Path,
    app_name: &str,
    code: &str,
    intent: &AppIntent,
    prov: &Provenance,
    policy: FilenamePolicy,
) -> Result<WrittenArtifacts, SdkGenError> {
    fs::create_dir_all(out_dir)?;

    let token = clean_app_name(app_name);
    let filename = sdk_filename(&token, policy, prov.generated_at);
    let sdk_path = out_dir.join(&filename);

    let full_code = format!("{}{}", provenance_header(app_name, intent, prov), code);
    write_atomic(&sdk_path, &full_code)?;

    let readme_path = out_dir.join(format!("{token}-README.md"));
    write_atomic(&readme_path, &readme_content(app_name, &token, &filename, intent, prov))?;

    let summary = RunSummary {
        pr_number: prov.pr_number.clone(),
        pr_title: prov.pr_title.clone(),
        pr_author: prov.pr_author.clone(),
        app_name: app_name.to_string(),
        generated_at: prov.generated_at,
        api_keys_count: intent.credentials.len(),
        features_count: intent.features.len(),
        sdk_file: sdk_path.to_string_lossy().into_owned(),
    };
    let summary_path = out_dir.join(SUMMARY_FILENAME);
    write_atomic(&summary_path, &serde_json::to_string_pretty(&summary)?)?;

    Ok(WrittenArtifacts { sdk_path, readme_path, summary_path })
}

fn write_atomic(path: &Path, content: &str) -> Result<(), SdkGenError> {
    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    let tmp = NamedTempFile::new_in(dir)?;
    fs::write(tmp.path(), content)?;
    tmp.persist(path).map_err(|e| SdkGenError::Persistence(e.error))?;
    Ok(())
}

fn provenance_header(app_name: &str, intent: &AppIntent, prov: &Provenance) -> String {
    let credential_names = intent
        .credentials
        .keys()
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        "/**\n\
         \x20* {app_upper} Micro SDK\n\
         \x20* Generated automatically from PR #{pr_number}\n\
         \x20* Author: {pr_author}\n\
         \x20* Generated: {generated_at}\n\
         \x20* \n\
         \x20* App Information:\n\
         \x20* - Name: {app_name}\n\
         \x20* - Description: {description}\n\
         \x20* - Features: {features}\n\
         \x20* \n\
         \x20* Available API Keys: {credential_names}\n\
         \x20*/\n\n",
        app_upper = app_name.to_uppercase(),
        pr_number = prov.pr_number,
        pr_author = prov.pr_author,
        generated_at = prov.generated_at.to_rfc3339_opts(SecondsFormat::Millis, true),
        app_name = app_name,
        description = intent.description,
        features = intent.features.join(", "),
        credential_names = credential_names,
    )
}

fn readme_content(
    app_name: &str,
    token: &str,
    filename: &str,
    intent: &AppIntent,
    prov: &Provenance,
) -> String {
    let require_name = token.replace('-', "");
    let credential_lines = intent
        .credentials
        .keys()
        .map(|k| format!("- {}: Your {k} from {app_name}", k.to_uppercase()))
        .collect::<Vec<_>>()
        .join("\n");
    let feature_lines = intent
        .features
        .iter()
        .map(|f| format!("- {f}"))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "# {app_upper} SDK\n\n\
         Generated from PR #{pr_number} by {pr_author}\n\n\
         ## Installation\n\n\
         ```javascript\n\
         const {require_name}SDK = require('./{filename}');\n\
         ```\n\n\
         ## Configuration\n\n\
         Make sure to set up your API keys:\n\n\
         {credential_lines}\n\n\
         ## Features\n\n\
         {feature_lines}\n\n\
         ## Description\n\n\
         {description}\n\n\
         ---\n\n\
         *This SDK was automatically generated from the pull request specifications.*\n",
        app_upper = app_name.to_uppercase(),
        pr_number = prov.pr_number,
        pr_author = prov.pr_author,
        description = intent.description,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fallback;
    use chrono::TimeZone;
    use std::collections::BTreeMap;

    fn sample_intent() -> AppIntent {
        let mut credentials = BTreeMap::new();
        credentials.insert("api_key".to_string(), "super-secret".to_string());
        AppIntent {
            app_name: Some("weatherly".to_string()),
            credentials,
            description: "simple weather app".to_string(),
            features: vec!["forecast".to_string(), "alerts".to_string()],
        }
    }

    fn sample_provenance() -> Provenance {
        Provenance {
            pr_number: "42".to_string(),
            pr_title: "Add weatherly".to_string(),
            pr_author: "octocat".to_string(),
            generated_at: Utc.with_ymd_and_hms(2025, 6, 11, 7, 31, 20).unwrap(),
        }
    }

    #[test]
    fn clean_app_name_maps_to_safe_token() {
        assert_eq!(clean_app_name("My App!2"), "my-app-2");
        assert_eq!(clean_app_name("Weatherly"), "weatherly");
        let token = clean_app_name("a b/c.d");
        assert!(token.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-'));
    }

    #[test]
    fn timestamp_token_has_no_reserved_chars() {
        let token = timestamp_token(sample_provenance().generated_at);
        assert!(!token.contains(':'));
        assert!(!token.contains('.'));
        assert_eq!(token, "2025-06-11T07-31-20-000Z");
    }

    #[test]
    fn filename_policies() {
        let t = sample_provenance().generated_at;
        assert_eq!(sdk_filename("weatherly", FilenamePolicy::Overwrite, t), "weatherly-sdk.js");
        assert_eq!(
            sdk_filename("weatherly", FilenamePolicy::Timestamped, t),
            "weatherly-sdk-2025-06-11T07-31-20-000Z.js"
        );
    }

    #[test]
    fn write_artifacts_produces_all_three_files() {
        let dir = tempfile::tempdir().unwrap();
        let written = write_artifacts(
            dir.path(),
            "weatherly",
            "class WeatherlySDK {}",
            &sample_intent(),
            &sample_provenance(),
            FilenamePolicy::Overwrite,
        )
        .unwrap();

        let sdk = fs::read_to_string(&written.sdk_path).unwrap();
        assert!(sdk.starts_with("/**"));
        assert!(sdk.contains("WEATHERLY Micro SDK"));
        assert!(sdk.contains("PR #42"));
        assert!(sdk.contains("class WeatherlySDK {}"));
        // Names only, never values.
        assert!(sdk.contains("api_key"));
        assert!(!sdk.contains("super-secret"));

        let readme = fs::read_to_string(&written.readme_path).unwrap();
        assert!(readme.contains("# WEATHERLY SDK"));
        assert!(readme.contains("API_KEY"));
        assert!(!readme.contains("super-secret"));
        assert!(readme.contains("- forecast"));

        let summary: RunSummary =
            serde_json::from_str(&fs::read_to_string(&written.summary_path).unwrap()).unwrap();
        assert_eq!(summary.app_name, "weatherly");
        assert_eq!(summary.api_keys_count, 1);
        assert_eq!(summary.features_count, 2);
        assert!(summary.sdk_file.ends_with("weatherly-sdk.js"));
    }

    #[test]
    fn overwrite_policy_replaces_prior_run() {
        let dir = tempfile::tempdir().unwrap();
        let intent = sample_intent();
        let prov = sample_provenance();
        let first = write_artifacts(dir.path(), "weatherly", "v1", &intent, &prov, FilenamePolicy::Overwrite).unwrap();
        let second = write_artifacts(dir.path(), "weatherly", "v2", &intent, &prov, FilenamePolicy::Overwrite).unwrap();
        assert_eq!(first.sdk_path, second.sdk_path);
        assert!(fs::read_to_string(&second.sdk_path).unwrap().contains("v2"));
    }

    #[test]
    fn timestamped_policy_appends_new_files() {
        let dir = tempfile::tempdir().unwrap();
        let intent = sample_intent();
        let mut prov = sample_provenance();
        let first = write_artifacts(dir.path(), "weatherly", "v1", &intent, &prov, FilenamePolicy::Timestamped).unwrap();
        prov.generated_at = Utc.with_ymd_and_hms(2025, 6, 11, 7, 31, 27).unwrap();
        let second = write_artifacts(dir.path(), "weatherly", "v2", &intent, &prov, FilenamePolicy::Timestamped).unwrap();
        assert_ne!(first.sdk_path, second.sdk_path);
        assert!(first.sdk_path.exists());
        assert!(second.sdk_path.exists());
    }

    #[test]
    fn fallback_path_still_yields_complete_artifacts() {
        // Mirrors a timed-out generation call: fallback code goes through the
        // normal persistence path and the summary is still written.
        let dir = tempfile::tempdir().unwrap();
        let code = fallback::synthesize("weatherly");
        let written = write_artifacts(
            dir.path(),
            "weatherly",
            &code,
            &sample_intent(),
            &sample_provenance(),
            FilenamePolicy::Overwrite,
        )
        .unwrap();

        let sdk = fs::read_to_string(&written.sdk_path).unwrap();
        assert!(sdk.contains("async get(endpoint)"));
        assert!(sdk.contains("async post(endpoint, data)"));
        assert!(sdk.contains("getVersion()"));
        assert!(sdk.contains("constructor(config = {})"));
        assert!(!sdk.contains("```"));
        assert!(written.summary_path.exists());
    }
}
