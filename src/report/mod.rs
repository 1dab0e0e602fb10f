use chrono::{DateTime, Utc};
use colored::Colorize;
use fs_err as fs;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use crate::config::PrInfo;
use crate::errors::SdkGenError;

static CHECKLIST_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"- \[(x|X| )\] (.+)").expect("checklist pattern"));

static ISSUE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"#\d+").expect("issue pattern"));

static FIXES_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(?:fixes|closes|resolves)\s+#\d+").expect("fixes pattern"));

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChecklistItem {
    pub checked: bool,
    pub text: String,
}

pub fn checklist_items(body: &str) -> Vec<ChecklistItem> {
    CHECKLIST_RE
        .captures_iter(body)
        .map(|caps| ChecklistItem {
            checked: matches!(&caps[1], "x" | "X"),
            text: caps[2].trim().to_string(),
        })
        .collect()
}

/// All `#123` style references, deduplicated, in order of first appearance.
pub fn issue_references(body: &str) -> Vec<String> {
    let mut seen = Vec::new();
    for m in ISSUE_RE.find_iter(body) {
        let r = m.as_str().to_string();
        if !seen.contains(&r) {
            seen.push(r);
        }
    }
    seen
}

pub fn fix_references(body: &str) -> Vec<String> {
    FIXES_RE
        .find_iter(body)
        .map(|m| m.as_str().to_string())
        .collect()
}

pub fn print_body_report(body: &str) {
    let checklist = checklist_items(body);
    if !checklist.is_empty() {
        println!("{}", "Checklist items:".bold());
        for (i, item) in checklist.iter().enumerate() {
            let mark = if item.checked { "[x]" } else { "[ ]" };
            println!("  {}. {} {}", i + 1, mark, item.text);
        }
        println!();
    }

    let issues = issue_references(body);
    if !issues.is_empty() {
        println!("{}", "Issue references:".bold());
        for r in &issues {
            println!("  {r}");
        }
        println!();
    }

    let fixes = fix_references(body);
    if !fixes.is_empty() {
        println!("{}", "Issues to be fixed/closed:".bold());
        for r in &fixes {
            println!("  {r}");
        }
        println!();
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrData {
    pub number: String,
    pub title: String,
    pub author: String,
    pub body: String,
    pub timestamp: DateTime<Utc>,
}

/// Debug dump of the raw PR input for downstream scripts; only written when
/// the --debug flag is set.
pub fn save_pr_data(scratch_dir: &Path, pr: &PrInfo, now: DateTime<Utc>) -> Result<PathBuf, SdkGenError> {
    fs::create_dir_all(scratch_dir)?;
    let data = PrData {
        number: pr.number.clone(),
        title: pr.title.clone(),
        author: pr.author.clone(),
        body: pr.body.clone(),
        timestamp: now,
    };
    let path = scratch_dir.join("pr-data.json");
    fs::write(&path, serde_json::to_string_pretty(&data)?)?;
    Ok(path)
}
