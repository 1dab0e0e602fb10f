use regex::Regex;
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::LazyLock;

/// Structured intent pulled out of a PR body. Extraction is total: missing
/// labels leave fields absent/empty, they never produce an error.
#[derive(Debug, Clone, Default, Serialize)]
pub struct AppIntent {
    pub app_name: Option<String>,
    pub credentials: BTreeMap<String, String>,
    pub description: String,
    pub features: Vec<String>,
}

static APP_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?im)^[ \t]*app[ \t]*:[ \t]*([^\r\n]+)").expect("app pattern"));

// Ordered matcher set for credential-looking labels. The catch-all at the end
// re-matches text the named patterns already captured; that overlap is kept,
// and conflicts on the same lowercased name are resolved by match position
// (last match in the text wins), not by matcher order.
static CREDENTIAL_RES: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"(?i)\b(api_key|apikey):\s*(\S+)",
        r"(?i)\b(client_id):\s*(\S+)",
        r"(?i)\b(client_secret):\s*(\S+)",
        r"(?i)\b(access_token):\s*(\S+)",
        r"(?i)\b(secret_key):\s*(\S+)",
        r"(?i)\b(app_id):\s*(\S+)",
        r"(?i)\b(webhook_secret):\s*(\S+)",
        r"(?i)\b([a-z][a-z0-9_]*_(?:key|id|secret|token)):\s*(\S+)",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("credential pattern"))
    .collect()
});

static BLOCK_LABEL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^[ \t]*(description|features)[ \t]*:(.*)$").expect("block label pattern")
});

static FEATURES_LABEL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^[ \t]*features[ \t]*:").expect("features label pattern"));

// Any UPPER_SNAKE label line terminates a description block. Checked against
// every line so a DESCRIPTION block cannot swallow a later FEATURES block.
static STOP_LABEL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[ \t]*[A-Z][A-Z0-9_]*[ \t]*:").expect("stop label pattern"));

/// Parse a raw PR body into an [`AppIntent`].
pub fn extract(raw: &str) -> AppIntent {
    AppIntent {
        app_name: extract_app_name(raw),
        credentials: extract_credentials(raw),
        description: extract_description(raw),
        features: extract_features(raw),
    }
}

fn extract_app_name(raw: &str) -> Option<String> {
    let caps = APP_RE.captures(raw)?;
    let name = caps[1].trim().to_lowercase();
    if name.is_empty() {
        None
    } else {
        Some(name)
    }
}

fn extract_credentials(raw: &str) -> BTreeMap<String, String> {
    // Every matcher contributes (position, name, value) candidates; sorting by
    // position before folding into the map gives last-match-wins semantics
    // that are independent of matcher declaration order.
    let mut candidates: Vec<(usize, String, String)> = Vec::new();
    for re in CREDENTIAL_RES.iter() {
        for caps in re.captures_iter(raw) {
            let label = caps.get(1).map(|m| (m.start(), m.as_str()));
            let value = caps.get(2).map(|m| m.as_str());
            if let (Some((pos, name)), Some(value)) = (label, value) {
                candidates.push((pos, name.to_lowercase(), value.to_string()));
            }
        }
    }
    candidates.sort_by_key(|(pos, _, _)| *pos);

    let mut credentials = BTreeMap::new();
    for (_, name, value) in candidates {
        credentials.insert(name, value);
    }
    credentials
}

fn extract_description(raw: &str) -> String {
    let lines: Vec<&str> = raw.lines().collect();
    let mut block: Vec<&str> = Vec::new();

    for (i, line) in lines.iter().enumerate() {
        let Some(caps) = BLOCK_LABEL_RE.captures(line) else {
            continue;
        };
        block.push(caps.get(2).map(|m| m.as_str()).unwrap_or(""));
        for rest in &lines[i + 1..] {
            if STOP_LABEL_RE.is_match(rest) {
                break;
            }
            block.push(rest);
        }
        break;
    }

    block.join("\n").trim().to_string()
}

fn extract_features(raw: &str) -> Vec<String> {
    let lines: Vec<&str> = raw.lines().collect();
    let mut features = Vec::new();

    for (i, line) in lines.iter().enumerate() {
        if !FEATURES_LABEL_RE.is_match(line) {
            continue;
        }
        for rest in &lines[i + 1..] {
            let trimmed = rest.trim_start();
            let Some(item) = trimmed
                .strip_prefix('-')
                .or_else(|| trimmed.strip_prefix('*'))
            else {
                break;
            };
            let item = item.trim();
            if !item.is_empty() {
                features.push(item.to_string());
            }
        }
        break;
    }

    features
}
