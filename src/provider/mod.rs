use async_trait::async_trait;

pub mod gemini;

/// Outcome of one generation attempt. Failures are data, not errors: the
/// caller decides whether to fall back, nothing propagates past this boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationOutcome {
    Success { code: String },
    Failure { reason: String },
}

#[async_trait]
pub trait Generator: Send + Sync {
    async fn generate(&self, prompt: &str) -> GenerationOutcome;
}

/// Strip a leading/trailing fenced-code-block wrapper (with an optional
/// language tag) from generated text. Text without a leading fence is
/// returned unchanged apart from outer whitespace.
pub fn strip_code_fences(raw: &str) -> String {
    let trimmed = raw.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed.to_string();
    };
    let body = match rest.find('\n') {
        Some(i) => &rest[i + 1..],
        None => return String::new(),
    };
    let body = body.strip_suffix("```").unwrap_or(body);
    let body = body.strip_suffix('\n').unwrap_or(body);
    body.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_fence_with_language_tag() {
        assert_eq!(strip_code_fences("```javascript\nclass A {}\n```"), "class A {}");
    }

    #[test]
    fn strips_fence_without_language_tag() {
        assert_eq!(strip_code_fences("```\nclass A {}\n```"), "class A {}");
    }

    #[test]
    fn non_fenced_text_passes_through() {
        assert_eq!(strip_code_fences("class A {}"), "class A {}");
    }

    #[test]
    fn fence_round_trip() {
        let original = "const x = 1;\nconst y = 2;";
        let fenced = format!("```js\n{original}\n```");
        assert_eq!(strip_code_fences(&fenced), original);

        let fenced = format!("```\n{original}\n```");
        assert_eq!(strip_code_fences(&fenced), original);
    }

    #[test]
    fn leading_fence_without_closing_fence() {
        assert_eq!(strip_code_fences("```js\nconst x = 1;"), "const x = 1;");
    }
}
