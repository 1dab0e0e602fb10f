use crate::extract::AppIntent;

/// Render the generation instruction for an extracted intent. Pure and
/// deterministic; only credential NAMES are listed, values never leave the
/// process through the prompt.
pub fn build_prompt(intent: &AppIntent) -> String {
    let app = intent.app_name.as_deref().unwrap_or("unknown");
    let features = intent.features.join(", ");
    let credential_names = intent
        .credentials
        .keys()
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        "Generate a comprehensive JavaScript micro SDK for {app} integration.\n\
         \n\
         App Details:\n\
         - Name: {app}\n\
         - Description: {description}\n\
         - Features: {features}\n\
         - Available API Keys: {credential_names}\n\
         \n\
         Requirements:\n\
         1. Create a clean, modern JavaScript class-based SDK\n\
         2. Include authentication methods using the provided API keys\n\
         3. Add common API methods for {app} (like posting, fetching data, user management, etc.)\n\
         4. Include proper error handling and validation\n\
         5. Add JSDoc comments for all methods\n\
         6. Use async/await for API calls\n\
         7. Include a usage example at the bottom\n\
         8. Make it production-ready with proper error messages\n\
         9. Add rate limiting considerations\n\
         10. Include type checking where possible\n\
         \n\
         The SDK should be self-contained and ready to use. Focus on the most common use cases for {app} integration.\n\
         \n\
         Please generate only the JavaScript code without any explanation or markdown formatting.",
        app = app,
        description = intent.description,
        features = features,
        credential_names = credential_names,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn sample_intent() -> AppIntent {
        let mut credentials = BTreeMap::new();
        credentials.insert("api_key".to_string(), "s3cr3t-value".to_string());
        credentials.insert("client_id".to_string(), "cid-123".to_string());
        AppIntent {
            app_name: Some("weatherly".to_string()),
            credentials,
            description: "simple weather app".to_string(),
            features: vec!["forecast".to_string(), "alerts".to_string()],
        }
    }

    #[test]
    fn prompt_enumerates_intent_fields() {
        let prompt = build_prompt(&sample_intent());
        assert!(prompt.contains("weatherly"));
        assert!(prompt.contains("simple weather app"));
        assert!(prompt.contains("forecast, alerts"));
        assert!(prompt.contains("api_key, client_id"));
    }

    #[test]
    fn prompt_never_contains_credential_values() {
        let prompt = build_prompt(&sample_intent());
        assert!(!prompt.contains("s3cr3t-value"));
        assert!(!prompt.contains("cid-123"));
    }

    #[test]
    fn prompt_is_deterministic() {
        let intent = sample_intent();
        assert_eq!(build_prompt(&intent), build_prompt(&intent));
    }
}
