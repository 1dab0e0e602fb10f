/// Deterministic substitute artifact used when the generation service is
/// unavailable or returns an unusable result. Same output for the same app
/// name on every call, so nothing time-dependent belongs in here; the
/// provenance header added by the artifact writer carries the timestamp.
pub fn synthesize(app_name: &str) -> String {
    let class_name = class_name_for(app_name);

    format!(
        r#"/**
 * {class_name} - Auto-generated SDK
 */

class {class_name} {{
    /**
     * Initialize the {app_name} SDK
     * @param {{Object}} config - Configuration object
     * @param {{string}} config.apiKey - API key for authentication
     * @param {{string}} config.baseUrl - Base URL for API calls
     */
    constructor(config = {{}}) {{
        this.apiKey = config.apiKey || '';
        this.baseUrl = config.baseUrl || 'https://api.{app_name}.com';
        this.headers = {{
            'Content-Type': 'application/json',
            'Authorization': `Bearer ${{this.apiKey}}`
        }};
    }}

    /**
     * Make a GET request
     * @param {{string}} endpoint - API endpoint
     * @returns {{Promise<Object>}} Response data
     */
    async get(endpoint) {{
        try {{
            const response = await fetch(`${{this.baseUrl}}${{endpoint}}`, {{
                method: 'GET',
                headers: this.headers
            }});

            if (!response.ok) {{
                throw new Error(`HTTP error! status: ${{response.status}}`);
            }}

            return await response.json();
        }} catch (error) {{
            console.error('GET request failed:', error);
            throw error;
        }}
    }}

    /**
     * Make a POST request
     * @param {{string}} endpoint - API endpoint
     * @param {{Object}} data - Request body data
     * @returns {{Promise<Object>}} Response data
     */
    async post(endpoint, data) {{
        try {{
            const response = await fetch(`${{this.baseUrl}}${{endpoint}}`, {{
                method: 'POST',
                headers: this.headers,
                body: JSON.stringify(data)
            }});

            if (!response.ok) {{
                throw new Error(`HTTP error! status: ${{response.status}}`);
            }}

            return await response.json();
        }} catch (error) {{
            console.error('POST request failed:', error);
            throw error;
        }}
    }}

    /**
     * Get SDK version
     * @returns {{string}} SDK version
     */
    getVersion() {{
        return '1.0.0';
    }}
}}

export default {class_name};
"#
    )
}

/// `weather-ly` -> `WeatherlySDK`. Only alphanumerics survive into the class
/// name so the emitted JavaScript stays syntactically valid.
fn class_name_for(app_name: &str) -> String {
    let cleaned: String = app_name
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .collect();
    let mut chars = cleaned.chars();
    let capitalized = match chars.next() {
        Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
        None => "App".to_string(),
    };
    format!("{capitalized}SDK")
}
