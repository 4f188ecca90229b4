//! Static Swagger UI page for browsing a generated document.

use crate::error::Result;
use log::debug;
use minijinja::Environment;
use serde::Serialize;

/// Swagger UI distribution loaded from the CDN
pub const DEFAULT_UI_VERSION: &str = "4.15.5";

/// Rendered with HTML auto-escaping, selected by the `.html` name.
const TEMPLATE_NAME: &str = "index.html";

const TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{{ title }}</title>
    <link rel="stylesheet" type="text/css" href="https://cdn.jsdelivr.net/npm/swagger-ui-dist@{{ ui_version }}/swagger-ui.css" />
    <script src="https://cdn.jsdelivr.net/npm/swagger-ui-dist@{{ ui_version }}/swagger-ui-bundle.js"></script>
    <script src="https://cdn.jsdelivr.net/npm/swagger-ui-dist@{{ ui_version }}/swagger-ui-standalone-preset.js"></script>
</head>
<body>
    <div id="swagger-ui"></div>
    <script>
        const ui = SwaggerUIBundle({
                url: {{ spec_url|tojson }},
                dom_id: '#swagger-ui',
                deepLinking: true,
                presets: [
                    SwaggerUIBundle.presets.apis,
                    SwaggerUIBundle.SwaggerUIStandalonePreset
                ],
                layout: "BaseLayout",{% if persist_authorization %}
                persistAuthorization: true,{% endif %}
        });
    </script>
</body>
</html>
"#;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ViewerConfig {
    pub title: String,
    /// URL the page fetches the JSON document from
    pub spec_url: String,
    /// Keep authorization data across page reloads
    pub persist_authorization: bool,
    pub ui_version: String,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            title: "Swagger UI".to_string(),
            spec_url: "/openapi.json".to_string(),
            persist_authorization: false,
            ui_version: DEFAULT_UI_VERSION.to_string(),
        }
    }
}

/// Render the viewer page
pub fn render_swagger_ui(config: &ViewerConfig) -> Result<String> {
    debug!("Rendering viewer page for {}", config.spec_url);

    let mut env = Environment::new();
    env.add_template(TEMPLATE_NAME, TEMPLATE)?;
    let rendered = env.get_template(TEMPLATE_NAME)?.render(config)?;
    Ok(rendered)
}
