//! API explorer component.
//!
//! The read-only documentation capability: `/openapi.json` serves an
//! OpenAPI 3.0 document assembled from every path collected during boot,
//! `/explorer` serves a Swagger UI page pointed at it.

use async_trait::async_trait;
use axum::{extract::State, response::Html, routing::get, Json};
use serde_json::{json, Value};

use super::component::{ApiPath, BootContext, Component, ComponentError};
use crate::http::server::{AppContext, ServiceInfo};
use crate::http::{EXPLORER_PATH, OPENAPI_PATH};

/// Mounts the machine- and human-readable API description endpoints.
#[derive(Debug, Clone, Copy, Default)]
pub struct ApiExplorerComponent;

#[async_trait]
impl Component for ApiExplorerComponent {
    fn name(&self) -> &'static str {
        "api-explorer"
    }

    async fn boot(&self, ctx: &mut BootContext) -> Result<(), ComponentError> {
        ctx.add_api_path(ApiPath::get(
            OPENAPI_PATH,
            "OpenAPI 3.0 description of this service",
        ));
        ctx.add_api_path(ApiPath::get(EXPLORER_PATH, "Interactive API explorer"));
        ctx.mount(OPENAPI_PATH, get(openapi_document));
        ctx.mount(EXPLORER_PATH, get(explorer_page));
        Ok(())
    }
}

async fn openapi_document(State(context): State<AppContext>) -> Json<Value> {
    Json(build_openapi_document(&context.service, &context.catalog))
}

async fn explorer_page(State(context): State<AppContext>) -> Html<String> {
    Html(render_explorer_page(&context.service.name))
}

/// Assemble the OpenAPI 3.0 document from the collected API paths.
pub fn build_openapi_document(service: &ServiceInfo, catalog: &[ApiPath]) -> Value {
    let mut paths = serde_json::Map::new();
    for entry in catalog {
        let operation = json!({
            "summary": entry.summary,
            "responses": {
                "200": { "description": "Success" }
            }
        });
        let by_method = paths
            .entry(entry.path.clone())
            .or_insert_with(|| json!({}));
        if let Some(by_method) = by_method.as_object_mut() {
            by_method.insert(entry.method.as_str().to_lowercase(), operation);
        }
    }

    json!({
        "openapi": "3.0.0",
        "info": {
            "title": service.name,
            "version": service.version,
        },
        "paths": paths,
    })
}

fn render_explorer_page(service_name: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
  <meta charset="utf-8">
  <title>{service_name} &mdash; API Explorer</title>
  <link rel="stylesheet" href="https://unpkg.com/swagger-ui-dist@5/swagger-ui.css">
</head>
<body>
  <div id="swagger-ui"></div>
  <script src="https://unpkg.com/swagger-ui-dist@5/swagger-ui-bundle.js"></script>
  <script>
    window.onload = function() {{
      SwaggerUIBundle({{
        url: '{OPENAPI_PATH}',
        dom_id: '#swagger-ui'
      }});
    }};
  </script>
</body>
</html>
"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::PING_PATH;

    fn service() -> ServiceInfo {
        ServiceInfo {
            name: "tenant-management-service".to_string(),
            version: "0.0.0-test",
        }
    }

    #[test]
    fn test_document_lists_every_collected_path() {
        let catalog = vec![
            ApiPath::get(PING_PATH, "Liveness probe"),
            ApiPath::get(OPENAPI_PATH, "OpenAPI 3.0 description of this service"),
            ApiPath::get(EXPLORER_PATH, "Interactive API explorer"),
        ];
        let doc = build_openapi_document(&service(), &catalog);

        assert_eq!(doc["openapi"], "3.0.0");
        assert_eq!(doc["info"]["title"], "tenant-management-service");
        assert_eq!(doc["paths"][PING_PATH]["get"]["summary"], "Liveness probe");
        assert!(doc["paths"][OPENAPI_PATH]["get"].is_object());
        assert!(doc["paths"][EXPLORER_PATH]["get"].is_object());
    }

    #[test]
    fn test_explorer_page_points_at_the_document() {
        let page = render_explorer_page("subscription-service");
        assert!(page.contains("subscription-service"));
        assert!(page.contains(OPENAPI_PATH));
        assert!(page.contains("SwaggerUIBundle"));
    }

    #[test]
    fn test_methods_are_lowercased() {
        let catalog = vec![ApiPath {
            method: axum::http::Method::POST,
            path: "/subscriptions".to_string(),
            summary: "Create a subscription".to_string(),
        }];
        let doc = build_openapi_document(&service(), &catalog);
        assert!(doc["paths"]["/subscriptions"]["post"].is_object());
    }
}
