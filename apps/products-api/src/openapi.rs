//! OpenAPI documentation configuration

use utoipa::OpenApi;
use utoipa::openapi::{self, server::Server};

use crate::api::samples;
use crate::config::Config;

/// Base OpenAPI documentation for Products API
///
/// Product paths are nested at runtime by [`api_doc`] because their mount
/// path is configurable.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Products API",
        version = "0.1.0",
        description = "Product catalog CRUD API with paginated listing",
        license(name = "MIT")
    ),
    paths(samples::list_sample_products),
    components(schemas(samples::SampleProduct, axum_helpers::ErrorResponse)),
    tags(
        (name = "Samples", description = "Static demo data")
    )
)]
pub struct ApiDoc;

/// The served document: product paths under `/api{PRODUCTS_PATH}` and the
/// public base URL as the only server.
pub fn api_doc(config: &Config) -> openapi::OpenApi {
    let mut doc = ApiDoc::openapi().nest(
        format!("/api{}", config.products_path),
        domain_products::ApiDoc::openapi(),
    );
    doc.servers = Some(vec![Server::new(&config.server.public_url)]);
    doc
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(products_path: &str) -> Config {
        temp_env::with_vars(
            [
                ("DATABASE_URL", Some("postgres://localhost/catalog")),
                ("PRODUCTS_PATH", Some(products_path)),
                ("BASE_URL", Some("https://catalog.example.com")),
            ],
            || Config::from_env().unwrap(),
        )
    }

    #[test]
    fn test_product_paths_follow_mount_path() {
        let doc = api_doc(&config("/products"));

        assert!(doc.paths.paths.contains_key("/api/products"));
        assert!(doc.paths.paths.contains_key("/api/products/{id}"));
        assert!(doc.paths.paths.contains_key("/api/sample-products"));

        let doc = api_doc(&config("/catalog"));
        assert!(doc.paths.paths.contains_key("/api/catalog/{id}"));
    }

    #[test]
    fn test_servers_use_public_url() {
        let doc = api_doc(&config("/products"));
        let servers = doc.servers.unwrap();
        assert_eq!(servers.len(), 1);
        assert_eq!(servers[0].url, "https://catalog.example.com");
    }
}
