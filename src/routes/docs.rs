//! OpenAPI description of the product API and the Swagger UI serving it.

use utoipa::OpenApi;
use utoipa::openapi::{self, RefOr, Schema};
use utoipa_swagger_ui::SwaggerUi;

use crate::dto::product::ErrorBody;
use crate::forms::FieldViolation;
use crate::forms::product::ProductForm;
use crate::routes::product;

const PAGING_PATH: &str = "/api/{culture}/product/paging";

#[derive(OpenApi)]
#[openapi(
    info(title = "Shop catalog REST API", version = "v1"),
    paths(
        product::get_products,
        product::get_paging,
        product::get_product,
        product::create_product,
        product::update_product,
        product::delete_product,
    ),
    components(schemas(ErrorBody, FieldViolation, ProductForm)),
    tags((name = "product", description = "Product catalog management"))
)]
pub struct ApiDoc;

/// Builds the document with the `pageSize` upper bound set to the configured
/// maximum.
pub fn api_doc(max_page_size: usize) -> openapi::OpenApi {
    let mut doc = ApiDoc::openapi();

    let parameters = doc
        .paths
        .paths
        .get_mut(PAGING_PATH)
        .and_then(|item| item.get.as_mut())
        .and_then(|operation| operation.parameters.as_mut());
    for parameter in parameters.into_iter().flatten() {
        if parameter.name != "pageSize" {
            continue;
        }
        if let Some(RefOr::T(Schema::Object(schema))) = parameter.schema.as_mut() {
            schema.maximum = Some(max_page_size.into());
        }
    }

    doc
}

/// Swagger UI under `/swagger/`, reading the document from
/// `/swagger/v1/swagger.json`.
pub fn swagger_ui(max_page_size: usize) -> SwaggerUi {
    SwaggerUi::new("/swagger/{_:.*}").url("/swagger/v1/swagger.json", api_doc(max_page_size))
}

#[cfg(test)]
mod tests {
    use serde_json::Value;

    use super::*;

    #[test]
    fn document_lists_every_product_route() {
        let doc = ApiDoc::openapi();

        assert_eq!(doc.info.title, "Shop catalog REST API");
        assert_eq!(doc.info.version, "v1");
        for path in [
            "/api/{culture}/product",
            "/api/{culture}/product/paging",
            "/api/{culture}/product/{id}",
        ] {
            assert!(doc.paths.get_path_item(path).is_some(), "missing {path}");
        }
    }

    #[test]
    fn page_size_bound_follows_configuration() {
        let doc = serde_json::to_value(api_doc(25)).unwrap();

        let parameters = doc["paths"][PAGING_PATH]["get"]["parameters"]
            .as_array()
            .unwrap();
        let page_size: &Value = parameters
            .iter()
            .find(|p| p["name"] == "pageSize")
            .unwrap();

        assert_eq!(page_size["schema"]["maximum"], 25);
        assert_eq!(page_size["schema"]["minimum"], 1);
    }
}
