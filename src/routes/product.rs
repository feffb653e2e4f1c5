//! HTTP handlers for `/api/{culture}/product`.

use actix_web::http::header::CONTENT_LANGUAGE;
use actix_web::{HttpResponse, delete, get, post, put, web};

use crate::domain::product::Product;
use crate::domain::types::Locale;
use crate::dto::product::{ErrorBody, ProductsQuery};
use crate::forms::product::ProductForm;
use crate::localization::RequestLocale;
use crate::models::config::ServerConfig;
use crate::pagination::PagedResult;
use crate::repository::DieselRepository;
use crate::routes::errors::ApiError;
use crate::services::product as product_service;
use crate::services::{ServiceError, ServiceResult};

/// Runs a blocking service call on the worker pool and binds any failure to
/// the request locale.
async fn blocking<T, F>(locale: &Locale, call: F) -> Result<T, ApiError>
where
    F: FnOnce() -> ServiceResult<T> + Send + 'static,
    T: Send + 'static,
{
    web::block(call)
        .await
        .map_err(|e| ApiError::new(ServiceError::Internal(e.to_string()), locale))?
        .map_err(|e| ApiError::new(e, locale))
}

fn ok(locale: &Locale) -> actix_web::HttpResponseBuilder {
    let mut builder = HttpResponse::Ok();
    builder.insert_header((CONTENT_LANGUAGE, locale.as_str()));
    builder
}

fn no_content(locale: &Locale) -> HttpResponse {
    HttpResponse::NoContent()
        .insert_header((CONTENT_LANGUAGE, locale.as_str()))
        .finish()
}

#[utoipa::path(
    get,
    path = "/api/{culture}/product",
    params(("culture" = String, Path, description = "Culture such as en-US or vi-VN")),
    responses(
        (status = 200, description = "Every product in natural order", body = Vec<Product>),
        (status = 500, body = ErrorBody),
    ),
    tag = "product"
)]
#[get("/product")]
pub async fn get_products(
    RequestLocale(locale): RequestLocale,
    repo: web::Data<DieselRepository>,
) -> Result<HttpResponse, ApiError> {
    let repo = repo.into_inner();
    let call_locale = locale.clone();
    let products = blocking(&locale, move || {
        product_service::list_products(repo.as_ref(), &call_locale)
    })
    .await?;

    Ok(ok(&locale).json(products))
}

#[utoipa::path(
    get,
    path = "/api/{culture}/product/paging",
    params(
        ("culture" = String, Path, description = "Culture such as en-US or vi-VN"),
        ProductsQuery
    ),
    responses(
        (status = 200, description = "One page of matching products", body = PagedResult<Product>),
        (status = 400, description = "Page size out of range or malformed query", body = ErrorBody),
        (status = 500, body = ErrorBody),
    ),
    tag = "product"
)]
#[get("/product/paging")]
pub async fn get_paging(
    RequestLocale(locale): RequestLocale,
    params: web::Query<ProductsQuery>,
    repo: web::Data<DieselRepository>,
    server_config: web::Data<ServerConfig>,
) -> Result<HttpResponse, ApiError> {
    let (filter, page) = params
        .into_inner()
        .into_parts()
        .map_err(|v| ApiError::new(ServiceError::Validation(vec![v]), &locale))?;

    let repo = repo.into_inner();
    let max_page_size = server_config.max_page_size;
    let call_locale = locale.clone();
    let result = blocking(&locale, move || {
        product_service::get_page(repo.as_ref(), filter, page, &call_locale, max_page_size)
    })
    .await?;

    Ok(ok(&locale).json(result))
}

#[utoipa::path(
    get,
    path = "/api/{culture}/product/{id}",
    params(
        ("culture" = String, Path, description = "Culture such as en-US or vi-VN"),
        ("id" = i32, Path, description = "Product id")
    ),
    responses(
        (status = 200, body = Product),
        (status = 404, description = "No product with this id", body = ErrorBody),
    ),
    tag = "product"
)]
#[get("/product/{id}")]
pub async fn get_product(
    RequestLocale(locale): RequestLocale,
    path: web::Path<(String, i32)>,
    repo: web::Data<DieselRepository>,
) -> Result<HttpResponse, ApiError> {
    let (_, product_id) = path.into_inner();
    let repo = repo.into_inner();
    let call_locale = locale.clone();
    let product = blocking(&locale, move || {
        product_service::get_product(repo.as_ref(), product_id, &call_locale)
    })
    .await?;

    Ok(ok(&locale).json(product))
}

#[utoipa::path(
    post,
    path = "/api/{culture}/product",
    params(("culture" = String, Path, description = "Culture the text fields are written in")),
    request_body = ProductForm,
    responses(
        (status = 200, description = "Id of the created product", body = i32),
        (status = 400, description = "Validation failed", body = ErrorBody),
    ),
    tag = "product"
)]
#[post("/product")]
pub async fn create_product(
    RequestLocale(locale): RequestLocale,
    form: web::Json<ProductForm>,
    repo: web::Data<DieselRepository>,
) -> Result<HttpResponse, ApiError> {
    let form = form.into_inner();
    let repo = repo.into_inner();
    let call_locale = locale.clone();
    let id = blocking(&locale, move || {
        product_service::create_product(repo.as_ref(), form, &call_locale)
    })
    .await?;

    log::info!("Created product {id}");
    Ok(ok(&locale).json(id.get()))
}

#[utoipa::path(
    put,
    path = "/api/{culture}/product/{id}",
    params(
        ("culture" = String, Path, description = "Culture the text fields are written in"),
        ("id" = i32, Path, description = "Product id")
    ),
    request_body = ProductForm,
    responses(
        (status = 204, description = "Product updated, or no product with this id"),
        (status = 400, description = "Validation failed", body = ErrorBody),
    ),
    tag = "product"
)]
#[put("/product/{id}")]
pub async fn update_product(
    RequestLocale(locale): RequestLocale,
    path: web::Path<(String, i32)>,
    form: web::Json<ProductForm>,
    repo: web::Data<DieselRepository>,
) -> Result<HttpResponse, ApiError> {
    let (_, product_id) = path.into_inner();
    let form = form.into_inner();
    let repo = repo.into_inner();
    let call_locale = locale.clone();
    blocking(&locale, move || {
        product_service::update_product(repo.as_ref(), product_id, form, &call_locale)
    })
    .await?;

    Ok(no_content(&locale))
}

#[utoipa::path(
    delete,
    path = "/api/{culture}/product/{id}",
    params(
        ("culture" = String, Path, description = "Culture such as en-US or vi-VN"),
        ("id" = i32, Path, description = "Product id")
    ),
    responses((status = 204, description = "Product removed, or no product with this id")),
    tag = "product"
)]
#[delete("/product/{id}")]
pub async fn delete_product(
    RequestLocale(locale): RequestLocale,
    path: web::Path<(String, i32)>,
    repo: web::Data<DieselRepository>,
) -> Result<HttpResponse, ApiError> {
    let (_, product_id) = path.into_inner();
    let repo = repo.into_inner();
    blocking(&locale, move || {
        product_service::delete_product(repo.as_ref(), product_id)
    })
    .await?;

    Ok(no_content(&locale))
}
