//! Translation of failures into JSON error responses.

use std::fmt;

use actix_web::body::MessageBody;
use actix_web::dev::ServiceResponse;
use actix_web::error::{InternalError, JsonPayloadError, PathError, QueryPayloadError};
use actix_web::http::StatusCode;
use actix_web::http::header::{
    ACCESS_CONTROL_ALLOW_CREDENTIALS, ACCESS_CONTROL_ALLOW_ORIGIN, CONTENT_LANGUAGE, CONTENT_TYPE,
    HeaderValue,
};
use actix_web::middleware::ErrorHandlerResponse;
use actix_web::{HttpRequest, HttpResponse, ResponseError, web};

use crate::domain::types::Locale;
use crate::dto::product::ErrorBody;
use crate::localization::{LocalizationOptions, Message};
use crate::models::config::ServerConfig;
use crate::services::ServiceError;

/// A service failure bound to the locale its message is rendered in.
#[derive(Debug)]
pub struct ApiError {
    error: ServiceError,
    locale: Locale,
}

impl ApiError {
    pub fn new(error: ServiceError, locale: &Locale) -> Self {
        Self {
            error,
            locale: locale.clone(),
        }
    }

    fn body(&self) -> ErrorBody {
        match &self.error {
            ServiceError::Validation(violations) => {
                ErrorBody::new(Message::ValidationFailed.text(&self.locale))
                    .with_violations(violations.clone())
            }
            ServiceError::NotFound => ErrorBody::new(Message::NotFound.text(&self.locale)),
            ServiceError::Repository(_) | ServiceError::Internal(_) => {
                ErrorBody::new(Message::InternalError.text(&self.locale))
            }
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.error, f)
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self.error {
            ServiceError::Validation(_) => StatusCode::BAD_REQUEST,
            ServiceError::NotFound => StatusCode::NOT_FOUND,
            ServiceError::Repository(_) | ServiceError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        if status.is_server_error() {
            log::error!("Request failed: {}", self.error);
        } else {
            log::warn!("Request rejected: {}", self.error);
        }

        HttpResponse::build(status)
            .insert_header((CONTENT_LANGUAGE, self.locale.as_str()))
            .json(self.body())
    }
}

fn request_locale(req: &HttpRequest) -> Option<Locale> {
    let options = req.app_data::<web::Data<LocalizationOptions>>()?;
    Some(match req.match_info().get("culture") {
        Some(culture) => options.resolve(culture),
        None => options.default_locale().clone(),
    })
}

fn bad_request(err: impl fmt::Display, req: &HttpRequest) -> actix_web::Error {
    log::warn!("Malformed request to {}: {err}", req.path());

    let mut response = HttpResponse::BadRequest();
    let body = match request_locale(req) {
        Some(locale) => {
            response.insert_header((CONTENT_LANGUAGE, locale.as_str()));
            ErrorBody::new(Message::BadRequest.text(&locale))
        }
        None => ErrorBody::new(err.to_string()),
    };

    InternalError::from_response(err.to_string(), response.json(body)).into()
}

/// Error handler for query strings that fail to deserialize.
pub fn query_error(err: QueryPayloadError, req: &HttpRequest) -> actix_web::Error {
    bad_request(err, req)
}

/// Error handler for JSON bodies that fail to deserialize.
pub fn json_error(err: JsonPayloadError, req: &HttpRequest) -> actix_web::Error {
    bad_request(err, req)
}

/// Error handler for path segments that fail to deserialize.
pub fn path_error(err: PathError, req: &HttpRequest) -> actix_web::Error {
    bad_request(err, req)
}

/// Finishes every 5xx response: attaches the configured CORS headers and
/// replaces non-JSON bodies with a localized `{ "message" }` body.
pub fn render_server_error<B: MessageBody>(
    mut res: ServiceResponse<B>,
) -> actix_web::Result<ErrorHandlerResponse<B>> {
    let origin = res
        .request()
        .app_data::<web::Data<ServerConfig>>()
        .map(|config| config.allowed_origin.clone());

    if let Some(origin) = origin {
        let headers = res.response_mut().headers_mut();
        match HeaderValue::from_str(&origin) {
            Ok(value) => {
                headers.insert(ACCESS_CONTROL_ALLOW_ORIGIN, value);
                headers.insert(
                    ACCESS_CONTROL_ALLOW_CREDENTIALS,
                    HeaderValue::from_static("true"),
                );
            }
            Err(e) => log::error!("Invalid allowed origin {origin:?}: {e}"),
        }
    }

    let is_json = res
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.starts_with("application/json"));
    if is_json {
        return Ok(ErrorHandlerResponse::Response(res.map_into_left_body()));
    }

    let locale = request_locale(res.request());
    let message = match &locale {
        Some(locale) => Message::InternalError.text(locale),
        None => "Internal server error",
    };
    let body = serde_json::to_string(&ErrorBody::new(message))?;

    let (req, mut res) = res.into_parts();
    res.headers_mut()
        .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    if let Some(value) = locale.and_then(|l| HeaderValue::from_str(l.as_str()).ok()) {
        res.headers_mut().insert(CONTENT_LANGUAGE, value);
    }
    let res = ServiceResponse::new(req, res.set_body(body))
        .map_into_boxed_body()
        .map_into_right_body();

    Ok(ErrorHandlerResponse::Response(res))
}
