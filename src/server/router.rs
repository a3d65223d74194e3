//! Request dispatch
//!
//! A [`Router`] turns the bytes of one inbound read into a fully framed
//! response. The connection handler is generic over it, so the hiscore
//! proxy and the static demo page share the same TLS plumbing.

use std::future::Future;

use crate::hiscore::HiscoreClient;
use crate::hiscore::json::{error_body, message_body, to_json};
use crate::http::parser::{ParseError, parse_request_line};
use crate::http::request::{Method, Request};
use crate::http::response::{CONTENT_TYPE_HTML, Response, StatusCode};

pub const USAGE: &str = "OSRS Hiscore service. Use /player?name=Display%20Name";

pub trait Router {
    /// Produces the response for one request. Never fails; every problem
    /// is expressed as a status code and body.
    fn dispatch(&self, raw: &[u8]) -> impl Future<Output = Response> + Send;
}

/// Serves `/` and `/player` backed by the hiscore client.
#[derive(Debug, Clone)]
pub struct HiscoreRouter {
    client: HiscoreClient,
}

impl HiscoreRouter {
    pub fn new(client: HiscoreClient) -> Self {
        Self { client }
    }

    /// Routes an already parsed request.
    pub async fn route(&self, request: &Request) -> Response {
        if request.method != Method::GET {
            return method_not_allowed();
        }

        match request.path.as_str() {
            "" | "/" => Response::json(StatusCode::Ok, message_body(USAGE)),
            "/player" => self.player(request).await,
            _ => Response::json(StatusCode::NotFound, error_body("Not Found")),
        }
    }

    async fn player(&self, request: &Request) -> Response {
        let name = match request.param("name") {
            Some(name) if !name.is_empty() => name,
            _ => {
                return Response::json(
                    StatusCode::BadRequest,
                    error_body("Query parameter 'name' is required"),
                );
            }
        };

        let snapshot = self.client.fetch_player(name).await;
        let status = if snapshot.success {
            StatusCode::Ok
        } else {
            StatusCode::BadGateway
        };

        match to_json(&snapshot) {
            Ok(body) => Response::json(status, body),
            Err(e) => {
                tracing::error!(error = %e, "Failed to encode snapshot");
                Response::json(
                    StatusCode::InternalServerError,
                    error_body("Internal Server Error"),
                )
            }
        }
    }
}

impl Router for HiscoreRouter {
    async fn dispatch(&self, raw: &[u8]) -> Response {
        match parse_request_line(raw) {
            Ok(request) => {
                let response = self.route(&request).await;
                tracing::info!(
                    method = ?request.method,
                    path = %request.path,
                    status = response.status.as_u16(),
                    "Request handled"
                );
                response
            }
            Err(ParseError::InvalidMethod) => method_not_allowed(),
            Err(ParseError::InvalidRequest) => {
                Response::json(StatusCode::BadRequest, error_body("Malformed request"))
            }
        }
    }
}

fn method_not_allowed() -> Response {
    Response::json(StatusCode::MethodNotAllowed, error_body("Only GET supported"))
}

pub const STATIC_PAGE: &str = concat!(
    "<!DOCTYPE html><html lang=\"en\"><body>",
    "<h1> Success </h1><p> Server works. </p>",
    "</body></html>"
);

/// Answers every request with the same HTML page.
#[derive(Debug, Clone, Default)]
pub struct StaticPageRouter;

impl Router for StaticPageRouter {
    async fn dispatch(&self, _raw: &[u8]) -> Response {
        Response::new(StatusCode::Ok, STATIC_PAGE, CONTENT_TYPE_HTML)
    }
}
