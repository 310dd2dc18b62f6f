use crate::{error::ApiError, service::Service};
use futures::{pin_mut, Stream, TryStreamExt};
use pfo_structs::error::BodyError;
use std::{convert::Infallible, sync::Arc};
use tracing::{error, warn, Instrument};
use warp::{
    cors::CorsForbidden,
    reject::{self, MethodNotAllowed, Reject},
    reply::{self, Reply, Response},
    Buf, Filter, Rejection,
};

// Request headers browsers commonly ask for in a preflight.
const ALLOWED_HEADERS: [&str; 12] = [
    "accept",
    "accept-language",
    "authorization",
    "cache-control",
    "content-language",
    "content-type",
    "if-match",
    "if-none-match",
    "origin",
    "pragma",
    "x-requested-with",
    "x-request-id",
];

#[derive(Debug)]
struct BodyTooLarge {
    limit: u64,
}

impl Reject for BodyTooLarge {}

#[derive(Debug)]
struct BodyUnreadable(String);

impl Reject for BodyUnreadable {}

pub fn routes(
    service: Arc<Service>,
) -> impl Filter<Extract = impl Reply, Error = Infallible> + Clone {
    let health = warp::path("health")
        .and(warp::path::end())
        .and(warp::get())
        .and(with_service(service.clone()))
        .map(|service: Arc<Service>| reply::json(&service.health()));

    let optimize = warp::path("optimizar")
        .and(warp::path::end())
        .and(warp::post())
        .and(body_within(service.config().max_body_bytes))
        .and(with_service(service))
        .and_then(optimize_handler);

    let cors = warp::cors()
        .allow_any_origin()
        .allow_methods(vec!["GET", "POST", "OPTIONS"])
        .allow_headers(ALLOWED_HEADERS);

    health
        .or(optimize)
        .recover(handle_rejection)
        .with(cors)
        .recover(handle_rejection)
        .with(warp::trace::request())
}

fn with_service(
    service: Arc<Service>,
) -> impl Filter<Extract = (Arc<Service>,), Error = Infallible> + Clone {
    warp::any().map(move || service.clone())
}

/// Collects the request body, whether it is sized by `Content-Length` or chunked,
/// rejecting it as soon as it grows beyond `limit` bytes.
fn body_within(limit: u64) -> impl Filter<Extract = (Vec<u8>,), Error = Rejection> + Clone {
    warp::header::optional::<u64>("content-length")
        .and(warp::body::stream())
        .and_then(move |length: Option<u64>, stream| read_body(length, stream, limit))
}

async fn read_body<S, B>(length: Option<u64>, stream: S, limit: u64) -> Result<Vec<u8>, Rejection>
where
    S: Stream<Item = Result<B, warp::Error>>,
    B: Buf,
{
    if length.map_or(false, |length| length > limit) {
        return Err(reject::custom(BodyTooLarge { limit }));
    }
    pin_mut!(stream);
    let mut body = Vec::new();
    while let Some(mut chunk) = stream
        .try_next()
        .await
        .map_err(|e| reject::custom(BodyUnreadable(e.to_string())))?
    {
        if (body.len() + chunk.remaining()) as u64 > limit {
            return Err(reject::custom(BodyTooLarge { limit }));
        }
        while chunk.has_remaining() {
            let bytes = chunk.chunk();
            let n = bytes.len();
            body.extend_from_slice(bytes);
            chunk.advance(n);
        }
    }
    Ok(body)
}

async fn optimize_handler(body: Vec<u8>, service: Arc<Service>) -> Result<Response, Infallible> {
    let span = service.span().clone();
    Ok(match service.optimize(&body).instrument(span).await {
        Ok(resp) => reply::json(&resp).into_response(),
        Err(e) => {
            if e.status().is_server_error() {
                error!("optimization failed: {}", e);
            } else {
                warn!("rejected request: {}", e);
            }
            e.into_response()
        }
    })
}

async fn handle_rejection(err: Rejection) -> Result<Response, Infallible> {
    let api_error = if err.is_not_found() {
        ApiError::NotFound
    } else if let Some(e) = err.find::<BodyTooLarge>() {
        ApiError::TooLarge(format!("Request body exceeds {} bytes", e.limit))
    } else if let Some(BodyUnreadable(reason)) = err.find::<BodyUnreadable>() {
        ApiError::MalformedRequest(BodyError::Unparsable(reason.clone()))
    } else if let Some(e) = err.find::<CorsForbidden>() {
        ApiError::Forbidden(e.to_string())
    } else if err.find::<MethodNotAllowed>().is_some() {
        ApiError::MethodNotAllowed
    } else {
        error!("unhandled rejection: {:?}", err);
        ApiError::Internal(format!("{:?}", err))
    };
    Ok(api_error.into_response())
}
