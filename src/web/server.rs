use super::env::AppEnv;
use super::handlers::{self, WebResponse};
use super::pages::render_error_page;
use std::collections::HashMap;
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use warp::http::{Method, StatusCode};
use warp::hyper::body::Bytes;
use warp::reply::Response;
use warp::{Filter, Rejection, Reply};

const MAX_FORM_BYTES: u64 = 64 * 1024;

#[derive(Debug, thiserror::Error)]
pub enum ServeError {
    #[error("failed to bind {addr}: {message}")]
    Bind { addr: String, message: String },
}

fn with_env(env: Arc<AppEnv>) -> impl Filter<Extract = (Arc<AppEnv>,), Error = Infallible> + Clone {
    warp::any().map(move || env.clone())
}

fn status_code(status: u16) -> StatusCode {
    StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
}

pub fn into_reply(response: WebResponse) -> Response {
    match response {
        WebResponse::Html { status, body } => {
            warp::reply::with_status(warp::reply::html(body), status_code(status)).into_response()
        }
        WebResponse::Json { status, body } => {
            warp::reply::with_status(warp::reply::json(&body), status_code(status)).into_response()
        }
        WebResponse::Redirect { location } => warp::reply::with_header(
            warp::reply::with_status(warp::reply(), StatusCode::SEE_OTHER),
            "location",
            location,
        )
        .into_response(),
    }
}

/// Non-POST requests to a JSON endpoint. POST rejections from the body
/// filters (411, 413) pass through untouched.
fn other_methods<P>(path: P) -> impl Filter<Extract = (Response,), Error = Rejection> + Clone
where
    P: Filter<Extract = (), Error = Rejection> + Clone + Send + Sync + 'static,
{
    path.and(warp::method()).and_then(|method: Method| async move {
        if method == Method::POST {
            return Err(warp::reject::not_found());
        }
        Ok(into_reply(WebResponse::Json {
            status: 405,
            body: serde_json::json!({ "error": "Method not allowed" }),
        }))
    })
}

/// Store and generator calls block, so handlers run on the blocking pool.
async fn respond<F>(work: F) -> Result<Response, Rejection>
where
    F: FnOnce() -> WebResponse + Send + 'static,
{
    let response = tokio::task::spawn_blocking(work)
        .await
        .unwrap_or_else(|err| WebResponse::Html {
            status: 500,
            body: render_error_page("Internal error", &err.to_string()),
        });
    Ok(into_reply(response))
}

pub fn routes(env: AppEnv) -> impl Filter<Extract = (Response,), Error = Rejection> + Clone {
    let env = Arc::new(env);

    let home = warp::path::end()
        .and(warp::get())
        .and(with_env(env.clone()))
        .and_then(|env: Arc<AppEnv>| respond(move || handlers::home(&env)));

    let setup_get = warp::path!("setup")
        .and(warp::get())
        .and(with_env(env.clone()))
        .and_then(|env: Arc<AppEnv>| respond(move || handlers::setup_page(&env)));

    let setup_post = warp::path!("setup")
        .and(warp::post())
        .and(warp::body::content_length_limit(MAX_FORM_BYTES))
        .and(warp::body::form::<HashMap<String, String>>())
        .and(with_env(env.clone()))
        .and_then(|form: HashMap<String, String>, env: Arc<AppEnv>| {
            respond(move || handlers::setup_action(&env, &form))
        });

    let pending = warp::path!("setup" / "pending")
        .and(warp::get())
        .and(warp::query::<HashMap<String, String>>())
        .and(with_env(env.clone()))
        .and_then(|query: HashMap<String, String>, env: Arc<AppEnv>| {
            respond(move || handlers::setup_pending(&env, &query))
        });

    let ai_generate = warp::path!("api" / "ai-generate")
        .and(warp::post())
        .and(warp::body::content_length_limit(MAX_FORM_BYTES))
        .and(warp::body::bytes())
        .and(with_env(env.clone()))
        .and_then(|body: Bytes, env: Arc<AppEnv>| {
            respond(move || handlers::ai_generate(&env, &body))
        });

    let ai_polish = warp::path!("api" / "ai-polish")
        .and(warp::post())
        .and(warp::body::content_length_limit(MAX_FORM_BYTES))
        .and(warp::body::bytes())
        .and(with_env(env.clone()))
        .and_then(|body: Bytes, env: Arc<AppEnv>| {
            respond(move || handlers::ai_polish(&env, &body))
        });

    let ai_other = other_methods(warp::path!("api" / "ai-generate"))
        .or(other_methods(warp::path!("api" / "ai-polish")))
        .unify();

    let config_get = warp::path!("admin" / "config")
        .and(warp::get())
        .and(with_env(env.clone()))
        .and_then(|env: Arc<AppEnv>| respond(move || handlers::admin_config_page(&env)));

    let config_post = warp::path!("admin" / "config")
        .and(warp::post())
        .and(warp::body::content_length_limit(MAX_FORM_BYTES))
        .and(warp::body::form::<HashMap<String, String>>())
        .and(with_env(env.clone()))
        .and_then(|form: HashMap<String, String>, env: Arc<AppEnv>| {
            respond(move || handlers::admin_config_action(&env, &form))
        });

    let provision_get = warp::path!("admin" / "provision")
        .and(warp::get())
        .and(with_env(env.clone()))
        .and_then(|env: Arc<AppEnv>| respond(move || handlers::provision_page(&env)));

    let provision_post = warp::path!("admin" / "provision")
        .and(warp::post())
        .and(warp::body::content_length_limit(MAX_FORM_BYTES))
        .and(warp::body::form::<HashMap<String, String>>())
        .and(with_env(env))
        .and_then(|form: HashMap<String, String>, env: Arc<AppEnv>| {
            respond(move || handlers::provision_action(&env, &form))
        });

    home.or(setup_get)
        .unify()
        .or(setup_post)
        .unify()
        .or(pending)
        .unify()
        .or(ai_generate)
        .unify()
        .or(ai_polish)
        .unify()
        .or(ai_other)
        .unify()
        .or(config_get)
        .unify()
        .or(config_post)
        .unify()
        .or(provision_get)
        .unify()
        .or(provision_post)
        .unify()
}

/// Serves until ctrl-c.
pub async fn serve(env: AppEnv, addr: SocketAddr) -> Result<(), ServeError> {
    let log = env.log.clone();
    let shutdown = async {
        let _ = tokio::signal::ctrl_c().await;
    };
    let (bound, server) = warp::serve(routes(env))
        .try_bind_with_graceful_shutdown(addr, shutdown)
        .map_err(|err| ServeError::Bind {
            addr: addr.to_string(),
            message: err.to_string(),
        })?;

    log.info("server.listening", &format!("addr={bound}"));
    eprintln!("bizsite listening on http://{bound}");
    server.await;
    log.info("server.stopped", &format!("addr={bound}"));
    Ok(())
}
