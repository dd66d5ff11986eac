use crate::auth::sessions;
use crate::errors::ServerError;
use crate::filter::RawParams;
use crate::responses::{error_to_response, ok_json, ResultResp};
use crate::state::AppState;
use astra::{Request, Response};
use chrono::Utc;
use serde::Deserialize;
use serde_json::{json, Value};
use std::io::Read;
use std::time::Instant;

/// Largest request body we are willing to read.
const MAX_BODY_BYTES: u64 = 64 * 1024;

/// Entry point for the server: route, log, and turn errors into responses.
pub fn serve_request(req: Request, state: &AppState) -> Response {
    let started = Instant::now();
    let method = req.method().to_string();
    let path = req.uri().path().to_string();

    let resp = handle(req, state).unwrap_or_else(error_to_response);

    tracing::info!(
        %method,
        %path,
        status = resp.status().as_u16(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "request"
    );
    resp
}

pub fn handle(mut req: Request, state: &AppState) -> ResultResp {
    let method = req.method().as_str().to_string();
    let path = req.uri().path().to_string();

    match (method.as_str(), path.as_str()) {
        ("GET", "/properties") => {
            let page = state.listings.list(&query_params(&req))?;
            ok_json(&page)
        }
        ("GET", "/properties/zipcodes") => ok_json(&state.listings.zip_codes()?),

        ("GET", "/properties/saved-properties") => {
            let user_id = require_user(&req, state)?;
            ok_json(&state.favorites.list(&user_id)?)
        }
        ("GET", "/properties/saved-property") => {
            let user_id = require_user(&req, state)?;
            let params = query_params(&req);
            let property_id = params.get("propertyId").unwrap_or_default();
            let saved = state.favorites.is_saved(&user_id, property_id)?;
            ok_json(&json!({ "success": saved }))
        }
        ("POST", "/properties/save-property") => {
            let user_id = require_user(&req, state)?;
            let body = read_favorite_body(&mut req)?;
            state.favorites.save(&user_id, &body.property_id())?;
            ok_json(&json!({ "success": true }))
        }
        ("POST", "/properties/remove-saved-property") => {
            let user_id = require_user(&req, state)?;
            let body = read_favorite_body(&mut req)?;
            state.favorites.remove(&user_id, &body.property_id())?;
            ok_json(&json!({ "success": true }))
        }

        ("GET", "/blog") => ok_json(&state.blog.list_posts()?),

        ("GET", p) if p.starts_with("/property/") => {
            let id = path_segment(&p["/property/".len()..])?;
            ok_json(&state.listings.get(&id)?)
        }
        ("GET", p) if p.starts_with("/blog/") => {
            let slug = path_segment(&p["/blog/".len()..])?;
            ok_json(&state.blog.get_post(&slug)?)
        }

        _ => Err(ServerError::NotFound(format!("no route for {method} {path}"))),
    }
}

/// Percent-decode a path parameter. `+` stays literal.
fn path_segment(raw: &str) -> Result<String, ServerError> {
    urlencoding::decode(raw)
        .map(|s| s.into_owned())
        .map_err(|_| ServerError::BadRequest("path is not valid UTF-8".into()))
}

fn query_params(req: &Request) -> RawParams {
    req.uri()
        .query()
        .map(RawParams::from_query)
        .unwrap_or_default()
}

/// Resolve the session cookie to a user, or refuse the request.
fn require_user(req: &Request, state: &AppState) -> Result<String, ServerError> {
    let token = sessions::session_cookie(req).ok_or(ServerError::Unauthorized)?;
    let now = Utc::now().timestamp();
    state
        .db
        .with_conn(|conn| sessions::load_user_from_session(conn, &token, now))?
        .ok_or(ServerError::Unauthorized)
}

#[derive(Debug, Default, Deserialize)]
struct FavoriteBody {
    #[serde(rename = "propertyId", default)]
    property_id: Option<Value>,
}

impl FavoriteBody {
    /// Accepts the id as a JSON string or number.
    fn property_id(&self) -> String {
        match &self.property_id {
            Some(Value::String(s)) => s.clone(),
            Some(Value::Number(n)) => n.to_string(),
            _ => String::new(),
        }
    }
}

fn read_favorite_body(req: &mut Request) -> Result<FavoriteBody, ServerError> {
    let is_form = req
        .headers()
        .get("Content-Type")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ct| ct.starts_with(mime::APPLICATION_WWW_FORM_URLENCODED.as_ref()));

    let mut bytes = Vec::new();
    req.body_mut()
        .reader()
        .take(MAX_BODY_BYTES)
        .read_to_end(&mut bytes)
        .map_err(|e| ServerError::BadRequest(format!("unreadable body: {e}")))?;

    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(FavoriteBody::default());
    }

    if is_form {
        let form = RawParams::from_query(&String::from_utf8_lossy(&bytes));
        return Ok(FavoriteBody {
            property_id: form.get("propertyId").map(|v| Value::String(v.to_string())),
        });
    }

    serde_json::from_slice(&bytes)
        .map_err(|e| ServerError::BadRequest(format!("invalid JSON body: {e}")))
}
