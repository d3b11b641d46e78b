//! JSON request helpers for the contacts behavioural suite.

use actix_web::http::{Method, header};
use awc::Client;
use serde_json::Value;

use crate::harness::{SharedWorld, with_world_async};

struct CapturedResponse {
    status: u16,
    location: Option<String>,
    body: Option<Value>,
}

/// Send a request and record status, `Location` and JSON body on the world.
///
/// Empty bodies (204) are recorded as `None`.
pub(crate) fn perform_json_request(
    world: &SharedWorld,
    method: Method,
    path: &str,
    payload: Option<Value>,
) {
    let path = path.to_owned();
    let captured = with_world_async(world, |base_url| async move {
        let request = Client::default().request(method, format!("{base_url}{path}"));
        let mut response = match payload {
            Some(payload) => request.send_json(&payload).await.expect("json request"),
            None => request.send().await.expect("request"),
        };
        let status = response.status().as_u16();
        let location = response
            .headers()
            .get(header::LOCATION)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned);
        let body = response.body().await.expect("body");
        let body = (!body.is_empty())
            .then(|| serde_json::from_slice::<Value>(&body).expect("json body"));
        CapturedResponse {
            status,
            location,
            body,
        }
    });

    let mut ctx = world.borrow_mut();
    ctx.last_status = Some(captured.status);
    ctx.last_location = captured.location;
    ctx.last_body = captured.body;
}
