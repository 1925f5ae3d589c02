#![forbid(unsafe_code)]

use poem::Request;
use poem_openapi::{ OpenApi, payload::Json, Object, param::Query };

use crate::services::greeting::greet;
use crate::utils::hello_utils::{self, RequestDebug};

// ***************************************************************************
//                          Request/Response Definitions
// ***************************************************************************
pub struct GetGreetingApi;

struct ReqGetGreeting
{
    name: Option<String>,
}

#[derive(Object, Debug)]
struct RespGetGreeting
{
    message: String,
}

// Implement the debug record trait for logging.
impl RequestDebug for ReqGetGreeting {
    fn get_request_info(&self) -> String {
        let mut s = String::with_capacity(255);
        s.push_str("  Request parameters:");
        s.push_str("\n    name: ");
        s.push_str(self.name.as_deref().unwrap_or("<absent>"));
        s
    }
}

// ***************************************************************************
//                             OpenAPI Endpoint
// ***************************************************************************
#[OpenApi]
impl GetGreetingApi {
    #[oai(path = "/hello", method = "get")]
    async fn get_greeting_api(&self, http_req: &Request, name: Query<Option<String>>) -> Json<RespGetGreeting> {
        let req = ReqGetGreeting {name: name.0};
        Json(RespGetGreeting::process(http_req, &req))
    }
}

// ***************************************************************************
//                          Request/Response Methods
// ***************************************************************************
impl RespGetGreeting {
    fn new(message: String) -> Self {
        Self {message}
    }

    /// Process the request.
    fn process(http_req: &Request, req: &ReqGetGreeting) -> Self {
        // Conditional logging depending on log level.
        hello_utils::debug_request(http_req, req);

        Self::new(greet(req.name.as_deref()))
    }
}
