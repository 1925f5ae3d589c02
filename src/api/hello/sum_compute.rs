#![forbid(unsafe_code)]

use poem::Request;
use poem_openapi::{ OpenApi, payload::Json, Object, ApiResponse };
use log::error;
use serde_json::Value;

use crate::services::arithmetic::add;
use crate::utils::errors::HttpResult;
use crate::utils::hello_utils::{self, RequestDebug};

// ***************************************************************************
//                          Request/Response Definitions
// ***************************************************************************
pub struct ComputeSumApi;

// Operands are taken as raw JSON so that a bad field never rejects the
// request; see operand().
#[derive(Object)]
struct ReqComputeSum
{
    a: Option<Value>,
    b: Option<Value>,
}

#[derive(Object, Debug)]
struct RespComputeSum
{
    result: i32,
}

// Implement the debug record trait for logging.
impl RequestDebug for ReqComputeSum {
    fn get_request_info(&self) -> String {
        format!("  Request body:\n    a: {:?}\n    b: {:?}", self.a, self.b)
    }
}

// ------------------- HTTP Status Codes -------------------
#[derive(Debug, ApiResponse)]
#[oai(bad_request_handler = "bad_request_handler")]
enum SumResponse {
    #[oai(status = 200)]
    Http200(Json<RespComputeSum>),
    #[oai(status = 400)]
    Http400(Json<HttpResult>),
}

fn make_http_200(resp: RespComputeSum) -> SumResponse {
    SumResponse::Http200(Json(resp))
}
fn make_http_400(msg: String) -> SumResponse {
    SumResponse::Http400(Json(HttpResult::new(400.to_string(), msg)))
}

// Bodies that aren't a JSON object never reach the endpoint.
fn bad_request_handler(err: poem::Error) -> SumResponse {
    let msg = "ERROR: ".to_owned() + err.to_string().as_str();
    error!("{}", msg);
    make_http_400(msg)
}

// ***************************************************************************
//                             OpenAPI Endpoint
// ***************************************************************************
#[OpenApi]
impl ComputeSumApi {
    #[oai(path = "/hello/sum", method = "post")]
    async fn compute_sum_api(&self, http_req: &Request, req: Json<ReqComputeSum>) -> SumResponse {
        make_http_200(RespComputeSum::process(http_req, &req))
    }
}

// ***************************************************************************
//                          Request/Response Methods
// ***************************************************************************
impl RespComputeSum {
    fn new(result: i32) -> Self {
        Self {result}
    }

    /// Process the request.
    fn process(http_req: &Request, req: &ReqComputeSum) -> Self {
        // Conditional logging depending on log level.
        hello_utils::debug_request(http_req, req);

        Self::new(add(operand(req.a.as_ref()), operand(req.b.as_ref())))
    }
}

// ***************************************************************************
//                          Private Functions
// ***************************************************************************
// ---------------------------------------------------------------------------
// operand:
// ---------------------------------------------------------------------------
/** Convert a body field to an i32.  Integers are used as is, floats are
 * truncated toward zero and numeric strings are parsed.  Anything else,
 * including absent, null and out-of-range values, is 0.
 */
fn operand(value: Option<&Value>) -> i32 {
    match value {
        Some(Value::Number(n)) => {
            if let Some(i) = n.as_i64() {
                i32::try_from(i).unwrap_or_default()
            } else {
                n.as_f64().map(truncate).unwrap_or_default()
            }
        },
        Some(Value::String(s)) => s.trim().parse().unwrap_or_default(),
        _ => 0,
    }
}

// ---------------------------------------------------------------------------
// truncate:
// ---------------------------------------------------------------------------
fn truncate(f: f64) -> i32 {
    let t = f.trunc();
    if t >= i32::MIN as f64 && t <= i32::MAX as f64 {t as i32} else {0}
}

// ***************************************************************************
//                                  Tests
// ***************************************************************************
#[cfg(test)]
mod tests {
    use poem::http::StatusCode;
    use poem::test::TestClient;
    use serde_json::json;

    use super::operand;
    use crate::api::make_routes;

    fn client() -> TestClient<poem::Route> {
        TestClient::new(make_routes("Hello Server", "http://localhost:3000"))
    }

    #[tokio::test]
    async fn sum_endpoint_returns_result() {
        let resp = client().post("/hello/sum").body_json(&json!({"a": 2, "b": 5})).send().await;
        resp.assert_status_is_ok();
        resp.assert_json(json!({"result": 7})).await;
    }

    #[tokio::test]
    async fn sum_endpoint_defaults_missing_operands() {
        let cli = client();

        let resp = cli.post("/hello/sum").body_json(&json!({})).send().await;
        resp.assert_status_is_ok();
        resp.assert_json(json!({"result": 0})).await;

        let resp = cli.post("/hello/sum").body_json(&json!({"a": 2})).send().await;
        resp.assert_status_is_ok();
        resp.assert_json(json!({"result": 2})).await;

        let resp = cli.post("/hello/sum").body_json(&json!({"a": null, "b": -4, "c": 10})).send().await;
        resp.assert_status_is_ok();
        resp.assert_json(json!({"result": -4})).await;
    }

    #[tokio::test]
    async fn sum_endpoint_wraps_on_overflow() {
        let resp = client().post("/hello/sum")
            .body_json(&json!({"a": i32::MAX, "b": 1}))
            .send().await;
        resp.assert_status_is_ok();
        resp.assert_json(json!({"result": i32::MIN})).await;
    }

    #[test]
    fn operand_coerces_or_defaults() {
        assert_eq!(operand(None), 0);
        assert_eq!(operand(Some(&json!(null))), 0);
        assert_eq!(operand(Some(&json!(-12))), -12);
        assert_eq!(operand(Some(&json!(2.5))), 2);
        assert_eq!(operand(Some(&json!(-2.9))), -2);
        assert_eq!(operand(Some(&json!("5"))), 5);
        assert_eq!(operand(Some(&json!(" 7 "))), 7);
        assert_eq!(operand(Some(&json!("x"))), 0);
        assert_eq!(operand(Some(&json!(4294967296_i64))), 0);
        assert_eq!(operand(Some(&json!(1e20))), 0);
        assert_eq!(operand(Some(&json!(u64::MAX))), 0);
        assert_eq!(operand(Some(&json!(true))), 0);
        assert_eq!(operand(Some(&json!([1]))), 0);
        assert_eq!(operand(Some(&json!({"n": 1}))), 0);
    }

    #[tokio::test]
    async fn sum_endpoint_defaults_malformed_operands() {
        let cli = client();

        let resp = cli.post("/hello/sum").body_json(&json!({"a": "x", "b": 5})).send().await;
        resp.assert_status_is_ok();
        resp.assert_json(json!({"result": 5})).await;

        let resp = cli.post("/hello/sum").body_json(&json!({"a": "5", "b": 2})).send().await;
        resp.assert_status_is_ok();
        resp.assert_json(json!({"result": 7})).await;

        let resp = cli.post("/hello/sum").body_json(&json!({"a": 2.5, "b": 1})).send().await;
        resp.assert_status_is_ok();
        resp.assert_json(json!({"result": 3})).await;

        let resp = cli.post("/hello/sum").body_json(&json!({"a": 4294967296_i64, "b": 1})).send().await;
        resp.assert_status_is_ok();
        resp.assert_json(json!({"result": 1})).await;

        let resp = cli.post("/hello/sum").body_json(&json!({"a": [1, 2], "b": {"c": 3}})).send().await;
        resp.assert_status_is_ok();
        resp.assert_json(json!({"result": 0})).await;
    }

    #[tokio::test]
    async fn sum_endpoint_rejects_non_object_body() {
        let resp = client().post("/hello/sum").body_json(&json!([2, 5])).send().await;
        resp.assert_status(StatusCode::BAD_REQUEST);
        resp.json().await.value().object().get("result_code").assert_string("400");
    }

    #[tokio::test]
    async fn sum_endpoint_rejects_malformed_body() {
        let resp = client().post("/hello/sum")
            .content_type("application/json")
            .body("not json")
            .send().await;
        resp.assert_status(StatusCode::BAD_REQUEST);
        let json = resp.json().await;
        let obj = json.value().object();
        obj.get("result_code").assert_string("400");
        assert!(obj.get("result_msg").string().starts_with("ERROR: "));
    }
}
