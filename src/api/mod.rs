#![forbid(unsafe_code)]

use poem::Route;
use poem_openapi::OpenApiService;

use crate::api::hello::greeting_get::GetGreetingApi;
use crate::api::hello::sum_compute::ComputeSumApi;

pub mod hello;

// From cargo.toml.
const HELLO_VERSION: &str = env!("CARGO_PKG_VERSION");

// ---------------------------------------------------------------------------
// make_routes:
// ---------------------------------------------------------------------------
/** Build the server's route table.  Called once at startup; the tests build
 * their own copy.
 */
pub fn make_routes(title: &str, server_url: &str) -> Route {
    let endpoints = (GetGreetingApi, ComputeSumApi);
    let api_service =
        OpenApiService::new(endpoints, title, HELLO_VERSION).server(server_url);

    Route::new().nest("/", api_service)
}
