#![forbid(unsafe_code)]

// Stateless core computations used by the HTTP endpoints.
pub mod arithmetic;
pub mod greeting;
