pub mod greeting_get;
pub mod sum_compute;
