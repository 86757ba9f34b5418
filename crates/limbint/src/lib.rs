//! limbcalc library: configuration, evaluation, and error reporting for the
//! reverse-Polish calculator binary.

pub mod app;
pub mod config;
pub mod errors;
