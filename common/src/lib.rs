#![forbid(unsafe_code)]

pub mod config;
pub mod http;
pub mod logging;
pub mod signal;

#[cfg(test)]
mod tests;
