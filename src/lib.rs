//! Appsbar library exports for testing

pub mod core;
pub mod graphics;
pub mod sys;
pub mod tui;

#[cfg(test)]
pub mod test_support;
