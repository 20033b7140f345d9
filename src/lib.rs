//! CorpGuide chat client library exports

pub mod core;
pub mod render;
pub mod transport;
pub mod tui;

#[cfg(test)]
pub mod test_support;
