//! Ilm library exports for testing

pub mod catalog;
pub mod core;
pub mod directory;
pub mod feedback;

#[cfg(test)]
pub mod test_support;
