//! Companion machine that executes generated programs.

pub mod vm;

#[cfg(test)]
mod tests;
