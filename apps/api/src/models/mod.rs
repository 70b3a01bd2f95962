pub mod candidate;
pub mod transcript;
