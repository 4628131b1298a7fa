pub mod api;
pub mod config;
pub mod corpus;
pub mod dice;
pub mod error;
pub mod optimizer;
pub mod similarity;
pub mod wordlist;
// cmd and reports belong to the binary (main.rs).
