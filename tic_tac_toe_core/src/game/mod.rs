pub mod board;
pub mod error;
pub mod match_state;
pub mod message;
pub mod models;
pub mod policy;
