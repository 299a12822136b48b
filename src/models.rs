pub mod account;
pub mod pacing;
pub mod portfolio;
pub mod spend;
