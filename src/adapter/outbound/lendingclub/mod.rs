//! LendingClub marketplace integration.
//!
//! Submits order packs to the investor REST API and maps its order
//! acknowledgment onto the domain [`Acknowledgment`](crate::domain::Acknowledgment).

pub mod client;
pub mod dto;
pub mod settings;

pub use client::LendingClubClient;
pub use settings::MarketplaceConfig;
