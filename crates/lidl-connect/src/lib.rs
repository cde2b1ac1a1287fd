// lidl-connect: Async Rust client for the Lidl Connect prepaid account API

pub mod account;
pub mod auth;
pub mod client;
pub mod consumption;
pub mod error;
pub mod graphql;
pub mod models;
pub mod tariffs;
pub mod transport;

pub use auth::{CachedToken, Credentials, TokenType};
pub use client::{ConnectClient, DEFAULT_HOST};
pub use error::Error;
pub use models::{
    BookedTariff, BookingResult, ConfirmationResult, Consumption, Tariff, TariffConsumptions,
    TariffDuration,
};
pub use transport::TransportConfig;
