//! Rust client for the [Hyperwallet](https://www.hyperwallet.com) REST API
//!
//! Provides typed access to users, transfer methods (bank accounts,
//! prepaid cards, paper checks), payments, programs, accounts, transfer
//! method configurations, and webhook notifications.
//!
//! # Module Structure
//!
//! - [`config`] - Credentials and server selection
//! - [`client`] - The endpoint façade, one method per API operation
//! - [`http`] - HTTP transport (Basic auth, JSON bodies)
//! - [`resource`] - Dynamically-keyed resource wrappers
//! - [`pagination`] - Bounded collection fetching over paged listings
//! - [`error`] - Error taxonomy
//!
//! # Example
//!
//! ```ignore
//! use hyperwallet::{Client, CollectionSlice, Config};
//! use serde_json::json;
//!
//! async fn example() -> hyperwallet::Result<()> {
//!     let config = Config::new("restapiuser@0001", "password", "prg-12345")?;
//!     let client = Client::new(config)?;
//!
//!     let user = client
//!         .create_user(json!({
//!             "clientUserId": "worker-1",
//!             "profileType": "INDIVIDUAL",
//!         }))
//!         .await?;
//!     println!("created {:?}", user.token());
//!
//!     // Up to 120 users, fetched in pages of 100 behind the scenes.
//!     let users = client
//!         .get_users(CollectionSlice::new(0, Some(120)))
//!         .await?;
//!     println!("{} users", users.len());
//!     Ok(())
//! }
//! ```
//!
//! Every operation validates its required arguments before touching the
//! network and performs no retries: callers get either a fully-populated
//! result or an [`Error`].

pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod pagination;
pub mod resource;

pub use client::Client;
pub use config::{Config, DEFAULT_SERVER};
pub use error::{Error, Result};
pub use http::QueryParams;
pub use pagination::{get_collection, CollectionSlice, PAGE_SIZE};
pub use resource::{
    BankAccount, PaperCheck, Payment, PrepaidCard, Resource, User, Webhook,
};
