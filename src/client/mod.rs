//! # Recipe Project HTTP Client
//!
//! This module talks to the hosted project: the recipe generation function and
//! the `recipes` table.
//!
//! ## Modules
//!
//! - [`auth`] - Publishable key handling
//! - [`client`] - Generation function client
//! - [`config`] - Runtime configuration
//! - [`error`] - Error taxonomy and failure classification
//! - [`store`] - Recent recipes reader
//! - [`types`] - Request, response and row types
//!
//! ## Quick Start
//!
//! ```no_run
//! use ai_chef::client::{ChefConfig, GenerationRequest, RecipeClient};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let config = ChefConfig::new("https://abc.supabase.co", "sb_publishable_key")?;
//! let client = RecipeClient::new(&config)?;
//!
//! if let Some(request) = GenerationRequest::new("kimchi fried rice") {
//!     let recipe = client.generate_recipe(&request).await?;
//!     println!("{}\n{}", recipe.title, recipe.recipe);
//! }
//! # Ok(())
//! # }
//! ```

pub mod auth;
#[allow(clippy::module_inception)]
pub mod client;
pub mod config;
pub mod error;
pub mod store;
pub mod types;

pub use client::RecipeClient;
pub use config::ChefConfig;
pub use error::ChefError;
pub use store::{RecentReader, RecipeStore, SupabaseStore};
pub use types::*;
