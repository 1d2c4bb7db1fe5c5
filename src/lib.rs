//! # AI Chef Library
//!
//! Generates recipes through a hosted function and lists the most recently
//! generated ones, exposed to AI assistants through the Model Context Protocol
//! (MCP).
//!
//! ## Client Module
//!
//! The [`client`] module holds the HTTP clients: recipe generation with error
//! classification, and the recent recipes reader.
//!
//! ## View and App Modules
//!
//! [`view`] models panel state and renders it; [`app`] ties configuration,
//! panel state and clients together.
//!
//! ## Server Module
//!
//! The [`server`] module exposes the app as MCP tools.
//!
//! ## Quick Start
//!
//! ```no_run
//! use ai_chef::{ChefApp, ChefMcpServer, client::ChefConfig};
//!
//! let app = ChefApp::new(ChefConfig::from_env());
//! let server = ChefMcpServer::new(app);
//! ```

pub mod app;
pub mod client;
pub mod server;
pub mod view;

pub use app::ChefApp;
pub use client::RecipeClient;
pub use server::ChefMcpServer;
