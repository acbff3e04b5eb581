//! Chatops relay: chat front end for an automation service's action
//! aliases.
//!
//! The relay periodically fetches the alias listing from the automation
//! service, compiles each alias format into a recognizer, matches chat
//! commands against them and submits matches for execution. Execution
//! results come back through an HTTP webhook and are posted to chat.
//!
//! # Architecture
//!
//! The relay follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (HTTP, chat, memory)
//!
//! # Modules
//!
//! - [`alias`]: Alias compilation, registry snapshots, resolution and dispatch
//! - [`chat`]: Chat command handling and chat adapters
//! - [`notify`]: Result notification webhook
//! - [`stackstorm`]: HTTP adapter and authentication for the automation service
//! - [`config`]: Environment configuration

pub mod alias;
pub mod chat;
pub mod config;
pub mod notify;
pub mod stackstorm;
