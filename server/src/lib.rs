//! `Pulse` Server
//!
//! Role and permission backend for the creator and agency analytics dashboard.
//! Decides which widgets, pages and actions each signed-in user may see.

pub mod api;
pub mod auth;
pub mod config;
pub mod permissions;
