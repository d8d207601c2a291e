//! Cropdeck dashboard library exports.

pub mod api_client;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod events;
pub mod forms;
pub mod keys;
pub mod logging;
pub mod nav;
pub mod notifications;
pub mod persistence;
pub mod query;
pub mod state;
pub mod theme;
pub mod views;
pub mod widgets;
