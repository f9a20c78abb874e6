//! scanboard - client for a web vulnerability scan service
//!
//! This library provides the session and interaction controllers behind the
//! scanboard CLI: scan lifecycle with simulated progress, result
//! normalization, the assistant conversation, report export and the pointer
//! driven panel resizing used by graphical front-ends.

pub mod chat;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod model;
pub mod normalize;
pub mod progress;
pub mod render;
pub mod report;
pub mod resize;
pub mod service;
pub mod session;
pub mod validate;
