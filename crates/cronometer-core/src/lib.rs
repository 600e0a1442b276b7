#![doc = include_str!("../README.md")]

mod auth;
pub mod client;
mod error;
pub mod gwt;

pub use client::{Client, ClientSettings, SessionIdentity};
pub use error::AuthError;
