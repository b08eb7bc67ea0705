//! Automation server session and wire plumbing
//!
//! The automation server (a UiAutomator2 server speaking the WebDriver
//! wire protocol) is an external collaborator. This module is a thin RPC
//! adapter: session lifecycle, element lookup and interaction, app
//! lifecycle and screenshots. Behavior under test lives above it.

pub mod client;
pub mod locator;
pub mod mock;
pub mod wire;

pub use client::{ElementRef, HttpDriver, UiDriver};
pub use locator::{Locator, Strategy};
