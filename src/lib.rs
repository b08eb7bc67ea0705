//! aPOS terminal UI test harness
//!
//! This library drives an Android payment terminal application through a
//! WebDriver-compatible automation server: locating elements with stale
//! retry, initializing configuration profiles over adb, and running
//! localized sale scenarios with tip and cashback.

pub mod access;
pub mod cli;
pub mod commands;
pub mod common;
pub mod device;
pub mod driver;
pub mod fixtures;
pub mod flows;
pub mod profile;
pub mod report;
pub mod runner;
pub mod scenarios;

// Re-export commonly used types for tests
pub use common::{Error, Result};
pub use driver::{ElementRef, Locator, Strategy, UiDriver};
