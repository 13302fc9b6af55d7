//! pulse-webdriver
//!
//! Forum page source that drives a real browser through the W3C WebDriver
//! HTTP protocol. [`WebDriverSession`] implements `ForumPage`, so the
//! collector and the comments pipeline can run against a live page.
//!
//! Only the handful of commands the harvester needs are implemented:
//! session lifecycle, navigation, script execution, element lookup, element
//! text, and screenshots.
#![warn(missing_docs)]

mod error;
mod protocol;
mod session;

pub use protocol::ELEMENT_KEY;
pub use session::{WebDriverClient, WebDriverSession};
