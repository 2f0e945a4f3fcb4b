//! Utility functions shared by the loader and the terminal page.
//!
//! - **Text**: Unicode-aware width, truncation, padding, wrapping and
//!   control-character stripping for API-supplied headlines
//! - **URLs**: validation of article links before opening them in a browser
//! - **Tasks**: panic capture for background futures
//!
//! # Examples
//!
//! ```
//! use brief::util::{display_width, truncate_to_width, validate_url_for_open};
//!
//! assert_eq!(display_width("Brief"), 5);
//! assert_eq!(truncate_to_width("Breaking news today", 11), "Breaking...");
//! assert!(validate_url_for_open("https://example.com/story").is_ok());
//! ```

mod task;
mod text;
mod url_validator;

pub use task::catch_task_panic;
pub use text::{display_width, pad_to_width, strip_control_chars, truncate_to_width, wrap_to_width};
pub use url_validator::{validate_url_for_open, UrlValidationError};
