//! `cardtracker` - Track credit-card welcome bonuses
//!
//! This library provides the record store behind the `cardtrack` tool:
//! loading and saving a JSON data file across its historical layouts,
//! validating new entries, and computing point totals and the 5/24 count.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod actions;
pub mod cli;
pub mod config;
pub mod dates;
pub mod error;
pub mod logging;
pub mod menu;
pub mod record;
pub mod render;
pub mod rules;
pub mod storage;
pub mod validation;

pub use config::Config;
pub use error::{Error, Field, Result};
pub use logging::init_logging;
pub use menu::{Menu, MenuExit};
pub use record::{CardRecord, Document, WishlistRecord};
pub use rules::{
    compute_5_24, total_points, total_wishlist_points, FiveTwentyFour, FiveTwentyFourRule,
    Summary,
};
pub use storage::{load, save, RecordStore};
pub use validation::{validate_card, validate_wishlist};
