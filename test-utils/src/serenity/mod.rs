//! Test factories for creating Serenity API objects.
//!
//! These factories create valid Serenity structs by deserializing JSON, simulating what
//! Discord's gateway would deliver. They let permission checks and role filters be tested
//! without a live connection.
//!
//! # Usage
//!
//! ```rust,ignore
//! use test_utils::serenity::{create_test_member, create_test_role};
//!
//! let member = create_test_member(1, 2, &[3, 4], false);
//! let role = create_test_role(3, "Reviewers", 1);
//! ```

pub mod member;
pub mod role;

pub use member::create_test_member;
pub use role::create_test_role;
