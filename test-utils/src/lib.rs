//! Sagumo Test Utils
//!
//! Shared testing utilities for the bot. The crate offers a builder for test contexts backed
//! by in-memory SQLite databases, factories that insert rows with sensible defaults, and
//! factories for serenity objects deserialized from JSON.
//!
//! # Usage
//!
//! ```rust,ignore
//! use test_utils::builder::TestBuilder;
//! use entity::prelude::ReactionAggregation;
//!
//! #[tokio::test]
//! async fn test_aggregation_operations() -> Result<(), TestError> {
//!     let test = TestBuilder::new()
//!         .with_table(ReactionAggregation)
//!         .build()
//!         .await?;
//!
//!     let db = test.db.as_ref().unwrap();
//!     // Perform database operations...
//!
//!     Ok(())
//! }
//! ```

pub mod builder;
pub mod context;
pub mod error;
pub mod factory;
pub mod serenity;
