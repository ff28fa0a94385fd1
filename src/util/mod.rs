pub mod message;
pub mod options;
pub mod parse;
pub mod time;
