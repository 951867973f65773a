pub mod parse;
pub mod seconds;
