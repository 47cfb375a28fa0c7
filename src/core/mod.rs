pub mod errors;
pub mod fields;
pub mod models;
pub mod parser;
pub mod reader;
pub mod sections;
pub mod text;
