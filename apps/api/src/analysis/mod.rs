pub mod handlers;
pub mod keywords;
pub mod matcher;
pub mod records;
pub mod repo;
pub mod tokenizer;
