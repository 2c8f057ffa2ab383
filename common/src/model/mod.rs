pub mod bid;
pub mod document;
pub mod field;
pub mod progress;
pub mod stage;
pub mod value;
