pub mod forms;
pub mod gem_bid;
pub mod helpers;
