pub mod background;
pub mod bounds;
pub mod config;
pub mod realign;
pub mod sheet;
