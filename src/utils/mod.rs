pub mod stats;
pub mod text;
pub mod time;
