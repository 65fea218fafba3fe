pub mod guest;
pub mod sender;
