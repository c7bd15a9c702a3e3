pub mod lifetime;
pub mod reminder;
