pub mod orders;
pub mod sessions;
