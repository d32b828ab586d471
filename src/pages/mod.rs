pub mod details;
pub mod graph;
pub mod home;
pub mod not_found;
pub mod results;
