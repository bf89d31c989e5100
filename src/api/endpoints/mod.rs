pub mod admin;
pub mod appointments;
pub mod auth;
pub mod booking;
pub mod directory;
pub mod home;
pub mod records;
