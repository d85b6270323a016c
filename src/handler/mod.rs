pub mod auth;
pub mod chat;
pub mod listings;
pub mod notifications;
pub mod proposals;
