pub mod chat_relay;
pub mod error;
pub mod notification_service;
pub mod proposal_service;
