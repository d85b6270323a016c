pub mod chatdb;
pub mod companydb;
pub mod db;
pub mod listingdb;
pub mod notificationdb;
pub mod proposaldb;
