pub mod chatmodel;
pub mod companymodel;
pub mod listingmodel;
pub mod notificationmodel;
pub mod proposalmodel;
