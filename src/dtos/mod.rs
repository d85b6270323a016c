pub mod chatdtos;
pub mod companydtos;
pub mod listingdtos;
pub mod notificationdtos;
pub mod proposaldtos;

pub use chatdtos::*;
pub use companydtos::*;
pub use listingdtos::*;
pub use notificationdtos::*;
pub use proposaldtos::*;
