pub mod event;
pub mod notification;
pub mod session;

pub use event::{EventSnapshot, ReturnSnapshot};
pub use notification::{NotificationPayload, NotificationRecord};
pub use session::SessionUser;
