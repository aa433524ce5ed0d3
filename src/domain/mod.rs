mod contact_submission;
mod outbound_notification;

pub use contact_submission::*;
pub use outbound_notification::*;
