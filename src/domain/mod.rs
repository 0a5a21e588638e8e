mod field_errors;
mod new_subscriber;
mod submission_result;
pub mod subscriber_email;
pub mod subscriber_name;

pub use field_errors::{Field, FieldErrors};
pub use new_subscriber::NewSubscriber;
pub use submission_result::{SubmissionResult, STORAGE_FAILED, VALIDATION_FAILED};
pub use subscriber_email::SubscriberEmail;
pub use subscriber_name::SubscriberName;
