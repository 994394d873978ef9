pub mod applications;
pub mod jobs;
pub mod notifications;
pub mod users;
