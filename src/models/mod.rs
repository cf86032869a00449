pub mod attendee;
pub mod dashboard;
pub mod employee;
pub mod meeting;
pub mod user;
