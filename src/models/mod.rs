pub mod question;
pub mod quiz_bank;
pub mod submission;
pub mod user;
