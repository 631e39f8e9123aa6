pub mod auth_service;
pub mod bank_service;
pub mod grading_service;
pub mod question_service;
pub mod submission_service;
