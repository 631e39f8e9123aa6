pub mod auth_dto;
pub mod bank_dto;
pub mod question_dto;
pub mod quiz_dto;
