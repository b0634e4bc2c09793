pub mod attempt_service;
pub mod batch_service;
pub mod evaluation_service;
pub mod scoring_service;
