pub mod scoring_dto;
