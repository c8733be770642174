//! Infrastructure layer: concrete repository, broadcaster and wire DTOs.

pub mod broadcaster;
pub mod dto;
pub mod repository;
