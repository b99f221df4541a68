pub mod client_dto;
pub mod sale_dto;
pub mod vehicle_dto;
