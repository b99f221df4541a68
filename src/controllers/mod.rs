pub mod client_controller;
pub mod sale_controller;
pub mod vehicle_controller;
