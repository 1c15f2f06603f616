pub mod dto;
pub mod http_gateway;
pub mod memory;
