pub use gatherly_core::gateways::geocode::GeoCodingGateway;

pub mod google;
