pub use gatherly_core::gateways::email::EmailGateway;

pub mod mailgun;
pub mod send_to_json_file;
