pub mod slug;
pub mod validate;
