pub mod access;
pub mod compose;
pub mod error;
pub mod generation;
pub mod identity;
pub mod message;
pub mod message_list;
pub mod pager;
pub mod store;
pub mod targeting;
