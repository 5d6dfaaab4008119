pub mod app;
pub mod coming_soon;
pub mod create_message;
pub mod gateway_api;
pub mod login;
pub mod messages_view;
pub mod prompt;
pub mod register;
pub mod session_state;
pub mod store_picker;
