pub mod daily_normal_modal;
pub mod field_error;
pub mod header;
pub mod logout_modal;
pub mod modal;
pub mod settings_modal;
pub mod toaster;
