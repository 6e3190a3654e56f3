pub mod use_auth;
pub mod use_avatar_upload;
pub mod use_notifications;
