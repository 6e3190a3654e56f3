use shared::messages;
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlInputElement;
use yew::prelude::*;

use super::use_auth::{use_api_client, use_auth, AuthAction};
use super::use_notifications::use_notifications;
use crate::services::logging::Logger;

pub struct UseAvatarUploadResult {
    /// An upload is in flight
    pub loading: bool,
    /// At least one upload succeeded while the form was open
    pub changed: bool,
    pub on_file_change: Callback<Event>,
    /// Forget earlier uploads when the form is reopened
    pub reset: Callback<()>,
}

pub fn is_image(mime: &str) -> bool {
    mime.starts_with("image/")
}

/// Uploads the selected avatar as soon as a file is picked
#[hook]
pub fn use_avatar_upload() -> UseAvatarUploadResult {
    let auth = use_auth();
    let api_client = use_api_client();
    let notifier = use_notifications();
    let loading = use_state(|| false);
    let changed = use_state(|| false);

    let on_file_change = {
        let loading = loading.clone();
        let changed = changed.clone();

        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            let Some(file) = input.files().and_then(|files| files.get(0)) else {
                return;
            };

            if !is_image(&file.type_()) {
                input.set_value("");
                notifier.error(messages::NOT_AN_IMAGE);
                return;
            }

            loading.set(true);

            let auth = auth.clone();
            let api_client = api_client.clone();
            let loading = loading.clone();
            let changed = changed.clone();

            spawn_local(async move {
                match api_client.update_avatar(&file).await {
                    Ok(response) => {
                        Logger::info_with_component("AvatarUpload", "avatar updated");
                        auth.dispatch(AuthAction::AvatarUpdated(response.avatar_url));
                        changed.set(true);
                    }
                    Err(e) => {
                        Logger::error_with_component("AvatarUpload", &e.to_string());
                        auth.dispatch(AuthAction::RequestFailed(e.to_string()));
                    }
                }
                loading.set(false);
            });
        })
    };

    let reset = {
        let changed = changed.clone();
        Callback::from(move |_| changed.set(false))
    };

    UseAvatarUploadResult {
        loading: *loading,
        changed: *changed,
        on_file_change,
        reset,
    }
}
