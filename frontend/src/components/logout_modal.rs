use wasm_bindgen_futures::spawn_local;
use web_sys::MouseEvent;
use yew::prelude::*;

use super::modal::Modal;
use crate::hooks::use_auth::{use_api_client, use_auth, AuthAction};
use crate::services::config::AppConfig;
use crate::services::logging::Logger;
use crate::services::session;

/// Where the app lands after the session ends
const LANDING_PATH: &str = "/";

#[derive(Properties, PartialEq)]
pub struct LogoutModalProps {
    pub is_open: bool,
    pub on_close: Callback<()>,
}

/// Drops the persisted session now; the page unloads before the store effect would run
fn forget_session() {
    session::clear(AppConfig::from_env().session_key);
}

fn navigate_to_landing() {
    if let Err(e) = gloo::utils::window().location().set_href(LANDING_PATH) {
        Logger::error_with_component("LogoutModal", &format!("navigation failed: {:?}", e));
    }
}

#[function_component(LogoutModal)]
pub fn logout_modal(props: &LogoutModalProps) -> Html {
    let auth = use_auth();
    let api_client = use_api_client();
    let is_submitting = use_state(|| false);

    let on_confirm = {
        let is_submitting = is_submitting.clone();
        let on_close = props.on_close.clone();

        Callback::from(move |_: MouseEvent| {
            is_submitting.set(true);

            let auth = auth.clone();
            let api_client = api_client.clone();
            let is_submitting = is_submitting.clone();
            let on_close = on_close.clone();

            spawn_local(async move {
                match api_client.logout().await {
                    Ok(()) => {
                        Logger::info_with_component("LogoutModal", "session closed");
                        auth.dispatch(AuthAction::ClearUserData);
                        is_submitting.set(false);
                        on_close.emit(());
                        forget_session();
                        navigate_to_landing();
                    }
                    Err(e) => {
                        Logger::error_with_component("LogoutModal", &format!("Log out error: {}", e));
                        auth.dispatch(AuthAction::RequestFailed(e.to_string()));
                        is_submitting.set(false);
                    }
                }
            });
        })
    };

    let on_cancel = {
        let on_close = props.on_close.clone();
        Callback::from(move |_: MouseEvent| on_close.emit(()))
    };

    html! {
        <Modal is_open={props.is_open} title="Log out" on_close={props.on_close.clone()} class="logout-modal">
            <p class="logout-question">{"Do you really want to leave?"}</p>
            <div class="logout-buttons">
                <button type="button" class="btn btn-danger" onclick={on_confirm} disabled={*is_submitting}>
                    {if *is_submitting { "Logging out..." } else { "Log out" }}
                </button>
                <button type="button" class="btn btn-secondary" onclick={on_cancel} disabled={*is_submitting}>
                    {"Cancel"}
                </button>
            </div>
        </Modal>
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    use super::*;
    use crate::services::session::Session;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_forget_session_clears_storage() {
        let key = AppConfig::from_env().session_key;
        let stored = Session {
            token: Some("token-1".to_string()),
            user: None,
        };
        session::save(key, &stored).unwrap();
        assert_eq!(session::load(key), Some(stored));

        forget_session();
        assert_eq!(session::load(key), None);
    }
}
