use gloo::timers::callback::Timeout;
use yew::prelude::*;

use crate::hooks::use_notifications::{Toast, ToastAction, ToastContext, ToastState};
use crate::services::config::AppConfig;

#[derive(Properties, PartialEq)]
pub struct ToastProviderProps {
    #[prop_or_default]
    pub children: Html,
}

/// Owns the toast list and renders it above the page
#[function_component(ToastProvider)]
pub fn toast_provider(props: &ToastProviderProps) -> Html {
    let toasts = use_reducer(ToastState::default);
    let timeout_ms = AppConfig::from_env().toast_timeout_ms;

    html! {
        <ContextProvider<ToastContext> context={toasts.clone()}>
            {props.children.clone()}
            <div class="toast-container">
                {for toasts.toasts.iter().map(|toast| html! {
                    <ToastItem
                        key={toast.id}
                        toast={toast.clone()}
                        timeout_ms={timeout_ms}
                        on_dismiss={
                            let dispatcher = toasts.dispatcher();
                            Callback::from(move |id| dispatcher.dispatch(ToastAction::Dismiss(id)))
                        }
                    />
                })}
            </div>
        </ContextProvider<ToastContext>>
    }
}

#[derive(Properties, PartialEq)]
struct ToastItemProps {
    toast: Toast,
    timeout_ms: u32,
    on_dismiss: Callback<u32>,
}

#[function_component(ToastItem)]
fn toast_item(props: &ToastItemProps) -> Html {
    // Dropping the timeout on unmount cancels it
    use_effect_with(props.toast.id, {
        let on_dismiss = props.on_dismiss.clone();
        let timeout_ms = props.timeout_ms;
        move |id| {
            let id = *id;
            let timeout = Timeout::new(timeout_ms, move || on_dismiss.emit(id));
            move || drop(timeout)
        }
    });

    let on_click = {
        let on_dismiss = props.on_dismiss.clone();
        let id = props.toast.id;
        Callback::from(move |_: MouseEvent| on_dismiss.emit(id))
    };

    html! {
        <div class={props.toast.kind.css_class()} role="status" onclick={on_click}>
            {&props.toast.message}
        </div>
    }
}
