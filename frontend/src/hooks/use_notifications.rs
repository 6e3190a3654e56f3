use std::rc::Rc;

use yew::prelude::*;

use super::use_auth::{use_auth, AuthAction};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Warning,
    Error,
}

impl ToastKind {
    pub fn css_class(&self) -> &'static str {
        match self {
            ToastKind::Success => "toast success",
            ToastKind::Warning => "toast warning",
            ToastKind::Error => "toast error",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub id: u32,
    pub kind: ToastKind,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ToastState {
    next_id: u32,
    pub toasts: Vec<Toast>,
}

pub enum ToastAction {
    Push(ToastKind, String),
    Dismiss(u32),
}

impl Reducible for ToastState {
    type Action = ToastAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = (*self).clone();
        match action {
            ToastAction::Push(kind, message) => {
                next.toasts.push(Toast {
                    id: next.next_id,
                    kind,
                    message,
                });
                next.next_id = next.next_id.wrapping_add(1);
            }
            ToastAction::Dismiss(id) => next.toasts.retain(|toast| toast.id != id),
        }
        Rc::new(next)
    }
}

pub type ToastContext = UseReducerHandle<ToastState>;

/// Pushes toasts onto the shared toast list
#[derive(Clone, PartialEq)]
pub struct Notifier {
    dispatcher: UseReducerDispatcher<ToastState>,
}

impl Notifier {
    pub fn new(dispatcher: UseReducerDispatcher<ToastState>) -> Self {
        Self { dispatcher }
    }

    pub fn success(&self, message: impl Into<String>) {
        self.push(ToastKind::Success, message.into());
    }

    pub fn warning(&self, message: impl Into<String>) {
        self.push(ToastKind::Warning, message.into());
    }

    pub fn error(&self, message: impl Into<String>) {
        self.push(ToastKind::Error, message.into());
    }

    fn push(&self, kind: ToastKind, message: String) {
        self.dispatcher.dispatch(ToastAction::Push(kind, message));
    }
}

#[hook]
pub fn use_notifications() -> Notifier {
    let toasts = use_context::<ToastContext>().expect("use_notifications called outside of ToastProvider");
    Notifier::new(toasts.dispatcher())
}

/// Shows the store's last request failure as an error toast, then clears it
#[hook]
pub fn use_request_error_toast() {
    let auth = use_auth();
    let notifier = use_notifications();

    use_effect_with(auth.error.clone(), move |error| {
        if let Some(message) = error {
            notifier.error(message.clone());
            auth.dispatch(AuthAction::ClearError);
        }
        || ()
    });
}
