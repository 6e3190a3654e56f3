use std::collections::BTreeSet;

use shared::{messages, Gender, SettingsDraft, SettingsField, SubmissionPlan};
use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlInputElement, MouseEvent};
use yew::prelude::*;

use super::field_error::{visible_error, FieldError};
use super::modal::Modal;
use crate::hooks::use_auth::{use_api_client, use_auth, AuthAction};
use crate::hooks::use_avatar_upload::use_avatar_upload;
use crate::hooks::use_notifications::use_notifications;
use crate::services::logging::Logger;

const DEFAULT_AVATAR: &str = "/images/default_user_avatar.svg";

#[derive(Properties, PartialEq)]
pub struct SettingsModalProps {
    pub is_open: bool,
    pub on_close: Callback<()>,
}

#[derive(Properties, PartialEq)]
struct PasswordInputProps {
    id: AttrValue,
    label: AttrValue,
    value: String,
    visible: bool,
    disabled: bool,
    error: Option<&'static str>,
    oninput: Callback<InputEvent>,
    onblur: Callback<FocusEvent>,
    on_toggle: Callback<MouseEvent>,
}

#[function_component(PasswordInput)]
fn password_input(props: &PasswordInputProps) -> Html {
    html! {
        <div class="form-group">
            <label for={props.id.clone()}>{props.label.clone()}</label>
            <div class={classes!("password-field", props.error.map(|_| "has-error"))}>
                <input
                    id={props.id.clone()}
                    type={if props.visible { "text" } else { "password" }}
                    placeholder="Password"
                    autocomplete="on"
                    value={props.value.clone()}
                    oninput={props.oninput.clone()}
                    onblur={props.onblur.clone()}
                    disabled={props.disabled}
                />
                <button type="button" class="password-toggle" onclick={props.on_toggle.clone()}>
                    {if props.visible { "🙈" } else { "👁" }}
                </button>
            </div>
            <FieldError message={props.error} />
        </div>
    }
}

fn on_text_input(
    draft: &UseStateHandle<SettingsDraft>,
    apply: fn(&mut SettingsDraft, String),
) -> Callback<InputEvent> {
    let draft = draft.clone();
    Callback::from(move |e: InputEvent| {
        let input: HtmlInputElement = e.target_unchecked_into();
        let mut next = (*draft).clone();
        apply(&mut next, input.value());
        draft.set(next);
    })
}

fn on_field_blur(
    touched: &UseStateHandle<BTreeSet<SettingsField>>,
    field: SettingsField,
) -> Callback<FocusEvent> {
    let touched = touched.clone();
    Callback::from(move |_: FocusEvent| {
        if !touched.contains(&field) {
            let mut next = (*touched).clone();
            next.insert(field);
            touched.set(next);
        }
    })
}

#[function_component(SettingsModal)]
pub fn settings_modal(props: &SettingsModalProps) -> Html {
    let auth = use_auth();
    let api_client = use_api_client();
    let notifier = use_notifications();
    let avatar = use_avatar_upload();

    let draft = use_state(|| SettingsDraft::from_profile(auth.user.as_ref()));
    let touched = use_state(BTreeSet::<SettingsField>::new);
    let submitted = use_state(|| false);
    let is_submitting = use_state(|| false);
    let show_password = use_state(|| false);

    // Reset state when modal opens
    use_effect_with(props.is_open, {
        let draft = draft.clone();
        let touched = touched.clone();
        let submitted = submitted.clone();
        let is_submitting = is_submitting.clone();
        let show_password = show_password.clone();
        let reset_avatar = avatar.reset.clone();
        let user = auth.user.clone();
        let auth_dispatcher = auth.dispatcher();
        move |is_open| {
            if *is_open {
                draft.set(SettingsDraft::from_profile(user.as_ref()));
                touched.set(BTreeSet::new());
                submitted.set(false);
                is_submitting.set(false);
                show_password.set(false);
                reset_avatar.emit(());
                auth_dispatcher.dispatch(AuthAction::ClearError);
            }
            || ()
        }
    });

    let on_toggle_password = {
        let show_password = show_password.clone();
        Callback::from(move |_: MouseEvent| show_password.set(!*show_password))
    };

    let on_gender_change = |gender: Gender| {
        let draft = draft.clone();
        Callback::from(move |_: Event| {
            draft.set(SettingsDraft {
                gender: Some(gender),
                ..(*draft).clone()
            });
        })
    };

    let on_submit = {
        let auth = auth.clone();
        let draft = draft.clone();
        let touched = touched.clone();
        let submitted = submitted.clone();
        let is_submitting = is_submitting.clone();
        let on_close = props.on_close.clone();
        let avatar_changed = avatar.changed;

        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            submitted.set(true);

            let profile = auth.user.clone().unwrap_or_default();
            let request = match draft.plan(&profile, avatar_changed) {
                Err(_) => return,
                Ok(SubmissionPlan::NoChanges) => {
                    Logger::debug_with_component("SettingsModal", "submit without changes");
                    notifier.warning(messages::NO_CHANGES);
                    return;
                }
                Ok(SubmissionPlan::AvatarOnly) => {
                    notifier.success(messages::PROFILE_UPDATED);
                    on_close.emit(());
                    return;
                }
                Ok(SubmissionPlan::Update(request)) => request,
            };

            is_submitting.set(true);

            let auth = auth.clone();
            let api_client = api_client.clone();
            let notifier = notifier.clone();
            let draft = draft.clone();
            let touched = touched.clone();
            let submitted = submitted.clone();
            let is_submitting = is_submitting.clone();
            let on_close = on_close.clone();

            spawn_local(async move {
                match api_client.update_profile(&request).await {
                    Ok(user) => {
                        draft.set(SettingsDraft::from_profile(Some(&user)));
                        touched.set(BTreeSet::new());
                        submitted.set(false);
                        auth.dispatch(AuthAction::UserUpdated(user));
                        notifier.success(messages::PROFILE_UPDATED);
                        is_submitting.set(false);
                        on_close.emit(());
                    }
                    Err(e) => {
                        Logger::error_with_component("SettingsModal", &e.to_string());
                        auth.dispatch(AuthAction::RequestFailed(e.to_string()));
                        is_submitting.set(false);
                    }
                }
            });
        })
    };

    let errors = draft.validate();
    let error_for = |field: SettingsField| {
        visible_error(errors.get(field), touched.contains(&field), *submitted)
    };
    let user = auth.user.clone().unwrap_or_default();
    let avatar_src = auth
        .avatar_url
        .clone()
        .unwrap_or_else(|| DEFAULT_AVATAR.to_string());
    let busy = *is_submitting || avatar.loading;

    html! {
        <Modal is_open={props.is_open} title="Setting" on_close={props.on_close.clone()} class="settings-modal">
            <h3 class="section-title">{"Your photo"}</h3>
            <div class="avatar-row">
                {if avatar.loading {
                    html! { <div class="avatar-loader" aria-busy="true"></div> }
                } else {
                    html! { <img class="avatar" src={avatar_src} alt="user_photo" /> }
                }}
                <label class="avatar-upload">
                    <input
                        type="file"
                        id="file-input"
                        accept="image/*"
                        onchange={avatar.on_file_change.clone()}
                        disabled={busy}
                    />
                    {"Upload a photo"}
                </label>
            </div>

            <form class="settings-form" onsubmit={on_submit} novalidate=true>
                <div class="settings-column">
                    <h3 class="section-title">{"Your gender identity"}</h3>
                    <div class="gender-group" role="group">
                        {for [Gender::Girl, Gender::Man].into_iter().map(|gender| html! {
                            <label class="gender-label">
                                <input
                                    type="radio"
                                    name="gender"
                                    value={gender.as_str()}
                                    checked={draft.gender == Some(gender)}
                                    onchange={on_gender_change(gender)}
                                    disabled={busy}
                                />
                                {match gender {
                                    Gender::Girl => "Girl",
                                    Gender::Man => "Man",
                                }}
                            </label>
                        })}
                    </div>

                    <div class="form-group">
                        <label for="name">{"Your name"}</label>
                        <input
                            id="name"
                            type="text"
                            placeholder={if user.name.is_empty() { "Enter your name".to_string() } else { user.name.clone() }}
                            value={draft.name.clone()}
                            oninput={on_text_input(&draft, |d, v| d.name = v)}
                            onblur={on_field_blur(&touched, SettingsField::Name)}
                            disabled={busy}
                        />
                        <FieldError message={error_for(SettingsField::Name)} />
                    </div>

                    <div class="form-group">
                        <label for="email">{"Your email"}</label>
                        <input
                            id="email"
                            type="email"
                            autocomplete="on"
                            placeholder={if user.email.is_empty() { "Email".to_string() } else { user.email.clone() }}
                            value={draft.email.clone()}
                            oninput={on_text_input(&draft, |d, v| d.email = v)}
                            onblur={on_field_blur(&touched, SettingsField::Email)}
                            disabled={busy}
                        />
                        <FieldError message={error_for(SettingsField::Email)} />
                    </div>
                </div>

                <div class="settings-column">
                    <h3 class="section-title">{"Password"}</h3>
                    <PasswordInput
                        id="password-outdated"
                        label="Outdated password:"
                        value={draft.password_outdated.clone()}
                        visible={*show_password}
                        disabled={busy}
                        error={error_for(SettingsField::PasswordOutdated)}
                        oninput={on_text_input(&draft, |d, v| d.password_outdated = v)}
                        onblur={on_field_blur(&touched, SettingsField::PasswordOutdated)}
                        on_toggle={on_toggle_password.clone()}
                    />
                    <PasswordInput
                        id="password"
                        label="New password:"
                        value={draft.password.clone()}
                        visible={*show_password}
                        disabled={busy}
                        error={error_for(SettingsField::Password)}
                        oninput={on_text_input(&draft, |d, v| d.password = v)}
                        onblur={on_field_blur(&touched, SettingsField::Password)}
                        on_toggle={on_toggle_password.clone()}
                    />
                    <PasswordInput
                        id="password-repeat"
                        label="Repeat new password:"
                        value={draft.password_repeat.clone()}
                        visible={*show_password}
                        disabled={busy}
                        error={error_for(SettingsField::PasswordRepeat)}
                        oninput={on_text_input(&draft, |d, v| d.password_repeat = v)}
                        onblur={on_field_blur(&touched, SettingsField::PasswordRepeat)}
                        on_toggle={on_toggle_password}
                    />
                </div>

                <button type="submit" class="btn btn-primary" disabled={busy}>
                    {if *is_submitting { "Saving..." } else { "Save" }}
                </button>
            </form>
        </Modal>
    }
}
