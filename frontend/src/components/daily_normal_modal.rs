use std::collections::BTreeSet;

use shared::daily_goal::format_litres;
use shared::{messages, DailyGoalDraft, DailyGoalField, Gender};
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlInputElement;
use yew::prelude::*;

use super::field_error::{visible_error, FieldError};
use super::modal::Modal;
use crate::hooks::use_auth::{use_api_client, use_auth, AuthAction};
use crate::hooks::use_notifications::use_notifications;
use crate::services::logging::Logger;

#[derive(Properties, PartialEq)]
pub struct DailyNormalModalProps {
    pub is_open: bool,
    pub on_close: Callback<()>,
}

fn on_text_input(
    draft: &UseStateHandle<DailyGoalDraft>,
    apply: fn(&mut DailyGoalDraft, String),
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
    touched: &UseStateHandle<BTreeSet<DailyGoalField>>,
    field: DailyGoalField,
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

#[function_component(DailyNormalModal)]
pub fn daily_normal_modal(props: &DailyNormalModalProps) -> Html {
    let auth = use_auth();
    let api_client = use_api_client();
    let notifier = use_notifications();

    let draft = use_state(|| DailyGoalDraft::from_profile(auth.user.as_ref()));
    let touched = use_state(BTreeSet::<DailyGoalField>::new);
    let submitted = use_state(|| false);
    let is_submitting = use_state(|| false);

    // Start from the cached profile every time the modal opens
    use_effect_with(props.is_open, {
        let draft = draft.clone();
        let touched = touched.clone();
        let submitted = submitted.clone();
        let is_submitting = is_submitting.clone();
        let user = auth.user.clone();
        let auth_dispatcher = auth.dispatcher();
        move |is_open| {
            if *is_open {
                draft.set(DailyGoalDraft::from_profile(user.as_ref()));
                touched.set(BTreeSet::new());
                submitted.set(false);
                is_submitting.set(false);
                auth_dispatcher.dispatch(AuthAction::ClearError);
            }
            || ()
        }
    });

    let on_gender_change = |gender: Gender| {
        let draft = draft.clone();
        Callback::from(move |_: Event| {
            draft.set(DailyGoalDraft {
                gender: Some(gender),
                ..(*draft).clone()
            });
        })
    };

    let on_submit = {
        let draft = draft.clone();
        let submitted = submitted.clone();
        let is_submitting = is_submitting.clone();
        let on_close = props.on_close.clone();

        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            submitted.set(true);

            let Ok(request) = draft.to_request() else {
                return;
            };

            is_submitting.set(true);

            let auth = auth.clone();
            let api_client = api_client.clone();
            let notifier = notifier.clone();
            let is_submitting = is_submitting.clone();
            let on_close = on_close.clone();

            spawn_local(async move {
                match api_client.update_daily_norm(&request).await {
                    Ok(response) => {
                        auth.dispatch(AuthAction::DailyNormUpdated(response.daily_water_requirement));
                        notifier.success(messages::GOAL_SAVED);
                        is_submitting.set(false);
                        on_close.emit(());
                    }
                    Err(e) => {
                        Logger::error_with_component("DailyNormalModal", &e.to_string());
                        auth.dispatch(AuthAction::RequestFailed(e.to_string()));
                        is_submitting.set(false);
                    }
                }
            });
        })
    };

    let errors = draft.validate();
    let error_for = |field: DailyGoalField| {
        visible_error(errors.get(field), touched.contains(&field), *submitted)
    };
    let suggestion = draft
        .suggestion()
        .map(|litres| format!("{} L", format_litres(litres)))
        .unwrap_or_else(|| "-- L".to_string());

    html! {
        <Modal is_open={props.is_open} title="My daily norma" on_close={props.on_close.clone()} class="daily-normal-modal">
            <div class="formula-box">
                <ul class="formula-list">
                    <li>{"For girl: "}<span class="formula">{"V=(M*0,03) + (T*0,4)"}</span></li>
                    <li>{"For man: "}<span class="formula">{"V=(M*0,04) + (T*0,6)"}</span></li>
                </ul>
                <p class="formula-note">
                    <span class="mark">{"* "}</span>
                    {"V is the volume of the water norm in liters per day, M is your body weight, \
                      T is the time of active sports, or another type of activity commensurate in \
                      terms of loads (in the absence of these, you must set 0)"}
                </p>
            </div>

            <form class="daily-normal-form" onsubmit={on_submit} novalidate=true>
                <h3 class="form-subtitle">{"Calculate your rate:"}</h3>

                <div class="gender-group" role="group">
                    {for [Gender::Girl, Gender::Man].into_iter().map(|gender| html! {
                        <label class="gender-label">
                            <input
                                type="radio"
                                name="gender"
                                value={gender.as_str()}
                                checked={draft.gender == Some(gender)}
                                onchange={on_gender_change(gender)}
                                disabled={*is_submitting}
                            />
                            {match gender {
                                Gender::Girl => "For girl",
                                Gender::Man => "For man",
                            }}
                        </label>
                    })}
                </div>

                <div class="form-group">
                    <label for="weight">{"Your weight in kilograms:"}</label>
                    <input
                        id="weight"
                        type="number"
                        placeholder="0"
                        value={draft.weight.clone()}
                        oninput={on_text_input(&draft, |d, v| d.weight = v)}
                        onblur={on_field_blur(&touched, DailyGoalField::Weight)}
                        disabled={*is_submitting}
                    />
                    <FieldError message={error_for(DailyGoalField::Weight)} />
                </div>

                <div class="form-group">
                    <label for="active-hours">
                        {"The time of active participation in sports or other activities with a high physical. load:"}
                    </label>
                    <input
                        id="active-hours"
                        type="number"
                        placeholder="0"
                        value={draft.active_hours.clone()}
                        oninput={on_text_input(&draft, |d, v| d.active_hours = v)}
                        onblur={on_field_blur(&touched, DailyGoalField::ActiveHours)}
                        disabled={*is_submitting}
                    />
                    <FieldError message={error_for(DailyGoalField::ActiveHours)} />
                </div>

                <div class="required-amount">
                    <span>{"The required amount of water in liters per day:"}</span>
                    <span class="required-amount-value">{suggestion}</span>
                </div>

                <h3 class="form-subtitle">{"Write down how much water you will drink:"}</h3>
                <div class="form-group">
                    <input
                        id="water-volume"
                        type="number"
                        step="0.1"
                        placeholder="0"
                        value={draft.water_volume.clone()}
                        oninput={on_text_input(&draft, |d, v| d.water_volume = v)}
                        onblur={on_field_blur(&touched, DailyGoalField::WaterVolume)}
                        disabled={*is_submitting}
                    />
                    <FieldError message={error_for(DailyGoalField::WaterVolume)} />
                </div>

                <button type="submit" class="btn btn-primary" disabled={*is_submitting}>
                    {if *is_submitting { "Saving..." } else { "Save" }}
                </button>
            </form>
        </Modal>
    }
}
