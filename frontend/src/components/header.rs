use shared::daily_goal::format_litres;
use web_sys::MouseEvent;
use yew::prelude::*;

use super::daily_normal_modal::DailyNormalModal;
use super::logout_modal::LogoutModal;
use super::settings_modal::SettingsModal;
use crate::hooks::use_auth::use_auth;
use crate::hooks::use_notifications::use_request_error_toast;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OpenModal {
    DailyNorm,
    Settings,
    Logout,
}

/// Name shown in the header: first word of the name, else the email's local part
fn display_name(name: &str, email: &str) -> String {
    if let Some(first) = name.split_whitespace().next() {
        return first.to_string();
    }
    email.split('@').next().unwrap_or_default().to_string()
}

#[function_component(Header)]
pub fn header() -> Html {
    let auth = use_auth();
    use_request_error_toast();
    let menu_open = use_state(|| false);
    let open_modal = use_state(|| Option::<OpenModal>::None);

    let toggle_menu = {
        let menu_open = menu_open.clone();
        Callback::from(move |e: MouseEvent| {
            e.stop_propagation();
            menu_open.set(!*menu_open);
        })
    };

    let open = |modal: OpenModal| {
        let menu_open = menu_open.clone();
        let open_modal = open_modal.clone();
        Callback::from(move |_: MouseEvent| {
            menu_open.set(false);
            open_modal.set(Some(modal));
        })
    };

    let close_modal = {
        let open_modal = open_modal.clone();
        Callback::from(move |_| open_modal.set(None))
    };

    let Some(user) = auth.user.clone() else {
        return html! {
            <header class="header">
                <div class="container">
                    <h1 class="logo">{"AquaTrack"}</h1>
                </div>
            </header>
        };
    };

    let name = display_name(&user.name, &user.email);

    html! {
        <header class="header">
            <div class="container">
                <h1 class="logo">{"AquaTrack"}</h1>
                <div class="header-right">
                    <div class="daily-norm">
                        <span class="daily-norm-label">{"My daily norma"}</span>
                        <span class="daily-norm-value">
                            {format!("{} L", format_litres(user.daily_norm_litres()))}
                        </span>
                        <button type="button" class="btn-link" onclick={open(OpenModal::DailyNorm)}>
                            {"Edit"}
                        </button>
                    </div>

                    <div class="user-menu">
                        <button type="button" class="user-menu-trigger" onclick={toggle_menu}>
                            <span class="user-name">{name.clone()}</span>
                            {if let Some(avatar_url) = auth.avatar_url.clone() {
                                html! { <img class="user-avatar" src={avatar_url} alt={name} /> }
                            } else {
                                html! {
                                    <span class="user-avatar placeholder">
                                        {name.chars().next().map(|c| c.to_uppercase().to_string()).unwrap_or_default()}
                                    </span>
                                }
                            }}
                        </button>

                        {if *menu_open {
                            html! {
                                <div class="user-menu-dropdown">
                                    <button type="button" class="menu-item" onclick={open(OpenModal::Settings)}>
                                        {"Setting"}
                                    </button>
                                    <button type="button" class="menu-item" onclick={open(OpenModal::Logout)}>
                                        {"Log out"}
                                    </button>
                                </div>
                            }
                        } else { html! {} }}
                    </div>
                </div>
            </div>

            <DailyNormalModal
                is_open={*open_modal == Some(OpenModal::DailyNorm)}
                on_close={close_modal.clone()}
            />
            <SettingsModal
                is_open={*open_modal == Some(OpenModal::Settings)}
                on_close={close_modal.clone()}
            />
            <LogoutModal
                is_open={*open_modal == Some(OpenModal::Logout)}
                on_close={close_modal}
            />
        </header>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name() {
        assert_eq!(display_name("Olena Petrenko", "o@mail.com"), "Olena");
        assert_eq!(display_name("  ", "olena@mail.com"), "olena");
        assert_eq!(display_name("", ""), "");
    }
}
