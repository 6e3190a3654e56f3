use std::rc::Rc;

use shared::UserProfile;
use yew::prelude::*;

use crate::services::api::ApiClient;
use crate::services::config::AppConfig;
use crate::services::logging::Logger;
use crate::services::session::{self, Session};

/// Client-side copy of the signed-in user
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AuthState {
    pub user: Option<UserProfile>,
    pub token: Option<String>,
    /// Last failed request, until it has been shown
    pub error: Option<String>,
    pub avatar_url: Option<String>,
}

pub enum AuthAction {
    /// Successful update response; replaces the cached profile
    UserUpdated(UserProfile),
    /// New daily norm in millilitres
    DailyNormUpdated(u32),
    AvatarUpdated(String),
    RequestFailed(String),
    ClearError,
    /// Logout; drops everything tied to the session
    ClearUserData,
}

impl AuthState {
    pub fn from_session(session: Option<Session>) -> Self {
        let Session { token, user } = session.unwrap_or_default();
        Self {
            avatar_url: user.as_ref().and_then(|u| u.avatar_url.clone()),
            user,
            token,
            error: None,
        }
    }

    pub fn session(&self) -> Session {
        Session {
            token: self.token.clone(),
            user: self.user.clone(),
        }
    }
}

impl Reducible for AuthState {
    type Action = AuthAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let next = match action {
            AuthAction::UserUpdated(user) => AuthState {
                avatar_url: user.avatar_url.clone().or_else(|| self.avatar_url.clone()),
                user: Some(user),
                token: self.token.clone(),
                error: None,
            },
            AuthAction::DailyNormUpdated(millilitres) => AuthState {
                user: self.user.clone().map(|user| UserProfile {
                    daily_water_requirement: Some(millilitres),
                    ..user
                }),
                error: None,
                ..(*self).clone()
            },
            AuthAction::AvatarUpdated(url) => AuthState {
                user: self.user.clone().map(|user| UserProfile {
                    avatar_url: Some(url.clone()),
                    ..user
                }),
                avatar_url: Some(url),
                error: None,
                ..(*self).clone()
            },
            AuthAction::RequestFailed(message) => AuthState {
                error: Some(message),
                ..(*self).clone()
            },
            AuthAction::ClearError => AuthState {
                error: None,
                ..(*self).clone()
            },
            AuthAction::ClearUserData => AuthState::default(),
        };
        Rc::new(next)
    }
}

pub type AuthContext = UseReducerHandle<AuthState>;

#[derive(Properties, PartialEq)]
pub struct AuthProviderProps {
    #[prop_or_default]
    pub children: Html,
}

/// Restores the persisted session and shares the store with its children
#[function_component(AuthProvider)]
pub fn auth_provider(props: &AuthProviderProps) -> Html {
    let session_key = AppConfig::from_env().session_key;
    let state = use_reducer(|| AuthState::from_session(session::load(session_key)));

    // Write the session back whenever it changes
    use_effect_with(state.session(), move |current| {
        if current.token.is_none() && current.user.is_none() {
            session::clear(session_key);
        } else if let Err(e) = session::save(session_key, current) {
            Logger::warn_with_component("AuthProvider", &e.to_string());
        }
        || ()
    });

    html! {
        <ContextProvider<AuthContext> context={state}>
            {props.children.clone()}
        </ContextProvider<AuthContext>>
    }
}

#[hook]
pub fn use_auth() -> AuthContext {
    use_context::<AuthContext>().expect("use_auth called outside of AuthProvider")
}

/// API client carrying the current session token
#[hook]
pub fn use_api_client() -> ApiClient {
    let auth = use_auth();
    ApiClient::new().with_token(auth.token.clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signed_in() -> Rc<AuthState> {
        Rc::new(AuthState::from_session(Some(Session {
            token: Some("token-1".to_string()),
            user: Some(UserProfile {
                name: "Olena".to_string(),
                email: "olena@mail.com".to_string(),
                avatar_url: Some("https://cdn/old.png".to_string()),
                daily_water_requirement: Some(1800),
                ..Default::default()
            }),
        })))
    }

    #[test]
    fn test_from_session_picks_avatar() {
        let state = signed_in();
        assert_eq!(state.token.as_deref(), Some("token-1"));
        assert_eq!(state.avatar_url.as_deref(), Some("https://cdn/old.png"));
        assert_eq!(AuthState::from_session(None), AuthState::default());
    }

    #[test]
    fn test_user_update_replaces_profile() {
        let state = signed_in().reduce(AuthAction::RequestFailed("boom".to_string()));
        let updated = UserProfile {
            name: "Olha".to_string(),
            ..Default::default()
        };
        let state = state.reduce(AuthAction::UserUpdated(updated.clone()));

        assert_eq!(state.user, Some(updated));
        assert_eq!(state.token.as_deref(), Some("token-1"));
        assert_eq!(state.error, None);
        // response without an avatar keeps the known one
        assert_eq!(state.avatar_url.as_deref(), Some("https://cdn/old.png"));
    }

    #[test]
    fn test_daily_norm_update() {
        let state = signed_in().reduce(AuthAction::DailyNormUpdated(2500));
        let user = state.user.as_ref().unwrap();
        assert_eq!(user.daily_water_requirement, Some(2500));
        assert_eq!(user.name, "Olena");
    }

    #[test]
    fn test_avatar_update_touches_user_copy() {
        let state = signed_in().reduce(AuthAction::AvatarUpdated("https://cdn/new.png".to_string()));
        assert_eq!(state.avatar_url.as_deref(), Some("https://cdn/new.png"));
        assert_eq!(
            state.user.as_ref().and_then(|u| u.avatar_url.as_deref()),
            Some("https://cdn/new.png")
        );
    }

    #[test]
    fn test_clear_user_data_drops_session() {
        let state = signed_in()
            .reduce(AuthAction::RequestFailed("boom".to_string()))
            .reduce(AuthAction::ClearUserData);
        assert_eq!(*state, AuthState::default());
        assert_eq!(state.session(), Session::default());
    }

    #[test]
    fn test_clear_error() {
        let state = signed_in()
            .reduce(AuthAction::RequestFailed("boom".to_string()))
            .reduce(AuthAction::ClearError);
        assert_eq!(state.error, None);
    }

    #[test]
    fn test_same_failure_is_reported_again_after_clearing() {
        let state = signed_in().reduce(AuthAction::RequestFailed("Network error".to_string()));
        assert_eq!(state.error.as_deref(), Some("Network error"));

        let state = state
            .reduce(AuthAction::ClearError)
            .reduce(AuthAction::RequestFailed("Network error".to_string()));
        assert_eq!(state.error.as_deref(), Some("Network error"));
        assert_eq!(state.user.as_ref().map(|u| u.name.as_str()), Some("Olena"));
    }
}
