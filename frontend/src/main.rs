use yew::prelude::*;

mod components;
mod hooks;
mod services;

use components::header::Header;
use components::toaster::ToastProvider;
use hooks::use_auth::{use_auth, AuthProvider};

#[function_component(Home)]
fn home() -> Html {
    let auth = use_auth();

    html! {
        <main class="main">
            <div class="container">
                {if let Some(user) = &auth.user {
                    html! {
                        <section class="welcome">
                            <h2>{format!("Hello, {}!", if user.name.is_empty() { &user.email } else { &user.name })}</h2>
                            <p>{"Open the menu in the top right corner to update your profile or daily norma."}</p>
                        </section>
                    }
                } else {
                    html! {
                        <section class="welcome">
                            <h2>{"Water consumption tracker"}</h2>
                            <p>{"Record daily water intake and track your goal."}</p>
                        </section>
                    }
                }}
            </div>
        </main>
    }
}

#[function_component(App)]
fn app() -> Html {
    html! {
        <AuthProvider>
            <ToastProvider>
                <Header />
                <Home />
            </ToastProvider>
        </AuthProvider>
    }
}

fn main() {
    yew::Renderer::<App>::new().render();
}
