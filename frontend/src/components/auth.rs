use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::api::HttpApi;
use crate::controller;
use crate::state::Action;

#[derive(Properties, PartialEq)]
pub struct AuthScreenProps {
    pub api: HttpApi,
    pub dispatch: Callback<Action>,
    pub year: i32,
}

fn text_input(value: &UseStateHandle<String>, input_type: &'static str, label: &'static str) -> Html {
    let oninput = {
        let value = value.clone();
        Callback::from(move |e: InputEvent| {
            let input: web_sys::HtmlInputElement = e.target_unchecked_into();
            value.set(input.value());
        })
    };
    html! {
        <div class="space-y-1">
            <label class="text-sm font-medium text-foreground">{ label }</label>
            <input
                type={input_type}
                required={true}
                class="w-full px-4 py-2 bg-input border border-input rounded-lg text-foreground focus:outline-none focus:ring-2 focus:ring-primary"
                value={(**value).clone()}
                oninput={oninput}
            />
        </div>
    }
}

#[function_component(AuthScreen)]
pub fn auth_screen(props: &AuthScreenProps) -> Html {
    let is_login = use_state(|| true);
    let full_name = use_state(String::new);
    let email = use_state(String::new);
    let password = use_state(String::new);
    let error = use_state(|| None::<String>);
    let loading = use_state(|| false);

    let on_submit = {
        let is_login = is_login.clone();
        let full_name = full_name.clone();
        let email = email.clone();
        let password = password.clone();
        let error = error.clone();
        let loading = loading.clone();
        let api = props.api.clone();
        let dispatch = props.dispatch.clone();
        let year = props.year;
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let login_mode = *is_login;
            let full_name_val = (*full_name).clone();
            let email_val = (*email).clone();
            let password_val = (*password).clone();
            let api = api.clone();
            let dispatch = dispatch.clone();
            let error = error.clone();
            let loading = loading.clone();

            loading.set(true);
            error.set(None);

            spawn_local(async move {
                let emit = move |action: Action| dispatch.emit(action);
                let result = if login_mode {
                    controller::sign_in(&api, &emit, &email_val, &password_val, year).await
                } else {
                    controller::sign_up(&api, &emit, &full_name_val, &email_val, &password_val, year)
                        .await
                };
                if let Err(failure) = result {
                    error.set(Some(failure.to_string()));
                }
                loading.set(false);
            });
        })
    };

    let show_login = {
        let is_login = is_login.clone();
        let error = error.clone();
        Callback::from(move |_| {
            is_login.set(true);
            error.set(None);
        })
    };
    let show_register = {
        let is_login = is_login.clone();
        let error = error.clone();
        Callback::from(move |_| {
            is_login.set(false);
            error.set(None);
        })
    };

    let tab_class = |active: bool| {
        if active {
            "flex-1 py-2 text-sm font-semibold border-b-2 border-primary text-foreground"
        } else {
            "flex-1 py-2 text-sm font-semibold border-b-2 border-transparent text-muted-foreground"
        }
    };

    html! {
        <div class="min-h-screen flex items-center justify-center bg-background">
            <div class="w-full max-w-md bg-card border border-border rounded-2xl shadow-lg p-8">
                <div class="text-center mb-6">
                    <h1 class="text-2xl font-bold text-foreground">{ if *is_login { "Welcome back" } else { "Create account" } }</h1>
                    <p class="text-sm text-muted-foreground mt-2">
                        { if *is_login { "Sign in to see your budget." } else { "Start planning your year." } }
                    </p>
                </div>

                <div class="flex mb-6">
                    <button type="button" class={tab_class(*is_login)} onclick={show_login}>{"Login"}</button>
                    <button type="button" class={tab_class(!*is_login)} onclick={show_register}>{"Register"}</button>
                </div>

                <form class="space-y-4" onsubmit={on_submit}>
                    if !*is_login {
                        { text_input(&full_name, "text", "Full Name") }
                    }
                    { text_input(&email, "email", "Email") }
                    { text_input(&password, "password", "Password") }

                    if let Some(msg) = &*error {
                        <div class="text-sm text-red-500">{ msg.clone() }</div>
                    }

                    <button
                        type="submit"
                        class="w-full bg-primary text-primary-foreground py-2 rounded-lg font-semibold hover:opacity-90 transition-opacity"
                        disabled={*loading}
                    >
                        { if *loading { "Please wait..." } else if *is_login { "Login" } else { "Register" } }
                    </button>
                </form>
            </div>
        </div>
    }
}
