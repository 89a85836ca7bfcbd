use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use super::auth::AuthScreen;
use super::budget::BudgetPage;
use super::layout::{Layout, NoticeBanner, Page};
use super::settings_page::SettingsPage;
use crate::api::HttpApi;
use crate::config::{current_year, AppConfig};
use crate::controller;
use crate::models::EntryKey;
use crate::session::DeleteOutcome;
use crate::settings::{load_settings, AppSettings};
use crate::state::{Action, AppState};

fn confirm(message: &str) -> bool {
    web_sys::window()
        .and_then(|w| w.confirm_with_message(message).ok())
        .unwrap_or(false)
}

#[function_component(App)]
pub fn app() -> Html {
    let config = use_state(AppConfig::from_env);
    let api = {
        let config = config.clone();
        use_state(move || HttpApi::from_config(&config))
    };
    let state = use_reducer(|| AppState::new(current_year()));
    let settings = use_state(load_settings);
    let active_page = use_state(|| Page::Budget);

    let dispatch = {
        let state = state.clone();
        Callback::from(move |action: Action| state.dispatch(action))
    };

    {
        let api = (*api).clone();
        let dispatch = dispatch.clone();
        let year = state.selected_year;
        use_effect_with_deps(
            move |_| {
                spawn_local(async move {
                    let emit = move |action: Action| dispatch.emit(action);
                    controller::bootstrap(&api, &emit, year).await;
                });
                || ()
            },
            (),
        );
    }

    let on_select = {
        let active_page = active_page.clone();
        Callback::from(move |page: Page| active_page.set(page))
    };

    let on_logout = {
        let api = (*api).clone();
        let dispatch = dispatch.clone();
        let active_page = active_page.clone();
        Callback::from(move |_| {
            let api = api.clone();
            let dispatch = dispatch.clone();
            active_page.set(Page::Budget);
            spawn_local(async move {
                let emit = move |action: Action| dispatch.emit(action);
                controller::sign_out(&api, &emit).await;
            });
        })
    };

    let on_delete_account = {
        let api = (*api).clone();
        let dispatch = dispatch.clone();
        let active_page = active_page.clone();
        Callback::from(move |_| {
            let api = api.clone();
            let dispatch = dispatch.clone();
            let active_page = active_page.clone();
            spawn_local(async move {
                let emit = move |action: Action| dispatch.emit(action);
                if let Ok(DeleteOutcome::Deleted) =
                    controller::close_account(&api, &emit, confirm).await
                {
                    active_page.set(Page::Budget);
                }
            });
        })
    };

    let on_year = {
        let api = (*api).clone();
        let dispatch = dispatch.clone();
        Callback::from(move |year: i32| {
            let api = api.clone();
            let dispatch = dispatch.clone();
            spawn_local(async move {
                let emit = move |action: Action| dispatch.emit(action);
                controller::select_year(&api, &emit, year).await;
            });
        })
    };

    let on_edit = {
        let api = (*api).clone();
        let dispatch = dispatch.clone();
        // Edits target the year whose entries are on screen.
        let year = state.store.year();
        Callback::from(move |(key, raw): (EntryKey, String)| {
            let api = api.clone();
            let dispatch = dispatch.clone();
            spawn_local(async move {
                let emit = move |action: Action| dispatch.emit(action);
                controller::set_entry(&api, &emit, year, key, &raw).await;
            });
        })
    };

    let on_dismiss = {
        let dispatch = dispatch.clone();
        Callback::from(move |_| dispatch.emit(Action::DismissNotice))
    };

    let banner = html! { <NoticeBanner notice={state.notice.clone()} on_dismiss={on_dismiss} /> };

    if !state.session_checked {
        return html! {
            <div class="min-h-screen flex items-center justify-center bg-background text-muted-foreground">
                {"Checking session..."}
            </div>
        };
    }

    let Some(user) = state.user().cloned() else {
        return html! {
            <>
                { banner }
                <AuthScreen api={(*api).clone()} dispatch={dispatch} year={state.selected_year} />
            </>
        };
    };

    let content = match *active_page {
        Page::Budget => html! {
            <BudgetPage
                grid={state.grid()}
                summary={state.summary()}
                years={config.selectable_years(current_year())}
                selected_year={state.selected_year}
                on_year={on_year}
                on_edit={on_edit}
            />
        },
        Page::Settings => html! {
            <SettingsPage user={user.clone()} on_delete_account={on_delete_account} />
        },
    };

    html! {
        <ContextProvider<UseStateHandle<AppSettings>> context={settings}>
            <Layout active_page={*active_page} user_name={user.full_name.clone()} on_select={on_select} on_logout={on_logout}>
                { banner }
                { content }
            </Layout>
        </ContextProvider<UseStateHandle<AppSettings>>>
    }
}
