use yew::prelude::*;

use super::layout::page_shell;
use crate::models::User;
use crate::settings::{save_settings, AppSettings, CURRENCIES};

#[derive(Properties, PartialEq)]
pub struct SettingsPageProps {
    pub user: User,
    pub on_delete_account: Callback<()>,
}

#[function_component(SettingsPage)]
pub fn settings_page(props: &SettingsPageProps) -> Html {
    let settings = use_context::<UseStateHandle<AppSettings>>();
    let current_code = settings
        .as_ref()
        .map(|s| s.currency_code.clone())
        .unwrap_or_else(|| AppSettings::default().currency_code);

    let on_currency = {
        let settings = settings.clone();
        Callback::from(move |e: Event| {
            let select: web_sys::HtmlSelectElement = e.target_unchecked_into();
            let next = AppSettings::for_currency(&select.value());
            save_settings(&next);
            if let Some(settings) = &settings {
                settings.set(next);
            }
        })
    };

    let on_delete = {
        let on_delete_account = props.on_delete_account.clone();
        Callback::from(move |_| on_delete_account.emit(()))
    };

    html! {
        { page_shell(
            "Settings",
            html! {},
            html! {
                <>
                    <div class="bg-card rounded-[10px] p-6 border border-border space-y-2">
                        <h3 class="font-bold text-foreground text-lg">{"Account"}</h3>
                        <p class="text-sm text-muted-foreground">{ props.user.full_name.clone() }</p>
                        <p class="text-sm text-muted-foreground">{ props.user.email.clone() }</p>
                    </div>

                    <div class="bg-card rounded-[10px] p-6 border border-border">
                        <h3 class="font-bold text-foreground text-lg mb-2">{"Display currency"}</h3>
                        <p class="text-xs text-muted-foreground mb-4">{"Changes the symbol only. Amounts are not converted."}</p>
                        <select class="p-2 border rounded" onchange={on_currency}>
                            { for CURRENCIES.iter().map(|code| html! {
                                <option value={*code} selected={*code == current_code}>{ *code }</option>
                            }) }
                        </select>
                    </div>

                    <div class="bg-card rounded-[10px] p-6 border border-red-200">
                        <h3 class="font-bold text-red-600 text-lg mb-2">{"Danger zone"}</h3>
                        <p class="text-sm text-muted-foreground mb-4">{"Deleting your account removes all of your budget data permanently."}</p>
                        <button type="button" onclick={on_delete} class="bg-red-600 text-white px-4 py-2 rounded font-semibold">{"Delete account"}</button>
                    </div>
                </>
            }
        ) }
    }
}
