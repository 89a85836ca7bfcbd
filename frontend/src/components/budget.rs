use rust_decimal::Decimal;
use yew::prelude::*;

use super::icons::{icon_credit_card, icon_trending_up, icon_wallet};
use super::layout::page_shell;
use crate::format::format_currency;
use crate::grid::{CellView, GridView, RowView, SectionView};
use crate::models::{EntryKey, MONTHS};
use crate::settings::AppSettings;
use crate::store::parse_amount;
use crate::summary::Summary;

#[derive(Clone, Copy, PartialEq)]
enum StatIcon {
    TrendingUp,
    CreditCard,
    Wallet,
}

#[derive(Properties, PartialEq)]
struct StatCardProps {
    title: &'static str,
    amount: Decimal,
    icon: StatIcon,
    currency_symbol: AttrValue,
    #[prop_or_default]
    signed: bool,
}

#[function_component(StatCard)]
fn stat_card(props: &StatCardProps) -> Html {
    let amount_class = if !props.signed {
        "text-2xl font-bold text-[#1D617A] tracking-tight"
    } else if props.amount.is_sign_negative() && !props.amount.is_zero() {
        "text-2xl font-bold text-[#dc3545] tracking-tight"
    } else {
        "text-2xl font-bold text-[#28a745] tracking-tight"
    };

    html! {
        <div class="bg-card p-6 rounded-[10px] shadow-sm border border-border flex justify-between items-start">
            <div>
                <p class="text-muted-foreground text-[10px] font-bold mb-1 tracking-widest">{ props.title }</p>
                <h3 class={amount_class}>{ format_currency(props.amount, &props.currency_symbol) }</h3>
            </div>
            <div class="p-3 bg-[#eef4f9] rounded-[10px]">
                {
                    match props.icon {
                        StatIcon::TrendingUp => icon_trending_up(),
                        StatIcon::CreditCard => icon_credit_card(),
                        StatIcon::Wallet => icon_wallet(),
                    }
                }
            </div>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct BudgetPageProps {
    pub grid: GridView,
    pub summary: Summary,
    pub years: Vec<i32>,
    pub selected_year: i32,
    pub on_year: Callback<i32>,
    pub on_edit: Callback<(EntryKey, String)>,
}

#[function_component(BudgetPage)]
pub fn budget_page(props: &BudgetPageProps) -> Html {
    let settings = use_context::<UseStateHandle<AppSettings>>();
    let currency_symbol: AttrValue = settings
        .as_ref()
        .map(|s| s.currency_symbol.clone())
        .unwrap_or_else(|| AppSettings::default().currency_symbol)
        .into();

    let on_year_change = {
        let on_year = props.on_year.clone();
        Callback::from(move |e: Event| {
            let select: web_sys::HtmlSelectElement = e.target_unchecked_into();
            match select.value().parse::<i32>() {
                Ok(year) => on_year.emit(year),
                Err(_) => log::warn!("ignoring unexpected year value {:?}", select.value()),
            }
        })
    };

    let year_select = html! {
        // Keyed so a reverted selection rebuilds the element.
        <select key={props.selected_year.to_string()} class="p-2 border rounded bg-card text-foreground" onchange={on_year_change}>
            { for props.years.iter().map(|year| html! {
                <option value={year.to_string()} selected={*year == props.selected_year}>{ year.to_string() }</option>
            }) }
        </select>
    };

    html! {
        { page_shell(
            "Budget",
            year_select,
            html! {
                <>
                    <div class="grid grid-cols-1 md:grid-cols-3 gap-6">
                        <StatCard title="TOTAL INCOME" amount={props.summary.total_income} icon={StatIcon::TrendingUp} currency_symbol={currency_symbol.clone()} />
                        <StatCard title="TOTAL EXPENSES" amount={props.summary.total_expenses} icon={StatIcon::CreditCard} currency_symbol={currency_symbol.clone()} />
                        <StatCard title="NET" amount={props.summary.net} icon={StatIcon::Wallet} currency_symbol={currency_symbol.clone()} signed={true} />
                    </div>

                    if props.grid.sections.is_empty() {
                        <p class="text-sm text-muted-foreground">{"No budget categories available."}</p>
                    }

                    { for props.grid.sections.iter().map(|section| section_view(section, &currency_symbol, &props.on_edit)) }
                </>
            }
        ) }
    }
}

fn section_view(section: &SectionView, currency_symbol: &str, on_edit: &Callback<(EntryKey, String)>) -> Html {
    let section_class = format!(
        "category-section {} bg-card rounded-[10px] border border-border overflow-x-auto",
        section.kind.css_class()
    );

    html! {
        <div class={section_class}>
            <div class="category-header px-6 py-3 font-bold text-foreground border-b border-border">{ section.name.clone() }</div>
            <div class="subcategory-grid p-4">
                <div class="subcategory-row grid grid-cols-[12rem_repeat(13,minmax(5rem,1fr))] gap-1 text-[10px] font-bold tracking-widest text-muted-foreground">
                    <div class="subcategory-name"></div>
                    { for MONTHS.iter().map(|month| html! { <div class="month-header text-center">{ *month }</div> }) }
                    <div class="month-header text-right">{"TOTAL"}</div>
                </div>
                { for section.rows.iter().map(|row| row_view(row, currency_symbol, on_edit)) }
                <div class="subcategory-row grid grid-cols-[12rem_repeat(13,minmax(5rem,1fr))] gap-1 mt-2 pt-2 border-t border-border text-xs font-semibold">
                    <div class="subcategory-name">{"Monthly total"}</div>
                    { for section.month_totals.iter().map(|total| html! {
                        <div class="text-right">{ format_currency(*total, currency_symbol) }</div>
                    }) }
                    <div class="year-total text-right">{ format_currency(section.total, currency_symbol) }</div>
                </div>
            </div>
        </div>
    }
}

fn row_view(row: &RowView, currency_symbol: &str, on_edit: &Callback<(EntryKey, String)>) -> Html {
    html! {
        <div class="subcategory-row grid grid-cols-[12rem_repeat(13,minmax(5rem,1fr))] gap-1 items-center">
            <div class="subcategory-name text-sm text-foreground truncate">{ row.subcategory.clone() }</div>
            { for row.cells.iter().map(|cell| cell_view(cell, on_edit)) }
            <div class="year-total text-right text-sm font-semibold">{ format_currency(row.total, currency_symbol) }</div>
        </div>
    }
}

fn cell_view(cell: &CellView, on_edit: &Callback<(EntryKey, String)>) -> Html {
    let onblur = {
        let on_edit = on_edit.clone();
        let key = cell.key.clone();
        let current = cell.amount;
        let unsynced = cell.unsynced;
        Callback::from(move |e: FocusEvent| {
            let input: web_sys::HtmlInputElement = e.target_unchecked_into();
            let raw = input.value();
            // Untouched cells would otherwise write a zero entry on every tab-through.
            if parse_amount(&raw) == current && !unsynced {
                return;
            }
            on_edit.emit((key.clone(), raw));
        })
    };

    let input_class = if cell.unsynced {
        "amount-input unsynced w-full p-1 text-right text-sm border border-amber-400 bg-amber-50 rounded"
    } else {
        "amount-input w-full p-1 text-right text-sm border rounded"
    };

    html! {
        <div class="amount-cell">
            <input
                type="number"
                step="0.01"
                placeholder="0.00"
                class={input_class}
                title={if cell.unsynced { "Not saved to the server yet" } else { "" }}
                value={cell.input_value.clone()}
                onblur={onblur}
            />
        </div>
    }
}
