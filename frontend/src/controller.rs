//! Async flows that talk to the server and feed the results back into
//! [`AppState`](crate::state::AppState) as actions. The UI passes its reducer's
//! `dispatch`; tests pass a closure over a plain state value.

use crate::api::BudgetApi;
use crate::catalog::Catalog;
use crate::models::{BudgetEntry, EntryKey};
use crate::session::{self, AccountFailure, AuthFailure, DeleteOutcome, ACCOUNT_DELETED};
use crate::state::{Action, Notice};
use crate::store::{self, parse_amount, SyncStatus};

/// Page-load sequence: catalog first, then the session check, then the
/// budget for `year` if someone is signed in.
pub async fn bootstrap<A, D>(api: &A, dispatch: &D, year: i32)
where
    A: BudgetApi + ?Sized,
    D: Fn(Action),
{
    dispatch(Action::CatalogLoaded(Catalog::load(api).await));

    let session = session::check_session(api).await;
    let signed_in = session.is_signed_in();
    dispatch(Action::SessionChecked(session));
    if signed_in {
        load_year(api, dispatch, year).await;
    }
}

pub async fn sign_in<A, D>(
    api: &A,
    dispatch: &D,
    email: &str,
    password: &str,
    year: i32,
) -> Result<(), AuthFailure>
where
    A: BudgetApi + ?Sized,
    D: Fn(Action),
{
    let user = session::login(api, email, password).await?;
    dispatch(Action::SignedIn(user));
    load_year(api, dispatch, year).await;
    Ok(())
}

pub async fn sign_up<A, D>(
    api: &A,
    dispatch: &D,
    full_name: &str,
    email: &str,
    password: &str,
    year: i32,
) -> Result<(), AuthFailure>
where
    A: BudgetApi + ?Sized,
    D: Fn(Action),
{
    let user = session::register(api, full_name, email, password).await?;
    dispatch(Action::SignedIn(user));
    load_year(api, dispatch, year).await;
    Ok(())
}

pub async fn sign_out<A, D>(api: &A, dispatch: &D)
where
    A: BudgetApi + ?Sized,
    D: Fn(Action),
{
    session::logout(api).await;
    dispatch(Action::SignedOut(None));
}

pub async fn close_account<A, D, C>(
    api: &A,
    dispatch: &D,
    confirm: C,
) -> Result<DeleteOutcome, AccountFailure>
where
    A: BudgetApi + ?Sized,
    D: Fn(Action),
    C: FnMut(&str) -> bool,
{
    let outcome = session::delete_account(api, confirm).await;
    match &outcome {
        Ok(DeleteOutcome::Deleted) => {
            dispatch(Action::SignedOut(Some(Notice::info(ACCOUNT_DELETED))))
        }
        Ok(DeleteOutcome::Cancelled) => {}
        Err(failure) => dispatch(Action::Notify(Notice::error(failure.to_string()))),
    }
    outcome
}

/// Fetches `year`. On failure the current entries stay on screen and the
/// selection returns to their year.
pub async fn load_year<A, D>(api: &A, dispatch: &D, year: i32)
where
    A: BudgetApi + ?Sized,
    D: Fn(Action),
{
    match store::fetch_year(api, year).await {
        Ok(entries) => dispatch(Action::YearLoaded { year, entries }),
        Err(e) => {
            log::error!("Failed to load budget for {}: {}", year, e);
            dispatch(Action::YearLoadFailed(year));
        }
    }
}

pub async fn select_year<A, D>(api: &A, dispatch: &D, year: i32)
where
    A: BudgetApi + ?Sized,
    D: Fn(Action),
{
    dispatch(Action::SelectYear(year));
    load_year(api, dispatch, year).await;
}

/// Applies the edit locally first, then writes it through. The returned
/// status says whether the server has the value.
pub async fn set_entry<A, D>(api: &A, dispatch: &D, year: i32, key: EntryKey, raw: &str) -> SyncStatus
where
    A: BudgetApi + ?Sized,
    D: Fn(Action),
{
    let amount = parse_amount(raw);
    dispatch(Action::EntryEdited {
        key: key.clone(),
        amount,
    });

    let entry = BudgetEntry {
        category: key.category.clone(),
        subcategory: key.subcategory.clone(),
        month: key.month,
        year,
        amount,
    };
    let status = store::persist_entry(api, &entry).await;
    dispatch(Action::EntrySynced { year, key, status });
    status
}
