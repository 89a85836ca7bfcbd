use std::rc::Rc;

use rust_decimal::Decimal;
use yew::Reducible;

use crate::catalog::Catalog;
use crate::grid::{build_grid, GridView};
use crate::models::{BudgetEntry, EntryKey, User};
use crate::session::Session;
use crate::store::{BudgetStore, SyncStatus};
use crate::summary::{compute_summary, Summary};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Error,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Info,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            message: message.into(),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Action {
    CatalogLoaded(Catalog),
    SessionChecked(Session),
    SignedIn(User),
    SignedOut(Option<Notice>),
    SelectYear(i32),
    YearLoaded { year: i32, entries: Vec<BudgetEntry> },
    YearLoadFailed(i32),
    EntryEdited { key: EntryKey, amount: Decimal },
    EntrySynced { year: i32, key: EntryKey, status: SyncStatus },
    Notify(Notice),
    DismissNotice,
}

/// Everything the UI renders from. Only [`AppState::apply`] changes it.
#[derive(Clone, Debug, PartialEq)]
pub struct AppState {
    pub session: Session,
    pub session_checked: bool,
    pub catalog: Catalog,
    pub store: BudgetStore,
    pub selected_year: i32,
    pub notice: Option<Notice>,
}

impl AppState {
    pub fn new(year: i32) -> Self {
        Self {
            session: Session::SignedOut,
            session_checked: false,
            catalog: Catalog::default(),
            store: BudgetStore::new(year),
            selected_year: year,
            notice: None,
        }
    }

    pub fn apply(&mut self, action: Action) {
        match action {
            Action::CatalogLoaded(catalog) => self.catalog = catalog,
            Action::SessionChecked(session) => {
                self.session_checked = true;
                if !session.is_signed_in() {
                    self.store.clear();
                }
                self.session = session;
            }
            Action::SignedIn(user) => {
                self.session_checked = true;
                self.session = Session::SignedIn(user);
                self.notice = None;
            }
            Action::SignedOut(notice) => {
                self.session = Session::SignedOut;
                self.store.clear();
                self.notice = notice;
            }
            Action::SelectYear(year) => self.selected_year = year,
            Action::YearLoaded { year, entries } => {
                if year == self.selected_year && self.session.is_signed_in() {
                    self.store.replace(year, entries);
                } else {
                    log::debug!("dropping stale entries for {}", year);
                }
            }
            // The selector snaps back to the year still on screen.
            Action::YearLoadFailed(year) => {
                if year == self.selected_year {
                    self.selected_year = self.store.year();
                }
            }
            Action::EntryEdited { key, amount } => self.store.upsert(&key, amount),
            Action::EntrySynced { year, key, status } => {
                if year == self.store.year() {
                    self.store.record_sync(&key, status);
                }
            }
            Action::Notify(notice) => self.notice = Some(notice),
            Action::DismissNotice => self.notice = None,
        }
    }

    pub fn user(&self) -> Option<&User> {
        self.session.user()
    }

    pub fn summary(&self) -> Summary {
        compute_summary(self.store.entries(), &self.catalog)
    }

    pub fn grid(&self) -> GridView {
        build_grid(&self.catalog, &self.store)
    }
}

impl Reducible for AppState {
    type Action = Action;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = (*self).clone();
        next.apply(action);
        Rc::new(next)
    }
}
