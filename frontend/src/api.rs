use async_trait::async_trait;
use gloo_net::http::{Request, Response};
use web_sys::RequestCredentials;

use crate::config::AppConfig;
use crate::error::ApiError;
use crate::models::{BudgetEntry, Category, LoginRequest, RegisterRequest, SaveEntryRequest, User};

/// The REST surface the client depends on. Futures are `!Send` because they
/// run on the browser event loop.
#[async_trait(?Send)]
pub trait BudgetApi {
    async fn current_user(&self) -> Result<User, ApiError>;
    async fn login(&self, request: &LoginRequest<'_>) -> Result<User, ApiError>;
    async fn register(&self, request: &RegisterRequest<'_>) -> Result<User, ApiError>;
    async fn logout(&self) -> Result<(), ApiError>;
    async fn delete_account(&self) -> Result<(), ApiError>;
    async fn categories(&self) -> Result<Vec<Category>, ApiError>;
    async fn budget_entries(&self, year: i32) -> Result<Vec<BudgetEntry>, ApiError>;
    async fn save_entry(&self, entry: &BudgetEntry) -> Result<(), ApiError>;
}

#[derive(Clone, Debug, PartialEq)]
pub struct HttpApi {
    base_url: String,
}

impl HttpApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(config.api_base_url.clone())
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

fn ensure_ok(resp: Response) -> Result<Response, ApiError> {
    if resp.ok() {
        Ok(resp)
    } else {
        Err(ApiError::Server(resp.status()))
    }
}

#[async_trait(?Send)]
impl BudgetApi for HttpApi {
    async fn current_user(&self) -> Result<User, ApiError> {
        let resp = Request::get(&self.url("/api/user"))
            .credentials(RequestCredentials::Include)
            .send()
            .await?;
        Ok(ensure_ok(resp)?.json::<User>().await?)
    }

    async fn login(&self, request: &LoginRequest<'_>) -> Result<User, ApiError> {
        let resp = Request::post(&self.url("/api/login"))
            .credentials(RequestCredentials::Include)
            .json(request)?
            .send()
            .await?;
        Ok(ensure_ok(resp)?.json::<User>().await?)
    }

    async fn register(&self, request: &RegisterRequest<'_>) -> Result<User, ApiError> {
        let resp = Request::post(&self.url("/api/register"))
            .credentials(RequestCredentials::Include)
            .json(request)?
            .send()
            .await?;
        if resp.status() == 409 {
            return Err(ApiError::DuplicateAccount);
        }
        Ok(ensure_ok(resp)?.json::<User>().await?)
    }

    async fn logout(&self) -> Result<(), ApiError> {
        Request::post(&self.url("/api/logout"))
            .credentials(RequestCredentials::Include)
            .send()
            .await?;
        Ok(())
    }

    async fn delete_account(&self) -> Result<(), ApiError> {
        let resp = Request::delete(&self.url("/api/user"))
            .credentials(RequestCredentials::Include)
            .send()
            .await?;
        ensure_ok(resp).map(|_| ())
    }

    async fn categories(&self) -> Result<Vec<Category>, ApiError> {
        let resp = Request::get(&self.url("/api/budget/categories"))
            .credentials(RequestCredentials::Include)
            .send()
            .await?;
        Ok(ensure_ok(resp)?.json::<Vec<Category>>().await?)
    }

    async fn budget_entries(&self, year: i32) -> Result<Vec<BudgetEntry>, ApiError> {
        let url = format!("{}?year={}", self.url("/api/budget"), year);
        let resp = Request::get(&url)
            .credentials(RequestCredentials::Include)
            .send()
            .await?;
        Ok(ensure_ok(resp)?.json::<Vec<BudgetEntry>>().await?)
    }

    async fn save_entry(&self, entry: &BudgetEntry) -> Result<(), ApiError> {
        let resp = Request::post(&self.url("/api/budget"))
            .credentials(RequestCredentials::Include)
            .json(&SaveEntryRequest::from(entry))?
            .send()
            .await?;
        ensure_ok(resp).map(|_| ())
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::models::EntryKey;
    use std::cell::{Cell, RefCell};
    use uuid::Uuid;

    /// In-memory stand-in for the budget server.
    #[derive(Default)]
    pub(crate) struct MockApi {
        pub accounts: RefCell<Vec<(User, String)>>,
        pub session: RefCell<Option<User>>,
        pub categories: RefCell<Option<Vec<Category>>>,
        pub entries: RefCell<Vec<BudgetEntry>>,
        pub saved: RefCell<Vec<BudgetEntry>>,
        pub offline: Cell<bool>,
        pub fail_saves: Cell<bool>,
        pub fail_budget: Cell<bool>,
        pub fail_delete: Cell<bool>,
    }

    impl MockApi {
        pub fn with_account(full_name: &str, email: &str, password: &str) -> Self {
            let api = Self::default();
            let id = Uuid::from_u128(api.accounts.borrow().len() as u128 + 1);
            api.accounts.borrow_mut().push((
                User {
                    id,
                    full_name: full_name.to_string(),
                    email: email.to_string(),
                },
                password.to_string(),
            ));
            api
        }

        fn reachable(&self) -> Result<(), ApiError> {
            if self.offline.get() {
                Err(ApiError::Network("connection refused".to_string()))
            } else {
                Ok(())
            }
        }
    }

    #[async_trait(?Send)]
    impl BudgetApi for MockApi {
        async fn current_user(&self) -> Result<User, ApiError> {
            self.reachable()?;
            self.session.borrow().clone().ok_or(ApiError::Server(401))
        }

        async fn login(&self, request: &LoginRequest<'_>) -> Result<User, ApiError> {
            self.reachable()?;
            let user = self
                .accounts
                .borrow()
                .iter()
                .find(|(u, pw)| u.email == request.email && pw == request.password)
                .map(|(u, _)| u.clone())
                .ok_or(ApiError::Server(401))?;
            *self.session.borrow_mut() = Some(user.clone());
            Ok(user)
        }

        async fn register(&self, request: &RegisterRequest<'_>) -> Result<User, ApiError> {
            self.reachable()?;
            if self.accounts.borrow().iter().any(|(u, _)| u.email == request.email) {
                return Err(ApiError::DuplicateAccount);
            }
            let user = User {
                id: Uuid::from_u128(self.accounts.borrow().len() as u128 + 1),
                full_name: request.full_name.to_string(),
                email: request.email.to_string(),
            };
            self.accounts
                .borrow_mut()
                .push((user.clone(), request.password.to_string()));
            *self.session.borrow_mut() = Some(user.clone());
            Ok(user)
        }

        async fn logout(&self) -> Result<(), ApiError> {
            self.reachable()?;
            *self.session.borrow_mut() = None;
            Ok(())
        }

        async fn delete_account(&self) -> Result<(), ApiError> {
            self.reachable()?;
            if self.fail_delete.get() {
                return Err(ApiError::Server(500));
            }
            let user = self.session.borrow_mut().take().ok_or(ApiError::Server(401))?;
            self.accounts.borrow_mut().retain(|(u, _)| u.id != user.id);
            Ok(())
        }

        async fn categories(&self) -> Result<Vec<Category>, ApiError> {
            self.reachable()?;
            self.categories.borrow().clone().ok_or(ApiError::Server(500))
        }

        async fn budget_entries(&self, year: i32) -> Result<Vec<BudgetEntry>, ApiError> {
            self.reachable()?;
            if self.fail_budget.get() {
                return Err(ApiError::Server(500));
            }
            Ok(self
                .entries
                .borrow()
                .iter()
                .filter(|e| e.year == year)
                .cloned()
                .collect())
        }

        async fn save_entry(&self, entry: &BudgetEntry) -> Result<(), ApiError> {
            self.reachable()?;
            if self.fail_saves.get() {
                return Err(ApiError::Server(500));
            }
            self.saved.borrow_mut().push(entry.clone());
            let mut entries = self.entries.borrow_mut();
            let key = EntryKey::new(&entry.category, &entry.subcategory, entry.month);
            match entries
                .iter_mut()
                .find(|e| e.year == entry.year && key.matches(e))
            {
                Some(existing) => existing.amount = entry.amount,
                None => entries.push(entry.clone()),
            }
            Ok(())
        }
    }

    #[test]
    fn urls_are_joined_to_base() {
        let api = HttpApi::new("http://localhost:3000");
        assert_eq!(api.url("/api/user"), "http://localhost:3000/api/user");

        let same_origin = HttpApi::from_config(&AppConfig::default());
        assert_eq!(same_origin.url("/api/budget"), "/api/budget");
    }
}
