use crate::api::BudgetApi;
use crate::models::Category;

/// Category definitions, loaded once at startup and never modified.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Catalog {
    categories: Vec<Category>,
}

impl Catalog {
    pub fn new(categories: Vec<Category>) -> Self {
        Self { categories }
    }

    /// Fetches the catalog. A failure leaves it empty; there is no retry.
    pub async fn load<A: BudgetApi + ?Sized>(api: &A) -> Self {
        match api.categories().await {
            Ok(categories) => {
                log::info!("loaded {} budget categories", categories.len());
                Self::new(categories)
            }
            Err(e) => {
                log::error!("Failed to load categories: {}", e);
                Self::default()
            }
        }
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn find(&self, name: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.name == name)
    }

    // Unknown categories count as expenses.
    pub fn is_income(&self, name: &str) -> bool {
        self.find(name).map(|c| c.is_income).unwrap_or(false)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::api::tests::MockApi;

    pub(crate) fn salary_and_rent() -> Catalog {
        Catalog::new(vec![
            Category {
                name: "Salary".to_string(),
                is_income: true,
                subcategories: vec!["Base".to_string()],
            },
            Category {
                name: "Rent".to_string(),
                is_income: false,
                subcategories: vec!["Apartment".to_string()],
            },
        ])
    }

    #[test]
    fn income_lookup_falls_back_to_expense() {
        let catalog = salary_and_rent();
        assert!(catalog.is_income("Salary"));
        assert!(!catalog.is_income("Rent"));
        assert!(!catalog.is_income("Gifts"));
        assert!(catalog.find("Gifts").is_none());
    }

    #[tokio::test]
    async fn load_keeps_server_order() {
        let api = MockApi::default();
        *api.categories.borrow_mut() = Some(salary_and_rent().categories().to_vec());

        let catalog = Catalog::load(&api).await;
        let names: Vec<&str> = catalog.categories().iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Salary", "Rent"]);
    }

    #[tokio::test]
    async fn load_failure_leaves_catalog_empty() {
        let api = MockApi::default();
        let catalog = Catalog::load(&api).await;
        assert!(catalog.categories().is_empty());
    }
}
