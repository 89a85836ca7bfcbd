use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const MONTHS: [&str; 12] = [
    "JAN", "FEB", "MAR", "APR", "MAY", "JUN", "JUL", "AUG", "SEP", "OCT", "NOV", "DEC",
];

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct User {
    pub id: Uuid,
    pub full_name: String,
    pub email: String,
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct Category {
    pub name: String,
    pub is_income: bool,
    pub subcategories: Vec<String>,
}

/// One budgeted amount. The server sends `amount` as a decimal string; plain
/// numbers are accepted too.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct BudgetEntry {
    pub category: String,
    pub subcategory: String,
    pub month: u32,
    pub year: i32,
    pub amount: Decimal,
}

/// Identifies a grid cell within a single year.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct EntryKey {
    pub category: String,
    pub subcategory: String,
    pub month: u32,
}

impl EntryKey {
    pub fn new(category: &str, subcategory: &str, month: u32) -> Self {
        Self {
            category: category.to_string(),
            subcategory: subcategory.to_string(),
            month,
        }
    }

    pub fn matches(&self, entry: &BudgetEntry) -> bool {
        entry.category == self.category
            && entry.subcategory == self.subcategory
            && entry.month == self.month
    }
}

#[derive(Serialize)]
pub struct LoginRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

#[derive(Serialize)]
pub struct RegisterRequest<'a> {
    pub full_name: &'a str,
    pub email: &'a str,
    pub password: &'a str,
}

// The server reads `amount` as an f64, so it goes out as a JSON number.
#[derive(Serialize)]
pub struct SaveEntryRequest<'a> {
    pub category: &'a str,
    pub subcategory: &'a str,
    pub month: u32,
    pub year: i32,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
}

impl<'a> From<&'a BudgetEntry> for SaveEntryRequest<'a> {
    fn from(entry: &'a BudgetEntry) -> Self {
        Self {
            category: &entry.category,
            subcategory: &entry.subcategory,
            month: entry.month,
            year: entry.year,
            amount: entry.amount,
        }
    }
}
