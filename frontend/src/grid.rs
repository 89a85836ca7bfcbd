//! Projection of the catalog and the year's entries into the grid that the
//! budget page renders. Everything here is derived from the entry collection;
//! nothing reads back from the DOM.

use rust_decimal::Decimal;

use crate::catalog::Catalog;
use crate::format::cell_input_value;
use crate::models::EntryKey;
use crate::store::BudgetStore;
use crate::summary::saturating_total;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SectionKind {
    Income,
    Expense,
}

impl SectionKind {
    pub fn css_class(&self) -> &'static str {
        match self {
            SectionKind::Income => "income",
            SectionKind::Expense => "expense",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct CellView {
    pub key: EntryKey,
    pub amount: Decimal,
    pub input_value: String,
    pub unsynced: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct RowView {
    pub subcategory: String,
    pub cells: Vec<CellView>,
    pub total: Decimal,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SectionView {
    pub name: String,
    pub kind: SectionKind,
    pub rows: Vec<RowView>,
    pub month_totals: Vec<Decimal>,
    pub total: Decimal,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct GridView {
    pub year: i32,
    pub sections: Vec<SectionView>,
}

#[cfg(test)]
impl GridView {
    pub fn cell(&self, key: &EntryKey) -> Option<&CellView> {
        self.sections
            .iter()
            .flat_map(|s| s.rows.iter())
            .flat_map(|r| r.cells.iter())
            .find(|c| &c.key == key)
    }
}

pub fn build_grid(catalog: &Catalog, store: &BudgetStore) -> GridView {
    let sections = catalog
        .categories()
        .iter()
        .map(|category| {
            let rows: Vec<RowView> = category
                .subcategories
                .iter()
                .map(|subcategory| {
                    let cells: Vec<CellView> = (1..=12)
                        .map(|month| {
                            let key = EntryKey::new(&category.name, subcategory, month);
                            let amount = store.amount(&key).unwrap_or(Decimal::ZERO);
                            CellView {
                                input_value: cell_input_value(amount),
                                unsynced: store.is_unsynced(&key),
                                key,
                                amount,
                            }
                        })
                        .collect();
                    let total = saturating_total(cells.iter().map(|c| c.amount));
                    RowView {
                        subcategory: subcategory.clone(),
                        cells,
                        total,
                    }
                })
                .collect();

            let month_totals: Vec<Decimal> = (0..12)
                .map(|i| saturating_total(rows.iter().map(|r| r.cells[i].amount)))
                .collect();
            let total = saturating_total(rows.iter().map(|r| r.total));

            SectionView {
                name: category.name.clone(),
                kind: if category.is_income {
                    SectionKind::Income
                } else {
                    SectionKind::Expense
                },
                rows,
                month_totals,
                total,
            }
        })
        .collect();

    GridView {
        year: store.year(),
        sections,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::tests::salary_and_rent;
    use crate::models::{BudgetEntry, Category};
    use crate::store::parse_amount;
    use rust_decimal_macros::dec;

    fn home_catalog() -> Catalog {
        Catalog::new(vec![Category {
            name: "HOME".to_string(),
            is_income: false,
            subcategories: vec!["Mortgage".to_string(), "Repairs".to_string()],
        }])
    }

    #[test]
    fn sections_and_rows_follow_catalog_order() {
        let grid = build_grid(&salary_and_rent(), &BudgetStore::new(2024));
        assert_eq!(grid.year, 2024);
        assert_eq!(grid.sections.len(), 2);
        assert_eq!(grid.sections[0].name, "Salary");
        assert_eq!(grid.sections[0].kind, SectionKind::Income);
        assert_eq!(grid.sections[1].kind.css_class(), "expense");
        assert_eq!(grid.sections[1].rows[0].subcategory, "Apartment");
        let months: Vec<u32> = grid.sections[0].rows[0].cells.iter().map(|c| c.key.month).collect();
        assert_eq!(months, (1..=12).collect::<Vec<u32>>());
    }

    #[test]
    fn last_write_wins_in_rendered_cell() {
        let mut store = BudgetStore::new(2024);
        let key = EntryKey::new("HOME", "Repairs", 3);
        for raw in ["10", "25.5", "7"] {
            store.upsert(&key, parse_amount(raw));
        }

        let grid = build_grid(&home_catalog(), &store);
        let cell = grid.cell(&key).unwrap();
        assert_eq!(cell.amount, dec!(7));
        assert_eq!(cell.input_value, "7");
        assert_eq!(store.entries().len(), 1);
    }

    #[test]
    fn row_total_sums_all_twelve_months() {
        let mut store = BudgetStore::new(2024);
        store.upsert(&EntryKey::new("HOME", "Mortgage", 1), dec!(1500));
        store.upsert(&EntryKey::new("HOME", "Mortgage", 6), dec!(1500.25));
        store.upsert(&EntryKey::new("HOME", "Mortgage", 12), parse_amount(""));

        let grid = build_grid(&home_catalog(), &store);
        let row = &grid.sections[0].rows[0];
        let summed: Decimal = row.cells.iter().map(|c| c.amount).sum();
        assert_eq!(row.total, dec!(3000.25));
        assert_eq!(row.total, summed);
        assert_eq!(grid.sections[0].rows[1].total, Decimal::ZERO);
    }

    #[test]
    fn blank_input_renders_as_placeholder() {
        let mut store = BudgetStore::new(2024);
        let key = EntryKey::new("Rent", "Apartment", 1);
        store.upsert(&key, parse_amount(""));

        let grid = build_grid(&salary_and_rent(), &store);
        let cell = grid.cell(&key).unwrap();
        assert_eq!(cell.amount, Decimal::ZERO);
        assert_eq!(cell.input_value, "");
        assert_eq!(grid.sections[1].rows[0].total, Decimal::ZERO);
    }

    #[test]
    fn column_totals_add_rows_per_month() {
        let mut store = BudgetStore::new(2024);
        store.upsert(&EntryKey::new("HOME", "Mortgage", 2), dec!(1000));
        store.upsert(&EntryKey::new("HOME", "Repairs", 2), dec!(120.50));
        store.upsert(&EntryKey::new("HOME", "Repairs", 3), dec!(30));

        let grid = build_grid(&home_catalog(), &store);
        let section = &grid.sections[0];
        assert_eq!(section.month_totals.len(), 12);
        assert_eq!(section.month_totals[1], dec!(1120.50));
        assert_eq!(section.month_totals[2], dec!(30));
        assert_eq!(section.month_totals[0], Decimal::ZERO);
        assert_eq!(section.total, dec!(1150.50));
    }

    #[test]
    fn unsynced_cells_are_flagged() {
        let mut store = BudgetStore::new(2024);
        store.replace(
            2024,
            vec![BudgetEntry {
                category: "HOME".to_string(),
                subcategory: "Mortgage".to_string(),
                month: 1,
                year: 2024,
                amount: dec!(900),
            }],
        );
        let edited = EntryKey::new("HOME", "Mortgage", 2);
        store.upsert(&edited, dec!(900));

        let grid = build_grid(&home_catalog(), &store);
        assert!(grid.cell(&edited).unwrap().unsynced);
        assert!(!grid.cell(&EntryKey::new("HOME", "Mortgage", 1)).unwrap().unsynced);
    }

    #[test]
    fn huge_cells_clamp_row_and_column_totals() {
        let mut store = BudgetStore::new(2024);
        let huge = parse_amount("79228162514264337593543950335");
        store.upsert(&EntryKey::new("HOME", "Mortgage", 1), huge);
        store.upsert(&EntryKey::new("HOME", "Mortgage", 2), huge);
        store.upsert(&EntryKey::new("HOME", "Repairs", 1), huge);

        let grid = build_grid(&home_catalog(), &store);
        let section = &grid.sections[0];
        assert_eq!(section.rows[0].total, Decimal::MAX);
        assert_eq!(section.rows[1].total, Decimal::MAX);
        assert_eq!(section.month_totals[0], Decimal::MAX);
        assert_eq!(section.month_totals[1], Decimal::MAX);
        assert_eq!(section.total, Decimal::MAX);
    }

    #[test]
    fn rebuilding_is_idempotent() {
        let mut store = BudgetStore::new(2024);
        store.upsert(&EntryKey::new("Salary", "Base", 5), dec!(5000));
        let catalog = salary_and_rent();
        assert_eq!(build_grid(&catalog, &store), build_grid(&catalog, &store));
    }
}
