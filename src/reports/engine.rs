//! The aggregation engine: pure functions that turn a set of transactions
//! into totals, summaries, category rankings, trends and chart series.
//!
//! Every function here is total and deterministic. Empty input produces
//! zeroed output rather than an error, and every division is guarded so the
//! engine never emits NaN or infinities. Nothing in this module does I/O, so
//! the functions are safe to call from any number of request handlers at
//! once.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::models::{Category, DatabaseID, Transaction, TransactionType};

/// The maximum number of entries in each ranked category list.
pub const ANALYSIS_LIMIT: usize = 5;

/// The weekday labels used for weekly charts, starting at Sunday.
pub const WEEKDAY_LABELS: [&str; 7] = [
    "Minggu", "Senin", "Selasa", "Rabu", "Kamis", "Jumat", "Sabtu",
];

/// The sum of all transaction amounts.
pub fn sum_amounts(transactions: &[Transaction]) -> f64 {
    transactions.iter().map(Transaction::amount).sum()
}

/// The sum of amounts over transactions of the given type.
pub fn sum_amounts_of_type(transactions: &[Transaction], transaction_type: TransactionType) -> f64 {
    transactions
        .iter()
        .filter(|transaction| transaction.transaction_type() == transaction_type)
        .map(Transaction::amount)
        .sum()
}

/// Sum amounts per transaction type.
///
/// Only types that appear in `transactions` get a key, so empty input yields
/// an empty map.
pub fn summarize_by_type(transactions: &[Transaction]) -> BTreeMap<String, f64> {
    let mut summary = BTreeMap::new();

    for transaction in transactions {
        *summary
            .entry(transaction.transaction_type().as_str().to_owned())
            .or_insert(0.0) += transaction.amount();
    }

    summary
}

/// Sum amounts per category name.
///
/// `categories` maps category IDs to the categories themselves; transactions
/// whose category is not in the map are skipped.
pub fn summarize_by_category_name(
    transactions: &[Transaction],
    categories: &HashMap<DatabaseID, Category>,
) -> BTreeMap<String, f64> {
    let mut summary = BTreeMap::new();

    for transaction in transactions {
        let Some(category) = categories.get(&transaction.category_id()) else {
            continue;
        };

        *summary.entry(category.name().to_string()).or_insert(0.0) += transaction.amount();
    }

    summary
}

/// `amount` as a whole percentage of `total`, or `0` when `total` is zero.
pub fn percentage_of(amount: f64, total: f64) -> i64 {
    if total == 0.0 {
        0
    } else {
        (amount / total * 100.0).round() as i64
    }
}

/// The growth of `current` relative to `previous` as a whole percentage.
///
/// Returns `0` when `previous` is zero, since there is nothing to compare
/// against.
pub fn trend(current: f64, previous: f64) -> i64 {
    if previous == 0.0 {
        0
    } else {
        ((current - previous) / previous * 100.0).round() as i64
    }
}

/// The change in net balance relative to the previous period, as a whole
/// percentage of the previous period's absolute net balance.
///
/// Returns `0` when either previous total is zero, or when the previous
/// period exactly broke even. Because the denominator is the previous *net*
/// balance rather than a per-metric base, the value swings wildly when the
/// previous period was close to break-even; the formula is kept as-is for
/// compatibility with existing clients.
pub fn percentage_change(
    total_income: f64,
    total_expense: f64,
    prev_total_income: f64,
    prev_total_expense: f64,
) -> i64 {
    if prev_total_income == 0.0 || prev_total_expense == 0.0 {
        return 0;
    }

    let previous_net = prev_total_income - prev_total_expense;
    if previous_net == 0.0 {
        return 0;
    }

    let current_net = total_income - total_expense;

    ((current_net - previous_net) / previous_net.abs() * 100.0).round() as i64
}

/// One ranked entry of a category analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryAnalysis {
    /// The ID of the category.
    pub category_id: DatabaseID,
    /// The name of the category.
    pub category_name: String,
    /// The type of the category.
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    /// The summed amount recorded against the category.
    pub amount: f64,
    /// The category's share of its type's total, as a whole percentage.
    pub percentage: i64,
}

/// The top categories per type for a set of transactions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CategoryAnalysisReport {
    /// The top income categories, descending by amount.
    pub income: Vec<CategoryAnalysis>,
    /// The top expense categories, descending by amount.
    pub expense: Vec<CategoryAnalysis>,
}

/// Rank each type's categories by the amount recorded against them and keep
/// the top [ANALYSIS_LIMIT] per type.
///
/// Percentages are relative to the type's total over *all* of
/// `transactions`, not just the surviving top entries, so a truncated list
/// still reports each category's true share. Ties in amount keep the order
/// in which the categories first appear in `transactions`.
pub fn analyze_categories(
    transactions: &[Transaction],
    categories: &HashMap<DatabaseID, Category>,
) -> CategoryAnalysisReport {
    // Group amounts by category, remembering first-appearance order for the
    // tie-break.
    let mut order = Vec::new();
    let mut amounts: HashMap<DatabaseID, f64> = HashMap::new();

    for transaction in transactions {
        let amount = amounts.entry(transaction.category_id()).or_insert_with(|| {
            order.push(transaction.category_id());
            0.0
        });
        *amount += transaction.amount();
    }

    let total_income = sum_amounts_of_type(transactions, TransactionType::Income);
    let total_expense = sum_amounts_of_type(transactions, TransactionType::Expense);

    let mut report = CategoryAnalysisReport::default();

    for category_id in order {
        let Some(category) = categories.get(&category_id) else {
            continue;
        };

        let amount = amounts[&category_id];
        let (list, type_total) = match category.category_type() {
            TransactionType::Income => (&mut report.income, total_income),
            TransactionType::Expense => (&mut report.expense, total_expense),
        };

        list.push(CategoryAnalysis {
            category_id,
            category_name: category.name().to_string(),
            transaction_type: category.category_type(),
            amount,
            percentage: percentage_of(amount, type_total),
        });
    }

    for list in [&mut report.income, &mut report.expense] {
        // Vec::sort_by is stable, which preserves the insertion order of
        // equal amounts.
        list.sort_by(|a, b| b.amount.total_cmp(&a.amount));
        list.truncate(ANALYSIS_LIMIT);
    }

    report
}

/// One time bucket of a chart series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bucket {
    /// The label for the bucket, e.g. an hour or a weekday name.
    pub label: String,
    /// The summed income of transactions falling into the bucket.
    pub income: f64,
    /// The summed expense of transactions falling into the bucket.
    pub expense: f64,
}

/// Group transactions into 24 hour-of-day buckets labelled `0:00` to `23:00`.
///
/// Always returns all 24 buckets; hours with no transactions are zero-filled.
pub fn bucket_by_hour(transactions: &[Transaction]) -> Vec<Bucket> {
    bucket_by(
        transactions,
        24,
        |hour| format!("{hour}:00"),
        |transaction| transaction.date().hour() as usize,
    )
}

/// Group transactions into 7 weekday buckets, Sunday first.
///
/// Always returns all 7 buckets; weekdays with no transactions are
/// zero-filled.
pub fn bucket_by_weekday(transactions: &[Transaction]) -> Vec<Bucket> {
    bucket_by(
        transactions,
        7,
        |index| WEEKDAY_LABELS[index].to_string(),
        |transaction| transaction.date().weekday().number_days_from_sunday() as usize,
    )
}

/// Group transactions into 12 month buckets labelled `1` to `12`.
///
/// Always returns all 12 buckets; months with no transactions are
/// zero-filled.
pub fn bucket_by_month(transactions: &[Transaction]) -> Vec<Bucket> {
    bucket_by(
        transactions,
        12,
        |index| (index + 1).to_string(),
        |transaction| transaction.date().month() as usize - 1,
    )
}

fn bucket_by(
    transactions: &[Transaction],
    bucket_count: usize,
    label: impl Fn(usize) -> String,
    bucket_index: impl Fn(&Transaction) -> usize,
) -> Vec<Bucket> {
    let mut buckets: Vec<Bucket> = (0..bucket_count)
        .map(|index| Bucket {
            label: label(index),
            income: 0.0,
            expense: 0.0,
        })
        .collect();

    for transaction in transactions {
        let bucket = &mut buckets[bucket_index(transaction)];
        match transaction.transaction_type() {
            TransactionType::Income => bucket.income += transaction.amount(),
            TransactionType::Expense => bucket.expense += transaction.amount(),
        }
    }

    buckets
}



#[cfg(test)]
mod category_analysis_tests {
    use std::collections::HashMap;

    use time::macros::datetime;

    use crate::models::{
        Category, CategoryName, DatabaseID, Transaction, TransactionType, UserID,
    };

    use super::{ANALYSIS_LIMIT, analyze_categories};

    fn transaction(
        id: DatabaseID,
        transaction_type: TransactionType,
        amount: f64,
        category_id: DatabaseID,
    ) -> Transaction {
        let date = datetime!(2024-06-01 12:00 UTC);
        Transaction::new_unchecked(
            id,
            transaction_type,
            amount,
            date,
            format!("Transaction {id}"),
            None,
            category_id,
            UserID::new(1),
            date,
        )
    }

    fn categories(
        names: &[(DatabaseID, &str, TransactionType)],
    ) -> HashMap<DatabaseID, Category> {
        names
            .iter()
            .map(|&(id, name, category_type)| {
                (
                    id,
                    Category::new(
                        id,
                        CategoryName::new_unchecked(name),
                        category_type,
                        None,
                        UserID::new(1),
                    ),
                )
            })
            .collect()
    }

    #[test]
    fn empty_input_produces_empty_lists() {
        let report = analyze_categories(&[], &HashMap::new());

        assert!(report.income.is_empty());
        assert!(report.expense.is_empty());
    }

    #[test]
    fn worked_example_percentages() {
        let categories = categories(&[
            (1, "Penjualan Produk", TransactionType::Income),
            (2, "Investasi Masuk", TransactionType::Income),
            (3, "Operasional", TransactionType::Expense),
        ]);
        let transactions = vec![
            transaction(1, TransactionType::Income, 8_000_000.0, 1),
            transaction(2, TransactionType::Income, 2_000_000.0, 2),
            transaction(3, TransactionType::Expense, 3_000_000.0, 3),
        ];

        let report = analyze_categories(&transactions, &categories);

        assert_eq!(report.income.len(), 2);
        assert_eq!(report.income[0].category_name, "Penjualan Produk");
        assert_eq!(report.income[0].amount, 8_000_000.0);
        assert_eq!(report.income[0].percentage, 80);
        assert_eq!(report.income[1].percentage, 20);
        assert_eq!(report.expense.len(), 1);
        assert_eq!(report.expense[0].percentage, 100);
    }

    #[test]
    fn amounts_per_type_sum_to_that_types_total() {
        let categories = categories(&[
            (1, "Penjualan Produk", TransactionType::Income),
            (2, "Investasi Masuk", TransactionType::Income),
        ]);
        let transactions = vec![
            transaction(1, TransactionType::Income, 120.0, 1),
            transaction(2, TransactionType::Income, 80.0, 2),
            transaction(3, TransactionType::Income, 55.0, 1),
        ];

        let report = analyze_categories(&transactions, &categories);

        let ranked_total: f64 = report.income.iter().map(|entry| entry.amount).sum();
        assert_eq!(ranked_total, 255.0);
    }

    #[test]
    fn lists_are_truncated_to_the_top_five() {
        let categories = categories(&[
            (1, "A", TransactionType::Expense),
            (2, "B", TransactionType::Expense),
            (3, "C", TransactionType::Expense),
            (4, "D", TransactionType::Expense),
            (5, "E", TransactionType::Expense),
            (6, "F", TransactionType::Expense),
        ]);
        let transactions: Vec<_> = (1..=6)
            .map(|id| transaction(id, TransactionType::Expense, 10.0 * id as f64, id))
            .collect();

        let report = analyze_categories(&transactions, &categories);

        assert_eq!(report.expense.len(), ANALYSIS_LIMIT);
        assert_eq!(report.expense[0].category_name, "F");
        // The smallest category, A, is the one cut.
        assert!(
            report
                .expense
                .iter()
                .all(|entry| entry.category_name != "A")
        );
    }

    #[test]
    fn equal_amounts_keep_first_appearance_order() {
        let categories = categories(&[
            (1, "Operasional", TransactionType::Expense),
            (2, "Transportasi", TransactionType::Expense),
            (3, "Gaji Karyawan", TransactionType::Expense),
        ]);
        let transactions = vec![
            transaction(1, TransactionType::Expense, 100.0, 1),
            transaction(2, TransactionType::Expense, 100.0, 2),
            transaction(3, TransactionType::Expense, 500.0, 3),
        ];

        let report = analyze_categories(&transactions, &categories);

        let names: Vec<&str> = report
            .expense
            .iter()
            .map(|entry| entry.category_name.as_str())
            .collect();
        assert_eq!(names, ["Gaji Karyawan", "Operasional", "Transportasi"]);
    }

    #[test]
    fn percentages_are_relative_to_the_full_type_total() {
        let categories = categories(&[
            (1, "A", TransactionType::Expense),
            (2, "B", TransactionType::Expense),
            (3, "C", TransactionType::Expense),
            (4, "D", TransactionType::Expense),
            (5, "E", TransactionType::Expense),
            (6, "F", TransactionType::Expense),
        ]);
        // Six equal categories: each is a sixth of the total even though only
        // five survive the cut.
        let transactions: Vec<_> = (1..=6)
            .map(|id| transaction(id, TransactionType::Expense, 60.0, id))
            .collect();

        let report = analyze_categories(&transactions, &categories);

        assert_eq!(report.expense.len(), 5);
        assert!(report.expense.iter().all(|entry| entry.percentage == 17));
    }
}
