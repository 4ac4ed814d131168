//! Chart payloads shared by the daily and weekly reports.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::models::{DatabaseID, Transaction, TransactionType};

use super::engine::Bucket;

/// The label of the income series in a chart.
pub const INCOME_SERIES_LABEL: &str = "Pemasukan";
/// The label of the expense series in a chart.
pub const EXPENSE_SERIES_LABEL: &str = "Pengeluaran";

/// A chart as consumed by the web client: one label per bucket and one
/// dataset per transaction type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chart {
    pub labels: Vec<String>,
    pub datasets: Vec<Dataset>,
}

/// One series of a [Chart].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    pub label: String,
    pub data: Vec<f64>,
}

impl Chart {
    /// Split time buckets into an income series and an expense series.
    pub fn from_buckets(buckets: &[Bucket]) -> Self {
        Self {
            labels: buckets.iter().map(|bucket| bucket.label.clone()).collect(),
            datasets: vec![
                Dataset {
                    label: INCOME_SERIES_LABEL.to_owned(),
                    data: buckets.iter().map(|bucket| bucket.income).collect(),
                },
                Dataset {
                    label: EXPENSE_SERIES_LABEL.to_owned(),
                    data: buckets.iter().map(|bucket| bucket.expense).collect(),
                },
            ],
        }
    }
}

/// A transaction as listed inside the daily and weekly reports.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportTransaction {
    pub id: DatabaseID,
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    pub amount: f64,
    pub name: String,
    #[serde(with = "time::serde::rfc3339")]
    pub date: OffsetDateTime,
}

impl From<&Transaction> for ReportTransaction {
    fn from(transaction: &Transaction) -> Self {
        Self {
            id: transaction.id(),
            transaction_type: transaction.transaction_type(),
            amount: transaction.amount(),
            name: transaction.name().to_owned(),
            date: transaction.date(),
        }
    }
}

#[cfg(test)]
mod chart_tests {
    use super::{Chart, EXPENSE_SERIES_LABEL, INCOME_SERIES_LABEL};
    use crate::reports::engine::Bucket;

    #[test]
    fn buckets_split_into_parallel_series() {
        let buckets = vec![
            Bucket {
                label: "0:00".to_owned(),
                income: 100.0,
                expense: 0.0,
            },
            Bucket {
                label: "1:00".to_owned(),
                income: 0.0,
                expense: 40.0,
            },
        ];

        let chart = Chart::from_buckets(&buckets);

        assert_eq!(chart.labels, ["0:00", "1:00"]);
        assert_eq!(chart.datasets.len(), 2);
        assert_eq!(chart.datasets[0].label, INCOME_SERIES_LABEL);
        assert_eq!(chart.datasets[0].data, [100.0, 0.0]);
        assert_eq!(chart.datasets[1].label, EXPENSE_SERIES_LABEL);
        assert_eq!(chart.datasets[1].data, [0.0, 40.0]);
    }
}
