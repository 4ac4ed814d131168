//! The default category set and the seeding routine that installs it.

use crate::{
    Error,
    models::{CategoryName, TransactionType, UserID},
    stores::CategoryStore,
};

/// The income category names every account starts with.
pub const DEFAULT_INCOME_CATEGORIES: [&str; 5] = [
    "Penjualan Produk",
    "Investasi Masuk",
    "Biaya Konsultasi",
    "Pendapatan Sewa",
    "Lainnya",
];

/// The expense category names every account starts with.
pub const DEFAULT_EXPENSE_CATEGORIES: [&str; 5] = [
    "Operasional",
    "Gaji Karyawan",
    "Transportasi",
    "Pembelian Kebutuhan",
    "Lainnya",
];

/// Seed the default categories for `user_id` if the user has none yet.
///
/// Does nothing when the user already has at least one category, so callers
/// may invoke this before every read without creating duplicates.
///
/// # Errors
///
/// This function will return an error if the category store fails.
pub fn ensure_default_categories<C>(category_store: &mut C, user_id: UserID) -> Result<(), Error>
where
    C: CategoryStore,
{
    if category_store.count_by_user(user_id)? > 0 {
        return Ok(());
    }

    for name in DEFAULT_INCOME_CATEGORIES {
        category_store.create(
            CategoryName::new_unchecked(name),
            TransactionType::Income,
            None,
            user_id,
        )?;
    }

    for name in DEFAULT_EXPENSE_CATEGORIES {
        category_store.create(
            CategoryName::new_unchecked(name),
            TransactionType::Expense,
            None,
            user_id,
        )?;
    }

    Ok(())
}
