//! Manages the authenticated user's account: fetching and editing the
//! profile, changing the password, and deleting the account outright.

mod delete_endpoint;
mod edit_endpoint;
mod me_endpoint;
mod password_endpoint;
mod profile_endpoint;

pub use delete_endpoint::delete_account;
pub use edit_endpoint::{EditAccountForm, edit_account};
pub use me_endpoint::get_me;
pub use password_endpoint::{ChangePasswordForm, change_password};
pub use profile_endpoint::{EditProfileForm, edit_profile};
