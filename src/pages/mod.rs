//! Routed Pages

mod login;
mod register;
mod forgot_password;
mod dashboard;
mod old_lists;
mod account;

pub use login::Login;
pub use register::Register;
pub use forgot_password::ForgotPassword;
pub use dashboard::Dashboard;
pub use old_lists::OldLists;
pub use account::Account;
