//! Application services for owner accounts and global role checks.

mod accounts;
mod policy;

pub use accounts::{
    AccountService, AccountServiceError, AccountServiceResult, RegisterOwnerRequest,
    UpdateOwnerRequest,
};
pub use policy::{AccessDenied, AdminAction, RolePolicy, acts_on_self};
