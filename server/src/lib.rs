// Life of a request:
// 1. JSON comes in over HTTP
// 2. Validate the body into a request DTO
// 3. For login / register:
//     - Look up or insert the user in the credential store
//     - Verify or hash the password
//     - Sign a token and respond with it
//    For protected routes:
//     - Verify the bearer token
//     - Resolve its subject in the credential store
//
// System components:
//  - Credential store
//  - Password hasher
//  - Token issuer
//  - Identity service orchestrating the three

pub mod auth;
pub mod config;
pub mod http;
pub mod identity;
pub mod store;
pub mod time;
pub mod types;

#[cfg(test)]
mod e2e_tests;

pub use identity::{AuthError, IdentityService};
pub use store::{CredentialStore, StoreError};
