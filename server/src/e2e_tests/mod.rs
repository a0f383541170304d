//! End-to-end tests at the HTTP request/response level.
//!
//! Each test file covers one endpoint, driving the full router (extractors,
//! validation, identity service, store) with deterministic inputs and a
//! manual clock.

#![cfg(test)]

mod helpers;

mod test_auth_login;
mod test_auth_profile;
mod test_auth_register;
mod test_auth_validate;
mod test_cors;
