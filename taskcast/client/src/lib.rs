//! Client-side library for the taskcast service.
//!
//! The pieces mirror what a front end needs: [`store::TaskStore`] keeps a
//! locally cached, filtered view of one owner's tasks synchronized with the
//! server, [`auth::AuthSession`] holds the logged-in user, and
//! [`weather`] talks to the external weather provider used to annotate
//! outdoor tasks. Server access goes through the [`api::TaskApi`] trait so
//! everything above it can be tested against a mock.

pub mod api;
pub mod auth;
pub mod store;
pub mod weather;
