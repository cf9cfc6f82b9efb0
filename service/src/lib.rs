//! Service contains the business logic of the interview trainer: the
//! [`Question`] store operations and the in-memory practice [`Session`]s.
//!
//! [`Question`]: domain::Question
//! [`Session`]: domain::Session
//!
//! List of available Cargo features:
#![doc = document_features::document_features!()]
#![deny(
    nonstandard_style,
    rust_2018_idioms,
    rustdoc::all,
    trivial_casts,
    trivial_numeric_casts,
    unsafe_code
)]
#![forbid(non_ascii_idents)]
#![warn(
    clippy::allow_attributes,
    clippy::allow_attributes_without_reason,
    clippy::pedantic,
    clippy::wildcard_enum_match_arm,
    deprecated_in_future,
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs,
    unreachable_pub,
    unused_crate_dependencies,
    unused_import_braces,
    unused_labels,
    unused_lifetimes,
    unused_qualifications,
    unused_results
)]

pub mod command;
pub mod domain;
pub mod infra;
pub mod query;
pub mod read;
pub mod task;

use common::operations::{By, Start};
use derive_more::Debug;

#[cfg(doc)]
use infra::Database;
use infra::{sessions, Sessions};

pub use self::{command::Command, query::Query, task::Task};

/// [`Service`] configuration.
#[derive(Clone, Copy, Debug, Default)]
pub struct Config {
    /// [`Sessions`] configuration.
    pub sessions: sessions::Config,

    /// [`task::SweepExpiredSessions`] configuration.
    ///
    /// [`None`] disables the [`task::SweepExpiredSessions`] at all.
    pub sweep_expired_sessions: Option<task::sweep_expired_sessions::Config>,
}

/// Domain service.
#[derive(Clone, Debug)]
pub struct Service<Db> {
    /// Configuration of this [`Service`].
    config: Config,

    /// [`Database`] of this [`Service`].
    database: Db,

    /// Live practice [`Sessions`] of this [`Service`].
    sessions: Sessions,
}

impl<Db> Service<Db> {
    /// Creates a new [`Service`] with the provided parameters.
    pub fn new(config: Config, database: Db) -> (Self, task::Background)
    where
        Self: Task<
                Start<
                    By<
                        task::SweepExpiredSessions<Self>,
                        task::sweep_expired_sessions::Config,
                    >,
                >,
                Ok = (),
                Err: std::error::Error,
            > + Clone
            + 'static,
    {
        let this = Service {
            config,
            database,
            sessions: Sessions::new(config.sessions),
        };

        let mut bg = task::Background::default();
        if let Some(sweep) = config.sweep_expired_sessions {
            let svc = this.clone();
            bg.spawn("SweepExpiredSessions", async move {
                svc.execute(Start(By::new(sweep))).await
            });
        }

        (this, bg)
    }

    /// Returns [`Config`] of this [`Service`].
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns [`Database`] of this [`Service`].
    #[must_use]
    pub fn database(&self) -> &Db {
        &self.database
    }

    /// Returns live practice [`Sessions`] of this [`Service`].
    #[must_use]
    pub fn sessions(&self) -> &Sessions {
        &self.sessions
    }
}
