//! mockboard: a single-binary analytics dashboard over generated mock data.
//!
//! The data core is three pieces: [`series`] (six-month random-walk metric
//! series with spikes), [`logs`] (a batch of synthetic log records) and
//! [`logs::filter`] (case-insensitive substring filtering). Everything else
//! presents that data: the embedded [`web`] dashboard, the [`cli`] commands,
//! the persisted theme in [`settings`] and best-effort [`telemetry`].

pub mod cli;
pub mod config;
pub mod dashboard;
pub mod journal;
pub mod logs;
pub mod random;
pub mod series;
pub mod settings;
pub mod telemetry;
pub mod web;
