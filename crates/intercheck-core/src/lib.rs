//! Client-side state synchronization for the Intercheck dashboard.
//!
//! This crate keeps a dashboard in step with an Intercheck server and
//! does nothing else. Rendering is delegated to a [`UiAdapter`]:
//!
//! - **[`Dashboard`]**: the engine. [`start()`](Dashboard::start) spawns
//!   the status poller (every 5 s) and the summary refresher (hourly).
//!   User actions are [`force()`](Dashboard::force),
//!   [`field_changed()`](Dashboard::field_changed),
//!   [`reset_field()`](Dashboard::reset_field) and
//!   [`reset_all_settings()`](Dashboard::reset_all_settings).
//!
//! - **[`ForceController`]**: the `Idle`/`Forcing` state machine for
//!   user-requested speed tests.
//!
//! - **[`schedule`]**: cancel-then-arm timers and the trigger channels
//!   components use to ask a loop for an early run.
//!
//! - **Domain model** ([`model`]): status sets, summary snapshots and
//!   settings fields, converted from the `intercheck-api` wire types.

pub mod config;
pub mod dashboard;
pub mod error;
pub mod force;
pub mod model;
pub mod schedule;
pub mod ui;

// ── Primary re-exports ──────────────────────────────────────────────
pub use config::{DashboardConfig, FieldSpec, default_fields};
pub use dashboard::{Dashboard, ForceOutcome};
pub use error::CoreError;
pub use force::{ForceController, ForceRefusal, ForceState};
pub use schedule::{LoopHandle, Trigger};
pub use ui::{UiAdapter, messages};

pub use model::{
    DEFAULT_SENTINEL, RawInput, SettingField, SettingKind, SettingPayload, SettingValue,
    StatusSet, StatusTag, SummaryMetric, SummarySnapshot,
};
