// ── Domain model ──
//
// Canonical types shared by the engine and its front ends. Wire types
// from `intercheck-api` are converted here and never leak further.

pub mod setting;
pub mod status;
pub mod summary;

pub use setting::{
    DEFAULT_SENTINEL, RawInput, SettingField, SettingKind, SettingPayload, SettingValue,
};
pub use status::{StatusSet, StatusTag};
pub use summary::{SummaryMetric, SummarySnapshot};
