// ── Status domain types ──
//
// The server reports its state as a bag of string tags. Presence is the
// whole signal: order and multiplicity carry no meaning.

use std::collections::BTreeSet;

use intercheck_api::StatusResponse;

/// Tags the dashboard knows how to interpret.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    strum::Display,
    strum::EnumString,
    strum::IntoStaticStr,
)]
#[strum(serialize_all = "lowercase")]
pub enum StatusTag {
    /// The server process is up.
    Init,
    /// Idle between speed tests.
    Waiting,
    /// A speed test is running (or has been requested).
    Testing,
    /// The last speed test succeeded.
    Connected,
    /// The last speed test failed.
    Disconnected,
}

impl StatusTag {
    /// Tags rendered as individual indicators. `init` only drives the
    /// overall connectivity message.
    pub const INDICATORS: [Self; 4] = [
        Self::Waiting,
        Self::Testing,
        Self::Connected,
        Self::Disconnected,
    ];

    pub fn as_str(self) -> &'static str {
        self.into()
    }
}

/// One poll's worth of status tags.
///
/// Built fresh from every response and never merged with an older set.
/// Unknown tags are kept (the server may grow new ones) but drive nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusSet {
    tags: BTreeSet<String>,
}

impl StatusSet {
    /// The set used when the server could not be reached.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_tags<I, S>(tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            tags: tags.into_iter().map(Into::into).collect(),
        }
    }

    pub fn contains(&self, tag: StatusTag) -> bool {
        self.tags.contains(tag.as_str())
    }

    /// `true` when the server reports itself initialized.
    pub fn is_online(&self) -> bool {
        self.contains(StatusTag::Init)
    }

    /// `true` while a speed test is running or pending.
    pub fn test_in_progress(&self) -> bool {
        self.contains(StatusTag::Testing)
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    /// Raw tags in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.tags.iter().map(String::as_str)
    }
}

impl From<StatusResponse> for StatusSet {
    fn from(resp: StatusResponse) -> Self {
        Self::from_tags(resp.status)
    }
}
