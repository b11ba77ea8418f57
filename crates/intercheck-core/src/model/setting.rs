// ── Settings fields ──
//
// A field carries two values: what the user last asked for (pending) and
// what the server last said is in effect (canonical). Only the canonical
// value is ever displayed.

use std::fmt;

use serde::{Deserialize, Serialize, Serializer};

/// Sentinel asking the server to restore a field's default.
pub const DEFAULT_SENTINEL: &str = "default";

/// How a field's value is read and displayed.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum SettingKind {
    /// Checkbox: checked or unchecked.
    Boolean,
    /// Anything typed as text (numbers included).
    Scalar,
}

/// A concrete field value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum SettingValue {
    Bool(bool),
    Text(String),
}

impl fmt::Display for SettingValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{b}"),
            Self::Text(t) => f.write_str(t),
        }
    }
}

/// What the input widget reported when it changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawInput {
    Checked(bool),
    Text(String),
}

/// The value sent for one field in a `PUT /settings/`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingPayload {
    Value(SettingValue),
    /// Serialized as the string `"default"`.
    Default,
}

impl Serialize for SettingPayload {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Value(v) => v.serialize(serializer),
            Self::Default => serializer.serialize_str(DEFAULT_SENTINEL),
        }
    }
}

/// One editable setting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingField {
    name: String,
    kind: SettingKind,
    canonical: Option<SettingValue>,
    pending: Option<SettingPayload>,
    use_default: bool,
}

impl SettingField {
    pub fn new(name: impl Into<String>, kind: SettingKind) -> Self {
        Self {
            name: name.into(),
            kind,
            canonical: None,
            pending: None,
            use_default: false,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> SettingKind {
        self.kind
    }

    /// Last value acknowledged by the server.
    pub fn canonical(&self) -> Option<&SettingValue> {
        self.canonical.as_ref()
    }

    /// Value submitted and not yet answered.
    pub fn pending(&self) -> Option<&SettingPayload> {
        self.pending.as_ref()
    }

    /// Flag the next submission of this field as a reset to default.
    pub fn mark_default(&mut self) {
        self.use_default = true;
    }

    pub fn wants_default(&self) -> bool {
        self.use_default
    }

    /// Read a widget value according to the field kind.
    pub fn extract(&self, raw: &RawInput) -> SettingValue {
        match (self.kind, raw) {
            (SettingKind::Boolean, RawInput::Checked(b)) => SettingValue::Bool(*b),
            (SettingKind::Boolean, RawInput::Text(t)) => {
                SettingValue::Bool(t.trim().eq_ignore_ascii_case("true"))
            }
            (SettingKind::Scalar, RawInput::Checked(b)) => SettingValue::Text(b.to_string()),
            (SettingKind::Scalar, RawInput::Text(t)) => SettingValue::Text(t.clone()),
        }
    }

    /// The widget value matching the canonical value, as a change event
    /// fired without user input would read it.
    pub fn current_input(&self) -> RawInput {
        match (&self.canonical, self.kind) {
            (Some(SettingValue::Bool(b)), _) => RawInput::Checked(*b),
            (Some(SettingValue::Text(t)), _) => RawInput::Text(t.clone()),
            (None, SettingKind::Boolean) => RawInput::Checked(false),
            (None, SettingKind::Scalar) => RawInput::Text(String::new()),
        }
    }

    /// Build the outgoing payload and record it as pending.
    ///
    /// Consumes the reset-to-default marker: it applies to exactly one
    /// submission.
    pub fn take_payload(&mut self, raw: &RawInput) -> SettingPayload {
        let payload = if std::mem::take(&mut self.use_default) {
            SettingPayload::Default
        } else {
            SettingPayload::Value(self.extract(raw))
        };
        self.pending = Some(payload.clone());
        payload
    }

    /// Adopt the server's accepted value as canonical and return it.
    pub fn reconcile(&mut self, accepted: &serde_json::Value) -> SettingValue {
        let value = match self.kind {
            SettingKind::Boolean => SettingValue::Bool(json_truthy(accepted)),
            SettingKind::Scalar => SettingValue::Text(json_text(accepted)),
        };
        self.pending = None;
        self.canonical = Some(value.clone());
        value
    }

    /// Drop the pending value after a failed submission. The canonical
    /// value is untouched.
    pub fn abandon(&mut self) {
        self.pending = None;
    }
}

fn json_truthy(value: &serde_json::Value) -> bool {
    match value {
        serde_json::Value::Bool(b) => *b,
        serde_json::Value::String(s) => s.trim().eq_ignore_ascii_case("true"),
        serde_json::Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        _ => false,
    }
}

fn json_text(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Null => String::new(),
        other => other.to_string(),
    }
}
