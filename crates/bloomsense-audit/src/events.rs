use serde::Serialize;

/// Something that happened to a clinical record.
///
/// Emitted through `tracing` under the `audit` target so a subscriber can
/// route these separately from ordinary request logs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AuditEvent {
    pub action: AuditAction,
    pub resource_type: String,
    pub resource_id: String,
    /// Patient the record belongs to.
    pub patient_id: String,
    pub details: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditAction {
    Created,
    Read,
    Exported,
}

impl AuditAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuditAction::Created => "created",
            AuditAction::Read => "read",
            AuditAction::Exported => "exported",
        }
    }
}

impl AuditEvent {
    pub fn new(
        action: AuditAction,
        resource_type: impl Into<String>,
        resource_id: impl Into<String>,
        patient_id: impl Into<String>,
    ) -> Self {
        Self {
            action,
            resource_type: resource_type.into(),
            resource_id: resource_id.into(),
            patient_id: patient_id.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }

    pub fn emit(&self) {
        let details = self
            .details
            .as_ref()
            .map(|d| d.to_string())
            .unwrap_or_default();
        tracing::event!(
            target: "audit",
            tracing::Level::INFO,
            audit.action = self.action.as_str(),
            audit.resource_type = %self.resource_type,
            audit.resource_id = %self.resource_id,
            audit.patient_id = %self.patient_id,
            audit.details = %details,
            "audit event"
        );
    }
}
