//! Classification results reported by the remote service.

use serde::{Deserialize, Serialize};

/// Conversation-level verdict. The service is the only authority for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ScamStatus {
    #[default]
    Ongoing,
    ScamConfirmed,
}

impl ScamStatus {
    /// Derives the status from the boolean flag stored with a session.
    pub fn from_is_scam(is_scam: bool) -> Self {
        if is_scam {
            Self::ScamConfirmed
        } else {
            Self::Ongoing
        }
    }

    /// Parses the `scam_status` string of a message reply.
    ///
    /// Anything other than `SCAM_CONFIRMED` counts as still ongoing.
    pub fn from_wire(value: &str) -> Self {
        if value == "SCAM_CONFIRMED" {
            Self::ScamConfirmed
        } else {
            Self::Ongoing
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ongoing => "ONGOING",
            Self::ScamConfirmed => "SCAM_CONFIRMED",
        }
    }

    /// Human-readable form shown in the analysis panel.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Ongoing => "ONGOING",
            Self::ScamConfirmed => "SCAM CONFIRMED",
        }
    }
}

/// Identifiers the remote classifier pulled out of a conversation.
///
/// Every field is independently present or absent.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractedData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upi: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phones: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emails: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub links: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_requests: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scam_type: Option<String>,
}

impl ExtractedData {
    /// True when no field carries anything worth showing.
    pub fn is_empty(&self) -> bool {
        self.artifact_groups().iter().all(|(_, values)| values.is_empty())
            && self.scam_type_label().is_none()
    }

    /// The scam classification, only when the service filled it in.
    pub fn scam_type_label(&self) -> Option<&str> {
        self.scam_type.as_deref().filter(|s| !s.is_empty())
    }

    /// Labelled artifact lists in display order. Absent fields yield empty slices.
    pub fn artifact_groups(&self) -> [(&'static str, &[String]); 5] {
        fn values(field: &Option<Vec<String>>) -> &[String] {
            field.as_deref().unwrap_or(&[])
        }

        [
            ("UPI IDs", values(&self.upi)),
            ("Phone Numbers", values(&self.phones)),
            ("Emails", values(&self.emails)),
            ("Links", values(&self.links)),
            ("Payment Requests", values(&self.payment_requests)),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_from_wire() {
        assert_eq!(ScamStatus::from_wire("SCAM_CONFIRMED"), ScamStatus::ScamConfirmed);
        assert_eq!(ScamStatus::from_wire("ONGOING"), ScamStatus::Ongoing);
        assert_eq!(ScamStatus::from_wire("something-new"), ScamStatus::Ongoing);
        assert_eq!(ScamStatus::from_is_scam(true).as_str(), "SCAM_CONFIRMED");
    }

    #[test]
    fn test_extracted_partial_fields() {
        let data: ExtractedData = serde_json::from_str(r#"{"upi":["x@upi"]}"#).unwrap();
        assert_eq!(data.upi, Some(vec!["x@upi".to_string()]));
        assert!(data.phones.is_none());
        assert!(!data.is_empty());
    }

    #[test]
    fn test_blank_scam_type_is_hidden() {
        let data = ExtractedData {
            scam_type: Some(String::new()),
            upi: Some(vec![]),
            ..Default::default()
        };
        assert!(data.scam_type_label().is_none());
        assert!(data.is_empty());
    }
}
