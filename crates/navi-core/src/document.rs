//! Verification documents a driver must hold.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    IdDocument,
    Passport,
    BackgroundCheck,
    SecurityTraining,
    FirearmCertificate,
}

impl DocumentKind {
    pub const ALL: [Self; 5] = [
        Self::IdDocument,
        Self::Passport,
        Self::BackgroundCheck,
        Self::SecurityTraining,
        Self::FirearmCertificate,
    ];

    pub const fn is_required(self) -> bool {
        matches!(self, Self::IdDocument | Self::Passport | Self::BackgroundCheck)
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::IdDocument => "ID Documents",
            Self::Passport => "Passport",
            Self::BackgroundCheck => "Background Check",
            Self::SecurityTraining => "Security Training Certificate",
            Self::FirearmCertificate => "Firearm Use Certificate",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentStatus {
    #[default]
    Missing,
    Pending,
    Approved,
    Rejected,
    Expired,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DriverDocument {
    pub kind: DocumentKind,
    pub status: DocumentStatus,
}

/// Status of every document kind for one driver.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentChecklist {
    documents: Vec<DriverDocument>,
}

impl Default for DocumentChecklist {
    fn default() -> Self {
        Self {
            documents: DocumentKind::ALL
                .into_iter()
                .map(|kind| DriverDocument {
                    kind,
                    status: DocumentStatus::Missing,
                })
                .collect(),
        }
    }
}

impl DocumentChecklist {
    pub fn status(&self, kind: DocumentKind) -> DocumentStatus {
        self.documents
            .iter()
            .find(|d| d.kind == kind)
            .map_or(DocumentStatus::Missing, |d| d.status)
    }

    pub fn set_status(&mut self, kind: DocumentKind, status: DocumentStatus) {
        if let Some(doc) = self.documents.iter_mut().find(|d| d.kind == kind) {
            doc.status = status;
        } else {
            self.documents.push(DriverDocument { kind, status });
        }
    }

    /// Required documents that are not yet approved.
    pub fn outstanding(&self) -> Vec<DocumentKind> {
        DocumentKind::ALL
            .into_iter()
            .filter(|kind| kind.is_required() && self.status(*kind) != DocumentStatus::Approved)
            .collect()
    }

    pub fn is_complete(&self) -> bool {
        self.outstanding().is_empty()
    }
}
