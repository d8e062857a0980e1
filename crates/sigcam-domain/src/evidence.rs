//! Provenance attached to emitted edges

use crate::terms;

/// Evidence backing an edge: evidence code, literature and curation metadata
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Evidence {
    /// Evidence ontology code
    pub code: String,

    /// Literature references, sorted and unique
    pub references: Vec<String>,

    /// Curator identifier, if known
    pub contributor: Option<String>,

    /// Free-text curation date, if known
    pub date: Option<String>,
}

impl Evidence {
    /// Experimental evidence with the given references
    pub fn experimental<I, S>(references: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::with_code(terms::EXPERIMENTAL_EVIDENCE, references)
    }

    /// Evidence with an explicit code
    pub fn with_code<I, S>(code: impl Into<String>, references: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut references: Vec<String> = references.into_iter().map(Into::into).collect();
        references.sort();
        references.dedup();
        Self {
            code: code.into(),
            references,
            contributor: None,
            date: None,
        }
    }

    /// Set the contributor
    pub fn with_contributor(mut self, contributor: Option<String>) -> Self {
        self.contributor = contributor;
        self
    }

    /// Set the date
    pub fn with_date(mut self, date: Option<String>) -> Self {
        self.date = date;
        self
    }
}
