use strum::{Display, IntoStaticStr};

/// The kinds of source files understood by the loader.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, IntoStaticStr)]
pub enum RecordKind {
    Author,
    Paper,
    PaperAuthor,
    Conference,
    Journal,
    ConferenceCluster,
    JournalCluster,
}

impl RecordKind {
    /// Name of the source file holding records of this kind.
    #[must_use]
    pub const fn csv_name(self) -> &'static str {
        match self {
            Self::Author => "Author.csv",
            Self::Paper => "Paper.csv",
            Self::PaperAuthor => "PaperAuthor.csv",
            Self::Conference => "Conference.csv",
            Self::Journal => "Journal.csv",
            Self::ConferenceCluster => "ConferenceCluster.csv",
            Self::JournalCluster => "JournalCluster.csv",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_csv_name_matches_display() {
        for kind in [
            RecordKind::Author,
            RecordKind::Paper,
            RecordKind::PaperAuthor,
            RecordKind::Conference,
            RecordKind::Journal,
            RecordKind::ConferenceCluster,
            RecordKind::JournalCluster,
        ] {
            assert_eq!(kind.csv_name(), format!("{kind}.csv"));
        }
    }
}
