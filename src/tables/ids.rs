use core::fmt::{Display, Formatter, Result as FmtResult};
use serde::Serialize;

macro_rules! define_ids {
    ($($name:ident),* $(,)?) => {
        $(
            #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
            #[serde(transparent)]
            pub struct $name(pub u32);

            impl From<u32> for $name {
                fn from(value: u32) -> Self {
                    Self(value)
                }
            }

            impl Display for $name {
                fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
                    Display::fmt(&self.0, f)
                }
            }
        )*
    };
}

define_ids!(AuthorId, PaperId, ConferenceId, JournalId);

/// Position of a row within the primary array of its table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TableIndex(usize);

impl TableIndex {
    #[must_use]
    pub const fn get(self) -> usize {
        self.0
    }
}

impl From<usize> for TableIndex {
    fn from(value: usize) -> Self {
        Self(value)
    }
}
