//! Level stage: which severity a message number carries.

use super::RangeMap;
use crate::detail::Classified;
use crate::error::Unresolved;
use crate::level::Level;
use std::collections::HashMap;

/// How repeated level overrides in one call are resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverridePolicy {
    /// The last override in input order wins.
    #[default]
    LastWins,
    /// The first override wins; later ones are ignored.
    FirstWins,
}

/// Exact ids, id ranges, and a default, consulted in that order.
#[derive(Debug, Clone, Default)]
pub struct LevelTable {
    pub exact: HashMap<i64, Level>,
    pub ranges: RangeMap<Level>,
    pub default: Option<Level>,
    pub overrides: OverridePolicy,
}

impl LevelTable {
    /// The conventional numbering: each block of 1000 ids is one level, 6000 and up is Panic.
    #[must_use]
    pub fn standard_ranges() -> RangeMap<Level> {
        RangeMap::from([
            (0, Level::Trace),
            (1000, Level::Debug),
            (2000, Level::Info),
            (3000, Level::Warn),
            (4000, Level::Error),
            (5000, Level::Fatal),
            (6000, Level::Panic),
        ])
    }

    /// A table using [`Self::standard_ranges`] and nothing else.
    #[must_use]
    pub fn standard() -> Self {
        Self {
            ranges: Self::standard_ranges(),
            ..Self::default()
        }
    }

    fn lookup(&self, message_number: i64) -> Option<Level> {
        self.exact
            .get(&message_number)
            .or_else(|| self.ranges.get(message_number))
            .copied()
            .or(self.default)
    }
}

#[derive(Debug, Clone)]
pub enum LevelResolver {
    /// Never resolves; every call gets the fallback.
    Null,
    /// Every message has this level unless overridden.
    Static(Level),
    Table(LevelTable),
}

impl Default for LevelResolver {
    fn default() -> Self {
        Self::Table(LevelTable::standard())
    }
}

impl LevelResolver {
    /// Level used when nothing applies.
    pub const FALLBACK: Level = Level::Trace;

    /// Resolves the level for one call.
    ///
    /// # Errors
    /// [`Unresolved`] with [`Self::FALLBACK`] when no override, table entry, or default applies.
    pub fn resolve(
        &self,
        message_number: i64,
        details: &Classified<'_>,
    ) -> Result<Level, Unresolved<Level>> {
        let found = match self {
            Self::Null => None,
            Self::Static(level) => details.level().or(Some(*level)),
            Self::Table(table) => {
                let explicit = match table.overrides {
                    OverridePolicy::LastWins => details.level(),
                    OverridePolicy::FirstWins => details.first_level(),
                };
                explicit.or_else(|| table.lookup(message_number))
            }
        };

        found.ok_or(Unresolved {
            message_number,
            fallback: Self::FALLBACK,
        })
    }
}
