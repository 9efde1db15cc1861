//! Assembly merger: nests independently built entity maps under a fixed
//! `{team, players} x {mens, womens}` taxonomy.

use serde::{Deserialize, Serialize};

use crate::catalog::{DatasetKind, League, Subject};
use crate::pipeline::DatasetOutcome;
use crate::record::EntityMap;
use crate::report::DatasetReport;

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Divisions {
    #[serde(default)]
    pub mens: EntityMap,
    #[serde(default)]
    pub womens: EntityMap,
}

impl Divisions {
    #[must_use]
    pub const fn get(&self, league: League) -> &EntityMap {
        match league {
            League::Mens => &self.mens,
            League::Womens => &self.womens,
        }
    }

    fn slot(&mut self, league: League) -> &mut EntityMap {
        match league {
            League::Mens => &mut self.mens,
            League::Womens => &mut self.womens,
        }
    }
}

/// The assembled result of a run.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct UsportsData {
    #[serde(default)]
    pub team: Divisions,
    #[serde(default)]
    pub players: Divisions,
    /// One report per dataset that was run, in the order they were recorded.
    #[serde(default)]
    pub completeness: Vec<DatasetReport>,
}

impl UsportsData {
    #[must_use]
    pub const fn get(&self, kind: DatasetKind) -> &EntityMap {
        match kind.subject {
            Subject::Team => self.team.get(kind.league),
            Subject::Player => self.players.get(kind.league),
        }
    }

    #[must_use]
    pub fn report(&self, kind: DatasetKind) -> Option<&DatasetReport> {
        self.completeness.iter().find(|report| report.dataset == kind)
    }

    /// True when every recorded dataset finished.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.completeness.iter().all(|report| report.complete)
    }
}

/// Collects dataset results in any order and produces [`UsportsData`].
#[derive(Debug, Default)]
pub struct Assembly {
    data: UsportsData,
}

impl Assembly {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Place `entities` under `kind`, returning whatever was there before.
    pub fn insert(&mut self, kind: DatasetKind, entities: EntityMap) -> Option<EntityMap> {
        let divisions = match kind.subject {
            Subject::Team => &mut self.data.team,
            Subject::Player => &mut self.data.players,
        };
        let previous = std::mem::replace(divisions.slot(kind.league), entities);
        if previous.is_empty() {
            None
        } else {
            log::warn!("{kind}: replacing {} previously assembled entities", previous.len());
            Some(previous)
        }
    }

    pub fn record(&mut self, report: DatasetReport) {
        self.data.completeness.push(report);
    }

    /// Take the data and report of one dataset run.
    pub fn absorb(&mut self, outcome: DatasetOutcome) {
        self.insert(outcome.kind, outcome.entities);
        self.record(outcome.report);
    }

    #[must_use]
    pub fn finish(mut self) -> UsportsData {
        self.data
            .completeness
            .sort_by_key(|report| report.dataset);
        self.data
    }
}

/// Merge independently produced maps in one call.
pub fn merge<I>(parts: I) -> UsportsData
where
    I: IntoIterator<Item = (DatasetKind, EntityMap)>,
{
    let mut assembly = Assembly::new();
    for (kind, entities) in parts {
        assembly.insert(kind, entities);
    }
    assembly.finish()
}
