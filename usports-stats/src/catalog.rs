//! The U SPORTS basketball dataset definitions.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::layout::{DatasetLayout, LeadingField, StandingsLayout};
use crate::schema::{FieldCursor, FieldSchema, StatGroup, StatGroupCatalog};

pub const TEAM_FIELDS: &[&str] = &[
    "games_played",
    // Offense Shooting
    "field_goals",
    "field_goal_percentage",
    "three_pointers",
    "three_point_percentage",
    "free_throws",
    "free_throw_percentage",
    "points_per_game",
    // Offense Rebounding
    "off_rebounds_per_game",
    "def_rebounds_per_game",
    "total_rebounds_per_game",
    "rebound_margin_per_game",
    // Offense Ball Control
    "turnovers_per_game",
    "steals_per_game",
    "blocks_per_game",
    "assists_per_game",
    // Offense PF/EFF
    "fouls_per_game",
    "off_efficiency",
    "net_efficiency",
    // Defense Shooting
    "field_goals_against",
    "field_goals_percentage_against",
    "three_points_against",
    "three_points_percentage_against",
    "points_per_game_against",
    // Defense Rebounding
    "offensive_rebounds_per_game_against",
    "defensive_rebounds_per_game_against",
    "total_rebounds_per_game_against",
    "rebound_margin_per_game_against",
    // Defense Ball Control
    "turnovers_per_game_against",
    "steals_per_game_against",
    "blocks_per_game_against",
    "assists_per_game_against",
    // Defense PF/EFF
    "team_fouls_per_game_against",
    "def_efficiency",
    // Standings
    "total_wins",
    "total_losses",
    "ties",
    "win_percentage",
    "last_ten_games",
    "streak",
    "total_points",
    "total_points_against",
    "conference",
];

pub const TEAM_GROUPS: &[StatGroup] = &[
    StatGroup::new("Offense Shooting", 7, 0),
    StatGroup::new("Offense Rebounding", 4, 1),
    StatGroup::new("Offense Ball Control", 4, 2),
    StatGroup::new("Offense PF/EFF", 3, 3),
    StatGroup::new("Defense Shooting", 5, 4),
    StatGroup::new("Defense Rebounding", 4, 5),
    StatGroup::new("Defense Ball Control", 4, 6),
    StatGroup::new("Defense PF/EFF", 2, 7),
];

const TEAM_LEADING: &[LeadingField] = &[LeadingField::new(2, 0)];

pub const TEAM_LAYOUT: DatasetLayout = DatasetLayout {
    name: "team",
    schema: FieldSchema::new(TEAM_FIELDS),
    catalog: StatGroupCatalog::new(TEAM_GROUPS),
    name_column: 1,
    leading_fields: TEAM_LEADING,
    group_column_offset: 3,
    cursor_start: FieldCursor::new(1),
    trailing_reserved: 9,
    standings: Some(StandingsLayout {
        conference_segments: 6,
        standings_fields: 7,
        column_skip: 1,
        conference_offset: 8,
    }),
};

pub const PLAYER_FIELDS: &[&str] = &[
    "games_played",
    "games_started",
    // Offense
    "minutes_played",
    "field_goal_made",
    "field_goal_percentage",
    "three_pointers_made",
    "three_pointers_percentage",
    "free_throws_made",
    "free_throws_percentage",
    "total_points",
    // Defense
    "offensive_rebounds",
    "defensive_rebounds",
    "total_rebounds",
    "assists",
    "turnovers",
    "steals",
    "blocks",
    // Ball Control
    "personal_fouls",
    "disqualifications",
    "assist_to_turnover_ratio",
    "team",
];

pub const PLAYER_GROUPS: &[StatGroup] = &[
    StatGroup::new("Offense", 8, 3),
    StatGroup::new("Defense", 7, 4),
    StatGroup::new("Ball Control", 3, 5),
];

const PLAYER_LEADING: &[LeadingField] = &[
    LeadingField::new(3, 0),
    LeadingField::new(4, 1),
    LeadingField::new(2, 20),
];

pub const PLAYER_LAYOUT: DatasetLayout = DatasetLayout {
    name: "player",
    schema: FieldSchema::new(PLAYER_FIELDS),
    catalog: StatGroupCatalog::new(PLAYER_GROUPS),
    name_column: 1,
    leading_fields: PLAYER_LEADING,
    group_column_offset: 5,
    cursor_start: FieldCursor::new(2),
    trailing_reserved: 1,
    standings: None,
};

/// Player listings expose different column sets per sort order, so every
/// category is its own navigation batch.
pub const PLAYER_SORT_CATEGORIES: &[&str] = &[
    "gp", "gs", "min", "pts", "fgp", "fgpt", "fgp3", "fgpt3", "ftp", "ftpt", "oreb", "dreb",
    "treb", "ast", "to", "stl", "blk", "pf", "dq", "ato",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum League {
    Mens,
    Womens,
}

impl League {
    /// Sport code prefix used in listing locators (`m` / `w`).
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Mens => "m",
            Self::Womens => "w",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Subject {
    Team,
    Player,
}

/// One independent extraction pipeline: a subject for a league.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct DatasetKind {
    pub subject: Subject,
    pub league: League,
}

impl DatasetKind {
    pub const TEAM_MENS: Self = Self::new(Subject::Team, League::Mens);
    pub const TEAM_WOMENS: Self = Self::new(Subject::Team, League::Womens);
    pub const PLAYER_MENS: Self = Self::new(Subject::Player, League::Mens);
    pub const PLAYER_WOMENS: Self = Self::new(Subject::Player, League::Womens);

    pub const ALL: [Self; 4] = [
        Self::TEAM_MENS,
        Self::TEAM_WOMENS,
        Self::PLAYER_MENS,
        Self::PLAYER_WOMENS,
    ];

    #[must_use]
    pub const fn new(subject: Subject, league: League) -> Self {
        Self { subject, league }
    }

    #[must_use]
    pub fn layout(self) -> &'static DatasetLayout {
        match self.subject {
            Subject::Team => &TEAM_LAYOUT,
            Subject::Player => &PLAYER_LAYOUT,
        }
    }

    #[must_use]
    pub const fn key(self) -> &'static str {
        match (self.subject, self.league) {
            (Subject::Team, League::Mens) => "team-mens",
            (Subject::Team, League::Womens) => "team-womens",
            (Subject::Player, League::Mens) => "player-mens",
            (Subject::Player, League::Womens) => "player-womens",
        }
    }

    #[must_use]
    pub const fn description(self) -> &'static str {
        match (self.subject, self.league) {
            (Subject::Team, League::Mens) => "Men's team stats, standings and conferences",
            (Subject::Team, League::Womens) => "Women's team stats, standings and conferences",
            (Subject::Player, League::Mens) => "Men's player stats across every sort order",
            (Subject::Player, League::Womens) => "Women's player stats across every sort order",
        }
    }
}

impl fmt::Display for DatasetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for DatasetKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.key().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown dataset: {s}"))
    }
}
