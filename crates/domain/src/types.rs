// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Generates a newtype identifier around the canonical database row id.
macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug,
            Clone,
            Copy,
            Default,
            PartialEq,
            Eq,
            Hash,
            PartialOrd,
            Ord,
            Serialize,
            Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            /// Wraps a canonical row identifier.
            #[must_use]
            pub const fn new(value: i64) -> Self {
                Self(value)
            }

            /// Returns the canonical row identifier.
            #[must_use]
            pub const fn value(self) -> i64 {
                self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

entity_id! {
    /// Identifies a player.
    PlayerId
}

entity_id! {
    /// Identifies a fantasy team.
    TeamId
}

entity_id! {
    /// Identifies a matchday.
    MatchDayId
}

entity_id! {
    /// Identifies a real-world club.
    ClubId
}

/// The playing position of a player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Position {
    /// Any outfield position.
    Field,
    /// Goalkeeper.
    Goalkeeper,
}

impl Position {
    /// Converts this position to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Field => "Field",
            Self::Goalkeeper => "Goalkeeper",
        }
    }
}

impl FromStr for Position {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Field" | "field" => Ok(Self::Field),
            "Goalkeeper" | "goalkeeper" => Ok(Self::Goalkeeper),
            _ => Err(DomainError::InvalidPosition(s.to_string())),
        }
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A real-world club players are affiliated with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Club {
    /// The canonical club identifier.
    pub club_id: ClubId,
    /// The club name.
    pub name: String,
}

/// A player that can be drafted into fantasy teams.
///
/// The club reference is weak: deleting a club leaves the player in place
/// with no affiliation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    /// The canonical player identifier.
    pub player_id: PlayerId,
    /// The player's name.
    pub name: String,
    /// The player's position.
    pub position: Position,
    /// The club the player belongs to, if any.
    pub club_id: Option<ClubId>,
}

/// Raw counted events for one player in one matchday.
///
/// A record is never partially updated. A correction replaces the whole
/// record for its `(player, matchday)` key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StatsRecord {
    /// The player these stats belong to.
    pub player_id: PlayerId,
    /// The matchday these stats were recorded in.
    pub matchday_id: MatchDayId,
    pub goals: u32,
    pub assists: u32,
    pub blocks: u32,
    pub steals: u32,
    /// Personal fouls drawn.
    pub pf_drawn: u32,
    pub saves: u32,
    pub wins: u32,
    /// Personal fouls committed.
    pub pf: u32,
    pub balls_lost: u32,
    pub contra_fouls: u32,
    pub brutality: u32,
}

impl StatsRecord {
    /// Creates an all-zero record for the given key.
    #[must_use]
    pub fn empty(player_id: PlayerId, matchday_id: MatchDayId) -> Self {
        Self {
            player_id,
            matchday_id,
            ..Self::default()
        }
    }

    /// Returns true when every counted event is zero.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.goals == 0
            && self.assists == 0
            && self.blocks == 0
            && self.steals == 0
            && self.pf_drawn == 0
            && self.saves == 0
            && self.wins == 0
            && self.pf == 0
            && self.balls_lost == 0
            && self.contra_fouls == 0
            && self.brutality == 0
    }
}

/// A non-negative rational score multiplier.
///
/// Stored in lowest terms so that equal values compare equal. Serialized as
/// its display string (`"3/2"`, `"2"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct Multiplier {
    numerator: u32,
    denominator: u32,
}

/// Maximum number of fractional digits accepted when parsing a decimal multiplier.
const MAX_MULTIPLIER_DECIMALS: usize = 6;

const fn gcd(mut a: u64, mut b: u64) -> u64 {
    while b != 0 {
        let t: u64 = a % b;
        a = b;
        b = t;
    }
    a
}

impl Multiplier {
    /// The identity multiplier.
    pub const ONE: Self = Self {
        numerator: 1,
        denominator: 1,
    };

    /// Creates a multiplier from a fraction.
    ///
    /// # Errors
    ///
    /// Returns an error if `denominator` is zero.
    pub fn new(numerator: u32, denominator: u32) -> Result<Self, DomainError> {
        if denominator == 0 {
            return Err(DomainError::InvalidMultiplier(format!(
                "{numerator}/{denominator}: denominator must be positive"
            )));
        }
        Self::reduced(u64::from(numerator), u64::from(denominator))
    }

    fn reduced(numerator: u64, denominator: u64) -> Result<Self, DomainError> {
        let divisor: u64 = gcd(numerator, denominator).max(1);
        let numerator: u32 = u32::try_from(numerator / divisor).map_err(|_| {
            DomainError::InvalidMultiplier(format!("{numerator}/{denominator} is out of range"))
        })?;
        let denominator: u32 = u32::try_from(denominator / divisor).map_err(|_| {
            DomainError::InvalidMultiplier(format!("{numerator}/{denominator} is out of range"))
        })?;
        Ok(Self {
            numerator,
            denominator,
        })
    }

    /// Returns the numerator in lowest terms.
    #[must_use]
    pub const fn numerator(&self) -> u32 {
        self.numerator
    }

    /// Returns the denominator in lowest terms (always positive).
    #[must_use]
    pub const fn denominator(&self) -> u32 {
        self.denominator
    }

    /// Returns true if the multiplier is zero.
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.numerator == 0
    }
}

impl Default for Multiplier {
    fn default() -> Self {
        Self::ONE
    }
}

impl FromStr for Multiplier {
    type Err = DomainError;

    /// Parses `"2"`, `"1.5"` or `"3/2"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed: &str = s.trim();
        let invalid = |reason: &str| DomainError::InvalidMultiplier(format!("'{s}': {reason}"));

        if trimmed.is_empty() {
            return Err(invalid("value is empty"));
        }

        if let Some((num, den)) = trimmed.split_once('/') {
            let numerator: u32 = num
                .trim()
                .parse()
                .map_err(|_| invalid("numerator is not a non-negative integer"))?;
            let denominator: u32 = den
                .trim()
                .parse()
                .map_err(|_| invalid("denominator is not a positive integer"))?;
            return Self::new(numerator, denominator);
        }

        let (whole, fraction): (&str, &str) = trimmed.split_once('.').unwrap_or((trimmed, ""));
        if fraction.len() > MAX_MULTIPLIER_DECIMALS {
            return Err(invalid("too many decimal places"));
        }
        if whole.is_empty() && fraction.is_empty() {
            return Err(invalid("no digits"));
        }
        if !whole.chars().chain(fraction.chars()).all(|c| c.is_ascii_digit()) {
            return Err(invalid("not a non-negative decimal number"));
        }

        let digits: String = format!("{whole}{fraction}");
        let numerator: u64 = digits
            .parse()
            .map_err(|_| invalid("value is out of range"))?;
        let exponent: u32 = u32::try_from(fraction.len()).map_err(|_| invalid("bad exponent"))?;
        let denominator: u64 = 10_u64.pow(exponent);
        Self::reduced(numerator, denominator)
    }
}

impl From<Multiplier> for String {
    fn from(multiplier: Multiplier) -> Self {
        multiplier.to_string()
    }
}

impl TryFrom<String> for Multiplier {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl std::fmt::Display for Multiplier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.denominator == 1 {
            write!(f, "{}", self.numerator)
        } else {
            write!(f, "{}/{}", self.numerator, self.denominator)
        }
    }
}

/// Configuration of one matchday.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchDayConfig {
    /// The canonical matchday identifier.
    pub matchday_id: MatchDayId,
    /// A display label, e.g. "Round 3".
    pub label: String,
    /// Applied uniformly to every score computed for this matchday.
    pub multiplier: Multiplier,
}

impl MatchDayConfig {
    /// Creates a matchday configuration.
    #[must_use]
    pub const fn new(matchday_id: MatchDayId, label: String, multiplier: Multiplier) -> Self {
        Self {
            matchday_id,
            label,
            multiplier,
        }
    }
}
