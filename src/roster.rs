//! Character roster
//!
//! Presentation data only: the simulation stores a character id per avatar
//! and never looks at anything here.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{self, ConfigError};

/// A selectable character
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Character {
    pub id: u32,
    pub name: String,
    pub team: String,
    /// Jersey colors as CSS color strings (at least one)
    pub colors: Vec<String>,
}

impl Character {
    fn new(id: u32, name: &str, team: &str, colors: &[&str]) -> Self {
        Self {
            id,
            name: name.into(),
            team: team.into(),
            colors: colors.iter().map(|c| (*c).into()).collect(),
        }
    }
}

/// Ordered list of characters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Roster {
    characters: Vec<Character>,
}

impl Default for Roster {
    fn default() -> Self {
        Self {
            characters: vec![
                Character::new(0, "Striker", "Reds", &["#D32F2F"]),
                Character::new(1, "Keeper", "Blues", &["#1976D2", "#FFFFFF"]),
                Character::new(2, "Captain", "Tricolor", &["#00B5E2", "#EF3340", "#509E2F"]),
                Character::new(3, "Rookie", "Greens", &["#388E3C"]),
            ],
        }
    }
}

impl Roster {
    pub fn new(characters: Vec<Character>) -> Result<Self, ConfigError> {
        let roster = Self { characters };
        roster.validate()?;
        Ok(roster)
    }

    /// Parse a JSON array of characters
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let characters: Vec<Character> = serde_json::from_str(json)?;
        Self::new(characters)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::from_json(&error::read_to_string(path.as_ref())?)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.characters.is_empty() {
            return Err(ConfigError::invalid("roster is empty"));
        }
        for c in &self.characters {
            if c.colors.is_empty() {
                return Err(ConfigError::invalid(format!(
                    "character {} ({}) has no colors",
                    c.id, c.name
                )));
            }
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.characters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.characters.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Character> {
        self.characters.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Character> {
        self.characters.iter()
    }

    /// Step a selection index by `delta`, wrapping at both ends
    pub fn cycle(&self, index: usize, delta: i32) -> usize {
        let len = self.characters.len() as i64;
        if len == 0 {
            return 0;
        }
        (index as i64 + delta as i64).rem_euclid(len) as usize
    }
}
