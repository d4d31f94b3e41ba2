//! Read-only persona catalog.

use super::model::Persona;
use super::preset::{DISSENTER_ID, MEDIATOR_ID, SCHOLAR_ID, council_presets};
use crate::error::{ParliamentError, Result};
use std::collections::HashSet;

/// An ordered, immutable collection of council members.
///
/// Order is significant: discussion turns, idea lists and tallies all
/// follow catalog order. Once built the catalog exposes no mutators.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonaCatalog {
    personas: Vec<Persona>,
}

impl PersonaCatalog {
    /// The built-in eleven-member council.
    pub fn council() -> Self {
        Self {
            personas: council_presets(),
        }
    }

    /// Builds a catalog from an explicit member list.
    ///
    /// # Errors
    ///
    /// Returns `Validation` if the list is empty or contains duplicate ids.
    pub fn from_personas(personas: Vec<Persona>) -> Result<Self> {
        if personas.is_empty() {
            return Err(ParliamentError::validation(
                "A council needs at least one persona",
            ));
        }

        let mut seen = HashSet::new();
        for persona in &personas {
            if !seen.insert(persona.id.as_str()) {
                return Err(ParliamentError::validation(format!(
                    "Duplicate persona id '{}'",
                    persona.id
                )));
            }
        }

        Ok(Self { personas })
    }

    pub fn len(&self) -> usize {
        self.personas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.personas.is_empty()
    }

    /// Iterates members in seating order.
    pub fn iter(&self) -> std::slice::Iter<'_, Persona> {
        self.personas.iter()
    }

    pub fn as_slice(&self) -> &[Persona] {
        &self.personas
    }

    pub fn get(&self, id: &str) -> Option<&Persona> {
        self.personas.iter().find(|p| p.id == id)
    }

    /// Case-insensitive lookup by display name.
    pub fn find_by_name(&self, name: &str) -> Option<&Persona> {
        let wanted = name.to_lowercase();
        self.personas
            .iter()
            .find(|p| p.name.to_lowercase() == wanted)
    }

    pub fn ids(&self) -> Vec<&str> {
        self.personas.iter().map(|p| p.id.as_str()).collect()
    }

    pub fn names(&self) -> Vec<&str> {
        self.personas.iter().map(|p| p.name.as_str()).collect()
    }

    /// The presiding persona, falling back to the first member when the
    /// catalog has no mediator seat.
    pub fn mediator(&self) -> &Persona {
        self.get(MEDIATOR_ID).unwrap_or(&self.personas[0])
    }

    /// The persona that writes follow-up questions, falling back to the
    /// mediator.
    pub fn scholar(&self) -> &Persona {
        self.get(SCHOLAR_ID).unwrap_or_else(|| self.mediator())
    }

    /// The persona that seconds motions, falling back to the last member.
    pub fn dissenter(&self) -> &Persona {
        self.get(DISSENTER_ID)
            .unwrap_or(&self.personas[self.personas.len() - 1])
    }
}

impl Default for PersonaCatalog {
    fn default() -> Self {
        Self::council()
    }
}

impl<'a> IntoIterator for &'a PersonaCatalog {
    type Item = &'a Persona;
    type IntoIter = std::slice::Iter<'a, Persona>;

    fn into_iter(self) -> Self::IntoIter {
        self.personas.iter()
    }
}
