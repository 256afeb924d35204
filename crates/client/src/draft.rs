// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use crate::error::GigError;
use crate::models::{Category, GigStatus};
use serde::{Deserialize, Serialize};

/// Editable field of the new gig form
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DraftField {
    Title,
    Description,
    Budget,
    Category,
    Status,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct NewGigDraft {
    pub title: String,
    pub description: String,
    /// Digits only
    pub budget: String,
    pub category: Category,
    pub status: GigStatus,
}

/// A draft that passed validation
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValidDraft {
    pub title: String,
    pub description: String,
    pub budget: u64,
    pub category: Category,
    pub status: GigStatus,
}

impl NewGigDraft {
    /// Apply a form edit. Non-digits are stripped from the budget as typed;
    /// unknown category or status values leave the field untouched.
    pub fn update(&mut self, field: DraftField, value: &str) {
        match field {
            DraftField::Title => self.title = value.to_string(),
            DraftField::Description => self.description = value.to_string(),
            DraftField::Budget => {
                self.budget = value.chars().filter(char::is_ascii_digit).collect()
            }
            DraftField::Category => {
                if let Ok(category) = value.parse() {
                    self.category = category;
                }
            }
            DraftField::Status => {
                if let Ok(status) = value.parse() {
                    self.status = status;
                }
            }
        }
    }

    pub fn validate(&self) -> Result<ValidDraft, GigError> {
        if self.title.trim().is_empty()
            || self.description.trim().is_empty()
            || self.budget.is_empty()
        {
            return Err(GigError::InvalidDraft(
                "Please fill all required fields".to_string(),
            ));
        }
        let budget = self
            .budget
            .parse::<u64>()
            .map_err(|_| GigError::InvalidDraft(format!("Invalid budget '{}'", self.budget)))?;
        Ok(ValidDraft {
            title: self.title.clone(),
            description: self.description.clone(),
            budget,
            category: self.category,
            status: self.status,
        })
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
