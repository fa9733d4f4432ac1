//! Employee model and related types.
//!
//! This module defines the Employee struct and Position enum for
//! representing the staff whose leave requests are adjudicated.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Represents the position an employee holds.
///
/// Each position maps to a fixed seniority level used for priority ranking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Position {
    /// Regular staff member.
    #[serde(rename = "Çalışan")]
    Calisan,
    /// Team lead.
    #[serde(rename = "Şef")]
    Sef,
    /// Specialist.
    #[serde(rename = "Uzman")]
    Uzman,
    /// Human resources specialist.
    #[serde(rename = "İK Uzmanı")]
    IkUzmani,
    /// Manager.
    #[serde(rename = "Müdür")]
    Mudur,
}

impl Position {
    /// Returns the seniority level for this position.
    ///
    /// # Examples
    ///
    /// ```
    /// use leave_adjudicator::models::Position;
    ///
    /// assert_eq!(Position::Calisan.level(), 1);
    /// assert_eq!(Position::IkUzmani.level(), 2);
    /// assert_eq!(Position::Mudur.level(), 3);
    /// ```
    pub fn level(&self) -> u8 {
        match self {
            Position::Calisan => 1,
            Position::Sef | Position::Uzman | Position::IkUzmani => 2,
            Position::Mudur => 3,
        }
    }

    /// Returns the display label used in records and prompts.
    pub fn label(&self) -> &'static str {
        match self {
            Position::Calisan => "Çalışan",
            Position::Sef => "Şef",
            Position::Uzman => "Uzman",
            Position::IkUzmani => "İK Uzmanı",
            Position::Mudur => "Müdür",
        }
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Represents an employee requesting leave.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    /// Unique identifier for the employee.
    pub id: String,
    /// Full name of the employee.
    pub name: String,
    /// The employee's position.
    pub position: Position,
    /// Seniority level; must agree with [`Position::level`].
    pub position_level: u8,
    /// The date the employee started employment.
    pub hire_date: NaiveDate,
    /// Leave days still available to the employee this year.
    pub remaining_days: u32,
}

impl Employee {
    /// Checks the record's invariants before it is used for adjudication.
    ///
    /// # Examples
    ///
    /// ```
    /// use leave_adjudicator::models::{Employee, Position};
    /// use chrono::NaiveDate;
    ///
    /// let mut employee = Employee {
    ///     id: "emp_001".to_string(),
    ///     name: "Ayşe Yılmaz".to_string(),
    ///     position: Position::Uzman,
    ///     position_level: 2,
    ///     hire_date: NaiveDate::from_ymd_opt(2019, 3, 1).unwrap(),
    ///     remaining_days: 14,
    /// };
    /// assert!(employee.validate().is_ok());
    ///
    /// employee.position_level = 3;
    /// assert!(employee.validate().is_err());
    /// ```
    pub fn validate(&self) -> EngineResult<()> {
        if self.id.trim().is_empty() {
            return Err(EngineError::InvalidEmployee {
                field: "id".to_string(),
                message: "must not be empty".to_string(),
            });
        }
        if self.name.trim().is_empty() {
            return Err(EngineError::InvalidEmployee {
                field: "name".to_string(),
                message: "must not be empty".to_string(),
            });
        }
        let expected = self.position.level();
        if self.position_level != expected {
            return Err(EngineError::InvalidEmployee {
                field: "position_level".to_string(),
                message: format!(
                    "expected {} for {}, got {}",
                    expected, self.position, self.position_level
                ),
            });
        }
        Ok(())
    }
}
