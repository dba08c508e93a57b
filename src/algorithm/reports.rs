//! Report shapes produced by the aggregation engine
//!
//! These are the payloads handed to the (out-of-scope) transport layer;
//! all of them serialize directly.

use serde::Serialize;

/// One person covered by a station's zone
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CoveredPerson {
    /// First name (display form)
    pub first_name: String,
    /// Last name (display form)
    pub last_name: String,
    /// Street of the covered address
    pub street: String,
    /// Phone number
    pub phone: String,
    /// Whether the person is under 18 at the evaluation date
    pub is_child: bool,
}

/// Coverage summary for one station
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StationCoverage {
    /// The station the report covers
    pub station_id: u32,
    /// Residents under 18
    pub children: usize,
    /// Residents 18 and over
    pub adults: usize,
    /// Every person living at an attached address
    pub persons: Vec<CoveredPerson>,
}

/// One child living at a queried address
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChildResident {
    /// First name (display form)
    pub first_name: String,
    /// Last name (display form)
    pub last_name: String,
    /// Street of the address
    pub street: String,
    /// Age in whole years at the evaluation date
    pub age: i32,
    /// Full names of the other residents at the same address
    pub household_members: Vec<String>,
}

/// One resident inside a household report, medical profile included
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResidentProfile {
    /// First name (display form)
    pub first_name: String,
    /// Last name (display form)
    pub last_name: String,
    /// Phone number
    pub phone: String,
    /// Age in whole years at the evaluation date
    pub age: i32,
    /// Medication names
    pub medications: Vec<String>,
    /// Allergy names
    pub allergies: Vec<String>,
}

/// All residents of one address together with the covering station
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HouseholdReport {
    /// Street of the address
    pub street: String,
    /// Station covering the address
    pub station_id: u32,
    /// Residents with their medical profiles
    pub residents: Vec<ResidentProfile>,
}

/// Expanded record for a person found by name
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PersonInfo {
    /// First name (display form)
    pub first_name: String,
    /// Last name (display form)
    pub last_name: String,
    /// Street of the home address
    pub street: String,
    /// Zip of the resolved address record, if it exists
    pub zip: Option<String>,
    /// City of the resolved address record, if it exists
    pub city: Option<String>,
    /// Age in whole years at the evaluation date
    pub age: i32,
    /// Phone number
    pub phone: String,
    /// Contact email
    pub email: String,
    /// Medication names
    pub medications: Vec<String>,
    /// Allergy names
    pub allergies: Vec<String>,
}
