//! In-memory filtering and grouping of the doctor list.
//!
//! The directory page filters a list fetched once, client side; the same
//! semantics apply here. All text comparisons are case-insensitive.

use std::collections::BTreeMap;

use crate::doctor::Doctor;

/// Bucket for doctors whose record carries no department.
pub const OTHER_DEPARTMENT: &str = "Other";

/// Backend department names behind a display-name alias.
///
/// The filter control shows a curated list of names that do not all match
/// what the backend stores (e.g. British vs. American spelling, or one
/// entry covering two backend departments).
fn department_aliases(display_name: &str) -> Option<&'static [&'static str]> {
    match display_name {
        "Orthopaedics" => Some(&["Orthopedics"]),
        "Child Development / Counselling" => Some(&["Pediatrics", "Counselling Center"]),
        "Medicine" => Some(&["Medicine"]),
        "Cardiology" => Some(&["Cardiology"]),
        "Dermatology" => Some(&["Dermatology"]),
        "Neurology" => Some(&["Neurology"]),
        _ => None,
    }
}

/// Filter criteria for the doctor directory.
///
/// Empty/absent criteria match everything, so the default filter is a
/// pass-through.
#[derive(Debug, Clone, Default)]
pub struct DoctorFilter {
    /// Substring match against name or specialization
    pub search: Option<String>,
    /// Display department name (resolved through the alias table)
    pub department: Option<String>,
    /// Exact experience level ("senior", "specialist", ...)
    pub experience: Option<String>,
}

impl DoctorFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }

    pub fn with_department(mut self, department: impl Into<String>) -> Self {
        self.department = Some(department.into());
        self
    }

    pub fn with_experience(mut self, level: impl Into<String>) -> Self {
        self.experience = Some(level.into());
        self
    }

    /// Apply the filter to a doctor list.
    pub fn apply(&self, doctors: &[Doctor]) -> Vec<Doctor> {
        doctors
            .iter()
            .filter(|d| self.matches(d))
            .cloned()
            .collect()
    }

    fn matches(&self, doctor: &Doctor) -> bool {
        self.matches_search(doctor) && self.matches_department(doctor) && self.matches_experience(doctor)
    }

    fn matches_search(&self, doctor: &Doctor) -> bool {
        let term = match self.search.as_deref() {
            Some(t) if !t.is_empty() => t.to_lowercase(),
            _ => return true,
        };

        doctor.name.to_lowercase().contains(&term)
            || doctor
                .specialization
                .as_deref()
                .is_some_and(|s| s.to_lowercase().contains(&term))
    }

    fn matches_department(&self, doctor: &Doctor) -> bool {
        let wanted = match self.department.as_deref() {
            Some(d) if !d.is_empty() => d,
            _ => return true,
        };

        let Some(department) = doctor.department.as_deref() else {
            return false;
        };

        match department_aliases(wanted) {
            Some(aliases) => aliases
                .iter()
                .any(|alias| department.eq_ignore_ascii_case(alias)),
            None => department.eq_ignore_ascii_case(wanted),
        }
    }

    fn matches_experience(&self, doctor: &Doctor) -> bool {
        let wanted = match self.experience.as_deref() {
            Some(e) if !e.is_empty() => e,
            _ => return true,
        };

        doctor
            .experience_level
            .as_deref()
            .is_some_and(|level| level.eq_ignore_ascii_case(wanted))
    }
}

/// Group doctors by department, departments in alphabetical order.
///
/// Doctors without a department land under [`OTHER_DEPARTMENT`].
pub fn group_by_department(doctors: &[Doctor]) -> BTreeMap<String, Vec<Doctor>> {
    let mut groups: BTreeMap<String, Vec<Doctor>> = BTreeMap::new();
    for doctor in doctors {
        let department = doctor
            .department
            .clone()
            .unwrap_or_else(|| OTHER_DEPARTMENT.to_string());
        groups.entry(department).or_default().push(doctor.clone());
    }
    groups
}
