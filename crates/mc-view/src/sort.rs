//! Column sorting
//!
//! Sorting compares lowercased string keys, so `"10"` sorts before `"9"` and
//! dates sort by their ISO form. The sort is stable; records with equal keys
//! keep their collection order in both directions.

use mc_model::{Appointment, Doctor, ParseValueError, Patient};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt::{self, Display};
use std::str::FromStr;

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    /// Smallest key first
    #[default]
    Ascending,
    /// Largest key first
    Descending,
}

impl SortDirection {
    /// The other direction
    #[inline]
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }

    fn apply(self, ord: Ordering) -> Ordering {
        match self {
            Self::Ascending => ord,
            Self::Descending => ord.reverse(),
        }
    }
}

impl FromStr for SortDirection {
    type Err = ParseValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" | "ascending" => Ok(Self::Ascending),
            "desc" | "descending" => Ok(Self::Descending),
            _ => Err(ParseValueError::new("sort direction", s)),
        }
    }
}

/// Active sort column and direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SortSpec<C> {
    /// Column to compare on
    pub column: C,
    /// Direction
    pub direction: SortDirection,
}

impl<C: Copy + PartialEq> SortSpec<C> {
    /// Ascending on `column`
    #[inline]
    #[must_use]
    pub const fn ascending(column: C) -> Self {
        Self {
            column,
            direction: SortDirection::Ascending,
        }
    }

    /// Descending on `column`
    #[inline]
    #[must_use]
    pub const fn descending(column: C) -> Self {
        Self {
            column,
            direction: SortDirection::Descending,
        }
    }

    /// Column header click: same column flips, new column starts ascending
    #[must_use]
    pub fn select(current: Option<Self>, column: C) -> Self {
        match current {
            Some(spec) if spec.column == column => Self {
                column,
                direction: spec.direction.toggled(),
            },
            _ => Self::ascending(column),
        }
    }
}

/// Record that can be ordered by named columns
pub trait Sortable {
    /// Column names for this record
    type Column: Copy + PartialEq + fmt::Debug;

    /// Lowercased comparison key for `column`
    fn sort_key(&self, column: Self::Column) -> String;
}

/// Stable sort of record references by one column
pub fn sort_records<R: Sortable>(records: &mut Vec<&R>, spec: SortSpec<R::Column>) {
    let mut keyed: Vec<(String, &R)> = records
        .drain(..)
        .map(|r| (r.sort_key(spec.column), r))
        .collect();
    keyed.sort_by(|a, b| spec.direction.apply(a.0.cmp(&b.0)));
    records.extend(keyed.into_iter().map(|(_, r)| r));
}

macro_rules! columns {
    ($(#[$meta:meta])* $name:ident, $what:literal { $($variant:ident => $text:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $(
                #[doc = concat!("`", $text, "` column")]
                $variant,
            )+
        }

        impl $name {
            /// Every column
            pub const ALL: &'static [$name] = &[$(Self::$variant),+];

            /// Column name as accepted by `FromStr`
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $text,)+
                }
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = ParseValueError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let wanted: String = s
                    .chars()
                    .filter(|c| c.is_ascii_alphanumeric())
                    .collect::<String>()
                    .to_ascii_lowercase();
                Self::ALL
                    .iter()
                    .copied()
                    .find(|c| c.as_str().to_ascii_lowercase() == wanted)
                    .ok_or_else(|| ParseValueError::new($what, s))
            }
        }
    };
}

columns!(
    /// Sortable patient columns
    PatientColumn, "patient column" {
        Name => "name",
        Age => "age",
        Gender => "gender",
        Phone => "phone",
        Disease => "disease",
        AdmissionDate => "admissionDate",
        BloodGroup => "bloodGroup",
    }
);

columns!(
    /// Sortable doctor columns
    DoctorColumn, "doctor column" {
        Name => "name",
        Specialization => "specialization",
        Availability => "availability",
        Experience => "experience",
    }
);

columns!(
    /// Sortable appointment columns
    AppointmentColumn, "appointment column" {
        Date => "date",
        Time => "time",
        Reason => "reason",
        Status => "status",
    }
);

impl Sortable for Patient {
    type Column = PatientColumn;

    fn sort_key(&self, column: PatientColumn) -> String {
        let raw = match column {
            PatientColumn::Name => self.name.clone(),
            PatientColumn::Age => self.age.to_string(),
            PatientColumn::Gender => self.gender.as_str().to_owned(),
            PatientColumn::Phone => self.phone.clone(),
            PatientColumn::Disease => self.disease.clone(),
            PatientColumn::AdmissionDate => self.admission_date.to_string(),
            PatientColumn::BloodGroup => self.blood_group.clone().unwrap_or_default(),
        };
        raw.to_lowercase()
    }
}

impl Sortable for Doctor {
    type Column = DoctorColumn;

    fn sort_key(&self, column: DoctorColumn) -> String {
        let raw = match column {
            DoctorColumn::Name => self.name.clone(),
            DoctorColumn::Specialization => self.specialization.clone(),
            DoctorColumn::Availability => self.availability.as_str().to_owned(),
            DoctorColumn::Experience => self.experience.map(|e| e.to_string()).unwrap_or_default(),
        };
        raw.to_lowercase()
    }
}

impl Sortable for Appointment {
    type Column = AppointmentColumn;

    fn sort_key(&self, column: AppointmentColumn) -> String {
        match column {
            AppointmentColumn::Date => self.date.to_string(),
            AppointmentColumn::Time => self.time.format("%H:%M").to_string(),
            AppointmentColumn::Reason => self.reason.to_lowercase(),
            AppointmentColumn::Status => self.status.as_str().to_owned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use mc_model::{Gender, RecordId};

    fn patient(id: &str, name: &str, age: u32) -> Patient {
        Patient {
            id: RecordId::from(id),
            name: name.into(),
            age,
            gender: Gender::Other,
            phone: "1234567".into(),
            disease: "Flu".into(),
            admission_date: NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
            blood_group: None,
            notes: None,
        }
    }

    fn ids(records: &[&Patient]) -> Vec<String> {
        records.iter().map(|p| p.id.to_string()).collect()
    }

    #[test]
    fn select_toggles_same_column() {
        let first = SortSpec::select(None, PatientColumn::Name);
        assert_eq!(first, SortSpec::ascending(PatientColumn::Name));

        let second = SortSpec::select(Some(first), PatientColumn::Name);
        assert_eq!(second.direction, SortDirection::Descending);

        let third = SortSpec::select(Some(second), PatientColumn::Age);
        assert_eq!(third, SortSpec::ascending(PatientColumn::Age));
    }

    #[test]
    fn name_sort_ignores_case() {
        let all = [patient("p_1", "bob", 1), patient("p_2", "Alice", 2)];
        let mut refs: Vec<_> = all.iter().collect();
        sort_records(&mut refs, SortSpec::ascending(PatientColumn::Name));
        assert_eq!(ids(&refs), ["p_2", "p_1"]);
    }

    #[test]
    fn numbers_compare_as_text() {
        let all = [patient("p_1", "A", 9), patient("p_2", "B", 10)];
        let mut refs: Vec<_> = all.iter().collect();
        sort_records(&mut refs, SortSpec::ascending(PatientColumn::Age));
        assert_eq!(ids(&refs), ["p_2", "p_1"]);
    }

    #[test]
    fn ties_keep_collection_order_both_ways() {
        let all = [
            patient("p_1", "Same", 1),
            patient("p_2", "Same", 2),
            patient("p_3", "Other", 3),
        ];
        let mut asc: Vec<_> = all.iter().collect();
        sort_records(&mut asc, SortSpec::ascending(PatientColumn::Name));
        assert_eq!(ids(&asc), ["p_3", "p_1", "p_2"]);

        let mut desc: Vec<_> = all.iter().collect();
        sort_records(&mut desc, SortSpec::descending(PatientColumn::Name));
        assert_eq!(ids(&desc), ["p_1", "p_2", "p_3"]);
    }

    #[test]
    fn column_names_parse_loosely() {
        assert_eq!("admission-date".parse::<PatientColumn>().unwrap(), PatientColumn::AdmissionDate);
        assert_eq!("bloodGroup".parse::<PatientColumn>().unwrap(), PatientColumn::BloodGroup);
        assert_eq!("Status".parse::<AppointmentColumn>().unwrap(), AppointmentColumn::Status);
        assert!("salary".parse::<DoctorColumn>().is_err());
    }
}
