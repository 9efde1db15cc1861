//! Static program-to-conference assignments.

/// Label written when a program is missing from the table.
pub const UNKNOWN_CONFERENCE: &str = "unknown";

const PROGRAMS: &[(&str, &str)] = &[
    ("Acadia", "AUS"),
    ("Alberta", "CW"),
    ("Algoma", "OUA West"),
    ("Bishop's", "RSEQ"),
    ("Brandon", "CW"),
    ("Brock", "OUA Central"),
    ("Calgary", "CW"),
    ("Cape Breton", "AUS"),
    ("Carleton", "OUA East"),
    ("Concordia", "RSEQ"),
    ("Dalhousie", "AUS"),
    ("Guelph", "OUA West"),
    ("Lakehead", "OUA Central"),
    ("Laurentian", "OUA East"),
    ("Laurier", "OUA West"),
    ("Laval", "RSEQ"),
    ("Lethbridge", "CW"),
    ("MacEwan", "CW"),
    ("Manitoba", "CW"),
    ("McGill", "RSEQ"),
    ("McMaster", "OUA Central"),
    ("Memorial", "AUS"),
    ("Mount Royal", "CW"),
    ("Nipissing", "OUA East"),
    ("Ontario Tech", "OUA East"),
    ("Ottawa", "OUA East"),
    ("Queen's", "OUA East"),
    ("Regina", "CW"),
    ("Saint Mary's", "AUS"),
    ("Saskatchewan", "CW"),
    ("StFX", "AUS"),
    ("Thompson Rivers", "CW"),
    ("Toronto", "OUA Central"),
    ("Toronto Metropolitan", "OUA Central"),
    ("Trinity Western", "CW"),
    ("UBC", "CW"),
    ("UBC Okanagan", "CW"),
    ("UFV", "CW"),
    ("UNB", "AUS"),
    ("UNBC", "CW"),
    ("UPEI", "AUS"),
    ("UQAM", "RSEQ"),
    ("Victoria", "CW"),
    ("Waterloo", "OUA West"),
    ("Western", "OUA West"),
    ("Windsor", "OUA West"),
    ("Winnipeg", "CW"),
    ("York", "OUA Central"),
];

/// Read-only mapping from program display name to conference label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConferenceTable {
    entries: &'static [(&'static str, &'static str)],
}

impl Default for ConferenceTable {
    fn default() -> Self {
        Self::usports()
    }
}

impl ConferenceTable {
    /// The U SPORTS basketball conference alignment.
    #[must_use]
    pub const fn usports() -> Self {
        Self { entries: PROGRAMS }
    }

    #[must_use]
    pub const fn from_entries(entries: &'static [(&'static str, &'static str)]) -> Self {
        Self { entries }
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&'static str> {
        self.entries
            .iter()
            .find(|(program, _)| *program == name)
            .map(|(_, conference)| *conference)
    }

    /// Conference for `name`, or [`UNKNOWN_CONFERENCE`].
    #[must_use]
    pub fn label(&self, name: &str) -> &'static str {
        self.get(name).unwrap_or(UNKNOWN_CONFERENCE)
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    #[test]
    fn known_programs_resolve() {
        let table = ConferenceTable::usports();
        assert_eq!(table.label("Acadia"), "AUS");
        assert_eq!(table.label("Toronto Metropolitan"), "OUA Central");
        assert_eq!(table.label("Queen's"), "OUA East");
    }

    #[test]
    fn unknown_program_yields_sentinel() {
        let table = ConferenceTable::usports();
        assert_eq!(table.get("Harvard"), None);
        assert_eq!(table.label("Harvard"), UNKNOWN_CONFERENCE);
    }

    #[test]
    fn table_covers_six_conferences() {
        let conferences: BTreeSet<&str> = PROGRAMS.iter().map(|(_, c)| *c).collect();
        assert_eq!(conferences.len(), 6);
        assert_eq!(ConferenceTable::usports().len(), 48);
    }
}
