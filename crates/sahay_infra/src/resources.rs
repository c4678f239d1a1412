//! Helpline resource directory.
//!
//! The entries shown alongside an escalation are fixed configuration,
//! not computed state. The built-in directory lists Indian national
//! helplines; deployments can inject their own list.

/// One helpline entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HelplineEntry {
    pub name: &'static str,
    pub phone: &'static str,
    pub availability: &'static str,
}

/// Built-in directory of Indian national helplines.
pub const BUILTIN_HELPLINES: &[HelplineEntry] = &[
    HelplineEntry {
        name: "Tele-MANAS",
        phone: "14416",
        availability: "24x7",
    },
    HelplineEntry {
        name: "KIRAN",
        phone: "1800-599-0019",
        availability: "24x7",
    },
    HelplineEntry {
        name: "iCall",
        phone: "9152987821",
        availability: "Mon-Sat, 10:00-20:00",
    },
    HelplineEntry {
        name: "AASRA",
        phone: "9820466726",
        availability: "24x7",
    },
    HelplineEntry {
        name: "Vandrevala Foundation",
        phone: "9999666555",
        availability: "24x7",
    },
];

/// A configured helpline list with a display cap.
#[derive(Debug, Clone, Copy)]
pub struct HelplineDirectory {
    entries: &'static [HelplineEntry],
    max_entries: usize,
}

impl HelplineDirectory {
    pub fn new(entries: &'static [HelplineEntry], max_entries: usize) -> Self {
        Self {
            entries,
            max_entries,
        }
    }

    /// Directory over the built-in list with the default display cap.
    pub fn with_defaults() -> Self {
        Self::new(BUILTIN_HELPLINES, 5)
    }

    /// Entries to show, capped at the configured maximum.
    pub fn entries_for_display(&self) -> &'static [HelplineEntry] {
        let shown = self.entries.len().min(self.max_entries);
        &self.entries[..shown]
    }

    /// Full configured list, uncapped.
    pub fn all_entries(&self) -> &'static [HelplineEntry] {
        self.entries
    }
}

impl Default for HelplineDirectory {
    fn default() -> Self {
        Self::with_defaults()
    }
}
