//! Operational shifts.

use serde::Serialize;

use super::text::title_case;

/// One of the three daily operational windows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Shift {
    Morning,
    Afternoon,
    Overnight,
}

impl Shift {
    /// Canonical report order.
    pub const ORDER: [Shift; 3] = [Shift::Morning, Shift::Afternoon, Shift::Overnight];

    /// Label as the sheet writes it.
    pub fn label(&self) -> &'static str {
        match self {
            Shift::Morning => "MANHÃ",
            Shift::Afternoon => "TARDE",
            Shift::Overnight => "MADRUGADA",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Shift::Morning => "🌅",
            Shift::Afternoon => "🌤️",
            Shift::Overnight => "🌙",
        }
    }

    /// Label for headings (`Manhã`).
    pub fn display_name(&self) -> String {
        title_case(self.label())
    }

    /// Parse a sheet cell; only the exact labels count.
    pub fn parse(value: &str) -> Option<Shift> {
        let value = value.trim().to_uppercase();
        Shift::ORDER.into_iter().find(|s| s.label() == value)
    }

    /// Looser match used by the RCF sheet, where shifts are typed freely.
    ///
    /// Overnight also accepts `NOITE`.
    pub fn matches_loose(&self, value: &str) -> bool {
        let value = value.to_uppercase();
        match self {
            Shift::Morning => value.contains("MANHÃ"),
            Shift::Afternoon => value.contains("TARDE"),
            Shift::Overnight => value.contains("NOITE") || value.contains("MADRUG"),
        }
    }
}

impl std::fmt::Display for Shift {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_exact_labels() {
        assert_eq!(Shift::parse("MANHÃ"), Some(Shift::Morning));
        assert_eq!(Shift::parse(" tarde "), Some(Shift::Afternoon));
        assert_eq!(Shift::parse("Madrugada"), Some(Shift::Overnight));
        assert_eq!(Shift::parse("MANHA"), None);
        assert_eq!(Shift::parse("NOITE"), None);
        assert_eq!(Shift::parse("-"), None);
    }

    #[test]
    fn test_matches_loose() {
        assert!(Shift::Morning.matches_loose("turno manhã"));
        assert!(Shift::Overnight.matches_loose("Noite"));
        assert!(Shift::Overnight.matches_loose("MADRUGADA"));
        assert!(!Shift::Afternoon.matches_loose("MANHÃ"));
    }

    #[test]
    fn test_display_name() {
        assert_eq!(Shift::Morning.display_name(), "Manhã");
        assert_eq!(Shift::Overnight.display_name(), "Madrugada");
    }
}
