//! Semantic fields and the header rules that locate them.

use serde::{Deserialize, Serialize};

/// A column the reports know how to use, independent of its sheet header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SemanticField {
    /// Why the guide left normal handling.
    DeviationDetail,
    /// Free-text operator notes, usually with a ticket number.
    Observation,
    /// Operational window the guide was handled in.
    Shift,
    /// Flight identifier.
    Flight,
    /// Destination airport.
    Destination,
    /// Actual departure time of the flight (DEP sheet).
    FlightDeparture,
    /// Start of the handling window (TMA sheet).
    StartTime,
    /// Categorized reason (RCF sheet).
    Reason,
    /// Day the guide was registered (RCF sheet).
    RecordDate,
}

impl SemanticField {
    /// Every field, in resolution order.
    pub const ALL: [SemanticField; 9] = [
        SemanticField::DeviationDetail,
        SemanticField::Observation,
        SemanticField::Shift,
        SemanticField::Flight,
        SemanticField::Destination,
        SemanticField::FlightDeparture,
        SemanticField::StartTime,
        SemanticField::Reason,
        SemanticField::RecordDate,
    ];

    /// The header a sheet normally uses for this field, for messages.
    pub fn header(&self) -> &'static str {
        match self {
            SemanticField::DeviationDetail => "DETALHE DESVIO",
            SemanticField::Observation => "OBSERVAÇÕES",
            SemanticField::Shift => "TURNO",
            SemanticField::Flight => "VOO",
            SemanticField::Destination => "DESTINO",
            SemanticField::FlightDeparture => "FLIGTH ATD",
            SemanticField::StartTime => "INICIO",
            SemanticField::Reason => "MOTIVO",
            SemanticField::RecordDate => "DATA",
        }
    }

    /// Whether a normalized (trimmed, upper-cased) header names this field.
    pub fn matches(&self, header: &str) -> bool {
        match self {
            SemanticField::DeviationDetail => {
                let compact: String = header.chars().filter(|c| *c != ' ' && *c != '_').collect();
                compact == "DETALHEDESVIO"
            }
            SemanticField::Observation => header.contains("OBSERVAÇ") || header.contains("OBSERVAC"),
            SemanticField::Shift => header == "TURNO",
            SemanticField::Flight => header == "VOO",
            SemanticField::Destination => header == "DESTINO",
            // The sheet has always spelled it FLIGTH
            SemanticField::FlightDeparture => header == "FLIGTH ATD" || header == "FLIGHT ATD",
            SemanticField::StartTime => header == "INICIO" || header == "INÍCIO",
            SemanticField::Reason => header == "MOTIVO",
            SemanticField::RecordDate => header.contains("DATA") && !header.contains("RESOL"),
        }
    }
}

impl std::fmt::Display for SemanticField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.header())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deviation_detail_ignores_spacing() {
        let field = SemanticField::DeviationDetail;
        assert!(field.matches("DETALHE DESVIO"));
        assert!(field.matches("DETALHE_DESVIO"));
        assert!(field.matches("DETALHEDESVIO"));
        assert!(!field.matches("DETALHE"));
    }

    #[test]
    fn test_observation_is_accent_insensitive() {
        let field = SemanticField::Observation;
        assert!(field.matches("OBSERVAÇÕES\n(DESCREVER DESVIOS, EX: NÚMERO DE CHAMADO)"));
        assert!(field.matches("OBSERVACOES"));
        assert!(!field.matches("OBS"));
    }

    #[test]
    fn test_record_date_skips_resolution_date() {
        let field = SemanticField::RecordDate;
        assert!(field.matches("DATA"));
        assert!(field.matches("DATA DO VOO"));
        assert!(!field.matches("DATA RESOLUÇÃO"));
    }

    #[test]
    fn test_exact_headers() {
        assert!(SemanticField::FlightDeparture.matches("FLIGTH ATD"));
        assert!(SemanticField::FlightDeparture.matches("FLIGHT ATD"));
        assert!(SemanticField::StartTime.matches("INÍCIO"));
        assert!(!SemanticField::Flight.matches("VOOS"));
    }
}
