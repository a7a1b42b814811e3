//! Resolution of semantic fields to column positions.

use std::collections::HashMap;

use super::field::SemanticField;

/// Maps each semantic field to the column that carries it.
///
/// Built once per table; everything downstream asks for fields, never for
/// raw headers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnMap {
    positions: HashMap<SemanticField, usize>,
}

impl ColumnMap {
    /// Resolve every known field against normalized headers.
    ///
    /// Headers are scanned in order and the first match wins.
    pub fn resolve<S: AsRef<str>>(headers: &[S]) -> Self {
        let mut positions = HashMap::new();
        for field in SemanticField::ALL {
            if let Some(index) = headers.iter().position(|h| field.matches(h.as_ref())) {
                positions.insert(field, index);
            }
        }
        Self { positions }
    }

    /// Column index for a field, if the sheet has it.
    pub fn get(&self, field: SemanticField) -> Option<usize> {
        self.positions.get(&field).copied()
    }

    pub fn contains(&self, field: SemanticField) -> bool {
        self.positions.contains_key(&field)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_dep_headers() {
        let headers = [
            "AWB",
            "VOO",
            "DESTINO",
            "FLIGTH ATD",
            "TURNO",
            "DETALHE DESVIO",
            "OBSERVAÇÕES\n(DESCREVER DESVIOS)",
        ];
        let map = ColumnMap::resolve(&headers);
        assert_eq!(map.get(SemanticField::Flight), Some(1));
        assert_eq!(map.get(SemanticField::Destination), Some(2));
        assert_eq!(map.get(SemanticField::FlightDeparture), Some(3));
        assert_eq!(map.get(SemanticField::Shift), Some(4));
        assert_eq!(map.get(SemanticField::DeviationDetail), Some(5));
        assert_eq!(map.get(SemanticField::Observation), Some(6));
        assert!(!map.contains(SemanticField::Reason));
    }

    #[test]
    fn test_first_match_wins() {
        let headers = ["OBSERVAÇÕES", "OBSERVAÇÕES GERAIS"];
        let map = ColumnMap::resolve(&headers);
        assert_eq!(map.get(SemanticField::Observation), Some(0));
    }

    #[test]
    fn test_unknown_headers_resolve_nothing() {
        let map = ColumnMap::resolve(&["VOO", "AWB"]);
        assert!(map.contains(SemanticField::Flight));
        assert!(!map.contains(SemanticField::Shift));
    }
}
