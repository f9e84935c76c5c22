// Serializable form of the channel probability table
//
// Stored as `{ intended: { observed: probability } }` keyed by symbol
// names (`a`..`z`, `unk`, `%`). Maps are ordered so the encoding is stable.

use std::collections::BTreeMap;
use std::io::{Read, Write};

use chanspell_core::{SYMBOL_COUNT, Symbol};
use serde::{Deserialize, Serialize};

use crate::ChannelError;
use crate::cost::CostModel;

/// Nested probability mapping in symbol-name form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CostSnapshot {
    pub probs: BTreeMap<String, BTreeMap<String, f64>>,
}

impl CostSnapshot {
    /// Write the snapshot as pretty-printed JSON.
    pub fn write_json<W: Write>(&self, writer: W) -> Result<(), ChannelError> {
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }

    /// Read a snapshot from JSON. The table itself is validated by
    /// [`CostModel::from_snapshot`].
    pub fn read_json<R: Read>(reader: R) -> Result<Self, ChannelError> {
        Ok(serde_json::from_reader(reader)?)
    }
}

impl CostModel {
    /// Capture every cell of the table.
    pub fn to_snapshot(&self) -> CostSnapshot {
        let probs = Symbol::all()
            .map(|intended| {
                let row = Symbol::all()
                    .map(|observed| (observed.name(), self.probability(intended, observed)))
                    .collect();
                (intended.name(), row)
            })
            .collect();
        CostSnapshot { probs }
    }

    /// Rebuild a table from a snapshot.
    ///
    /// Every intended/observed pair must be present and the result must
    /// satisfy the table invariants; nothing is filled in by default.
    pub fn from_snapshot(snapshot: &CostSnapshot) -> Result<Self, ChannelError> {
        let mut table = [[0.0; SYMBOL_COUNT]; SYMBOL_COUNT];
        let mut seen = [[false; SYMBOL_COUNT]; SYMBOL_COUNT];

        for (intended_name, row) in &snapshot.probs {
            let intended = Symbol::from_name(intended_name)
                .map_err(|e| ChannelError::InvalidSnapshot(e.to_string()))?;
            for (observed_name, &p) in row {
                let observed = Symbol::from_name(observed_name)
                    .map_err(|e| ChannelError::InvalidSnapshot(e.to_string()))?;
                table[intended.index()][observed.index()] = p;
                seen[intended.index()][observed.index()] = true;
            }
        }

        for intended in Symbol::all() {
            for observed in Symbol::all() {
                if !seen[intended.index()][observed.index()] {
                    return Err(ChannelError::InvalidSnapshot(format!(
                        "missing P({observed} | {intended})"
                    )));
                }
            }
        }

        CostModel::from_table(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cost::{DEFAULT_PRIOR, EditCounts};

    fn trained() -> CostModel {
        let mut counts = EditCounts::new(DEFAULT_PRIOR);
        counts.add(Symbol::from_char('e'), Symbol::from_char('i'));
        counts.add(Symbol::BLANK, Symbol::from_char('s'));
        counts.into_model()
    }

    #[test]
    fn json_snapshot_restores_the_table() {
        let model = trained();
        let mut buffer = Vec::new();
        model.to_snapshot().write_json(&mut buffer).unwrap();

        let snapshot = CostSnapshot::read_json(buffer.as_slice()).unwrap();
        let restored = CostModel::from_snapshot(&snapshot).unwrap();
        for intended in Symbol::all() {
            for observed in Symbol::all() {
                let before = model.probability(intended, observed);
                let after = restored.probability(intended, observed);
                assert!((before - after).abs() < 1e-12, "{intended}/{observed}");
            }
        }
    }

    #[test]
    fn snapshot_uses_symbol_names() {
        let snapshot = CostModel::untrained().to_snapshot();
        assert_eq!(snapshot.probs.len(), SYMBOL_COUNT);
        assert!(snapshot.probs.contains_key("unk"));
        assert!(snapshot.probs["%"].contains_key("a"));
    }

    #[test]
    fn missing_cell_is_rejected() {
        let mut snapshot = trained().to_snapshot();
        if let Some(row) = snapshot.probs.get_mut("a") {
            row.remove("b");
        }
        let err = CostModel::from_snapshot(&snapshot).unwrap_err();
        assert!(err.to_string().contains("missing"), "{err}");
    }

    #[test]
    fn unknown_symbol_name_is_rejected() {
        let mut snapshot = trained().to_snapshot();
        snapshot.probs.insert("ab".to_string(), BTreeMap::new());
        assert!(matches!(
            CostModel::from_snapshot(&snapshot),
            Err(ChannelError::InvalidSnapshot(_))
        ));
    }

    #[test]
    fn garbage_json_is_an_encoding_error() {
        let err = CostSnapshot::read_json(&b"{ not json"[..]).unwrap_err();
        assert!(matches!(err, ChannelError::Snapshot(_)));
    }
}
