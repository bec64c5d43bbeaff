use std::collections::{HashMap, HashSet};

use egui::Color32;
use nalgebra::Vector3;
use tracing::debug;

/// Below this length a vector is treated as degenerate: its glyph keeps the
/// near-zero length but points along the fixed fallback direction instead of
/// being normalized.
pub const DEGENERATE_EPS: f64 = 1e-3;

/// One drawable arrow, keyed by id in the table. Mutated in place between its
/// creation and removal so any per-id visual state stays attached to it.
#[derive(Debug, Clone, PartialEq)]
pub struct Glyph {
    pub direction: Vector3<f64>,
    pub length: f64,
    pub color: Color32,
}

/// One freshly computed result the presenter wants on screen.
#[derive(Debug, Clone)]
pub struct GlyphEntry {
    pub id: String,
    pub vector: Vector3<f64>,
    pub color: Color32,
}

impl GlyphEntry {
    pub fn new(id: impl Into<String>, vector: Vector3<f64>, color: Color32) -> Self {
        Self {
            id: id.into(),
            vector,
            color,
        }
    }
}

/// Counts from one reconcile pass, surfaced in the status line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReconcileSummary {
    pub created: usize,
    pub updated: usize,
    pub removed: usize,
}

/// Owns the id → glyph table and reconciles it against each newly computed
/// entry list with enter/update/exit semantics, so a glyph's identity
/// survives recomputation instead of being torn down and rebuilt.
#[derive(Default)]
pub struct GlyphReconciler {
    table: HashMap<String, Glyph>,
}

impl GlyphReconciler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bring the table in line with `entries`: ids not yet present are
    /// created, ids already present are updated in place, and ids missing
    /// from `entries` are removed. Duplicate ids resolve last-write-wins.
    /// All mutations are applied before this returns, so a per-frame reader
    /// never observes a half-reconciled table.
    pub fn reconcile(&mut self, entries: &[GlyphEntry]) -> ReconcileSummary {
        let mut summary = ReconcileSummary::default();

        // Removal is decided against the pre-call key set, never against
        // partially applied updates.
        let incoming: HashSet<&str> = entries.iter().map(|e| e.id.as_str()).collect();
        let stale: Vec<String> = self
            .table
            .keys()
            .filter(|id| !incoming.contains(id.as_str()))
            .cloned()
            .collect();

        for id in stale {
            self.table.remove(&id);
            debug!(%id, "glyph removed");
            summary.removed += 1;
        }

        for entry in entries {
            let (direction, length) = arrow_geometry(entry.vector);
            match self.table.get_mut(&entry.id) {
                Some(glyph) => {
                    glyph.direction = direction;
                    glyph.length = length;
                    glyph.color = entry.color;
                    debug!(id = %entry.id, length, "glyph updated");
                    summary.updated += 1;
                }
                None => {
                    self.table.insert(
                        entry.id.clone(),
                        Glyph {
                            direction,
                            length,
                            color: entry.color,
                        },
                    );
                    debug!(id = %entry.id, length, "glyph created");
                    summary.created += 1;
                }
            }
        }

        summary
    }

    /// Drop every glyph, used when the selected operation has nothing
    /// drawable to show.
    pub fn clear(&mut self) {
        if !self.table.is_empty() {
            debug!(count = self.table.len(), "glyph table cleared");
        }
        self.table.clear();
    }

    pub fn glyphs(&self) -> impl Iterator<Item = (&str, &Glyph)> {
        self.table.iter().map(|(id, g)| (id.as_str(), g))
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

/// Direction and length for a source vector. Near-zero vectors are never
/// normalized; they keep their tiny length and point along the fallback axis.
fn arrow_geometry(v: Vector3<f64>) -> (Vector3<f64>, f64) {
    let length = v.norm();
    if length > DEGENERATE_EPS {
        (v / length, length)
    } else {
        (Vector3::x(), length)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: &str, x: f64, y: f64, z: f64) -> GlyphEntry {
        GlyphEntry::new(id, Vector3::new(x, y, z), Color32::RED)
    }

    fn ids(r: &GlyphReconciler) -> Vec<String> {
        let mut v: Vec<String> = r.glyphs().map(|(id, _)| id.to_owned()).collect();
        v.sort();
        v
    }

    #[test]
    fn creates_updates_and_removes() {
        let mut r = GlyphReconciler::new();

        let s = r.reconcile(&[entry("A", 1.0, 0.0, 0.0), entry("B", 0.0, 2.0, 0.0)]);
        assert_eq!((s.created, s.updated, s.removed), (2, 0, 0));
        assert_eq!(ids(&r), vec!["A", "B"]);

        // {A, B} -> {B, C}: A exits, B updates in place, C enters.
        let s = r.reconcile(&[entry("B", 0.0, 0.0, 3.0), entry("C", 1.0, 1.0, 0.0)]);
        assert_eq!((s.created, s.updated, s.removed), (1, 1, 1));
        assert_eq!(ids(&r), vec!["B", "C"]);

        let b = r.glyphs().find(|(id, _)| *id == "B").unwrap().1;
        assert_eq!(b.length, 3.0);
        assert_eq!(b.direction, Vector3::new(0.0, 0.0, 1.0));
    }

    #[test]
    fn reconcile_is_idempotent() {
        let mut r = GlyphReconciler::new();
        let entries = [entry("A", 1.0, 2.0, 3.0), entry("B", -1.0, 0.0, 0.0)];

        r.reconcile(&entries);
        let before: HashMap<String, Glyph> = r
            .glyphs()
            .map(|(id, g)| (id.to_owned(), g.clone()))
            .collect();

        let s = r.reconcile(&entries);
        assert_eq!((s.created, s.removed), (0, 0));
        assert_eq!(s.updated, 2);

        let after: HashMap<String, Glyph> = r
            .glyphs()
            .map(|(id, g)| (id.to_owned(), g.clone()))
            .collect();
        assert_eq!(before, after);
    }

    #[test]
    fn empty_entry_list_empties_table() {
        let mut r = GlyphReconciler::new();
        r.reconcile(&[entry("A", 1.0, 0.0, 0.0), entry("B", 0.0, 1.0, 0.0)]);

        let s = r.reconcile(&[]);
        assert_eq!(s.removed, 2);
        assert!(r.is_empty());
    }

    #[test]
    fn zero_vector_falls_back_without_nan() {
        let mut r = GlyphReconciler::new();
        r.reconcile(&[entry("Z", 0.0, 0.0, 0.0)]);

        let z = r.glyphs().find(|(id, _)| *id == "Z").unwrap().1;
        assert_eq!(z.direction, Vector3::new(1.0, 0.0, 0.0));
        assert_eq!(z.length, 0.0);
        assert!(z.direction.iter().all(|c| c.is_finite()));
    }

    #[test]
    fn near_zero_vector_keeps_its_tiny_length() {
        let mut r = GlyphReconciler::new();
        r.reconcile(&[entry("T", 0.0, 0.0005, 0.0)]);

        let t = r.glyphs().find(|(id, _)| *id == "T").unwrap().1;
        assert_eq!(t.direction, Vector3::new(1.0, 0.0, 0.0));
        assert!(t.length > 0.0 && t.length < DEGENERATE_EPS);
    }

    #[test]
    fn duplicate_id_last_write_wins() {
        let mut r = GlyphReconciler::new();
        r.reconcile(&[
            GlyphEntry::new("A", Vector3::new(1.0, 0.0, 0.0), Color32::RED),
            GlyphEntry::new("A", Vector3::new(0.0, 5.0, 0.0), Color32::BLUE),
        ]);

        assert_eq!(r.len(), 1);
        let a = r.glyphs().next().unwrap().1;
        assert_eq!(a.length, 5.0);
        assert_eq!(a.color, Color32::BLUE);
    }

    #[test]
    fn clear_removes_everything() {
        let mut r = GlyphReconciler::new();
        r.reconcile(&[entry("A", 1.0, 0.0, 0.0)]);
        r.clear();
        assert!(r.is_empty());
    }
}
