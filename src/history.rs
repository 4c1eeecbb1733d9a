use crate::layer::LayerId;
use crate::surface::Snapshot;

/// Pixels of every layer at one point in time.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CanvasSnapshot {
    layers: Vec<(LayerId, Snapshot)>,
}

impl CanvasSnapshot {
    pub fn new(layers: Vec<(LayerId, Snapshot)>) -> Self {
        Self { layers }
    }

    pub fn get(&self, id: LayerId) -> Option<&Snapshot> {
        self.layers.iter().find(|(layer, _)| *layer == id).map(|(_, snapshot)| snapshot)
    }
}

/// Linear undo/redo over whole-canvas snapshots.
///
/// The first snapshot ever committed is a permanent baseline: `undo` only
/// pops while more than one entry is in `past`, so the state right after the
/// first commit can never be undone.
#[derive(Debug, Default)]
pub struct History {
    /// Most recent last
    past: Vec<CanvasSnapshot>,
    future: Vec<CanvasSnapshot>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a new state. Anything that could have been redone is dropped.
    pub fn commit(&mut self, snapshot: CanvasSnapshot) {
        self.past.push(snapshot);
        self.future.clear();
    }

    /// Step back one commit. Returns the snapshot to restore, or `None` when
    /// only the baseline is left.
    pub fn undo(&mut self) -> Option<CanvasSnapshot> {
        if self.past.len() <= 1 {
            return None;
        }
        let undone = self.past.pop()?;
        self.future.push(undone);
        self.past.last().cloned()
    }

    /// Step forward one commit. Returns the snapshot to restore.
    pub fn redo(&mut self) -> Option<CanvasSnapshot> {
        let redone = self.future.pop()?;
        self.past.push(redone.clone());
        Some(redone)
    }

    /// Forget everything, including the baseline.
    pub fn reset(&mut self) {
        self.past.clear();
        self.future.clear();
    }

    /// Forget everything and start over from `baseline`.
    pub fn reset_to(&mut self, baseline: CanvasSnapshot) {
        self.reset();
        self.past.push(baseline);
    }

    pub fn can_undo(&self) -> bool {
        self.past.len() > 1
    }

    pub fn can_redo(&self) -> bool {
        !self.future.is_empty()
    }

    pub fn past_len(&self) -> usize {
        self.past.len()
    }

    pub fn future_len(&self) -> usize {
        self.future.len()
    }
}
