//! Undo/redo history for editor parameter snapshots.

use crate::models::GlowParameters;

/// Maximum undo depth; the oldest snapshot drops off past this.
const MAX_UNDO_DEPTH: usize = 30;

/// Undo/redo stacks over immutable parameter snapshots.
///
/// The caller decides the undo granularity: `snapshot` records the current
/// state (typically on slider release or style switch), `set` replaces it
/// without recording. Any new edit clears the redo stack.
#[derive(Debug, Clone)]
pub struct EditHistory {
    current: GlowParameters,
    undo_stack: Vec<GlowParameters>,
    redo_stack: Vec<GlowParameters>,
}

impl EditHistory {
    pub fn new(initial: GlowParameters) -> Self {
        Self {
            current: initial,
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
        }
    }

    /// The live parameter state.
    pub fn current(&self) -> &GlowParameters {
        &self.current
    }

    /// Record the current state as an undo point.
    pub fn snapshot(&mut self) {
        self.undo_stack.push(self.current);
        if self.undo_stack.len() > MAX_UNDO_DEPTH {
            self.undo_stack.remove(0);
        }
    }

    /// Replace the current state with an edited snapshot. Clears redo.
    pub fn set(&mut self, params: GlowParameters) {
        self.current = params;
        self.redo_stack.clear();
    }

    /// Step back to the previous snapshot. Returns the new current state.
    pub fn undo(&mut self) -> Option<&GlowParameters> {
        let previous = self.undo_stack.pop()?;
        self.redo_stack.push(self.current);
        self.current = previous;
        Some(&self.current)
    }

    /// Reapply the most recently undone snapshot.
    pub fn redo(&mut self) -> Option<&GlowParameters> {
        let next = self.redo_stack.pop()?;
        self.undo_stack.push(self.current);
        self.current = next;
        Some(&self.current)
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::GlowStyle;

    fn with_intensity(value: f32) -> GlowParameters {
        GlowParameters {
            intensity: value,
            ..GlowParameters::default()
        }
    }

    #[test]
    fn test_undo_redo_round_trip() {
        let mut history = EditHistory::new(with_intensity(70.0));
        history.snapshot();
        history.set(with_intensity(90.0));

        assert!(history.can_undo());
        assert!(!history.can_redo());

        let undone = history.undo().unwrap();
        assert_eq!(undone.intensity, 70.0);
        assert!(history.can_redo());

        let redone = history.redo().unwrap();
        assert_eq!(redone.intensity, 90.0);
    }

    #[test]
    fn test_new_edit_clears_redo() {
        let mut history = EditHistory::new(with_intensity(70.0));
        history.snapshot();
        history.set(with_intensity(80.0));
        history.undo().unwrap();
        assert!(history.can_redo());

        history.set(with_intensity(60.0));
        assert!(!history.can_redo());
    }

    #[test]
    fn test_undo_depth_is_capped() {
        let mut history = EditHistory::new(with_intensity(0.0));
        for i in 0..40 {
            history.snapshot();
            history.set(with_intensity(i as f32));
        }

        let mut undo_count = 0;
        while history.undo().is_some() {
            undo_count += 1;
        }
        assert_eq!(undo_count, 30);
        // The oldest reachable snapshot is the one 30 steps back, not 0.
        assert_eq!(history.current().intensity, 9.0);
    }

    #[test]
    fn test_style_switch_snapshot() {
        let mut history = EditHistory::new(GlowParameters::default_for(GlowStyle::SoftBloom));
        history.snapshot();
        history.set(GlowParameters::default_for(GlowStyle::CinematicHalo));
        assert_eq!(history.current().style, GlowStyle::CinematicHalo);

        history.undo().unwrap();
        assert_eq!(history.current().style, GlowStyle::SoftBloom);
    }

    #[test]
    fn test_empty_stacks_return_none() {
        let mut history = EditHistory::new(GlowParameters::default());
        assert!(history.undo().is_none());
        assert!(history.redo().is_none());
    }
}
