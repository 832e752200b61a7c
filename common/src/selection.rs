//! Triage and hospital-type selectors.
//!
//! Both selectors separate the keyboard cursor from the selection: arrows move
//! the cursor, Space/Return act on the card under it. The "next" control of
//! each screen is enabled only once something is selected.

use core::fmt::Write;

use heapless::{String, Vec};

use crate::trip::{HOSPITAL_TYPE_COUNT, HospitalType, Priority};

/// Title of the triage "next" button.
pub const PRIORITY_NEXT_LABEL: &str = "Next: Select Hospital Type";

/// Columns in the hospital-type grid.
pub const HOSPITAL_GRID_COLUMNS: usize = 2;

// =============================================================================
// Priority
// =============================================================================

/// Cursor and selection over the three priorities.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PrioritySelector {
    cursor: usize,
    selected: Option<Priority>,
}

impl PrioritySelector {
    pub const fn new() -> Self {
        Self {
            cursor: 0,
            selected: None,
        }
    }

    /// Priority under the cursor.
    #[inline]
    pub const fn cursor(&self) -> Priority { Priority::ALL[self.cursor] }

    #[inline]
    pub const fn selected(&self) -> Option<Priority> { self.selected }

    pub fn move_up(&mut self) { self.cursor = self.cursor.saturating_sub(1); }

    pub fn move_down(&mut self) { self.cursor = (self.cursor + 1).min(Priority::ALL.len() - 1); }

    /// Select the priority under the cursor.
    pub fn select_cursor(&mut self) { self.selected = Some(self.cursor()); }

    /// Select `priority` and move the cursor to it.
    pub fn select(&mut self, priority: Priority) {
        self.selected = Some(priority);
        if let Some(i) = Priority::ALL.iter().position(|p| *p == priority) {
            self.cursor = i;
        }
    }

    /// Whether the "next" control is enabled.
    #[inline]
    pub const fn next_enabled(&self) -> bool { self.selected.is_some() }

    /// The chosen priority, if the "next" control is enabled.
    #[inline]
    pub const fn confirm(&self) -> Option<Priority> { self.selected }
}

// =============================================================================
// Hospital Types
// =============================================================================

/// Cursor over the 2-column grid plus an ordered multi-selection.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HospitalSelector {
    cursor: usize,
    selected: Vec<HospitalType, HOSPITAL_TYPE_COUNT>,
}

impl HospitalSelector {
    pub const fn new() -> Self {
        Self {
            cursor: 0,
            selected: Vec::new(),
        }
    }

    /// Type under the cursor.
    #[inline]
    pub const fn cursor(&self) -> HospitalType { HospitalType::ALL[self.cursor] }

    /// Cursor position as (row, column).
    #[inline]
    pub const fn cursor_cell(&self) -> (usize, usize) { (self.cursor / HOSPITAL_GRID_COLUMNS, self.cursor % HOSPITAL_GRID_COLUMNS) }

    pub fn move_left(&mut self) {
        if self.cursor % HOSPITAL_GRID_COLUMNS > 0 {
            self.cursor -= 1;
        }
    }

    pub fn move_right(&mut self) {
        if self.cursor % HOSPITAL_GRID_COLUMNS < HOSPITAL_GRID_COLUMNS - 1 && self.cursor + 1 < HOSPITAL_TYPE_COUNT {
            self.cursor += 1;
        }
    }

    pub fn move_up(&mut self) {
        if self.cursor >= HOSPITAL_GRID_COLUMNS {
            self.cursor -= HOSPITAL_GRID_COLUMNS;
        }
    }

    pub fn move_down(&mut self) {
        if self.cursor + HOSPITAL_GRID_COLUMNS < HOSPITAL_TYPE_COUNT {
            self.cursor += HOSPITAL_GRID_COLUMNS;
        }
    }

    /// Add `ty` if absent, remove it if present. Remaining order is kept.
    pub fn toggle(&mut self, ty: HospitalType) {
        if let Some(i) = self.selected.iter().position(|t| *t == ty) {
            self.selected.remove(i);
        } else {
            // Capacity equals the number of distinct types
            self.selected.push(ty).ok();
        }
    }

    /// Toggle the type under the cursor.
    pub fn toggle_cursor(&mut self) { self.toggle(self.cursor()); }

    #[inline]
    pub fn is_selected(&self, ty: HospitalType) -> bool { self.selected.contains(&ty) }

    /// Selected types in selection order.
    #[inline]
    pub fn selected(&self) -> &[HospitalType] { &self.selected }

    /// Whether the confirm control is enabled.
    #[inline]
    pub fn can_confirm(&self) -> bool { !self.selected.is_empty() }

    /// Header badge text, `None` while nothing is selected.
    pub fn badge(&self) -> Option<String<16>> {
        if self.selected.is_empty() {
            return None;
        }
        let mut s = String::new();
        let _ = write!(s, "{} selected", self.selected.len());
        Some(s)
    }

    /// Confirm button text.
    pub fn confirm_label(&self) -> String<40> {
        let mut s = String::new();
        match self.selected.len() {
            0 => {
                let _ = s.push_str("Select at least one type");
            }
            1 => {
                let _ = s.push_str("Navigate with 1 hospital type");
            }
            n => {
                let _ = write!(s, "Navigate with {n} hospital types");
            }
        }
        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_priority_next_disabled_until_selected() {
        let mut sel = PrioritySelector::new();
        assert!(!sel.next_enabled(), "Unset priority keeps next disabled");
        assert_eq!(sel.confirm(), None);

        sel.move_down();
        sel.select_cursor();
        assert!(sel.next_enabled());
        assert_eq!(sel.confirm(), Some(Priority::Medium));
    }

    #[test]
    fn test_priority_cursor_clamps() {
        let mut sel = PrioritySelector::new();
        sel.move_up();
        assert_eq!(sel.cursor(), Priority::High);
        for _ in 0..5 {
            sel.move_down();
        }
        assert_eq!(sel.cursor(), Priority::Low);
    }

    #[test]
    fn test_priority_select_moves_cursor() {
        let mut sel = PrioritySelector::new();
        sel.select(Priority::Low);
        assert_eq!(sel.cursor(), Priority::Low);
        assert_eq!(sel.selected(), Some(Priority::Low));
    }

    #[test]
    fn test_hospital_confirm_disabled_when_empty() {
        let sel = HospitalSelector::new();
        assert!(!sel.can_confirm());
        assert_eq!(sel.confirm_label().as_str(), "Select at least one type");
        assert_eq!(sel.badge(), None);
    }

    #[test]
    fn test_hospital_label_reflects_count() {
        let mut sel = HospitalSelector::new();
        sel.toggle(HospitalType::Cardiac);
        assert!(sel.can_confirm());
        assert_eq!(sel.confirm_label().as_str(), "Navigate with 1 hospital type");
        assert_eq!(sel.badge().unwrap().as_str(), "1 selected");

        sel.toggle(HospitalType::Trauma);
        assert_eq!(sel.confirm_label().as_str(), "Navigate with 2 hospital types");
        assert_eq!(sel.badge().unwrap().as_str(), "2 selected");
    }

    #[test]
    fn test_hospital_toggle_preserves_order() {
        let mut sel = HospitalSelector::new();
        sel.toggle(HospitalType::Neurology);
        sel.toggle(HospitalType::Cardiac);
        sel.toggle(HospitalType::General);
        sel.toggle(HospitalType::Cardiac);
        assert_eq!(sel.selected(), &[HospitalType::Neurology, HospitalType::General]);
        sel.toggle(HospitalType::General);
        sel.toggle(HospitalType::Neurology);
        assert!(!sel.can_confirm(), "Deselecting everything disables confirm again");
    }

    #[test]
    fn test_hospital_grid_navigation() {
        let mut sel = HospitalSelector::new();
        assert_eq!(sel.cursor_cell(), (0, 0));
        sel.move_left();
        assert_eq!(sel.cursor(), HospitalType::MultiSpecialty, "Left edge clamps");
        sel.move_right();
        assert_eq!(sel.cursor(), HospitalType::Cardiac);
        sel.move_right();
        assert_eq!(sel.cursor(), HospitalType::Cardiac, "Right edge clamps");
        sel.move_down();
        assert_eq!(sel.cursor(), HospitalType::Maternity);
        for _ in 0..5 {
            sel.move_down();
        }
        assert_eq!(sel.cursor(), HospitalType::General);
        assert_eq!(sel.cursor_cell(), (3, 1));
        sel.toggle_cursor();
        assert!(sel.is_selected(HospitalType::General));
    }
}
