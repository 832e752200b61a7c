//! Vitals entry form.
//!
//! Keyboard-driven form state for the vitals overlay. Every field is kept as
//! text while editing and parsed only on save, so a half-typed value never
//! blocks editing another field.
//!
//! # Parsing Rules
//!
//! - Empty fields become `None`
//! - Blood pressure is recorded only when both systolic and diastolic are present
//! - Integer fields parse as `u16`, temperature as `f32`
//! - A non-empty field that fails to parse is an error and nothing is saved

use core::fmt;

use heapless::String;

use crate::trip::{BloodPressure, Consciousness, NOTES_LEN, VitalsRecord};

/// Maximum characters in an integer field.
const INT_FIELD_LEN: usize = 5;

/// Maximum characters in the temperature field.
const TEMP_FIELD_LEN: usize = 6;

/// Form fields in focus order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VitalsField {
    Systolic,
    Diastolic,
    HeartRate,
    Spo2,
    Temperature,
    RespiratoryRate,
    Consciousness,
    Notes,
}

impl VitalsField {
    pub const ALL: [Self; 8] = [
        Self::Systolic,
        Self::Diastolic,
        Self::HeartRate,
        Self::Spo2,
        Self::Temperature,
        Self::RespiratoryRate,
        Self::Consciousness,
        Self::Notes,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            Self::Systolic => "Systolic",
            Self::Diastolic => "Diastolic",
            Self::HeartRate => "Heart Rate (BPM)",
            Self::Spo2 => "SpO2 (%)",
            Self::Temperature => "Temperature (F)",
            Self::RespiratoryRate => "Resp. Rate (/min)",
            Self::Consciousness => "Consciousness Level",
            Self::Notes => "Additional Notes",
        }
    }

    /// Hint shown in an empty field.
    pub const fn placeholder(self) -> &'static str {
        match self {
            Self::Systolic => "Systolic",
            Self::Diastolic => "Diastolic",
            Self::HeartRate => "e.g., 85",
            Self::Spo2 => "e.g., 97",
            Self::Temperature => "e.g., 98.6",
            Self::RespiratoryRate => "e.g., 16",
            Self::Consciousness => "",
            Self::Notes => "Any other observations...",
        }
    }

    const fn index(self) -> usize {
        match self {
            Self::Systolic => 0,
            Self::Diastolic => 1,
            Self::HeartRate => 2,
            Self::Spo2 => 3,
            Self::Temperature => 4,
            Self::RespiratoryRate => 5,
            Self::Consciousness => 6,
            Self::Notes => 7,
        }
    }

    /// Next field, wrapping.
    pub const fn next(self) -> Self { Self::ALL[(self.index() + 1) % Self::ALL.len()] }

    /// Previous field, wrapping.
    pub const fn prev(self) -> Self { Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()] }

    /// Whether `c` may be typed into this field given its current `text`.
    fn accepts(self, c: char, text: &str) -> bool {
        match self {
            Self::Temperature => c.is_ascii_digit() || (c == '.' && !text.contains('.')),
            Self::Notes => c.is_ascii() && !c.is_ascii_control(),
            Self::Consciousness => false,
            _ => c.is_ascii_digit(),
        }
    }
}

impl fmt::Display for VitalsField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.label()) }
}

/// Errors raised when saving the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum VitalsError {
    #[error("{field} is not a valid number")]
    InvalidNumber { field: VitalsField },
}

/// Editable vitals form.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VitalsForm {
    focus: VitalsField,
    systolic: String<INT_FIELD_LEN>,
    diastolic: String<INT_FIELD_LEN>,
    heart_rate: String<INT_FIELD_LEN>,
    spo2: String<INT_FIELD_LEN>,
    temperature: String<TEMP_FIELD_LEN>,
    respiratory_rate: String<INT_FIELD_LEN>,
    consciousness: Consciousness,
    notes: String<NOTES_LEN>,
}

impl Default for VitalsForm {
    fn default() -> Self { Self::new() }
}

impl VitalsForm {
    pub const fn new() -> Self {
        Self {
            focus: VitalsField::Systolic,
            systolic: String::new(),
            diastolic: String::new(),
            heart_rate: String::new(),
            spo2: String::new(),
            temperature: String::new(),
            respiratory_rate: String::new(),
            consciousness: Consciousness::Alert,
            notes: String::new(),
        }
    }

    #[inline]
    pub const fn focus(&self) -> VitalsField { self.focus }

    pub fn focus_next(&mut self) { self.focus = self.focus.next(); }

    pub fn focus_prev(&mut self) { self.focus = self.focus.prev(); }

    #[inline]
    pub const fn consciousness(&self) -> Consciousness { self.consciousness }

    /// Step the consciousness choice forward or backward.
    pub fn cycle_consciousness(&mut self, forward: bool) {
        self.consciousness = if forward {
            self.consciousness.next()
        } else {
            self.consciousness.prev()
        };
    }

    /// Current text of a field (the option label for consciousness).
    pub fn text(&self, field: VitalsField) -> &str {
        match field {
            VitalsField::Systolic => self.systolic.as_str(),
            VitalsField::Diastolic => self.diastolic.as_str(),
            VitalsField::HeartRate => self.heart_rate.as_str(),
            VitalsField::Spo2 => self.spo2.as_str(),
            VitalsField::Temperature => self.temperature.as_str(),
            VitalsField::RespiratoryRate => self.respiratory_rate.as_str(),
            VitalsField::Consciousness => self.consciousness.label(),
            VitalsField::Notes => self.notes.as_str(),
        }
    }

    /// Type `c` into the focused field. Returns `false` if rejected or full.
    pub fn type_char(&mut self, c: char) -> bool {
        let field = self.focus;
        if !field.accepts(c, self.text(field)) {
            return false;
        }
        match field {
            VitalsField::Systolic => self.systolic.push(c).is_ok(),
            VitalsField::Diastolic => self.diastolic.push(c).is_ok(),
            VitalsField::HeartRate => self.heart_rate.push(c).is_ok(),
            VitalsField::Spo2 => self.spo2.push(c).is_ok(),
            VitalsField::Temperature => self.temperature.push(c).is_ok(),
            VitalsField::RespiratoryRate => self.respiratory_rate.push(c).is_ok(),
            VitalsField::Notes => self.notes.push(c).is_ok(),
            VitalsField::Consciousness => false,
        }
    }

    /// Delete the last character of the focused field.
    pub fn backspace(&mut self) {
        match self.focus {
            VitalsField::Systolic => self.systolic.pop(),
            VitalsField::Diastolic => self.diastolic.pop(),
            VitalsField::HeartRate => self.heart_rate.pop(),
            VitalsField::Spo2 => self.spo2.pop(),
            VitalsField::Temperature => self.temperature.pop(),
            VitalsField::RespiratoryRate => self.respiratory_rate.pop(),
            VitalsField::Notes => self.notes.pop(),
            VitalsField::Consciousness => None,
        };
    }

    /// Parse the form into a record stamped `now_ms`. The id is assigned by the trip.
    pub fn build(&self, now_ms: u64) -> Result<VitalsRecord, VitalsError> {
        let systolic = parse_int(&self.systolic, VitalsField::Systolic)?;
        let diastolic = parse_int(&self.diastolic, VitalsField::Diastolic)?;
        let blood_pressure = match (systolic, diastolic) {
            (Some(systolic), Some(diastolic)) => Some(BloodPressure { systolic, diastolic }),
            _ => None,
        };

        Ok(VitalsRecord {
            id: 0,
            timestamp_ms: now_ms,
            blood_pressure,
            heart_rate: parse_int(&self.heart_rate, VitalsField::HeartRate)?,
            spo2: parse_int(&self.spo2, VitalsField::Spo2)?,
            temperature: parse_temp(&self.temperature)?,
            respiratory_rate: parse_int(&self.respiratory_rate, VitalsField::RespiratoryRate)?,
            consciousness: self.consciousness,
            notes: self.notes.clone(),
        })
    }
}

fn parse_int(text: &str, field: VitalsField) -> Result<Option<u16>, VitalsError> {
    if text.is_empty() {
        return Ok(None);
    }
    text.parse().map(Some).map_err(|_| VitalsError::InvalidNumber { field })
}

fn parse_temp(text: &str) -> Result<Option<f32>, VitalsError> {
    if text.is_empty() {
        return Ok(None);
    }
    text.parse().map(Some).map_err(|_| VitalsError::InvalidNumber {
        field: VitalsField::Temperature,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn type_str(form: &mut VitalsForm, s: &str) {
        for c in s.chars() {
            form.type_char(c);
        }
    }

    fn focus(form: &mut VitalsForm, field: VitalsField) {
        while form.focus() != field {
            form.focus_next();
        }
    }

    #[test]
    fn test_empty_form_builds_all_none() {
        let rec = VitalsForm::new().build(10).unwrap();
        assert_eq!(rec.blood_pressure, None);
        assert_eq!(rec.heart_rate, None);
        assert_eq!(rec.spo2, None);
        assert_eq!(rec.temperature, None);
        assert_eq!(rec.respiratory_rate, None);
        assert_eq!(rec.consciousness, Consciousness::Alert);
        assert!(rec.notes.is_empty());
        assert_eq!(rec.timestamp_ms, 10);
    }

    #[test]
    fn test_full_form_parses() {
        let mut form = VitalsForm::new();
        type_str(&mut form, "120");
        form.focus_next();
        type_str(&mut form, "80");
        form.focus_next();
        type_str(&mut form, "85");
        form.focus_next();
        type_str(&mut form, "97");
        form.focus_next();
        type_str(&mut form, "98.6");
        form.focus_next();
        type_str(&mut form, "16");
        form.focus_next();
        form.cycle_consciousness(true);
        form.focus_next();
        type_str(&mut form, "Sweating");

        let rec = form.build(0).unwrap();
        assert_eq!(
            rec.blood_pressure,
            Some(BloodPressure {
                systolic: 120,
                diastolic: 80
            })
        );
        assert_eq!(rec.heart_rate, Some(85));
        assert_eq!(rec.spo2, Some(97));
        assert!((rec.temperature.unwrap() - 98.6).abs() < 1e-4);
        assert_eq!(rec.respiratory_rate, Some(16));
        assert_eq!(rec.consciousness, Consciousness::Verbal);
        assert_eq!(rec.notes.as_str(), "Sweating");
    }

    #[test]
    fn test_blood_pressure_needs_both_halves() {
        let mut form = VitalsForm::new();
        type_str(&mut form, "120");
        let rec = form.build(0).unwrap();
        assert_eq!(rec.blood_pressure, None, "Systolic alone is not recorded");
    }

    #[test]
    fn test_numeric_fields_reject_letters() {
        let mut form = VitalsForm::new();
        assert!(!form.type_char('a'));
        assert!(!form.type_char('.'), "Dot only allowed in temperature");
        assert!(form.type_char('9'));
        assert_eq!(form.text(VitalsField::Systolic), "9");
    }

    #[test]
    fn test_temperature_single_dot() {
        let mut form = VitalsForm::new();
        focus(&mut form, VitalsField::Temperature);
        type_str(&mut form, "98.6.");
        assert_eq!(form.text(VitalsField::Temperature), "98.6");
    }

    #[test]
    fn test_lone_dot_is_invalid() {
        let mut form = VitalsForm::new();
        focus(&mut form, VitalsField::Temperature);
        form.type_char('.');
        assert_eq!(
            form.build(0),
            Err(VitalsError::InvalidNumber {
                field: VitalsField::Temperature
            })
        );
    }

    #[test]
    fn test_out_of_range_integer_is_invalid() {
        let mut form = VitalsForm::new();
        focus(&mut form, VitalsField::HeartRate);
        type_str(&mut form, "99999");
        let err = form.build(0).unwrap_err();
        assert_eq!(
            err,
            VitalsError::InvalidNumber {
                field: VitalsField::HeartRate
            }
        );
        assert_eq!(form.text(VitalsField::HeartRate), "99999", "Form keeps its input on error");
    }

    #[test]
    fn test_backspace_and_field_limit() {
        let mut form = VitalsForm::new();
        type_str(&mut form, "123456");
        assert_eq!(form.text(VitalsField::Systolic), "12345", "Field capped at 5 chars");
        form.backspace();
        assert_eq!(form.text(VitalsField::Systolic), "1234");
    }

    #[test]
    fn test_focus_wraps() {
        let mut form = VitalsForm::new();
        form.focus_prev();
        assert_eq!(form.focus(), VitalsField::Notes);
        form.focus_next();
        assert_eq!(form.focus(), VitalsField::Systolic);
    }

    #[test]
    fn test_consciousness_field_ignores_typing() {
        let mut form = VitalsForm::new();
        focus(&mut form, VitalsField::Consciousness);
        assert!(!form.type_char('1'));
        assert_eq!(form.text(VitalsField::Consciousness), "Alert");
    }
}
