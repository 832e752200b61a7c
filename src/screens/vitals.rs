//! Vitals entry modal.
//!
//! ```text
//! ┌ Record Vitals ───── Esc ┐
//! │ Blood Pressure (mmHg)   │
//! │ [Systolic ] [Diastolic] │
//! │ Heart Rate   SpO2 (%)   │
//! │ [        ]   [        ] │
//! │ Temperature  Resp. Rate │
//! │ [        ]   [        ] │
//! │ Consciousness Level     │
//! │ [<      Alert       >]  │
//! │ Additional Notes        │
//! │ [                     ] │
//! │ [Save Vitals] [Cancel]  │
//! └─────────────────────────┘
//! ```

use core::fmt::Write;

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use embedded_graphics::text::Text;
use heapless::String;
use smartevp_common::colors::{BLUE_600, SLATE_200, WHITE};
use smartevp_common::config::BUTTON_HEIGHT;
use smartevp_common::styles::{BODY_STYLE, CENTERED, LABEL_CHAR_WIDTH, LEFT_ALIGNED, MUTED_STYLE};
use smartevp_common::vitals::{VitalsField, VitalsForm};
use smartevp_common::widgets::{ButtonKind, draw_button, draw_card, draw_focus_ring, draw_modal};

const ROW_HEIGHT: i32 = 32;
const LABEL_HEIGHT: i32 = 12;
const BOX_HEIGHT: u32 = 16;
const COLUMN_GAP: u32 = 4;
const BOX_PAD: i32 = 4;

/// Where a field sits in the form grid, by row.
#[derive(Clone, Copy)]
enum Slot {
    Left(i32),
    Right(i32),
    Full(i32),
}

const fn slot(field: VitalsField) -> Slot {
    match field {
        VitalsField::Systolic => Slot::Left(0),
        VitalsField::Diastolic => Slot::Right(0),
        VitalsField::HeartRate => Slot::Left(1),
        VitalsField::Spo2 => Slot::Right(1),
        VitalsField::Temperature => Slot::Left(2),
        VitalsField::RespiratoryRate => Slot::Right(2),
        VitalsField::Consciousness => Slot::Full(3),
        VitalsField::Notes => Slot::Full(4),
    }
}

/// Draw the vitals form over the current screen.
pub fn draw_vitals_overlay<D>(display: &mut D, form: &VitalsForm)
where
    D: DrawTarget<Color = Rgb565>,
{
    let content = draw_modal(display, "Record Vitals");
    let half = (content.size.width - COLUMN_GAP) / 2;

    for field in VitalsField::ALL {
        let (row, x, width) = match slot(field) {
            Slot::Left(row) => (row, 0, half),
            Slot::Right(row) => (row, (half + COLUMN_GAP) as i32, half),
            Slot::Full(row) => (row, 0, content.size.width),
        };
        let top = content.top_left + Point::new(x, row * ROW_HEIGHT);

        // Blood pressure shares one caption; the boxes carry placeholders.
        let caption = match field {
            VitalsField::Systolic => Some("Blood Pressure (mmHg)"),
            VitalsField::Diastolic => None,
            other => Some(other.label()),
        };
        if let Some(caption) = caption {
            Text::with_text_style(caption, top + Point::new(0, 8), MUTED_STYLE, LEFT_ALIGNED)
                .draw(display)
                .ok();
        }

        let area = Rectangle::new(top + Point::new(0, LABEL_HEIGHT), Size::new(width, BOX_HEIGHT));
        draw_field(display, form, field, area);
    }

    let hint_y = content.top_left.y + 5 * ROW_HEIGHT + 10;
    Text::with_text_style(
        "Tab: next field  Enter: save",
        Point::new(content.center().x, hint_y),
        MUTED_STYLE,
        CENTERED,
    )
    .draw(display)
    .ok();

    let button_y = content.top_left.y + content.size.height as i32 - BUTTON_HEIGHT as i32;
    let save = Rectangle::new(Point::new(content.top_left.x, button_y), Size::new(half, BUTTON_HEIGHT));
    let cancel = Rectangle::new(
        Point::new(content.top_left.x + (half + COLUMN_GAP) as i32, button_y),
        Size::new(half, BUTTON_HEIGHT),
    );
    draw_button(display, save, "Save Vitals", ButtonKind::Filled(BLUE_600), false);
    draw_button(display, cancel, "Cancel", ButtonKind::Outline, false);
}

fn draw_field<D>(display: &mut D, form: &VitalsForm, field: VitalsField, area: Rectangle)
where
    D: DrawTarget<Color = Rgb565>,
{
    let focused = form.focus() == field;
    let border = if focused { BLUE_600 } else { SLATE_200 };
    draw_card(display, area, WHITE, border);
    if focused {
        draw_focus_ring(display, area);
    }

    let baseline = area.top_left.y + 12;
    if field == VitalsField::Consciousness {
        let mut choice: String<32> = String::new();
        let _ = write!(choice, "< {} >", form.consciousness().label());
        Text::with_text_style(&choice, Point::new(area.center().x, baseline), BODY_STYLE, CENTERED)
            .draw(display)
            .ok();
        return;
    }

    let chars = ((area.size.width as i32 - 2 * BOX_PAD) as u32 / LABEL_CHAR_WIDTH) as usize;
    let pos = Point::new(area.top_left.x + BOX_PAD, baseline);
    let text = form.text(field);
    if text.is_empty() && !focused {
        Text::with_text_style(field.placeholder(), pos, MUTED_STYLE, LEFT_ALIGNED)
            .draw(display)
            .ok();
        return;
    }

    // Long notes scroll so the cursor stays visible
    let mut shown: String<40> = String::new();
    let room = if focused { chars.saturating_sub(1) } else { chars };
    let _ = shown.push_str(tail(text, room));
    if focused {
        let _ = shown.push('_');
    }
    Text::with_text_style(&shown, pos, BODY_STYLE, LEFT_ALIGNED)
        .draw(display)
        .ok();
}

/// Last `max` characters of `text`.
fn tail(text: &str, max: usize) -> &str {
    let skip = text.chars().count().saturating_sub(max);
    text.char_indices().nth(skip).map_or("", |(i, _)| &text[i..])
}

#[cfg(test)]
mod tests {
    use smartevp_common::widgets::MODAL_RECT;
    use smartevp_common::widgets::mock::CountingDisplay;

    use super::*;

    #[test]
    fn test_empty_form_draws_inside_modal() {
        let mut display = CountingDisplay::new();
        draw_vitals_overlay(&mut display, &VitalsForm::new());
        assert_eq!(display.out_of_bounds(), 0);
        assert!(display.count_color(BLUE_600) > 0, "Focused field and save button");
    }

    #[test]
    fn test_filled_form_draws() {
        let mut form = VitalsForm::new();
        for c in "120".chars() {
            form.type_char(c);
        }
        form.focus_next();
        for c in "80".chars() {
            form.type_char(c);
        }
        for _ in 0..5 {
            form.focus_next();
        }
        assert_eq!(form.focus(), VitalsField::Notes);
        for c in "Patient stable, oxygen administered en route".chars() {
            form.type_char(c);
        }
        let mut display = CountingDisplay::new();
        draw_vitals_overlay(&mut display, &form);
        assert_eq!(display.out_of_bounds(), 0);
    }

    #[test]
    fn test_tail() {
        assert_eq!(tail("abcdef", 3), "def");
        assert_eq!(tail("abc", 10), "abc");
        assert_eq!(tail("abc", 0), "");
    }

    #[test]
    fn test_rows_fit_above_buttons() {
        let content_top = MODAL_RECT.top_left.y + 24;
        let rows_bottom = content_top + 5 * ROW_HEIGHT;
        let buttons = MODAL_RECT.top_left.y + MODAL_RECT.size.height as i32 - 8 - BUTTON_HEIGHT as i32;
        assert!(rows_bottom + 12 < buttons);
    }

    #[test]
    fn test_captions_fit_columns() {
        let half = (MODAL_RECT.size.width - 16 - COLUMN_GAP) / 2;
        for field in [VitalsField::HeartRate, VitalsField::Temperature] {
            assert!(field.label().len() as u32 * LABEL_CHAR_WIDTH <= half, "{field:?}");
        }
        for field in [VitalsField::Spo2, VitalsField::RespiratoryRate] {
            assert!(field.label().len() as u32 * LABEL_CHAR_WIDTH <= half + 8, "{field:?}");
        }
    }
}
