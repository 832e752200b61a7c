//! Voice note recorder modal.

use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Circle, PrimitiveStyle, Rectangle};
use embedded_graphics::text::Text;
use smartevp_common::animations::{RECORDING_PULSE_MS, blend_rgb565, pulse};
use smartevp_common::colors::{RED_100, RED_600, SLATE_100, SLATE_200};
use smartevp_common::config::{BUTTON_HEIGHT, LINE_HEIGHT};
use smartevp_common::styles::{BODY_STYLE, CENTERED, HEADING_FONT, LEFT_ALIGNED, MUTED_STYLE, VALUE_FONT_MEDIUM};
use smartevp_common::voice::{SpeechRecognizer, VoiceRecorder};
use smartevp_common::widgets::{ButtonKind, draw_button, draw_card, draw_modal, draw_wrapped_text};

const DOT_DIAMETER: u32 = 12;
const TRANSCRIPT_TOP: i32 = 64;
const TRANSCRIPT_HEIGHT: u32 = 132;
const TRANSCRIPT_PAD: i32 = 6;
const TRANSCRIPT_LINES: usize = ((TRANSCRIPT_HEIGHT - 2 * TRANSCRIPT_PAD as u32) / LINE_HEIGHT as u32) as usize;

const RECORDING_STYLE: MonoTextStyle<'static, Rgb565> = MonoTextStyle::new(HEADING_FONT, RED_600);

/// Draw the recorder over the current screen.
pub fn draw_voice_overlay<D, R>(display: &mut D, recorder: &VoiceRecorder<R>, now_ms: u64)
where
    D: DrawTarget<Color = Rgb565>,
    R: SpeechRecognizer,
{
    let content = draw_modal(display, "Record Voice Note");
    let left = content.top_left.x;
    let top = content.top_left.y;
    let width = content.size.width;

    // Recording indicator
    let phase = pulse(now_ms.saturating_sub(recorder.started_ms()), RECORDING_PULSE_MS);
    let dot = if recorder.is_recording() {
        blend_rgb565(RED_600, RED_100, phase)
    } else {
        SLATE_200
    };
    Circle::new(Point::new(left, top + 2), DOT_DIAMETER)
        .into_styled(PrimitiveStyle::with_fill(dot))
        .draw(display)
        .ok();
    Text::with_text_style("Recording", Point::new(left + 18, top + 12), RECORDING_STYLE, LEFT_ALIGNED)
        .draw(display)
        .ok();

    let center_x = left + width as i32 / 2;
    let duration = recorder.duration_label();
    Text::with_text_style(
        &duration,
        Point::new(center_x, top + 40),
        MonoTextStyle::new(VALUE_FONT_MEDIUM, RED_600),
        CENTERED,
    )
    .draw(display)
    .ok();
    let status = if recorder.has_recognizer() {
        "Listening..."
    } else {
        "Speech recognition unavailable"
    };
    Text::with_text_style(status, Point::new(center_x, top + 56), MUTED_STYLE, CENTERED)
        .draw(display)
        .ok();

    // Live transcript
    let area = Rectangle::new(Point::new(left, top + TRANSCRIPT_TOP), Size::new(width, TRANSCRIPT_HEIGHT));
    draw_card(display, area, SLATE_100, SLATE_200);
    let text_origin = area.top_left + Point::new(TRANSCRIPT_PAD, TRANSCRIPT_PAD);
    let text_width = width - 2 * TRANSCRIPT_PAD as u32;
    if recorder.transcript().is_empty() {
        Text::with_text_style("Start speaking...", text_origin + Point::new(0, 8), MUTED_STYLE, LEFT_ALIGNED)
            .draw(display)
            .ok();
    } else {
        draw_wrapped_text(display, recorder.transcript(), text_origin, text_width, TRANSCRIPT_LINES, BODY_STYLE);
    }

    let button_y = content.top_left.y + content.size.height as i32 - BUTTON_HEIGHT as i32;
    let half = (width - 8) / 2;
    let save = Rectangle::new(Point::new(left, button_y), Size::new(half, BUTTON_HEIGHT));
    let cancel = Rectangle::new(Point::new(left + (half + 8) as i32, button_y), Size::new(half, BUTTON_HEIGHT));
    draw_button(display, save, "Stop & Save", ButtonKind::Filled(RED_600), true);
    draw_button(display, cancel, "Cancel", ButtonKind::Outline, false);
}

#[cfg(test)]
mod tests {
    use smartevp_common::widgets::MODAL_RECT;
    use smartevp_common::widgets::mock::CountingDisplay;

    use super::*;
    use crate::dictation::ScriptedDictation;

    #[test]
    fn test_overlay_without_recognizer() {
        let mut recorder: VoiceRecorder<ScriptedDictation> = VoiceRecorder::new(None);
        recorder.start(0);
        let mut display = CountingDisplay::new();
        draw_voice_overlay(&mut display, &recorder, 0);
        assert_eq!(display.out_of_bounds(), 0);
        assert!(display.count_color(RED_600) > 0, "Indicator and save button");
    }

    #[test]
    fn test_overlay_with_dictation() {
        let mut recorder = VoiceRecorder::new(Some(ScriptedDictation::new()));
        recorder.start(0);
        recorder.poll(3_000);
        assert!(!recorder.transcript().is_empty());
        let mut display = CountingDisplay::new();
        draw_voice_overlay(&mut display, &recorder, 3_000);
        assert_eq!(display.out_of_bounds(), 0);
    }

    #[test]
    fn test_transcript_fits_modal() {
        let bottom = MODAL_RECT.top_left.y + 24 + TRANSCRIPT_TOP + TRANSCRIPT_HEIGHT as i32;
        let buttons = MODAL_RECT.top_left.y + MODAL_RECT.size.height as i32 - 8 - BUTTON_HEIGHT as i32;
        assert!(bottom < buttons);
        assert!(TRANSCRIPT_LINES >= 8);
    }
}
