//! Trip summary: statistics, recorded notes and vitals, share and return home.
//!
//! ```text
//! ┌──────────────────────────┐
//! │ Trip Completed    [Done] │
//! ├──────────────────────────┤
//! │ Duration Distance Speed  │
//! │ Priority Hospital        │
//! ├──────────────────────────┤
//! │ Voice Notes          (2) │  Up/Down scrolls this area
//! │  ...                     │
//! │ Vitals    1 vital sign.. │
//! │  ...                     │
//! ├──────────────────────────┤
//! │ [====== sharing ======]  │
//! │ [Share Details][Home]    │
//! └──────────────────────────┘
//! ```

use core::fmt::Write;

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{PrimitiveStyle, Rectangle};
use embedded_graphics::text::Text;
use heapless::String;
use smartevp_common::colors::{BLUE_600, GREEN_50, GREEN_600, SLATE_200, SLATE_300, WHITE};
use smartevp_common::config::{BOTTOM_BUTTON_Y, BUTTON_HEIGHT, CONTENT_WIDTH, HEADER_HEIGHT, LINE_HEIGHT, MARGIN, SCREEN_WIDTH};
use smartevp_common::styles::{BODY_STYLE, CENTERED, HEADING_STYLE, LABEL_CHAR_WIDTH, LEFT_ALIGNED, MUTED_STYLE, RIGHT_ALIGNED};
use smartevp_common::summary::{
    ShareProgress,
    TRIP_AVG_SPEED,
    TRIP_DISTANCE,
    TripStats,
    clock_label,
    vitals_count_label,
    vitals_lines,
    vitals_notes,
    voice_note_heading,
};
use smartevp_common::trip::{Trip, VitalsRecord, VoiceNote};
use smartevp_common::widgets::{
    ButtonKind,
    HeaderRight,
    draw_badge,
    draw_button,
    draw_card,
    draw_header,
    draw_divider,
    draw_label_value,
    draw_progress_bar,
    draw_tick,
};
use smartevp_common::wrap_lines;

use super::ButtonFocus;

const STATS_RECT: Rectangle = Rectangle::new(Point::new(MARGIN as i32, HEADER_HEIGHT as i32 + 6), Size::new(CONTENT_WIDTH, 64));
const STATS_COLUMN: i32 = CONTENT_WIDTH as i32 / 3;

const SCROLL_TOP: i32 = STATS_RECT.top_left.y + STATS_RECT.size.height as i32 + 6;
const SCROLL_RECT: Rectangle = Rectangle::new(Point::new(0, SCROLL_TOP), Size::new(SCREEN_WIDTH, 140));
const SCROLLBAR_X: i32 = SCREEN_WIDTH as i32 - 3;

const SHARE_TOP: i32 = SCROLL_TOP + SCROLL_RECT.size.height as i32 + 4;
const PROGRESS_RECT: Rectangle = Rectangle::new(Point::new(MARGIN as i32, SHARE_TOP + 16), Size::new(CONTENT_WIDTH, 6));

const BUTTON_WIDTH: u32 = (CONTENT_WIDTH - MARGIN) / 2;
const SHARE_RECT: Rectangle = Rectangle::new(Point::new(MARGIN as i32, BOTTOM_BUTTON_Y), Size::new(BUTTON_WIDTH, BUTTON_HEIGHT));
const HOME_RECT: Rectangle = Rectangle::new(
    Point::new((MARGIN * 2 + BUTTON_WIDTH) as i32, BOTTOM_BUTTON_Y),
    Size::new(BUTTON_WIDTH, BUTTON_HEIGHT),
);

/// Record text is indented inside the scroll area.
const RECORD_LEFT: i32 = MARGIN as i32 + 6;
const RECORD_CHARS: usize = ((CONTENT_WIDTH - 12) / LABEL_CHAR_WIDTH) as usize;
const TRANSCRIPT_LINES: usize = 4;
const SECTION_HEIGHT: i32 = 18;
const RECORD_GAP: i32 = 6;

const _: () = assert!(PROGRESS_RECT.top_left.y + 6 < BOTTOM_BUTTON_Y);
const _: () = assert!(SHARE_TOP - 2 >= SCROLL_TOP + SCROLL_RECT.size.height as i32);

/// Screen state owned by the app rather than the trip.
pub struct SummaryView<'a> {
    pub share: &'a ShareProgress,
    pub focus: ButtonFocus,
    /// Pixels the record list is scrolled down.
    pub scroll: i32,
}

/// Draw the summary screen.
pub fn draw_summary<D>(display: &mut D, trip: &Trip, view: &SummaryView<'_>, now_ms: u64)
where
    D: DrawTarget<Color = Rgb565>,
{
    draw_header(display, "Trip Completed", Some("Patient delivered"), HeaderRight::Badge("Done", GREEN_50, GREEN_600));

    // Statistics
    let stats = TripStats::from_trip(trip, now_ms);
    draw_card(display, STATS_RECT, WHITE, SLATE_200);
    let origin = STATS_RECT.top_left + Point::new(6, 4);
    draw_label_value(display, origin, "Duration", &stats.duration_label());
    draw_label_value(display, origin + Point::new(STATS_COLUMN, 0), "Distance", TRIP_DISTANCE);
    draw_label_value(display, origin + Point::new(2 * STATS_COLUMN, 0), "Avg speed", TRIP_AVG_SPEED);

    let row2 = origin + Point::new(0, 30);
    Text::with_text_style("Criticality", row2 + Point::new(0, 8), MUTED_STYLE, LEFT_ALIGNED)
        .draw(display)
        .ok();
    match trip.priority {
        Some(p) => {
            draw_badge(display, row2 + Point::new(0, 12), p.badge(), p.color(), WHITE);
        }
        None => {
            Text::with_text_style("-", row2 + Point::new(0, 20), BODY_STYLE, LEFT_ALIGNED)
                .draw(display)
                .ok();
        }
    }
    let hospital = if stats.hospital.is_empty() { "-" } else { stats.hospital.as_str() };
    draw_label_value(display, row2 + Point::new(STATS_COLUMN, 0), "Hospital", hospital);

    // Records
    {
        let mut clipped = display.clipped(&SCROLL_RECT);
        let mut list = clipped.translated(Point::new(0, -view.scroll));
        draw_records(&mut list, trip);
    }
    let limit = summary_scroll_limit(trip);
    if limit > 0 {
        draw_scrollbar(display, view.scroll, limit);
    }

    draw_divider(display, SHARE_TOP - 2);
    draw_share_status(display, view.share, now_ms);

    let (share_label, share_kind) = match view.share {
        ShareProgress::Idle => ("S Share Details", ButtonKind::Filled(BLUE_600)),
        ShareProgress::Sharing { .. } => ("Sharing...", ButtonKind::Disabled),
        ShareProgress::Shared => ("Shared", ButtonKind::Disabled),
    };
    draw_button(display, SHARE_RECT, share_label, share_kind, view.focus == ButtonFocus::Primary);
    draw_button(display, HOME_RECT, "H Return Home", ButtonKind::Outline, view.focus == ButtonFocus::Secondary);
}

/// Largest useful scroll offset for `trip`'s record list.
pub fn summary_scroll_limit(trip: &Trip) -> i32 { (records_height(trip) - SCROLL_RECT.size.height as i32).max(0) }

// =============================================================================
// Record List
// =============================================================================

fn records_height(trip: &Trip) -> i32 {
    let notes: i32 = trip.voice_notes().iter().map(note_height).sum();
    let vitals: i32 = trip.vitals().iter().map(vitals_height).sum();
    let empty_rows = i32::from(trip.voice_notes().is_empty()) + i32::from(trip.vitals().is_empty());
    2 * SECTION_HEIGHT + notes + vitals + empty_rows * (LINE_HEIGHT + RECORD_GAP)
}

fn transcript_lines(note: &VoiceNote) -> usize { wrap_lines(&note.transcription, RECORD_CHARS).take(TRANSCRIPT_LINES).count() }

fn note_height(note: &VoiceNote) -> i32 { (2 + transcript_lines(note) as i32) * LINE_HEIGHT + RECORD_GAP }

fn vitals_height(record: &VitalsRecord) -> i32 {
    let rows = 1 + vitals_lines(record).len() + usize::from(vitals_notes(record).is_some());
    rows as i32 * LINE_HEIGHT + RECORD_GAP
}

fn draw_records<D>(display: &mut D, trip: &Trip)
where
    D: DrawTarget<Color = Rgb565>,
{
    let mut y = SCROLL_TOP;

    let mut count: String<8> = String::new();
    let _ = write!(count, "({})", trip.voice_notes().len());
    y = draw_section(display, y, "Voice Notes", &count);
    if trip.voice_notes().is_empty() {
        y = draw_empty(display, y, "No voice notes recorded");
    }
    for note in trip.voice_notes() {
        y = draw_note(display, y, note);
    }

    let count = vitals_count_label(trip.vitals().len());
    y = draw_section(display, y, "Vitals", &count);
    if trip.vitals().is_empty() {
        draw_empty(display, y, "No vitals recorded");
    }
    for record in trip.vitals() {
        y = draw_vitals(display, y, record);
    }
}

fn draw_section<D>(display: &mut D, y: i32, title: &str, detail: &str) -> i32
where
    D: DrawTarget<Color = Rgb565>,
{
    Text::with_text_style(title, Point::new(MARGIN as i32, y + 12), HEADING_STYLE, LEFT_ALIGNED)
        .draw(display)
        .ok();
    Text::with_text_style(detail, Point::new((MARGIN + CONTENT_WIDTH) as i32, y + 12), MUTED_STYLE, RIGHT_ALIGNED)
        .draw(display)
        .ok();
    y + SECTION_HEIGHT
}

fn draw_empty<D>(display: &mut D, y: i32, text: &str) -> i32
where
    D: DrawTarget<Color = Rgb565>,
{
    Text::with_text_style(text, Point::new(RECORD_LEFT, y + 8), MUTED_STYLE, LEFT_ALIGNED)
        .draw(display)
        .ok();
    y + LINE_HEIGHT + RECORD_GAP
}

fn draw_note<D>(display: &mut D, y: i32, note: &VoiceNote) -> i32
where
    D: DrawTarget<Color = Rgb565>,
{
    let height = note_height(note);
    draw_record_card(display, y, height);

    Text::with_text_style(&voice_note_heading(note), Point::new(RECORD_LEFT, y + 8), BODY_STYLE, LEFT_ALIGNED)
        .draw(display)
        .ok();
    let mut at: String<16> = String::new();
    let _ = write!(at, "at {}", clock_label(note.timestamp_ms));
    Text::with_text_style(&at, Point::new(RECORD_LEFT, y + 8 + LINE_HEIGHT), MUTED_STYLE, LEFT_ALIGNED)
        .draw(display)
        .ok();

    let mut line_y = y + 8 + 2 * LINE_HEIGHT;
    for line in wrap_lines(&note.transcription, RECORD_CHARS).take(TRANSCRIPT_LINES) {
        Text::with_text_style(line, Point::new(RECORD_LEFT, line_y), BODY_STYLE, LEFT_ALIGNED)
            .draw(display)
            .ok();
        line_y += LINE_HEIGHT;
    }
    y + height
}

fn draw_vitals<D>(display: &mut D, y: i32, record: &VitalsRecord) -> i32
where
    D: DrawTarget<Color = Rgb565>,
{
    let height = vitals_height(record);
    draw_record_card(display, y, height);

    let mut at: String<24> = String::new();
    let _ = write!(at, "Recorded at {}", clock_label(record.timestamp_ms));
    Text::with_text_style(&at, Point::new(RECORD_LEFT, y + 8), MUTED_STYLE, LEFT_ALIGNED)
        .draw(display)
        .ok();

    let mut line_y = y + 8 + LINE_HEIGHT;
    for line in vitals_lines(record) {
        Text::with_text_style(&line, Point::new(RECORD_LEFT, line_y), BODY_STYLE, LEFT_ALIGNED)
            .draw(display)
            .ok();
        line_y += LINE_HEIGHT;
    }
    if let Some(notes) = vitals_notes(record) {
        Text::with_text_style(&notes, Point::new(RECORD_LEFT, line_y), MUTED_STYLE, LEFT_ALIGNED)
            .draw(display)
            .ok();
    }
    y + height
}

fn draw_record_card<D>(display: &mut D, y: i32, height: i32)
where
    D: DrawTarget<Color = Rgb565>,
{
    let area = Rectangle::new(
        Point::new(MARGIN as i32, y - 2),
        Size::new(CONTENT_WIDTH, (height - RECORD_GAP + 2) as u32),
    );
    draw_card(display, area, WHITE, SLATE_200);
}

fn draw_scrollbar<D>(display: &mut D, scroll: i32, limit: i32)
where
    D: DrawTarget<Color = Rgb565>,
{
    let track = SCROLL_RECT.size.height as i32;
    let content = track + limit;
    let thumb = (track * track / content).max(8);
    let offset = (track - thumb) * scroll.clamp(0, limit) / limit;
    Rectangle::new(Point::new(SCROLLBAR_X, SCROLL_TOP + offset), Size::new(2, thumb as u32))
        .into_styled(PrimitiveStyle::with_fill(SLATE_300))
        .draw(display)
        .ok();
}

// =============================================================================
// Share Status
// =============================================================================

fn draw_share_status<D>(display: &mut D, share: &ShareProgress, now_ms: u64)
where
    D: DrawTarget<Color = Rgb565>,
{
    let center_x = PROGRESS_RECT.center().x;
    match share {
        ShareProgress::Idle => {
            Text::with_text_style("Share trip details with hospital", Point::new(center_x, SHARE_TOP + 14), MUTED_STYLE, CENTERED)
                .draw(display)
                .ok();
        }
        ShareProgress::Sharing { .. } => {
            Text::with_text_style("Sharing with hospital...", Point::new(center_x, SHARE_TOP + 10), BODY_STYLE, CENTERED)
                .draw(display)
                .ok();
            draw_progress_bar(display, PROGRESS_RECT, share.fraction(now_ms), BLUE_600, SLATE_200);
        }
        ShareProgress::Shared => {
            let text = "Details Shared!";
            let half_width = (text.len() as u32 * LABEL_CHAR_WIDTH) as i32 / 2;
            draw_tick(display, Point::new(center_x - half_width - 10, SHARE_TOP + 11), GREEN_600);
            Text::with_text_style(text, Point::new(center_x, SHARE_TOP + 14), BODY_STYLE, CENTERED)
                .draw(display)
                .ok();
        }
    }
}

#[cfg(test)]
mod tests {
    use smartevp_common::trip::{HospitalType, Priority};
    use smartevp_common::vitals::VitalsForm;
    use smartevp_common::widgets::mock::CountingDisplay;

    use super::*;

    fn completed_trip(notes: usize, vitals: usize) -> Trip {
        let mut trip = Trip::from_dispatch(0);
        trip.priority = Some(Priority::High);
        trip.set_hospital_types(&[HospitalType::Cardiac]);
        trip.destination = Some(smartevp_common::dispatch::destination());
        for i in 0..notes {
            let note = VoiceNote::new(60_000 * i as u64, 12, smartevp_common::voice::FALLBACK_TRANSCRIPT);
            trip.add_voice_note(note).ok();
        }
        let mut form = VitalsForm::new();
        for c in "120".chars() {
            form.type_char(c);
        }
        for i in 0..vitals {
            if let Ok(record) = form.build(90_000 * i as u64) {
                trip.add_vitals(record).ok();
            }
        }
        trip
    }

    fn view(share: &ShareProgress) -> SummaryView<'_> {
        SummaryView {
            share,
            focus: ButtonFocus::Primary,
            scroll: 0,
        }
    }

    #[test]
    fn test_empty_trip_does_not_scroll() {
        let trip = completed_trip(0, 0);
        assert_eq!(summary_scroll_limit(&trip), 0);
        let share = ShareProgress::Idle;
        let mut display = CountingDisplay::new();
        draw_summary(&mut display, &trip, &view(&share), 120_000);
        assert_eq!(display.out_of_bounds(), 0);
        assert!(display.count_color(BLUE_600) > 0, "Share button");
    }

    #[test]
    fn test_long_trip_scrolls() {
        let trip = completed_trip(3, 2);
        let limit = summary_scroll_limit(&trip);
        assert!(limit > 0, "Three notes overflow the list area");

        let share = ShareProgress::Idle;
        let mut display = CountingDisplay::new();
        let scrolled = SummaryView {
            share: &share,
            focus: ButtonFocus::Secondary,
            scroll: limit,
        };
        draw_summary(&mut display, &trip, &scrolled, 600_000);
        assert_eq!(display.out_of_bounds(), 0);
    }

    #[test]
    fn test_divider_drawn_below_records() {
        let trip = completed_trip(0, 0);
        let share = ShareProgress::Idle;
        let mut display = CountingDisplay::new();
        let row = Rectangle::new(Point::new(0, SHARE_TOP - 2), Size::new(SCREEN_WIDTH, 1));
        draw_summary(&mut display.clipped(&row), &trip, &view(&share), 120_000);
        assert_eq!(display.count_color(SLATE_200), CONTENT_WIDTH as usize);
    }

    #[test]
    fn test_share_progress_states() {
        let trip = completed_trip(1, 1);
        let mut share = ShareProgress::Idle;
        share.start(0);
        let mut sharing = CountingDisplay::new();
        draw_summary(&mut sharing, &trip, &view(&share), 1_500);
        assert!(sharing.count_color(BLUE_600) > 0, "Progress bar");

        share.poll(10_000);
        assert!(share.is_complete());
        let mut shared = CountingDisplay::new();
        draw_summary(&mut shared, &trip, &view(&share), 10_000);
        assert!(shared.count_color(GREEN_600) > sharing.count_color(GREEN_600), "Shared tick");
        assert_eq!(shared.out_of_bounds(), 0);
    }

    #[test]
    fn test_heights_match_layout() {
        let trip = completed_trip(1, 1);
        let note = &trip.voice_notes()[0];
        assert_eq!(transcript_lines(note), TRANSCRIPT_LINES);
        assert_eq!(note_height(note), 6 * LINE_HEIGHT + RECORD_GAP);
        // "Recorded at", BP is incomplete so skipped, level line
        assert_eq!(vitals_height(&trip.vitals()[0]), 2 * LINE_HEIGHT + RECORD_GAP);
    }

    #[test]
    fn test_idle_prompt_fits() {
        assert!("Share trip details with hospital".len() as u32 * LABEL_CHAR_WIDTH <= CONTENT_WIDTH);
        assert!("S Share Details".len() as u32 * LABEL_CHAR_WIDTH < BUTTON_WIDTH);
    }
}
