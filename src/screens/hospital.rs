//! Hospital type selection: a 2x4 grid of toggleable categories.

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use embedded_graphics::text::Text;
use smartevp_common::colors::{BLUE_50, BLUE_600, SLATE_200, WHITE};
use smartevp_common::config::{BOTTOM_BUTTON_Y, BUTTON_HEIGHT, CONTENT_WIDTH, HEADER_HEIGHT, MARGIN};
use smartevp_common::selection::{HOSPITAL_GRID_COLUMNS, HospitalSelector};
use smartevp_common::styles::{BODY_STYLE, LEFT_ALIGNED, MUTED_STYLE};
use smartevp_common::trip::HospitalType;
use smartevp_common::widgets::{
    ButtonKind,
    HeaderRight,
    draw_button,
    draw_card,
    draw_checkbox,
    draw_focus_ring,
    draw_header,
};

const PROMPT_POS: Point = Point::new(MARGIN as i32, HEADER_HEIGHT as i32 + 16);

const GRID_TOP: i32 = HEADER_HEIGHT as i32 + 24;
const CELL_GAP: u32 = 8;
const CELL_WIDTH: u32 = (CONTENT_WIDTH - CELL_GAP) / HOSPITAL_GRID_COLUMNS as u32;
const CELL_HEIGHT: u32 = 48;
const ROW_GAP: u32 = 6;
const GRID_ROWS: usize = HospitalType::ALL.len() / HOSPITAL_GRID_COLUMNS;

const CONFIRM_RECT: Rectangle = Rectangle::new(
    Point::new(MARGIN as i32, BOTTOM_BUTTON_Y),
    Size::new(CONTENT_WIDTH, BUTTON_HEIGHT),
);

const _: () = assert!(GRID_TOP + (GRID_ROWS as u32 * (CELL_HEIGHT + ROW_GAP)) as i32 <= BOTTOM_BUTTON_Y);

const fn cell_rect(row: usize, col: usize) -> Rectangle {
    Rectangle::new(
        Point::new(
            MARGIN as i32 + (col as u32 * (CELL_WIDTH + CELL_GAP)) as i32,
            GRID_TOP + (row as u32 * (CELL_HEIGHT + ROW_GAP)) as i32,
        ),
        Size::new(CELL_WIDTH, CELL_HEIGHT),
    )
}

/// Draw the hospital type grid.
pub fn draw_hospital<D>(display: &mut D, selector: &HospitalSelector)
where
    D: DrawTarget<Color = Rgb565>,
{
    let badge = selector.badge();
    let right = match &badge {
        Some(text) => HeaderRight::Badge(text, BLUE_600, WHITE),
        None => HeaderRight::Text("2 of 2"),
    };
    draw_header(display, "Select Hospital Type", None, right);
    Text::with_text_style("Select all that apply", PROMPT_POS, MUTED_STYLE, LEFT_ALIGNED)
        .draw(display)
        .ok();

    let (cursor_row, cursor_col) = selector.cursor_cell();
    for (i, ty) in HospitalType::ALL.into_iter().enumerate() {
        let (row, col) = (i / HOSPITAL_GRID_COLUMNS, i % HOSPITAL_GRID_COLUMNS);
        let area = cell_rect(row, col);
        let selected = selector.is_selected(ty);
        let (fill, border) = if selected { (BLUE_50, BLUE_600) } else { (WHITE, SLATE_200) };
        draw_card(display, area, fill, border);
        if (row, col) == (cursor_row, cursor_col) {
            draw_focus_ring(display, area);
        }

        let top = area.top_left;
        draw_checkbox(display, top + Point::new(6, 6), selected, BLUE_600);
        let (line1, line2) = ty.card_lines();
        Text::with_text_style(line1, top + Point::new(6, 30), BODY_STYLE, LEFT_ALIGNED)
            .draw(display)
            .ok();
        Text::with_text_style(line2, top + Point::new(6, 42), BODY_STYLE, LEFT_ALIGNED)
            .draw(display)
            .ok();
    }

    let kind = if selector.can_confirm() {
        ButtonKind::Filled(BLUE_600)
    } else {
        ButtonKind::Disabled
    };
    draw_button(display, CONFIRM_RECT, &selector.confirm_label(), kind, true);
}
