//! Fixed-layout geometry for the fall incident report.
//!
//! Everything here is pure: helpers take the current Y position and return
//! the next one, pushing draw operations onto a [`Canvas`]. Coordinates are
//! millimetres measured from the top-left corner of the page; the PDF
//! renderer flips them to PDF's bottom-up space.
//!
//! Page structure, top to bottom:
//! 1. shaded header band with the centred title
//! 2. two stacked-field columns, merged at the taller one
//! 3. four numbered full-width sections
//! 4. a two-column supplementary block, merged the same way
//! 5. a signature block anchored to the bottom margin (does not flow)
//!
//! Text never paginates. Body text that does not fit its box is cut on a
//! word boundary and ends in `...`.

use super::content::ReportContent;

// ─── Geometry ─────────────────────────────────────────────────────────────────

pub const PAGE_WIDTH: f32 = 210.0;
pub const PAGE_HEIGHT: f32 = 297.0;
pub const MARGIN: f32 = 15.0;
pub const CONTENT_WIDTH: f32 = PAGE_WIDTH - 2.0 * MARGIN;

pub const HEADER_HEIGHT: f32 = 14.0;
pub const COLUMN_GAP: f32 = 8.0;
pub const COLUMN_WIDTH: f32 = (CONTENT_WIDTH - COLUMN_GAP) / 2.0;
pub const BLOCK_GAP: f32 = 6.0;

pub const FIELD_LABEL_HEIGHT: f32 = 5.0;
pub const FIELD_BOX_HEIGHT: f32 = 9.0;
pub const FIELD_GAP: f32 = 3.0;

pub const SECTION_TITLE_HEIGHT: f32 = 8.0;
pub const SECTION_NUMBER_RADIUS: f32 = 3.0;
pub const SECTION_GAP: f32 = 4.0;
pub const NARRATIVE_BOX_HEIGHT: f32 = 36.0;
pub const SECTION_BOX_HEIGHT: f32 = 16.0;
pub const SUPPLEMENTARY_BOX_HEIGHT: f32 = 14.0;

pub const SIGNATURE_LABEL_HEIGHT: f32 = 5.0;
pub const SIGNATURE_BOX_HEIGHT: f32 = 14.0;
pub const SIGNATURE_BLOCK_HEIGHT: f32 = SIGNATURE_LABEL_HEIGHT + SIGNATURE_BOX_HEIGHT + 5.0;
pub const SIGNATURE_TOP: f32 = PAGE_HEIGHT - MARGIN - SIGNATURE_BLOCK_HEIGHT;

/// Inner padding between a box border and its text.
pub const BOX_INSET: f32 = 2.5;

pub const TITLE_SIZE: f32 = 16.0;
pub const SECTION_TITLE_SIZE: f32 = 11.0;
pub const LABEL_SIZE: f32 = 8.0;
pub const VALUE_SIZE: f32 = 9.0;
pub const BODY_SIZE: f32 = 8.0;
pub const FOOTER_SIZE: f32 = 7.0;

const PT_TO_MM: f32 = 0.3528;
/// Average Helvetica glyph advance as a fraction of the font size.
const AVG_CHAR_EM: f32 = 0.52;
const CAP_HEIGHT_EM: f32 = 0.72;
const LINE_SPACING: f32 = 1.25;
const ELLIPSIS: &str = "...";

// ─── Draw operations ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontStyle {
    Regular,
    Bold,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoxStyle {
    Outline,
    Shaded,
}

/// One primitive on the page. `y` for text is the baseline; for rects the top edge.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Text {
        x: f32,
        y: f32,
        size: f32,
        font: FontStyle,
        text: String,
    },
    Rect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        style: BoxStyle,
    },
    Circle {
        cx: f32,
        cy: f32,
        radius: f32,
    },
}

/// Accumulates draw operations in paint order.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Canvas {
    ops: Vec<DrawOp>,
}

impl Canvas {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&mut self, x: f32, y: f32, size: f32, font: FontStyle, text: impl Into<String>) {
        self.ops.push(DrawOp::Text { x, y, size, font, text: text.into() });
    }

    pub fn rect(&mut self, x: f32, y: f32, width: f32, height: f32, style: BoxStyle) {
        self.ops.push(DrawOp::Rect { x, y, width, height, style });
    }

    pub fn circle(&mut self, cx: f32, cy: f32, radius: f32) {
        self.ops.push(DrawOp::Circle { cx, cy, radius });
    }

    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    pub fn into_ops(self) -> Vec<DrawOp> {
        self.ops
    }
}

/// Y positions of the major blocks, kept for inspection and tests.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutMarks {
    pub header_bottom: f32,
    pub left_column_bottom: f32,
    pub right_column_bottom: f32,
    pub sections_top: f32,
    pub sections_bottom: f32,
    pub supplementary_bottom: f32,
    pub signature_top: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PageLayout {
    pub ops: Vec<DrawOp>,
    pub marks: LayoutMarks,
}

// ─── Text metrics ─────────────────────────────────────────────────────────────

pub fn line_height(size: f32) -> f32 {
    size * PT_TO_MM * LINE_SPACING
}

/// Estimated rendered width of `text` at `size` points.
pub fn text_width(text: &str, size: f32) -> f32 {
    text.chars().count() as f32 * size * PT_TO_MM * AVG_CHAR_EM
}

/// How many characters fit on a line `width` mm wide.
pub fn chars_per_line(width: f32, size: f32) -> usize {
    ((width / (size * PT_TO_MM * AVG_CHAR_EM)).floor() as usize).max(1)
}

fn cap_height(size: f32) -> f32 {
    size * PT_TO_MM * CAP_HEIGHT_EM
}

/// Greedy word wrap. Words longer than a line are split hard.
pub fn wrap_text(text: &str, max_chars: usize) -> Vec<String> {
    let max_chars = max_chars.max(1);
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for word in text.split_whitespace() {
        let mut word: Vec<char> = word.chars().collect();
        while word.len() > max_chars {
            if current_len > 0 {
                lines.push(std::mem::take(&mut current));
                current_len = 0;
            }
            let rest = word.split_off(max_chars);
            lines.push(word.into_iter().collect());
            word = rest;
        }
        if current_len > 0 && current_len + 1 + word.len() > max_chars {
            lines.push(std::mem::take(&mut current));
            current_len = 0;
        }
        if current_len > 0 {
            current.push(' ');
            current_len += 1;
        }
        current_len += word.len();
        current.extend(word);
    }
    if !current.is_empty() {
        lines.push(current);
    }
    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

/// Wrap and cap at `max_lines`; a cut marks the last kept line with `...`.
pub fn fit_lines(text: &str, max_chars: usize, max_lines: usize) -> Vec<String> {
    let max_lines = max_lines.max(1);
    let mut lines = wrap_text(text, max_chars);
    if lines.len() <= max_lines {
        return lines;
    }
    lines.truncate(max_lines);
    if let Some(last) = lines.last_mut() {
        let budget = max_chars.saturating_sub(ELLIPSIS.len());
        let mut kept: String = last.chars().take(budget).collect();
        if kept.chars().count() < last.chars().count() {
            if let Some(space) = kept.rfind(' ') {
                kept.truncate(space);
            }
        }
        *last = format!("{}{ELLIPSIS}", kept.trim_end());
    }
    lines
}

// ─── Layout helpers ───────────────────────────────────────────────────────────

/// Label above a fixed-height bordered box holding a single-line value.
/// Returns the Y just below the box plus [`FIELD_GAP`].
pub fn stack_field(canvas: &mut Canvas, x: f32, y: f32, width: f32, label: &str, value: &str) -> f32 {
    canvas.text(x, y + FIELD_LABEL_HEIGHT - 1.5, LABEL_SIZE, FontStyle::Bold, label);

    let box_top = y + FIELD_LABEL_HEIGHT;
    canvas.rect(x, box_top, width, FIELD_BOX_HEIGHT, BoxStyle::Outline);

    let max_chars = chars_per_line(width - 2.0 * BOX_INSET, VALUE_SIZE);
    let line = fit_lines(value, max_chars, 1).remove(0);
    let baseline = box_top + (FIELD_BOX_HEIGHT + cap_height(VALUE_SIZE)) / 2.0;
    canvas.text(x + BOX_INSET, baseline, VALUE_SIZE, FontStyle::Regular, line);

    box_top + FIELD_BOX_HEIGHT + FIELD_GAP
}

/// Section title (optionally with a circled number) above a bordered box
/// whose body text is wrapped to the box width. Returns box bottom + [`SECTION_GAP`].
#[allow(clippy::too_many_arguments)]
pub fn titled_box(
    canvas: &mut Canvas,
    x: f32,
    y: f32,
    width: f32,
    box_height: f32,
    number: Option<u8>,
    title: &str,
    body: &str,
) -> f32 {
    let title_baseline = y + (SECTION_TITLE_HEIGHT + cap_height(SECTION_TITLE_SIZE)) / 2.0;
    let mut title_x = x;

    if let Some(n) = number {
        let cx = x + SECTION_NUMBER_RADIUS;
        let cy = y + SECTION_TITLE_HEIGHT / 2.0;
        canvas.circle(cx, cy, SECTION_NUMBER_RADIUS);
        let digit = n.to_string();
        canvas.text(
            cx - text_width(&digit, LABEL_SIZE) / 2.0,
            cy + cap_height(LABEL_SIZE) / 2.0,
            LABEL_SIZE,
            FontStyle::Bold,
            digit,
        );
        title_x = x + 2.0 * SECTION_NUMBER_RADIUS + 3.0;
    }
    canvas.text(title_x, title_baseline, SECTION_TITLE_SIZE, FontStyle::Bold, title);

    let box_top = y + SECTION_TITLE_HEIGHT;
    canvas.rect(x, box_top, width, box_height, BoxStyle::Outline);

    let lh = line_height(BODY_SIZE);
    let max_chars = chars_per_line(width - 2.0 * BOX_INSET, BODY_SIZE);
    let max_lines = (((box_height - 2.0 * BOX_INSET) / lh).floor() as usize).max(1);
    let mut baseline = box_top + BOX_INSET + cap_height(BODY_SIZE);
    for line in fit_lines(body, max_chars, max_lines) {
        canvas.text(x + BOX_INSET, baseline, BODY_SIZE, FontStyle::Regular, line);
        baseline += lh;
    }

    box_top + box_height + SECTION_GAP
}

/// Next full-width block starts below whichever column ended lower.
pub fn merge_columns(left_y: f32, right_y: f32) -> f32 {
    left_y.max(right_y) + BLOCK_GAP
}

/// Shaded band across the content width with the title centred in it.
pub fn header(canvas: &mut Canvas, y: f32, title: &str) -> f32 {
    canvas.rect(MARGIN, y, CONTENT_WIDTH, HEADER_HEIGHT, BoxStyle::Shaded);
    let x = MARGIN + (CONTENT_WIDTH - text_width(title, TITLE_SIZE)).max(0.0) / 2.0;
    let baseline = y + (HEADER_HEIGHT + cap_height(TITLE_SIZE)) / 2.0;
    canvas.text(x, baseline, TITLE_SIZE, FontStyle::Bold, title);
    y + HEADER_HEIGHT + BLOCK_GAP
}

/// Staff signature and date boxes, anchored at [`SIGNATURE_TOP`]; the
/// date is pre-filled beneath the date box.
pub fn signature_block(canvas: &mut Canvas, date: &str) {
    let y = SIGNATURE_TOP;
    let right_x = MARGIN + COLUMN_WIDTH + COLUMN_GAP;
    let box_top = y + SIGNATURE_LABEL_HEIGHT;

    canvas.text(MARGIN, y + SIGNATURE_LABEL_HEIGHT - 1.5, LABEL_SIZE, FontStyle::Bold, "Signature of Staff Member");
    canvas.rect(MARGIN, box_top, COLUMN_WIDTH, SIGNATURE_BOX_HEIGHT, BoxStyle::Outline);

    canvas.text(right_x, y + SIGNATURE_LABEL_HEIGHT - 1.5, LABEL_SIZE, FontStyle::Bold, "Date");
    canvas.rect(right_x, box_top, COLUMN_WIDTH, SIGNATURE_BOX_HEIGHT, BoxStyle::Outline);

    let date_baseline = box_top + SIGNATURE_BOX_HEIGHT + 4.0;
    canvas.text(right_x + BOX_INSET, date_baseline, VALUE_SIZE, FontStyle::Regular, date);
}

fn footer(canvas: &mut Canvas, text: &str) {
    let x = PAGE_WIDTH - MARGIN - text_width(text, FOOTER_SIZE);
    canvas.text(x, PAGE_HEIGHT - MARGIN / 2.0, FOOTER_SIZE, FontStyle::Regular, text);
}

// ─── Page composition ─────────────────────────────────────────────────────────

/// Lay out the whole report page.
pub fn compose(content: &ReportContent) -> PageLayout {
    let mut canvas = Canvas::new();

    let header_bottom = header(&mut canvas, MARGIN, &content.title);

    let left_x = MARGIN;
    let right_x = MARGIN + COLUMN_WIDTH + COLUMN_GAP;

    let mut left_y = header_bottom;
    left_y = stack_field(&mut canvas, left_x, left_y, COLUMN_WIDTH, "Date/Time of Incident", &content.incident_time);
    left_y = stack_field(&mut canvas, left_x, left_y, COLUMN_WIDTH, "Facility", &content.facility);
    left_y = stack_field(&mut canvas, left_x, left_y, COLUMN_WIDTH, "Place of Fall", &content.place);

    let mut right_y = header_bottom;
    right_y = stack_field(&mut canvas, right_x, right_y, COLUMN_WIDTH, "Report Date", &content.report_date);
    right_y = stack_field(&mut canvas, right_x, right_y, COLUMN_WIDTH, "Staff Notified", &content.staff_notified);
    right_y = stack_field(&mut canvas, right_x, right_y, COLUMN_WIDTH, "Resident", &content.resident);

    let sections_top = merge_columns(left_y, right_y);

    let sections: [(&str, &str, f32); 4] = [
        ("Incident Description", content.narrative.as_str(), NARRATIVE_BOX_HEIGHT),
        ("Injuries", content.injuries.as_str(), SECTION_BOX_HEIGHT),
        ("Treatment", content.treatment.as_str(), SECTION_BOX_HEIGHT),
        ("Vital Signs", content.vitals.as_str(), SECTION_BOX_HEIGHT),
    ];
    let mut y = sections_top;
    for (i, (title, body, height)) in sections.iter().enumerate() {
        y = titled_box(&mut canvas, MARGIN, y, CONTENT_WIDTH, *height, Some(i as u8 + 1), title, body);
    }
    let sections_bottom = y;

    let aids_y = titled_box(
        &mut canvas,
        left_x,
        sections_bottom,
        COLUMN_WIDTH,
        SUPPLEMENTARY_BOX_HEIGHT,
        None,
        "Mobility Aids Present",
        &content.aids,
    );
    let witnesses_y = titled_box(
        &mut canvas,
        right_x,
        sections_bottom,
        COLUMN_WIDTH,
        SUPPLEMENTARY_BOX_HEIGHT,
        None,
        "Witnesses",
        &content.witnesses,
    );
    let supplementary_bottom = merge_columns(aids_y, witnesses_y);

    signature_block(&mut canvas, &content.signature_date);
    footer(&mut canvas, &format!("Generated on: {}", content.generated_on));

    PageLayout {
        ops: canvas.into_ops(),
        marks: LayoutMarks {
            header_bottom,
            left_column_bottom: left_y,
            right_column_bottom: right_y,
            sections_top,
            sections_bottom,
            supplementary_bottom,
            signature_top: SIGNATURE_TOP,
        },
    }
}
