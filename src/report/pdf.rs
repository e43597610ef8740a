//! Paints a [`PageLayout`] onto a single A4 page with `printpdf`.

use std::io::BufWriter;

use chrono::{DateTime, Local};
use printpdf::path::{PaintMode, WindingOrder};
use printpdf::{
    BuiltinFont, Color, IndirectFontRef, Line, Mm, PdfDocument, PdfLayerReference, Point,
    Polygon, Rgb,
};

use super::layout::{BoxStyle, DrawOp, FontStyle, PageLayout, PAGE_HEIGHT, PAGE_WIDTH};
use super::ReportError;

const HEADER_SHADE: f32 = 0.85;
const OUTLINE_THICKNESS: f32 = 0.5;
const CIRCLE_SEGMENTS: usize = 24;

/// Characters of WinAnsiEncoding outside the Latin-1 printable ranges.
const WIN_ANSI_EXTRAS: &[char] = &[
    '€', '‚', 'ƒ', '„', '…', '†', '‡', 'ˆ', '‰', 'Š', '‹', 'Œ', 'Ž', '‘', '’', '“', '”', '•',
    '–', '—', '˜', '™', 'š', '›', 'œ', 'ž', 'Ÿ',
];

/// Document-level metadata.
#[derive(Debug, Clone)]
pub struct DocumentMeta {
    pub title: String,
    pub document_id: String,
    pub created_at: DateTime<Local>,
}

/// Whether the built-in Helvetica faces can show `c`.
pub fn is_encodable(c: char) -> bool {
    matches!(c as u32, 0x20..=0x7E | 0xA0..=0xFF) || WIN_ANSI_EXTRAS.contains(&c)
}

/// Reject the page before any bytes are produced if a glyph cannot be shown.
pub fn ensure_encodable(page: &PageLayout) -> Result<(), ReportError> {
    for op in &page.ops {
        if let DrawOp::Text { text, .. } = op {
            if let Some(bad) = text.chars().find(|c| !is_encodable(*c)) {
                return Err(ReportError::Render(format!(
                    "unsupported character {bad:?} (U+{:04X})",
                    bad as u32
                )));
            }
        }
    }
    Ok(())
}

/// Generates the report PDF. Returns PDF bytes.
pub fn render_pdf(page: &PageLayout, meta: &DocumentMeta) -> Result<Vec<u8>, ReportError> {
    ensure_encodable(page)?;

    let created = time::OffsetDateTime::from_unix_timestamp(meta.created_at.timestamp())
        .map_err(|e| ReportError::Render(format!("PDF date error: {e}")))?;

    let (doc, page1, layer1) =
        PdfDocument::new(&meta.title, Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Layer 1");
    let doc = doc
        .with_document_id(meta.document_id.clone())
        .with_creation_date(created)
        .with_mod_date(created);
    let layer = doc.get_page(page1).get_layer(layer1);

    let regular = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| ReportError::Render(format!("PDF font error: {e}")))?;
    let bold = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(|e| ReportError::Render(format!("PDF font error: {e}")))?;

    layer.set_outline_color(black());
    layer.set_outline_thickness(OUTLINE_THICKNESS);
    layer.set_fill_color(black());

    for op in &page.ops {
        paint(&layer, op, &regular, &bold);
    }

    let mut buf = BufWriter::new(Vec::new());
    doc.save(&mut buf)
        .map_err(|e| ReportError::Render(format!("PDF save error: {e}")))?;
    let mut bytes = buf
        .into_inner()
        .map_err(|e| ReportError::Render(format!("PDF buffer error: {e}")))?;

    pin_trailer_id(&mut bytes, &meta.document_id)?;
    Ok(bytes)
}

/// printpdf fills both trailer `/ID` entries with random values on save.
/// Overwrite them in place with `document_id` so identical input renders
/// identical bytes. Lengths are kept, so xref offsets stay valid.
fn pin_trailer_id(bytes: &mut [u8], document_id: &str) -> Result<(), ReportError> {
    let missing = || ReportError::Render("PDF trailer has no /ID entry".into());
    let id = document_id.as_bytes();
    if id.is_empty() {
        return Err(ReportError::Render("empty PDF document id".into()));
    }

    let mut pos = bytes
        .windows(3)
        .rposition(|w| w == b"/ID")
        .ok_or_else(missing)?
        + 3;

    for _ in 0..2 {
        let open = bytes[pos..]
            .iter()
            .position(|b| matches!(b, b'(' | b'<'))
            .map(|i| pos + i)
            .ok_or_else(missing)?;
        let close_char = if bytes[open] == b'(' { b')' } else { b'>' };
        let close = bytes[open + 1..]
            .iter()
            .position(|b| *b == close_char)
            .map(|i| open + 1 + i)
            .ok_or_else(missing)?;

        for (slot, b) in bytes[open + 1..close].iter_mut().zip(id.iter().cycle()) {
            *slot = *b;
        }
        pos = close + 1;
    }
    Ok(())
}

fn paint(layer: &PdfLayerReference, op: &DrawOp, regular: &IndirectFontRef, bold: &IndirectFontRef) {
    match op {
        DrawOp::Text { x, y, size, font, text } => {
            let face = match font {
                FontStyle::Regular => regular,
                FontStyle::Bold => bold,
            };
            layer.use_text(text.as_str(), *size, Mm(*x), flip(*y), face);
        }
        DrawOp::Rect { x, y, width, height, style } => {
            let corners = vec![
                (Point::new(Mm(*x), flip(*y)), false),
                (Point::new(Mm(x + width), flip(*y)), false),
                (Point::new(Mm(x + width), flip(y + height)), false),
                (Point::new(Mm(*x), flip(y + height)), false),
            ];
            match style {
                BoxStyle::Outline => layer.add_line(Line { points: corners, is_closed: true }),
                BoxStyle::Shaded => {
                    layer.set_fill_color(grey(HEADER_SHADE));
                    layer.add_polygon(Polygon {
                        rings: vec![corners],
                        mode: PaintMode::Fill,
                        winding_order: WindingOrder::NonZero,
                    });
                    layer.set_fill_color(black());
                }
            }
        }
        DrawOp::Circle { cx, cy, radius } => {
            let points = (0..CIRCLE_SEGMENTS)
                .map(|i| {
                    let angle = i as f32 / CIRCLE_SEGMENTS as f32 * std::f32::consts::TAU;
                    let px = cx + radius * angle.cos();
                    let py = cy + radius * angle.sin();
                    (Point::new(Mm(px), flip(py)), false)
                })
                .collect();
            layer.add_line(Line { points, is_closed: true });
        }
    }
}

/// Layout Y grows downwards; PDF Y grows upwards.
fn flip(y: f32) -> Mm {
    Mm(PAGE_HEIGHT - y)
}

fn black() -> Color {
    grey(0.0)
}

fn grey(level: f32) -> Color {
    Color::Rgb(Rgb::new(level, level, level, None))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::content::ReportContent;
    use crate::report::layout::compose;

    fn content() -> ReportContent {
        ReportContent {
            title: "Fall Incident Report".into(),
            incident_time: "2026-10-17 09:30".into(),
            facility: "Haus Linde, Lindenweg 4".into(),
            place: "Kitchen".into(),
            report_date: "2026-10-17".into(),
            staff_notified: "Not specified".into(),
            resident: "Sarah Müller (ID: 1)".into(),
            narrative: "The patient was found oriented in the kitchen. Temperature at 37.2 °C.".into(),
            injuries: "Injuries: Head Injury".into(),
            treatment: "Treatment: Cpr".into(),
            vitals: "BP: 120/80 mmHg, BS: 100 mg/dL, Temp: 37.2 °C, O2: 95%".into(),
            aids: "Walker".into(),
            witnesses: "None noted".into(),
            signature_date: "2026-10-17".into(),
            generated_on: "2026-10-17 09:30:12".into(),
        }
    }

    fn meta() -> DocumentMeta {
        DocumentMeta {
            title: "Fall Incident Report".into(),
            document_id: "0123456789abcdef0123456789abcdef".into(),
            created_at: Local::now(),
        }
    }

    #[test]
    fn renders_pdf_bytes() {
        let bytes = render_pdf(&compose(&content()), &meta()).unwrap();
        assert!(!bytes.is_empty());
        // PDF magic bytes: %PDF
        assert_eq!(&bytes[0..4], b"%PDF");
    }

    #[test]
    fn same_page_and_meta_render_identical_bytes() {
        let page = compose(&content());
        let meta = meta();
        let a = render_pdf(&page, &meta).unwrap();
        let b = render_pdf(&page, &meta).unwrap();
        assert_eq!(a.len(), b.len());
        assert!(a == b, "rendered PDFs differ");
    }

    #[test]
    fn trailer_id_carries_document_id() {
        let meta = meta();
        let bytes = render_pdf(&compose(&content()), &meta).unwrap();
        let text = String::from_utf8_lossy(&bytes);
        let trailer = &text[text.rfind("/ID").unwrap()..];
        assert_eq!(trailer.matches(meta.document_id.as_str()).count(), 2, "{trailer}");
    }

    #[test]
    fn document_id_changes_the_bytes() {
        let page = compose(&content());
        let a = meta();
        let mut b = a.clone();
        b.document_id = "fedcba9876543210fedcba9876543210".into();
        assert_ne!(render_pdf(&page, &a).unwrap(), render_pdf(&page, &b).unwrap());
    }

    #[test]
    fn pin_trailer_id_rewrites_both_entries_in_place() {
        let mut bytes = b"trailer << /Size 9 /ID [(AAAAAAAA) <BBBBBBBB>] >>".to_vec();
        let before = bytes.len();
        pin_trailer_id(&mut bytes, "0123").unwrap();
        assert_eq!(bytes.len(), before);
        assert_eq!(
            String::from_utf8(bytes).unwrap(),
            "trailer << /Size 9 /ID [(01230123) <01230123>] >>"
        );
    }

    #[test]
    fn pin_trailer_id_without_entry_is_render_error() {
        let mut bytes = b"%PDF-1.3 no trailer".to_vec();
        assert!(matches!(pin_trailer_id(&mut bytes, "0123"), Err(ReportError::Render(_))));
    }

    #[test]
    fn latin_and_win_ansi_characters_are_encodable() {
        for c in ['a', 'Z', '°', 'ü', 'ß', '€', '’', '–'] {
            assert!(is_encodable(c), "{c}");
        }
    }

    #[test]
    fn cjk_and_emoji_are_not_encodable() {
        for c in ['跌', '😀', '\u{0007}'] {
            assert!(!is_encodable(c), "{c:?}");
        }
    }

    #[test]
    fn ensure_encodable_names_the_character() {
        let mut c = content();
        c.narrative = "Fell ✓".into();
        let err = ensure_encodable(&compose(&c)).unwrap_err();
        assert!(err.to_string().contains("U+2713"), "{err}");
    }

    #[test]
    fn flip_inverts_axis() {
        assert_eq!(flip(0.0), Mm(PAGE_HEIGHT));
        assert_eq!(flip(PAGE_HEIGHT), Mm(0.0));
    }
}
