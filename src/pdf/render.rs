//! Renders a computed layout into PDF bytes.
//!
//! All pagination decisions were made by the layout pass; this maps draw ops
//! onto printpdf calls (A4 portrait, mm units, builtin Helvetica) and flips
//! the y axis from top-down layout coordinates to PDF bottom-up coordinates.

use printpdf::{BuiltinFont, Color, Line, Mm, PdfDocument, Point, Rgb};

use crate::errors::ReportError;
use crate::pdf::layout::{DrawOp, ReportLayout, PAGE_HEIGHT, PAGE_WIDTH};

const RULE_THICKNESS: f64 = 0.2;

pub fn render_pdf(layout: &ReportLayout, title: &str) -> Result<Vec<u8>, ReportError> {
    let (doc, first_page, first_layer) =
        PdfDocument::new(title, Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "content");

    let regular = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| ReportError::Render(e.to_string()))?;
    let bold = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(|e| ReportError::Render(e.to_string()))?;

    for (i, page) in layout.pages.iter().enumerate() {
        let layer = if i == 0 {
            doc.get_page(first_page).get_layer(first_layer)
        } else {
            let (page_idx, layer_idx) = doc.add_page(Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "content");
            doc.get_page(page_idx).get_layer(layer_idx)
        };

        for op in &page.ops {
            match op {
                DrawOp::Text {
                    x,
                    y,
                    size,
                    bold: is_bold,
                    color,
                    text,
                } => {
                    layer.set_fill_color(rgb(*color));
                    let font = if *is_bold { &bold } else { &regular };
                    layer.use_text(text.clone(), *size, Mm(*x), Mm(PAGE_HEIGHT - *y), font);
                }
                DrawOp::Rule { x1, y1, x2, y2, color } => {
                    layer.set_outline_color(rgb(*color));
                    layer.set_outline_thickness(RULE_THICKNESS);
                    layer.add_shape(Line {
                        points: vec![
                            (Point::new(Mm(*x1), Mm(PAGE_HEIGHT - *y1)), false),
                            (Point::new(Mm(*x2), Mm(PAGE_HEIGHT - *y2)), false),
                        ],
                        is_closed: false,
                        has_fill: false,
                        has_stroke: true,
                        is_clipping_path: false,
                    });
                }
            }
        }
    }

    doc.save_to_bytes()
        .map_err(|e| ReportError::Render(e.to_string()))
}

fn rgb(color: (u8, u8, u8)) -> Color {
    Color::Rgb(Rgb::new(
        color.0 as f64 / 255.0,
        color.1 as f64 / 255.0,
        color.2 as f64 / 255.0,
        None,
    ))
}
