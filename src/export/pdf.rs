use crate::error::{ReportError, Result};
use ::image::{DynamicImage, RgbImage};
use printpdf::{BuiltinFont, Image, ImageTransform, Mm, PdfDocument, PdfLayerReference};
use std::collections::HashMap;
use student_report_common::export::pdf_core::{
    DocumentPlan, Element, FontWeight, A4_HEIGHT_MM, A4_WIDTH_MM,
};
use student_report_common::ChartKind;

const MM_PER_INCH: f32 = 25.4;

/// Write a planned document into PDF bytes.
/// Charts missing from `images` are left out.
pub fn render_pdf(plan: &DocumentPlan, images: &HashMap<ChartKind, RgbImage>) -> Result<Vec<u8>> {
    let (doc, first_page, first_layer) =
        PdfDocument::new(&plan.title, Mm(A4_WIDTH_MM), Mm(A4_HEIGHT_MM), "Layer 1");

    let regular = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| ReportError::PdfGeneration(format!("font error: {:?}", e)))?;
    let bold = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(|e| ReportError::PdfGeneration(format!("font error: {:?}", e)))?;

    for (index, page) in plan.pages.iter().enumerate() {
        let layer = if index == 0 {
            doc.get_page(first_page).get_layer(first_layer)
        } else {
            let (p, l) = doc.add_page(Mm(A4_WIDTH_MM), Mm(A4_HEIGHT_MM), "Layer 1");
            doc.get_page(p).get_layer(l)
        };

        for element in &page.elements {
            match element {
                Element::Text { x_mm, y_mm, size_pt, weight, text } => {
                    let font = match weight {
                        FontWeight::Regular => &regular,
                        FontWeight::Bold => &bold,
                    };
                    layer.use_text(text.as_str(), *size_pt, Mm(*x_mm), Mm(A4_HEIGHT_MM - y_mm), font);
                }
                Element::Chart { kind, x_mm, y_mm, width_mm, height_mm } => {
                    let Some(raster) = images.get(kind) else {
                        continue;
                    };
                    place_image(&layer, raster, *x_mm, *y_mm, *width_mm, *height_mm);
                }
            }
        }
    }

    doc.save_to_bytes()
        .map_err(|e| ReportError::PdfGeneration(format!("save error: {:?}", e)))
}

/// Scale an image into the box whose top-left corner is (x, y)
fn place_image(layer: &PdfLayerReference, raster: &RgbImage, x_mm: f32, y_mm: f32, width_mm: f32, height_mm: f32) {
    let (px_w, px_h) = raster.dimensions();
    if px_w == 0 || px_h == 0 {
        return;
    }

    // dpi at which the image is exactly width_mm wide
    let dpi = px_w as f32 * MM_PER_INCH / width_mm;
    let natural_h_mm = px_h as f32 * MM_PER_INCH / dpi;
    let scale_y = height_mm / natural_h_mm;

    let image = Image::from_dynamic_image(&DynamicImage::ImageRgb8(raster.clone()));
    image.add_to_layer(
        layer.clone(),
        ImageTransform {
            translate_x: Some(Mm(x_mm)),
            translate_y: Some(Mm(A4_HEIGHT_MM - y_mm - height_mm)),
            scale_x: Some(1.0),
            scale_y: Some(scale_y),
            dpi: Some(dpi),
            ..Default::default()
        },
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use student_report_common::export::pdf_core::plan_document;
    use student_report_common::{Cell, ChartSet, ColumnLayout, Report, Row};

    fn report() -> Report {
        let mut cells = vec![Cell::from(3i64), Cell::from("Meera")];
        cells.extend(["high", "low", "moderate"].iter().cycle().take(15).map(|s| Cell::from(*s)));
        Report::assemble(&Row::new(cells), &ColumnLayout::default(), &ChartSet::all(), Some("Keep it up"))
    }

    #[test]
    fn test_render_without_images() {
        let report = report();
        let plan = plan_document(&report, &[]);
        let bytes = render_pdf(&plan, &HashMap::new()).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn test_render_with_image() {
        let report = report();
        let plan = plan_document(&report, &[ChartKind::Bar]);
        let mut images = HashMap::new();
        images.insert(ChartKind::Bar, RgbImage::from_pixel(34, 18, ::image::Rgb([59, 130, 246])));

        let with_image = render_pdf(&plan, &images).unwrap();
        let without_image = render_pdf(&plan, &HashMap::new()).unwrap();
        assert!(with_image.starts_with(b"%PDF"));
        assert!(with_image.len() > without_image.len());
    }
}
