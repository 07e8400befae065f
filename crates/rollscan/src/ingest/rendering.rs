use super::error::{DocumentError, Result};
use image::DynamicImage;
use pdfium_render::prelude::*;

const PDF_POINTS_PER_INCH: f32 = 72.0;

fn pdfium() -> Result<Pdfium> {
    let bindings = Pdfium::bind_to_system_library()
        .map_err(|e| DocumentError::RenderingFailed(format!("Failed to initialize Pdfium: {}", e)))?;
    Ok(Pdfium::new(bindings))
}

/// Declared page count of a document, read without rendering anything.
pub(crate) fn page_count(pdf_bytes: &[u8]) -> Result<usize> {
    let pdfium = pdfium()?;
    let document = pdfium
        .load_pdf_from_byte_slice(pdf_bytes, None)
        .map_err(|e| DocumentError::InvalidPdf(e.to_string()))?;
    Ok(document.pages().len() as usize)
}

/// Rasterize one page to an RGB image at the given resolution.
///
/// The document is reloaded from bytes on each call so no renderer state
/// survives between pages; only the returned bitmap is resident afterwards.
pub(crate) fn render_page(pdf_bytes: &[u8], page_index: usize, dpi: u32) -> Result<DynamicImage> {
    let pdfium = pdfium()?;
    let document = pdfium
        .load_pdf_from_byte_slice(pdf_bytes, None)
        .map_err(|e| DocumentError::InvalidPdf(e.to_string()))?;

    let page = document
        .pages()
        .get(page_index as u16)
        .map_err(|_| DocumentError::PageNotFound(page_index))?;

    let scale = dpi as f32 / PDF_POINTS_PER_INCH;

    let config = PdfRenderConfig::new()
        .set_target_width(((page.width().value * scale) as i32).max(1))
        .set_target_height(((page.height().value * scale) as i32).max(1))
        .rotate_if_landscape(PdfPageRenderRotation::None, false);

    let bitmap = page
        .render_with_config(&config)
        .map_err(|e| DocumentError::RenderingFailed(format!("Failed to render page: {}", e)))?;

    Ok(DynamicImage::ImageRgb8(bitmap.as_image().into_rgb8()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_count_invalid_bytes() {
        let result = page_count(b"not a pdf");
        assert!(result.is_err());
    }

    #[test]
    fn test_render_invalid_bytes() {
        let result = render_page(b"not a pdf", 0, 350);
        assert!(result.is_err());
    }

    #[test]
    fn test_render_empty_bytes() {
        let result = render_page(&[], 0, 350);
        assert!(result.is_err());
    }

    #[test]
    fn test_render_page_out_of_range() {
        let minimal_pdf = b"%PDF-1.4\n%\xE2\xE3\xCF\xD3\n";
        let result = render_page(minimal_pdf, 999, 350);
        assert!(result.is_err());
    }
}
