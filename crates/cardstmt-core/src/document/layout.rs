//! Positional page text for PDF table recovery.
//!
//! pdf-extract reports every glyph with its text rendering matrix. Glyphs
//! are grouped into lines by baseline and laid out left to right, with wide
//! horizontal gaps rendered as runs of spaces so `grid::split_cells` can find
//! the columns.

use pdf_extract::{MediaBox, OutputDev, OutputError, Transform};

use super::Result;
use crate::error::DocumentError;

/// A single decoded glyph in device space.
#[derive(Debug, Clone, PartialEq)]
pub struct Glyph {
    pub x: f64,
    pub y: f64,
    /// Horizontal advance in device units.
    pub advance: f64,
    /// Rendered font size in device units.
    pub size: f64,
    pub text: String,
}

/// Collects the glyphs of one page.
#[derive(Debug, Default)]
struct LayoutOutput {
    glyphs: Vec<Glyph>,
}

impl OutputDev for LayoutOutput {
    fn begin_page(
        &mut self,
        _page_num: u32,
        _media_box: &MediaBox,
        _art_box: Option<(f64, f64, f64, f64)>,
    ) -> std::result::Result<(), OutputError> {
        self.glyphs.clear();
        Ok(())
    }

    fn end_page(&mut self) -> std::result::Result<(), OutputError> {
        Ok(())
    }

    fn output_character(
        &mut self,
        trm: &Transform,
        width: f64,
        _spacing: f64,
        font_size: f64,
        char: &str,
    ) -> std::result::Result<(), OutputError> {
        let scale = (trm.m11 * trm.m22 - trm.m12 * trm.m21).abs().sqrt();
        let size = font_size * scale;
        self.glyphs.push(Glyph {
            x: trm.m31,
            y: trm.m32,
            advance: width * size,
            size,
            text: char.to_string(),
        });
        Ok(())
    }

    fn begin_word(&mut self) -> std::result::Result<(), OutputError> {
        Ok(())
    }

    fn end_word(&mut self) -> std::result::Result<(), OutputError> {
        Ok(())
    }

    fn end_line(&mut self) -> std::result::Result<(), OutputError> {
        Ok(())
    }
}

/// Render glyphs as lines, top of the page first.
///
/// A gap under a tenth of the font size joins glyphs, up to one font size
/// becomes a single space, and anything wider becomes at least two spaces
/// (one per half font size).
pub fn render_lines(mut glyphs: Vec<Glyph>) -> String {
    glyphs.sort_by(|a, b| b.y.total_cmp(&a.y));

    let mut lines: Vec<Vec<Glyph>> = Vec::new();
    let mut baseline = f64::NAN;
    for glyph in glyphs {
        let tolerance = (glyph.size * 0.5).max(1.0);
        match lines.last_mut() {
            Some(line) if (baseline - glyph.y).abs() <= tolerance => line.push(glyph),
            _ => {
                baseline = glyph.y;
                lines.push(vec![glyph]);
            }
        }
    }

    let mut out = String::new();
    for mut line in lines {
        line.sort_by(|a, b| a.x.total_cmp(&b.x));

        let mut end: Option<f64> = None;
        for glyph in &line {
            if let Some(end) = end {
                let gap = glyph.x - end;
                let size = glyph.size.max(1.0);
                if gap > size {
                    let spaces = ((gap / (size * 0.5)).round() as usize).max(2);
                    out.extend(std::iter::repeat_n(' ', spaces));
                } else if gap > size * 0.1 {
                    out.push(' ');
                }
            }
            out.push_str(&glyph.text);
            end = Some(glyph.x + glyph.advance);
        }
        out.push('\n');
    }

    out
}

/// Laid-out text of every page of an unencrypted PDF.
pub fn page_texts(data: &[u8]) -> Result<Vec<String>> {
    let doc = pdf_extract::Document::load_mem(data)
        .map_err(|e| DocumentError::Parse(e.to_string()))?;
    let page_count = doc.get_pages().len() as u32;

    (1..=page_count)
        .map(|page| {
            let mut output = LayoutOutput::default();
            pdf_extract::output_doc_page(&doc, &mut output, page)
                .map_err(|e| DocumentError::TextExtraction(format!("page {}: {}", page, e)))?;
            Ok(render_lines(output.glyphs))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn word(text: &str, x: f64, y: f64) -> Vec<Glyph> {
        text.chars()
            .enumerate()
            .map(|(i, c)| Glyph {
                x: x + i as f64 * 6.0,
                y,
                advance: 6.0,
                size: 10.0,
                text: c.to_string(),
            })
            .collect()
    }

    #[test]
    fn test_render_lines_spreads_columns() {
        let mut glyphs = word("1,200.00", 400.0, 700.0);
        glyphs.extend(word("05/01/2024", 50.0, 700.0));
        glyphs.extend(word("Grocery Store", 200.0, 700.0));

        let text = render_lines(glyphs);
        assert_eq!(text.lines().count(), 1);
        assert_eq!(
            crate::document::grid::split_cells(text.lines().next().unwrap(), 2),
            vec!["05/01/2024", "Grocery Store", "1,200.00"]
        );
    }

    #[test]
    fn test_render_lines_top_to_bottom() {
        let mut glyphs = word("second", 50.0, 680.0);
        glyphs.extend(word("first", 50.0, 700.0));
        // slightly raised glyph stays on its line
        glyphs.extend(word("!", 80.0, 700.8));

        assert_eq!(render_lines(glyphs), "first!\nsecond\n");
    }

    #[test]
    fn test_render_lines_small_gap_is_one_space() {
        let mut glyphs = word("Grocery", 50.0, 700.0);
        glyphs.extend(word("Store", 50.0 + 7.0 * 6.0 + 3.0, 700.0));
        assert_eq!(render_lines(glyphs), "Grocery Store\n");
    }

    #[test]
    fn test_render_lines_empty() {
        assert_eq!(render_lines(Vec::new()), "");
    }
}
