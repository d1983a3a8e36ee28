//! Font collaborator and label text layout.
//!
//! Glyph rasterization and atlas management belong to the host. The toolkit
//! only needs run widths, which it gets through [`FontProvider`], and it
//! emits one `RenderCommand::Text` per laid-out line.

use crate::error::FontError;

/// Measures text runs for the layout engine.
pub trait FontProvider {
    /// Width in physical pixels of `text` rendered at `ysize` pixels tall.
    ///
    /// # Errors
    ///
    /// Returns a `FontError` when the run cannot be measured. The element
    /// is then laid out at zero size and renders nothing.
    fn text_width(&mut self, text: &str, ysize: i32) -> Result<i32, FontError>;
}

/// Fixed-advance font, useful for tests, debug overlays and terminals.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonospaceFont {
    /// Glyph advance as a fraction of the font size.
    pub advance_ratio: f32,
}

impl MonospaceFont {
    /// Creates a font whose glyphs advance `advance_ratio * ysize` pixels.
    #[must_use]
    pub const fn new(advance_ratio: f32) -> Self {
        Self { advance_ratio }
    }
}

impl Default for MonospaceFont {
    fn default() -> Self {
        Self::new(0.5)
    }
}

impl FontProvider for MonospaceFont {
    #[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
    fn text_width(&mut self, text: &str, ysize: i32) -> Result<i32, FontError> {
        let glyphs = text.chars().count() as f32;
        Ok((glyphs * ysize as f32 * self.advance_ratio).round() as i32)
    }
}

/// Horizontal placement of lines inside a label box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAlignment {
    /// Flush left.
    #[default]
    Left,
    /// Centered.
    Center,
    /// Flush right.
    Right,
}

impl TextAlignment {
    /// Offset of a line of `line_width` inside a box of `box_width`.
    #[must_use]
    pub fn offset(self, box_width: i32, line_width: i32) -> i32 {
        let space = (box_width - line_width).max(0);
        match self {
            Self::Left => 0,
            Self::Center => space / 2,
            Self::Right => space,
        }
    }
}

/// One laid-out line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextLine {
    /// Line content, ellipsis included when truncated.
    pub text: String,
    /// Measured width in physical pixels.
    pub width: i32,
}

/// Result of laying out a label.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TextBlock {
    /// Lines top to bottom.
    pub lines: Vec<TextLine>,
    /// Widest line.
    pub width: i32,
    /// Total height: one font size plus one line advance per extra line.
    pub height: i32,
    /// Distance between line tops.
    pub line_advance: i32,
    /// Some text did not fit and was replaced by the ellipsis.
    pub truncated: bool,
}

/// Parameters for [`layout_text`].
#[derive(Debug, Clone, Copy)]
pub struct TextLayout<'a> {
    /// Font size in physical pixels.
    pub ysize: i32,
    /// Wrap width. `None` keeps each paragraph on one line.
    pub max_width: Option<i32>,
    /// Height limit. `None` means unconstrained.
    pub max_height: Option<i32>,
    /// Line advance as a multiple of `ysize`.
    pub line_height_scale: f32,
    /// Appended to the last visible line when lines are dropped.
    pub ellipsis: &'a str,
}

/// Greedily wraps `text` into lines.
///
/// Explicit newlines always break. Words wider than `max_width` get a line
/// of their own and overflow it. Empty text yields one empty line.
///
/// # Errors
///
/// Propagates the first `FontError` from `font`.
pub fn layout_text(
    font: &mut dyn FontProvider,
    text: &str,
    params: &TextLayout<'_>,
) -> Result<TextBlock, FontError> {
    let ysize = params.ysize.max(0);
    #[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
    let line_advance = (ysize as f32 * params.line_height_scale).round().max(0.0) as i32;

    let mut lines = Vec::new();
    for paragraph in text.split('\n') {
        match params.max_width {
            None => {
                let width = font.text_width(paragraph, ysize)?;
                lines.push(TextLine { text: paragraph.to_owned(), width });
            }
            Some(max_width) => wrap_paragraph(font, paragraph, ysize, max_width, &mut lines)?,
        }
    }

    let mut truncated = false;
    if let Some(max_height) = params.max_height {
        let max_lines = if line_advance > 0 && max_height > ysize {
            1 + usize::try_from((max_height - ysize) / line_advance).unwrap_or(0)
        } else {
            1
        };
        if lines.len() > max_lines {
            lines.truncate(max_lines);
            if let Some(last) = lines.last_mut() {
                *last = append_ellipsis(font, &last.text, ysize, params)?;
            }
            truncated = true;
        }
    }

    let width = lines.iter().map(|l| l.width).max().unwrap_or(0);
    let extra = i32::try_from(lines.len().saturating_sub(1)).unwrap_or(i32::MAX);
    let height = ysize + extra.saturating_mul(line_advance);

    Ok(TextBlock {
        lines,
        width,
        height,
        line_advance,
        truncated,
    })
}

fn wrap_paragraph(
    font: &mut dyn FontProvider,
    paragraph: &str,
    ysize: i32,
    max_width: i32,
    lines: &mut Vec<TextLine>,
) -> Result<(), FontError> {
    let mut current = String::new();
    let mut current_width = 0;

    for word in paragraph.split_whitespace() {
        if current.is_empty() {
            current.push_str(word);
            current_width = font.text_width(&current, ysize)?;
            continue;
        }
        let candidate = format!("{current} {word}");
        let candidate_width = font.text_width(&candidate, ysize)?;
        if candidate_width <= max_width {
            current = candidate;
            current_width = candidate_width;
        } else {
            lines.push(TextLine {
                text: std::mem::take(&mut current),
                width: current_width,
            });
            current.push_str(word);
            current_width = font.text_width(&current, ysize)?;
        }
    }

    lines.push(TextLine {
        text: current,
        width: current_width,
    });
    Ok(())
}

/// Trims `line` from the end until it fits with the ellipsis appended.
fn append_ellipsis(
    font: &mut dyn FontProvider,
    line: &str,
    ysize: i32,
    params: &TextLayout<'_>,
) -> Result<TextLine, FontError> {
    let mut kept: Vec<char> = line.chars().collect();
    loop {
        let base: String = kept.iter().collect();
        let text = format!("{}{}", base.trim_end(), params.ellipsis);
        let width = font.text_width(&text, ysize)?;
        let fits = params.max_width.map_or(true, |max| width <= max);
        if fits || kept.is_empty() {
            return Ok(TextLine { text, width });
        }
        kept.pop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(max_width: Option<i32>, max_height: Option<i32>) -> TextLayout<'static> {
        TextLayout {
            ysize: 10,
            max_width,
            max_height,
            line_height_scale: 1.5,
            ellipsis: "...",
        }
    }

    #[test]
    fn test_single_line_natural_width() {
        let mut font = MonospaceFont::default();
        let block = layout_text(&mut font, "hello", &params(None, None)).unwrap();
        assert_eq!(block.lines.len(), 1);
        assert_eq!(block.width, 25);
        assert_eq!(block.height, 10);
    }

    #[test]
    fn test_wraps_words() {
        let mut font = MonospaceFont::default();
        // 5 px per glyph, 40 px fits 8 glyphs
        let block = layout_text(&mut font, "aaa bbb ccc", &params(Some(40), None)).unwrap();
        let texts: Vec<&str> = block.lines.iter().map(|l| l.text.as_str()).collect();
        assert_eq!(texts, vec!["aaa bbb", "ccc"]);
        assert_eq!(block.height, 10 + 15);
        assert!(!block.truncated);
    }

    #[test]
    fn test_truncates_with_ellipsis() {
        let mut font = MonospaceFont::default();
        let block =
            layout_text(&mut font, "aaa bbb ccc ddd", &params(Some(40), Some(10))).unwrap();
        assert_eq!(block.lines.len(), 1);
        assert!(block.truncated);
        assert!(block.lines[0].text.ends_with("..."));
        assert!(block.lines[0].width <= 40);
    }

    #[test]
    fn test_empty_text_is_one_line() {
        let mut font = MonospaceFont::default();
        let block = layout_text(&mut font, "", &params(Some(40), None)).unwrap();
        assert_eq!(block.lines.len(), 1);
        assert_eq!(block.width, 0);
        assert_eq!(block.height, 10);
    }

    #[test]
    fn test_alignment_offset() {
        assert_eq!(TextAlignment::Left.offset(100, 40), 0);
        assert_eq!(TextAlignment::Center.offset(100, 40), 30);
        assert_eq!(TextAlignment::Right.offset(100, 40), 60);
        assert_eq!(TextAlignment::Right.offset(10, 40), 0);
    }
}
