//! Character framebuffer the view draws into and the renderer diffs.

/// 24-bit color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const BLACK: Rgb = Rgb(0, 0, 0);
    pub const WHITE: Rgb = Rgb(255, 255, 255);
}

/// Colors and attributes of one glyph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Style {
    pub fg: Rgb,
    pub bg: Rgb,
    pub bold: bool,
    pub dim: bool,
}

impl Style {
    pub const PLAIN: Style = Style::fg_on(Rgb(220, 220, 220), Rgb::BLACK);

    pub const fn fg_on(fg: Rgb, bg: Rgb) -> Self {
        Self {
            fg,
            bg,
            bold: false,
            dim: false,
        }
    }

    pub const fn bold(self) -> Self {
        Self { bold: true, ..self }
    }

    pub const fn dim(self) -> Self {
        Self { dim: true, ..self }
    }
}

impl Default for Style {
    fn default() -> Self {
        Self::PLAIN
    }
}

/// A styled character cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Glyph {
    pub ch: char,
    pub style: Style,
}

impl Glyph {
    pub const BLANK: Glyph = Glyph {
        ch: ' ',
        style: Style::PLAIN,
    };

    pub const fn new(ch: char, style: Style) -> Self {
        Self { ch, style }
    }
}

impl Default for Glyph {
    fn default() -> Self {
        Self::BLANK
    }
}

/// Screen rectangle in terminal cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub x: u16,
    pub y: u16,
    pub w: u16,
    pub h: u16,
}

impl Rect {
    pub const fn new(x: u16, y: u16, w: u16, h: u16) -> Self {
        Self { x, y, w, h }
    }

    /// A `w x h` rectangle centered inside `self`, pinned to the top-left edge when it does not fit.
    pub fn centered(&self, w: u16, h: u16) -> Rect {
        Rect::new(
            self.x + self.w.saturating_sub(w) / 2,
            self.y + self.h.saturating_sub(h) / 2,
            w,
            h,
        )
    }

    /// The rectangle shrunk by one cell on every side.
    pub fn inner(&self) -> Rect {
        Rect::new(
            self.x.saturating_add(1),
            self.y.saturating_add(1),
            self.w.saturating_sub(2),
            self.h.saturating_sub(2),
        )
    }

    pub fn right(&self) -> u16 {
        self.x.saturating_add(self.w)
    }

    pub fn bottom(&self) -> u16 {
        self.y.saturating_add(self.h)
    }
}

/// Row-major grid of glyphs. Writes outside the buffer are dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameBuffer {
    width: u16,
    height: u16,
    glyphs: Vec<Glyph>,
}

impl FrameBuffer {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            glyphs: vec![Glyph::BLANK; width as usize * height as usize],
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn area(&self) -> Rect {
        Rect::new(0, 0, self.width, self.height)
    }

    /// Change dimensions, keeping the allocation. Contents become blank.
    pub fn resize(&mut self, width: u16, height: u16) {
        if (self.width, self.height) != (width, height) {
            self.width = width;
            self.height = height;
            self.glyphs.clear();
            self.glyphs
                .resize(width as usize * height as usize, Glyph::BLANK);
        }
    }

    pub fn clear(&mut self, glyph: Glyph) {
        self.glyphs.fill(glyph);
    }

    fn offset(&self, x: u16, y: u16) -> Option<usize> {
        (x < self.width && y < self.height).then(|| y as usize * self.width as usize + x as usize)
    }

    pub fn get(&self, x: u16, y: u16) -> Option<Glyph> {
        self.offset(x, y).map(|i| self.glyphs[i])
    }

    pub fn set(&mut self, x: u16, y: u16, glyph: Glyph) {
        if let Some(i) = self.offset(x, y) {
            self.glyphs[i] = glyph;
        }
    }

    /// Glyphs of row `y`.
    pub fn row(&self, y: u16) -> Option<&[Glyph]> {
        if y >= self.height {
            return None;
        }
        let w = self.width as usize;
        let start = y as usize * w;
        Some(&self.glyphs[start..start + w])
    }

    /// Write `s` left to right; returns the column after the last character.
    pub fn text(&mut self, x: u16, y: u16, s: &str, style: Style) -> u16 {
        let mut cx = x;
        for ch in s.chars() {
            if cx >= self.width {
                break;
            }
            self.set(cx, y, Glyph::new(ch, style));
            cx += 1;
        }
        cx
    }

    /// Write a decimal number without allocating.
    pub fn number(&mut self, x: u16, y: u16, value: u32, style: Style) -> u16 {
        let mut buf = [0u8; 10];
        let mut start = buf.len();
        let mut n = value;
        loop {
            start -= 1;
            buf[start] = b'0' + (n % 10) as u8;
            n /= 10;
            if n == 0 {
                break;
            }
        }
        // Only ASCII digits were written.
        let digits = std::str::from_utf8(&buf[start..]).unwrap_or("");
        self.text(x, y, digits, style)
    }

    pub fn fill(&mut self, rect: Rect, glyph: Glyph) {
        for y in rect.y..rect.bottom() {
            for x in rect.x..rect.right() {
                self.set(x, y, glyph);
            }
        }
    }

    /// The characters of row `y` as a string.
    pub fn row_text(&self, y: u16) -> String {
        self.row(y)
            .map(|row| row.iter().map(|g| g.ch).collect())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_number() {
        let mut fb = FrameBuffer::new(12, 1);
        assert_eq!(fb.number(0, 0, 0, Style::PLAIN), 1);
        assert_eq!(fb.row_text(0).trim_end(), "0");
        assert_eq!(fb.number(0, 0, u32::MAX, Style::PLAIN), 10);
        assert_eq!(fb.row_text(0).trim_end(), "4294967295");
    }

    #[test]
    fn test_text_clips_at_edge() {
        let mut fb = FrameBuffer::new(3, 1);
        assert_eq!(fb.text(1, 0, "abc", Style::PLAIN), 3);
        assert_eq!(fb.row_text(0), " ab");
    }

    #[test]
    fn test_resize_blanks_contents() {
        let mut fb = FrameBuffer::new(2, 2);
        fb.set(1, 1, Glyph::new('x', Style::PLAIN));
        fb.resize(4, 3);
        assert_eq!(fb.area(), Rect::new(0, 0, 4, 3));
        assert!(fb.get(3, 2).is_some());
        assert!(fb.get(4, 2).is_none());
        assert!((0..3).all(|y| fb.row_text(y) == "    "));
    }

    #[test]
    fn test_rect_helpers() {
        let outer = Rect::new(0, 0, 30, 10);
        let frame = outer.centered(22, 12);
        assert_eq!(frame, Rect::new(4, 0, 22, 12));
        assert_eq!(frame.inner(), Rect::new(5, 1, 20, 10));
        assert_eq!(frame.right(), 26);
    }

    #[test]
    fn test_style_builders() {
        let s = Style::fg_on(Rgb::WHITE, Rgb::BLACK).bold();
        assert!(s.bold);
        assert!(!s.dim);
        assert!(Style::PLAIN.dim().dim);
    }
}
