//! Encapsulated PostScript output.
//!
//! [`EpsBackend`] is a plotters drawing backend that records every primitive
//! as PostScript. Pixel coordinates are converted to points at the figure's
//! resolution, so an EPS file has the same physical size as its PNG sibling.
//! Text uses the printer's Helvetica; no font has to be installed locally.

use std::io;
use std::path::{Path, PathBuf};

use grapher_common::Result;
use plotters::prelude::*;
use plotters_backend::text_anchor::{HPos, VPos};
use plotters_backend::{
    BackendColor, BackendCoord, BackendStyle, BackendTextStyle, DrawingBackend, DrawingErrorKind,
    FontTransform,
};
use tracing::debug;

use crate::figure::POINTS_PER_INCH;
use crate::traits::{GraphRenderer, TextMode};

/// Width of an average Helvetica glyph relative to the font size.
const GLYPH_WIDTH: f64 = 0.55;

enum Target<'a> {
    File(PathBuf),
    Buffer(&'a mut String),
}

/// A plotters backend producing an EPS document.
pub struct EpsBackend<'a> {
    size: (u32, u32),
    dpi: f64,
    body: String,
    target: Target<'a>,
    written: bool,
}

type BackendResult = std::result::Result<(), DrawingErrorKind<io::Error>>;

impl<'a> EpsBackend<'a> {
    /// A backend writing to `path` when presented.
    pub fn new(path: impl Into<PathBuf>, size: (u32, u32), dpi: f64) -> Self {
        Self::with_target(Target::File(path.into()), size, dpi)
    }

    /// A backend writing the finished document into `buffer`.
    pub fn with_buffer(buffer: &'a mut String, size: (u32, u32), dpi: f64) -> Self {
        Self::with_target(Target::Buffer(buffer), size, dpi)
    }

    fn with_target(target: Target<'a>, size: (u32, u32), dpi: f64) -> Self {
        Self {
            size,
            dpi,
            body: String::new(),
            target,
            written: false,
        }
    }

    fn pt(&self, px: f64) -> f64 {
        px * POINTS_PER_INCH / self.dpi
    }

    fn coord(&self, (x, y): BackendCoord) -> (f64, f64) {
        (
            self.pt(f64::from(x)),
            self.pt(f64::from(self.size.1) - f64::from(y)),
        )
    }

    fn op(&mut self, text: &str) {
        self.body.push_str(text);
        self.body.push('\n');
    }

    /// Sets the colour; false when the colour is fully transparent.
    fn set_color(&mut self, color: BackendColor) -> bool {
        if color.alpha <= 0.0 {
            return false;
        }
        let (r, g, b) = color.rgb;
        self.op(&format!(
            "{:.3} {:.3} {:.3} setrgbcolor",
            f64::from(r) / 255.0,
            f64::from(g) / 255.0,
            f64::from(b) / 255.0
        ));
        true
    }

    fn set_stroke<S: BackendStyle>(&mut self, style: &S) -> bool {
        if !self.set_color(style.color()) {
            return false;
        }
        let width = self.pt(f64::from(style.stroke_width().max(1)));
        self.op(&format!("{width:.3} setlinewidth"));
        true
    }

    fn path<I: IntoIterator<Item = BackendCoord>>(&mut self, points: I) -> usize {
        let mut count = 0;
        for point in points {
            let (x, y) = self.coord(point);
            let verb = if count == 0 { "moveto" } else { "lineto" };
            self.op(&format!("{x:.2} {y:.2} {verb}"));
            count += 1;
        }
        count
    }

    /// The complete document for what has been drawn so far.
    #[must_use]
    pub fn document(&self) -> String {
        let width = self.pt(f64::from(self.size.0));
        let height = self.pt(f64::from(self.size.1));
        let mut doc = String::with_capacity(self.body.len() + 256);
        doc.push_str("%!PS-Adobe-3.0 EPSF-3.0\n");
        doc.push_str(&format!(
            "%%BoundingBox: 0 0 {} {}\n",
            width.ceil(),
            height.ceil()
        ));
        doc.push_str(&format!(
            "%%HiResBoundingBox: 0 0 {width:.3} {height:.3}\n"
        ));
        doc.push_str("%%Creator: grapher\n%%Pages: 1\n%%EndComments\n");
        doc.push_str("1 setlinejoin 1 setlinecap\n");
        doc.push_str(&self.body);
        doc.push_str("showpage\n%%EOF\n");
        doc
    }
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '(' | ')' | '\\' => {
                out.push('\\');
                out.push(c);
            }
            c if c.is_ascii() && !c.is_ascii_control() => out.push(c),
            _ => out.push('?'),
        }
    }
    out
}

impl DrawingBackend for EpsBackend<'_> {
    type ErrorType = io::Error;

    fn get_size(&self) -> (u32, u32) {
        self.size
    }

    fn ensure_prepared(&mut self) -> BackendResult {
        Ok(())
    }

    fn present(&mut self) -> BackendResult {
        if self.written {
            return Ok(());
        }
        let doc = self.document();
        match &mut self.target {
            Target::File(path) => {
                std::fs::write(&*path, doc).map_err(DrawingErrorKind::DrawingError)?;
            }
            Target::Buffer(buffer) => {
                buffer.clear();
                buffer.push_str(&doc);
            }
        }
        self.written = true;
        Ok(())
    }

    fn draw_pixel(&mut self, point: BackendCoord, color: BackendColor) -> BackendResult {
        if self.set_color(color) {
            let (x, y) = self.coord(point);
            let side = self.pt(1.0);
            self.op(&format!("{x:.2} {:.2} {side:.3} {side:.3} rectfill", y - side));
        }
        Ok(())
    }

    fn draw_line<S: BackendStyle>(
        &mut self,
        from: BackendCoord,
        to: BackendCoord,
        style: &S,
    ) -> BackendResult {
        if self.set_stroke(style) {
            self.op("newpath");
            self.path([from, to]);
            self.op("stroke");
        }
        Ok(())
    }

    fn draw_rect<S: BackendStyle>(
        &mut self,
        upper_left: BackendCoord,
        bottom_right: BackendCoord,
        style: &S,
        fill: bool,
    ) -> BackendResult {
        let painted = if fill {
            self.set_color(style.color())
        } else {
            self.set_stroke(style)
        };
        if painted {
            let (x0, y0) = upper_left;
            let (x1, y1) = bottom_right;
            self.op("newpath");
            self.path([(x0, y0), (x1, y0), (x1, y1), (x0, y1)]);
            self.op(if fill { "closepath fill" } else { "closepath stroke" });
        }
        Ok(())
    }

    fn draw_path<S: BackendStyle, I: IntoIterator<Item = BackendCoord>>(
        &mut self,
        path: I,
        style: &S,
    ) -> BackendResult {
        if self.set_stroke(style) {
            self.op("newpath");
            if self.path(path) > 1 {
                self.op("stroke");
            } else {
                self.op("newpath");
            }
        }
        Ok(())
    }

    fn draw_circle<S: BackendStyle>(
        &mut self,
        center: BackendCoord,
        radius: u32,
        style: &S,
        fill: bool,
    ) -> BackendResult {
        let painted = if fill {
            self.set_color(style.color())
        } else {
            self.set_stroke(style)
        };
        if painted {
            let (x, y) = self.coord(center);
            let r = self.pt(f64::from(radius));
            let verb = if fill { "fill" } else { "stroke" };
            self.op(&format!("newpath {x:.2} {y:.2} {r:.2} 0 360 arc closepath {verb}"));
        }
        Ok(())
    }

    fn fill_polygon<S: BackendStyle, I: IntoIterator<Item = BackendCoord>>(
        &mut self,
        vert: I,
        style: &S,
    ) -> BackendResult {
        if self.set_color(style.color()) {
            self.op("newpath");
            if self.path(vert) > 2 {
                self.op("closepath fill");
            } else {
                self.op("newpath");
            }
        }
        Ok(())
    }

    fn draw_text<TStyle: BackendTextStyle>(
        &mut self,
        text: &str,
        style: &TStyle,
        pos: BackendCoord,
    ) -> BackendResult {
        if text.is_empty() || !self.set_color(style.color()) {
            return Ok(());
        }
        let size = self.pt(style.size());
        let (x, y) = self.coord(pos);
        let angle = match style.transform() {
            FontTransform::Rotate90 => -90,
            FontTransform::Rotate180 => 180,
            FontTransform::Rotate270 => 90,
            FontTransform::None => 0,
        };
        let anchor = style.anchor();
        let dx = match anchor.h_pos {
            HPos::Left => "pop 0",
            HPos::Center => "2 div neg",
            HPos::Right => "neg",
        };
        let dy = match anchor.v_pos {
            VPos::Top => -0.75 * size,
            VPos::Center => -0.35 * size,
            VPos::Bottom => 0.0,
        };
        self.op(&format!("/Helvetica findfont {size:.2} scalefont setfont"));
        self.op(&format!(
            "gsave {x:.2} {y:.2} translate {angle} rotate ({text}) dup stringwidth pop {dx} {dy:.2} moveto show grestore",
            text = escape(text),
        ));
        Ok(())
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
    fn estimate_text_size<TStyle: BackendTextStyle>(
        &self,
        text: &str,
        style: &TStyle,
    ) -> std::result::Result<(u32, u32), DrawingErrorKind<Self::ErrorType>> {
        let size = style.size();
        let width = text.chars().count() as f64 * size * GLYPH_WIDTH;
        Ok((width.ceil() as u32, size.ceil() as u32))
    }
}

fn draw<R: GraphRenderer>(graph: &R, backend: EpsBackend<'_>) -> Result<()> {
    let root = backend.into_drawing_area();
    root.fill(&WHITE)?;
    graph.draw(&root, TextMode::Full)?;
    root.present()?;
    Ok(())
}

/// Writes `graph` as an EPS file at `path`.
pub fn render_eps<R: GraphRenderer>(graph: &R, path: &Path) -> Result<()> {
    let size = graph.size();
    draw(graph, EpsBackend::new(path, size.pixels(), size.dpi))?;
    debug!(path = %path.display(), graph = graph.name(), "Wrote EPS");
    Ok(())
}

/// Renders `graph` to an EPS document in memory.
pub fn render_eps_string<R: GraphRenderer>(graph: &R) -> Result<String> {
    let size = graph.size();
    let mut doc = String::new();
    draw(graph, EpsBackend::with_buffer(&mut doc, size.pixels(), size.dpi))?;
    Ok(doc)
}
