use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::logger::log_line;
use crate::pixel::{ColorMode, PixelBuffer};
use crate::png::write_png;

pub const DEFAULT_SIZES: [u32; 4] = [16, 32, 48, 128];

/// Brand purple used by the flat styles.
const PURPLE: [u8; 3] = [108, 58, 237];
const INDIGO: [u8; 3] = [0x4F, 0x46, 0xE5];
const VIOLET: [u8; 3] = [0x7C, 0x3A, 0xED];
const WHITE: [u8; 4] = [255, 255, 255, 255];
const CLEAR: [u8; 4] = [0, 0, 0, 0];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IconStyle {
    /// Opaque flat square, no glyph.
    Placeholder,
    /// Flat rounded square with an "L".
    Solid,
    /// Diagonal gradient rounded square with an "L".
    Gradient,
    /// Vertical gradient with the two-ring loop mark.
    #[default]
    Loop,
}

impl IconStyle {
    pub fn as_str(&self) -> &'static str {
        match self {
            IconStyle::Placeholder => "placeholder",
            IconStyle::Solid => "solid",
            IconStyle::Gradient => "gradient",
            IconStyle::Loop => "loop",
        }
    }
}

impl fmt::Display for IconStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IconStyle {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "placeholder" | "simple" => Ok(IconStyle::Placeholder),
            "solid" => Ok(IconStyle::Solid),
            "gradient" => Ok(IconStyle::Gradient),
            "loop" | "better" => Ok(IconStyle::Loop),
            other => Err(format!("unknown icon style: {}", other)),
        }
    }
}

/// Rasterise a square icon of `size` pixels.
pub fn render(style: IconStyle, size: u32) -> Result<PixelBuffer> {
    if size == 0 {
        return Err(Error::InvalidSize(size));
    }
    match style {
        IconStyle::Placeholder => render_placeholder(size),
        IconStyle::Solid => render_rounded(size, |_, _| PURPLE),
        IconStyle::Gradient => render_rounded(size, |px, py| {
            // canvas gradient from (0,0) to (size,size)
            let t = ((px + py) / (2.0 * size as f32)).clamp(0.0, 1.0);
            mix(INDIGO, VIOLET, t)
        }),
        IconStyle::Loop => render_loop(size),
    }
}

fn render_placeholder(size: u32) -> Result<PixelBuffer> {
    let mut buf = PixelBuffer::new(size, size, ColorMode::Rgb)?;
    for y in 0..size {
        for x in 0..size {
            buf.put_pixel(x, y, &PURPLE);
        }
    }
    Ok(buf)
}

/// Rounded square (radius 15% of the side) with a block "L" on top.
fn render_rounded<F>(size: u32, fill: F) -> Result<PixelBuffer>
where
    F: Fn(f32, f32) -> [u8; 3],
{
    let mut buf = PixelBuffer::new(size, size, ColorMode::Rgba)?;
    let s = size as f32;
    let radius = (s * 0.15).floor();

    // glyph box approximating a bold "L" at 60% font size
    let gw = s * 0.30;
    let gh = s * 0.44;
    let stroke = (s * 0.11).max(1.0);
    let left = (s - gw) * 0.5;
    let top = (s - gh) * 0.5;

    for y in 0..size {
        for x in 0..size {
            let px = x as f32 + 0.5;
            let py = y as f32 + 0.5;
            if !in_rounded_rect(px, py, s, radius) {
                continue;
            }
            let in_box = px >= left && px < left + gw && py >= top && py < top + gh;
            let in_glyph = in_box && (px < left + stroke || py >= top + gh - stroke);
            if in_glyph {
                buf.put_pixel(x, y, &WHITE);
            } else {
                let [r, g, b] = fill(px, py);
                buf.put_pixel(x, y, &[r, g, b, 255]);
            }
        }
    }
    Ok(buf)
}

fn in_rounded_rect(px: f32, py: f32, side: f32, radius: f32) -> bool {
    if px < 0.0 || py < 0.0 || px > side || py > side {
        return false;
    }
    let qx = px.clamp(radius, side - radius);
    let qy = py.clamp(radius, side - radius);
    let (dx, dy) = (px - qx, py - qy);
    dx * dx + dy * dy <= radius * radius
}

/// Integer geometry on the pixel grid; corners cut at radius `size / 5`.
fn render_loop(size: u32) -> Result<PixelBuffer> {
    let mut buf = PixelBuffer::new(size, size, ColorMode::Rgba)?;
    let s = size as i64;
    let cr = s / 5;
    let (cx, cy) = (s / 2, s / 2);

    for y in 0..s {
        let p = y as f32 / s as f32;
        let bg = [
            lerp(79.0, 124.0, p) as u8,
            lerp(70.0, 58.0, p) as u8,
            lerp(229.0, 237.0, p) as u8,
            255,
        ];
        for x in 0..s {
            let px = if outside_corner(x, y, s, cr) {
                CLEAR
            } else if s > 32 {
                if on_loop(x, y, s, cx, cy) { WHITE } else { bg }
            } else if s >= 16 {
                if on_small_l(x, y, s, cx, cy) { WHITE } else { bg }
            } else {
                bg
            };
            buf.put_pixel(x as u32, y as u32, &px);
        }
    }
    Ok(buf)
}

fn outside_corner(x: i64, y: i64, s: i64, cr: i64) -> bool {
    let sq = |v: i64| v * v;
    let far = s - cr;
    let (ccx, ccy) = match (x < cr, x >= far, y < cr, y >= far) {
        (true, _, true, _) => (cr, cr),
        (false, true, true, _) => (far, cr),
        (true, _, false, true) => (cr, far),
        (false, true, false, true) => (far, far),
        _ => return false,
    };
    sq(x - ccx) + sq(y - ccy) > sq(cr)
}

fn on_loop(x: i64, y: i64, s: i64, cx: i64, cy: i64) -> bool {
    let thickness = (s / 20).max(2) as f32;
    let ring = (s / 4) / 2;
    let dist = |ox: i64| (((x - ox).pow(2) + (y - cy).pow(2)) as f32).sqrt();
    let near = |d: f32| (d - ring as f32).abs() < thickness;
    near(dist(cx - ring)) || near(dist(cx + ring))
}

fn on_small_l(x: i64, y: i64, s: i64, cx: i64, cy: i64) -> bool {
    let t = (s / 12).max(1);
    let q = s / 4;
    let stem = x >= cx - t && x <= cx + t && y >= cy - q && y <= cy + q;
    let foot = x >= cx - t && x <= cx + q && y >= cy + q - t && y <= cy + q + t;
    stem || foot
}

#[inline]
fn lerp(a: f32, b: f32, t: f32) -> f32 { a + (b - a) * t }

fn mix(a: [u8; 3], b: [u8; 3], t: f32) -> [u8; 3] {
    let c = |i: usize| lerp(a[i] as f32, b[i] as f32, t).round() as u8;
    [c(0), c(1), c(2)]
}

/// Write `icon{size}.png` for every size (plus `icon.svg` for the loop style).
pub fn generate_icon_set(dir: &Path, sizes: &[u32], style: IconStyle) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(dir)?;
    let mut written = Vec::with_capacity(sizes.len() + 1);

    if style == IconStyle::Loop {
        let svg = crate::svg::write_svg(dir)?;
        log_line(&format!("Created {}", svg.display()));
        written.push(svg);
    }

    for &size in sizes {
        let buf = render(style, size)?;
        let path = dir.join(icon_file_name(size));
        write_png(&path, &buf)?;
        log_line(&format!("Created {}", path.display()));
        written.push(path);
    }
    Ok(written)
}

pub fn icon_file_name(size: u32) -> String {
    format!("icon{}.png", size)
}
