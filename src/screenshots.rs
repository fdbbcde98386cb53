//! Store screenshot preparation: drop alpha, center-crop to the target aspect
//! ratio, resample to the exact target size.

use std::fs;
use std::path::{Path, PathBuf};

use image::imageops::{self, FilterType};
use image::{DynamicImage, Rgb, RgbImage};

use crate::error::{Error, Result};
use crate::logger::{log_error, log_line};
use crate::pixel::ColorMode;
use crate::png;

/// Aspect ratios closer than this are resized without cropping.
const RATIO_TOLERANCE: f64 = 0.01;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Target {
    pub width: u32,
    pub height: u32,
}

impl Default for Target {
    fn default() -> Self {
        Self { width: 1280, height: 800 }
    }
}

impl Target {
    /// Both sides must be non-zero.
    pub fn check(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(Error::InvalidDimensions { width: self.width, height: self.height });
        }
        Ok(())
    }

    fn ratio(&self) -> f64 {
        self.width as f64 / self.height as f64
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CropKind {
    Keep,
    Width,
    Height,
}

/// Source region kept before resampling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CropPlan {
    pub kind: CropKind,
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

pub fn plan_crop(src_w: u32, src_h: u32, target: Target) -> CropPlan {
    let src_ratio = src_w as f64 / src_h as f64;
    let ratio = target.ratio();
    let full = CropPlan { kind: CropKind::Keep, x: 0, y: 0, width: src_w, height: src_h };

    if (src_ratio - ratio).abs() < RATIO_TOLERANCE {
        full
    } else if src_ratio > ratio {
        let width = ((src_h as f64 * ratio) as u32).clamp(1, src_w);
        CropPlan { kind: CropKind::Width, x: (src_w - width) / 2, width, ..full }
    } else {
        let height = ((src_w as f64 / ratio) as u32).clamp(1, src_h);
        CropPlan { kind: CropKind::Height, y: (src_h - height) / 2, height, ..full }
    }
}

/// Composite onto white if the image carries alpha, otherwise plain RGB.
pub fn flatten(img: &DynamicImage) -> RgbImage {
    if !img.color().has_alpha() {
        return img.to_rgb8();
    }
    let rgba = img.to_rgba8();
    let (w, h) = rgba.dimensions();
    RgbImage::from_fn(w, h, |x, y| {
        let [r, g, b, a] = rgba.get_pixel(x, y).0;
        let a = a as u32;
        let over = |c: u8| ((c as u32 * a + 255 * (255 - a) + 127) / 255) as u8;
        Rgb([over(r), over(g), over(b)])
    })
}

#[derive(Debug, Clone)]
pub struct ResizeReport {
    pub original: (u32, u32),
    pub crop: CropPlan,
    pub output: PathBuf,
}

pub fn resize_image(input: &Path, output: &Path, target: Target) -> Result<ResizeReport> {
    target.check()?;
    let name = input.file_name().map(|n| n.to_string_lossy().into_owned()).unwrap_or_default();
    log_line(&format!("Processing: {}", name));

    let img = image::open(input)?;
    let rgb = flatten(&img);
    let (w, h) = rgb.dimensions();
    log_line(&format!("  Original: {}x{}", w, h));

    let crop = plan_crop(w, h, target);
    let cropped = match crop.kind {
        CropKind::Keep => rgb,
        _ => imageops::crop_imm(&rgb, crop.x, crop.y, crop.width, crop.height).to_image(),
    };
    match crop.kind {
        CropKind::Width => log_line(&format!("  Cropped width: {}px from center", crop.width)),
        CropKind::Height => log_line(&format!("  Cropped height: {}px from center", crop.height)),
        CropKind::Keep => {}
    }

    let resized = imageops::resize(&cropped, target.width, target.height, FilterType::Lanczos3);
    let row_len = target.width as usize * ColorMode::Rgb.channels();
    let rows: Vec<&[u8]> = resized.as_raw().chunks(row_len).collect();
    let bytes = png::encode(target.width, target.height, ColorMode::Rgb, &rows)?;
    fs::write(output, bytes)?;
    log_line(&format!("  Saved: {}x{} -> {}", target.width, target.height, output.display()));

    Ok(ResizeReport { original: (w, h), crop, output: output.to_path_buf() })
}

#[derive(Debug, Default)]
pub struct BatchReport {
    pub processed: usize,
    pub failed: Vec<(PathBuf, String)>,
}

fn is_screenshot(path: &Path) -> bool {
    let Some(name) = path.file_name().map(|n| n.to_string_lossy()) else {
        return false;
    };
    !name.starts_with('.') && name.to_ascii_lowercase().ends_with(".png") && path.is_file()
}

pub fn output_name(input: &Path) -> String {
    let stem = input.file_stem().map(|s| s.to_string_lossy().into_owned()).unwrap_or_default();
    format!("{}_webstore.png", stem)
}

/// Resize every PNG in `input_dir` into `output_dir`. Per-file failures are
/// logged and collected; only directory-level errors abort.
pub fn process_dir(input_dir: &Path, output_dir: &Path, target: Target) -> Result<BatchReport> {
    target.check()?;
    fs::create_dir_all(output_dir)?;

    let mut inputs = Vec::new();
    for entry in fs::read_dir(input_dir)? {
        match entry {
            Ok(entry) => {
                let path = entry.path();
                if is_screenshot(&path) {
                    inputs.push(path);
                }
            }
            Err(e) => log_error(&format!("Unreadable entry in {}", input_dir.display()), &e),
        }
    }
    inputs.sort();

    let mut report = BatchReport::default();
    for input in inputs {
        let output = output_dir.join(output_name(&input));
        match resize_image(&input, &output, target) {
            Ok(_) => report.processed += 1,
            Err(e) => {
                let name = input.file_name().map(|n| n.to_string_lossy().into_owned()).unwrap_or_default();
                log_error(&format!("Error processing {}", name), &e);
                report.failed.push((input, e.to_string()));
            }
        }
    }
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pixel::PixelBuffer;

    fn temp_dir(tag: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("loops_assets_{}", tag));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn write_rgba(path: &Path, w: u32, h: u32, px: [u8; 4]) {
        let mut buf = PixelBuffer::new(w, h, ColorMode::Rgba).unwrap();
        for y in 0..h {
            for x in 0..w {
                buf.put_pixel(x, y, &px);
            }
        }
        png::write_png(path, &buf).unwrap();
    }

    #[test]
    fn matching_ratio_is_not_cropped() {
        let plan = plan_crop(2560, 1600, Target::default());
        assert_eq!(plan.kind, CropKind::Keep);
        assert_eq!((plan.width, plan.height), (2560, 1600));
        // 1.6 vs 1.605 is within tolerance
        assert_eq!(plan_crop(1605, 1000, Target::default()).kind, CropKind::Keep);
    }

    #[test]
    fn wide_source_crops_width_from_center() {
        let plan = plan_crop(2000, 800, Target::default());
        assert_eq!(plan, CropPlan { kind: CropKind::Width, x: 360, y: 0, width: 1280, height: 800 });
    }

    #[test]
    fn tall_source_crops_height_from_center() {
        let plan = plan_crop(1280, 1000, Target::default());
        assert_eq!(plan, CropPlan { kind: CropKind::Height, x: 0, y: 100, width: 1280, height: 800 });
    }

    #[test]
    fn alpha_is_composited_on_white() {
        let mut img = image::RgbaImage::new(3, 1);
        img.put_pixel(0, 0, image::Rgba([0, 0, 0, 0]));
        img.put_pixel(1, 0, image::Rgba([10, 20, 30, 255]));
        img.put_pixel(2, 0, image::Rgba([0, 0, 0, 128]));
        let flat = flatten(&DynamicImage::ImageRgba8(img));
        assert_eq!(flat.get_pixel(0, 0).0, [255, 255, 255]);
        assert_eq!(flat.get_pixel(1, 0).0, [10, 20, 30]);
        assert_eq!(flat.get_pixel(2, 0).0, [127, 127, 127]);
    }

    #[test]
    fn resize_writes_opaque_target_size() {
        let dir = temp_dir("resize_single");
        let input = dir.join("shot.png");
        write_rgba(&input, 120, 40, [0, 0, 0, 0]);
        let output = dir.join("out.png");
        let target = Target { width: 32, height: 20 };
        let report = resize_image(&input, &output, target).unwrap();
        assert_eq!(report.original, (120, 40));
        assert_eq!(report.crop.kind, CropKind::Width);
        assert_eq!(report.crop.width, 64);

        let img = image::load_from_memory(&fs::read(&output).unwrap()).unwrap();
        let DynamicImage::ImageRgb8(rgb) = img else {
            panic!("expected RGB output");
        };
        assert_eq!(rgb.dimensions(), (32, 20));
        assert!(rgb.pixels().all(|p| p.0 == [255, 255, 255]));
        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn zero_target_is_rejected_not_panicked() {
        let dir = temp_dir("resize_zero_target");
        write_rgba(&dir.join("shot.png"), 10, 10, [1, 2, 3, 255]);
        let target = Target { width: 0, height: 800 };
        assert!(matches!(
            process_dir(&dir, &dir.join("out"), target),
            Err(Error::InvalidDimensions { width: 0, height: 800 })
        ));
        assert!(matches!(
            resize_image(&dir.join("shot.png"), &dir.join("o.png"), Target { width: 640, height: 0 }),
            Err(Error::InvalidDimensions { width: 640, height: 0 })
        ));
        assert!(!dir.join("out").exists());
        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn screenshot_filter_is_case_insensitive_and_skips_hidden() {
        let dir = temp_dir("resize_filter");
        write_rgba(&dir.join("Shot.Png"), 2, 2, [0, 0, 0, 255]);
        write_rgba(&dir.join(".x.png"), 2, 2, [0, 0, 0, 255]);
        assert!(is_screenshot(&dir.join("Shot.Png")));
        assert!(!is_screenshot(&dir.join(".x.png")));
        assert!(!is_screenshot(&dir.join("missing.png")));
        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn batch_skips_non_screenshots_and_continues_on_error() {
        let dir = temp_dir("resize_batch");
        write_rgba(&dir.join("b.png"), 16, 10, [200, 0, 0, 255]);
        write_rgba(&dir.join("a.PNG"), 30, 10, [0, 200, 0, 255]);
        write_rgba(&dir.join(".hidden.png"), 16, 10, [0, 0, 0, 255]);
        fs::write(dir.join("broken.png"), b"not a png").unwrap();
        fs::write(dir.join("notes.txt"), b"hi").unwrap();
        fs::create_dir_all(dir.join("folder.png")).unwrap();

        let out = dir.join("webstore");
        let report = process_dir(&dir, &out, Target { width: 16, height: 10 }).unwrap();
        assert_eq!(report.processed, 2);
        assert_eq!(report.failed.len(), 1);
        assert!(report.failed[0].0.ends_with("broken.png"));
        assert!(out.join("a_webstore.png").is_file());
        assert!(out.join("b_webstore.png").is_file());
        assert!(!out.join(".hidden_webstore.png").exists());
        fs::remove_dir_all(&dir).ok();
    }
}
