use std::fs;
use std::path::{Path, PathBuf};

use crate::error::Result;

/// Vector master of the loop icon, 128x128 view box.
pub const ICON_SVG: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 128 128">
  <defs>
    <linearGradient id="bg" x1="0%" y1="0%" x2="100%" y2="100%">
      <stop offset="0%" style="stop-color:#4F46E5" />
      <stop offset="100%" style="stop-color:#7C3AED" />
    </linearGradient>
    <linearGradient id="loop" x1="0%" y1="0%" x2="100%" y2="100%">
      <stop offset="0%" style="stop-color:#FFFFFF" />
      <stop offset="100%" style="stop-color:#E0E7FF" />
    </linearGradient>
  </defs>
  
  <!-- Rounded square background -->
  <rect width="128" height="128" rx="24" fill="url(#bg)"/>
  
  <!-- Loop/infinity symbol with modern twist -->
  <g transform="translate(64, 64)">
    <!-- Main loop shape -->
    <path d="M -28 -8 C -35 -15, -45 -15, -45 0 C -45 15, -35 15, -28 8 C -21 1, -7 1, 0 8 C 7 15, 21 15, 28 8 C 35 1, 45 1, 45 0 C 45 -15, 35 -15, 28 -8 C 21 -1, 7 -1, 0 -8 C -7 -15, -21 -15, -28 -8 Z" 
          fill="url(#loop)" 
          stroke="rgba(255,255,255,0.3)" 
          stroke-width="1"/>
    
    <!-- Center connection dot -->
    <circle cx="0" cy="0" r="3" fill="rgba(255,255,255,0.8)"/>
    
    <!-- Small accent dots for dynamic feel -->
    <circle cx="-22" cy="0" r="2" fill="rgba(255,255,255,0.6)"/>
    <circle cx="22" cy="0" r="2" fill="rgba(255,255,255,0.6)"/>
  </g>
</svg>"##;

pub fn write_svg(dir: &Path) -> Result<PathBuf> {
    let path = dir.join("icon.svg");
    fs::write(&path, ICON_SVG)?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn svg_is_well_formed_enough() {
        assert!(ICON_SVG.starts_with("<svg"));
        assert!(ICON_SVG.trim_end().ends_with("</svg>"));
        assert!(ICON_SVG.contains(r#"viewBox="0 0 128 128""#));
        assert!(ICON_SVG.contains("#4F46E5"));
    }

    #[test]
    fn write_svg_creates_icon_file() {
        let dir = std::env::temp_dir().join("loops_assets_svg_write");
        fs::create_dir_all(&dir).unwrap();
        let path = write_svg(&dir).unwrap();
        assert_eq!(path, dir.join("icon.svg"));
        assert_eq!(fs::read_to_string(&path).unwrap(), ICON_SVG);
        fs::remove_dir_all(&dir).ok();
    }
}
