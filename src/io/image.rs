//! Rasterization of woven carpets and PNG export

use crate::io::error::{Result, WeaveError, invalid_argument, require_positive};
use crate::io::palette::Palette;
use crate::math::draws::DrawSource;
use crate::spatial::carpet::Carpet;
use crate::spatial::threading::Threading;
use image::RgbaImage;
use std::path::Path;

/// Paints each pick of a carpet as a `thread_width x pick_width` rectangle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CarpetRenderer {
    thread_width: u32,
    pick_width: u32,
    palette: Palette,
}

impl CarpetRenderer {
    /// Create a renderer with the given cell size in pixels
    ///
    /// # Errors
    ///
    /// Returns `InvalidDimension` if either size is zero
    pub fn new(thread_width: u32, pick_width: u32, palette: Palette) -> Result<Self> {
        require_positive("thread_width", thread_width as usize)?;
        require_positive("pick_width", pick_width as usize)?;
        Ok(Self {
            thread_width,
            pick_width,
            palette,
        })
    }

    /// Pixel width of one thread
    pub const fn thread_width(&self) -> u32 {
        self.thread_width
    }

    /// Pixel height of one pick
    pub const fn pick_width(&self) -> u32 {
        self.pick_width
    }

    /// Palette used for painting
    pub const fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Paint every row of the carpet
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if the image would exceed `u32` pixel bounds
    pub fn paint(&self, carpet: &Carpet) -> Result<RgbaImage> {
        self.render_rows(carpet, carpet.row_count())
    }

    /// Paint only the first `rows` rows of the carpet
    ///
    /// Requests beyond the woven rows are clamped to the full carpet.
    ///
    /// # Errors
    ///
    /// Returns `InvalidDimension` if `rows` is zero, or `InvalidArgument` if
    /// the image would exceed `u32` pixel bounds
    pub fn render_rows(&self, carpet: &Carpet, rows: usize) -> Result<RgbaImage> {
        let rows = require_positive("rows", rows)?.min(carpet.row_count());
        let (width, height) = self.dimensions(carpet.thread_count(), rows)?;

        let picks = carpet.picks();
        let thread_width = self.thread_width;
        let pick_width = self.pick_width;
        let palette = self.palette;

        Ok(RgbaImage::from_fn(width, height, |x, y| {
            let row = (y / pick_width) as usize;
            let thread = (x / thread_width) as usize;
            palette.color_for(picks.get([row, thread]).copied().unwrap_or(0))
        }))
    }

    /// Pixel size of an image holding `threads x rows` cells
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if either side exceeds `u32` pixel bounds
    pub fn dimensions(&self, threads: usize, rows: usize) -> Result<(u32, u32)> {
        Ok((
            scaled("image width", threads, self.thread_width)?,
            scaled("image height", rows, self.pick_width)?,
        ))
    }
}

/// Weave and paint a carpet from two default blocks in one call
///
/// # Errors
///
/// Returns `InvalidDimension` if `row_count`, `thread_width` or `pick_width`
/// is zero, `InvariantViolation` if a block leaves its bounds, or
/// `InvalidArgument` if the image would exceed `u32` pixel bounds
pub fn render(
    threading: &Threading,
    row_count: usize,
    thread_width: u32,
    pick_width: u32,
    palette: Palette,
    draws: &mut impl DrawSource,
) -> Result<RgbaImage> {
    let renderer = CarpetRenderer::new(thread_width, pick_width, palette)?;
    let carpet = Carpet::weave(threading, row_count, draws)?;
    renderer.paint(&carpet)
}

fn scaled(parameter: &'static str, count: usize, size: u32) -> Result<u32> {
    u32::try_from(count)
        .ok()
        .and_then(|count| count.checked_mul(size))
        .ok_or_else(|| {
            invalid_argument(
                parameter,
                &format!("{count} x {size}"),
                &"image exceeds the maximum pixel size",
            )
        })
}

/// Save an image as PNG, creating parent directories as needed
///
/// # Errors
///
/// Returns an error if:
/// - The parent directory cannot be created
/// - The image cannot be encoded or written
pub fn export_image_as_png(image: &RgbaImage, output_path: &Path) -> Result<()> {
    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|e| WeaveError::FileSystem {
                path: parent.to_path_buf(),
                operation: "create directory",
                source: e,
            })?;
        }
    }

    image
        .save_with_format(output_path, image::ImageFormat::Png)
        .map_err(|e| WeaveError::ImageExport {
            path: output_path.to_path_buf(),
            source: e,
        })
}
