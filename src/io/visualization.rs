//! Animated GIF showing a carpet being woven pick by pick

use crate::io::configuration::VIEWER_MIN_FRAME_DELAY_MS;
use crate::io::error::{Result, WeaveError, require_positive};
use crate::io::image::CarpetRenderer;
use crate::spatial::carpet::Carpet;
use image::codecs::gif::GifEncoder;
use image::{Delay, Frame, Rgba, RgbaImage, imageops};
use std::io::BufWriter;
use std::path::Path;

/// Renders growth frames of a woven carpet
///
/// Rows that have not been woven yet are painted in the average of the two
/// palette colors.
pub struct WeavingCapture<'a> {
    carpet: &'a Carpet,
    renderer: CarpetRenderer,
    empty_color: [u8; 4],
}

impl<'a> WeavingCapture<'a> {
    /// Capture frames for `carpet` painted by `renderer`
    pub fn new(carpet: &'a Carpet, renderer: CarpetRenderer) -> Self {
        let palette = renderer.palette();
        let mut empty_color = [0u8; 4];
        for (channel, (ground, overshot)) in empty_color
            .iter_mut()
            .zip(palette.ground.iter().zip(palette.overshot.iter()))
        {
            *channel = u8::midpoint(*ground, *overshot);
        }

        Self {
            carpet,
            renderer,
            empty_color,
        }
    }

    /// Color used for rows still to be woven
    pub const fn empty_color(&self) -> [u8; 4] {
        self.empty_color
    }

    /// Number of rows advanced between two frames
    ///
    /// Frame delays below what viewers support are raised to the viewer
    /// minimum and compensated by skipping rows.
    pub const fn skip_factor(frame_delay_ms: u32) -> usize {
        if frame_delay_ms == 0 {
            VIEWER_MIN_FRAME_DELAY_MS as usize
        } else if frame_delay_ms < VIEWER_MIN_FRAME_DELAY_MS {
            VIEWER_MIN_FRAME_DELAY_MS.div_ceil(frame_delay_ms) as usize
        } else {
            1
        }
    }

    /// Render the carpet with only the first `woven` rows filled in
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if the image would exceed `u32` pixel bounds
    pub fn frame_image(&self, woven: usize) -> Result<RgbaImage> {
        let (width, height) = self
            .renderer
            .dimensions(self.carpet.thread_count(), self.carpet.row_count())?;
        let mut img = RgbaImage::from_pixel(width, height, Rgba(self.empty_color));

        if woven > 0 {
            let woven_part = self.renderer.render_rows(self.carpet, woven)?;
            imageops::replace(&mut img, &woven_part, 0, 0);
        }

        Ok(img)
    }

    /// Woven row count and delay of every frame, from the empty loom to the
    /// finished carpet
    ///
    /// # Errors
    ///
    /// Returns `InvalidDimension` if `frame_delay_ms` is zero
    pub fn frame_schedule(&self, frame_delay_ms: u32) -> Result<Vec<(usize, u32)>> {
        require_positive("frame_delay_ms", frame_delay_ms as usize)?;
        let delay_ms = frame_delay_ms.max(VIEWER_MIN_FRAME_DELAY_MS);
        let skip = Self::skip_factor(frame_delay_ms);
        let rows = self.carpet.row_count();

        let mut schedule = Vec::with_capacity(rows / skip + 2);
        schedule.push((0, delay_ms));
        schedule.extend((skip..rows).step_by(skip).map(|woven| (woven, delay_ms)));

        // Final frame displays longer for better visibility
        schedule.push((rows, delay_ms * 25));

        Ok(schedule)
    }

    /// Frames rendered lazily, one at a time
    ///
    /// # Errors
    ///
    /// Returns `InvalidDimension` if `frame_delay_ms` is zero
    pub fn frames(
        &self,
        frame_delay_ms: u32,
    ) -> Result<impl Iterator<Item = Result<Frame>> + '_> {
        let schedule = self.frame_schedule(frame_delay_ms)?;
        Ok(schedule
            .into_iter()
            .map(|(woven, delay_ms)| self.frame(woven, delay_ms)))
    }

    fn frame(&self, woven: usize, delay_ms: u32) -> Result<Frame> {
        Ok(Frame::from_parts(
            self.frame_image(woven)?,
            0,
            0,
            Delay::from_numer_denom_ms(delay_ms, 1),
        ))
    }

    /// Encode the frames as an animated GIF
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `frame_delay_ms` is zero
    /// - File system operations fail
    /// - GIF encoding fails
    pub fn export_gif(&self, output_path: &Path, frame_delay_ms: u32) -> Result<()> {
        self.export_gif_with_progress(output_path, frame_delay_ms, || {})
    }

    /// Encode the frames as an animated GIF, calling `on_frame` after each
    /// frame is written
    ///
    /// Only one frame is held in memory at a time.
    ///
    /// # Errors
    ///
    /// Same as [`Self::export_gif`]
    pub fn export_gif_with_progress(
        &self,
        output_path: &Path,
        frame_delay_ms: u32,
        mut on_frame: impl FnMut(),
    ) -> Result<()> {
        let frames = self.frames(frame_delay_ms)?;

        if let Some(parent) = output_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| WeaveError::FileSystem {
                    path: parent.to_path_buf(),
                    operation: "create directory",
                    source: e,
                })?;
            }
        }

        let file = std::fs::File::create(output_path).map_err(|e| WeaveError::FileSystem {
            path: output_path.to_path_buf(),
            operation: "create file",
            source: e,
        })?;

        let mut encoder = GifEncoder::new(BufWriter::new(file));
        for frame in frames {
            encoder
                .encode_frame(frame?)
                .map_err(|e| WeaveError::ImageExport {
                    path: output_path.to_path_buf(),
                    source: e,
                })?;
            on_frame();
        }

        Ok(())
    }
}
