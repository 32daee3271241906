//! Tests for weaving animation frames and GIF export

#[cfg(test)]
mod tests {
    use randompicks::io::image::CarpetRenderer;
    use randompicks::io::palette::Palette;
    use randompicks::io::visualization::WeavingCapture;
    use randompicks::math::draws::seeded;
    use randompicks::spatial::carpet::Carpet;
    use randompicks::spatial::threading::Threading;

    fn carpet(rows: usize) -> Carpet {
        Carpet::weave(&Threading::short(), rows, &mut seeded(21)).unwrap()
    }

    fn renderer() -> CarpetRenderer {
        CarpetRenderer::new(1, 1, Palette::default()).unwrap()
    }

    // Tests the empty color averages the palette
    // Verified by using the ground color
    #[test]
    fn test_empty_color() {
        let carpet = carpet(2);
        let capture = WeavingCapture::new(&carpet, renderer());

        assert_eq!(capture.empty_color(), [164, 158, 115, 255]);
    }

    // Tests row skipping for delays below viewer support
    // Verified by always returning one
    #[test]
    fn test_skip_factor() {
        assert_eq!(WeavingCapture::skip_factor(50), 1);
        assert_eq!(WeavingCapture::skip_factor(100), 1);
        assert_eq!(WeavingCapture::skip_factor(20), 3);
        assert_eq!(WeavingCapture::skip_factor(5), 10);
        assert_eq!(WeavingCapture::skip_factor(0), 50);
    }

    // Tests partial frames blank the unwoven rows
    // Verified by painting every row regardless of progress
    #[test]
    fn test_frame_image() {
        let carpet = carpet(6);
        let renderer = renderer();
        let capture = WeavingCapture::new(&carpet, renderer);
        let full = renderer.paint(&carpet).unwrap();

        let empty = capture.frame_image(0).unwrap();
        assert!(empty.pixels().all(|p| p.0 == capture.empty_color()));

        let partial = capture.frame_image(3).unwrap();
        for (x, y, pixel) in partial.enumerate_pixels() {
            if y < 3 {
                assert_eq!(pixel, full.get_pixel(x, y));
            } else {
                assert_eq!(pixel.0, capture.empty_color());
            }
        }

        assert_eq!(capture.frame_image(6).unwrap(), full);
    }

    // Tests frame count from empty loom to finished carpet
    // Verified by dropping the closing frame
    #[test]
    fn test_frames() {
        let carpet = carpet(10);
        let capture = WeavingCapture::new(&carpet, renderer());

        assert_eq!(capture.frames(50).unwrap().count(), 11);
        assert_eq!(capture.frames(25).unwrap().count(), 6);
        assert!(capture.frames(0).is_err());
    }

    // Tests the schedule grows by the skip factor and lingers on the end
    // Verified by giving the closing frame the regular delay
    #[test]
    fn test_frame_schedule() {
        let carpet = carpet(5);
        let capture = WeavingCapture::new(&carpet, renderer());

        assert_eq!(
            capture.frame_schedule(25).unwrap(),
            vec![(0, 50), (2, 50), (4, 50), (5, 1250)]
        );
    }

    // Tests frames are painted from the woven rows only
    // Verified by painting rows past the schedule entry
    #[test]
    fn test_frames_follow_schedule() {
        let carpet = carpet(4);
        let renderer = renderer();
        let capture = WeavingCapture::new(&carpet, renderer);

        let frames = capture.frames(50).unwrap().collect::<Vec<_>>();
        let second = frames.get(1).unwrap().as_ref().unwrap();
        let woven = renderer.render_rows(&carpet, 1).unwrap();

        assert_eq!(second.buffer().height(), 4);
        for (x, y, pixel) in second.buffer().enumerate_pixels() {
            if y < 1 {
                assert_eq!(pixel, woven.get_pixel(x, y));
            } else {
                assert_eq!(pixel.0, capture.empty_color());
            }
        }
    }

    // Tests the progress callback runs once per encoded frame
    // Verified by calling it once per export
    #[test]
    fn test_export_gif_with_progress() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("weaving.gif");
        let carpet = carpet(7);
        let capture = WeavingCapture::new(&carpet, renderer());
        let mut encoded = 0;

        capture
            .export_gif_with_progress(&path, 50, || encoded += 1)
            .unwrap();

        assert_eq!(encoded, capture.frame_schedule(50).unwrap().len());
        assert!(image::open(&path).is_ok());
    }

    // Tests GIF export writes a file
    // Verified by skipping the encoder
    #[test]
    fn test_export_gif() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("weaving.gif");
        let carpet = carpet(4);
        let capture = WeavingCapture::new(&carpet, renderer());

        capture.export_gif(&path, 50).unwrap();

        assert!(path.exists());
        assert!(std::fs::metadata(&path).unwrap().len() > 0);
    }

    // Tests export into an invalid location fails
    // Verified by ignoring file creation errors
    #[test]
    fn test_export_gif_error() {
        let carpet = carpet(2);
        let capture = WeavingCapture::new(&carpet, renderer());

        let result = capture.export_gif(std::path::Path::new("/dev/null/test.gif"), 50);

        assert!(result.is_err());
    }
}
