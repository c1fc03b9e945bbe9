//! Proportional block downsampling.

use super::estimator::{estimate, BlockRegion};
use super::PixelationMethod;
use crate::api::PipelineError;
use crate::buffer::PixelBuffer;
use crate::color::SalienceThresholds;

/// Source span `[start, end)` covered by output cell `index`.
///
/// `start = floor(index * source_len / target_len)` and
/// `end = floor((index + 1) * source_len / target_len)`, clamped to
/// `source_len`. When the target is larger than the source some spans are
/// empty; estimators resolve those through their fallbacks.
///
/// ```
/// use pixel_quant::block_bounds;
///
/// assert_eq!(block_bounds(0, 100, 3), (0, 33));
/// assert_eq!(block_bounds(1, 100, 3), (33, 66));
/// assert_eq!(block_bounds(2, 100, 3), (66, 100));
/// ```
pub fn block_bounds(index: usize, source_len: usize, target_len: usize) -> (usize, usize) {
    let start = (index as u64 * source_len as u64 / target_len as u64) as usize;
    let end = ((index as u64 + 1) * source_len as u64 / target_len as u64) as usize;
    (start, end.min(source_len))
}

/// Reduce `source` to a `target_width x target_height` grid.
///
/// Every output pixel is fully opaque: source transparency only decides
/// which pixels the estimator looks at.
///
/// # Errors
///
/// [`PipelineError::InvalidDimensions`] if a target dimension is zero.
pub fn downsample(
    source: &PixelBuffer,
    target_width: usize,
    target_height: usize,
    method: PixelationMethod,
    thresholds: &SalienceThresholds,
) -> Result<PixelBuffer, PipelineError> {
    let mut output = PixelBuffer::new(target_width, target_height)?;

    let columns: Vec<(usize, usize)> = (0..target_width)
        .map(|bx| block_bounds(bx, source.width(), target_width))
        .collect();

    for by in 0..target_height {
        let (y0, y1) = block_bounds(by, source.height(), target_height);
        for (bx, &(x0, x1)) in columns.iter().enumerate() {
            let region = BlockRegion::new(x0, x1, y0, y1);
            let color = estimate(source, &region, method, thresholds);
            output.set_rgb(bx, by, color, 255);
        }
    }

    tracing::debug!(
        from_width = source.width(),
        from_height = source.height(),
        to_width = target_width,
        to_height = target_height,
        %method,
        "downsampled"
    );

    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgb;

    #[test]
    fn test_bounds_proportional_partition() {
        let spans: Vec<_> = (0..3).map(|i| block_bounds(i, 100, 3)).collect();
        assert_eq!(spans, vec![(0, 33), (33, 66), (66, 100)]);
    }

    #[test]
    fn test_bounds_cover_source_without_gaps() {
        for &(source, target) in &[(100, 7), (31, 4), (640, 32), (5, 5)] {
            let mut expected_start = 0;
            for i in 0..target {
                let (start, end) = block_bounds(i, source, target);
                assert_eq!(start, expected_start, "gap before cell {i} of {source}->{target}");
                assert!(end > start);
                expected_start = end;
            }
            assert_eq!(expected_start, source);
        }
    }

    #[test]
    fn test_bounds_upscaling_leaves_empty_spans() {
        let spans: Vec<_> = (0..10).map(|i| block_bounds(i, 3, 10)).collect();
        assert_eq!(spans[0], (0, 0));
        assert_eq!(spans[3], (0, 1));
        assert_eq!(spans[9], (2, 3));
        assert!(spans.iter().all(|&(start, end)| start <= end && end <= 3));
    }

    #[test]
    fn test_upscaling_empty_block_falls_back() {
        let source = PixelBuffer::filled(3, 1, Rgb::new(10, 10, 10)).unwrap();
        let thresholds = SalienceThresholds::default();

        let average = downsample(&source, 10, 1, PixelationMethod::Average, &thresholds).unwrap();
        assert_eq!(average.rgb(0, 0), Rgb::WHITE);
        assert_eq!(average.rgb(3, 0), Rgb::new(10, 10, 10));

        // Nearest clamps the center into the buffer instead
        let nearest = downsample(&source, 10, 1, PixelationMethod::Nearest, &thresholds).unwrap();
        assert_eq!(nearest.rgb(0, 0), Rgb::new(10, 10, 10));
    }

    #[test]
    fn test_downsample_output_is_opaque() {
        let mut source = PixelBuffer::filled(4, 4, Rgb::new(50, 60, 70)).unwrap();
        source.set_rgba(0, 0, [0, 0, 0, 0]);
        let small = downsample(
            &source,
            2,
            2,
            PixelationMethod::Average,
            &SalienceThresholds::default(),
        )
        .unwrap();
        assert_eq!(small.width(), 2);
        assert_eq!(small.height(), 2);
        assert!(small.is_fully_opaque());
        assert_eq!(small.rgb(0, 0), Rgb::new(50, 60, 70));
    }

    #[test]
    fn test_downsample_fully_transparent_block_is_white() {
        let mut source = PixelBuffer::filled(2, 1, Rgb::new(1, 1, 1)).unwrap();
        source.set_rgba(1, 0, [1, 1, 1, 0]);
        let small = downsample(
            &source,
            2,
            1,
            PixelationMethod::Mode,
            &SalienceThresholds::default(),
        )
        .unwrap();
        assert_eq!(small.rgba(1, 0), [255, 255, 255, 255]);
    }

    #[test]
    fn test_downsample_quadrants() {
        let mut source = PixelBuffer::filled(4, 4, Rgb::BLACK).unwrap();
        for y in 0..2 {
            for x in 2..4 {
                source.set_rgb(x, y, Rgb::new(255, 0, 0), 255);
            }
        }
        let small = downsample(
            &source,
            2,
            2,
            PixelationMethod::Mode,
            &SalienceThresholds::default(),
        )
        .unwrap();
        assert_eq!(small.rgb(0, 0), Rgb::BLACK);
        assert_eq!(small.rgb(1, 0), Rgb::new(255, 0, 0));
        assert_eq!(small.rgb(0, 1), Rgb::BLACK);
        assert_eq!(small.rgb(1, 1), Rgb::BLACK);
    }

    #[test]
    fn test_downsample_zero_target_rejected() {
        let source = PixelBuffer::filled(4, 4, Rgb::WHITE).unwrap();
        let err = downsample(
            &source,
            0,
            4,
            PixelationMethod::Nearest,
            &SalienceThresholds::default(),
        )
        .unwrap_err();
        assert_eq!(
            err,
            PipelineError::InvalidDimensions {
                width: 0,
                height: 4
            }
        );
    }
}
