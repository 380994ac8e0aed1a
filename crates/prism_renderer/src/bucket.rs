//! Tile-based frame partitioning.
//!
//! Divides the image into disjoint rectangles that can be rendered
//! independently: full-height column tiles for the thread-per-tile
//! driver, and square buckets in spiral order for the rayon driver.

use crate::renderer::render_pixel;
use crate::{Camera, Intersect, Scene};
use prism_math::Color;

/// A rectangular region of the image to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bucket {
    /// Column of the first pixel
    pub x: u32,
    /// Row of the first pixel
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Bucket {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self { x, y, width, height }
    }

    pub fn pixel_count(&self) -> u32 {
        self.width * self.height
    }

    /// Squared distance from the bucket center to the image center, in
    /// doubled pixel units so it stays integral.
    fn center_distance(&self, width: u32, height: u32) -> i64 {
        let dx = 2 * i64::from(self.x) + i64::from(self.width) - i64::from(width);
        let dy = 2 * i64::from(self.y) + i64::from(self.height) - i64::from(height);
        dx * dx + dy * dy
    }
}

/// Default bucket size in pixels.
pub const DEFAULT_BUCKET_SIZE: u32 = 64;

/// Split the column range [0, width) into `count` full-height tiles.
///
/// Every tile is `width / count` columns wide; the remainder goes to the
/// last tile. `count` is capped at `width` so no tile is empty.
pub fn column_tiles(width: u32, height: u32, count: usize) -> Vec<Bucket> {
    let count = u32::try_from(count).unwrap_or(u32::MAX).clamp(1, width.max(1));
    let tile_width = width / count;

    (0..count)
        .map(|i| {
            let x = i * tile_width;
            let w = if i == count - 1 { width - x } else { tile_width };
            Bucket::new(x, 0, w, height)
        })
        .collect()
}

/// Cover the image with `bucket_size` squares, clipped at the right and
/// top edges, ordered from the image center outwards.
///
/// Equidistant buckets keep raster order.
pub fn generate_buckets(width: u32, height: u32, bucket_size: u32) -> Vec<Bucket> {
    let size = bucket_size.max(1);
    let step = size as usize;

    let mut buckets: Vec<Bucket> = (0..height)
        .step_by(step)
        .flat_map(|y| {
            (0..width)
                .step_by(step)
                .map(move |x| Bucket::new(x, y, size.min(width - x), size.min(height - y)))
        })
        .collect();

    buckets.sort_by_key(|b| b.center_distance(width, height));
    buckets
}

/// Shade every pixel of `bucket`, row by row.
pub fn render_bucket<T: Intersect>(
    bucket: &Bucket,
    camera: &Camera,
    scene: &Scene<T>,
    background: Color,
) -> Vec<Color> {
    let cols = bucket.x..bucket.x + bucket.width;
    (bucket.y..bucket.y + bucket.height)
        .flat_map(|row| {
            cols.clone()
                .map(move |col| render_pixel(camera, scene, row, col, background))
        })
        .collect()
}

/// A rendered bucket, waiting to be copied into the framebuffer.
#[derive(Debug, Clone)]
pub struct BucketResult {
    pub bucket: Bucket,
    /// Row-major within the bucket
    pub pixels: Vec<Color>,
}

impl BucketResult {
    pub fn new(bucket: Bucket, pixels: Vec<Color>) -> Self {
        Self { bucket, pixels }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_covers_once(buckets: &[Bucket], width: u32, height: u32) {
        let mut hits = vec![0u8; (width * height) as usize];
        for b in buckets {
            for row in b.y..b.y + b.height {
                for col in b.x..b.x + b.width {
                    hits[(row * width + col) as usize] += 1;
                }
            }
        }
        assert!(hits.iter().all(|&h| h == 1), "every pixel must belong to exactly one tile");
    }

    #[test]
    fn test_column_tiles_even_split() {
        let tiles = column_tiles(200, 100, 4);
        assert_eq!(tiles.len(), 4);
        assert!(tiles.iter().all(|t| t.width == 50 && t.height == 100 && t.y == 0));
        assert_covers_once(&tiles, 200, 100);
    }

    #[test]
    fn test_column_tiles_remainder_goes_last() {
        let tiles = column_tiles(10, 3, 3);
        let widths: Vec<u32> = tiles.iter().map(|t| t.width).collect();
        assert_eq!(widths, vec![3, 3, 4]);
        assert_covers_once(&tiles, 10, 3);
    }

    #[test]
    fn test_column_tiles_more_threads_than_columns() {
        let tiles = column_tiles(3, 5, 16);
        assert_eq!(tiles.len(), 3);
        assert_covers_once(&tiles, 3, 5);
    }

    #[test]
    fn test_generate_buckets_exact_fit() {
        let buckets = generate_buckets(128, 128, 64);
        assert_eq!(buckets.len(), 4);
        assert!(buckets.iter().all(|b| b.pixel_count() == 64 * 64));
        // All four are equidistant, so raster order survives the sort.
        let origins: Vec<(u32, u32)> = buckets.iter().map(|b| (b.x, b.y)).collect();
        assert_eq!(origins, vec![(0, 0), (64, 0), (0, 64), (64, 64)]);
    }

    #[test]
    fn test_generate_buckets_partial_fit() {
        let buckets = generate_buckets(100, 70, 64);
        assert_eq!(buckets.len(), 4);
        assert_covers_once(&buckets, 100, 70);

        let single = generate_buckets(5, 3, 64);
        assert_eq!(single, vec![Bucket::new(0, 0, 5, 3)]);
    }

    #[test]
    fn test_spiral_order() {
        let buckets = generate_buckets(192, 192, 64);
        assert_eq!(buckets.len(), 9);
        assert_covers_once(&buckets, 192, 192);

        // Center first, then the four edge neighbours, then the corners.
        assert_eq!((buckets[0].x, buckets[0].y), (64, 64));
        let distances: Vec<i64> = buckets.iter().map(|b| b.center_distance(192, 192)).collect();
        assert!(distances.windows(2).all(|w| w[0] <= w[1]));
        assert!(buckets[1..5].iter().all(|b| b.x == 64 || b.y == 64));
        assert!(buckets[5..].iter().all(|b| b.x != 64 && b.y != 64));
    }
}
