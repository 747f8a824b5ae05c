//! Small dense voxel bitmaps.

use glam::IVec3;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum VoxmapError {
    #[error("voxel data has {got} entries, expected {expected} for {width}x{height}x{depth}")]
    SizeMismatch {
        got: usize,
        expected: usize,
        width: usize,
        height: usize,
        depth: usize,
    },
}

/// Dense `width x height x depth` grid of small values, stored layer by
/// layer (y), then row (z), then column (x).
#[derive(Clone, Debug, PartialEq)]
pub struct Voxmap {
    width: usize,
    height: usize,
    depth: usize,
    data: Vec<u8>,
    center: IVec3,
}

impl Voxmap {
    pub fn new(width: usize, height: usize, depth: usize, data: Vec<u8>) -> Result<Self, VoxmapError> {
        let expected = width * height * depth;
        if data.len() != expected {
            return Err(VoxmapError::SizeMismatch {
                got: data.len(),
                expected,
                width,
                height,
                depth,
            });
        }
        Ok(Self {
            width,
            height,
            depth,
            data,
            center: IVec3::ZERO,
        })
    }

    pub fn with_center(mut self, center: IVec3) -> Self {
        self.center = center;
        self
    }

    pub fn center(&self) -> IVec3 {
        self.center
    }

    pub fn dims(&self) -> (usize, usize, usize) {
        (self.width, self.height, self.depth)
    }

    fn index_of(&self, pos: IVec3) -> Option<usize> {
        let (x, y, z) = (pos.x, pos.y, pos.z);
        if x < 0 || y < 0 || z < 0 {
            return None;
        }
        let (x, y, z) = (x as usize, y as usize, z as usize);
        if x >= self.width || y >= self.height || z >= self.depth {
            return None;
        }
        Some((y * self.depth + z) * self.width + x)
    }

    /// Value at `pos` in grid coordinates; 0 outside the grid.
    pub fn get(&self, pos: IVec3) -> u8 {
        self.index_of(pos).map_or(0, |i| self.data[i])
    }

    /// Value at an offset from the center.
    pub fn get_relative(&self, offset: IVec3) -> u8 {
        self.get(offset + self.center)
    }

    /// Non-zero voxels as (offset from center, value).
    pub fn iter_nonzero(&self) -> impl Iterator<Item = (IVec3, u8)> + '_ {
        (0..self.height).flat_map(move |y| {
            (0..self.depth).flat_map(move |z| {
                (0..self.width).filter_map(move |x| {
                    let pos = IVec3::new(x as i32, y as i32, z as i32);
                    match self.get(pos) {
                        0 => None,
                        v => Some((pos - self.center, v)),
                    }
                })
            })
        })
    }

    /// Leaf cluster of a conifer twig, by hydration level.
    pub fn conifer_cluster() -> Self {
        #[rustfmt::skip]
        let data = vec![
            // bottom
            0, 0, 1, 0, 0,
            0, 1, 2, 1, 0,
            1, 2, 0, 2, 1,
            0, 1, 2, 1, 0,
            0, 0, 1, 0, 0,
            // top
            0, 0, 0, 0, 0,
            0, 0, 1, 0, 0,
            0, 1, 1, 1, 0,
            0, 0, 1, 0, 0,
            0, 0, 0, 0, 0,
        ];
        Self {
            width: 5,
            height: 2,
            depth: 5,
            data,
            center: IVec3::new(2, 0, 2),
        }
    }
}
