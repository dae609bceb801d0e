use opencv::{core, prelude::*};
use rayon::{iter::ParallelIterator, slice::ParallelSlice};

pub type TensorData = ndarray::Array<f32, ndarray::Dim<[usize; 4]>>;

/// A BGR frame owned by a single loop iteration.
#[derive(Debug, Clone)]
pub struct Matrix(pub core::Mat);

impl Matrix {
    pub fn new_blank(width: i32, height: i32) -> crate::Result<Self> {
        Ok(Self(core::Mat::new_rows_cols_with_default(
            height,
            width,
            core::CV_8UC3,
            core::Scalar::all(0.),
        )?))
    }

    /// (width, height)
    pub fn dimensions(&self) -> (i32, i32) {
        (self.cols(), self.rows())
    }

    pub fn resize(&self, size: (i32, i32)) -> crate::Result<Self> {
        let (cur_w, cur_h) = self.dimensions();
        if cur_w == size.0 && cur_h == size.1 {
            return Ok(Self(self.0.clone()));
        }
        let mut new_mat = core::Mat::default();
        opencv::imgproc::resize(
            &self.0,
            &mut new_mat,
            core::Size::new(size.0, size.1),
            0.,
            0.,
            if cur_w > size.0 && cur_h > size.1 {
                opencv::imgproc::INTER_AREA
            } else {
                opencv::imgproc::INTER_LINEAR
            },
        )?;
        Ok(Self(new_mat))
    }

    /// NHWC tensor of the frame resized to `size`, BGR -> RGB, scaled to [0, 1].
    pub fn to_tensor_data(&self, size: (i32, i32)) -> crate::Result<TensorData> {
        let resized = self.resize(size)?;
        let continuous = if resized.is_continuous() {
            resized.0
        } else {
            resized.0.try_clone()?
        };
        let (w, h) = (size.0 as usize, size.1 as usize);
        let bytes = continuous.data_bytes()?;
        if bytes.len() != w * h * 3 {
            return Err(crate::Error::InvalidModelIOError(format!(
                "expected {} bytes for a {}x{} BGR frame, got {}",
                w * h * 3,
                w,
                h,
                bytes.len()
            )));
        }

        let pixels = bytes
            .par_chunks_exact(3)
            // BGR -> RGB
            .flat_map_iter(|p| [p[2], p[1], p[0]].map(|v| v as f32 / 255.))
            .collect::<Vec<f32>>();

        ndarray::Array::from_shape_vec((1, h, w, 3), pixels).map_err(crate::Error::as_unknown_error)
    }
}

impl From<core::Mat> for Matrix {
    fn from(value: core::Mat) -> Self {
        Self(value)
    }
}

impl std::ops::Deref for Matrix {
    type Target = core::Mat;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl std::ops::DerefMut for Matrix {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}
