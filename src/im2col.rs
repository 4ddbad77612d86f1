//
// This file is part of smallconv.
//
// smallconv is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// smallconv is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with smallconv. If not, see <http://www.gnu.org/licenses/>.
//
// Copyright 2017 Chris Foster
//

//! Conversion between images and the patch matrices convolution is computed with.
//!
//! An image is a `(channels * rows) x columns` matrix with its channels stacked vertically.  A patch matrix has one row
//! per kernel position, in row-major order over the output, and one column per kernel element, ordered by channel,
//! then kernel row, then kernel column.
//!
//! With a 1x1 kernel and stride, the pair degenerates into a transpose between `(positions x channels)` and image
//! layout, which is how layer outputs are moved in and out of matrix form.

use smallmath::Matrix;

fn fitted(extent: usize, kernel: usize, stride: usize) -> usize {
    assert!(stride > 0 && kernel > 0 && kernel <= extent, "Invalid kernel or stride for image extent!");
    assert!((extent - kernel) % stride == 0, "Kernel and stride don't evenly cover the image!");

    (extent - kernel) / stride + 1
}

/// Unrolls every receptive field of `image` into a row of the returned matrix.
///
/// The result has `output_rows * output_columns` rows and `kernel_rows * kernel_columns * channels` columns, where the
/// channel count is `image.rows() / rows`.
///
/// # Panics
/// Panics if `image` isn't `(channels * rows) x columns`, or if the kernel and stride don't exactly cover the image.
pub fn im2col(
    kernel_rows: usize, kernel_columns: usize,
    stride_rows: usize, stride_columns: usize,
    rows: usize, columns: usize,
    image: &Matrix,
) -> Matrix {
    assert!(rows > 0 && image.rows() % rows == 0 && image.columns() == columns, "Image dimensions don't match the declared extents!");

    let channels = image.rows() / rows;
    let output_rows = fitted(rows, kernel_rows, stride_rows);
    let output_columns = fitted(columns, kernel_columns, stride_columns);

    let mut patches = Matrix::zeros(output_rows * output_columns, kernel_rows * kernel_columns * channels);

    for output_row in 0..output_rows {
        for output_column in 0..output_columns {
            let patch = &mut patches[output_row * output_columns + output_column];
            let mut i = 0;

            for channel in 0..channels {
                for kernel_row in 0..kernel_rows {
                    let image_row = channel * rows + output_row * stride_rows + kernel_row;
                    let image_column = output_column * stride_columns;

                    patch[i..i + kernel_columns].copy_from_slice(&image[image_row][image_column..image_column + kernel_columns]);
                    i += kernel_columns;
                }
            }
        }
    }

    patches
}

/// Scatters each row of `patches` back into its receptive field, summing wherever fields overlap.  This is the adjoint
/// of [`im2col`](fn.im2col.html).
///
/// The channel count is `patches.columns() / (kernel_rows * kernel_columns)`, and the result is
/// `(channels * rows) x columns`.
///
/// # Panics
/// Panics if the patch matrix doesn't have one row per kernel position and a whole number of channels.
pub fn col2im(
    kernel_rows: usize, kernel_columns: usize,
    stride_rows: usize, stride_columns: usize,
    rows: usize, columns: usize,
    patches: &Matrix,
) -> Matrix {
    let kernel_size = kernel_rows * kernel_columns;
    assert!(kernel_size > 0 && patches.columns() % kernel_size == 0, "Patch width isn't a whole number of kernels!");

    let channels = patches.columns() / kernel_size;
    let output_rows = fitted(rows, kernel_rows, stride_rows);
    let output_columns = fitted(columns, kernel_columns, stride_columns);

    assert!(patches.rows() == output_rows * output_columns, "Patch count doesn't match the number of kernel positions!");

    let mut image = Matrix::zeros(channels * rows, columns);

    for output_row in 0..output_rows {
        for output_column in 0..output_columns {
            let patch = &patches[output_row * output_columns + output_column];
            let mut i = 0;

            for channel in 0..channels {
                for kernel_row in 0..kernel_rows {
                    let image_row = channel * rows + output_row * stride_rows + kernel_row;
                    let image_column = output_column * stride_columns;

                    for (pixel, value) in image[image_row][image_column..image_column + kernel_columns].iter_mut().zip(&patch[i..i + kernel_columns]) {
                        *pixel += value;
                    }
                    i += kernel_columns;
                }
            }
        }
    }

    image
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counting(rows: usize, columns: usize) -> Matrix {
        Matrix::from_vec(rows, columns, (0..rows * columns).map(|x| x as f64).collect())
    }

    #[test]
    fn test_im2col_single_channel() {
        let image = counting(3, 3);
        let patches = im2col(2, 2, 1, 1, 3, 3, &image);

        assert_eq!(patches, Matrix::from_vec(4, 4, vec![
            0.0, 1.0, 3.0, 4.0,
            1.0, 2.0, 4.0, 5.0,
            3.0, 4.0, 6.0, 7.0,
            4.0, 5.0, 7.0, 8.0,
        ]));
    }

    #[test]
    fn test_im2col_channels_then_kernel() {
        // Two 2x2 channels, one kernel position
        let image = counting(4, 2);
        let patches = im2col(2, 2, 1, 1, 2, 2, &image);

        assert_eq!(patches, Matrix::from_vec(1, 8, (0..8).map(|x| x as f64).collect()));
    }

    #[test]
    fn test_im2col_strided() {
        let image = counting(4, 4);
        let patches = im2col(2, 2, 2, 2, 4, 4, &image);

        assert_eq!(patches.rows(), 4);
        assert_eq!(patches[3], [10.0, 11.0, 14.0, 15.0]);
    }

    #[test]
    fn test_unit_kernel_round_trip() {
        for &(rows, columns, channels) in &[(1, 1, 1), (3, 4, 1), (2, 5, 3), (6, 2, 4)] {
            let image = counting(rows * channels, columns);
            let patches = im2col(1, 1, 1, 1, rows, columns, &image);

            assert_eq!(patches.rows(), rows * columns);
            assert_eq!(patches.columns(), channels);
            assert_eq!(col2im(1, 1, 1, 1, rows, columns, &patches), image);
        }
    }

    #[test]
    fn test_unit_kernel_is_a_transpose() {
        let image = counting(6, 3); // 2 channels of 3x3
        let patches = im2col(1, 1, 1, 1, 3, 3, &image);

        for position in 0..9 {
            for channel in 0..2 {
                assert_eq!(patches[(position, channel)], image[(channel * 3 + position / 3, position % 3)]);
            }
        }
    }

    #[test]
    fn test_col2im_accumulates_overlaps() {
        // A 3x3 kernel with stride 1 fits a 4x4 image in four places, and all four cover pixel (1, 1)
        let patches = Matrix::from_vec(4, 9, vec![1.0; 36]);
        let image = col2im(3, 3, 1, 1, 4, 4, &patches);

        assert_eq!(image, Matrix::from_vec(4, 4, vec![
            1.0, 2.0, 2.0, 1.0,
            2.0, 4.0, 4.0, 2.0,
            2.0, 4.0, 4.0, 2.0,
            1.0, 2.0, 2.0, 1.0,
        ]));
    }

    #[test]
    fn test_col2im_sums_distinct_contributions() {
        // Patch p covers pixel (1, 1) at kernel element (1 - p_row, 1 - p_column)
        let mut patches = Matrix::zeros(4, 9);
        let mut expected = 0.0;
        for position in 0..4 {
            let (row, column) = (position / 2, position % 2);
            let element = (1 - row) * 3 + (1 - column);
            let value = 10.0f64.powi(position as i32);
            patches[(position, element)] = value;
            expected += value;
        }

        let image = col2im(3, 3, 1, 1, 4, 4, &patches);

        assert_eq!(image[(1, 1)], expected);
        assert_eq!(image.iter().sum::<f64>(), expected);
    }

    #[test]
    fn test_col2im_is_adjoint_of_im2col() {
        // <im2col(x), y> == <x, col2im(y)>
        let image = Matrix::from_vec(10, 5, (0..50).map(|x| ((x * 7) % 11) as f64 - 5.0).collect());
        let patches = Matrix::from_vec(4, 18, (0..72).map(|x| ((x * 5) % 13) as f64 - 6.0).collect());

        let left: f64 = im2col(3, 3, 2, 2, 5, 5, &image).iter().zip(patches.iter()).map(|(a, b)| a * b).sum();
        let right: f64 = image.iter().zip(col2im(3, 3, 2, 2, 5, 5, &patches).iter()).map(|(a, b)| a * b).sum();

        assert_eq!(left, right);
    }

    #[test]
    #[should_panic(expected = "evenly cover")]
    fn test_uneven_stride_panics() {
        im2col(3, 3, 2, 2, 6, 6, &counting(6, 6));
    }
}
