use crate::error::MatResult;
use crate::numeric::inner_product;
use crate::Matrix;
use half::f16;
use log::debug;
use num_traits::Zero;
use std::ops::{Add, AddAssign, Mul, MulAssign, Sub, SubAssign};

fn convert_iopsf<A: Clone, B: Clone>(f: impl Fn(A, B) -> A) -> impl FnMut((&mut A, &B)) {
    move |(x, y)| *x = f(x.clone(), y.clone())
}

impl<T> Matrix<T> {
    fn zip_mut_with<F>(&mut self, rhs: &Matrix<T>, op: &'static str, f: F) -> MatResult<()>
    where
        T: Clone,
        F: Fn(T, T) -> T,
    {
        if let Err(e) = self.shape.same_as(&rhs.shape, op) {
            debug!("{}", e);
            return Err(e);
        }
        self.as_mut_slice()
            .iter_mut()
            .zip(rhs.as_slice())
            .for_each(convert_iopsf(f));
        Ok(())
    }

    /// `self += rhs`, elementwise. Both sides must have the same shape.
    pub fn try_add_assign(&mut self, rhs: &Matrix<T>) -> MatResult<()>
    where
        T: Clone + Add<Output = T>,
    {
        self.zip_mut_with(rhs, "add", T::add)
    }

    pub fn try_sub_assign(&mut self, rhs: &Matrix<T>) -> MatResult<()>
    where
        T: Clone + Sub<Output = T>,
    {
        self.zip_mut_with(rhs, "sub", T::sub)
    }

    pub fn try_add(&self, rhs: &Matrix<T>) -> MatResult<Matrix<T>>
    where
        T: Clone + Add<Output = T>,
    {
        self.shape.same_as(&rhs.shape, "add")?;
        let mut result = self.clone();
        result.try_add_assign(rhs)?;
        Ok(result)
    }

    pub fn try_sub(&self, rhs: &Matrix<T>) -> MatResult<Matrix<T>>
    where
        T: Clone + Sub<Output = T>,
    {
        self.shape.same_as(&rhs.shape, "sub")?;
        let mut result = self.clone();
        result.try_sub_assign(rhs)?;
        Ok(result)
    }

    /// Replaces every element `x` with `factor * x`.
    pub fn scale_assign(&mut self, factor: T)
    where
        T: Clone + Mul<Output = T>,
    {
        self.iter_mut()
            .for_each(|x| *x = factor.clone() * x.clone());
    }

    pub fn scale(&self, factor: T) -> Matrix<T>
    where
        T: Clone + Mul<Output = T>,
    {
        let mut result = self.clone();
        result.scale_assign(factor);
        result
    }

    /// Matrix product. Element `(i, j)` is row `i` of `self` times column
    /// `j` of `rhs`, accumulated from zero.
    pub fn matmul(&self, rhs: &Matrix<T>) -> MatResult<Matrix<T>>
    where
        T: Clone + Zero + Mul<Output = T>,
    {
        let shape = match self.shape.product(&rhs.shape) {
            Ok(s) => s,
            Err(e) => {
                debug!("{}", e);
                return Err(e);
            }
        };
        debug!("matmul {} * {} -> {}", self.shape, rhs.shape, shape);
        let mut result = Matrix::zeros(shape.rows(), shape.cols());
        for i in 0..self.rows() {
            for j in 0..rhs.cols() {
                result[(i, j)] = inner_product(
                    self.row_begin(i),
                    self.row_end(i),
                    rhs.col_begin(j),
                    T::zero(),
                );
            }
        }
        Ok(result)
    }

    /// `self = self * rhs`. The product is built aside and swapped in.
    pub fn try_mul_assign(&mut self, rhs: &Matrix<T>) -> MatResult<()>
    where
        T: Clone + Zero + Mul<Output = T>,
    {
        let mut result = self.matmul(rhs)?;
        self.swap(&mut result);
        Ok(())
    }
}

macro_rules! impl_elementwise_op {
    ($trt:ident, $mth:ident, $trt_assign:ident, $mth_assign:ident, $checked:ident) => {
        impl<T> $trt_assign<&Matrix<T>> for Matrix<T>
        where
            T: $trt<T, Output = T> + Clone,
        {
            fn $mth_assign(&mut self, rhs: &Matrix<T>) {
                if let Err(e) = self.$checked(rhs) {
                    panic!("{}", e);
                }
            }
        }

        impl<T> $trt_assign<Matrix<T>> for Matrix<T>
        where
            T: $trt<T, Output = T> + Clone,
        {
            fn $mth_assign(&mut self, rhs: Matrix<T>) {
                self.$mth_assign(&rhs);
            }
        }

        impl<T> $trt<&Matrix<T>> for Matrix<T>
        where
            T: $trt<T, Output = T> + Clone,
        {
            type Output = Matrix<T>;
            fn $mth(mut self, rhs: &Matrix<T>) -> Self::Output {
                self.$mth_assign(rhs);
                self
            }
        }

        impl<T> $trt<Matrix<T>> for Matrix<T>
        where
            T: $trt<T, Output = T> + Clone,
        {
            type Output = Matrix<T>;
            fn $mth(mut self, rhs: Matrix<T>) -> Self::Output {
                self.$mth_assign(&rhs);
                self
            }
        }

        impl<T> $trt<&Matrix<T>> for &Matrix<T>
        where
            T: $trt<T, Output = T> + Clone,
        {
            type Output = Matrix<T>;
            fn $mth(self, rhs: &Matrix<T>) -> Self::Output {
                let mut result = self.clone();
                result.$mth_assign(rhs);
                result
            }
        }

        impl<T> $trt<Matrix<T>> for &Matrix<T>
        where
            T: $trt<T, Output = T> + Clone,
        {
            type Output = Matrix<T>;
            fn $mth(self, rhs: Matrix<T>) -> Self::Output {
                let mut result = self.clone();
                result.$mth_assign(&rhs);
                result
            }
        }
    };
}

impl_elementwise_op!(Add, add, AddAssign, add_assign, try_add_assign); // +
impl_elementwise_op!(Sub, sub, SubAssign, sub_assign, try_sub_assign); // -

impl<T> MulAssign<&Matrix<T>> for Matrix<T>
where
    T: Clone + Zero + Mul<Output = T>,
{
    fn mul_assign(&mut self, rhs: &Matrix<T>) {
        if let Err(e) = self.try_mul_assign(rhs) {
            panic!("{}", e);
        }
    }
}

impl<T> MulAssign<Matrix<T>> for Matrix<T>
where
    T: Clone + Zero + Mul<Output = T>,
{
    fn mul_assign(&mut self, rhs: Matrix<T>) {
        *self *= &rhs;
    }
}

impl<T> Mul<&Matrix<T>> for &Matrix<T>
where
    T: Clone + Zero + Mul<Output = T>,
{
    type Output = Matrix<T>;
    fn mul(self, rhs: &Matrix<T>) -> Matrix<T> {
        match self.matmul(rhs) {
            Ok(m) => m,
            Err(e) => panic!("{}", e),
        }
    }
}

impl<T> Mul<Matrix<T>> for &Matrix<T>
where
    T: Clone + Zero + Mul<Output = T>,
{
    type Output = Matrix<T>;
    fn mul(self, rhs: Matrix<T>) -> Matrix<T> {
        self * &rhs
    }
}

impl<T> Mul<&Matrix<T>> for Matrix<T>
where
    T: Clone + Zero + Mul<Output = T>,
{
    type Output = Matrix<T>;
    fn mul(self, rhs: &Matrix<T>) -> Matrix<T> {
        &self * rhs
    }
}

impl<T> Mul<Matrix<T>> for Matrix<T>
where
    T: Clone + Zero + Mul<Output = T>,
{
    type Output = Matrix<T>;
    fn mul(self, rhs: Matrix<T>) -> Matrix<T> {
        &self * &rhs
    }
}

// `scalar * matrix` cannot be written generically over the scalar, so the
// primitive element types get their impls one by one. Both sides assume the
// element multiplication commutes.
macro_rules! impl_scalar_op {
    ($($t:ty),*) => {
        $(
            impl MulAssign<$t> for Matrix<$t> {
                fn mul_assign(&mut self, factor: $t) {
                    self.scale_assign(factor);
                }
            }

            impl Mul<$t> for Matrix<$t> {
                type Output = Matrix<$t>;
                fn mul(mut self, factor: $t) -> Matrix<$t> {
                    self.scale_assign(factor);
                    self
                }
            }

            impl Mul<$t> for &Matrix<$t> {
                type Output = Matrix<$t>;
                fn mul(self, factor: $t) -> Matrix<$t> {
                    self.scale(factor)
                }
            }

            impl Mul<Matrix<$t>> for $t {
                type Output = Matrix<$t>;
                fn mul(self, m: Matrix<$t>) -> Matrix<$t> {
                    m * self
                }
            }

            impl Mul<&Matrix<$t>> for $t {
                type Output = Matrix<$t>;
                fn mul(self, m: &Matrix<$t>) -> Matrix<$t> {
                    m * self
                }
            }
        )*
    };
}

impl_scalar_op!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64, f16);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MatError;
    use crate::shape::Shape;

    fn a() -> Matrix<i32> {
        crate::matrix![[1, 2], [3, 4]]
    }

    fn b() -> Matrix<i32> {
        crate::matrix![[5, 6], [7, 8]]
    }

    #[test]
    fn test_product_example() {
        assert_eq!(a() * b(), crate::matrix![[19, 22], [43, 50]]);
        assert_eq!(&b() * &a(), crate::matrix![[23, 34], [31, 46]]);
    }

    #[test]
    fn test_add_sub_example() {
        assert_eq!(a() + b(), crate::matrix![[6, 8], [10, 12]]);
        assert_eq!(&b() - &a(), crate::matrix![[4, 4], [4, 4]]);
        let mut m = a();
        m += &b();
        m -= b();
        assert_eq!(m, a());
    }

    #[test]
    fn test_scalar_example() {
        let doubled = crate::matrix![[2, 4], [6, 8]];
        assert_eq!(2i32 * a(), doubled);
        assert_eq!(a() * 2i32, doubled);
        assert_eq!(2i32 * &a(), &a() * 2i32);
        let mut m = a();
        m *= 2i32;
        assert_eq!(m, doubled);
    }

    #[test]
    fn test_equality_example() {
        let m = a();
        assert!(m == m.clone());
        assert!(a() != b());
    }

    #[test]
    fn test_additive_identity_and_inverse() {
        let m = crate::matrix![[1.5, -2.0, 3.25], [0.0, 4.0, -8.5]];
        let zero = Matrix::<f64>::zeros(m.rows(), m.cols());
        assert_eq!(&m + &zero, m);
        assert_eq!(&m - &m, zero);
    }

    #[test]
    fn test_identity_product() {
        let m = crate::matrix![[1i64, 2, 3, 4], [5, 6, 7, 8], [9, 10, 11, 12]];
        let id = Matrix::<i64>::identity(3);
        assert_eq!(&id * &m, m);
        assert_eq!(&m * &Matrix::identity(4), m);
    }

    #[test]
    fn test_product_associative() {
        let x = crate::matrix![[1, -2, 3], [0, 4, 5]];
        let y = crate::matrix![[2, 1], [-1, 0], [3, 7]];
        let z = crate::matrix![[1, 2, 3, 4], [5, -6, 7, 8]];
        assert_eq!((&x * &y) * &z, &x * &(&y * &z));
    }

    #[test]
    fn test_product_shapes() {
        let row = crate::matrix![[1, 2, 3]];
        let col = crate::matrix![[4], [5], [6]];
        assert_eq!(&row * &col, crate::matrix![[32]]);
        assert_eq!(
            &col * &row,
            crate::matrix![[4, 8, 12], [5, 10, 15], [6, 12, 18]]
        );
    }

    #[test]
    fn test_mul_assign_swaps_in_product() {
        let mut m = crate::matrix![[1, 2, 3]];
        m *= crate::matrix![[1], [1], [1]];
        assert_eq!(m, crate::matrix![[6]]);
        assert_eq!(m.shape(), Shape::new(1, 1));
    }

    #[test]
    fn test_scalar_commutes() {
        let m = crate::matrix![[1.5f32, 2.0], [-3.0, 0.25]];
        assert_eq!(4.0f32 * &m, &m * 4.0f32);
        let h = Matrix::from_elem(2, 3, f16::from_f32(1.5));
        let expected = Matrix::from_elem(2, 3, f16::from_f32(3.0));
        assert_eq!(f16::from_f32(2.0) * &h, expected);
        assert_eq!(h * f16::from_f32(2.0), expected);
    }

    #[test]
    fn test_half_product() {
        let one = f16::from_f32(1.0);
        let two = f16::from_f32(2.0);
        let m = Matrix::from([[one, two], [two, one]]);
        let p = &m * &m;
        assert_eq!(p[(0, 0)], f16::from_f32(5.0));
        assert_eq!(p[(0, 1)], f16::from_f32(4.0));
    }

    #[test]
    fn test_checked_mismatch() {
        let x = Matrix::<i32>::zeros(2, 3);
        let y = Matrix::<i32>::zeros(3, 2);
        assert_eq!(
            x.try_add(&y),
            Err(MatError::ShapeMismatch {
                op: "add",
                lhs: Shape::new(2, 3),
                rhs: Shape::new(3, 2),
            })
        );
        assert!(x.try_sub(&y).is_err());
        assert!(x.matmul(&x).is_err());
        let mut z = x.clone();
        assert!(z.try_mul_assign(&x).is_err());
        assert_eq!(z, x);
        assert!(z.try_add_assign(&y).is_err());
        assert_eq!(z, x);
    }

    #[test]
    #[should_panic(expected = "shape mismatch in add: 2x3 vs 3x2")]
    fn test_add_mismatch_panics() {
        let _ = Matrix::<i32>::zeros(2, 3) + Matrix::<i32>::zeros(3, 2);
    }

    #[test]
    #[should_panic(expected = "shape mismatch in matmul")]
    fn test_matmul_mismatch_panics() {
        let _ = Matrix::<i32>::zeros(2, 3) * Matrix::<i32>::zeros(2, 3);
    }

    #[test]
    fn test_empty_operands() {
        let e = Matrix::<i32>::new();
        assert_eq!(&e + &e, e);
        assert_eq!(&e * &e, e);
        assert_eq!(3i32 * &e, e);
    }
}
