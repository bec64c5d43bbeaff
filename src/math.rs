use nalgebra::Vector3;

/// Component-wise sum.
#[inline]
pub fn add(a: Vector3<f64>, b: Vector3<f64>) -> Vector3<f64> {
    a + b
}

/// Component-wise difference a - b.
#[inline]
pub fn subtract(a: Vector3<f64>, b: Vector3<f64>) -> Vector3<f64> {
    a - b
}

#[inline]
pub fn scale(v: Vector3<f64>, s: f64) -> Vector3<f64> {
    v * s
}

/// Dot product a · b.
#[inline]
pub fn dot(a: Vector3<f64>, b: Vector3<f64>) -> f64 {
    a.dot(&b)
}

/// Right-handed cross product a × b.
#[inline]
pub fn cross(a: Vector3<f64>, b: Vector3<f64>) -> Vector3<f64> {
    a.cross(&b)
}

/// Scalar triple product a · (b × c): the signed volume of the
/// parallelepiped spanned by a, b, c. Zero when the three are coplanar.
pub fn scalar_triple(a: Vector3<f64>, b: Vector3<f64>, c: Vector3<f64>) -> f64 {
    dot(a, cross(b, c))
}

/// Vector triple product a × (b × c) = b(a·c) − c(a·b).
pub fn vector_triple(a: Vector3<f64>, b: Vector3<f64>, c: Vector3<f64>) -> Vector3<f64> {
    cross(a, cross(b, c))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    #[test]
    fn cross_of_unit_axes() {
        let a = Vector3::new(1.0, 0.0, 0.0);
        let b = Vector3::new(0.0, 1.0, 0.0);
        assert_eq!(cross(a, b), Vector3::new(0.0, 0.0, 1.0));
        assert_eq!(dot(a, b), 0.0);
    }

    #[test]
    fn cross_with_self_is_zero() {
        let a = Vector3::new(3.0, -2.0, 0.5);
        assert_eq!(cross(a, a), Vector3::zeros());
    }

    #[test]
    fn coplanar_vectors_have_zero_triple() {
        let a = Vector3::new(1.0, 2.0, 3.0);
        let b = Vector3::new(4.0, 5.0, 6.0);
        let c = Vector3::new(7.0, 8.0, 9.0);
        assert_relative_eq!(scalar_triple(a, b, c), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn scalar_triple_of_unit_cube() {
        let a = Vector3::x();
        let b = Vector3::y();
        let c = Vector3::z();
        assert_eq!(scalar_triple(a, b, c), 1.0);
    }

    proptest! {
        #[test]
        fn prop_cross_is_antisymmetric(
            ax in -100.0f64..100.0, ay in -100.0f64..100.0, az in -100.0f64..100.0,
            bx in -100.0f64..100.0, by in -100.0f64..100.0, bz in -100.0f64..100.0,
        ) {
            let a = Vector3::new(ax, ay, az);
            let b = Vector3::new(bx, by, bz);
            prop_assert_eq!(cross(a, b), -cross(b, a));
        }

        #[test]
        fn prop_dot_is_commutative(
            ax in -100.0f64..100.0, ay in -100.0f64..100.0, az in -100.0f64..100.0,
            bx in -100.0f64..100.0, by in -100.0f64..100.0, bz in -100.0f64..100.0,
        ) {
            let a = Vector3::new(ax, ay, az);
            let b = Vector3::new(bx, by, bz);
            prop_assert_eq!(dot(a, b), dot(b, a));
        }

        #[test]
        fn prop_vector_triple_identity(
            ax in -10.0f64..10.0, ay in -10.0f64..10.0, az in -10.0f64..10.0,
            bx in -10.0f64..10.0, by in -10.0f64..10.0, bz in -10.0f64..10.0,
            cx in -10.0f64..10.0, cy in -10.0f64..10.0, cz in -10.0f64..10.0,
        ) {
            let a = Vector3::new(ax, ay, az);
            let b = Vector3::new(bx, by, bz);
            let c = Vector3::new(cx, cy, cz);

            // a × (b × c) = b(a·c) − c(a·b)
            let lhs = vector_triple(a, b, c);
            let rhs = subtract(scale(b, dot(a, c)), scale(c, dot(a, b)));
            prop_assert!((lhs - rhs).norm() < 1e-9,
                "identity violated: lhs={:?}, rhs={:?}", lhs, rhs);
        }
    }
}
