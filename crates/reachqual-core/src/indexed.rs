//! Shared implementation of the fixed-size containers keyed by an index enum.

/// Generates a `[T; N]` newtype indexed by an enum exposing `index()`.
macro_rules! indexed_array {
    ($(#[$meta:meta])* $name:ident, $key:ty, $len:expr) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Default)]
        pub struct $name<T>(pub [T; $len]);

        impl<T: Copy> $name<T> {
            /// Container with every slot set to `value`.
            pub fn splat(value: T) -> Self {
                Self([value; $len])
            }

            /// Apply `f` to every slot, keeping the key association.
            pub fn map<U>(self, mut f: impl FnMut($key, T) -> U) -> $name<U> {
                $name(std::array::from_fn(|i| f(<$key>::ALL[i], self.0[i])))
            }

            /// Iterate `(key, value)` pairs in index order.
            pub fn iter(&self) -> impl Iterator<Item = ($key, T)> + '_ {
                <$key>::ALL.into_iter().zip(self.0.iter().copied())
            }
        }

        impl $name<f64> {
            /// Sum over every slot.
            pub fn sum(&self) -> f64 {
                self.0.iter().sum()
            }
        }

        impl<T> std::ops::Index<$key> for $name<T> {
            type Output = T;

            fn index(&self, key: $key) -> &T {
                &self.0[key.index()]
            }
        }

        impl<T> std::ops::IndexMut<$key> for $name<T> {
            fn index_mut(&mut self, key: $key) -> &mut T {
                &mut self.0[key.index()]
            }
        }
    };
}

pub(crate) use indexed_array;
