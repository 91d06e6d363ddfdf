//! Optional `serde` support: vectors and matrices serialize as flat
//! sequences of scalars (row-major for matrices), matching the storage
//! layout the rest of the solver treats as the wire format.

use core::fmt;
use core::marker::PhantomData;

use serde::de::{self, Deserializer, SeqAccess, Visitor};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};

use crate::mat::Mat;
use crate::vec::{Element, Vec};

impl<T: Element<N> + Serialize, const N: usize> Serialize for Vec<T, N> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter())
    }
}

struct VecVisitor<T, const N: usize>(PhantomData<T>);

impl<'de, T: Element<N> + Deserialize<'de>, const N: usize> Visitor<'de> for VecVisitor<T, N> {
    type Value = Vec<T, N>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "a sequence of {N} scalars")
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
        let mut out = Vec::default();
        for i in 0..N {
            out[i] = seq
                .next_element()?
                .ok_or_else(|| de::Error::invalid_length(i, &self))?;
        }
        Ok(out)
    }
}

impl<'de, T: Element<N> + Deserialize<'de>, const N: usize> Deserialize<'de> for Vec<T, N> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_seq(VecVisitor(PhantomData))
    }
}

impl<T: Element<N> + Serialize, const N: usize> Serialize for Mat<T, N> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.rows().iter().flat_map(|row| row.iter()))
    }
}

struct MatVisitor<T, const N: usize>(PhantomData<T>);

impl<'de, T: Element<N> + Deserialize<'de>, const N: usize> Visitor<'de> for MatVisitor<T, N> {
    type Value = Mat<T, N>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "a row-major sequence of {} scalars", N * N)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
        let mut out = Mat::default();
        for i in 0..N {
            for j in 0..N {
                out[(i, j)] = seq
                    .next_element()?
                    .ok_or_else(|| de::Error::invalid_length(i * N + j, &self))?;
            }
        }
        Ok(out)
    }
}

impl<'de, T: Element<N> + Deserialize<'de>, const N: usize> Deserialize<'de> for Mat<T, N> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_seq(MatVisitor(PhantomData))
    }
}

#[cfg(test)]
mod tests {
    use crate::mat::Mat;
    use crate::vec::Vec;

    #[test]
    fn vec_roundtrip() {
        let v = Vec::from([1.5f64, -2.0, 3.25]);
        let json = serde_json::to_string(&v).unwrap();
        assert_eq!(json, "[1.5,-2.0,3.25]");
        let back: Vec<f64, 3> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, v);
    }

    #[test]
    fn mat_roundtrip_is_row_major() {
        let m = Mat::from_rows([Vec::from([1.0f64, 2.0]), Vec::from([3.0, 4.0])]);
        let json = serde_json::to_string(&m).unwrap();
        assert_eq!(json, "[1.0,2.0,3.0,4.0]");
        let back: Mat<f64, 2> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, m);
    }

    #[test]
    fn short_input_is_rejected() {
        assert!(serde_json::from_str::<Vec<f64, 3>>("[1.0,2.0]").is_err());
        assert!(serde_json::from_str::<Mat<f64, 2>>("[1.0,2.0,3.0]").is_err());
    }
}
