//! Ordered objects that can be relabelled by permutations.
//! Relabelling a rotation system yields an isomorphic graph, which is what the tests and the
//! benchmark use to produce duplicates.
use fxhash::FxBuildHasher;
use itertools::Itertools;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64Mcg;
use std::collections::{HashMap, HashSet};
use std::fmt::Debug;
use std::marker::PhantomData;
use std::ops::Mul;

pub mod graph;

pub(crate) type FBuildHasher = FxBuildHasher;
pub(crate) type FHashMap<K, V> = HashMap<K, V, FBuildHasher>;
pub(crate) type FHashSet<K> = HashSet<K, FBuildHasher>;

/// An ordered object, its indices can be permuted.
pub trait Permutable: Clone {
    /// Length of the ordered object.
    fn len(&self) -> usize;

    /// Swap two indices of the ordered object.
    fn swap(&mut self, i: usize, j: usize);

    /// Permutes the ordered object by a given permutation.
    /// By default, this is implemented based on swap.
    fn permuted(&self, x: &impl Permutation) -> Self {
        self._permuted_from_swap(x)
    }

    fn _permuted_from_swap<P: Permutation>(&self, x: &P) -> Self {
        assert_eq!(self.len(), x.len());
        let mut p = P::identity(self.len());
        let mut p_inv = P::identity(self.len());
        let mut out = self.clone();
        for i in (0..self.len()).rev() {
            let xi = x.apply(i);
            let j = p_inv.apply(xi);
            let pi = p.apply(i);
            p_inv.swap(pi, xi);
            out.swap(pi, xi);
            p.swap(i, j);
        }

        out
    }

    /// Shuffles the ordered object by a random permutation uniformly sampled with the given seed.
    fn shuffled(&self, seed: usize) -> Self {
        self.permuted(&PermutationUniform::<Perm>::new(self.len()).sample(seed))
    }

    /// Test left group action axioms for this ordered object.
    /// Any implementation should pass this test for any ordered object and seed.
    #[cfg(test)]
    fn test_left_group_action_axioms(&self, seed: usize)
    where
        Self: Eq + Debug,
    {
        let (p0, p1) = PermutationUniform::<Perm>::new(self.len()).samples(2, seed).into_iter().collect_tuple().unwrap();
        assert_eq!((&p0 * self).len(), self.len());
        assert_eq!(&(&Perm::identity(self.len()) * self), self);
        assert_eq!(&p1 * &(&p0 * self), &(&p1 * &p0) * self);
    }
}

/// Permutation of a given length.
pub trait Permutation: Permutable + From<Vec<usize>> + Debug + Eq {
    fn identity(len: usize) -> Self;

    fn inverse(&self) -> Self;

    fn iter(&self) -> impl Iterator<Item=usize> + '_;

    fn apply(&self, i: usize) -> usize;

    fn is_identity(&self) -> bool {
        self.iter().enumerate().all(|(i, x)| i == x)
    }

    fn create_swap(len: usize, i: usize, j: usize) -> Self {
        let mut out = Self::identity(len);
        out.swap(i, j);
        out
    }
}

/// Permutation of a given length, densely represented.
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Perm(pub Vec<usize>);

impl Permutable for Perm {
    fn len(&self) -> usize {
        self.0.len()
    }

    fn swap(&mut self, i: usize, j: usize) {
        self.0.swap(i, j);
    }

    fn permuted(&self, x: &impl Permutation) -> Self {
        Perm((0..self.len()).map(|i| x.apply(self.0[i])).collect())
    }
}

impl From<Vec<usize>> for Perm {
    fn from(items: Vec<usize>) -> Self {
        debug_assert!(items.iter().all(|&x| x < items.len()));
        Self(items)
    }
}

impl Permutation for Perm {
    fn identity(len: usize) -> Self {
        Self((0..len).collect())
    }

    fn inverse(&self) -> Self {
        let mut out = vec![0; self.0.len()];
        for (i, &x) in self.0.iter().enumerate() {
            out[x] = i;
        }
        Self(out)
    }

    fn iter(&self) -> impl Iterator<Item=usize> + '_ {
        self.0.iter().cloned()
    }

    fn apply(&self, i: usize) -> usize {
        self.0[i]
    }
}

impl Mul<usize> for &Perm {
    type Output = usize;

    fn mul(self, rhs: usize) -> usize { self.apply(rhs) }
}

impl<P: Permutable> Mul<&P> for &Perm {
    type Output = P;

    fn mul(self, rhs: &P) -> P { P::permuted(rhs, self) }
}

/// Uniform distribution over permutations of a given length, sampled with the Fisher-Yates shuffle.
#[derive(Clone, Debug)]
pub struct PermutationUniform<P: Permutation = Perm> {
    pub len: usize,
    phantom: PhantomData<P>,
}

impl<P: Permutation> PermutationUniform<P> {
    pub fn new(len: usize) -> Self { Self { len, phantom: PhantomData } }

    pub fn sample(&self, seed: usize) -> P {
        let mut rng = Pcg64Mcg::seed_from_u64(seed as u64);
        let mut p = P::identity(self.len);
        for i in (0..self.len).rev() {
            let size = i + 1;
            p.swap(i, rng.gen_range(0..size));
        }
        p
    }

    pub fn samples(&self, len: usize, seed: usize) -> Vec<P> {
        let mut rng = Pcg64Mcg::seed_from_u64(seed as u64);
        (0..len).map(|_| self.sample(rng.gen())).collect()
    }
}
