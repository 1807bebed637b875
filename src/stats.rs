use std::{fmt::Debug, iter::Sum};

use num_traits::Float;
use statrs::distribution::{ContinuousCDF, StudentsT};

use crate::{Result, WordleError};

#[allow(dead_code)]
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub(crate) enum Tails {
    One,
    Two,
}

impl Tails {
    fn factor<N: Float>(&self) -> N {
        match self {
            Self::One => N::one(),
            Self::Two => N::one() + N::one(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Sample<N: Float> {
    pub(crate) mean: N,
    pub(crate) len: N,
    pub(crate) var: N,
}

impl<N: Float + Sum> Sample<N> {
    /// Computes the mean and the unbiased variance of a sample.
    ///
    /// Returns an error for samples of fewer than two values.
    pub(crate) fn new<T: IntoIterator<Item = N> + Clone>(sample: T) -> Result<Self> {
        let (len, sum) = sample
            .clone()
            .into_iter()
            .fold((0_u32, N::zero()), |acc, next| (acc.0 + 1, acc.1 + next));

        if len < 2 {
            return Err(WordleError::Stats);
        }
        let count = N::from(len).ok_or(WordleError::Stats)?;
        let mean = sum / count;

        let var = sample.into_iter().map(|n| (n - mean).powi(2)).sum::<N>() / (count - N::one());

        Ok(Sample {
            mean,
            len: count,
            var,
        })
    }
}

#[derive(Debug, Clone, PartialEq, PartialOrd)]
pub(crate) struct WelchsT<N: Float> {
    /// The test statistic.
    pub(crate) t: N,

    /// The Welch-Satterthwaite degrees of freedom.
    pub(crate) deg: N,

    /// The p-value of the test, which is the probability accepting the results
    /// of the test is an error because the null hypothesis is in fact true.
    pub(crate) p: N,

    /// The maximum allowed p-value.
    pub(crate) alpha: N,

    /// The "tails" of the test.
    pub(crate) tails: Tails,
}

impl<N: Float + Sum + Into<f64>> WelchsT<N> {
    /// Runs the test on two samples.
    ///
    /// Returns an error if either sample has fewer than two values or if
    /// neither sample varies.
    ///
    /// # Panics
    ///
    /// `alpha` must be in (0, 1).
    pub(crate) fn two_sample<T: IntoIterator<Item = N> + Clone, V: IntoIterator<Item = N> + Clone>(
        a: T,
        b: V,
        alpha: N,
        tails: Tails,
    ) -> Result<Self> {
        assert!(alpha > N::zero() && alpha < N::one());

        let a = Sample::new(a)?;
        let b = Sample::new(b)?;

        let spread = (a.var / a.len) + (b.var / b.len);
        if spread <= N::zero() {
            return Err(WordleError::Stats);
        }

        // See https://statisticaloddsandends.wordpress.com/2020/07/03/welchs-t-test-and-the-welch-satterthwaite-equation/.
        let t = (a.mean - b.mean).abs() / spread.sqrt();

        let deg = spread.powi(2)
            / ((a.var.powi(2) / (a.len.powi(2) * (a.len - N::one())))
                + (b.var.powi(2) / (b.len.powi(2) * (b.len - N::one()))));

        let dist = StudentsT::new(0.0, 1.0, deg.into()).map_err(|_| WordleError::Stats)?;
        let p = N::from(dist.cdf((-t).into())).ok_or(WordleError::Stats)? * tails.factor::<N>();

        Ok(Self {
            t,
            deg,
            p,
            alpha,
            tails,
        })
    }

    pub(crate) fn is_significant(&self) -> bool {
        self.p < self.alpha
    }
}

#[cfg(test)]
mod test {
    use proptest::{prop_assert, prop_assert_eq, proptest};
    use statrs::assert_almost_eq;

    use super::*;

    #[test]
    fn sample_moments() -> Result<()> {
        let sample = Sample::new(vec![1.0_f64, 2.0, 3.0, 4.0, 5.0])?;
        assert_almost_eq!(sample.mean, 3.0, 1e-12);
        assert_almost_eq!(sample.var, 2.5, 1e-12);
        assert_almost_eq!(sample.len, 5.0, 1e-12);

        assert!(Sample::new(vec![1.0_f64]).is_err());
        Ok(())
    }

    #[test]
    fn statistic_and_degrees() -> Result<()> {
        let a = vec![1.0_f64, 2.0, 3.0, 4.0, 5.0];
        let b = vec![2.0_f64, 4.0, 6.0, 8.0, 10.0];
        let test = WelchsT::two_sample(a, b, 0.05, Tails::Two)?;

        // t = 3 / sqrt(2.5 / 5 + 10 / 5), deg = 2.5^2 / (0.5^2 / 4 + 2^2 / 4)
        assert_almost_eq!(test.t, 1.897_366_596_1, 1e-9);
        assert_almost_eq!(test.deg, 5.882_352_941_2, 1e-9);
        assert!(test.p > 0.05 && test.p < 0.2);
        assert!(!test.is_significant());
        Ok(())
    }

    #[test]
    fn identical_samples_are_not_different() -> Result<()> {
        let a = vec![3.0_f64, 4.0, 4.0, 5.0, 6.0];
        let test = WelchsT::two_sample(a.clone(), a, 0.05, Tails::Two)?;
        assert_almost_eq!(test.p, 1.0, 1e-9);
        Ok(())
    }

    #[test]
    fn constant_samples_are_rejected() {
        let a = vec![4.0_f64; 10];
        let b = vec![5.0_f64; 10];
        assert!(WelchsT::two_sample(a, b, 0.05, Tails::Two).is_err());
    }

    #[test]
    fn one_tail_halves_p() -> Result<()> {
        let a = vec![1.0_f64, 2.0, 3.0, 4.0, 5.0];
        let b = vec![2.0_f64, 4.0, 6.0, 8.0, 10.0];
        let one = WelchsT::two_sample(a.clone(), b.clone(), 0.05, Tails::One)?;
        let two = WelchsT::two_sample(a, b, 0.05, Tails::Two)?;
        assert_almost_eq!(one.p * 2.0, two.p, 1e-12);
        Ok(())
    }

    proptest! {
        #[test]
        fn symmetric_and_bounded(
            a in proptest::collection::vec(1.0_f64..7.0, 2..60),
            b in proptest::collection::vec(1.0_f64..7.0, 2..60),
        ) {
            if let (Ok(ab), Ok(ba)) = (
                WelchsT::two_sample(a.clone(), b.clone(), 0.05, Tails::Two),
                WelchsT::two_sample(b, a, 0.05, Tails::Two),
            ) {
                prop_assert!(ab.p >= 0.0 && ab.p <= 1.0 + 1e-9);
                prop_assert!((ab.p - ba.p).abs() < 1e-9);
                prop_assert_eq!(ab.is_significant(), ab.p < 0.05);
            }
        }

        #[test]
        fn far_apart_samples_differ(shift in 20.0_f64..100.0) {
            let a: Vec<f64> = (0..30).map(|i| f64::from(i % 5)).collect();
            let b: Vec<f64> = a.iter().map(|x| x + shift).collect();
            let test = WelchsT::two_sample(a, b, 0.05, Tails::Two)?;
            prop_assert!(test.is_significant());
        }
    }
}
