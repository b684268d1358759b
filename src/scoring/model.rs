use crate::error::{GaitError, Result};
use crate::features::FEATURE_COUNT;

/// Fixed-shape autoencoder used to reconstruct normalised features.
///
/// Implementations wrap whatever inference backend the host provides. The
/// network maps 9 values to 9 values (9→32→16→4→16→32→9 in the trained
/// model); nothing in this crate depends on the hidden layers.
pub trait Reconstructor: Send + Sync {
    /// Runs one forward pass.
    fn infer(&self, input: &[f32; FEATURE_COUNT]) -> Result<[f32; FEATURE_COUNT]>;

    /// Frees backend resources. Called once when the owning scorer is
    /// released; the default does nothing.
    fn release(&mut self) {}
}

impl<R: Reconstructor + ?Sized> Reconstructor for Box<R> {
    fn infer(&self, input: &[f32; FEATURE_COUNT]) -> Result<[f32; FEATURE_COUNT]> {
        (**self).infer(input)
    }

    fn release(&mut self) {
        (**self).release()
    }
}

/// Adapts a closure into a [`Reconstructor`].
///
/// ```
/// use gait_score::scoring::{FnReconstructor, Reconstructor};
///
/// let identity = FnReconstructor::new(|x: &[f32; 9]| Ok(*x));
/// assert_eq!(identity.infer(&[1.0; 9]).unwrap(), [1.0; 9]);
/// ```
pub struct FnReconstructor<F> {
    f: F,
}

impl<F> FnReconstructor<F>
where
    F: Fn(&[f32; FEATURE_COUNT]) -> Result<[f32; FEATURE_COUNT]> + Send + Sync,
{
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

impl<F> Reconstructor for FnReconstructor<F>
where
    F: Fn(&[f32; FEATURE_COUNT]) -> Result<[f32; FEATURE_COUNT]> + Send + Sync,
{
    fn infer(&self, input: &[f32; FEATURE_COUNT]) -> Result<[f32; FEATURE_COUNT]> {
        (self.f)(input)
    }
}

/// Runs `model`, rejecting non-finite input and output.
pub(crate) fn reconstruct(
    model: &dyn Reconstructor,
    input: &[f32; FEATURE_COUNT],
) -> Result<[f32; FEATURE_COUNT]> {
    if let Some(i) = input.iter().position(|v| !v.is_finite()) {
        return Err(GaitError::Model(format!("non-finite model input at index {i}")));
    }
    let out = model.infer(input)?;
    if let Some(i) = out.iter().position(|v| !v.is_finite()) {
        return Err(GaitError::Model(format!(
            "non-finite reconstruction at index {i}"
        )));
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closure_model_is_called() {
        let m = FnReconstructor::new(|x: &[f32; 9]| Ok(x.map(|v| v * 0.5)));
        let out = reconstruct(&m, &[2.0; 9]).unwrap();
        assert_eq!(out, [1.0; 9]);
    }

    #[test]
    fn non_finite_output_is_a_model_error() {
        let m = FnReconstructor::new(|_: &[f32; 9]| {
            let mut out = [0.0; 9];
            out[3] = f32::NAN;
            Ok(out)
        });
        let err = reconstruct(&m, &[0.0; 9]).unwrap_err();
        assert!(matches!(err, GaitError::Model(_)));
    }

    #[test]
    fn non_finite_input_never_reaches_the_model() {
        let m = FnReconstructor::new(|_: &[f32; 9]| -> Result<[f32; 9]> {
            panic!("model must not run on non-finite input")
        });
        let mut input = [0.0; 9];
        input[5] = f32::INFINITY;
        let err = reconstruct(&m, &input).unwrap_err();
        assert!(matches!(err, GaitError::Model(_)));
    }
}
