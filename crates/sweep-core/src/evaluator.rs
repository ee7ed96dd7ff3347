use crate::domain::{EvaluationFailure, Sample};

/// Pure per-sample response function.
///
/// Implementations must not depend on call order or on other samples; the
/// dispatcher may call them from any worker thread in any order.
pub trait Evaluator: Sync {
    fn evaluate(&self, sample: &Sample) -> Result<f64, EvaluationFailure>;

    fn name(&self) -> &str {
        "evaluator"
    }
}

impl<F> Evaluator for F
where
    F: Fn(&Sample) -> Result<f64, EvaluationFailure> + Sync,
{
    fn evaluate(&self, sample: &Sample) -> Result<f64, EvaluationFailure> {
        self(sample)
    }
}

#[cfg(test)]
mod tests {
    use super::Evaluator;
    use crate::domain::{EvaluationFailure, Sample};

    #[test]
    fn closures_act_as_evaluators() {
        let square = |sample: &Sample| -> Result<f64, EvaluationFailure> {
            Ok(sample.input * sample.input)
        };
        let sample = Sample {
            index: 3,
            input: 1.5,
        };
        assert_eq!(square.evaluate(&sample), Ok(2.25));
        assert_eq!(square.name(), "evaluator");
    }
}
