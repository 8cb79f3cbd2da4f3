/// Exponential moving average
#[derive(Debug, Clone, Copy)]
pub(crate) struct Smoothing {
    alpha: f32,
    current: Option<f32>,
}

impl Smoothing {
    pub fn new(alpha: f32) -> Self {
        Self {
            alpha,
            current: None,
        }
    }

    pub fn push(&mut self, value: f32) -> f32 {
        let current = self.current.get_or_insert(value);
        *current = self.alpha * value + (1.0 - self.alpha) * *current;
        *current
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[rstest::rstest]
    #[test]
    #[case(vec![10.0, 12.0, 15.6], 0.2, vec![10.0, 20.0, 30.0])]
    #[case(vec![-4.0, -4.0], 0.5, vec![-4.0, -4.0])]
    #[case(vec![1.0, 3.0], 1.0, vec![1.0, 3.0])]
    fn push(#[case] expect: Vec<f32>, #[case] alpha: f32, #[case] values: Vec<f32>) {
        let mut smoothing = Smoothing::new(alpha);
        assert_eq!(
            expect,
            values
                .into_iter()
                .map(|v| smoothing.push(v))
                .collect::<Vec<_>>()
        );
    }
}
