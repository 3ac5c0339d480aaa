use crate::error::{Result, VectorKind};
use crate::loss::mse::MseLoss;
use crate::network::network::Network;
use crate::network::trace::ForwardTrace;
use crate::optim::sgd::Sgd;

/// Output-layer error terms: `(a_L - y) ⊙ σ'(z_L)`.
pub fn output_errors(network: &Network, trace: &ForwardTrace, expected: &[f64]) -> Vec<f64> {
    let last_layer = trace.last_layer();
    let activator = network.layers[last_layer - 1].activator;

    MseLoss::derivative(trace.output(), expected)
        .into_iter()
        .zip(&trace.weighted_inputs[last_layer])
        .map(|(d, &z)| d * activator.derivative(z))
        .collect()
}

/// Error terms of hidden layer `l` given those of layer `l + 1`:
/// `(W_l · δ_{l+1}) ⊙ σ'(z_l)`.
pub fn hidden_errors(network: &Network, trace: &ForwardTrace, l: usize, next: &[f64]) -> Vec<f64> {
    let activator = network.layers[l - 1].activator;

    network.layers[l]
        .back_propagate(next)
        .into_iter()
        .zip(&trace.weighted_inputs[l])
        .map(|(e, &z)| e * activator.derivative(z))
        .collect()
}

/// Error terms for every layer, indexed like the trace (`errors[0]` is empty).
///
/// Layers are visited strictly from the output back to layer 1 because each
/// hidden layer needs the errors of the layer after it.
pub fn compute_errors(network: &Network, trace: &ForwardTrace, expected: &[f64]) -> Vec<Vec<f64>> {
    let last_layer = network.layer_count() - 1;
    let mut errors = vec![Vec::new(); network.layer_count()];
    errors[last_layer] = output_errors(network, trace, expected);

    for l in (1..last_layer).rev() {
        errors[l] = hidden_errors(network, trace, l, &errors[l + 1]);
    }
    errors
}

/// One online training step. Returns the example's squared error measured
/// before the update.
///
/// Width mismatches fail with `Error::InputSize` before anything is changed.
pub fn train_one(
    network: &mut Network,
    inputs: &[f64],
    expected: &[f64],
    optimizer: &Sgd,
) -> Result<f64> {
    network.check_width(VectorKind::Input, inputs.len())?;
    network.check_width(VectorKind::Expected, expected.len())?;

    let trace = network.forward_trace(inputs)?;
    let loss = MseLoss::loss(trace.output(), expected);
    let errors = compute_errors(network, &trace, expected);
    optimizer.step(network, &trace, &errors);

    Ok(loss)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    fn cost(network: &Network, x: &[f64], y: &[f64]) -> f64 {
        let out = network.forward(x).unwrap();
        0.5 * out.iter().zip(y).map(|(a, t)| (a - t).powi(2)).sum::<f64>()
    }

    #[test]
    fn errors_match_numerical_gradient() {
        let net = Network::seeded(&[3, 4, 3, 2], 21).unwrap();
        let x = [0.2, -0.6, 0.9];
        let y = [1.0, 0.0];
        let trace = net.forward_trace(&x).unwrap();
        let errors = compute_errors(&net, &trace, &y);
        let h = 1e-6;

        for l in 0..net.layer_count() - 1 {
            for i in 0..net.layer_sizes()[l] {
                for j in 0..net.layer_sizes()[l + 1] {
                    let mut plus = net.clone();
                    plus.layers[l].weights.data[i][j] += h;
                    let mut minus = net.clone();
                    minus.layers[l].weights.data[i][j] -= h;
                    let numeric = (cost(&plus, &x, &y) - cost(&minus, &x, &y)) / (2.0 * h);
                    let analytic = trace.activations[l][i] * errors[l + 1][j];
                    assert!((numeric - analytic).abs() < 1e-7, "w[{l}][{i}][{j}]");
                }
            }
            for j in 0..net.layer_sizes()[l + 1] {
                let mut plus = net.clone();
                plus.layers[l].biases[j] += h;
                let mut minus = net.clone();
                minus.layers[l].biases[j] -= h;
                let numeric = (cost(&plus, &x, &y) - cost(&minus, &x, &y)) / (2.0 * h);
                assert!((numeric - errors[l + 1][j]).abs() < 1e-7, "b[{}][{j}]", l + 1);
            }
        }
    }

    #[test]
    fn single_step_applies_gradient_descent() {
        let mut net = Network::seeded(&[2, 2, 1], 4).unwrap();
        let before = net.clone();
        let (x, y) = ([1.0, 0.5], [0.0]);
        let trace = before.forward_trace(&x).unwrap();
        let errors = compute_errors(&before, &trace, &y);
        let sgd = Sgd::new(0.5).unwrap();

        train_one(&mut net, &x, &y, &sgd).unwrap();

        for l in 0..2 {
            for (j, e) in errors[l + 1].iter().enumerate() {
                assert!((net.bias(l + 1, j) - (before.bias(l + 1, j) - 0.5 * e)).abs() < 1e-15);
                for i in 0..before.layer_sizes()[l] {
                    let expected = before.weight(l, i, j) - 0.5 * trace.activations[l][i] * e;
                    assert!((net.weight(l, i, j) - expected).abs() < 1e-15);
                }
            }
        }
    }

    #[test]
    fn training_lowers_the_loss_on_one_example() {
        let mut net = Network::seeded(&[2, 3, 1], 8).unwrap();
        let sgd = Sgd::new(1.0).unwrap();
        let first = train_one(&mut net, &[1.0, 0.0], &[1.0], &sgd).unwrap();
        for _ in 0..50 {
            train_one(&mut net, &[1.0, 0.0], &[1.0], &sgd).unwrap();
        }
        let last = train_one(&mut net, &[1.0, 0.0], &[1.0], &sgd).unwrap();
        assert!(last < first);
    }

    #[test]
    fn mismatched_widths_leave_parameters_untouched() {
        let mut net = Network::seeded(&[2, 2, 1], 2).unwrap();
        let before = net.clone();
        let sgd = Sgd::new(1.0).unwrap();

        let err = train_one(&mut net, &[1.0], &[1.0], &sgd).unwrap_err();
        assert!(matches!(err, Error::InputSize { kind: VectorKind::Input, .. }));
        let err = train_one(&mut net, &[1.0, 0.0], &[1.0, 0.0], &sgd).unwrap_err();
        assert!(matches!(err, Error::InputSize { kind: VectorKind::Expected, .. }));
        assert_eq!(net, before);
    }
}
