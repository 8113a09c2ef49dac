//! Feed-forward network topology over the matrix core.
//!
//! A [`Network`] owns one weight and one bias matrix per layer transition
//! and keeps an activation matrix per layer, input included, so a forward
//! pass allocates nothing. Activations are `1 x width` row vectors and
//! propagate left to right: `a[i + 1] = sigmoid(a[i] * w[i] + b[i])`.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::NetworkConfig;
use crate::math::{Matrix, MatrixView};

pub struct Network {
    /// `weights[i]` maps layer `i` to layer `i + 1`, shaped
    /// `architecture[i] x architecture[i + 1]`.
    weights: Vec<Matrix<f32>>,
    /// `biases[i]` is a `1 x architecture[i + 1]` row vector.
    biases: Vec<Matrix<f32>>,
    /// One `1 x architecture[i]` row vector per layer, input included, so
    /// `activations.len() == weights.len() + 1`.
    activations: Vec<Matrix<f32>>,
}

impl Network {
    /// Allocates a zeroed network. `architecture` lists layer widths from
    /// input to output, so `&[3, 4, 2]` is a 3-input, 2-output network
    /// with one hidden layer of 4.
    pub fn new(architecture: &[usize]) -> Self {
        assert!(
            !architecture.is_empty(),
            "architecture needs at least an input layer"
        );
        assert!(
            architecture.iter().all(|&width| width > 0),
            "layer widths must be positive"
        );
        let transitions = architecture.len() - 1;
        let mut weights = Vec::with_capacity(transitions);
        let mut biases = Vec::with_capacity(transitions);
        let mut activations = Vec::with_capacity(architecture.len());
        activations.push(Matrix::zeros(1, architecture[0]));
        for layer in 1..architecture.len() {
            weights.push(Matrix::zeros(architecture[layer - 1], architecture[layer]));
            biases.push(Matrix::zeros(1, architecture[layer]));
            activations.push(Matrix::zeros(1, architecture[layer]));
        }
        log::debug!(
            "[Network] built topology {:?} ({} transitions)",
            architecture,
            transitions
        );
        Network {
            weights,
            biases,
            activations,
        }
    }

    /// Builds and randomizes a network as described by `config`, seeding
    /// the generator from `config.seed` when one is given.
    pub fn from_config(config: &NetworkConfig) -> Self {
        let mut network = Network::new(&config.layers);
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        network.randomize(config.init_low, config.init_high, &mut rng);
        network
    }

    /// Number of layer transitions, one less than the number of layers.
    pub fn depth(&self) -> usize {
        self.weights.len()
    }

    /// Layer widths from input to output.
    pub fn architecture(&self) -> Vec<usize> {
        self.activations.iter().map(|a| a.ncols()).collect()
    }

    pub fn weight(&self, layer: usize) -> &Matrix<f32> {
        &self.weights[layer]
    }

    pub fn weight_mut(&mut self, layer: usize) -> &mut Matrix<f32> {
        &mut self.weights[layer]
    }

    pub fn bias(&self, layer: usize) -> &Matrix<f32> {
        &self.biases[layer]
    }

    pub fn bias_mut(&mut self, layer: usize) -> &mut Matrix<f32> {
        &mut self.biases[layer]
    }

    /// Activation row vector of layer `layer` as left by the last forward
    /// pass; index 0 is the input layer.
    pub fn activation(&self, layer: usize) -> &Matrix<f32> {
        &self.activations[layer]
    }

    /// Activation row vector of the output layer.
    pub fn output(&self) -> &Matrix<f32> {
        self.activations
            .last()
            .expect("network always has an input layer")
    }

    /// Redraws every weight and bias from the uniform distribution over
    /// `[low, high)`, layer by layer.
    pub fn randomize<R>(&mut self, low: f32, high: f32, rng: &mut R)
    where
        R: Rng + ?Sized,
    {
        for (weight, bias) in self.weights.iter_mut().zip(self.biases.iter_mut()) {
            weight.fill_uniform(low, high, rng);
            bias.fill_uniform(low, high, rng);
        }
        log::debug!(
            "[Network] randomized {} transitions over [{}, {})",
            self.depth(),
            low,
            high
        );
    }

    /// Runs one forward pass and returns the output activation. `input`
    /// must be `1 x architecture[0]`: a whole `&Matrix`, or a
    /// [`Matrix::row`] view into a sample table.
    pub fn forward<'a>(&mut self, input: impl Into<MatrixView<'a, f32>>) -> &Matrix<f32> {
        let input: MatrixView<'_, f32> = input.into();
        self.activations[0].copy_from(input);
        for layer in 0..self.depth() {
            let (done, rest) = self.activations.split_at_mut(layer + 1);
            let src = done[layer].view();
            let mut dst = rest[0].view_mut();
            dst.fill(0.0);
            dst.add_matmul(src, self.weights[layer].view());
            dst += self.biases[layer].view();
            dst.sigmoid();
            log::trace!(
                "[Network] layer {}: activation shape {:?}",
                layer + 1,
                dst.shape()
            );
        }
        self.output()
    }
}
