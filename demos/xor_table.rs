//! Feeds the XOR truth table through a hand-weighted 2-2-1 network.
//!
//! Run with `RUST_LOG=trace cargo run --example xor_table` to watch the
//! per-layer activations go by.

use weft::math::Matrix;
use weft::network::Network;

fn main() {
    env_logger::init();

    // One sample per row: (a, b, a ^ b).
    let table = Matrix::from_shape_vec(
        (4, 3),
        vec![
            0.0, 0.0, 0.0, //
            0.0, 1.0, 1.0, //
            1.0, 0.0, 1.0, //
            1.0, 1.0, 0.0,
        ],
    )
    .expect("table is 4 x 3");

    // XOR as AND(OR(a, b), NAND(a, b)), with saturated sigmoids standing in
    // for the boolean gates.
    let mut net = Network::new(&[2, 2, 1]);
    let w0 = Matrix::from_shape_vec((2, 2), vec![20.0, -20.0, 20.0, -20.0]).unwrap();
    let b0 = Matrix::from_shape_vec((1, 2), vec![-10.0, 30.0]).unwrap();
    let w1 = Matrix::from_shape_vec((2, 1), vec![20.0, 20.0]).unwrap();
    let b1 = Matrix::from_shape_vec((1, 1), vec![-30.0]).unwrap();
    net.weight_mut(0).copy_from(&w0);
    net.bias_mut(0).copy_from(&b0);
    net.weight_mut(1).copy_from(&w1);
    net.bias_mut(1).copy_from(&b1);

    let inputs = table.columns(0..2);
    for sample in 0..table.nrows() {
        let out = net.forward(inputs.row(sample));
        println!(
            "{} ^ {} = {:.4} (want {})",
            table[(sample, 0)],
            table[(sample, 1)],
            out[(0, 0)],
            table[(sample, 2)]
        );
    }
}
