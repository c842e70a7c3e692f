use chain_bp::{ChainMRF, Pairwise, Result};
use log::{error, info};

fn run_chain(words: &[&str], priors: &[f64], pairwise: Pairwise) -> Result<()> {
    let mrf = ChainMRF::new(words.to_vec(), priors, pairwise)?;

    info!("Chain {:?} with pairwise potential {:?}", words, mrf.pairwise());

    let inference = mrf.infer(None)?;
    let beliefs = mrf.beliefs_from(&inference.messages)?;

    info!(
        "Finished after {} iterations ({:?}, distance={:.3e})",
        inference.iterations, inference.status, inference.distance
    );

    for ((word, prior), belief) in words.iter().zip(priors).zip(&beliefs) {
        info!("{word:>8}: prior={prior:.2}, belief={:.4}", belief[1]);
    }
    Ok(())
}

fn main() {
    env_logger::init();

    info!("Welcome to chain_bp.");

    let words = ["hello", "this", "text", "is", "out", "of", "BANANA"];

    let runs: [(&[f64], Pairwise); 2] = [
        (&[0.3, 0.5, 0.3, 0.5, 0.5, 0.5, 0.9], [[0.6, 0.4], [0.4, 0.6]]),
        (&[0.5, 0.5, 0.5, 0.5, 0.5, 0.5, 0.7], [[0.9, 0.1], [0.1, 0.9]]),
    ];

    for (priors, pairwise) in runs {
        if let Err(err) = run_chain(&words, priors, pairwise) {
            error!("Belief propagation failed: {err}");
            std::process::exit(1);
        }
    }

    info!("Done.");
}
