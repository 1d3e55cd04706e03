use std::env;
use std::str::FromStr;

use tensor_fft::cpu::{CpuEngine, EngineError, Tensor};
use tensor_fft::{fft, hfft, ifft, ihfft, irfft, rfft, FftOptions, Normalization};
use utilities::gen_random_real_signal;

fn describe(name: &str, tensor: &Tensor) {
    let kind = if tensor.is_complex() { "complex" } else { "real" };
    println!("{name:>6}: {kind:<7} {:?}", tensor.shape());
}

fn main() -> Result<(), EngineError> {
    let args: Vec<String> = env::args().collect();
    let len = args
        .get(1)
        .map(|arg| usize::from_str(arg).expect("length must be a positive integer"))
        .unwrap_or(128);
    let norm = args
        .get(2)
        .map(|arg| Normalization::from_str(arg).expect("norm must be forward, backward or ortho"))
        .unwrap_or_default();

    let engine = CpuEngine::new();
    let signal = Tensor::real_vector(gen_random_real_signal(len));
    let options = FftOptions::new().norm(norm);
    describe("input", &signal);

    let spectrum = fft(&engine, &signal, options.clone())?;
    describe("fft", &spectrum);
    describe("ifft", &ifft(&engine, &spectrum, options.clone())?);

    let one_sided = rfft(&engine, &signal, options.clone())?;
    describe("rfft", &one_sided);
    let restored = irfft(&engine, &one_sided, options.clone().n(len as i64))?;
    describe("irfft", &restored);

    let hermitian = ihfft(&engine, &signal, options.clone())?;
    describe("ihfft", &hermitian);
    describe("hfft", &hfft(&engine, &hermitian, options.n(len as i64))?);

    let max_error = restored
        .as_real()
        .unwrap_or_default()
        .iter()
        .zip(signal.as_real().unwrap_or_default())
        .map(|(a, b)| (a - b).abs())
        .fold(0.0, f64::max);
    println!("irfft(rfft(x)) max error: {max_error:e}");

    Ok(())
}
