use qvec::QuantumState;
use std::time::Instant;

fn main() {
    println!("qvec Memory Usage Benchmark");
    println!("===========================");

    let sizes = [10, 15, 20, 22, 24]; // 24 qubits = 16M amplitudes = 256MB

    println!(
        "{:<10} | {:<15} | {:<15} | {:<15}",
        "Qubits", "State Size", "Memory", "Allocation Time"
    );
    println!("{:-<10}-+-{:-<15}-+-{:-<15}-+-{:-<15}", "", "", "", "");

    for &n in &sizes {
        let dim = 1usize << n;

        let start = Instant::now();
        let state = QuantumState::new(n);
        let duration = start.elapsed();

        match state {
            Ok(s) => {
                println!(
                    "{:<10} | {:<15} | {:<15} | {:?}",
                    n,
                    s.dimension(),
                    format_size(s.memory_bytes()),
                    duration
                );
            }
            Err(e) => {
                println!("{:<10} | {:<15} | Failed: {}", n, dim, e);
            }
        }
    }
}

fn format_size(bytes: usize) -> String {
    const KB: usize = 1024;
    const MB: usize = 1024 * KB;
    const GB: usize = 1024 * MB;

    if bytes >= GB {
        format!("{:.2} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}
