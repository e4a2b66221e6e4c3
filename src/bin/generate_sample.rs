/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }

    fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[(self.next_u64() % items.len() as u64) as usize]
    }
}

fn main() {
    let mut rng = SimpleRng::new(42);

    let sedes = ["Sede Norte", "Sede Sur", "Sede Centro", "Sede Occidente"];

    // (producto, precio base, stock medio)
    let productos: [(&str, f64, f64); 8] = [
        ("Tornillo M8", 0.15, 900.0),
        ("Tuerca M8", 0.10, 850.0),
        ("Arandela plana", 0.05, 1200.0),
        ("Taladro percutor", 89.90, 25.0),
        ("Martillo carpintero", 14.50, 60.0),
        ("Cinta métrica 5m", 6.75, 110.0),
        ("Guantes de nitrilo", 3.20, 300.0),
        ("Llave inglesa 10\"", 11.95, 45.0),
    ];

    let fechas = [
        "2025-01-15",
        "2025-02-03",
        "2025-02-27",
        "2025-03-14",
        "2025-04-02",
        "2025-04-21",
    ];

    let output_path = "datos_inventario_ejemplo.csv";
    let mut writer = csv::Writer::from_path(output_path).expect("Failed to create output file");

    writer
        .write_record(["Sede", "Producto", "Cantidad", "Precio_Unitario", "Fecha_Entrada"])
        .expect("Failed to write header");

    let mut n_rows = 0usize;
    for sede in &sedes {
        for (producto, precio_base, stock_medio) in &productos {
            // A few delivery batches per product and location.
            let batches = 2 + (rng.next_u64() % 3) as usize;
            for _ in 0..batches {
                let cantidad = rng.gauss(*stock_medio, stock_medio * 0.3).max(0.0).round();
                let precio = precio_base * (0.9 + 0.2 * rng.next_f64());
                let fecha = rng.pick(&fechas);

                writer
                    .write_record([
                        sede.to_string(),
                        producto.to_string(),
                        format!("{cantidad:.0}"),
                        format!("{precio:.2}"),
                        fecha.to_string(),
                    ])
                    .expect("Failed to write record");
                n_rows += 1;
            }
        }
    }

    writer.flush().expect("Failed to flush output file");

    println!(
        "Wrote {n_rows} inventory records across {} locations to {output_path}",
        sedes.len()
    );
}
