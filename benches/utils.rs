use mustype::{Template, TemplateParams};
use rand::{Rng, SeedableRng, rngs::StdRng};
use serde_json::{Value, json};

#[path = "../tests/fixtures.rs"]
mod fixtures;

pub use fixtures::params;

/// Seeded so every engine renders the same orders.
pub fn generate_orders(n: usize) -> Vec<Value> {
    let mut rng = StdRng::seed_from_u64(42);
    (0..n).map(|_| random_order(&mut rng)).collect()
}

fn random_order(rng: &mut StdRng) -> Value {
    let lines: Vec<Value> = (0..rng.random_range(1..12))
        .map(|_| {
            json!({
                "sku": word(rng, 6, 6).to_uppercase(),
                "qty": rng.random_range(1..5),
                "price": f64::from(rng.random_range(100_u32..20_000)) / 100.0,
                "gift": rng.random_bool(0.1),
            })
        })
        .collect();
    let tags: Vec<String> = (0..rng.random_range(0..4)).map(|_| word(rng, 3, 7)).collect();
    let note = if rng.random_bool(0.3) {
        Value::from("<fragile> & \"urgent\"")
    } else {
        Value::Null
    };

    json!({
        "customer": {
            "name": word(rng, 4, 12),
            "email": format!("{}@example.com", word(rng, 4, 8)),
            "vip": rng.random_bool(0.2),
        },
        "lines": lines,
        "tags": tags,
        "paid": rng.random_bool(0.75),
        "note": note,
    })
}

fn word(rng: &mut StdRng, min_len: usize, max_len: usize) -> String {
    let len = rng.random_range(min_len..=max_len);
    (0..len)
        .map(|_| char::from(rng.random_range(b'a'..=b'z')))
        .collect()
}

pub fn mustype_template() -> Template<'static> {
    Template::parse(include_str!("template_mustype.tmpl")).unwrap()
}

/// Total bytes rendered, so the work can't be optimised away.
pub fn render_all(template: &Template<'_>, orders: &[TemplateParams]) -> usize {
    orders.iter().map(|order| template.render(order).len()).sum()
}

pub fn print_binary_size() {
    let binary_path = std::env::current_exe().unwrap();
    let size_bytes = std::fs::metadata(&binary_path).unwrap().len();
    println!(
        "Binary size: {:.2} KB ({} bytes) at {}",
        size_bytes as f64 / 1024.0,
        size_bytes,
        binary_path.display()
    );
}
