#[derive(formbind::Bind)]
pub struct Cents(pub u64);

fn main() {}
